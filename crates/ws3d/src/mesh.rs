//! ws3dinv mesh and model parsing

// crate modules
use crate::error::{Error, Result};

// strata modules
use strata_grid::{Dataset, Extent, FieldAssociation, Fold, NumericArray, StructuredGrid};
use strata_parse::{parse_floats, skip_lines, Line};

// external crates
use log::{debug, warn};
use nalgebra::{Rotation, Vector3};

/// Name of the resistivity array
pub const MODEL_NAME: &str = "Ohm*m";

/// Cell counts in file order, `ny nx nz`
fn counts(line: Option<Line<'_>>) -> Result<[usize; 3]> {
    let (_, line) = line.ok_or(Error::MissingValues("cell counts"))?;
    let values = line
        .split_whitespace()
        .map(|t| t.parse::<usize>())
        .collect::<core::result::Result<Vec<usize>, _>>()
        .map_err(|_| Error::InvalidCounts(line.to_string()))?;

    match values.as_slice() {
        [ny, nx, nz, ..] => Ok([*ny, *nx, *nz]),
        _ => Err(Error::InvalidCounts(line.to_string())),
    }
}

/// Accumulate widths across lines until the count is met
fn widths<'a, I>(lines: &mut I, n: usize, axis: &'static str) -> Result<Vec<f64>>
where
    I: Iterator<Item = Line<'a>>,
{
    let mut widths = Vec::with_capacity(n);
    while widths.len() < n {
        let (number, line) = lines.next().ok_or(Error::MissingValues(axis))?;
        widths.extend(parse_floats(line, number)?);
    }

    if widths.len() != n {
        return Err(Error::WidthCountMismatch {
            axis,
            expected: n,
            found: widths.len(),
        });
    }
    Ok(widths)
}

/// Node offsets from the first node, centred on zero when `centre` is set
fn nodes(widths: &[f64], centre: bool) -> Vec<f64> {
    let shift = if centre {
        widths.iter().sum::<f64>() / 2.0
    } else {
        0.0
    };

    let mut nodes = Vec::with_capacity(widths.len() + 1);
    nodes.push(-shift);
    for w in widths {
        nodes.push(nodes[nodes.len() - 1] + w);
    }
    nodes
}

/// Read a ws3dinv mesh and its model
///
/// The mesh is centred on `origin` in plan, hangs down from it in depth and
/// is rotated `angle` degrees clockwise about the vertical. A file without
/// model values gives the bare mesh.
///
/// ```rust
/// # use strata_ws3d::parse_ws3d;
/// # use strata_grid::{Dataset, Extent};
/// let text = "# demo\n2 1 1 0\n10 10\n20\n5\n1.0 2.0\n";
/// let grid = parse_ws3d(text, [0.0, 0.0, 0.0], 0.0).unwrap();
///
/// assert_eq!(grid.dims(), Extent::new(2, 3, 2));
/// assert_eq!(grid.bounds(), Some([-10.0, 10.0, -10.0, 10.0, -5.0, 0.0]));
/// ```
pub fn parse_ws3d(text: &str, origin: [f64; 3], angle: f64) -> Result<StructuredGrid> {
    let mut lines = skip_lines(text, 1).filter(|(_, l)| !l.trim().is_empty());

    // easting comes first in the file
    let [ny, nx, nz] = counts(lines.next())?;
    let dy = widths(&mut lines, ny, "easting")?;
    let dx = widths(&mut lines, nx, "northing")?;
    let dz = widths(&mut lines, nz, "depth")?;
    debug!("ws3dinv mesh of {nx}x{ny}x{nz} cells");

    let node_x = nodes(&dx, true);
    let node_y = nodes(&dy, true);
    let node_z = nodes(&dz, false);

    let rotation = Rotation::<f64, 3>::from_axis_angle(&Vector3::z_axis(), -angle.to_radians());
    let mut points = Vec::with_capacity(node_x.len() * node_y.len() * node_z.len());
    for z in &node_z {
        for y in &node_y {
            for x in &node_x {
                let r = rotation.transform_vector(&Vector3::new(*x, *y, 0.0));
                points.push([r.x + origin[0], r.y + origin[1], origin[2] - z]);
            }
        }
    }

    let dims = Extent::new(nx + 1, ny + 1, nz + 1);
    let mut grid = StructuredGrid::new(dims, points)?;

    let mut values = Vec::with_capacity(nx * ny * nz);
    for (number, line) in lines {
        values.extend(parse_floats(line, number)?);
    }

    if values.is_empty() {
        warn!("No model values, returning the bare mesh");
        return Ok(grid);
    }

    let n = nx * ny * nz;
    if values.len() != n {
        return Err(strata_grid::Error::CellCountMismatch {
            name: MODEL_NAME.to_string(),
            expected: n,
            found: values.len(),
        }
        .into());
    }

    // file order is depth, northing, then easting from the far side
    let fold = Fold::new([nz, nx, ny]).reverse_axis(2)?.swap_axes(1, 2)?;
    let model = NumericArray::new(MODEL_NAME, values)?.reordered(fold.index());
    grid.add_array(FieldAssociation::CellData, model)?;

    Ok(grid)
}

#[cfg(test)]
mod mesh_tests {
    use super::*;

    const FILE: &str = "# two by three by one
3 2 1 0
10 10
10
10 10
5
1 2 3
4 5 6
";

    #[test]
    fn model_order() {
        let grid = parse_ws3d(FILE, [0.0; 3], 0.0).unwrap();
        assert_eq!(grid.dims(), Extent::new(3, 4, 2));

        // easting reversed then transposed so northing runs fastest
        let model = grid.cell_data().get(MODEL_NAME).unwrap().to_f64();
        assert_eq!(model, vec![3.0, 6.0, 2.0, 5.0, 1.0, 4.0]);
    }

    #[test]
    fn origin_and_rotation() {
        let grid = parse_ws3d(FILE, [100.0, 200.0, -50.0], 90.0).unwrap();
        let first = grid.points()[0];

        // (-10, -15) rotated clockwise by a quarter turn
        assert!((first[0] - 85.0).abs() < 1e-9, "{first:?}");
        assert!((first[1] - 210.0).abs() < 1e-9, "{first:?}");
        assert_eq!(first[2], -50.0);
        assert_eq!(grid.points()[grid.n_points() - 1][2], -55.0);
    }

    #[test]
    fn wrong_model_length() {
        let text = FILE.replace("4 5 6", "4 5");
        let err = parse_ws3d(&text, [0.0; 3], 0.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "model \"Ohm*m\" does not match the mesh cells, expected 6 actual 5"
        );
    }

    #[test]
    fn widths_overrun() {
        let text = "# c\n2 1 1 0\n10 10 10\n10\n5\n";
        assert!(matches!(
            parse_ws3d(text, [0.0; 3], 0.0),
            Err(Error::WidthCountMismatch { axis: "easting", expected: 2, found: 3 })
        ));
    }

    #[test]
    fn bad_counts() {
        assert!(matches!(parse_ws3d("# c\n", [0.0; 3], 0.0), Err(Error::MissingValues(_))));
        assert!(matches!(parse_ws3d("# c\n1 x 1 0\n", [0.0; 3], 0.0), Err(Error::InvalidCounts(_))));
    }
}
