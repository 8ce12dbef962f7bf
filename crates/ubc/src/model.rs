//! UBC model files, one value per cell

// crate modules
use crate::error::{Error, Result};
use crate::mesh::{next_line, ubc_lines};

// standard library
use std::path::Path;

// strata modules
use strata_grid::{Extent, Fold, NumericArray};
use strata_parse::{parse_floats, parse_integers, Line};

// external crates
use log::{debug, warn};

/// Name given to a model read from a file, the file name with extension
pub fn model_name<P: AsRef<Path>>(path: P) -> String {
    path.as_ref()
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Data".to_string())
}

/// Gather every value, tracking how many values each line held
fn values_of(lines: &[Line<'_>]) -> Result<(Vec<f64>, usize)> {
    let mut values = Vec::new();
    let mut width = None;
    let mut uniform = true;

    for (n, line) in lines {
        let row = parse_floats(line, *n)?;
        match width {
            None => width = Some(row.len()),
            Some(w) if w != row.len() => uniform = false,
            _ => (),
        }
        values.extend(row);
    }

    let components = match width {
        Some(w) if uniform && w > 0 => w,
        _ => {
            warn!("Model lines hold different numbers of values, reading them as scalars");
            1
        }
    };
    Ok((values, components))
}

fn check_count(name: &str, expected: usize, found: usize) -> Result<()> {
    if expected != found {
        return Err(strata_grid::Error::CellCountMismatch {
            name: name.to_string(),
            expected,
            found,
        }
        .into());
    }
    Ok(())
}

/// Read a 3D model for a mesh with `cells` cell counts
///
/// Values run down each column of cells from the top, then east, then north.
/// The result is in x-fastest order from the bottom of the mesh. Lines with
/// several values become multi-component tuples.
///
/// ```rust
/// # use strata_ubc::parse_model_3d;
/// # use strata_grid::Extent;
/// // one column two cells deep, top value first
/// let model = parse_model_3d("10\n20\n", Extent::new(1, 1, 2), "rho").unwrap();
/// assert_eq!(model.to_f64(), vec![20.0, 10.0]);
///
/// let err = parse_model_3d("10\n", Extent::new(1, 1, 2), "rho").unwrap_err();
/// assert_eq!(
///     err.to_string(),
///     "model \"rho\" does not match the mesh cells, expected 2 actual 1"
/// );
/// ```
pub fn parse_model_3d(text: &str, cells: Extent, name: &str) -> Result<NumericArray> {
    let lines = ubc_lines(text);
    let (values, components) = values_of(&lines)?;
    let tuples = values.len() / components;
    check_count(name, cells.product(), tuples)?;

    let [nx, ny, nz] = cells.as_array();
    let fold = Fold::new([ny, nx, nz])
        .swap_axes(0, 2)?
        .swap_axes(1, 2)?
        .reverse_axis(0)?;

    debug!("Model {name} has {tuples} cells of {components} components");
    let model = NumericArray::with_components(name, components, values)?;
    Ok(model.reordered(fold.index()))
}

/// Read a 2D model, returning it with its `(nx, nz)` cell counts
///
/// The first line holds the cell counts, the values follow as `nz` rows of
/// `nx` from the top of the section. The model comes back in the cell order
/// of the 2D mesh, x fastest from the bottom row up.
///
/// ```rust
/// # use strata_ubc::parse_model_2d;
/// let (model, [nx, nz]) = parse_model_2d("2 2\n1 2\n3 4\n", "rho").unwrap();
/// assert_eq!((nx, nz), (2, 2));
/// assert_eq!(model.to_f64(), vec![3.0, 4.0, 1.0, 2.0]);
/// ```
pub fn parse_model_2d(text: &str, name: &str) -> Result<(NumericArray, [usize; 2])> {
    let lines = ubc_lines(text);
    let mut iter = lines.iter().copied();

    let line = next_line(&mut iter, "model dimensions")?;
    let dims = parse_integers(line.1, line.0)?;
    let [nx, nz] = match dims.as_slice() {
        [nx, nz] if *nx >= 0 && *nz >= 0 => [*nx as usize, *nz as usize],
        _ => {
            return Err(Error::InvalidValue {
                what: "model dimensions",
                value: line.1.to_string(),
                line: line.0,
            })
        }
    };

    let mut values = Vec::with_capacity(nx * nz);
    for (n, line) in iter {
        values.extend(parse_floats(line, n)?);
    }
    check_count(name, nx * nz, values.len())?;

    let fold = Fold::new([nz, 1, nx]).reverse_axis(0)?;
    let model = NumericArray::new(name, values)?;
    Ok((model.reordered(fold.index()), [nx, nz]))
}

#[cfg(test)]
mod model_tests {
    use super::*;

    #[test]
    fn column_order() {
        // nx=2 ny=1 nz=2, file runs down x=0 then down x=1
        let model = parse_model_3d("1\n2\n3\n4\n", Extent::new(2, 1, 2), "m").unwrap();
        // bottom row first, x fastest
        assert_eq!(model.to_f64(), vec![2.0, 4.0, 1.0, 3.0]);
    }

    #[test]
    fn north_is_slowest() {
        let model = parse_model_3d("1\n2\n", Extent::new(1, 2, 1), "m").unwrap();
        assert_eq!(model.to_f64(), vec![1.0, 2.0]);
    }

    #[test]
    fn vector_model() {
        let text = "1 10\n2 20\n! trailing comment\n";
        let model = parse_model_3d(text, Extent::new(1, 1, 2), "v").unwrap();
        assert_eq!(model.components(), 2);
        assert_eq!(model.to_f64(), vec![2.0, 20.0, 1.0, 10.0]);
    }

    #[test]
    fn ragged_lines_are_scalars() {
        let model = parse_model_3d("1 2\n3\n", Extent::new(1, 1, 3), "m").unwrap();
        assert_eq!(model.components(), 1);
        assert_eq!(model.to_f64(), vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn two_dimensional_count() {
        let err = parse_model_2d("2 2\n1 2 3\n", "m").unwrap_err();
        assert!(matches!(
            err,
            Error::GridError(strata_grid::Error::CellCountMismatch { expected: 4, found: 3, .. })
        ));
        assert!(matches!(
            parse_model_2d("2\n1 2\n", "m"),
            Err(Error::InvalidValue { .. })
        ));
    }

    #[test]
    fn two_dimensional_order() {
        // nx=3 nz=2, top row first in the file
        let (model, dims) = parse_model_2d("3 2\n1 2 3\n4 5 6\n", "m").unwrap();
        assert_eq!(dims, [3, 2]);
        assert_eq!(model.to_f64(), vec![4.0, 5.0, 6.0, 1.0, 2.0, 3.0]);

        // rows may wrap over several lines
        let (model, _) = parse_model_2d("2 3\n1 2 3\n4 ! wrapped\n5 6\n", "m").unwrap();
        assert_eq!(model.to_f64(), vec![5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn names_keep_extension() {
        assert_eq!(model_name("/tmp/dir/rho.mod"), "rho.mod");
    }
}
