//! UBC tensor mesh files

// crate modules
use crate::error::{Error, Result};

// strata modules
use strata_format::f;
use strata_grid::{build_rectilinear, RectilinearGrid};
use strata_parse::{data_lines, parse_floats, parse_integers, parse_repeated_line, strip_comment, Line};
use strata_utils::SliceExt;

// external crates
use log::{debug, trace};

/// The mesh layouts a UBC mesh file can hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    /// Easting and depth only, a single cell thick in northing
    Tensor2D,
    Tensor3D,
    OcTree,
}

/// Lines of a UBC file with comments removed
pub(crate) fn ubc_lines(text: &str) -> Vec<Line<'_>> {
    data_lines(text, 0, "!")
        .into_iter()
        .map(|(n, l)| (n, strip_comment(l, '!').trim()))
        .filter(|(_, l)| !l.is_empty())
        .collect()
}

/// Take the next line or fail naming what was expected
pub(crate) fn next_line<'a, I>(lines: &mut I, what: &str) -> Result<Line<'a>>
where
    I: Iterator<Item = Line<'a>>,
{
    lines
        .next()
        .ok_or_else(|| Error::MissingValues(f!("expected {what}")))
}

/// Exactly three values from a line
pub(crate) fn triple<T: Copy>(values: &[T], what: &'static str, line: (usize, &str)) -> Result<[T; 3]> {
    match values {
        [a, b, c] => Ok([*a, *b, *c]),
        _ => Err(Error::InvalidValue {
            what,
            value: line.1.to_string(),
            line: line.0,
        }),
    }
}

/// Non-negative cell counts
pub(crate) fn counts(line: Line<'_>, what: &'static str) -> Result<[usize; 3]> {
    let values = parse_integers(line.1, line.0)?;
    let [a, b, c] = triple(&values, what, line)?;
    let convert = |v: i64| {
        usize::try_from(v).map_err(|_| Error::InvalidValue {
            what,
            value: line.1.to_string(),
            line: line.0,
        })
    };
    Ok([convert(a)?, convert(b)?, convert(c)?])
}

/// Work out which kind of mesh a file holds from its layout
///
/// A single value on the first line is a 2D mesh. Three values is either a
/// 3D tensor mesh or an OcTree mesh, told apart by the OcTree cell count
/// line followed by `i j k size` rows.
///
/// ```rust
/// # use strata_ubc::{detect_mesh_kind, MeshKind};
/// let tensor = "2 2 1\n0 0 0\n2*1\n2*1\n1\n";
/// let octree = "4 4 4\n0 0 0\n1 1 1\n1\n1 1 1 4\n";
/// assert_eq!(detect_mesh_kind(tensor).unwrap(), MeshKind::Tensor3D);
/// assert_eq!(detect_mesh_kind(octree).unwrap(), MeshKind::OcTree);
/// assert!(detect_mesh_kind("1 2\n").is_err());
/// ```
pub fn detect_mesh_kind(text: &str) -> Result<MeshKind> {
    let lines = ubc_lines(text);
    let Some((_, first)) = lines.first() else {
        return Err(Error::UBCFormatUnknown(String::new()));
    };

    let tokens = first.split_whitespace().collect::<Vec<&str>>();
    if tokens.iter().any(|t| t.parse::<i64>().is_err()) {
        return Err(Error::UBCFormatUnknown(first.to_string()));
    }

    let kind = match tokens.len() {
        1 => MeshKind::Tensor2D,
        3 if is_octree(&lines) => MeshKind::OcTree,
        3 => MeshKind::Tensor3D,
        _ => return Err(Error::UBCFormatUnknown(first.to_string())),
    };
    debug!("Detected {kind:?} mesh");
    Ok(kind)
}

fn is_octree(lines: &[Line<'_>]) -> bool {
    let is_ints = |idx: usize, n: usize| {
        lines.get(idx).is_some_and(|(_, l)| {
            let tokens = l.split_whitespace().collect::<Vec<&str>>();
            tokens.len() == n && tokens.iter().all(|t| t.parse::<i64>().is_ok())
        })
    };
    is_ints(3, 1) && is_ints(4, 4)
}

/// Collect `n` cell widths, which may wrap across several lines
pub(crate) fn read_widths<'a, I>(lines: &mut I, n: usize, axis: char) -> Result<Vec<f64>>
where
    I: Iterator<Item = Line<'a>>,
{
    let mut widths = Vec::with_capacity(n);
    while widths.len() < n {
        let Some((_, line)) = lines.next() else {
            break;
        };
        widths.extend(parse_repeated_line(line)?);
    }

    if widths.len() != n {
        return Err(Error::WidthCountMismatch {
            axis,
            expected: n,
            found: widths.len(),
        });
    }
    trace!("{axis} widths {widths:?}");
    Ok(widths)
}

/// Read a 3D tensor mesh
///
/// Depth widths are reversed so the mesh is z-up with the origin moved to
/// the bottom south-west corner.
///
/// ```rust
/// # use strata_ubc::parse_mesh_3d;
/// let text = "! mesh\n2 1 2\n100 200 0\n2*10\n5\n1 2\n";
/// let mesh = parse_mesh_3d(text).unwrap();
///
/// assert_eq!(mesh.x(), &[100.0, 110.0, 120.0]);
/// assert_eq!(mesh.y(), &[200.0, 205.0]);
/// assert_eq!(mesh.z(), &[-3.0, -1.0, 0.0]);
/// ```
pub fn parse_mesh_3d(text: &str) -> Result<RectilinearGrid> {
    let mut lines = ubc_lines(text).into_iter();

    let [ne, nn, nz] = counts(next_line(&mut lines, "cell counts")?, "cell counts")?;

    let line = next_line(&mut lines, "origin")?;
    let [ox, oy, oz] = triple(&parse_floats(line.1, line.0)?, "origin", line)?;

    let cx = read_widths(&mut lines, ne, 'x')?;
    let cy = read_widths(&mut lines, nn, 'y')?;
    let mut cz = read_widths(&mut lines, nz, 'z')?;

    // depth positive down to z up from the bottom
    cz.reverse();
    let bottom = oz - cz.iter().sum::<f64>();

    Ok(build_rectilinear(
        cx.cumulative_from(ox),
        cy.cumulative_from(oy),
        cz.cumulative_from(bottom),
    )?)
}

/// One axis of a 2D mesh, the origin then `(node, subdivisions)` pairs
fn segments<'a, I>(lines: &mut I, axis: char) -> Result<Vec<f64>>
where
    I: Iterator<Item = Line<'a>>,
{
    let line = next_line(lines, "segment count")?;
    let count = line.1.parse::<usize>().map_err(|_| Error::InvalidValue {
        what: "segment count",
        value: line.1.to_string(),
        line: line.0,
    })?;

    let mut coords = Vec::new();
    for s in 0..count {
        let line = next_line(lines, "segment")?;
        let values = parse_floats(line.1, line.0)?;
        let (start, node, disc) = match (s, values.as_slice()) {
            (0, [o, x, d]) => {
                coords.push(*o);
                (*o, *x, *d)
            }
            (_, [x, d]) if !coords.is_empty() => (coords[coords.len() - 1], *x, *d),
            _ => {
                return Err(Error::InvalidValue {
                    what: "segment",
                    value: line.1.to_string(),
                    line: line.0,
                })
            }
        };

        if disc < 1.0 || disc.fract() != 0.0 {
            return Err(Error::InvalidValue {
                what: "subdivision count",
                value: line.1.to_string(),
                line: line.0,
            });
        }

        let n = disc as usize;
        let width = (node - start) / disc;
        coords.extend((1..n).map(|j| start + j as f64 * width));
        coords.push(node);
    }

    trace!("{axis} nodes {coords:?}");
    Ok(coords)
}

/// Read a 2D tensor mesh
///
/// The mesh lies in the XZ plane with a single Y node at 0. Depths are
/// negated and reversed so Z increases upwards.
///
/// ```rust
/// # use strata_ubc::parse_mesh_2d;
/// # use strata_grid::Extent;
/// let text = "2\n0 10 2\n30 1\n1\n0 6 3\n";
/// let mesh = parse_mesh_2d(text).unwrap();
///
/// assert_eq!(mesh.x(), &[0.0, 5.0, 10.0, 30.0]);
/// assert_eq!(mesh.y(), &[0.0]);
/// assert_eq!(mesh.z(), &[-6.0, -4.0, -2.0, -0.0]);
/// assert_eq!(mesh.cell_dims(), Extent::new(3, 1, 3));
/// ```
pub fn parse_mesh_2d(text: &str) -> Result<RectilinearGrid> {
    let mut lines = ubc_lines(text).into_iter();
    let x = segments(&mut lines, 'x')?;
    let depth = segments(&mut lines, 'z')?;
    let z = depth.iter().rev().map(|d| -d).collect::<Vec<f64>>();
    Ok(build_rectilinear(x, vec![0.0], z)?)
}

/// Read either kind of tensor mesh
pub fn parse_tensor_mesh(text: &str) -> Result<(MeshKind, RectilinearGrid)> {
    match detect_mesh_kind(text)? {
        MeshKind::Tensor2D => Ok((MeshKind::Tensor2D, parse_mesh_2d(text)?)),
        MeshKind::Tensor3D => Ok((MeshKind::Tensor3D, parse_mesh_3d(text)?)),
        MeshKind::OcTree => Err(Error::UBCFormatUnknown(
            "OcTree meshes are read by the OcTree reader".to_string(),
        )),
    }
}

#[cfg(test)]
mod mesh_tests {
    use super::*;
    use rstest::rstest;
    use strata_grid::{Dataset, Extent};

    #[test]
    fn repeaters_and_wrapped_widths() {
        let text = "3 4 5\n0 0 0\n3*10.0\n2*5\n2*5 ! wrapped\n1 1 1\n2*2\n";
        let mesh = parse_mesh_3d(text).unwrap();
        assert_eq!(mesh.cell_dims(), Extent::new(3, 4, 5));
        assert_eq!(mesh.n_cells(), 60);
        assert_eq!(mesh.z(), &[-7.0, -5.0, -3.0, -2.0, -1.0, 0.0]);
    }

    #[rstest]
    #[case("3 4 5\n0 0 0\n3*10.0\n4*5\n4*1\n", 'z', 5, 4)]
    #[case("3 4 5\n0 0 0\n2*10.0\n", 'x', 3, 2)]
    #[case("1 1 1\n0 0 0\n2*1\n1\n1\n", 'x', 1, 2)]
    fn width_counts(
        #[case] text: &str,
        #[case] axis: char,
        #[case] expected: usize,
        #[case] found: usize,
    ) {
        let err = parse_mesh_3d(text).unwrap_err();
        assert!(matches!(
            err,
            Error::WidthCountMismatch { axis: a, expected: e, found: f }
                if a == axis && e == expected && f == found
        ));
    }

    #[rstest]
    #[case("")]
    #[case("! only comments\n")]
    #[case("10 10\n")]
    #[case("a b c\n")]
    fn unknown_format(#[case] text: &str) {
        assert!(matches!(detect_mesh_kind(text), Err(Error::UBCFormatUnknown(_))));
    }

    #[test]
    fn bad_origin() {
        let err = parse_mesh_3d("1 1 1\n0 0\n1\n1\n1\n").unwrap_err();
        assert_eq!(err.to_string(), "invalid origin \"0 0\" on line 2");
    }

    #[test]
    fn two_dimensional_detected() {
        let (kind, mesh) = parse_tensor_mesh("1\n0 10 2\n1\n0 4 4\n").unwrap();
        assert_eq!(kind, MeshKind::Tensor2D);
        assert_eq!(mesh.dims(), Extent::new(3, 1, 5));
    }
}
