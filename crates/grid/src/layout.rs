//! Memory layout transforms between packed sample cubes and grid order
//!
//! Every transform here is a pure permutation of tuples. The permutation is
//! computed once as a gather index and then applied to any number of arrays
//! with [NumericArray::reordered()], so values are never touched.
//!
//! Index arithmetic follows the usual row-major reshape semantics: a buffer
//! viewed with shape `(s0, s1, s2)` has the last axis varying fastest. The
//! canonical grid order is the opposite, x varying fastest, so a grid with
//! dimensions `(nx, ny, nz)` is the row-major cube `(nz, ny, nx)`.

// crate modules
use crate::error::{Error, Result};
use crate::{Extent, NumericArray};

// standard library
use std::fmt;
use std::str::FromStr;

/// Packing order of a flat sample buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MemoryOrder {
    /// First axis varies fastest (column-major)
    #[default]
    F,
    /// Last axis varies fastest (row-major)
    C,
}

impl FromStr for MemoryOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "F" | "f" => Ok(Self::F),
            "C" | "c" => Ok(Self::C),
            other => Err(Error::UnknownOrder(other.to_string())),
        }
    }
}

impl fmt::Display for MemoryOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F => write!(f, "F"),
            Self::C => write!(f, "C"),
        }
    }
}

/// Meaning of the three packed axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisConvention {
    /// `(d1, d2, d3) = (x, y, z)`
    #[default]
    Cartesian,
    /// `(d1, d2, d3) = (z, x, y)`, z packed first
    SEPlib,
    /// Cartesian axes with z measured positive down
    UbcDepthDown,
}

impl fmt::Display for AxisConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cartesian => write!(f, "Cartesian"),
            Self::SEPlib => write!(f, "SEPlib"),
            Self::UbcDepthDown => write!(f, "UBC depth down"),
        }
    }
}

/// A gather index over a cube with a row-major shape
///
/// Starts as the identity and records reshapes, axis swaps and reversals.
/// Entry `i` of the finished index is the source tuple that lands at
/// position `i`.
///
/// ```rust
/// # use strata_grid::Fold;
/// // a 2x3 plane transposed
/// let fold = Fold::new([1, 2, 3]).swap_axes(1, 2).unwrap();
/// assert_eq!(fold.shape(), [1, 3, 2]);
/// assert_eq!(fold.index(), &[0, 3, 1, 4, 2, 5]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fold {
    index: Vec<usize>,
    shape: [usize; 3],
}

impl Fold {
    /// Identity over a cube of this shape
    pub fn new(shape: [usize; 3]) -> Self {
        Self {
            index: (0..shape.iter().product()).collect(),
            shape,
        }
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn index(&self) -> &[usize] {
        &self.index
    }

    pub fn into_index(self) -> Vec<usize> {
        self.index
    }

    /// View the same flat order with a new shape
    pub fn reshape(self, shape: [usize; 3]) -> Result<Self> {
        let expected = shape.iter().product();
        if self.index.len() != expected {
            return Err(Error::ShapeMismatch {
                expected,
                found: self.index.len(),
            });
        }
        Ok(Self { shape, ..self })
    }

    /// Exchange two axes, flattening the result in row-major order
    pub fn swap_axes(self, a: usize, b: usize) -> Result<Self> {
        check_axis(a)?;
        check_axis(b)?;
        let mut shape = self.shape;
        shape.swap(a, b);
        Ok(self.gather(shape, |mut m| {
            m.swap(a, b);
            m
        }))
    }

    /// Reverse the direction of one axis
    pub fn reverse_axis(self, axis: usize) -> Result<Self> {
        check_axis(axis)?;
        let shape = self.shape;
        let n = shape[axis];
        Ok(self.gather(shape, |mut m| {
            m[axis] = n - 1 - m[axis];
            m
        }))
    }

    /// Walk the new shape and pull each entry from the old position
    fn gather<F: Fn([usize; 3]) -> [usize; 3]>(self, shape: [usize; 3], source: F) -> Self {
        let stride = [self.shape[1] * self.shape[2], self.shape[2], 1];
        let mut index = Vec::with_capacity(self.index.len());
        for i in 0..shape[0] {
            for j in 0..shape[1] {
                for k in 0..shape[2] {
                    let m = source([i, j, k]);
                    index.push(self.index[m[0] * stride[0] + m[1] * stride[1] + m[2] * stride[2]]);
                }
            }
        }
        Self { index, shape }
    }
}

fn check_axis(axis: usize) -> Result<()> {
    if axis > 2 {
        return Err(Error::InvalidAxis(axis));
    }
    Ok(())
}

/// A complete description of how a sample cube was packed
///
/// Transforms are applied in a fixed order: unpack the memory order,
/// rearrange SEPlib axes, swap x and y, then flip z for depth positive down
/// data.
///
/// ```rust
/// # use strata_grid::{AxisConvention, Extent, Layout, MemoryOrder};
/// let layout = Layout::new(MemoryOrder::F, AxisConvention::SEPlib, false);
/// assert_eq!(layout.refold_index().unwrap(), [2, 1, 0]);
/// assert_eq!(
///     layout.output_dims(Extent::new(20, 150, 200)).unwrap(),
///     Extent::new(200, 150, 20)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Layout {
    pub order: MemoryOrder,
    pub convention: AxisConvention,
    pub swap_xy: bool,
}

impl Layout {
    pub fn new(order: MemoryOrder, convention: AxisConvention, swap_xy: bool) -> Self {
        Self {
            order,
            convention,
            swap_xy,
        }
    }

    /// Which input axis becomes each output axis
    pub fn refold_index(&self) -> Result<[usize; 3]> {
        match (self.convention, self.swap_xy) {
            (AxisConvention::Cartesian, false) => Ok([0, 1, 2]),
            (AxisConvention::Cartesian, true) => Ok([1, 0, 2]),
            (AxisConvention::SEPlib, false) => Ok([2, 1, 0]),
            (AxisConvention::SEPlib, true) => Ok([1, 2, 0]),
            (AxisConvention::UbcDepthDown, false) => Ok([0, 1, 2]),
            (AxisConvention::UbcDepthDown, true) => Err(Error::ConventionUnsupported {
                order: self.order.to_string(),
                convention: self.convention.to_string(),
                swap_xy: self.swap_xy,
            }),
        }
    }

    /// Permute any per-axis triple (spacing, origin) like the data
    pub fn refold<T: Copy>(&self, triple: [T; 3]) -> Result<[T; 3]> {
        let idx = self.refold_index()?;
        Ok([triple[idx[0]], triple[idx[1]], triple[idx[2]]])
    }

    /// Grid dimensions `(nx, ny, nz)` after the transform
    pub fn output_dims(&self, extent: Extent) -> Result<Extent> {
        Ok(extent.permute(self.refold_index()?))
    }

    /// Gather index taking a packed cube of `extent` into grid order
    pub fn permutation(&self, extent: Extent) -> Result<Vec<usize>> {
        let refold = self.refold_index()?;
        let mut ext = extent.as_array();
        let mut fold = Fold::new(ext);

        if self.order == MemoryOrder::C {
            fold = fold.swap_axes(0, 2)?;
            ext = fold.shape();
        }

        if self.convention == AxisConvention::SEPlib {
            fold = fold.reshape([ext[2], ext[1], ext[0]])?.swap_axes(0, 2)?;
        }

        if self.swap_xy {
            fold = fold.reshape(ext)?;
            if self.convention == AxisConvention::SEPlib {
                fold = fold.swap_axes(1, 2)?;
            } else {
                fold = fold.swap_axes(0, 1)?;
            }
        }

        let index = fold.into_index();
        if self.convention != AxisConvention::UbcDepthDown {
            return Ok(index);
        }

        let flip = flip_index(extent.permute(refold), 2)?;
        Ok(flip.into_iter().map(|i| index[i]).collect())
    }

    /// Transform a single array packed over `extent`
    pub fn apply(&self, array: &NumericArray, extent: Extent) -> Result<NumericArray> {
        if array.len() != extent.product() {
            return Err(Error::ShapeMismatch {
                expected: extent.product(),
                found: array.len(),
            });
        }
        Ok(array.reordered(&self.permutation(extent)?))
    }
}

/// Gather index reversing one axis of a grid with x varying fastest
pub fn flip_index(dims: Extent, axis: usize) -> Result<Vec<usize>> {
    check_axis(axis)?;
    let [nx, ny, nz] = dims.as_array();
    Ok(Fold::new([nz, ny, nx]).reverse_axis(2 - axis)?.into_index())
}

/// Reverse an array along one axis of a grid with dimensions `dims`
///
/// ```rust
/// # use strata_grid::{flip_axis, ArrayData, Extent, NumericArray};
/// let array = NumericArray::new("a", vec![0, 1, 2, 3, 4, 5]).unwrap();
/// let flipped = flip_axis(&array, Extent::new(3, 2, 1), 0).unwrap();
/// assert_eq!(flipped.data(), &ArrayData::I32(vec![2, 1, 0, 5, 4, 3]));
/// ```
pub fn flip_axis(array: &NumericArray, dims: Extent, axis: usize) -> Result<NumericArray> {
    if array.len() != dims.product() {
        return Err(Error::ShapeMismatch {
            expected: dims.product(),
            found: array.len(),
        });
    }
    Ok(array.reordered(&flip_index(dims, axis)?))
}

#[cfg(test)]
mod layout_tests {
    use super::*;
    use crate::ArrayData;
    use itertools::iproduct;
    use rstest::rstest;

    fn all_layouts() -> Vec<Layout> {
        iproduct!(
            [MemoryOrder::F, MemoryOrder::C],
            [
                AxisConvention::Cartesian,
                AxisConvention::SEPlib,
                AxisConvention::UbcDepthDown
            ],
            [false, true]
        )
        .map(|(o, c, s)| Layout::new(o, c, s))
        .collect()
    }

    #[rstest]
    #[case(AxisConvention::Cartesian, false, [0, 1, 2])]
    #[case(AxisConvention::Cartesian, true, [1, 0, 2])]
    #[case(AxisConvention::SEPlib, false, [2, 1, 0])]
    #[case(AxisConvention::SEPlib, true, [1, 2, 0])]
    #[case(AxisConvention::UbcDepthDown, false, [0, 1, 2])]
    fn refold_indices(
        #[case] convention: AxisConvention,
        #[case] swap_xy: bool,
        #[case] expected: [usize; 3],
    ) {
        let layout = Layout::new(MemoryOrder::F, convention, swap_xy);
        assert_eq!(layout.refold_index().unwrap(), expected);
    }

    #[test]
    fn unsupported_combination() {
        let layout = Layout::new(MemoryOrder::C, AxisConvention::UbcDepthDown, true);
        assert!(matches!(
            layout.permutation(Extent::new(2, 2, 2)),
            Err(Error::ConventionUnsupported { .. })
        ));
    }

    #[test]
    fn every_transform_is_a_permutation() {
        let extent = Extent::new(3, 4, 5);
        for layout in all_layouts() {
            let Ok(index) = layout.permutation(extent) else {
                continue;
            };
            let mut sorted = index.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..60).collect::<Vec<usize>>(), "{layout:?}");
            assert_eq!(
                layout.output_dims(extent).unwrap().product(),
                extent.product()
            );
            assert_eq!(
                layout.refold([0.5, 1.0, 2.0]).unwrap().iter().product::<f64>(),
                1.0
            );
        }
    }

    #[test]
    fn fortran_cartesian_is_identity() {
        let index = Layout::default().permutation(Extent::new(2, 3, 4)).unwrap();
        assert_eq!(index, (0..24).collect::<Vec<usize>>());
    }

    #[test]
    fn c_order_unpacks_to_x_fastest() {
        let layout = Layout::new(MemoryOrder::C, AxisConvention::Cartesian, false);
        let values = (0..24).collect::<Vec<i32>>();
        let array = NumericArray::new("v", values).unwrap();
        let out = layout.apply(&array, Extent::new(2, 3, 4)).unwrap();

        // row-major (i, j, k) lands at i + 2(j + 3k)
        for (i, j, k) in iproduct!(0..2, 0..3, 0..4) {
            assert_eq!(out.value(i + 2 * (j + 3 * k), 0), (i * 12 + j * 4 + k) as f64);
        }
    }

    #[test]
    fn seplib_puts_depth_last() {
        // packed with depth fastest: (d1, d2, d3) = (z, x, y)
        let (nz, nx, ny) = (4, 3, 2);
        let values = iproduct!(0..ny, 0..nx, 0..nz)
            .map(|(y, x, z)| (100 * x + 10 * y + z) as i32)
            .collect::<Vec<i32>>();
        let array = NumericArray::new("v", values).unwrap();
        let layout = Layout::new(MemoryOrder::F, AxisConvention::SEPlib, false);

        let extent = Extent::new(nz, nx, ny);
        let dims = layout.output_dims(extent).unwrap();
        assert_eq!(dims, Extent::new(ny, nx, nz));
        let out = layout.apply(&array, extent).unwrap();
        assert_eq!(out.len(), 24);

        // the first output axis now walks the slowest packed axis
        assert_eq!(out.value(0, 0), 0.0);
        assert_eq!(out.value(1, 0), 10.0);
    }

    #[test]
    fn depth_down_flips_z() {
        let layout = Layout::new(MemoryOrder::F, AxisConvention::UbcDepthDown, false);
        let array = NumericArray::new("v", vec![0, 1, 2, 3]).unwrap();
        let out = layout.apply(&array, Extent::new(2, 1, 2)).unwrap();
        assert_eq!(out.data(), &ArrayData::I32(vec![2, 3, 0, 1]));
    }

    #[test]
    fn wrong_length() {
        let array = NumericArray::new("v", vec![0.0; 5]).unwrap();
        assert!(matches!(
            Layout::default().apply(&array, Extent::new(2, 2, 2)),
            Err(Error::ShapeMismatch {
                expected: 8,
                found: 5
            })
        ));
    }

    #[test]
    fn flips_compose() {
        let dims = Extent::new(10, 11, 12);
        let array = NumericArray::new("v", (0..1320).collect::<Vec<i32>>()).unwrap();

        let twice = flip_axis(&flip_axis(&array, dims, 1).unwrap(), dims, 1).unwrap();
        assert_eq!(twice, array);

        let x = flip_axis(&array, dims, 0).unwrap();
        assert_eq!(x.value(0, 0), 9.0);
        assert_eq!(x.value(10, 0), 19.0);

        let z = flip_axis(&array, dims, 2).unwrap();
        assert_eq!(z.value(0, 0), 1210.0);
        assert!(flip_axis(&array, dims, 3).is_err());
    }

    #[test]
    fn order_from_str() {
        assert_eq!("C".parse::<MemoryOrder>().unwrap(), MemoryOrder::C);
        assert_eq!(" f".parse::<MemoryOrder>().unwrap(), MemoryOrder::F);
        assert!("K".parse::<MemoryOrder>().is_err());
    }
}
