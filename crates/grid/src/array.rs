//! Named, typed and contiguous sample buffers

// crate modules
use crate::error::{Error, Result};

// standard library
use std::cell::OnceCell;
use std::fmt;

// external crates
use strata_utils::SliceExt;

/// Supported element types of a [NumericArray]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    I32,
    U32,
    I64,
    U64,
    F32,
    F64,
    Char,
}

impl ElementType {
    /// Size of a single element in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::I32 | Self::U32 | Self::F32 => 4,
            Self::I64 | Self::U64 | Self::F64 => 8,
            Self::Char => 1,
        }
    }

    /// True for the floating point types
    pub fn is_float(&self) -> bool {
        matches!(self, Self::F32 | Self::F64)
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::I32 => "int32",
            Self::U32 => "uint32",
            Self::I64 => "int64",
            Self::U64 => "uint64",
            Self::F32 => "float32",
            Self::F64 => "float64",
            Self::Char => "char",
        };
        write!(f, "{s}")
    }
}

/// The contiguous storage behind a [NumericArray]
///
/// A closed set of element types. Every variant holds the flat values, so a
/// 3-component array of `n` tuples holds `3n` values.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayData {
    I32(Vec<i32>),
    U32(Vec<u32>),
    I64(Vec<i64>),
    U64(Vec<u64>),
    F32(Vec<f32>),
    F64(Vec<f64>),
    Char(Vec<u8>),
}

/// Run the same expression over whichever vector is inside
macro_rules! each_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ArrayData::I32($v) => $body,
            ArrayData::U32($v) => $body,
            ArrayData::I64($v) => $body,
            ArrayData::U64($v) => $body,
            ArrayData::F32($v) => $body,
            ArrayData::F64($v) => $body,
            ArrayData::Char($v) => $body,
        }
    };
}

/// As [each_variant] but rewraps the result in the same variant
macro_rules! map_variant {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            ArrayData::I32($v) => ArrayData::I32($body),
            ArrayData::U32($v) => ArrayData::U32($body),
            ArrayData::I64($v) => ArrayData::I64($body),
            ArrayData::U64($v) => ArrayData::U64($body),
            ArrayData::F32($v) => ArrayData::F32($body),
            ArrayData::F64($v) => ArrayData::F64($body),
            ArrayData::Char($v) => ArrayData::Char($body),
        }
    };
}

impl ArrayData {
    /// Number of individual values (not tuples)
    pub fn len(&self) -> usize {
        each_variant!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_type(&self) -> ElementType {
        match self {
            Self::I32(_) => ElementType::I32,
            Self::U32(_) => ElementType::U32,
            Self::I64(_) => ElementType::I64,
            Self::U64(_) => ElementType::U64,
            Self::F32(_) => ElementType::F32,
            Self::F64(_) => ElementType::F64,
            Self::Char(_) => ElementType::Char,
        }
    }

    /// Value at a flat index as f64, panics if out of range like any slice
    pub fn value_f64(&self, idx: usize) -> f64 {
        each_variant!(self, v => v[idx] as f64)
    }

    /// Copy of every value as f64
    pub fn to_f64(&self) -> Vec<f64> {
        each_variant!(self, v => v.iter().map(|x| *x as f64).collect())
    }

    /// Gather values by flat index into a new buffer of the same type
    pub fn gather(&self, index: &[usize]) -> ArrayData {
        map_variant!(self, v => index.iter().map(|i| v[*i]).collect())
    }

    /// Raw bytes in the requested byte order
    pub fn to_bytes(&self, little_endian: bool) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len() * self.element_type().size());
        each_variant!(self, v => {
            for x in v {
                if little_endian {
                    bytes.extend_from_slice(&x.to_le_bytes());
                } else {
                    bytes.extend_from_slice(&x.to_be_bytes());
                }
            }
        });
        bytes
    }
}

macro_rules! impl_from_vec {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<Vec<$t>> for ArrayData {
                fn from(values: Vec<$t>) -> Self {
                    ArrayData::$variant(values)
                }
            }
        )*
    };
}

impl_from_vec!(i32 => I32, u32 => U32, i64 => I64, u64 => U64, f32 => F32, f64 => F64, u8 => Char);

/// A named array of tuples
///
/// The element type, number of components and length are fixed once the
/// array is constructed. Only the name may be replaced, by consuming the array
/// through [renamed()](NumericArray::renamed).
///
/// ```rust
/// # use strata_grid::{NumericArray, ElementType};
/// let array = NumericArray::new("Density", vec![2.1, 2.5, 2.7]).unwrap();
/// assert_eq!(array.len(), 3);
/// assert_eq!(array.element_type(), ElementType::F64);
/// assert_eq!(array.range(0), Some((2.1, 2.7)));
///
/// // names are required
/// assert!(NumericArray::new("", vec![1.0]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct NumericArray {
    name: String,
    components: usize,
    data: ArrayData,
    /// Per-component (min, max), only computed when asked for
    range: OnceCell<Vec<Option<(f64, f64)>>>,
}

impl PartialEq for NumericArray {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.components == other.components && self.data == other.data
    }
}

impl NumericArray {
    /// Single component array
    pub fn new<S: Into<String>, D: Into<ArrayData>>(name: S, data: D) -> Result<Self> {
        Self::with_components(name, 1, data)
    }

    /// Array of `components` values per tuple
    pub fn with_components<S: Into<String>, D: Into<ArrayData>>(
        name: S,
        components: usize,
        data: D,
    ) -> Result<Self> {
        let name = name.into();
        let data = data.into();

        if name.is_empty() {
            return Err(Error::EmptyArrayName);
        }

        if components == 0 || data.len() % components != 0 {
            return Err(Error::ComponentMismatch {
                values: data.len(),
                components,
            });
        }

        Ok(Self {
            name,
            components,
            data,
            range: OnceCell::new(),
        })
    }

    /// Text values stored as fixed width characters
    ///
    /// Each string becomes one tuple with as many components as the longest
    /// string, shorter values padded with zero bytes.
    ///
    /// ```rust
    /// # use strata_grid::NumericArray;
    /// let rocks = ["granite", "shale"].map(String::from);
    /// let array = NumericArray::from_strings("Lithology", &rocks).unwrap();
    /// assert_eq!(array.components(), 7);
    /// assert_eq!(array.strings().unwrap(), rocks.to_vec());
    /// ```
    pub fn from_strings<S: Into<String>>(name: S, values: &[String]) -> Result<Self> {
        let width = values.iter().map(|s| s.len()).max().unwrap_or(1).max(1);
        let mut bytes = Vec::with_capacity(width * values.len());
        for value in values {
            bytes.extend_from_slice(value.as_bytes());
            bytes.resize(bytes.len() + width - value.len(), 0);
        }
        Self::with_components(name, width, bytes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Consume the array and give it a new name
    pub fn renamed<S: Into<String>>(self, name: S) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyArrayName);
        }
        Ok(Self { name, ..self })
    }

    pub fn element_type(&self) -> ElementType {
        self.data.element_type()
    }

    pub fn components(&self) -> usize {
        self.components
    }

    /// Number of tuples
    pub fn len(&self) -> usize {
        self.data.len() / self.components
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data(&self) -> &ArrayData {
        &self.data
    }

    pub fn into_data(self) -> ArrayData {
        self.data
    }

    /// Single value of a tuple as f64
    pub fn value(&self, tuple: usize, component: usize) -> f64 {
        self.data.value_f64(tuple * self.components + component)
    }

    /// Every value as f64, in storage order
    pub fn to_f64(&self) -> Vec<f64> {
        self.data.to_f64()
    }

    /// Decode character arrays back into strings
    ///
    /// Returns `None` for any other element type.
    pub fn strings(&self) -> Option<Vec<String>> {
        match &self.data {
            ArrayData::Char(bytes) => Some(
                bytes
                    .chunks(self.components)
                    .map(|chunk| {
                        let end = chunk.iter().position(|b| *b == 0).unwrap_or(chunk.len());
                        String::from_utf8_lossy(&chunk[..end]).into_owned()
                    })
                    .collect(),
            ),
            _ => None,
        }
    }

    /// Finite (min, max) of a component, NAN values ignored
    pub fn range(&self, component: usize) -> Option<(f64, f64)> {
        let ranges = self.range.get_or_init(|| {
            (0..self.components)
                .map(|c| {
                    let values = (0..self.len())
                        .map(|t| self.value(t, c))
                        .collect::<Vec<f64>>();
                    values.finite_range()
                })
                .collect()
        });
        ranges.get(component).copied().flatten()
    }

    /// New array with tuples taken in the order given by `index`
    ///
    /// Entry `i` of the result is tuple `index[i]` of this array. Used by all
    /// of the layout transforms, which are pure permutations.
    pub fn reordered(&self, index: &[usize]) -> Self {
        let data = if self.components == 1 {
            self.data.gather(index)
        } else {
            let flat = index
                .iter()
                .flat_map(|t| (0..self.components).map(move |c| t * self.components + c))
                .collect::<Vec<usize>>();
            self.data.gather(&flat)
        };

        Self {
            name: self.name.clone(),
            components: self.components,
            data,
            range: OnceCell::new(),
        }
    }

    /// Replace every occurrence of `mask` with NAN
    ///
    /// Integer arrays are promoted to `f64` when the mask value is present,
    /// since they have no way to represent NAN.
    pub fn masked(self, mask: f64) -> Self {
        let data = match self.data {
            ArrayData::F32(v) => ArrayData::F32(
                v.into_iter()
                    .map(|x| if x as f64 == mask { f32::NAN } else { x })
                    .collect(),
            ),
            ArrayData::F64(v) => {
                ArrayData::F64(v.into_iter().map(|x| if x == mask { f64::NAN } else { x }).collect())
            }
            ArrayData::Char(v) => ArrayData::Char(v),
            other => {
                let values = other.to_f64();
                if values.iter().any(|x| *x == mask) {
                    ArrayData::F64(
                        values
                            .into_iter()
                            .map(|x| if x == mask { f64::NAN } else { x })
                            .collect(),
                    )
                } else {
                    other
                }
            }
        };

        Self {
            data,
            range: OnceCell::new(),
            ..self
        }
    }
}

impl fmt::Display for NumericArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} tuples x {} components)",
            self.name,
            self.element_type(),
            self.len(),
            self.components
        )
    }
}

/// Where an array is attached on a data object
///
/// The numeric codes are a stable external contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum FieldAssociation {
    PointData = 0,
    CellData = 1,
    FieldData = 2,
    RowData = 6,
}

impl FieldAssociation {
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for FieldAssociation {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            0 => Ok(Self::PointData),
            1 => Ok(Self::CellData),
            2 => Ok(Self::FieldData),
            6 => Ok(Self::RowData),
            _ => Err(Error::UnknownFieldAssociation(code)),
        }
    }
}
