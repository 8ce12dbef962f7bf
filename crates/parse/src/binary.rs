//! Packed binary parsing primitives

// crate modules
use crate::error::{Error, Result};

// standard library
use std::fmt;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

// strata modules
use strata_grid::{ArrayData, ElementType};

// external crates
use log::{debug, warn};

/// The control sequence ending a Madagascar header, `EOL EOL EOT`
pub const MADAGASCAR_SENTINEL: [u8; 3] = [0x0C, 0x0C, 0x04];

/// Element types of packed binary streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Dtype {
    #[default]
    F32,
    F64,
    I32,
}

impl Dtype {
    /// Size of a single value in bytes
    pub fn size(&self) -> usize {
        match self {
            Self::F32 | Self::I32 => 4,
            Self::F64 => 8,
        }
    }

    /// The packed type that holds an array element type, if any
    pub fn of(element_type: ElementType) -> Option<Self> {
        match element_type {
            ElementType::F32 => Some(Self::F32),
            ElementType::F64 => Some(Self::F64),
            ElementType::I32 => Some(Self::I32),
            _ => None,
        }
    }
}

impl FromStr for Dtype {
    type Err = Error;

    /// Accepts the numpy style names and single character codes
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        match s.to_ascii_lowercase().as_str() {
            "float32" | "f32" | "f" | "float" => Ok(Self::F32),
            "float64" | "f64" | "d" | "double" => Ok(Self::F64),
            "i" => Ok(Self::I32),
            other if other.starts_with("int") => Ok(Self::I32),
            _ => Err(Error::DtypeUnknown(s.to_string())),
        }
    }
}

impl fmt::Display for Dtype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::F32 => write!(f, "float32"),
            Self::F64 => write!(f, "float64"),
            Self::I32 => write!(f, "int32"),
        }
    }
}

/// Byte order of packed binary streams
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endian {
    #[default]
    Native,
    Little,
    Big,
}

impl Endian {
    /// Resolve native order for the current target
    pub fn is_little(&self) -> bool {
        match self {
            Self::Native => cfg!(target_endian = "little"),
            Self::Little => true,
            Self::Big => false,
        }
    }
}

impl FromStr for Endian {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "@" | "=" | "native" => Ok(Self::Native),
            "<" | "little" => Ok(Self::Little),
            ">" | "big" => Ok(Self::Big),
            other => Err(Error::EndianUnknown(other.to_string())),
        }
    }
}

impl fmt::Display for Endian {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => write!(f, "@"),
            Self::Little => write!(f, "<"),
            Self::Big => write!(f, ">"),
        }
    }
}

/// Decode fixed size chunks with the requested byte order
macro_rules! decode {
    ($bytes:expr, $t:ty, $n:literal, $endian:expr) => {
        $bytes
            .chunks_exact($n)
            .map(|chunk| {
                let mut b = [0u8; $n];
                b.copy_from_slice(chunk);
                match $endian {
                    Endian::Native => <$t>::from_ne_bytes(b),
                    Endian::Little => <$t>::from_le_bytes(b),
                    Endian::Big => <$t>::from_be_bytes(b),
                }
            })
            .collect::<Vec<$t>>()
    };
}

fn check_length(bytes: usize, dtype: Dtype) -> Result<()> {
    if bytes % dtype.size() != 0 {
        return Err(Error::LengthMismatch {
            bytes,
            size: dtype.size(),
        });
    }
    Ok(())
}

/// Decode a packed buffer into a flat array
///
/// ```rust
/// # use strata_parse::{unpack, Dtype, Endian};
/// # use strata_grid::ArrayData;
/// let bytes = [0, 0, 0, 1, 0, 0, 0, 2];
/// let data = unpack(&bytes, Dtype::I32, Endian::Big).unwrap();
/// assert_eq!(data, ArrayData::I32(vec![1, 2]));
///
/// // partial values are rejected
/// assert!(unpack(&bytes[..7], Dtype::I32, Endian::Big).is_err());
/// ```
pub fn unpack(bytes: &[u8], dtype: Dtype, endian: Endian) -> Result<ArrayData> {
    check_length(bytes.len(), dtype)?;
    Ok(match dtype {
        Dtype::F32 => ArrayData::F32(decode!(bytes, f32, 4, endian)),
        Dtype::F64 => ArrayData::F64(decode!(bytes, f64, 8, endian)),
        Dtype::I32 => ArrayData::I32(decode!(bytes, i32, 4, endian)),
    })
}

/// Encode an array in the requested byte order
pub fn pack(data: &ArrayData, endian: Endian) -> Vec<u8> {
    data.to_bytes(endian.is_little())
}

/// Read an entire file as one packed array
///
/// The file size is checked against the value size before anything is
/// read.
pub fn read_packed<P: AsRef<Path>>(path: P, dtype: Dtype, endian: Endian) -> Result<ArrayData> {
    let mut file = File::open(path.as_ref())?;
    let bytes = file.metadata()?.len() as usize;
    check_length(bytes, dtype)?;

    let mut buffer = Vec::with_capacity(bytes);
    file.read_to_end(&mut buffer)?;
    debug!("Read {bytes} bytes from {}", path.as_ref().display());
    unpack(&buffer, dtype, endian)
}

/// Position of the first payload byte after the Madagascar sentinel
pub fn find_sentinel(bytes: &[u8]) -> Option<usize> {
    bytes
        .windows(MADAGASCAR_SENTINEL.len())
        .position(|w| w == MADAGASCAR_SENTINEL)
        .map(|i| i + MADAGASCAR_SENTINEL.len())
}

/// Read a Madagascar single-stream file
///
/// The ASCII header is discarded up to and including the sentinel. Without a
/// sentinel the whole file is read as payload and a warning is logged.
pub fn read_madagascar<P: AsRef<Path>>(path: P, dtype: Dtype, endian: Endian) -> Result<ArrayData> {
    let path = path.as_ref();
    let mut bytes = Vec::new();
    File::open(path)?.read_to_end(&mut bytes)?;

    let start = match find_sentinel(&bytes) {
        Some(idx) => idx,
        None => {
            warn!(
                "Madagascar sentinel missing in {}, reading the whole file as data",
                path.display()
            );
            0
        }
    };

    unpack(&bytes[start..], dtype, endian)
}
