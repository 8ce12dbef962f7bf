//! The JSON header of a PVGP grid

// crate modules
use crate::error::{Error, Result};

// standard library
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

// strata modules
use strata_format::f;
use strata_grid::{Extent, MemoryOrder};
use strata_parse::{Dtype, Endian};

// external crates
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Keys every header must carry
const REQUIRED: [&str; 9] = [
    "basename",
    "extent",
    "spacing",
    "origin",
    "order",
    "endian",
    "numArrays",
    "originalPath",
    "dataArrays",
];

/// One array listed in a header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayEntry {
    pub dtype: String,
    /// Base64 packed values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    /// Sibling binary file of older files, the key is spelt this way
    #[serde(rename = "filemane", default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl ArrayEntry {
    /// Inline entry for packed bytes
    pub fn inline(dtype: Dtype, bytes: &[u8]) -> Self {
        Self {
            dtype: dtype.to_string(),
            data: Some(BASE64.encode(bytes)),
            file_name: None,
        }
    }

    /// Packed bytes of the array, from the header or the sibling file
    ///
    /// Line breaks inside the base64 text are ignored.
    pub fn bytes(&self, dir: &Path) -> Result<Vec<u8>> {
        match (&self.data, &self.file_name) {
            (Some(data), _) => {
                let compact = data.split_whitespace().collect::<String>();
                Ok(BASE64.decode(compact)?)
            }
            (None, Some(name)) => Ok(std::fs::read(dir.join(name))?),
            (None, None) => Err(Error::MissingKey("data".to_string())),
        }
    }

    pub fn dtype(&self) -> Result<Dtype> {
        Ok(self.dtype.parse::<Dtype>()?)
    }
}

/// Everything a PVGP file holds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PvgpHeader {
    pub basename: String,
    pub extent: [usize; 3],
    pub spacing: [f64; 3],
    pub origin: [f64; 3],
    pub order: String,
    pub endian: String,
    pub num_arrays: usize,
    pub original_path: String,
    pub data_arrays: BTreeMap<String, ArrayEntry>,
}

impl PvgpHeader {
    /// Parse a header, naming the first required key that is missing
    pub fn from_value(value: Value) -> Result<Self> {
        if let Some(key) = REQUIRED.iter().find(|k| value.get(**k).is_none()) {
            return Err(Error::MissingKey(key.to_string()));
        }
        Ok(serde_json::from_value(value)?)
    }

    pub fn parse_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Self::from_value(serde_json::from_reader(reader)?)
    }

    pub fn extent(&self) -> Extent {
        Extent(self.extent)
    }

    pub fn memory_order(&self) -> Result<MemoryOrder> {
        self.order
            .parse::<MemoryOrder>()
            .map_err(|_| Error::UnknownOrder(self.order.clone()))
    }

    pub fn endian(&self) -> Result<Endian> {
        Ok(self.endian.parse::<Endian>()?)
    }

    /// Serialise with four space indentation
    pub fn to_writer<W: Write>(&self, writer: W) -> Result<()> {
        let formatter = PrettyFormatter::with_indent(b"    ");
        let mut serializer = serde_json::Serializer::with_formatter(writer, formatter);
        self.serialize(&mut serializer)?;
        Ok(())
    }

    /// Fall back to the stored directory when an array file is not found
    pub fn original_dir(&self) -> &Path {
        Path::new(&self.original_path)
    }
}

/// Name given to the `i`th unnamed array
pub fn default_array_name(i: usize) -> String {
    f!("Array{i}")
}
