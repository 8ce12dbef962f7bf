//! The hand-off record between format parsers and grid builders

// crate modules
use crate::error::Result;
use crate::{AxisConvention, Extent, MemoryOrder, NumericArray, Table};

// standard library
use std::fmt;

// external crates
use strata_format::f;

/// The kind of object a parsed file describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParsedKind {
    UniformGrid,
    Rectilinear,
    #[default]
    Table,
    Voxel,
}

/// Everything a parser pulled out of a file, before any grid exists
///
/// A short lived value. Builders consume it and move the columns into the
/// grid they construct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedFile {
    pub kind: ParsedKind,
    /// Sample counts, when the file declares them
    pub extent: Option<Extent>,
    pub origin: Option<[f64; 3]>,
    pub spacing: Option<[f64; 3]>,
    /// Node coordinates of rectilinear meshes
    pub coords: Option<[Vec<f64>; 3]>,
    /// Free form header lines, kept verbatim
    pub header_lines: Vec<String>,
    pub columns: Vec<NumericArray>,
    pub memory_order: MemoryOrder,
    pub convention: AxisConvention,
}

impl ParsedFile {
    pub fn new(kind: ParsedKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /// Number of rows, taken from the first column
    pub fn n_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.len())
    }

    /// Move the columns into a [Table]
    pub fn into_table(self) -> Result<Table> {
        Table::from_columns(self.columns)
    }
}

impl fmt::Display for ParsedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "kind: {:?}", self.kind)?;
        if let Some(extent) = self.extent {
            writeln!(f, "extent: {extent}")?;
        }
        if let Some(origin) = self.origin {
            writeln!(f, "origin: {origin:?}")?;
        }
        if let Some(spacing) = self.spacing {
            writeln!(f, "spacing: {spacing:?}")?;
        }
        for line in &self.header_lines {
            writeln!(f, "header: {line}")?;
        }
        writeln!(f, "order: {}, convention: {}", self.memory_order, self.convention)?;
        let names = self
            .columns
            .iter()
            .map(|c| f!("{} [{}]", c.name(), c.element_type()))
            .collect::<Vec<String>>()
            .join(", ");
        write!(f, "{}", textwrap::fill(&f!("columns: {names}"), 80))
    }
}
