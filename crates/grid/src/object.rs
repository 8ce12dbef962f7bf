//! Closed set of everything a reader or filter may output

// crate modules
use crate::{
    Dataset, PointSet, RectilinearGrid, StructuredGrid, Table, UniformGrid, VoxelGrid,
};

// standard library
use std::fmt;

/// Any output object
#[derive(Debug, Clone, PartialEq)]
pub enum DataObject {
    Uniform(UniformGrid),
    Rectilinear(RectilinearGrid),
    Structured(StructuredGrid),
    Voxel(VoxelGrid),
    Points(PointSet),
    Table(Table),
    MultiBlock(MultiBlock),
}

impl DataObject {
    /// Borrow as a [Dataset], `None` for tables and multi-blocks
    pub fn as_dataset(&self) -> Option<&dyn Dataset> {
        match self {
            Self::Uniform(d) => Some(d),
            Self::Rectilinear(d) => Some(d),
            Self::Structured(d) => Some(d),
            Self::Voxel(d) => Some(d),
            Self::Points(d) => Some(d),
            Self::Table(_) | Self::MultiBlock(_) => None,
        }
    }

    pub fn as_dataset_mut(&mut self) -> Option<&mut dyn Dataset> {
        match self {
            Self::Uniform(d) => Some(d),
            Self::Rectilinear(d) => Some(d),
            Self::Structured(d) => Some(d),
            Self::Voxel(d) => Some(d),
            Self::Points(d) => Some(d),
            Self::Table(_) | Self::MultiBlock(_) => None,
        }
    }

    /// Short name of the object type
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Uniform(_) => "uniform grid",
            Self::Rectilinear(_) => "rectilinear grid",
            Self::Structured(_) => "structured grid",
            Self::Voxel(_) => "voxel grid",
            Self::Points(_) => "point set",
            Self::Table(_) => "table",
            Self::MultiBlock(_) => "multi-block",
        }
    }
}

impl fmt::Display for DataObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table(t) => write!(f, "table ({} rows, {} columns)", t.n_rows(), t.n_columns()),
            Self::MultiBlock(m) => write!(f, "multi-block ({} blocks)", m.len()),
            other => match other.as_dataset() {
                Some(d) => write!(
                    f,
                    "{} ({} points, {} cells)",
                    other.kind(),
                    d.n_points(),
                    d.n_cells()
                ),
                None => write!(f, "{}", other.kind()),
            },
        }
    }
}

macro_rules! impl_from_dataset {
    ($($t:ty => $variant:ident),*) => {
        $(
            impl From<$t> for DataObject {
                fn from(value: $t) -> Self {
                    DataObject::$variant(value)
                }
            }
        )*
    };
}

impl_from_dataset!(
    UniformGrid => Uniform,
    RectilinearGrid => Rectilinear,
    StructuredGrid => Structured,
    VoxelGrid => Voxel,
    PointSet => Points,
    Table => Table,
    MultiBlock => MultiBlock
);

/// Named blocks of output objects, in insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MultiBlock {
    blocks: Vec<(String, DataObject)>,
}

impl MultiBlock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block, replacing any block of the same name
    pub fn insert<S: Into<String>, D: Into<DataObject>>(&mut self, name: S, block: D) {
        let name = name.into();
        let block = block.into();
        match self.blocks.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = block,
            None => self.blocks.push((name, block)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&DataObject> {
        self.blocks.iter().find(|(n, _)| n == name).map(|(_, b)| b)
    }

    pub fn names(&self) -> Vec<&str> {
        self.blocks.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataObject)> {
        self.blocks.iter().map(|(n, b)| (n.as_str(), b))
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Keep only the blocks whose names are enabled
    pub fn select<F: Fn(&str) -> bool>(self, enabled: F) -> Self {
        Self {
            blocks: self
                .blocks
                .into_iter()
                .filter(|(n, _)| enabled(n))
                .collect(),
        }
    }
}

#[cfg(test)]
mod object_tests {
    use super::*;
    use crate::Extent;

    #[test]
    fn select_blocks() {
        let mut blocks = MultiBlock::new();
        blocks.insert("topo", PointSet::new(vec![[0.0; 3]]));
        blocks.insert("table", Table::new());
        blocks.insert("topo", PointSet::new(vec![[1.0; 3]; 2]));

        assert_eq!(blocks.names(), vec!["topo", "table"]);
        let selected = blocks.select(|n| n == "topo");
        assert_eq!(selected.len(), 1);
        assert!(selected.get("topo").unwrap().as_dataset().is_some());
    }

    #[test]
    fn display() {
        let grid = UniformGrid::new(Extent::new(2, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
        let object = DataObject::from(grid);
        assert_eq!(object.to_string(), "uniform grid (8 points, 1 cells)");
    }
}
