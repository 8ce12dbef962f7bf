// crate modules
use crate::error::Result;

// strata modules
use strata_grid::{table_to_grid, AxisConvention, Extent, Layout, MemoryOrder, Table, UniformGrid};
use strata_series::{Algorithm, Information};

/// Unpacks every column of a table onto a uniform grid
///
/// The table must hold exactly one row per grid point. The extent, spacing
/// and origin are given in the packed axis order and permuted along with the
/// data, so with SEPlib packing `extent[0]` is the z count.
///
/// ```rust
/// # use strata_filters::TableToGrid;
/// # use strata_grid::*;
/// let table = Table::from_columns([NumericArray::new("a", vec![0.0; 6]).unwrap()]).unwrap();
///
/// let mut filter = TableToGrid::new(Extent::new(3, 2, 1));
/// filter.set_spacing([2.0, 1.0, 1.0]);
///
/// let grid = filter.convert(&table).unwrap();
/// assert_eq!(grid.dims(), Extent::new(3, 2, 1));
/// assert_eq!(grid.spacing(), [2.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TableToGrid {
    extent: Extent,
    spacing: [f64; 3],
    origin: [f64; 3],
    layout: Layout,
}

impl Default for TableToGrid {
    fn default() -> Self {
        Self::new(Extent::new(10, 10, 10))
    }
}

impl TableToGrid {
    pub fn new(extent: Extent) -> Self {
        Self {
            extent,
            spacing: [1.0; 3],
            origin: [0.0; 3],
            layout: Layout::new(MemoryOrder::C, AxisConvention::Cartesian, false),
        }
    }

    pub fn set_extent(&mut self, extent: Extent) {
        self.extent = extent;
    }

    pub fn set_spacing(&mut self, spacing: [f64; 3]) {
        self.spacing = spacing;
    }

    pub fn set_origin(&mut self, origin: [f64; 3]) {
        self.origin = origin;
    }

    pub fn set_order(&mut self, order: MemoryOrder) {
        self.layout.order = order;
    }

    pub fn set_convention(&mut self, convention: AxisConvention) {
        self.layout.convention = convention;
    }

    pub fn set_swap_xy(&mut self, swap_xy: bool) {
        self.layout.swap_xy = swap_xy;
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn convert(&self, table: &Table) -> Result<UniformGrid> {
        Ok(table_to_grid(
            table,
            self.extent,
            self.spacing,
            self.origin,
            self.layout,
        )?)
    }
}

impl Algorithm for TableToGrid {
    type Input = Table;
    type Output = UniformGrid;
    type Error = crate::Error;

    fn request_information(&mut self) -> Result<Information> {
        let dims = self.layout.output_dims(self.extent)?;
        Ok(Information::new("uniform grid").with_extent(dims))
    }

    fn request_data(&mut self, table: &Table, _: Option<f64>) -> Result<UniformGrid> {
        self.convert(table)
    }
}
