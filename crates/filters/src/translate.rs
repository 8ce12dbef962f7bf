// crate modules
use crate::error::{Error, Result};

// standard library
use std::fmt;

// strata modules
use strata_grid::UniformGrid;
use strata_series::{Algorithm, Information};

// external crates
use log::debug;

/// Grid corners an origin can be moved to
///
/// Discriminants are the stable corner codes. Bit 0 moves the origin along
/// x, bit 1 along y and bit 2 along z.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Corner {
    #[default]
    SouthEastBottom = 1,
    NorthWestBottom = 2,
    NorthEastBottom = 3,
    SouthWestTop = 4,
    SouthEastTop = 5,
    NorthWestTop = 6,
    NorthEastTop = 7,
}

impl Corner {
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Whether the origin moves along each axis
    pub fn moves(self) -> [bool; 3] {
        let code = self.code();
        [code & 1 != 0, code & 2 != 0, code & 4 != 0]
    }
}

impl TryFrom<u8> for Corner {
    type Error = Error;

    fn try_from(code: u8) -> Result<Self> {
        match code {
            1 => Ok(Self::SouthEastBottom),
            2 => Ok(Self::NorthWestBottom),
            3 => Ok(Self::NorthEastBottom),
            4 => Ok(Self::SouthWestTop),
            5 => Ok(Self::SouthEastTop),
            6 => Ok(Self::NorthWestTop),
            7 => Ok(Self::NorthEastTop),
            _ => Err(Error::UnknownCorner(code)),
        }
    }
}

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::SouthEastBottom => "South East Bottom",
            Self::NorthWestBottom => "North West Bottom",
            Self::NorthEastBottom => "North East Bottom",
            Self::SouthWestTop => "South West Top",
            Self::SouthEastTop => "South East Top",
            Self::NorthWestTop => "North West Top",
            Self::NorthEastTop => "North East Top",
        };
        write!(f, "{name}")
    }
}

/// Moves the origin of a uniform grid to another corner
///
/// The input origin is assumed to be the south west bottom corner. The grid
/// is shifted so that its chosen corner sits where that origin was, each
/// moving axis travelling `(n - 1) * spacing`.
///
/// ```rust
/// # use strata_filters::{Corner, TranslateGridOrigin};
/// # use strata_grid::{build_uniform, Extent};
/// let grid = build_uniform(Extent::new(20, 2, 10), [100.0; 3], [1.0; 3]).unwrap();
/// let filter = TranslateGridOrigin::new(Corner::NorthEastTop);
///
/// let moved = filter.translate(&grid);
/// assert_eq!(moved.origin(), [81.0, 99.0, 91.0]);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TranslateGridOrigin {
    corner: Corner,
}

impl TranslateGridOrigin {
    pub fn new(corner: Corner) -> Self {
        Self { corner }
    }

    pub fn corner(&self) -> Corner {
        self.corner
    }

    pub fn set_corner(&mut self, corner: Corner) {
        self.corner = corner;
    }

    /// Set the corner from its integer code
    pub fn set_corner_code(&mut self, code: u8) -> Result<()> {
        self.corner = Corner::try_from(code)?;
        Ok(())
    }

    /// Offset added to the origin for a grid
    pub fn offset(&self, grid: &UniformGrid) -> [f64; 3] {
        let dims = grid.dims();
        let spacing = grid.spacing();
        let moves = self.corner.moves();
        [0, 1, 2].map(|a| match moves[a] && dims[a] > 0 {
            true => -((dims[a] - 1) as f64) * spacing[a],
            false => 0.0,
        })
    }

    /// A copy of the grid with its origin moved, arrays untouched
    pub fn translate(&self, grid: &UniformGrid) -> UniformGrid {
        let offset = self.offset(grid);
        let origin = grid.origin();
        let mut output = grid.clone();
        output.set_origin([0, 1, 2].map(|a| origin[a] + offset[a]));
        debug!("Moved origin to the {} corner by {offset:?}", self.corner);
        output
    }
}

impl Algorithm for TranslateGridOrigin {
    type Input = UniformGrid;
    type Output = UniformGrid;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("uniform grid"))
    }

    fn request_data(&mut self, grid: &UniformGrid, _: Option<f64>) -> Result<UniformGrid> {
        Ok(self.translate(grid))
    }
}
