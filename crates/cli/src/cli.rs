//! Command line arguments

// standard library
use std::path::PathBuf;

// strata modules
use strata_grid::{AxisConvention, Extent, Layout, MemoryOrder, VtkFormat};
use strata_parse::{Dtype, Endian};
use strata_ubc::ObservationKind;

// external crates
use clap::{Args, Parser, Subcommand, ValueEnum};

/// Convert geoscience grid, mesh and point formats to VTK
///
/// Every input format is a subcommand. Several input files form a time
/// series, and --time picks the step nearest the requested time.
///
/// Examples
/// --------
///
///  Convert an SGeMS grid
///     $ strata sgems model.sgems -o model.vtk
///
///  Place a UBC model on its mesh
///     $ strata ubc mesh.msh density.den -o density.vtk
///
///  Unpack a binary cube as XML image data
///     $ strata binary cube.bin --extent 50 60 70 -o cube.vti --format xml
#[derive(Parser, Debug)]
#[command(
    name = "strata",
    version,
    about,
    verbatim_doc_comment,
    arg_required_else_help(true)
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub output: OutputArgs,

    /// Verbose logging (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Supress all log output (overrules --verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Delimited text tables, optionally unpacked onto a grid
    Delimited(DelimitedArgs),

    /// GSLIB tables, optionally unpacked onto a grid
    Gslib(GslibArgs),

    /// SGeMS uniform grids
    Sgems(SgemsArgs),

    /// Packed binary or Madagascar arrays unpacked onto a grid
    Binary(BinaryArgs),

    /// UBC tensor or OcTree mesh with any number of models
    Ubc(UbcArgs),

    /// UBC topography and observation files
    Observations(ObservationArgs),

    /// ws3dinv mesh and model files
    Ws3d(Ws3dArgs),

    /// PVGP uniform grid files
    Pvgp(FileArgs),
}

/// Options shared by every conversion
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Path of the VTK file to write
    #[arg(short, long, global = true, value_name = "path", default_value = "strata.vtk")]
    pub output: PathBuf,

    /// VTK file format
    #[arg(long, global = true, value_enum, default_value_t = Format::Legacy)]
    pub format: Format,

    /// Time step between the input files
    #[arg(long, global = true, value_name = "dt", default_value_t = 1.0)]
    pub dt: f64,

    /// Time to read, the nearest step is used
    #[arg(long, global = true, value_name = "t")]
    pub time: Option<f64>,

    /// Turn point outputs into voxels of the inferred cell size
    #[arg(long, global = true)]
    pub voxelize: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Legacy ASCII
    Legacy,
    /// Legacy binary
    Binary,
    /// XML, the extension picks the dataset type
    Xml,
}

impl From<Format> for VtkFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Legacy => VtkFormat::LegacyAscii,
            Format::Binary => VtkFormat::LegacyBinary,
            Format::Xml => VtkFormat::Xml,
        }
    }
}

#[derive(Args, Debug)]
pub struct FileArgs {
    /// Input files, one per time step
    #[arg(required = true, value_name = "files")]
    pub files: Vec<PathBuf>,
}

/// Placement of table columns on a uniform grid
#[derive(Args, Debug)]
pub struct GridArgs {
    /// Grid dimensions in packed axis order
    #[arg(long, num_args = 3, value_names = ["n1", "n2", "n3"])]
    pub extent: Option<Vec<usize>>,

    /// Node spacing in packed axis order
    #[arg(long, num_args = 3, value_names = ["d1", "d2", "d3"], default_values_t = [1.0, 1.0, 1.0])]
    pub spacing: Vec<f64>,

    /// Origin of the grid
    #[arg(long, num_args = 3, value_names = ["x", "y", "z"], default_values_t = [0.0, 0.0, 0.0], allow_negative_numbers = true)]
    pub origin: Vec<f64>,

    /// Memory order of the packed values
    #[arg(long, value_enum, default_value_t = Order::F)]
    pub order: Order,

    /// Values are packed with z as the fastest axis
    #[arg(long)]
    pub seplib: bool,

    /// Swap the x and y axes
    #[arg(long)]
    pub swap_xy: bool,
}

impl GridArgs {
    pub fn extent(&self) -> Option<Extent> {
        match self.extent.as_deref() {
            Some([n1, n2, n3]) => Some(Extent::new(*n1, *n2, *n3)),
            _ => None,
        }
    }

    pub fn spacing(&self) -> [f64; 3] {
        triple(&self.spacing, 1.0)
    }

    pub fn origin(&self) -> [f64; 3] {
        triple(&self.origin, 0.0)
    }

    pub fn layout(&self) -> Layout {
        let convention = match self.seplib {
            true => AxisConvention::SEPlib,
            false => AxisConvention::Cartesian,
        };
        Layout::new(self.order.into(), convention, self.swap_xy)
    }
}

/// Three values from a fixed length argument
pub fn triple(values: &[f64], fill: f64) -> [f64; 3] {
    [0, 1, 2].map(|i| values.get(i).copied().unwrap_or(fill))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Order {
    /// First axis fastest
    F,
    /// Last axis fastest
    C,
}

impl From<Order> for MemoryOrder {
    fn from(order: Order) -> Self {
        match order {
            Order::F => MemoryOrder::F,
            Order::C => MemoryOrder::C,
        }
    }
}

#[derive(Args, Debug)]
pub struct DelimitedArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Column delimiter, a space matches any run of whitespace
    #[arg(short, long, default_value_t = ' ')]
    pub delimiter: char,

    /// Split columns on tabs
    #[arg(long)]
    pub tab: bool,

    /// Lines to skip before the titles
    #[arg(long, default_value_t = 0)]
    pub skiprows: usize,

    /// Comment marker [default: ! or # with --xyz]
    #[arg(long, value_name = "marker")]
    pub comments: Option<String>,

    /// The first line holds data rather than titles
    #[arg(long)]
    pub no_titles: bool,

    /// Titles come from a leading `! a, b, c` line
    #[arg(long)]
    pub xyz: bool,

    /// Copy Z into an Elevation array of point outputs
    #[arg(long)]
    pub elevation: bool,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args, Debug)]
pub struct GslibArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Comment marker
    #[arg(long, default_value = "#")]
    pub comments: String,

    /// Copy Z into an Elevation array of point outputs
    #[arg(long)]
    pub elevation: bool,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Args, Debug)]
pub struct SgemsArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Origin of the grid
    #[arg(long, num_args = 3, value_names = ["x", "y", "z"], default_values_t = [0.0, 0.0, 0.0], allow_negative_numbers = true)]
    pub origin: Vec<f64>,

    /// Node spacing
    #[arg(long, num_args = 3, value_names = ["dx", "dy", "dz"], default_values_t = [1.0, 1.0, 1.0])]
    pub spacing: Vec<f64>,

    /// Replace this value with NaN [default: -9966699]
    #[arg(long, value_name = "value", allow_negative_numbers = true)]
    pub mask: Option<f64>,

    /// Keep every value as it is
    #[arg(long, conflicts_with = "mask")]
    pub no_mask: bool,
}

#[derive(Args, Debug)]
pub struct BinaryArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Element type of the packed values
    #[arg(long, value_enum, default_value_t = BinaryType::F32)]
    pub dtype: BinaryType,

    /// Byte order of the packed values
    #[arg(long, value_enum, default_value_t = ByteOrder::Native)]
    pub endian: ByteOrder,

    /// Array name, defaults to the file stem
    #[arg(long, value_name = "name")]
    pub name: Option<String>,

    /// Skip the ASCII header of Madagascar files
    #[arg(long)]
    pub madagascar: bool,

    #[command(flatten)]
    pub grid: GridArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BinaryType {
    F32,
    F64,
    I32,
}

impl From<BinaryType> for Dtype {
    fn from(dtype: BinaryType) -> Self {
        match dtype {
            BinaryType::F32 => Dtype::F32,
            BinaryType::F64 => Dtype::F64,
            BinaryType::I32 => Dtype::I32,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ByteOrder {
    Native,
    Little,
    Big,
}

impl From<ByteOrder> for Endian {
    fn from(endian: ByteOrder) -> Self {
        match endian {
            ByteOrder::Native => Endian::Native,
            ByteOrder::Little => Endian::Little,
            ByteOrder::Big => Endian::Big,
        }
    }
}

#[derive(Args, Debug)]
pub struct UbcArgs {
    /// Tensor or OcTree mesh file
    #[arg(value_name = "mesh")]
    pub mesh: PathBuf,

    /// Model files, one per time step
    #[arg(value_name = "models")]
    pub models: Vec<PathBuf>,

    /// Array name for a single model
    #[arg(long, value_name = "name")]
    pub name: Option<String>,

    /// Attach every model at once rather than one per time step
    #[arg(long)]
    pub all: bool,

    /// Hide the OcTree progress bar
    #[arg(long)]
    pub no_progress: bool,
}

#[derive(Args, Debug)]
pub struct ObservationArgs {
    /// Kind of observations in the files
    #[arg(long, value_enum)]
    pub kind: Observations,

    #[command(flatten)]
    pub files: FileArgs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Observations {
    Topo,
    Gravity,
    Gradient,
    Magnetic,
}

impl From<Observations> for ObservationKind {
    fn from(kind: Observations) -> Self {
        match kind {
            Observations::Topo => ObservationKind::Topo,
            Observations::Gravity => ObservationKind::Gravity,
            Observations::Gradient => ObservationKind::GravityGradient,
            Observations::Magnetic => ObservationKind::Magnetic,
        }
    }
}

#[derive(Args, Debug)]
pub struct Ws3dArgs {
    #[command(flatten)]
    pub files: FileArgs,

    /// Position of the top centre of the mesh
    #[arg(long, num_args = 3, value_names = ["x", "y", "z"], default_values_t = [0.0, 0.0, 0.0], allow_negative_numbers = true)]
    pub origin: Vec<f64>,

    /// Clockwise rotation about z in degrees
    #[arg(long, value_name = "deg", default_value_t = 0.0, allow_negative_numbers = true)]
    pub angle: f64,
}
