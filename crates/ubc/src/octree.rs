//! OcTree meshes as voxel grids

// crate modules
use crate::error::{Error, Result};
use crate::mesh::{counts, next_line, triple, ubc_lines};
use crate::model::model_name;
use crate::tensor::direct_values;

// standard library
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// strata modules
use strata_grid::{Dataset, FieldAssociation, NumericArray, VoxelGrid};
use strata_parse::{parse_floats, parse_integers, read_text};
use strata_series::{Algorithm, Information, TimeSeries};

// external crates
use kdam::{Bar, BarBuilder, BarExt};
use log::{debug, info};

/// Shares corner points between cells on the integer base grid
#[derive(Debug, Default)]
struct CornerIndex {
    ids: HashMap<[usize; 3], usize>,
    nodes: Vec<[usize; 3]>,
}

impl CornerIndex {
    fn id(&mut self, node: [usize; 3]) -> usize {
        *self.ids.entry(node).or_insert_with(|| {
            self.nodes.push(node);
            self.nodes.len() - 1
        })
    }
}

fn init_progress_bar(total: usize, disable: bool) -> Result<Bar> {
    BarBuilder::default()
        .total(total)
        .unit(" cells")
        .unit_scale(true)
        .disable(disable)
        .bar_format("{count}/{total} cells [{rate} cells/s]   ")
        .build()
        .map_err(Error::ProgressBar)
}

/// Read an OcTree mesh into a voxel grid
///
/// The header holds the base cell counts, the top south-west corner and the
/// base cell size. Each cell line is `i j k size` in base cells, 1-based,
/// with `k` counted down from the top. Cells keep the order they are listed
/// in so models attach without reordering.
///
/// ```rust
/// # use strata_ubc::parse_octree_mesh;
/// # use strata_grid::Dataset;
/// let text = "2 2 2\n0 0 10\n5 5 5\n2\n1 1 1 2\n";
/// assert!(parse_octree_mesh(text).is_err());
///
/// let text = "2 2 2\n0 0 10\n5 5 5\n1\n1 1 1 2\n";
/// let mesh = parse_octree_mesh(text).unwrap();
/// assert_eq!(mesh.n_cells(), 1);
/// assert_eq!(mesh.bounds(), Some([0.0, 10.0, 0.0, 10.0, 0.0, 10.0]));
/// ```
pub fn parse_octree_mesh(text: &str) -> Result<VoxelGrid> {
    parse_octree(text, true)
}

fn parse_octree(text: &str, disable_progress: bool) -> Result<VoxelGrid> {
    let mut lines = ubc_lines(text).into_iter();

    let dims = counts(next_line(&mut lines, "base cell counts")?, "base cell counts")?;

    let line = next_line(&mut lines, "origin")?;
    let [x0, y0, z0] = triple(&parse_floats(line.1, line.0)?, "origin", line)?;

    let line = next_line(&mut lines, "base cell size")?;
    let [dx, dy, dz] = triple(&parse_floats(line.1, line.0)?, "base cell size", line)?;

    let line = next_line(&mut lines, "cell count")?;
    let n_cells = line.1.parse::<usize>().map_err(|_| Error::InvalidValue {
        what: "cell count",
        value: line.1.to_string(),
        line: line.0,
    })?;

    let mut corners = CornerIndex::default();
    let mut cells = Vec::with_capacity(n_cells);
    let mut progress_bar = init_progress_bar(n_cells, disable_progress)?;

    if !disable_progress {
        progress_bar.refresh()?;
    }

    for _ in 0..n_cells {
        let line = next_line(&mut lines, "OcTree cell")?;
        progress_bar.update(1)?;

        let values = parse_integers(line.1, line.0)?;
        let invalid = || Error::InvalidValue {
            what: "OcTree cell",
            value: line.1.to_string(),
            line: line.0,
        };

        let [i, j, k, size] = match values.as_slice() {
            [i, j, k, s] if [*i, *j, *k, *s].iter().all(|v| *v >= 1) => {
                [*i, *j, *k, *s].map(|v| v as usize)
            }
            _ => return Err(invalid()),
        };

        let start = [i - 1, j - 1, k - 1];
        if (0..3).any(|a| start[a] + size > dims[a]) {
            return Err(invalid());
        }

        // depth index of the lower face is the larger one
        let xs = [start[0], start[0] + size];
        let ys = [start[1], start[1] + size];
        let zs = [start[2] + size, start[2]];

        let mut cell = [0; 8];
        let mut c = 0;
        for z in zs {
            for y in ys {
                for x in xs {
                    cell[c] = corners.id([x, y, z]);
                    c += 1;
                }
            }
        }
        cells.push(cell);
    }

    if !disable_progress {
        eprintln!()
    };

    if lines.next().is_some() {
        debug!("Ignoring lines after the last OcTree cell");
    }

    let points = corners
        .nodes
        .iter()
        .map(|[x, y, z]| {
            [
                x0 + *x as f64 * dx,
                y0 + *y as f64 * dy,
                z0 - *z as f64 * dz,
            ]
        })
        .collect::<Vec<[f64; 3]>>();

    info!(
        "Read {} OcTree cells sharing {} nodes on a {}x{}x{} base mesh",
        cells.len(),
        points.len(),
        dims[0],
        dims[1],
        dims[2]
    );
    Ok(VoxelGrid::new(points, cells)?)
}

/// Reader for UBC OcTree meshes and their models
///
/// Models form a time series like [TensorMeshReader](crate::TensorMeshReader).
/// Values are read in the same order as the mesh cells.
#[derive(Debug, Clone, Default)]
pub struct OcTreeReader {
    mesh: Option<PathBuf>,
    models: TimeSeries,
    data_name: Option<String>,
    disable_progress: bool,
    cached: Option<VoxelGrid>,
}

impl OcTreeReader {
    pub fn new<P: AsRef<Path>>(mesh: P) -> Self {
        Self {
            mesh: Some(mesh.as_ref().to_path_buf()),
            ..Default::default()
        }
    }

    pub fn set_mesh<P: AsRef<Path>>(&mut self, mesh: P) {
        self.mesh = Some(mesh.as_ref().to_path_buf());
        self.cached = None;
    }

    pub fn add_model<P: AsRef<Path>>(&mut self, path: P) {
        self.models.add_file(path);
    }

    pub fn models(&self) -> &TimeSeries {
        &self.models
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.models.set_dt(dt);
    }

    pub fn set_data_name<S: Into<String>>(&mut self, name: S) {
        self.data_name = Some(name.into());
    }

    /// Hide the progress bar while reading cells
    pub fn disable_progress(&mut self) {
        self.disable_progress = true;
    }

    pub fn read_mesh(&mut self) -> Result<VoxelGrid> {
        if let Some(mesh) = &self.cached {
            return Ok(mesh.clone());
        }

        let path = self.mesh.as_ref().ok_or(Error::MissingMesh)?;
        let mesh = parse_octree(&read_text(path)?, self.disable_progress)?;
        self.cached = Some(mesh.clone());
        Ok(mesh)
    }

    /// The mesh with the model for the requested time attached
    pub fn read(&mut self, time: Option<f64>) -> Result<VoxelGrid> {
        let mut mesh = self.read_mesh()?;
        if self.models.is_empty() {
            return Ok(mesh);
        }

        let path = self.models.file_for(time)?;
        let name = match &self.data_name {
            Some(name) => name.clone(),
            None => model_name(path),
        };

        let model = NumericArray::new(name, direct_values(&read_text(path)?)?)?;
        mesh.add_array(FieldAssociation::CellData, model)?;
        Ok(mesh)
    }
}

impl Algorithm for OcTreeReader {
    type Input = ();
    type Output = VoxelGrid;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("voxel grid").with_series(&self.models))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<VoxelGrid> {
        self.read(time)
    }
}

#[cfg(test)]
mod octree_tests {
    use super::*;

    const MESH: &str = "! two levels
4 4 2
0.0 0.0 0.0
1.0 1.0 1.0
5
1 1 1 2
3 1 1 2
1 3 1 2
3 3 1 1
4 4 2 1
";

    #[test]
    fn shared_corners() {
        let mesh = parse_octree_mesh(MESH).unwrap();
        assert_eq!(mesh.n_cells(), 5);

        // first cell spans two base cells down from the top
        let first = mesh.cells()[0].map(|p| mesh.points()[p]);
        assert_eq!(first[0], [0.0, 0.0, -2.0]);
        assert_eq!(first[7], [2.0, 2.0, 0.0]);

        // neighbours share the face between them
        let second = mesh.cells()[1];
        assert_eq!(mesh.cells()[0][1], second[0]);
        assert_eq!(mesh.cells()[0][7], second[6]);
    }

    #[test]
    fn out_of_bounds() {
        let text = "2 2 2\n0 0 0\n1 1 1\n1\n2 2 2 2\n";
        assert!(matches!(parse_octree_mesh(text), Err(Error::InvalidValue { .. })));
    }

    #[test]
    fn zero_based_rejected() {
        let text = "2 2 2\n0 0 0\n1 1 1\n1\n0 1 1 1\n";
        assert!(matches!(parse_octree_mesh(text), Err(Error::InvalidValue { .. })));
    }
}
