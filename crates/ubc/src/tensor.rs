//! Tensor mesh reader and model appender

// crate modules
use crate::error::{Error, Result};
use crate::mesh::{parse_tensor_mesh, MeshKind};
use crate::model::{model_name, parse_model_2d, parse_model_3d};

// standard library
use std::path::{Path, PathBuf};

// strata modules
use strata_grid::{
    place_model_on_mesh, DataObject, Dataset, FieldAssociation, NumericArray, RectilinearGrid,
};
use strata_parse::{parse_floats, read_text};
use strata_series::{Algorithm, DataArraySelection, Information, TimeSeries};

// external crates
use log::{debug, info};

/// Attach a model file to a tensor mesh of either kind
fn attach_model(mesh: &mut RectilinearGrid, kind: MeshKind, path: &Path, name: &str) -> Result<()> {
    let text = read_text(path)?;
    let cells = mesh.cell_dims();

    let model = match kind {
        MeshKind::Tensor2D => {
            let (model, found) = parse_model_2d(&text, name)?;
            let expected = [cells[0], cells[2]];
            if found != expected {
                return Err(Error::ModelDimensions { expected, found });
            }
            model
        }
        _ => parse_model_3d(&text, cells, name)?,
    };

    debug!("Attaching {} to the mesh as \"{name}\"", path.display());
    place_model_on_mesh(mesh, model, name)?;
    Ok(())
}

/// Kind of a rectilinear mesh, flat in northing for 2D meshes
fn kind_of(mesh: &RectilinearGrid) -> MeshKind {
    match mesh.dims()[1] {
        1 => MeshKind::Tensor2D,
        _ => MeshKind::Tensor3D,
    }
}

/// Reader for UBC 2D and 3D tensor meshes and their models
///
/// The mesh is parsed once and reused until it is changed. Model files form
/// a time series, a read attaches the model for the requested time. Use
/// [read_all()](TensorMeshReader::read_all) to attach every model at once
/// under its file name.
#[derive(Debug, Clone, Default)]
pub struct TensorMeshReader {
    mesh: Option<PathBuf>,
    models: TimeSeries,
    data_name: Option<String>,
    selection: DataArraySelection,
    cached: Option<RectilinearGrid>,
}

impl TensorMeshReader {
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

    pub fn mesh(&self) -> Option<&Path> {
        self.mesh.as_deref()
    }

    pub fn add_model<P: AsRef<Path>>(&mut self, path: P) {
        self.models.add_file(path);
    }

    pub fn clear_models(&mut self) {
        self.models.clear_files();
    }

    pub fn models(&self) -> &TimeSeries {
        &self.models
    }

    pub fn set_dt(&mut self, dt: f64) {
        self.models.set_dt(dt);
    }

    /// Name the model array instead of using the model file name
    pub fn set_data_name<S: Into<String>>(&mut self, name: S) {
        self.data_name = Some(name.into());
    }

    pub fn data_name_for<P: AsRef<Path>>(&self, path: P) -> String {
        match &self.data_name {
            Some(name) => name.clone(),
            None => model_name(path),
        }
    }

    /// Switches for the models attached by [read_all()](Self::read_all)
    ///
    /// Every model name is registered, enabled, the first time it is seen.
    pub fn selection(&self) -> &DataArraySelection {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut DataArraySelection {
        &mut self.selection
    }

    /// The mesh alone, without any model
    pub fn read_mesh(&mut self) -> Result<RectilinearGrid> {
        if let Some(mesh) = &self.cached {
            return Ok(mesh.clone());
        }

        let path = self.mesh.as_ref().ok_or(Error::MissingMesh)?;
        let (kind, mesh) = parse_tensor_mesh(&read_text(path)?)?;
        info!("Read {kind:?} mesh with {} cells", mesh.cell_dims());

        self.cached = Some(mesh.clone());
        Ok(mesh)
    }

    /// The mesh with the model for the requested time attached
    pub fn read(&mut self, time: Option<f64>) -> Result<RectilinearGrid> {
        let mut mesh = self.read_mesh()?;
        if self.models.is_empty() {
            return Ok(mesh);
        }

        let path = self.models.file_for(time)?.to_path_buf();
        let name = self.data_name_for(&path);
        let kind = kind_of(&mesh);
        attach_model(&mut mesh, kind, &path, &name)?;
        Ok(mesh)
    }

    /// The mesh with every enabled model attached under its file name
    pub fn read_all(&mut self) -> Result<RectilinearGrid> {
        let mut mesh = self.read_mesh()?;
        let kind = kind_of(&mesh);
        for path in self.models.files() {
            let name = model_name(path);
            self.selection.add_array(name.as_str());
            if !self.selection.is_enabled(&name) {
                debug!("Skipping disabled model {name}");
                continue;
            }
            attach_model(&mut mesh, kind, path, &name)?;
        }
        Ok(mesh)
    }
}

impl Algorithm for TensorMeshReader {
    type Input = ();
    type Output = RectilinearGrid;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        let mesh = self.read_mesh()?;
        Ok(Information::new("rectilinear grid")
            .with_extent(mesh.dims())
            .with_series(&self.models))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<RectilinearGrid> {
        self.read(time)
    }
}

/// Attaches UBC models to a mesh that was read elsewhere
///
/// Tensor meshes take models in file order, 2D when flat in northing.
/// Voxel meshes from OcTree files take values in the order their cells
/// were listed.
///
/// ```rust
/// # use strata_ubc::ModelAppender;
/// # use strata_grid::{DataObject, PointSet};
/// # use strata_series::Algorithm;
/// let mut appender = ModelAppender::new(["model.den"]);
/// let points = DataObject::from(PointSet::default());
/// assert!(appender.request_data(&points, None).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ModelAppender {
    models: TimeSeries,
    data_name: Option<String>,
}

impl ModelAppender {
    pub fn new<I, P>(models: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            models: TimeSeries::new(models),
            ..Default::default()
        }
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

    /// Copy of the mesh with the model for the requested time attached
    pub fn append(&self, mesh: &DataObject, time: Option<f64>) -> Result<DataObject> {
        let path = self.models.file_for(time)?;
        let name = self
            .data_name
            .clone()
            .unwrap_or_else(|| model_name(path));

        let mut output = mesh.clone();
        match &mut output {
            DataObject::Rectilinear(grid) => {
                let kind = kind_of(grid);
                attach_model(grid, kind, path, &name)?;
            }
            DataObject::Voxel(grid) => {
                let values = direct_values(&read_text(path)?)?;
                let model = NumericArray::new(name.as_str(), values)?;
                grid.add_array(FieldAssociation::CellData, model)?;
            }
            other => return Err(Error::NotAMesh(other.kind())),
        }
        Ok(output)
    }
}

/// Values in the order they appear, one or more per line
pub(crate) fn direct_values(text: &str) -> Result<Vec<f64>> {
    let mut values = Vec::new();
    for (n, line) in crate::mesh::ubc_lines(text) {
        values.extend(parse_floats(line, n)?);
    }
    Ok(values)
}

impl Algorithm for ModelAppender {
    type Input = DataObject;
    type Output = DataObject;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("mesh").with_series(&self.models))
    }

    fn request_data(&mut self, mesh: &DataObject, time: Option<f64>) -> Result<DataObject> {
        self.append(mesh, time)
    }
}
