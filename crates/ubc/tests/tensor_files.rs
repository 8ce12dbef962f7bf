use std::fs;
use std::path::{Path, PathBuf};

use strata_grid::{DataObject, Dataset, Extent};
use strata_series::Algorithm;
use strata_ubc::{Error, ModelAppender, OcTreeReader, TensorMeshReader};

use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write(dir: &Path, name: &str, text: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, text).unwrap();
    path
}

fn model_text(n: usize) -> String {
    (0..n).map(|i| format!("{}\n", i as f64 * 0.5)).collect()
}

const MESH_3D: &str = "! 3 by 4 by 5 cells
3 4 5
0.0 0.0 0.0
3*10.0
4*10.0
5*2.0
";

#[rstest]
fn model_must_fill_the_mesh(dir: TempDir) {
    let mesh = write(dir.path(), "mesh.msh", MESH_3D);
    let good = write(dir.path(), "good.mod", &model_text(60));
    let bad = write(dir.path(), "bad.mod", &model_text(59));

    let mut reader = TensorMeshReader::new(&mesh);
    reader.add_model(&good);
    let grid = reader.request_data(&(), None).unwrap();
    assert_eq!(grid.cell_dims(), Extent::new(3, 4, 5));
    assert_eq!(grid.cell_data().get("good.mod").unwrap().len(), 60);

    let mut reader = TensorMeshReader::new(&mesh);
    reader.add_model(&bad);
    let err = reader.read(None).unwrap_err();
    assert!(err.to_string().contains("expected 60 actual 59"), "{err}");
}

#[rstest]
fn models_over_time(dir: TempDir) {
    let mesh = write(dir.path(), "mesh.msh", MESH_3D);
    let mut reader = TensorMeshReader::new(&mesh);
    reader.set_data_name("Density");
    for step in 0..3 {
        let values = (0..60).map(|_| format!("{step}.0\n")).collect::<String>();
        reader.add_model(write(dir.path(), &format!("t{step}.den"), &values));
    }
    reader.set_dt(10.0);

    let info = reader.request_information().unwrap();
    assert_eq!(info.whole_extent, Some([0, 3, 0, 4, 0, 5]));
    assert_eq!(info.time_steps, vec![0.0, 10.0, 20.0]);

    let grid = reader.read(Some(12.0)).unwrap();
    let density = grid.cell_data().get("Density").unwrap();
    assert_eq!(density.value(0, 0), 1.0);

    let all = reader.read_all().unwrap();
    assert_eq!(all.cell_data().names(), vec!["t0.den", "t1.den", "t2.den"]);
    assert_eq!(reader.selection().len(), 3);

    reader.selection_mut().disable("t1.den");
    let some = reader.read_all().unwrap();
    assert_eq!(some.cell_data().names(), vec!["t0.den", "t2.den"]);
}

#[rstest]
fn two_dimensional_mesh(dir: TempDir) {
    let mesh = write(dir.path(), "mesh2d.msh", "2\n0 10 2\n30 1\n1\n0 4 2\n");
    let model = write(dir.path(), "rho.con", "3 2\n1 2 3\n4 5 6\n");

    let mut reader = TensorMeshReader::new(&mesh);
    reader.add_model(&model);
    let grid = reader.read(None).unwrap();

    assert_eq!(grid.cell_dims(), Extent::new(3, 1, 2));
    // bottom row first
    assert_eq!(
        grid.cell_data().get("rho.con").unwrap().to_f64(),
        vec![4.0, 5.0, 6.0, 1.0, 2.0, 3.0]
    );

    let wrong = write(dir.path(), "wrong.con", "2 3\n1 2\n3 4\n5 6\n");
    let mut reader = TensorMeshReader::new(&mesh);
    reader.add_model(&wrong);
    assert!(matches!(reader.read(None), Err(Error::ModelDimensions { .. })));
}

#[rstest]
fn appender_matches_reader(dir: TempDir) {
    let mesh = write(dir.path(), "mesh.msh", MESH_3D);
    let model = write(dir.path(), "m.mod", &model_text(60));

    let mut reader = TensorMeshReader::new(&mesh);
    let bare = DataObject::from(reader.read_mesh().unwrap());

    let mut appender = ModelAppender::new([&model]);
    let appended = appender.request_data(&bare, None).unwrap();

    reader.add_model(&model);
    assert_eq!(appended, DataObject::from(reader.read(None).unwrap()));
}

#[rstest]
fn octree_with_model(dir: TempDir) {
    let mesh = write(
        dir.path(),
        "octree.msh",
        "2 2 2\n0 0 0\n1 1 1\n3\n1 1 1 1\n2 1 1 1\n1 1 2 1\n",
    );
    let model = write(dir.path(), "sus.mod", "0.1\n0.2\n0.3\n");

    let mut reader = OcTreeReader::new(&mesh);
    reader.disable_progress();
    reader.add_model(&model);
    let grid = reader.request_data(&(), None).unwrap();

    assert_eq!(grid.n_cells(), 3);
    assert_eq!(grid.n_points(), 16);
    assert_eq!(
        grid.cell_data().get("sus.mod").unwrap().to_f64(),
        vec![0.1, 0.2, 0.3]
    );

    let mut appender = ModelAppender::new([write(dir.path(), "short.mod", "1\n")]);
    let err = appender
        .request_data(&DataObject::from(reader.read_mesh().unwrap()), None)
        .unwrap_err();
    assert!(err.to_string().contains("expected 3 actual 1"));
}
