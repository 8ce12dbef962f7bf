use std::fs;

use strata_grid::{
    Dataset, ElementType, Extent, FieldAssociation, NumericArray, Table, UniformGrid,
};
use strata_gslib::{
    Error, GslibPointSetReader, GslibReader, GslibWriter, SgemsGridReader, SgemsWriter,
};
use strata_series::Algorithm;

use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Deterministic values without pulling in a random number crate
fn values(n: usize, seed: f64) -> Vec<f64> {
    (0..n)
        .map(|i| ((i as f64 + seed) * 12.9898).sin() * 43758.5453 % 1000.0)
        .collect()
}

#[rstest]
fn gslib_round_trip(dir: TempDir) {
    let table = Table::from_columns([
        NumericArray::new("A", values(100, 1.0)).unwrap(),
        NumericArray::new("B", values(100, 2.0)).unwrap(),
        NumericArray::new("C", values(100, 3.0)).unwrap(),
    ])
    .unwrap();

    let path = dir.path().join("demo.gslib");
    let mut writer = GslibWriter::new(&path);
    writer.set_header("demo");
    writer.request_data(&table, None).unwrap();

    let mut reader = GslibReader::new([&path]);
    let read = reader.request_data(&(), None).unwrap();

    assert_eq!(reader.header(), Some("demo"));
    assert_eq!(read.names(), vec!["A", "B", "C"]);
    assert_eq!(read.n_rows(), 100);
    for name in ["A", "B", "C"] {
        let expected = table.column(name).unwrap().to_f64();
        let found = read.column(name).unwrap().to_f64();
        for (e, f) in expected.iter().zip(&found) {
            assert!((e - f).abs() <= 1e-6 * e.abs().max(1.0), "{e} != {f}");
        }
    }
}

#[rstest]
fn gslib_round_trip_keeps_types(dir: TempDir) {
    let table = Table::from_columns([
        NumericArray::new("facies", vec![0i64, 3, 1, -2]).unwrap(),
        NumericArray::new("grade", vec![0.0, 1.5, 0.25, 2.0]).unwrap(),
    ])
    .unwrap();

    let path = dir.path().join("typed.gslib");
    GslibWriter::new(&path).write(&table).unwrap();
    let read = GslibReader::new([&path]).read(None).unwrap();

    let facies = read.column("facies").unwrap();
    let grade = read.column("grade").unwrap();
    assert_eq!(facies.element_type(), ElementType::I64);
    assert_eq!(grade.element_type(), ElementType::F64);
    assert_eq!(facies.to_f64(), vec![0.0, 3.0, 1.0, -2.0]);
    assert_eq!(grade.to_f64(), vec![0.0, 1.5, 0.25, 2.0]);
}

#[rstest]
fn integer_column_with_later_floats(dir: TempDir) {
    let path = dir.path().join("mixed.gslib");
    fs::write(&path, "samples\n2\nfacies\ngrade\n0 1\n0.25 nan\n2 3\n").unwrap();

    let read = GslibReader::new([&path]).read(None).unwrap();
    let facies = read.column("facies").unwrap();
    let grade = read.column("grade").unwrap();
    assert_eq!(facies.element_type(), ElementType::F64);
    assert_eq!(facies.to_f64(), vec![0.0, 0.25, 2.0]);
    assert_eq!(grade.element_type(), ElementType::F64);
    assert!(grade.value(1, 0).is_nan());
}

#[rstest]
fn failed_write_leaves_destination(dir: TempDir) {
    let table = Table::from_columns([NumericArray::new("A", vec![1.0, 2.0]).unwrap()]).unwrap();

    // a directory cannot be replaced by the finished file
    let target = dir.path().join("taken");
    fs::create_dir(&target).unwrap();
    fs::write(target.join("keep.txt"), "kept").unwrap();

    assert!(GslibWriter::new(&target).write(&table).is_err());
    assert_eq!(fs::read_to_string(target.join("keep.txt")).unwrap(), "kept");
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);

    // a good write replaces an existing file in full
    let path = dir.path().join("table.gslib");
    fs::write(&path, "x".repeat(4096)).unwrap();
    GslibWriter::new(&path).write(&table).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Data saved by PVGeo\n1\nA\n1.000000000e+00\n2.000000000e+00\n"
    );
}

#[rstest]
fn sgems_grid(dir: TempDir) {
    let (n1, n2, n3) = (150, 200, 20);
    let n = n1 * n2 * n3;

    let mut text = format!("{n1} {n2} {n3}\n3\nporosity\npermeability\nfacies\n");
    for i in 0..n {
        text.push_str(&format!("{:.2} {} {}\n", (i % 97) as f64 * 0.01, i % 1013, i % 5));
    }
    let path = dir.path().join("grid.sgems");
    fs::write(&path, text).unwrap();

    let mut reader = SgemsGridReader::new([&path]);
    let info = reader.request_information().unwrap();
    assert_eq!(info.whole_extent, Some([0, 149, 0, 199, 0, 19]));

    let grid = reader.request_data(&(), None).unwrap();
    assert_eq!(grid.dims(), Extent::new(150, 200, 20));
    assert_eq!(grid.spacing(), [1.0; 3]);
    assert_eq!(grid.origin(), [0.0; 3]);
    assert_eq!(grid.n_cells(), 149 * 199 * 19);
    assert_eq!(grid.n_cells(), 563129);
    assert_eq!(grid.point_data().len(), 3);
    assert_eq!(grid.point_data().get("facies").unwrap().len(), n);
}

#[rstest]
fn sgems_series_dimensions_fixed(dir: TempDir) {
    let a = dir.path().join("a.sgems");
    let b = dir.path().join("b.sgems");
    fs::write(&a, "2 1 1\n1\nv\n1\n2\n").unwrap();
    fs::write(&b, "1 2 1\n1\nv\n1\n2\n").unwrap();

    let mut reader = SgemsGridReader::new([&a, &b]);
    assert!(reader.read(Some(0.0)).is_ok());
    assert!(matches!(
        reader.read(Some(1.0)),
        Err(Error::SeriesError(strata_series::Error::GridDimensionsVary { .. }))
    ));
}

#[rstest]
fn sgems_series_follows_the_first_file(dir: TempDir) {
    let a = dir.path().join("a.sgems");
    let b = dir.path().join("b.sgems");
    fs::write(&a, "2 1 1\n1\nv\n1\n2\n").unwrap();
    fs::write(&b, "1 2 1\n1\nv\n1\n2\n").unwrap();

    // the later step is rejected even when it is read first
    let mut reader = SgemsGridReader::new([&a, &b]);
    assert!(matches!(
        reader.read(Some(1.0)),
        Err(Error::SeriesError(strata_series::Error::GridDimensionsVary { .. }))
    ));
    assert_eq!(reader.read(Some(0.0)).unwrap().dims(), Extent::new(2, 1, 1));
}

#[rstest]
fn sgems_write_then_read(dir: TempDir) {
    let mut grid = UniformGrid::new(Extent::new(3, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
    grid.add_array(
        FieldAssociation::PointData,
        NumericArray::new("v", values(12, 4.0)).unwrap(),
    )
    .unwrap();

    let path = dir.path().join("out.sgems");
    SgemsWriter::new(&path).write(&grid).unwrap();

    let mut reader = SgemsGridReader::new([&path]);
    let read = reader.read(None).unwrap();
    assert_eq!(read.dims(), grid.dims());

    let expected = grid.point_data().get("v").unwrap().to_f64();
    let found = read.point_data().get("v").unwrap().to_f64();
    for (e, f) in expected.iter().zip(&found) {
        assert!((e - f).abs() <= 1e-6 * e.abs().max(1.0));
    }
}

#[rstest]
fn point_set(dir: TempDir) {
    let path = dir.path().join("pts.gslib");
    fs::write(&path, "holes\n4\nX\nY\nZ\nAu\n0 0 0 1.5\n1 0 -2 2.5\n").unwrap();

    let mut reader = GslibPointSetReader::new([&path]);
    reader.set_copy_z(true);
    let points = reader.read(None).unwrap();

    assert_eq!(points.n_points(), 2);
    assert_eq!(points.point_data().names(), vec!["Au", "Elevation"]);
}
