use std::fs;

use strata_grid::{build_uniform, Dataset, Extent, FieldAssociation, NumericArray, UniformGrid};
use strata_parse::{pack, Endian};
use strata_pvgp::{read_pvgp_grid, Error, PvgpGridReader, PvgpHeader, PvgpWriter};
use strata_series::Algorithm;

use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn grid() -> UniformGrid {
    let dims = Extent::new(4, 3, 2);
    let mut grid = build_uniform(dims, [10.0, 20.0, -5.0], [2.0, 2.0, 1.0]).unwrap();
    let density = (0..24).map(|i| 2.0 + i as f64 * 0.125).collect::<Vec<f64>>();
    let facies = (0..24).map(|i| i % 3).collect::<Vec<i32>>();
    let velocity = (0..24).map(|i| 1500.0 + i as f32).collect::<Vec<f32>>();
    for array in [
        NumericArray::new("Density", density).unwrap(),
        NumericArray::new("Facies", facies).unwrap(),
        NumericArray::new("Velocity", velocity).unwrap(),
    ] {
        grid.add_array(FieldAssociation::PointData, array).unwrap();
    }
    grid
}

#[rstest]
#[case(Endian::Native)]
#[case(Endian::Little)]
#[case(Endian::Big)]
fn write_then_read(dir: TempDir, #[case] endian: Endian) {
    let path = dir.path().join("model.pvgp");
    let original = grid();

    let mut writer = PvgpWriter::new(&path);
    writer.set_endian(endian);
    writer.request_data(&original, None).unwrap();

    let mut reader = PvgpGridReader::new([&path]);
    let info = reader.request_information().unwrap();
    assert_eq!(info.whole_extent, Some([0, 3, 0, 2, 0, 1]));

    let read = reader.request_data(&(), None).unwrap();
    assert_eq!(read, original);
    assert_eq!(read_pvgp_grid(&path).unwrap(), original);
}

#[rstest]
fn legacy_sibling_files(dir: TempDir) {
    let values = vec![1.0f64, 2.0, 3.0, 4.0, 5.0, 6.0];
    let bytes = pack(&values.clone().into(), Endian::Little);
    fs::write(dir.path().join("old-a.pvgp@"), bytes).unwrap();

    let header = format!(
        r#"{{
    "basename": "old",
    "extent": [3, 2, 1],
    "spacing": [1, 1, 1],
    "origin": [0, 0, 0],
    "order": "C",
    "endian": "<",
    "numArrays": 1,
    "dataArrays": {{ "a": {{ "filemane": "old-a.pvgp@", "dtype": "float64" }} }},
    "originalPath": "{}"
}}"#,
        "/nowhere"
    );
    let path = dir.path().join("old.pvgp");
    fs::write(&path, header).unwrap();

    let grid = PvgpGridReader::new([&path]).read(None).unwrap();
    // C order over (3, 2, 1) has the last axis fastest
    assert_eq!(
        grid.point_data().get("a").unwrap().to_f64(),
        vec![1.0, 3.0, 5.0, 2.0, 4.0, 6.0]
    );
}

#[rstest]
fn payload_must_fill_the_grid(dir: TempDir) {
    let path = dir.path().join("model.pvgp");
    PvgpWriter::new(&path).write(&grid()).unwrap();

    let mut header = PvgpHeader::from_file(&path).unwrap();
    header.extent = [5, 3, 2];
    let mut stream = Vec::new();
    header.to_writer(&mut stream).unwrap();
    fs::write(&path, stream).unwrap();

    let err = PvgpGridReader::new([&path]).read(None).unwrap_err();
    assert!(matches!(err, Error::GridError(_)));
}

#[rstest]
fn vector_arrays_split_into_components(dir: TempDir) {
    let mut original = grid();
    let flow = (0..24)
        .flat_map(|i| [i as f64, -(i as f64), 0.5 * i as f64])
        .collect::<Vec<f64>>();
    original
        .add_array(
            FieldAssociation::PointData,
            NumericArray::with_components("Flow", 3, flow).unwrap(),
        )
        .unwrap();

    let path = dir.path().join("vectors.pvgp");
    PvgpWriter::new(&path).write(&original).unwrap();
    let read = read_pvgp_grid(&path).unwrap();

    assert_eq!(
        read.point_data().names(),
        vec!["Density", "Facies", "Flow_0", "Flow_1", "Flow_2", "Velocity"]
    );
    let y = read.point_data().get("Flow_1").unwrap();
    assert_eq!(y.components(), 1);
    assert_eq!(y.len(), 24);
    assert_eq!(y.value(5, 0), -5.0);
    assert_eq!(read.point_data().get("Flow_2").unwrap().value(4, 0), 2.0);
}

#[rstest]
fn series_follows_the_first_file(dir: TempDir) {
    let first = dir.path().join("t0.pvgp");
    let second = dir.path().join("t1.pvgp");
    PvgpWriter::new(&first).write(&grid()).unwrap();
    let other = build_uniform(Extent::new(2, 2, 2), [0.0; 3], [1.0; 3]).unwrap();
    PvgpWriter::new(&second).write(&other).unwrap();

    let mut reader = PvgpGridReader::new([&first, &second]);
    let err = reader.read_checked(Some(1.0)).unwrap_err();
    assert!(matches!(
        err,
        Error::SeriesError(strata_series::Error::GridDimensionsVary { .. })
    ));
    assert_eq!(reader.read_checked(Some(0.0)).unwrap(), grid());
}
