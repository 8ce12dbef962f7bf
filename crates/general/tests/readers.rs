use std::fs;
use std::path::PathBuf;

use strata_general::{
    CellCenterWriter, DelimitedPointsReader, DelimitedTextReader, Error, PackedBinaryReader,
};
use strata_grid::{ArrayData, Dataset, Extent, FieldAssociation, NumericArray, UniformGrid};
use strata_parse::{pack, Dtype, Endian, MADAGASCAR_SENTINEL};
use strata_series::Algorithm;

use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn write(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[rstest]
fn delimited_series(dir: TempDir) {
    let a = write(&dir, "t0.csv", b"x,y\n1,2\n");
    let b = write(&dir, "t1.csv", b"x,y\n3,4\n5,6\n");
    let c = write(&dir, "t2.csv", b"x,z\n3,4\n");

    let mut reader = DelimitedTextReader::new([&a, &b, &c]);
    reader.set_delimiter(',');
    reader.set_dt(10.0);

    let info = reader.request_information().unwrap();
    assert_eq!(info.time_steps, vec![0.0, 10.0, 20.0]);

    let table = reader.request_data(&(), Some(9.0)).unwrap();
    assert_eq!(table.n_rows(), 2);
    assert_eq!(reader.titles(), ["x", "y"]);

    let table = reader.request_data(&(), None).unwrap();
    assert_eq!(table.column("y").unwrap().to_f64(), vec![2.0]);

    let err = reader.request_data(&(), Some(20.0)).unwrap_err();
    assert!(matches!(
        err,
        Error::SeriesError(strata_series::Error::TitlesVary { .. })
    ));
}

#[rstest]
fn titles_follow_the_first_file(dir: TempDir) {
    let a = write(&dir, "t0.csv", b"x,y\n1,2\n");
    let b = write(&dir, "t1.csv", b"x,z\n3,4\n");

    // the last step is read before the first
    let mut reader = DelimitedTextReader::new([&a, &b]);
    reader.set_delimiter(',');
    let err = reader.read(Some(1.0)).unwrap_err();
    assert!(matches!(
        err,
        Error::SeriesError(strata_series::Error::TitlesVary { .. })
    ));
    assert_eq!(reader.read(Some(0.0)).unwrap().names(), vec!["x", "y"]);
}

#[rstest]
fn xyz_points(dir: TempDir) {
    let path = write(
        &dir,
        "holes.xyz",
        b"! X, Y, Z, Cu pct\n10 20 -5 0.25\n11 21 -6 0.5\n12 22 -7 1.0\n",
    );

    let mut reader = DelimitedPointsReader::xyz([&path]);
    reader.set_copy_z(true);
    let points = reader.read(None).unwrap();

    assert_eq!(points.n_points(), 3);
    assert_eq!(points.bounds(), Some([10.0, 12.0, 20.0, 22.0, -7.0, -5.0]));
    assert_eq!(points.point_data().names(), vec!["Cu pct", "Elevation"]);
    assert_eq!(
        points.point_data().get("Elevation").unwrap().to_f64(),
        vec![-5.0, -6.0, -7.0]
    );
}

#[rstest]
#[case(Dtype::F32, Endian::Little)]
#[case(Dtype::F64, Endian::Big)]
fn madagascar_matches_packed(dir: TempDir, #[case] dtype: Dtype, #[case] endian: Endian) {
    let data = match dtype {
        Dtype::F64 => ArrayData::F64(vec![1.0, -2.5, 3.25]),
        _ => ArrayData::F32(vec![1.0, -2.5, 3.25]),
    };
    let payload = pack(&data, endian);

    let mut rsf = b"n1=3\nesize=4\n".to_vec();
    rsf.extend_from_slice(&MADAGASCAR_SENTINEL);
    rsf.extend_from_slice(&payload);

    let packed = write(&dir, "model.bin", &payload);
    let with_header = write(&dir, "model.rsf", &rsf);
    let headerless = write(&dir, "model.raw", &payload);

    let mut reader = PackedBinaryReader::new([&packed]);
    reader.set_dtype(dtype);
    reader.set_endian(endian);
    let expected = reader.read(None).unwrap();
    assert_eq!(expected.names(), vec!["model"]);

    let mut madagascar = PackedBinaryReader::madagascar([&with_header, &headerless]);
    madagascar.set_dtype(dtype);
    madagascar.set_endian(endian);

    for time in [0.0, 1.0] {
        let table = madagascar.read(Some(time)).unwrap();
        assert_eq!(table.column("model").unwrap().data(), &data);
    }
}

#[rstest]
fn packed_length_checked(dir: TempDir) {
    let path = write(&dir, "odd.bin", &[0u8; 6]);
    let reader = PackedBinaryReader::new([&path]);
    assert!(matches!(
        reader.read(None),
        Err(Error::ParseError(strata_parse::Error::LengthMismatch { bytes: 6, size: 4 }))
    ));
}

#[rstest]
fn cell_centres_to_file(dir: TempDir) {
    let mut grid = UniformGrid::new(Extent::new(2, 2, 3), [10.0, 0.0, 0.0], [2.0; 3]).unwrap();
    grid.add_array(
        FieldAssociation::CellData,
        NumericArray::new("density", vec![2.6, 2.7]).unwrap(),
    )
    .unwrap();

    let path = dir.path().join("centres.csv");
    let mut writer = CellCenterWriter::new(&path);
    writer.request_data(&grid.into(), None).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines = text.lines().collect::<Vec<&str>>();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "X,Y,Z,density");
    assert_eq!(
        lines[2],
        "1.100000000e+01,1.000000000e+00,3.000000000e+00,2.700000000e+00"
    );
}
