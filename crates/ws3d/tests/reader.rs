use std::fs;

use strata_grid::{Dataset, Extent};
use strata_series::Algorithm;
use strata_ws3d::{WsMeshReader, MODEL_NAME};

use rstest::{fixture, rstest};
use tempfile::TempDir;

#[fixture]
fn dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

fn ws_file(value: f64) -> String {
    let mut text = String::from("# 4 by 3 by 2\n4 3 2 0\n100 100\n100 100\n50 50 50\n10 20\n");
    for _ in 0..24 {
        text.push_str(&format!("{value}\n"));
    }
    text
}

#[rstest]
#[case(0.0, [150.0, 250.0, -200.0])]
#[case(0.0, [0.0, 0.0, 0.0])]
fn corner_at_origin(dir: TempDir, #[case] angle: f64, #[case] origin: [f64; 3]) {
    let path = dir.path().join("mesh.ws");
    fs::write(&path, ws_file(1.0)).unwrap();

    let mut reader = WsMeshReader::new([&path]);
    reader.set_origin(origin);
    reader.set_angle(angle);
    let grid = reader.request_data(&(), None).unwrap();

    assert_eq!(grid.dims(), Extent::new(4, 5, 3));
    let [x0, x1, y0, y1, z0, z1] = grid.bounds().unwrap();
    assert_eq!([x0, x1], [origin[0] - 75.0, origin[0] + 75.0]);
    assert_eq!([y0, y1], [origin[1] - 200.0, origin[1] + 200.0]);
    assert_eq!([z0, z1], [origin[2] - 30.0, origin[2]]);
}

#[rstest]
fn series_of_models(dir: TempDir) {
    let mut reader = WsMeshReader::default();
    for (i, value) in [1.0, 2.0].iter().enumerate() {
        let path = dir.path().join(format!("iter{i}.ws"));
        fs::write(&path, ws_file(*value)).unwrap();
        reader.add_file(path);
    }

    let info = reader.request_information().unwrap();
    assert_eq!(info.time_steps, vec![0.0, 1.0]);

    let grid = reader.read(Some(1.0)).unwrap();
    let model = grid.cell_data().get(MODEL_NAME).unwrap();
    assert_eq!(model.len(), 24);
    assert_eq!(model.value(0, 0), 2.0);
}
