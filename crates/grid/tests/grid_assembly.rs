//! Integration tests for grid assembly and VTK output

use strata_grid::*;

use rstest::{fixture, rstest};

#[fixture]
fn tensor_mesh() -> RectilinearGrid {
    // 3 x 4 x 5 cells
    let axis = |n: usize| (0..=n).map(|i| i as f64).collect::<Vec<f64>>();
    build_rectilinear(axis(3), axis(4), axis(5)).unwrap()
}

#[rstest]
fn model_fits_mesh(mut tensor_mesh: RectilinearGrid) {
    let model = NumericArray::new("model", vec![1.0; 60]).unwrap();
    place_model_on_mesh(&mut tensor_mesh, model, "Resistivity").unwrap();
    assert_eq!(tensor_mesh.cell_data().get("Resistivity").unwrap().len(), 60);
}

#[rstest]
fn model_too_short(mut tensor_mesh: RectilinearGrid) {
    let model = NumericArray::new("model", vec![1.0; 59]).unwrap();
    let err = place_model_on_mesh(&mut tensor_mesh, model, "model").unwrap_err();
    assert!(matches!(err, Error::CellCountMismatch { .. }));
    assert!(err.to_string().contains("expected 60 actual 59"));
}

#[rstest]
#[case(MemoryOrder::F, AxisConvention::Cartesian, false)]
#[case(MemoryOrder::C, AxisConvention::Cartesian, false)]
#[case(MemoryOrder::F, AxisConvention::SEPlib, false)]
#[case(MemoryOrder::C, AxisConvention::SEPlib, true)]
#[case(MemoryOrder::F, AxisConvention::Cartesian, true)]
#[case(MemoryOrder::F, AxisConvention::UbcDepthDown, false)]
fn table_to_grid_keeps_values(
    #[case] order: MemoryOrder,
    #[case] convention: AxisConvention,
    #[case] swap_xy: bool,
) {
    let values = (0..60).map(|v| v as f64).collect::<Vec<f64>>();
    let table = Table::from_columns([NumericArray::new("v", values.clone()).unwrap()]).unwrap();
    let layout = Layout::new(order, convention, swap_xy);

    let grid = table_to_grid(&table, Extent::new(3, 4, 5), [1.0, 2.0, 3.0], [0.0; 3], layout)
        .unwrap();

    assert_eq!(grid.n_points(), 60);
    let mut out = grid.point_data().get("v").unwrap().to_f64();
    out.sort_by(|a, b| a.total_cmp(b));
    assert_eq!(out, values);
    assert_eq!(grid.spacing().iter().product::<f64>(), 6.0);
}

#[test]
fn write_every_dataset() {
    let dir = tempfile::tempdir().unwrap();

    let mut grid = build_uniform(Extent::new(3, 3, 2), [0.0; 3], [1.0; 3]).unwrap();
    grid.add_array(
        FieldAssociation::CellData,
        NumericArray::new("cells", vec![1i32, 2, 3, 4]).unwrap(),
    )
    .unwrap();

    let mut points = PointSet::new(vec![[0.0; 3], [1.0, 2.0, 3.0]]);
    points
        .add_array(
            FieldAssociation::PointData,
            NumericArray::with_components("vec", 3, vec![0.0f32; 6]).unwrap(),
        )
        .unwrap();

    let objects: Vec<DataObject> = vec![grid.into(), points.into()];
    for (i, object) in objects.iter().enumerate() {
        let path = dir.path().join(format!("object_{i}.vtk"));
        let vtk = object_to_vtk(object).unwrap();
        write_vtk(vtk, &path, VtkFormat::LegacyAscii).unwrap();
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }
}
