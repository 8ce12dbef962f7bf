//! Conversion of each input format to an output object

// crate modules
use crate::cli::{
    triple, BinaryArgs, Command, DelimitedArgs, GridArgs, GslibArgs, ObservationArgs,
    OutputArgs, SgemsArgs, UbcArgs, Ws3dArgs,
};
use crate::error::{Error, Result};

// standard library
use std::fs;

// strata modules
use strata_filters::{TableToGrid, VoxelizePoints};
use strata_general::{
    table_to_points, DelimitedPointsReader, DelimitedTextReader, PackedBinaryReader,
};
use strata_grid::{object_to_vtk, write_vtk, DataObject, Table};
use strata_gslib::{GslibReader, SgemsGridReader, SGEMS_MASK};
use strata_pvgp::PvgpGridReader;
use strata_ubc::{detect_mesh_kind, MeshKind, ObservationReader, OcTreeReader, TensorMeshReader};
use strata_ws3d::WsMeshReader;

// external crates
use log::{debug, info};

/// Read the input, apply any filters and write the VTK file
pub fn convert(command: Command, output: &OutputArgs) -> Result<()> {
    let mut object = read(command, output)?;
    info!("Read {object}");

    if output.voxelize {
        object = match object {
            DataObject::Points(points) => VoxelizePoints::new().voxelize(&points)?.into(),
            other => return Err(Error::NotPoints(other.kind())),
        };
        info!("Voxelized to {object}");
    }

    let vtk = object_to_vtk(&object)?;
    write_vtk(vtk, &output.output, output.format.into())?;
    info!("Written to {}", output.output.display());
    Ok(())
}

fn read(command: Command, output: &OutputArgs) -> Result<DataObject> {
    let (dt, time) = (output.dt, output.time);
    match command {
        Command::Delimited(args) => read_delimited(args, dt, time),
        Command::Gslib(args) => read_gslib(args, dt, time),
        Command::Sgems(args) => read_sgems(args, dt, time),
        Command::Binary(args) => read_binary(args, dt, time),
        Command::Ubc(args) => read_ubc(args, dt, time),
        Command::Observations(args) => read_observations(args, dt, time),
        Command::Ws3d(args) => read_ws3d(args, dt, time),
        Command::Pvgp(args) => {
            let mut reader = PvgpGridReader::new(args.files);
            reader.set_dt(dt);
            Ok(reader.read_checked(time)?.into())
        }
    }
}

/// Tables go onto a grid when an extent is given, otherwise they are points
fn table_output(table: Table, grid: &GridArgs, elevation: bool) -> Result<DataObject> {
    match grid.extent() {
        Some(extent) => {
            let mut filter = TableToGrid::new(extent);
            filter.set_spacing(grid.spacing());
            filter.set_origin(grid.origin());
            filter.set_order(grid.order.into());
            let layout = grid.layout();
            filter.set_convention(layout.convention);
            filter.set_swap_xy(layout.swap_xy);
            Ok(filter.convert(&table)?.into())
        }
        None => {
            debug!("No extent given, reading the first three columns as points");
            Ok(table_to_points(table, elevation)?.into())
        }
    }
}

fn delimited_reader(args: &DelimitedArgs) -> DelimitedTextReader {
    let mut reader = match args.xyz {
        true => DelimitedTextReader::xyz(&args.files.files),
        false => DelimitedTextReader::new(&args.files.files),
    };
    reader.set_delimiter(args.delimiter);
    reader.set_use_tab(args.tab);
    reader.set_skip_rows(args.skiprows);
    if let Some(comments) = &args.comments {
        reader.set_comments(comments.as_str());
    }
    reader.set_has_titles(!args.no_titles);
    reader
}

fn read_delimited(args: DelimitedArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    let mut reader = delimited_reader(&args);
    reader.set_dt(dt);

    if args.grid.extent().is_none() {
        let mut points = DelimitedPointsReader::default();
        *points.reader_mut() = reader;
        points.set_copy_z(args.elevation);
        return Ok(points.read(time)?.into());
    }

    let table = reader.read(time)?;
    table_output(table, &args.grid, args.elevation)
}

fn read_gslib(args: GslibArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    let mut reader = GslibReader::new(&args.files.files);
    reader.set_comments(args.comments.as_str());
    reader.series_mut().set_dt(dt);
    let table = reader.read(time)?;
    table_output(table, &args.grid, args.elevation)
}

fn read_sgems(args: SgemsArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    let mut reader = SgemsGridReader::new(&args.files.files);
    reader.set_origin(triple(&args.origin, 0.0));
    reader.set_spacing(triple(&args.spacing, 1.0));
    reader.set_mask(match args.no_mask {
        true => None,
        false => Some(args.mask.unwrap_or(SGEMS_MASK)),
    });
    reader.set_dt(dt);
    Ok(reader.read(time)?.into())
}

fn read_binary(args: BinaryArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    if args.grid.extent().is_none() {
        return Err(Error::MissingExtent);
    }

    let mut reader = match args.madagascar {
        true => PackedBinaryReader::madagascar(&args.files.files),
        false => PackedBinaryReader::new(&args.files.files),
    };
    reader.set_dtype(args.dtype.into());
    reader.set_endian(args.endian.into());
    if let Some(name) = &args.name {
        reader.set_data_name(name.as_str());
    }
    reader.set_dt(dt);

    let table = reader.read(time)?;
    table_output(table, &args.grid, false)
}

fn read_ubc(args: UbcArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    let kind = detect_mesh_kind(&fs::read_to_string(&args.mesh)?)?;
    debug!("Detected a {kind:?} mesh");

    if kind == MeshKind::OcTree {
        let mut reader = OcTreeReader::new(&args.mesh);
        args.models.iter().for_each(|m| reader.add_model(m));
        if let Some(name) = &args.name {
            reader.set_data_name(name.as_str());
        }
        if args.no_progress {
            reader.disable_progress();
        }
        reader.set_dt(dt);
        return Ok(reader.read(time)?.into());
    }

    let mut reader = TensorMeshReader::new(&args.mesh);
    args.models.iter().for_each(|m| reader.add_model(m));
    if let Some(name) = &args.name {
        reader.set_data_name(name.as_str());
    }
    reader.set_dt(dt);

    let grid = match args.all {
        true => reader.read_all()?,
        false => reader.read(time)?,
    };
    Ok(grid.into())
}

fn read_observations(args: ObservationArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    let mut reader = ObservationReader::new(args.kind.into(), &args.files.files);
    reader.set_dt(dt);
    Ok(reader.read(time)?.into())
}

fn read_ws3d(args: Ws3dArgs, dt: f64, time: Option<f64>) -> Result<DataObject> {
    let mut reader = WsMeshReader::new(&args.files.files);
    reader.set_origin(triple(&args.origin, 0.0));
    reader.set_angle(args.angle);
    reader.set_dt(dt);
    Ok(reader.read(time)?.into())
}
