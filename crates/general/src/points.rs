//! Point clouds from delimited text

// crate modules
use crate::delimited::DelimitedTextReader;
use crate::error::{Error, Result};

// standard library
use std::path::Path;

// strata modules
use strata_grid::{Dataset, FieldAssociation, NumericArray, PointSet, Table};
use strata_series::{Algorithm, Information};

/// Reader for delimited text whose first three columns are X, Y and Z
///
/// Every remaining column becomes a point array. With `copy_z` set the Z
/// coordinate is also attached as an `Elevation` array.
#[derive(Debug, Clone, Default)]
pub struct DelimitedPointsReader {
    reader: DelimitedTextReader,
    copy_z: bool,
}

impl DelimitedPointsReader {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            reader: DelimitedTextReader::new(files),
            copy_z: false,
        }
    }

    /// Points reader for XYZ files, see [DelimitedTextReader::xyz()]
    pub fn xyz<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            reader: DelimitedTextReader::xyz(files),
            copy_z: false,
        }
    }

    /// The underlying table reader, for delimiter and comment settings
    pub fn reader(&self) -> &DelimitedTextReader {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut DelimitedTextReader {
        &mut self.reader
    }

    pub fn set_copy_z(&mut self, copy_z: bool) {
        self.copy_z = copy_z;
    }

    pub fn copy_z(&self) -> bool {
        self.copy_z
    }

    /// Read the file nearest the requested time
    pub fn read(&mut self, time: Option<f64>) -> Result<PointSet> {
        let table = self.reader.read(time)?;
        table_to_points(table, self.copy_z)
    }
}

impl Algorithm for DelimitedPointsReader {
    type Input = ();
    type Output = PointSet;
    type Error = Error;

    fn request_information(&mut self) -> Result<Information> {
        Ok(Information::new("points").with_series(self.reader.series()))
    }

    fn request_data(&mut self, _: &(), time: Option<f64>) -> Result<PointSet> {
        self.read(time)
    }
}

/// Turn a table into points, using the first three columns as coordinates
///
/// ```rust
/// # use strata_general::table_to_points;
/// # use strata_grid::{Dataset, NumericArray, Table};
/// let table = Table::from_columns([
///     NumericArray::new("x", vec![0.0, 1.0]).unwrap(),
///     NumericArray::new("y", vec![0.0, 2.0]).unwrap(),
///     NumericArray::new("z", vec![5.0, 6.0]).unwrap(),
///     NumericArray::new("grade", vec![0.1, 0.2]).unwrap(),
/// ])
/// .unwrap();
///
/// let points = table_to_points(table, true).unwrap();
/// assert_eq!(points.points()[1], [1.0, 2.0, 6.0]);
/// assert_eq!(points.point_data().names(), vec!["grade", "Elevation"]);
/// ```
pub fn table_to_points(table: Table, copy_z: bool) -> Result<PointSet> {
    if table.n_columns() < 3 {
        return Err(Error::MissingCoordinates(table.n_columns()));
    }

    let mut columns = table.into_columns().into_iter();
    let mut axes = Vec::with_capacity(3);
    for column in columns.by_ref().take(3) {
        axes.push(column.to_f64());
    }

    let points = (0..axes[0].len())
        .map(|i| [axes[0][i], axes[1][i], axes[2][i]])
        .collect::<Vec<[f64; 3]>>();

    let mut output = PointSet::new(points);
    for column in columns {
        output.add_array(FieldAssociation::PointData, column)?;
    }

    if copy_z {
        let z = axes.swap_remove(2);
        output.add_array(FieldAssociation::PointData, NumericArray::new("Elevation", z)?)?;
    }

    Ok(output)
}

#[cfg(test)]
mod points_tests {
    use super::*;

    #[test]
    fn too_few_columns() {
        let table = Table::from_columns([
            NumericArray::new("x", vec![0.0]).unwrap(),
            NumericArray::new("y", vec![0.0]).unwrap(),
        ])
        .unwrap();
        let err = table_to_points(table, false).unwrap_err();
        assert_eq!(err.to_string(), "points need X, Y and Z columns, found 2 columns");
    }

    #[test]
    fn integer_coordinates() {
        let reader = DelimitedTextReader::default();
        let table = reader.parse_str("x y z id\n1 2 3 7\n4 5 6 8\n").unwrap();
        let points = table_to_points(table, false).unwrap();

        assert_eq!(points.n_points(), 2);
        assert_eq!(points.points()[0], [1.0, 2.0, 3.0]);
        assert_eq!(points.point_data().get("id").unwrap().to_f64(), vec![7.0, 8.0]);
        assert!(!points.point_data().contains("Elevation"));
    }
}
