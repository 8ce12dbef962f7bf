// crate modules
use crate::error::{Error, Result};

// standard library
use std::path::{Path, PathBuf};

// strata modules
use strata_utils::SliceExt;

// external crates
use log::debug;

/// An ordered list of files, one per time step
///
/// File `i` sits at time `i * dt`. The series never opens any file itself,
/// readers ask for the path of the step nearest a requested time and parse
/// only that one.
///
/// ```rust
/// # use strata_series::TimeSeries;
/// let mut series = TimeSeries::new(["a.dat", "b.dat", "c.dat"]);
/// series.set_dt(2.0);
///
/// assert_eq!(series.time_steps(), vec![0.0, 2.0, 4.0]);
/// assert_eq!(series.time_range(), Some([0.0, 4.0]));
/// assert_eq!(series.index_for(Some(3.1)), 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    files: Vec<PathBuf>,
    dt: f64,
}

impl Default for TimeSeries {
    fn default() -> Self {
        Self {
            files: Vec::new(),
            dt: 1.0,
        }
    }
}

impl TimeSeries {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        Self {
            files: files.into_iter().map(|p| p.as_ref().to_path_buf()).collect(),
            ..Default::default()
        }
    }

    /// Set the time step between files
    pub fn set_dt(&mut self, dt: f64) {
        self.dt = dt;
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Append a file as the next time step
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) {
        self.files.push(path.as_ref().to_path_buf());
    }

    pub fn clear_files(&mut self) {
        self.files.clear();
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// True when there are enough files to advertise time steps
    pub fn is_temporal(&self) -> bool {
        self.files.len() > 1
    }

    /// Advertised time values, empty for fewer than two files
    pub fn time_steps(&self) -> Vec<f64> {
        if !self.is_temporal() {
            return Vec::new();
        }
        (0..self.files.len()).map(|i| i as f64 * self.dt).collect()
    }

    /// First and last advertised time values
    pub fn time_range(&self) -> Option<[f64; 2]> {
        let steps = self.time_steps();
        Some([*steps.first()?, *steps.last()?])
    }

    /// Index of the time step nearest the requested time
    ///
    /// Always 0 with fewer than two files or when no time is requested.
    pub fn index_for(&self, time: Option<f64>) -> usize {
        let Some(time) = time else {
            return 0;
        };
        let index = self.time_steps().find_nearest(time).unwrap_or(0);
        debug!("Requested time {time} maps to step {index}");
        index
    }

    /// Path of the file for a requested time
    pub fn file_for(&self, time: Option<f64>) -> Result<&Path> {
        self.files
            .get(self.index_for(time))
            .map(|p| p.as_path())
            .ok_or(Error::NoFiles)
    }

    /// Path of the file at a step index
    pub fn file(&self, index: usize) -> Option<&Path> {
        self.files.get(index).map(|p| p.as_path())
    }
}

#[cfg(test)]
mod series_tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn single_file() {
        let series = TimeSeries::new(["only.txt"]);
        assert!(series.time_steps().is_empty());
        assert_eq!(series.time_range(), None);
        assert_eq!(series.index_for(Some(100.0)), 0);
        assert_eq!(series.file_for(Some(3.0)).unwrap(), Path::new("only.txt"));
    }

    #[test]
    fn empty_series() {
        let series = TimeSeries::default();
        assert!(matches!(series.file_for(None), Err(Error::NoFiles)));
    }

    #[rstest]
    #[case(0.5)]
    #[case(1.0)]
    #[case(0.1)]
    fn exact_times_hit_their_index(#[case] dt: f64) {
        let mut series = TimeSeries::new((0..7).map(|i| format!("f{i}")));
        series.set_dt(dt);
        for i in 0..7 {
            assert_eq!(series.index_for(Some(i as f64 * dt)), i);
        }
    }

    #[test]
    fn out_of_range_clamps() {
        let series = TimeSeries::new(["a", "b", "c"]);
        assert_eq!(series.index_for(Some(-10.0)), 0);
        assert_eq!(series.index_for(Some(10.0)), 2);
        assert_eq!(series.index_for(None), 0);
    }
}
