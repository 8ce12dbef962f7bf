// crate modules
use crate::TimeSeries;

// standard library
use std::fmt;

// strata modules
use strata_grid::Extent;

/// What an algorithm advertises before producing any data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Information {
    /// Short name of the output object type
    pub output_type: &'static str,
    /// `[0, nx-1, 0, ny-1, 0, nz-1]` for grid outputs
    pub whole_extent: Option<[i32; 6]>,
    /// Empty unless the output varies in time
    pub time_steps: Vec<f64>,
    pub time_range: Option<[f64; 2]>,
}

impl Information {
    pub fn new(output_type: &'static str) -> Self {
        Self {
            output_type,
            ..Default::default()
        }
    }

    /// Advertise the whole extent of a grid with these point counts
    pub fn with_extent(mut self, dims: Extent) -> Self {
        self.whole_extent = Some(dims.whole_extent());
        self
    }

    /// Advertise the time steps of a file series
    pub fn with_series(mut self, series: &TimeSeries) -> Self {
        self.time_steps = series.time_steps();
        self.time_range = series.time_range();
        self
    }
}

impl fmt::Display for Information {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "output: {}", self.output_type)?;
        if let Some(e) = self.whole_extent {
            write!(f, ", whole extent: {e:?}")?;
        }
        if let Some([t0, t1]) = self.time_range {
            let n = self.time_steps.len();
            write!(f, ", {n} time steps in [{t0}, {t1}]")?;
        }
        Ok(())
    }
}

/// The two requests every reader, writer and filter answers
///
/// `request_information()` is cheap and never produces data. It reports the
/// output type, whole extent and time steps. `request_data()` runs the
/// algorithm on an input for the requested time. Readers take `()` as their
/// input, writers produce `()` as their output.
pub trait Algorithm {
    type Input: ?Sized;
    type Output;
    type Error;

    fn request_information(&mut self) -> Result<Information, Self::Error>;

    fn request_data(
        &mut self,
        input: &Self::Input,
        time: Option<f64>,
    ) -> Result<Self::Output, Self::Error>;
}

#[cfg(test)]
mod algorithm_tests {
    use super::*;

    #[test]
    fn display() {
        let mut series = TimeSeries::new(["a", "b"]);
        series.set_dt(0.5);
        let info = Information::new("uniform grid")
            .with_extent(Extent::new(3, 2, 1))
            .with_series(&series);

        assert_eq!(info.whole_extent, Some([0, 2, 0, 1, 0, 0]));
        assert_eq!(
            info.to_string(),
            "output: uniform grid, whole extent: [0, 2, 0, 1, 0, 0], 2 time steps in [0, 0.5]"
        );
    }
}
