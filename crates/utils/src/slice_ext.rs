use crate::error::{Error, Result};

// external crates
use itertools::Itertools;

/// Extends functionality for slices of float arrays
pub trait SliceExt {
    /// Minimum and maximum of the finite values, ignoring NAN entirely
    ///
    /// Returns `None` when there are no finite values at all.
    ///
    /// ```rust
    /// # use strata_utils::SliceExt;
    /// assert_eq!([3.0, f64::NAN, -1.0].finite_range(), Some((-1.0, 3.0)));
    /// assert_eq!([f64::NAN].finite_range(), None);
    /// ```
    fn finite_range(&self) -> Option<(f64, f64)>;

    /// Sorted values with exact duplicates removed
    ///
    /// Uses exact floating point equality, so callers need to snap values
    /// beforehand if a tolerance is required.
    ///
    /// ```rust
    /// # use strata_utils::SliceExt;
    /// assert_eq!([2.0, 0.0, 2.0, 1.0].sorted_unique(), vec![0.0, 1.0, 2.0]);
    /// ```
    fn sorted_unique(&self) -> Vec<f64>;

    /// Mean of the consecutive differences
    ///
    /// ```rust
    /// # use strata_utils::SliceExt;
    /// assert_eq!([0.0, 1.0, 3.0].mean_step(), Some(1.5));
    /// assert_eq!([0.0].mean_step(), None);
    /// ```
    fn mean_step(&self) -> Option<f64>;

    /// Running total of the values, prefixed with `start`
    ///
    /// The result is always one longer than the slice, which is exactly the
    /// relationship between cell widths and node coordinates.
    ///
    /// ```rust
    /// # use strata_utils::SliceExt;
    /// assert_eq!([1.0, 2.0, 3.0].cumulative_from(10.0), vec![10.0, 11.0, 13.0, 16.0]);
    /// ```
    fn cumulative_from(&self, start: f64) -> Vec<f64>;

    /// True if every value is strictly greater than the one before
    ///
    /// ```rust
    /// # use strata_utils::SliceExt;
    /// assert!([0.0, 1.0, 5.0].is_strictly_increasing());
    /// assert!(![0.0, 1.0, 1.0].is_strictly_increasing());
    /// ```
    fn is_strictly_increasing(&self) -> bool;

    /// True if every value is strictly less than the one before
    fn is_strictly_decreasing(&self) -> bool;

    /// Index of the value closest to `value`
    ///
    /// Ties resolve to the first index, as with `argmin`.
    ///
    /// ```rust
    /// # use strata_utils::SliceExt;
    /// let steps = [0.0, 1.0, 2.0, 3.0];
    /// assert_eq!(steps.find_nearest(2.2), Ok(2));
    /// assert_eq!(steps.find_nearest(-50.0), Ok(0));
    /// assert_eq!(steps.find_nearest(0.5), Ok(0));
    /// assert!(Vec::<f64>::new().find_nearest(1.0).is_err());
    /// ```
    fn find_nearest(&self, value: f64) -> Result<usize>;
}

impl SliceExt for [f64] {
    fn finite_range(&self) -> Option<(f64, f64)> {
        self.iter()
            .copied()
            .filter(|v| v.is_finite())
            .minmax_by(|a, b| a.total_cmp(b))
            .into_option()
    }

    fn sorted_unique(&self) -> Vec<f64> {
        let mut values = self.to_vec();
        values.sort_by(|a, b| a.total_cmp(b));
        values.dedup();
        values
    }

    fn mean_step(&self) -> Option<f64> {
        if self.len() < 2 {
            return None;
        }
        let total: f64 = self.iter().tuple_windows().map(|(a, b)| b - a).sum();
        Some(total / (self.len() - 1) as f64)
    }

    fn cumulative_from(&self, start: f64) -> Vec<f64> {
        let mut result = Vec::with_capacity(self.len() + 1);
        result.push(start);
        let mut total = start;
        for v in self {
            total += v;
            result.push(total);
        }
        result
    }

    fn is_strictly_increasing(&self) -> bool {
        self.iter().tuple_windows().all(|(a, b)| a < b)
    }

    fn is_strictly_decreasing(&self) -> bool {
        self.iter().tuple_windows().all(|(a, b)| a > b)
    }

    fn find_nearest(&self, value: f64) -> Result<usize> {
        if self.is_empty() {
            return Err(Error::EmptySlice);
        }

        let mut best = 0;
        let mut distance = f64::INFINITY;
        for (i, v) in self.iter().enumerate() {
            let d = (v - value).abs();
            if d < distance {
                best = i;
                distance = d;
            }
        }
        Ok(best)
    }
}
