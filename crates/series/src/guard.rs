//! Consistency checks across the files of a series

// crate modules
use crate::error::{Error, Result};

// strata modules
use strata_grid::Extent;

/// Records the first extent seen and rejects any other
///
/// ```rust
/// # use strata_series::ExtentGuard;
/// # use strata_grid::Extent;
/// let mut guard = ExtentGuard::new();
/// assert!(guard.check(Extent::new(150, 200, 20)).is_ok());
/// assert!(guard.check(Extent::new(150, 200, 20)).is_ok());
/// assert!(guard.check(Extent::new(150, 200, 21)).is_err());
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtentGuard {
    first: Option<Extent>,
}

impl ExtentGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, extent: Extent) -> Result<()> {
        match self.first {
            None => {
                self.first = Some(extent);
                Ok(())
            }
            Some(expected) if expected == extent => Ok(()),
            Some(expected) => Err(Error::GridDimensionsVary {
                expected,
                found: extent,
            }),
        }
    }

    /// True once an extent has been recorded
    pub fn is_seeded(&self) -> bool {
        self.first.is_some()
    }

    /// Forget the recorded extent, for when the file list changes
    pub fn reset(&mut self) {
        self.first = None;
    }
}

/// Records the first set of titles seen and rejects any other
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitlesGuard {
    first: Option<Vec<String>>,
}

impl TitlesGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn check(&mut self, titles: &[String]) -> Result<()> {
        match &self.first {
            None => {
                self.first = Some(titles.to_vec());
                Ok(())
            }
            Some(expected) if expected.as_slice() == titles => Ok(()),
            Some(expected) => Err(Error::TitlesVary {
                expected: expected.clone(),
                found: titles.to_vec(),
            }),
        }
    }

    pub fn is_seeded(&self) -> bool {
        self.first.is_some()
    }

    pub fn reset(&mut self) {
        self.first = None;
    }
}

#[cfg(test)]
mod guard_tests {
    use super::*;

    #[test]
    fn titles_must_match() {
        let mut guard = TitlesGuard::new();
        let a = ["x", "y"].map(String::from);
        let b = ["x", "z"].map(String::from);
        assert!(!guard.is_seeded());
        assert!(guard.check(&a).is_ok());
        assert!(guard.is_seeded());
        assert!(matches!(guard.check(&b), Err(Error::TitlesVary { .. })));

        guard.reset();
        assert!(!guard.is_seeded());
        assert!(guard.check(&b).is_ok());
    }
}
