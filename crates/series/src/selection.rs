/// A keyed set of on/off switches for arrays or blocks
///
/// Names keep the order they were added in. Names that were never added are
/// treated as enabled, so an empty selection lets everything through.
///
/// ```rust
/// # use strata_series::DataArraySelection;
/// let mut selection = DataArraySelection::new();
/// selection.add_array("Topography");
/// selection.add_array("Density");
/// selection.disable("Density");
///
/// assert!(selection.is_enabled("Topography"));
/// assert!(!selection.is_enabled("Density"));
/// assert!(selection.is_enabled("never added"));
/// assert_eq!(selection.enabled_names(), vec!["Topography"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataArraySelection {
    entries: Vec<(String, bool)>,
}

impl DataArraySelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a name, enabled by default, keeping any existing state
    pub fn add_array<S: Into<String>>(&mut self, name: S) {
        let name = name.into();
        if !self.contains(&name) {
            self.entries.push((name, true));
        }
    }

    /// Set a switch, registering the name if needed
    pub fn set<S: Into<String>>(&mut self, name: S, enabled: bool) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = enabled,
            None => self.entries.push((name, enabled)),
        }
    }

    pub fn enable(&mut self, name: &str) {
        self.set(name, true);
    }

    pub fn disable(&mut self, name: &str) {
        self.set(name, false);
    }

    pub fn enable_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.1 = true);
    }

    pub fn disable_all(&mut self) {
        self.entries.iter_mut().for_each(|e| e.1 = false);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn is_enabled(&self, name: &str) -> bool {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map_or(true, |(_, enabled)| *enabled)
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn enabled_names(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|(_, e)| *e)
            .map(|(n, _)| n.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Forget every switch
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
