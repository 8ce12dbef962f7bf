//! Named collections of arrays attached to data objects

// crate modules
use crate::NumericArray;

/// An ordered name to array dictionary
///
/// Insertion order is kept since writers output arrays in the order they were
/// attached. Inserting an array with an existing name replaces it in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataArrays {
    arrays: Vec<NumericArray>,
}

impl DataArrays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach an array, returning any array previously stored under the name
    pub fn insert(&mut self, array: NumericArray) -> Option<NumericArray> {
        match self.arrays.iter().position(|a| a.name() == array.name()) {
            Some(idx) => Some(std::mem::replace(&mut self.arrays[idx], array)),
            None => {
                self.arrays.push(array);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&NumericArray> {
        self.arrays.iter().find(|a| a.name() == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<NumericArray> {
        let idx = self.arrays.iter().position(|a| a.name() == name)?;
        Some(self.arrays.remove(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.arrays.iter().map(|a| a.name()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, NumericArray> {
        self.arrays.iter()
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }

    /// Keep only the arrays for which `keep` returns true
    pub fn retain<F: FnMut(&NumericArray) -> bool>(&mut self, keep: F) {
        self.arrays.retain(keep);
    }

    /// Take every array out, leaving the collection empty
    pub fn take_all(&mut self) -> Vec<NumericArray> {
        std::mem::take(&mut self.arrays)
    }
}

impl IntoIterator for DataArrays {
    type Item = NumericArray;
    type IntoIter = std::vec::IntoIter<NumericArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.arrays.into_iter()
    }
}

impl<'a> IntoIterator for &'a DataArrays {
    type Item = &'a NumericArray;
    type IntoIter = std::slice::Iter<'a, NumericArray>;

    fn into_iter(self) -> Self::IntoIter {
        self.arrays.iter()
    }
}

impl FromIterator<NumericArray> for DataArrays {
    fn from_iter<T: IntoIterator<Item = NumericArray>>(iter: T) -> Self {
        let mut arrays = DataArrays::new();
        for array in iter {
            arrays.insert(array);
        }
        arrays
    }
}

/// The point, cell and field array dictionaries of a dataset
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attributes {
    pub point: DataArrays,
    pub cell: DataArrays,
    pub field: DataArrays,
}

#[cfg(test)]
mod attributes_tests {
    use super::*;

    #[test]
    fn insert_replaces_by_name() {
        let mut arrays = DataArrays::new();
        arrays.insert(NumericArray::new("a", vec![1.0]).unwrap());
        arrays.insert(NumericArray::new("b", vec![2.0]).unwrap());
        let old = arrays.insert(NumericArray::new("a", vec![3.0]).unwrap());

        assert_eq!(old.unwrap().value(0, 0), 1.0);
        assert_eq!(arrays.names(), vec!["a", "b"]);
        assert_eq!(arrays.get("a").unwrap().value(0, 0), 3.0);
    }

    #[test]
    fn remove_and_retain() {
        let mut arrays = ["x", "y", "z"]
            .iter()
            .map(|n| NumericArray::new(*n, vec![0i32]).unwrap())
            .collect::<DataArrays>();

        assert!(arrays.remove("y").is_some());
        assert!(arrays.remove("y").is_none());
        arrays.retain(|a| a.name() != "z");
        assert_eq!(arrays.names(), vec!["x"]);
    }
}
