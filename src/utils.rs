//! Utility functions and traits for [`QuadMap`]

use crate::{Entry, QuadMap, QuadMapError};

/// Extension trait providing additional utility methods over the table
pub trait QuadMapExtensions {
    /// Returns the keys of the table as a Vec, in slot order
    fn keys(&self) -> Vec<String>;

    /// Returns the values of the table as a Vec, in slot order
    fn values(&self) -> Vec<i32>;

    /// Returns true if the table contains the given key
    fn contains_key(&self, key: &str) -> bool;
}

impl QuadMapExtensions for QuadMap {
    fn keys(&self) -> Vec<String> {
        self.iter().flat_map(|(_, chain)| chain).map(|entry| entry.key().to_owned()).collect()
    }

    fn values(&self) -> Vec<i32> {
        self.iter().flat_map(|(_, chain)| chain).map(Entry::value).collect()
    }

    fn contains_key(&self, key: &str) -> bool {
        self.contains(key)
    }
}

/// Creates a [`QuadMap`] with the default capacity from an iterator of
/// key-value pairs.
///
/// # Errors
///
/// Returns [`QuadMapError::CapacityExhausted`] when an insert runs out of
/// probe attempts before the iterator is drained.
pub fn from_pairs<I>(pairs: I) -> Result<QuadMap, QuadMapError>
where
    I: IntoIterator<Item = (String, i32)>,
{
    let mut map = QuadMap::new();
    for (key, value) in pairs {
        map.insert(key, value)?;
    }
    Ok(map)
}
