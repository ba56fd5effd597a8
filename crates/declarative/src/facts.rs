//! Read-only string lookups
//!
//! [`Facts`] exposes identification results (platform name, family, ...).
//! [`Options`] carries construction parameters into state factories. Both
//! answer unknown keys with an empty string.

use std::collections::{BTreeMap, HashMap};

/// A string-keyed attribute lookup
pub trait Facts {
    /// Value of the named attribute, or an empty string when unknown
    fn get(&self, name: &str) -> String;
}

/// Construction parameters for a state factory
pub trait Options: Facts {}

impl<T: Facts + ?Sized> Options for T {}

/// Owned attribute map, the usual way to build [`Options`]
pub type Attributes = BTreeMap<String, String>;

impl Facts for BTreeMap<String, String> {
    fn get(&self, name: &str) -> String {
        BTreeMap::get(self, name).cloned().unwrap_or_default()
    }
}

impl Facts for HashMap<String, String> {
    fn get(&self, name: &str) -> String {
        HashMap::get(self, name).cloned().unwrap_or_default()
    }
}
