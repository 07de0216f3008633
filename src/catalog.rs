use crate::model::{Poi, Waypoint};
use log::warn;
use std::collections::BTreeMap;

/// A record that can live in a [`Catalog`], keyed by its name.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for Waypoint {
    fn key(&self) -> &str {
        &self.name
    }
}

impl Keyed for Poi {
    fn key(&self) -> &str {
        &self.name
    }
}

/// A keyed collection of records, ordered by name.
///
/// Inserting a record whose name already exists overwrites the old record.
/// That is a warning, not an error: the displaced record is returned and the
/// collision is logged.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog<R> {
    entries: BTreeMap<String, R>,
}

pub type WaypointCatalog = Catalog<Waypoint>;
pub type PoiCatalog = Catalog<Poi>;

impl<R> Default for Catalog<R> {
    fn default() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }
}

impl<R: Keyed> Catalog<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the record it displaced if the name was
    /// already taken.
    pub fn insert(&mut self, record: R) -> Option<R> {
        let key = record.key().to_string();
        let displaced = self.entries.insert(key.clone(), record);
        if displaced.is_some() {
            warn!("'{key}' already exists in the catalog and will be overwritten");
        }
        displaced
    }

    pub fn get(&self, name: &str) -> Option<&R> {
        self.entries.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Iterates over `(name, record)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &R)> {
        self.entries.iter().map(|(name, record)| (name.as_str(), record))
    }
}
