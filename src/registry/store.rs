//! Struct registry
//!
//! Single source of truth for every record discovered during a conversion
//! job. Combines the name registry, the level cache and the record store.

use super::level_cache::{LevelCache, LevelNames};
use super::names::NameRegistry;
use crate::error::{Error, Result};
use crate::schema::Record;
use std::collections::HashMap;
use std::iter::FusedIterator;
use tracing::debug;

/// Registry of discovered records
#[derive(Debug, Clone, Default)]
pub struct StructRegistry {
    names: NameRegistry,
    levels: LevelCache,
    records: HashMap<String, Record>,
    max_level: Option<usize>,
}

impl StructRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty registry with a custom name suffix bound
    pub fn with_suffix_bound(suffix_bound: usize) -> Self {
        Self {
            names: NameRegistry::with_suffix_bound(suffix_bound),
            ..Self::default()
        }
    }

    /// Register a record and return the name it was stored under
    ///
    /// With `enforce_unique_name` the record is renamed to a free name when
    /// its own is taken. Otherwise a same-named record is overwritten, so
    /// callers must grow the two records together first.
    pub fn register_struct(&mut self, mut record: Record, enforce_unique_name: bool) -> Result<String> {
        if enforce_unique_name {
            let name = self.names.reserve(&record.name)?;
            if name != record.name {
                debug!(from = %record.name, to = %name, "Renamed record to keep names unique");
                record.name = name;
            }
        } else {
            self.names.reserve_or_ignore(&record.name);
        }

        self.levels.cache(&record.name, record.level)?;
        self.max_level = Some(self.max_level.map_or(record.level, |max| max.max(record.level)));

        // A shallower sighting never demotes a record
        if let Some(level) = self.levels.level_of(&record.name) {
            record.level = level;
        }

        debug!(
            record = %record.name,
            level = record.level,
            fields = record.fields.len(),
            "Registered record"
        );

        let name = record.name.clone();
        self.records.insert(name.clone(), record);
        Ok(name)
    }

    /// Get a record by name
    pub fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.records.contains_key(name)
    }

    /// Number of stored records
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Deepest level any record was registered at
    pub fn max_level(&self) -> Option<usize> {
        self.max_level
    }

    pub fn names(&self) -> &NameRegistry {
        &self.names
    }

    pub fn levels(&self) -> &LevelCache {
        &self.levels
    }

    /// Iterate records deepest level first, then in registration order
    pub fn iter(&self) -> Structs<'_> {
        Structs {
            names: self.levels.iter(),
            records: &self.records,
        }
    }

    /// Collect every record in iteration order
    pub fn to_vec(&self) -> Result<Vec<Record>> {
        self.iter().map(|record| record.cloned()).collect()
    }
}

impl<'a> IntoIterator for &'a StructRegistry {
    type Item = Result<&'a Record>;
    type IntoIter = Structs<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Lazy, non-restartable iterator over registered records
#[derive(Debug)]
pub struct Structs<'a> {
    names: LevelNames<'a>,
    records: &'a HashMap<String, Record>,
}

impl Structs<'_> {
    /// Stop the iteration early
    pub fn close(&mut self) {
        self.names.close();
    }
}

impl<'a> Iterator for Structs<'a> {
    type Item = Result<&'a Record>;

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.names.next()?;
        match self.records.get(entry.name) {
            Some(record) => Some(Ok(record)),
            None => {
                self.close();
                Some(Err(Error::RegistryInconsistent {
                    name: entry.name.to_string(),
                }))
            }
        }
    }
}

impl FusedIterator for Structs<'_> {}
