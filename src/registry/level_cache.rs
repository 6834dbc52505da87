//! Level-ordered name cache
//!
//! Keeps every registered name at exactly one nesting level, and iterates
//! deepest level first so nested records come before the records that use
//! them.

use crate::error::{Error, Result};
use std::collections::{btree_map, BTreeMap, HashMap};
use std::iter::{FusedIterator, Rev};
use tracing::debug;

const CACHE_NAME: &str = "levelCache";

/// Position of a name inside the cache
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub level: usize,
    /// Insertion index within the level
    pub index: usize,
}

/// Bidirectional index between names and nesting levels
#[derive(Debug, Clone, Default)]
pub struct LevelCache {
    name_to_level: HashMap<String, usize>,
    level_to_names: BTreeMap<usize, Vec<String>>,
}

impl LevelCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new name at `level`, or promote an existing one to it
    pub fn cache(&mut self, name: &str, level: usize) -> Result<()> {
        match self.name_to_level.get(name).copied() {
            Some(src) => self.jump(name, src, level),
            None => {
                self.level_to_names
                    .entry(level)
                    .or_default()
                    .push(name.to_string());
                self.name_to_level.insert(name.to_string(), level);
                Ok(())
            }
        }
    }

    /// Move a name from level `src` to level `dest`
    ///
    /// Levels only move up: a jump to a shallower level is ignored.
    pub fn jump(&mut self, name: &str, src: usize, dest: usize) -> Result<()> {
        let current = self
            .name_to_level
            .get(name)
            .copied()
            .ok_or_else(|| Error::cache_lookup(CACHE_NAME, name, "name is not cached"))?;

        if current != src {
            return Err(Error::cache_lookup(
                CACHE_NAME,
                name,
                format!("not present in level {src}"),
            ));
        }

        if dest <= src {
            if dest < src {
                debug!(name, src, dest, "Ignoring jump to a shallower level");
            }
            return Ok(());
        }

        self.remove_from_level(name, src);
        self.level_to_names
            .entry(dest)
            .or_default()
            .push(name.to_string());
        self.name_to_level.insert(name.to_string(), dest);
        debug!(name, src, dest, "Promoted name");
        Ok(())
    }

    /// Remove a name; unknown names are ignored
    pub fn decache(&mut self, name: &str) {
        if let Some(level) = self.name_to_level.remove(name) {
            self.remove_from_level(name, level);
        }
    }

    fn remove_from_level(&mut self, name: &str, level: usize) {
        if let Some(names) = self.level_to_names.get_mut(&level) {
            names.retain(|n| n != name);
            if names.is_empty() {
                self.level_to_names.remove(&level);
            }
        }
    }

    /// Level and insertion index of a name
    pub fn location(&self, name: &str) -> Result<Location> {
        let level = self
            .name_to_level
            .get(name)
            .copied()
            .ok_or_else(|| Error::cache_lookup(CACHE_NAME, name, "name is not cached"))?;

        self.level_to_names
            .get(&level)
            .and_then(|names| names.iter().position(|n| n == name))
            .map(|index| Location { level, index })
            .ok_or_else(|| {
                Error::cache_lookup(CACHE_NAME, name, format!("missing from level {level}"))
            })
    }

    /// Level of a name, if cached
    pub fn level_of(&self, name: &str) -> Option<usize> {
        self.name_to_level.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.name_to_level.contains_key(name)
    }

    /// Names cached at one level, in insertion order
    pub fn names_at(&self, level: usize) -> &[String] {
        self.level_to_names
            .get(&level)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Deepest occupied level
    pub fn max_level(&self) -> Option<usize> {
        self.level_to_names.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.name_to_level.len()
    }

    pub fn is_empty(&self) -> bool {
        self.name_to_level.is_empty()
    }

    /// Iterate names by descending level, then insertion order
    pub fn iter(&self) -> LevelNames<'_> {
        LevelNames {
            levels: self.level_to_names.iter().rev(),
            current: None,
            closed: false,
        }
    }
}

impl<'a> IntoIterator for &'a LevelCache {
    type Item = LevelName<'a>;
    type IntoIter = LevelNames<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A name yielded by [`LevelNames`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelName<'a> {
    pub level: usize,
    pub name: &'a str,
}

/// Lazy level-order iterator over a [`LevelCache`]
///
/// Once exhausted or closed it yields nothing more.
#[derive(Debug)]
pub struct LevelNames<'a> {
    levels: Rev<btree_map::Iter<'a, usize, Vec<String>>>,
    current: Option<(usize, std::slice::Iter<'a, String>)>,
    closed: bool,
}

impl LevelNames<'_> {
    /// Stop the iteration early
    pub fn close(&mut self) {
        self.closed = true;
        self.current = None;
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<'a> Iterator for LevelNames<'a> {
    type Item = LevelName<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.closed {
                return None;
            }

            if let Some((level, names)) = &mut self.current {
                if let Some(name) = names.next() {
                    return Some(LevelName {
                        level: *level,
                        name: name.as_str(),
                    });
                }
            }

            match self.levels.next() {
                Some((level, names)) => self.current = Some((*level, names.iter())),
                None => self.close(),
            }
        }
    }
}

impl FusedIterator for LevelNames<'_> {}
