//! Name reservation

use crate::error::{Error, Result};
use std::collections::HashSet;

/// Default number of suffixes (exclusive) tried before giving up on a name
pub const DEFAULT_SUFFIX_BOUND: usize = 99;

/// Registry of reserved record names
#[derive(Debug, Clone)]
pub struct NameRegistry {
    reserved: HashSet<String>,
    suffix_bound: usize,
}

impl Default for NameRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl NameRegistry {
    /// Create an empty registry with the default suffix bound
    pub fn new() -> Self {
        Self::with_suffix_bound(DEFAULT_SUFFIX_BOUND)
    }

    /// Create an empty registry trying suffixes `_1` up to `_{bound - 1}`
    pub fn with_suffix_bound(suffix_bound: usize) -> Self {
        Self {
            reserved: HashSet::new(),
            suffix_bound,
        }
    }

    pub fn suffix_bound(&self) -> usize {
        self.suffix_bound
    }

    /// Reserve `name`, or the first free `name_N` when it is taken
    pub fn reserve(&mut self, name: &str) -> Result<String> {
        if self.reserved.insert(name.to_string()) {
            return Ok(name.to_string());
        }

        for suffix in 1..self.suffix_bound {
            let candidate = format!("{name}_{suffix}");
            if !self.reserved.contains(&candidate) {
                self.reserved.insert(candidate.clone());
                return Ok(candidate);
            }
        }

        Err(Error::NameExhaustion {
            name: name.to_string(),
            bound: self.suffix_bound,
        })
    }

    /// Reserve `name` if it is free; returns whether it was reserved now
    pub fn reserve_or_ignore(&mut self, name: &str) -> bool {
        self.reserved.insert(name.to_string())
    }

    pub fn is_reserved(&self, name: &str) -> bool {
        self.reserved.contains(name)
    }

    pub fn len(&self) -> usize {
        self.reserved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reserved.is_empty()
    }
}
