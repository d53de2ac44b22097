//! Deduplicated collection of canonical cycles.
use std::collections::HashSet;
use std::collections::hash_set;

use crate::canonical::CanonicalCycle;
use crate::error::CycleError;
use crate::graph::Vertex;

/// The cycles found by one join, keyed by their canonical vertex sequence.
///
/// Iteration order is unspecified; use [`CycleSet::into_sorted_vec`] when a
/// stable order is needed.
#[derive(Debug, Clone, Default)]
pub struct CycleSet {
    cycle_length: usize,
    cycles: HashSet<CanonicalCycle>,
}

impl CycleSet {
    /// Creates an empty set for cycles of `cycle_length` edges.
    pub fn new(cycle_length: usize) -> Self {
        Self {
            cycle_length,
            cycles: HashSet::new(),
        }
    }

    /// Length every stored cycle has.
    pub fn cycle_length(&self) -> usize {
        self.cycle_length
    }

    /// Returns `true` if the canonical sequence `key` (open form, without
    /// the closing vertex) is already stored.
    pub fn contains(&self, key: &[Vertex]) -> bool {
        self.cycles.contains(key)
    }

    /// Inserts `cycle`, returning `true` if it was not present yet.
    ///
    /// # Errors
    ///
    /// - [`CycleError::Configuration`] if `cycle` has the wrong length.
    /// - [`CycleError::ResourceExhausted`] if the set cannot grow.
    pub fn insert(&mut self, cycle: CanonicalCycle) -> Result<bool, CycleError> {
        if cycle.len() != self.cycle_length {
            return Err(CycleError::configuration(format!(
                "cycle of length {} inserted into a set of {}-cycles",
                cycle.len(),
                self.cycle_length
            )));
        }
        self.cycles.try_reserve(1)?;
        Ok(self.cycles.insert(cycle))
    }

    /// Number of distinct cycles.
    pub fn len(&self) -> usize {
        self.cycles.len()
    }

    /// Returns `true` if no cycle was found.
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Iterates the stored cycles in unspecified order.
    pub fn iter(&self) -> hash_set::Iter<'_, CanonicalCycle> {
        self.cycles.iter()
    }

    /// Consumes the set, returning the cycles in lexicographic order.
    pub fn into_sorted_vec(self) -> Vec<CanonicalCycle> {
        let mut cycles: Vec<_> = self.cycles.into_iter().collect();
        cycles.sort_unstable();
        cycles
    }
}

impl IntoIterator for CycleSet {
    type Item = CanonicalCycle;
    type IntoIter = hash_set::IntoIter<CanonicalCycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.into_iter()
    }
}

impl<'a> IntoIterator for &'a CycleSet {
    type Item = &'a CanonicalCycle;
    type IntoIter = hash_set::Iter<'a, CanonicalCycle>;

    fn into_iter(self) -> Self::IntoIter {
        self.cycles.iter()
    }
}
