//! Rotation- and reflection-invariant representation of cycles.
//!
//! A simple cycle of length `L` can be written down from any of its `L`
//! vertices and in either direction. [`canonicalize`] picks one of those
//! `2L` spellings:
//!
//! 1. rotate so the smallest vertex comes first;
//! 2. of its two cycle neighbors, walk first towards the one whose numeric
//!    distance to the minimum is smaller (ties keep the discovered order).
//!
//! Because the minimum of a simple cycle is unique and its two neighbors are
//! distinct vertices larger than it, the two distances differ whenever
//! `L >= 3`, so every rotation and reflection of the cycle canonicalizes to
//! the same sequence. For `L <= 2` there is only one spelling to begin with.
use std::borrow::Borrow;
use std::hash::{Hash, Hasher};

use crate::graph::Vertex;

/// A cycle in canonical form, stored closed (first vertex repeated at the
/// end).
///
/// Equality and hashing only look at the open sequence [`CanonicalCycle::key`],
/// so a set of cycles can be probed with a plain vertex slice.
#[derive(Debug, Clone, PartialOrd, Ord)]
pub struct CanonicalCycle(Vec<Vertex>);

impl CanonicalCycle {
    /// The closed vertex sequence, `len() + 1` entries long.
    pub fn closed(&self) -> &[Vertex] {
        &self.0
    }

    /// The open vertex sequence, without the closing duplicate.
    pub fn key(&self) -> &[Vertex] {
        let open = self.0.len().saturating_sub(1);
        &self.0[..open]
    }

    /// Number of edges in the cycle.
    pub fn len(&self) -> usize {
        self.key().len()
    }

    /// Returns `true` for the degenerate empty cycle.
    pub fn is_empty(&self) -> bool {
        self.key().is_empty()
    }

    /// Consumes the cycle, returning the closed vertex sequence.
    pub fn into_closed(self) -> Vec<Vertex> {
        self.0
    }
}

impl PartialEq for CanonicalCycle {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for CanonicalCycle {}

impl Hash for CanonicalCycle {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

impl Borrow<[Vertex]> for CanonicalCycle {
    fn borrow(&self) -> &[Vertex] {
        self.key()
    }
}

/// Canonicalizes a closed walk of `L + 1` vertices (`walk[0] == walk[L]`).
///
/// The closing vertex is not inspected; the result is re-closed from its own
/// first vertex. Inputs shorter than two vertices are returned unchanged.
pub fn canonicalize(walk: &[Vertex]) -> CanonicalCycle {
    let len = walk.len().saturating_sub(1);
    let open = &walk[..len];
    let Some((min_pos, &min)) = open
        .iter()
        .enumerate()
        .min_by_key(|&(_, &vertex)| vertex)
    else {
        return CanonicalCycle(walk.to_vec());
    };

    let predecessor = open[(min_pos + len - 1) % len];
    let successor = open[(min_pos + 1) % len];

    let mut cycle = Vec::with_capacity(len + 1);
    cycle.extend_from_slice(&open[min_pos..]);
    cycle.extend_from_slice(&open[..min_pos]);
    if min.abs_diff(predecessor) < successor.abs_diff(min) {
        cycle[1..].reverse();
    }
    cycle.push(min);
    CanonicalCycle(cycle)
}
