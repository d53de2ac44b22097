//! The enumerate-then-join pipeline with shared per-length indexes.
//!
//! Enumerating segments is the expensive half of a search, and its result
//! depends only on the graph, the segment length and the segment form. An
//! [`IndexCache`] therefore builds each `(length, kind)` index once and lends
//! it to every configuration that needs it, including several positions of
//! the same chain.
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::config::JoinConfig;
use crate::error::CycleError;
use crate::graph::Graph;
use crate::join::{JoinOutcome, join, wrap};
use crate::segments::{EndpointIndex, SegmentKind, build_index_with_limit};

/// Segment indexes for one graph, keyed by length and form.
///
/// The cache does not remember which graph it was filled from; use one
/// cache per graph.
#[derive(Debug, Default)]
pub struct IndexCache {
    indexes: BTreeMap<(usize, SegmentKind), EndpointIndex>,
    max_segments: Option<usize>,
    segments_enumerated: usize,
}

impl IndexCache {
    /// Creates an empty cache without a segment limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty cache whose index builds fail once a single index
    /// would exceed `max_segments` segments.
    pub fn with_limit(max_segments: Option<usize>) -> Self {
        Self {
            max_segments,
            ..Self::default()
        }
    }

    /// Returns the index for `(length, kind)`, building it on first use.
    ///
    /// # Errors
    ///
    /// Propagates the [`CycleError`] of a failed build; nothing is cached in
    /// that case.
    pub fn get_or_build(
        &mut self,
        graph: &Graph,
        length: usize,
        kind: SegmentKind,
    ) -> Result<&EndpointIndex, CycleError> {
        let max_segments = self.max_segments;
        match self.indexes.entry((length, kind)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let index = build_index_with_limit(graph, length, kind, max_segments)?;
                self.segments_enumerated += index.len();
                Ok(entry.insert(index))
            }
        }
    }

    /// Returns the index for `(length, kind)` if it has been built.
    pub fn get(&self, length: usize, kind: SegmentKind) -> Option<&EndpointIndex> {
        self.indexes.get(&(length, kind))
    }

    /// Removes and returns an index once no further join needs it.
    pub fn release(&mut self, length: usize, kind: SegmentKind) -> Option<EndpointIndex> {
        self.indexes.remove(&(length, kind))
    }

    /// Number of indexes currently held.
    pub fn len(&self) -> usize {
        self.indexes.len()
    }

    /// Returns `true` if no index is held.
    pub fn is_empty(&self) -> bool {
        self.indexes.is_empty()
    }

    /// Total number of segments produced by every build so far.
    pub fn segments_enumerated(&self) -> usize {
        self.segments_enumerated
    }
}

/// Finds every simple cycle of `config.target()` arcs in `graph`.
///
/// Builds the missing indexes in `cache`, then joins them (or, for a
/// single-segment configuration, wraps the closed walks).
///
/// # Errors
///
/// - [`CycleError::Configuration`] for a target below 3 on an undirected
///   graph, which would only yield an edge walked there and back.
/// - Any error from building an index or joining.
pub fn find_cycles(
    graph: &Graph,
    config: &JoinConfig,
    cache: &mut IndexCache,
) -> Result<JoinOutcome, CycleError> {
    if !graph.is_directed() && config.target() < 3 {
        return Err(CycleError::configuration(format!(
            "undirected graphs have no simple cycles of length {}",
            config.target()
        )));
    }

    let kind = config.segment_kind();
    for length in config.distinct_lengths() {
        cache.get_or_build(graph, length, kind)?;
    }

    let indexes = config
        .lengths()
        .iter()
        .map(|&length| {
            cache.get(length, kind).ok_or_else(|| {
                CycleError::configuration(format!("no {kind} index for length {length}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    match indexes.as_slice() {
        [single] => wrap(single, graph.vertex_count()),
        chain => join(chain, graph.vertex_count()),
    }
}
