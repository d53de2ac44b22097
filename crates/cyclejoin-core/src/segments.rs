//! Fixed-length segment enumeration and the endpoint index that stores it.
//!
//! A *segment* of length `k` is a sequence of `k + 1` vertices joined by
//! `k` arcs with no vertex repeated. In [`SegmentKind::Walk`] form the last
//! vertex may additionally equal the first, which makes the segment a
//! closed walk that can be tested as a complete cycle on its own.
//!
//! Segments are grouped by their key `(first, last)` in an
//! [`EndpointIndex`]. The index owns the vertex data in a single flat arena
//! and hands out [`SegmentId`] handles; a handle stays valid for the
//! lifetime of the index, and segments are never mutated after insertion.
use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::CycleError;
use crate::graph::{Graph, Vertex};

/// The `(start, end)` pair a segment is filed under.
pub type EndpointKey = (Vertex, Vertex);

/// Whether a segment may close back onto its own start vertex.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    /// Simple path: all `k + 1` vertices distinct.
    Path,
    /// Simple path, or a closed walk whose last step returns to the start.
    Walk,
}

impl fmt::Display for SegmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SegmentKind::Path => f.write_str("path"),
            SegmentKind::Walk => f.write_str("walk"),
        }
    }
}

/// Stable handle to a segment stored in an [`EndpointIndex`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SegmentId(usize);

impl SegmentId {
    /// Position of the segment in insertion order.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Multimap from endpoint pair to the segments sharing it.
#[derive(Debug, Clone)]
pub struct EndpointIndex {
    length: usize,
    kind: SegmentKind,
    vertices: Vec<Vertex>,
    buckets: BTreeMap<EndpointKey, Vec<SegmentId>>,
}

impl EndpointIndex {
    /// Creates an empty index for segments of `length` arcs.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Configuration`] if `length` is zero.
    pub fn new(length: usize, kind: SegmentKind) -> Result<Self, CycleError> {
        if length == 0 {
            return Err(CycleError::configuration("segment length must be at least 1"));
        }
        Ok(Self {
            length,
            kind,
            vertices: Vec::new(),
            buckets: BTreeMap::new(),
        })
    }

    /// Number of arcs in every stored segment.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Segment form this index was built for.
    pub fn kind(&self) -> SegmentKind {
        self.kind
    }

    /// Number of stored segments.
    pub fn len(&self) -> usize {
        self.vertices.len() / self.stride()
    }

    /// Returns `true` if no segment is stored.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Number of distinct endpoint pairs.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Stores `segment` in the bucket for `(segment[0], segment[k])`.
    ///
    /// Both the arena and the bucket grow geometrically; growth failure is
    /// reported rather than aborting the process.
    ///
    /// # Errors
    ///
    /// - [`CycleError::Configuration`] if `segment` does not hold exactly
    ///   `length + 1` vertices.
    /// - [`CycleError::ResourceExhausted`] if storage cannot grow.
    pub fn insert(&mut self, segment: &[Vertex]) -> Result<SegmentId, CycleError> {
        let (Some(&start), Some(&end), true) = (
            segment.first(),
            segment.last(),
            segment.len() == self.stride(),
        ) else {
            return Err(CycleError::configuration(format!(
                "segment has {} vertices, index stores segments of {}",
                segment.len(),
                self.stride()
            )));
        };

        let id = SegmentId(self.len());
        self.vertices.try_reserve(self.stride())?;
        self.vertices.extend_from_slice(segment);

        let bucket = self.buckets.entry((start, end)).or_default();
        bucket.try_reserve(1)?;
        bucket.push(id);
        Ok(id)
    }

    /// Vertex sequence of a stored segment.
    ///
    /// `id` must come from this index; handles from another index may point
    /// at an unrelated segment or past the end of the arena.
    pub fn segment(&self, id: SegmentId) -> &[Vertex] {
        let start = id.0 * self.stride();
        &self.vertices[start..start + self.stride()]
    }

    /// Segments filed under `(start, end)`; empty when the key is absent.
    pub fn lookup(&self, start: Vertex, end: Vertex) -> &[SegmentId] {
        self.buckets
            .get(&(start, end))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Segments filed under `(end, start)`: the segments that lead back
    /// from the end of a `(start, end)` segment to its start.
    pub fn lookup_reversed(&self, start: Vertex, end: Vertex) -> &[SegmentId] {
        self.lookup(end, start)
    }

    /// Buckets whose key starts at `start`, in ascending order of end vertex.
    pub fn starting_at(
        &self,
        start: Vertex,
    ) -> impl Iterator<Item = (EndpointKey, &[SegmentId])> + '_ {
        self.buckets
            .range((start, Vertex::MIN)..=(start, Vertex::MAX))
            .map(|(&key, ids)| (key, ids.as_slice()))
    }

    /// All buckets in key order.
    pub fn buckets(&self) -> impl Iterator<Item = (EndpointKey, &[SegmentId])> + '_ {
        self.buckets.iter().map(|(&key, ids)| (key, ids.as_slice()))
    }

    /// All segments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &[Vertex])> + '_ {
        self.vertices
            .chunks_exact(self.stride())
            .enumerate()
            .map(|(i, segment)| (SegmentId(i), segment))
    }

    fn stride(&self) -> usize {
        self.length + 1
    }
}

/// Enumerates every segment of `length` arcs in `graph`.
///
/// # Errors
///
/// - [`CycleError::Configuration`] if `length` is zero.
/// - [`CycleError::ResourceExhausted`] if storage cannot grow.
pub fn build_index(
    graph: &Graph,
    length: usize,
    kind: SegmentKind,
) -> Result<EndpointIndex, CycleError> {
    build_index_with_limit(graph, length, kind, None)
}

/// Like [`build_index`], but fails once more than `max_segments` segments
/// have been produced.
///
/// The number of segments grows exponentially with `length`, so the limit
/// is the only guard against runaway memory use on dense graphs.
///
/// # Errors
///
/// As [`build_index`]; exceeding the limit is reported as
/// [`CycleError::ResourceExhausted`].
pub fn build_index_with_limit(
    graph: &Graph,
    length: usize,
    kind: SegmentKind,
    max_segments: Option<usize>,
) -> Result<EndpointIndex, CycleError> {
    let mut search = SegmentSearch {
        graph,
        kind,
        max_segments,
        path: Vec::with_capacity(length + 1),
        on_path: vec![false; graph.vertex_count()],
        index: EndpointIndex::new(length, kind)?,
    };

    for start in 0..graph.vertex_count() {
        // No segment of length >= 1 can touch an isolated vertex.
        if graph.degree(start) == 0 {
            continue;
        }
        search.path.push(start);
        search.on_path[start] = true;
        search.extend(start, 0)?;
        search.on_path[start] = false;
        search.path.clear();
    }

    let index = search.index;
    log::debug!(
        "built {length}-arc {kind} index: {} segment(s) in {} bucket(s)",
        index.len(),
        index.bucket_count()
    );
    Ok(index)
}

/// Depth-first search state for one index build.
struct SegmentSearch<'g> {
    graph: &'g Graph,
    kind: SegmentKind,
    max_segments: Option<usize>,
    path: Vec<Vertex>,
    on_path: Vec<bool>,
    index: EndpointIndex,
}

impl SegmentSearch<'_> {
    fn extend(&mut self, node: Vertex, depth: usize) -> Result<(), CycleError> {
        if depth == self.index.length() {
            return self.emit();
        }

        let graph = self.graph;
        let start = self.path[0];
        let closing_step = self.kind == SegmentKind::Walk && depth + 1 == self.index.length();

        for next in graph.neighbors(node) {
            let revisit = self.on_path[next];
            if revisit && !(closing_step && next == start) {
                continue;
            }
            self.path.push(next);
            self.on_path[next] = true;
            self.extend(next, depth + 1)?;
            self.path.pop();
            if !revisit {
                self.on_path[next] = false;
            }
        }
        Ok(())
    }

    fn emit(&mut self) -> Result<(), CycleError> {
        if let Some(limit) = self.max_segments {
            if self.index.len() >= limit {
                return Err(CycleError::ResourceExhausted {
                    detail: format!(
                        "more than {limit} segments of length {}",
                        self.index.length()
                    ),
                });
            }
        }
        self.index.insert(&self.path)?;
        Ok(())
    }
}
