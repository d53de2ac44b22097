//! Reassembling cycles from indexed segments.
//!
//! A cycle of length `L = k_1 + ... + k_m` is the concatenation of `m`
//! segments whose endpoints meet: segment `i` ends where segment `i + 1`
//! starts, and the last segment ends where the first one starts. [`join`]
//! enumerates all such chains over one [`EndpointIndex`] per chain position:
//!
//! - position 1 takes every segment of its index;
//! - interior positions take the buckets of their index that start at the
//!   running end vertex (an ordered range scan over the keys);
//! - the closing position is a direct keyed lookup of
//!   `(running end, start of position 1)`.
//!
//! Every complete chain is checked to be a simple cycle, canonicalized, and
//! added to a [`CycleSet`]. The same cycle is found once per rotation that
//! lines up with the segment boundaries and once per direction, so most
//! accepted chains are duplicates; only new canonical forms are counted.
use serde::Serialize;

use crate::canonical::canonicalize;
use crate::cycle_set::CycleSet;
use crate::error::CycleError;
use crate::graph::Vertex;
use crate::segments::{EndpointIndex, SegmentId};

/// Fewest segments a chain may have.
pub const MIN_ARITY: usize = 2;

/// Most segments a chain may have.
pub const MAX_ARITY: usize = 4;

/// A new cycle is logged every this many insertions.
const PROGRESS_INTERVAL: usize = 1000;

/// Counters describing one join.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct JoinStats {
    /// Complete chains assembled (endpoints matched, no segment reused).
    pub candidates: u64,
    /// Candidates that passed the simple-cycle check.
    pub accepted: u64,
    /// Accepted candidates whose canonical form was already stored.
    pub duplicates: u64,
}

/// Result of a join: the distinct cycles and how they were found.
#[derive(Debug, Clone)]
pub struct JoinOutcome {
    /// Distinct cycles in canonical form.
    pub cycles: CycleSet,
    /// Counters collected while joining.
    pub stats: JoinStats,
}

impl JoinOutcome {
    /// Number of distinct cycles.
    pub fn count(&self) -> usize {
        self.cycles.len()
    }
}

/// Returns `true` if `walk` is closed (`walk[0] == walk[L]`) and visits no
/// vertex twice among positions `0..L`.
///
/// `seen` is scratch space indexed by vertex. It is cleared before use, so
/// it can be reused across calls; a vertex beyond its end makes the walk
/// invalid.
pub fn is_simple_cycle(walk: &[Vertex], seen: &mut [bool]) -> bool {
    seen.fill(false);

    let (Some(first), Some(last)) = (walk.first(), walk.last()) else {
        return false;
    };
    if walk.len() < 2 || first != last {
        return false;
    }

    for &vertex in &walk[..walk.len() - 1] {
        match seen.get_mut(vertex) {
            Some(mark) if !*mark => *mark = true,
            Some(_) | None => return false,
        }
    }
    true
}

/// Joins one segment from each of `indexes` into cycles of length
/// `sum(index.length())`.
///
/// The same index may appear at several positions (one shared index per
/// distinct segment length); a chain never uses the same stored segment
/// twice. `vertex_count` sizes the scratch array for the simple-cycle check
/// and must cover every vertex stored in the indexes.
///
/// # Errors
///
/// - [`CycleError::Configuration`] if the number of indexes is outside
///   [`MIN_ARITY`]`..=`[`MAX_ARITY`].
/// - [`CycleError::ResourceExhausted`] if the cycle set cannot grow.
pub fn join(indexes: &[&EndpointIndex], vertex_count: usize) -> Result<JoinOutcome, CycleError> {
    if !(MIN_ARITY..=MAX_ARITY).contains(&indexes.len()) {
        return Err(CycleError::configuration(format!(
            "a join needs {MIN_ARITY} to {MAX_ARITY} segment indexes, got {}",
            indexes.len()
        )));
    }

    let cycle_length: usize = indexes.iter().map(|index| index.length()).sum();
    let lengths: Vec<usize> = indexes.iter().map(|index| index.length()).collect();
    log::debug!("joining segments {lengths:?} into {cycle_length}-cycles");

    let mut chain = ChainJoin {
        indexes,
        slots: identity_slots(indexes),
        chosen: Vec::with_capacity(indexes.len()),
        walk: Vec::with_capacity(cycle_length + 1),
        seen: vec![false; vertex_count],
        cycles: CycleSet::new(cycle_length),
        stats: JoinStats::default(),
    };
    chain.run()?;

    log::debug!(
        "join {lengths:?}: {} cycle(s) from {} accepted of {} candidate chain(s)",
        chain.cycles.len(),
        chain.stats.accepted,
        chain.stats.candidates
    );
    Ok(JoinOutcome {
        cycles: chain.cycles,
        stats: chain.stats,
    })
}

/// Collects the cycles formed by single closed segments of a
/// [`SegmentKind::Walk`](crate::segments::SegmentKind::Walk) index: every
/// segment whose last vertex returns to its first.
///
/// # Errors
///
/// Returns [`CycleError::ResourceExhausted`] if the cycle set cannot grow.
pub fn wrap(index: &EndpointIndex, vertex_count: usize) -> Result<JoinOutcome, CycleError> {
    let mut cycles = CycleSet::new(index.length());
    let mut stats = JoinStats::default();
    let mut seen = vec![false; vertex_count];

    for ((start, end), ids) in index.buckets() {
        if start != end {
            continue;
        }
        for &id in ids {
            stats.candidates += 1;
            let segment = index.segment(id);
            if !is_simple_cycle(segment, &mut seen) {
                continue;
            }
            stats.accepted += 1;
            if !cycles.insert(canonicalize(segment))? {
                stats.duplicates += 1;
            }
        }
    }

    log::debug!(
        "wrap {}: {} cycle(s) from {} closed segment(s)",
        index.length(),
        cycles.len(),
        stats.candidates
    );
    Ok(JoinOutcome { cycles, stats })
}

/// For each chain position, the first position holding the same index.
///
/// Two positions share a slot exactly when they borrow the same index, so
/// `(slot, SegmentId)` identifies a stored segment across the whole chain.
fn identity_slots(indexes: &[&EndpointIndex]) -> Vec<usize> {
    indexes
        .iter()
        .enumerate()
        .map(|(position, &index)| {
            indexes[..position]
                .iter()
                .position(|&earlier| std::ptr::eq(earlier, index))
                .unwrap_or(position)
        })
        .collect()
}

/// State of one chain join: the segments chosen so far and the walk they
/// spell out.
struct ChainJoin<'a> {
    indexes: &'a [&'a EndpointIndex],
    slots: Vec<usize>,
    chosen: Vec<(usize, SegmentId)>,
    walk: Vec<Vertex>,
    seen: Vec<bool>,
    cycles: CycleSet,
    stats: JoinStats,
}

impl<'a> ChainJoin<'a> {
    fn run(&mut self) -> Result<(), CycleError> {
        let first: &'a EndpointIndex = self.indexes[0];
        for (id, segment) in first.iter() {
            self.walk.clear();
            self.walk.extend_from_slice(segment);
            self.chosen.clear();
            self.chosen.push((self.slots[0], id));
            self.extend(1, segment[0])?;
        }
        Ok(())
    }

    /// Fills chain position `position`; `origin` is the vertex the chain
    /// must return to.
    fn extend(&mut self, position: usize, origin: Vertex) -> Result<(), CycleError> {
        let index: &'a EndpointIndex = self.indexes[position];
        let Some(&end) = self.walk.last() else {
            return Ok(());
        };

        if position + 1 == self.indexes.len() {
            for &id in index.lookup(end, origin) {
                if self.push(position, index, id) {
                    self.close()?;
                    self.pop(index);
                }
            }
            return Ok(());
        }

        for (_, ids) in index.starting_at(end) {
            for &id in ids {
                if self.push(position, index, id) {
                    self.extend(position + 1, origin)?;
                    self.pop(index);
                }
            }
        }
        Ok(())
    }

    /// Appends segment `id` without its start vertex, unless the chain
    /// already holds that exact stored segment.
    fn push(&mut self, position: usize, index: &EndpointIndex, id: SegmentId) -> bool {
        let handle = (self.slots[position], id);
        if self.chosen.contains(&handle) {
            return false;
        }
        self.chosen.push(handle);
        self.walk.extend_from_slice(&index.segment(id)[1..]);
        true
    }

    fn pop(&mut self, index: &EndpointIndex) {
        self.chosen.pop();
        self.walk.truncate(self.walk.len() - index.length());
    }

    fn close(&mut self) -> Result<(), CycleError> {
        self.stats.candidates += 1;
        if !is_simple_cycle(&self.walk, &mut self.seen) {
            return Ok(());
        }
        self.stats.accepted += 1;

        let canonical = canonicalize(&self.walk);
        if self.cycles.contains(canonical.key()) {
            self.stats.duplicates += 1;
            return Ok(());
        }
        self.cycles.insert(canonical)?;
        if self.cycles.len() % PROGRESS_INTERVAL == 0 {
            log::trace!("enumerated {} cycles", self.cycles.len());
        }
        Ok(())
    }
}
