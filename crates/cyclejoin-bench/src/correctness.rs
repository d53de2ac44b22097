//! Reference enumeration and invariant checkers for correctness validation.
//!
//! [`reference_cycles`] finds cycles by plain depth-first search, with no
//! segments, indexes or canonical forms from `cyclejoin-core`. Both sides
//! are compared in [`normalize`]d form: minimum vertex first, then towards
//! the smaller of its two neighbors.

use std::collections::BTreeSet;

use cyclejoin_core::{CanonicalCycle, Graph, JoinConfig, JoinOutcome, Vertex};

/// Rotates an open cycle to its minimum and orients it towards the smaller
/// neighbor of that minimum.
pub fn normalize(open: &[Vertex]) -> Vec<Vertex> {
    let Some(min_pos) = (0..open.len()).min_by_key(|&i| open[i]) else {
        return Vec::new();
    };
    let mut cycle = open.to_vec();
    cycle.rotate_left(min_pos);
    if cycle.len() >= 3 && cycle[1] > cycle[cycle.len() - 1] {
        cycle[1..].reverse();
    }
    cycle
}

/// Every simple cycle of `length` arcs in `graph`, normalized.
///
/// A directed cycle and its reverse collapse to one entry, matching the
/// direction-free dedup of the join engine.
pub fn reference_cycles(graph: &Graph, length: usize) -> BTreeSet<Vec<Vertex>> {
    let mut found = BTreeSet::new();
    if length == 0 {
        return found;
    }
    let mut path = Vec::with_capacity(length);
    let mut on_path = vec![false; graph.vertex_count()];
    for start in 0..graph.vertex_count() {
        path.push(start);
        on_path[start] = true;
        search(graph, length, &mut path, &mut on_path, &mut found);
        on_path[start] = false;
        path.clear();
    }
    found
}

// Only vertices above the start are visited, so each cycle is walked from its
// minimum vertex.
fn search(
    graph: &Graph,
    length: usize,
    path: &mut Vec<Vertex>,
    on_path: &mut [bool],
    found: &mut BTreeSet<Vec<Vertex>>,
) {
    let start = path[0];
    let Some(&last) = path.last() else {
        return;
    };
    if path.len() == length {
        if graph.adjacent(last, start) && (length > 2 || graph.is_directed()) {
            found.insert(normalize(path));
        }
        return;
    }
    for next in graph.neighbors(last) {
        if next > start && !on_path[next] {
            path.push(next);
            on_path[next] = true;
            search(graph, length, path, on_path, found);
            on_path[next] = false;
            path.pop();
        }
    }
}

/// Verifies a single result cycle: closed, `length` arcs, no repeated
/// vertex, and every step an arc of `graph` (read forwards or, for directed
/// graphs, entirely backwards).
pub fn check_cycle(graph: &Graph, cycle: &CanonicalCycle, length: usize) -> Result<(), String> {
    let closed = cycle.closed();
    if closed.len() != length + 1 {
        return Err(format!("{closed:?} has {} vertices, expected {}", closed.len(), length + 1));
    }
    if closed.first() != closed.last() {
        return Err(format!("{closed:?} is not closed"));
    }
    let distinct: BTreeSet<_> = cycle.key().iter().collect();
    if distinct.len() != length {
        return Err(format!("{closed:?} repeats a vertex"));
    }
    let forward = closed.windows(2).all(|w| graph.adjacent(w[0], w[1]));
    let backward = closed.windows(2).all(|w| graph.adjacent(w[1], w[0]));
    if !forward && !backward {
        return Err(format!("{closed:?} uses a missing arc"));
    }
    Ok(())
}

/// Verifies a join outcome: every cycle valid and canonical, and the
/// statistics consistent with the stored set.
pub fn check_outcome(
    graph: &Graph,
    config: &JoinConfig,
    outcome: &JoinOutcome,
) -> Result<(), String> {
    if outcome.cycles.cycle_length() != config.target() {
        return Err(format!(
            "cycle set length {} for target {}",
            outcome.cycles.cycle_length(),
            config.target()
        ));
    }
    for cycle in &outcome.cycles {
        check_cycle(graph, cycle, config.target())?;
        let again = cyclejoin_core::canonicalize(cycle.closed());
        if again.closed() != cycle.closed() {
            return Err(format!("{:?} is not a fixed point of canonicalize", cycle.closed()));
        }
    }
    let stats = outcome.stats;
    let stored = outcome.count() as u64;
    if stats.accepted != stored + stats.duplicates {
        return Err(format!(
            "accepted {} != stored {stored} + duplicates {}",
            stats.accepted, stats.duplicates
        ));
    }
    if stats.candidates < stats.accepted {
        return Err(format!(
            "more accepted ({}) than candidates ({})",
            stats.accepted, stats.candidates
        ));
    }
    Ok(())
}

/// Verifies that `outcome` holds exactly the reference cycles of `graph`.
pub fn check_against_reference(
    graph: &Graph,
    config: &JoinConfig,
    outcome: &JoinOutcome,
) -> Result<(), String> {
    let expected = reference_cycles(graph, config.target());
    let actual: BTreeSet<Vec<Vertex>> = outcome
        .cycles
        .iter()
        .map(|cycle| normalize(cycle.key()))
        .collect();
    if actual != expected {
        let missing: Vec<_> = expected.difference(&actual).take(5).collect();
        let extra: Vec<_> = actual.difference(&expected).take(5).collect();
        return Err(format!(
            "split {config}: {} cycles, reference has {}; missing {missing:?}, extra {extra:?}",
            actual.len(),
            expected.len()
        ));
    }
    Ok(())
}

/// All splits of `target` into 2 to 4 positive lengths, in lexicographic
/// order.
pub fn all_splits(target: usize) -> Vec<JoinConfig> {
    let mut out = Vec::new();
    let mut current = Vec::new();
    compositions(target, &mut current, &mut out);
    out.into_iter()
        .filter_map(|lengths| JoinConfig::new(target, lengths).ok())
        .collect()
}

fn compositions(remaining: usize, current: &mut Vec<usize>, out: &mut Vec<Vec<usize>>) {
    if remaining == 0 {
        if current.len() >= 2 {
            out.push(current.clone());
        }
        return;
    }
    if current.len() == cyclejoin_core::MAX_ARITY {
        return;
    }
    for next in 1..=remaining {
        current.push(next);
        compositions(remaining - next, current, out);
        current.pop();
    }
}
