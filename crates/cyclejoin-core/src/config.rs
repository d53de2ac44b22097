//! Join configurations: how a target cycle length is split into segments.
use std::collections::BTreeSet;
use std::fmt;

use serde::Serialize;

use crate::error::CycleError;
use crate::join::{MAX_ARITY, MIN_ARITY};
use crate::segments::SegmentKind;

/// An ordered list of segment lengths summing to the target cycle length.
///
/// Either a chain of [`MIN_ARITY`]`..=`[`MAX_ARITY`] path segments, or a
/// single closed walk covering the whole cycle (see [`JoinConfig::wrap`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JoinConfig {
    target: usize,
    lengths: Vec<usize>,
}

impl JoinConfig {
    /// Validates `lengths` as a split of `target`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Configuration`] if there are fewer than two or
    /// more than four lengths, a length is zero, or the lengths do not sum
    /// to `target`.
    pub fn new(target: usize, lengths: Vec<usize>) -> Result<Self, CycleError> {
        if !(MIN_ARITY..=MAX_ARITY).contains(&lengths.len()) {
            return Err(CycleError::configuration(format!(
                "split {lengths:?} has {} segment(s), expected {MIN_ARITY} to {MAX_ARITY}",
                lengths.len()
            )));
        }
        if lengths.contains(&0) {
            return Err(CycleError::configuration(format!(
                "split {lengths:?} contains a zero-length segment"
            )));
        }
        let sum: usize = lengths.iter().sum();
        if sum != target {
            return Err(CycleError::configuration(format!(
                "split {lengths:?} sums to {sum}, not to the cycle length {target}"
            )));
        }
        Ok(Self { target, lengths })
    }

    /// Splits `target` into two halves, the second one longer when `target`
    /// is odd. This is the split used when none is given.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Configuration`] if `target < 2`.
    pub fn even_split(target: usize) -> Result<Self, CycleError> {
        let first = target / 2;
        Self::new(target, vec![first, target - first])
    }

    /// A single closed walk of `target` arcs, tested directly as a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Configuration`] if `target` is zero.
    pub fn wrap(target: usize) -> Result<Self, CycleError> {
        if target == 0 {
            return Err(CycleError::configuration("cycle length must be at least 1"));
        }
        Ok(Self {
            target,
            lengths: vec![target],
        })
    }

    /// Parses a comma-separated split such as `"2,3"`.
    ///
    /// # Errors
    ///
    /// Returns [`CycleError::Configuration`] for a token that is not a
    /// non-negative integer, or when the parsed split fails [`JoinConfig::new`].
    pub fn parse(target: usize, split: &str) -> Result<Self, CycleError> {
        let lengths = split
            .split(',')
            .map(|token| {
                let token = token.trim();
                token.parse::<usize>().map_err(|_| {
                    CycleError::configuration(format!("invalid segment length {token:?}"))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(target, lengths)
    }

    /// Target cycle length `L`.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Segment length per chain position.
    pub fn lengths(&self) -> &[usize] {
        &self.lengths
    }

    /// Number of chain positions.
    pub fn arity(&self) -> usize {
        self.lengths.len()
    }

    /// Returns `true` for the single-segment closed-walk configuration.
    pub fn is_wrap(&self) -> bool {
        self.lengths.len() == 1
    }

    /// Segment form the indexes for this configuration need.
    pub fn segment_kind(&self) -> SegmentKind {
        if self.is_wrap() {
            SegmentKind::Walk
        } else {
            SegmentKind::Path
        }
    }

    /// Each length that needs an index, once.
    pub fn distinct_lengths(&self) -> BTreeSet<usize> {
        self.lengths.iter().copied().collect()
    }
}

impl fmt::Display for JoinConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.lengths.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("+"))
    }
}
