//! Error type shared by every stage of the enumerate-then-join pipeline.
use std::collections::TryReserveError;

/// All error conditions the cycle search core can produce.
///
/// None of these are recoverable inside the core: a configuration error is
/// raised before any search starts, and resource exhaustion aborts the run
/// without partial results.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CycleError {
    /// The requested join configuration is unusable: segment lengths do not
    /// sum to the target, the arity is outside the supported range, or a
    /// length is zero.
    #[error("invalid join configuration: {detail}")]
    Configuration {
        /// Human-readable description of the violated constraint.
        detail: String,
    },

    /// Dynamic growth failed, or the configured segment limit was exceeded.
    #[error("resource exhausted: {detail}")]
    ResourceExhausted {
        /// What was being grown when the limit was hit.
        detail: String,
    },

    /// A graph operation referenced a vertex outside `[0, n)`.
    #[error("vertex {vertex} is out of range for a graph with {vertex_count} vertices")]
    VertexOutOfRange {
        /// The offending vertex.
        vertex: usize,
        /// Number of vertices in the graph.
        vertex_count: usize,
    },
}

impl CycleError {
    pub(crate) fn configuration(detail: impl Into<String>) -> Self {
        Self::Configuration {
            detail: detail.into(),
        }
    }
}

impl From<TryReserveError> for CycleError {
    fn from(e: TryReserveError) -> Self {
        Self::ResourceExhausted {
            detail: e.to_string(),
        }
    }
}
