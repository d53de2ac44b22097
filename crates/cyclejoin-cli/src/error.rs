/// CLI error types with associated exit codes.
///
/// [`CliError`] is the top-level error type for the `cyclejoin` binary. Every
/// variant maps to a stable exit code (1 or 2) via [`CliError::exit_code`]:
///
/// - Exit code **2**: input failure. The graph could not be read or parsed,
///   or an output file could not be written.
/// - Exit code **1**: logical failure. The input was fine but the requested
///   search cannot run (bad split, segment limit exceeded).
///
/// Finding zero cycles is a successful run.
use std::fmt;
use std::path::PathBuf;

use cyclejoin_core::{CycleError, PajekError};

/// All error conditions that the `cyclejoin` CLI can produce.
#[derive(Debug)]
pub enum CliError {
    // --- Exit code 2: input failures ---
    /// A file argument could not be found on the filesystem.
    FileNotFound {
        /// The path that was not found.
        path: PathBuf,
    },

    /// The process lacks permission to read a file.
    PermissionDenied {
        /// The path that could not be read.
        path: PathBuf,
    },

    /// The input exceeds the configured `--max-file-size` limit.
    FileTooLarge {
        /// `"-"` for stdin, or the filesystem path.
        source: String,
        /// The configured size limit in bytes.
        limit: u64,
        /// The actual size in bytes; `None` for stdin.
        actual: Option<u64>,
    },

    /// The input bytes are not valid UTF-8.
    InvalidUtf8 {
        /// A human-readable label for the source.
        source: String,
        /// The byte offset of the first invalid byte sequence.
        byte_offset: usize,
    },

    /// An I/O error occurred while reading from stdin.
    StdinReadError {
        /// The underlying I/O error message.
        detail: String,
    },

    /// A generic I/O error, reading or writing.
    IoError {
        /// A human-readable label for the file or stream.
        source: String,
        /// The underlying I/O error message.
        detail: String,
    },

    /// The input is not a valid Pajek graph.
    ParseFailed {
        /// A human-readable label for the source.
        source: String,
        /// Parser error message.
        detail: String,
    },

    // --- Exit code 1: logical failures ---
    /// The requested cycle length or split cannot be searched.
    InvalidConfiguration {
        /// Why the configuration was rejected.
        detail: String,
    },

    /// The search hit the segment limit or ran out of memory.
    ResourceExhausted {
        /// Which limit was hit.
        detail: String,
    },
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::FileNotFound { .. }
            | Self::PermissionDenied { .. }
            | Self::FileTooLarge { .. }
            | Self::InvalidUtf8 { .. }
            | Self::StdinReadError { .. }
            | Self::IoError { .. }
            | Self::ParseFailed { .. } => 2,

            Self::InvalidConfiguration { .. } | Self::ResourceExhausted { .. } => 1,
        }
    }

    /// Returns a human-readable error message suitable for printing to stderr.
    pub fn message(&self) -> String {
        match self {
            Self::FileNotFound { path } => {
                format!("error: file not found: {}", path.display())
            }
            Self::PermissionDenied { path } => {
                format!("error: permission denied: {}", path.display())
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: Some(actual),
            } => {
                format!("error: file too large: {source} is {actual} bytes, limit is {limit} bytes")
            }
            Self::FileTooLarge {
                source,
                limit,
                actual: None,
            } => {
                format!("error: file too large: {source} exceeded limit of {limit} bytes")
            }
            Self::InvalidUtf8 {
                source,
                byte_offset,
            } => {
                format!(
                    "error: invalid UTF-8 in {source}: first invalid byte at offset {byte_offset}"
                )
            }
            Self::StdinReadError { detail } => {
                format!("error: failed to read stdin: {detail}")
            }
            Self::IoError { source, detail } => {
                format!("error: I/O error on {source}: {detail}")
            }
            Self::ParseFailed { source, detail } => {
                format!("error: cannot parse {source}: {detail}")
            }
            Self::InvalidConfiguration { detail } => {
                format!("error: invalid configuration: {detail}")
            }
            Self::ResourceExhausted { detail } => {
                format!("error: resource exhausted: {detail}")
            }
        }
    }

    /// Wraps a Pajek parse failure for `source`.
    pub fn parse(source: &str, e: &PajekError) -> Self {
        Self::ParseFailed {
            source: source.to_owned(),
            detail: e.to_string(),
        }
    }
}

impl From<CycleError> for CliError {
    fn from(e: CycleError) -> Self {
        match e {
            CycleError::ResourceExhausted { detail } => Self::ResourceExhausted { detail },
            CycleError::Configuration { detail } => Self::InvalidConfiguration { detail },
            CycleError::VertexOutOfRange { .. } => Self::InvalidConfiguration {
                detail: e.to_string(),
            },
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

impl std::error::Error for CliError {}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use std::path::PathBuf;

    use cyclejoin_core::JoinConfig;

    use super::*;

    #[test]
    fn input_failures_are_exit_2() {
        let errors = [
            CliError::FileNotFound {
                path: PathBuf::from("g.net"),
            },
            CliError::PermissionDenied {
                path: PathBuf::from("/root/g.net"),
            },
            CliError::FileTooLarge {
                source: "g.net".to_owned(),
                limit: 1024,
                actual: Some(2048),
            },
            CliError::InvalidUtf8 {
                source: "g.net".to_owned(),
                byte_offset: 42,
            },
            CliError::StdinReadError {
                detail: "closed".to_owned(),
            },
            CliError::ParseFailed {
                source: "g.net".to_owned(),
                detail: "missing *vertices line".to_owned(),
            },
        ];
        for e in &errors {
            assert_eq!(e.exit_code(), 2, "{e}");
        }
    }

    #[test]
    fn logical_failures_are_exit_1() {
        let e = CliError::InvalidConfiguration {
            detail: "bad".to_owned(),
        };
        assert_eq!(e.exit_code(), 1);
        let e = CliError::ResourceExhausted {
            detail: "limit".to_owned(),
        };
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn core_errors_are_not_prefixed_twice() {
        let e = CliError::from(JoinConfig::new(5, vec![2, 2]).expect_err("sums to 4"));
        assert_eq!(e.exit_code(), 1);
        assert_eq!(
            e.message(),
            "error: invalid configuration: split [2, 2] sums to 4, not to the cycle length 5"
        );

        let e = CliError::from(CycleError::ResourceExhausted {
            detail: "more than 5 segments of length 1".to_owned(),
        });
        assert_eq!(e.exit_code(), 1);
        assert_eq!(
            e.message(),
            "error: resource exhausted: more than 5 segments of length 1"
        );
    }

    #[test]
    fn out_of_range_vertex_keeps_its_description() {
        let e = CliError::from(CycleError::VertexOutOfRange {
            vertex: 9,
            vertex_count: 4,
        });
        assert_eq!(
            e.message(),
            "error: invalid configuration: vertex 9 is out of range for a graph with 4 vertices"
        );
    }

    #[test]
    fn file_too_large_message_mentions_both_sizes() {
        let e = CliError::FileTooLarge {
            source: "big.net".to_owned(),
            limit: 10,
            actual: Some(20),
        };
        let msg = e.message();
        assert!(msg.contains("20 bytes") && msg.contains("10 bytes"), "{msg}");
        let e = CliError::FileTooLarge {
            source: "-".to_owned(),
            limit: 10,
            actual: None,
        };
        assert!(e.message().contains("exceeded limit of 10"), "{}", e.message());
    }
}
