//! Error types for persisting and loading replays.

use std::fmt;
use std::io;

use paifu_core::RuleError;

/// Errors that can occur while writing or reading a replay stream.
///
/// Reconstruction itself never returns an error: a log that cannot be
/// replayed is a corrupted log and [`Replay::look`](crate::Replay::look)
/// panics on it.
#[derive(Debug)]
pub enum ReplayError {
    /// An I/O error occurred during read or write.
    Io(io::Error),
    /// The stream does not start with the expected `b"PAIF"` magic bytes.
    InvalidMagic,
    /// The format version is not supported by this build.
    UnsupportedVersion {
        /// The version found in the stream.
        found: u8,
    },
    /// A record could not be decoded (truncated or corrupt data).
    MalformedRecord {
        /// Human-readable description of what went wrong.
        detail: String,
    },
    /// A record, action or outcome tag is not recognized.
    UnknownTag {
        /// What was being decoded.
        context: &'static str,
        /// The unrecognized tag.
        tag: u8,
    },
    /// The decoded rule fails validation.
    InvalidRule(RuleError),
    /// The replay was recorded under a different rule.
    RuleMismatch {
        /// Rule hash from the stream header.
        recorded: u64,
        /// Hash of the rule it was checked against.
        current: u64,
    },
    /// A round was written after the end-of-game record.
    AlreadyFinished,
}

impl fmt::Display for ReplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::InvalidMagic => write!(f, "invalid magic bytes (expected b\"PAIF\")"),
            Self::UnsupportedVersion { found } => {
                write!(f, "unsupported format version {found}")
            }
            Self::MalformedRecord { detail } => write!(f, "malformed record: {detail}"),
            Self::UnknownTag { context, tag } => write!(f, "unknown {context} tag {tag}"),
            Self::InvalidRule(e) => write!(f, "invalid rule in header: {e}"),
            Self::RuleMismatch { recorded, current } => {
                write!(
                    f,
                    "rule hash mismatch: recorded={recorded:#018x}, current={current:#018x}"
                )
            }
            Self::AlreadyFinished => write!(f, "replay stream already finished"),
        }
    }
}

impl std::error::Error for ReplayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::InvalidRule(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for ReplayError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<RuleError> for ReplayError {
    fn from(e: RuleError) -> Self {
        Self::InvalidRule(e)
    }
}
