//! Action logging and deterministic reconstruction for Paifu game records.
//!
//! Records one playthrough as a compact per-seat action log and expands
//! any prefix of a round back into a full table snapshot on demand.
//!
//! # Architecture
//!
//! - [`Recorder`] observes the live table and appends log entries
//! - [`Replay::look`] replays a bounded number of turns into a [`TableSnap`]
//! - [`ReplayWriter`] / [`ReplayReader`] persist the log to any byte stream
//! - [`compare_snap`] checks a reconstruction against the live table
//! - All I/O uses a custom binary codec (no serde dependency)
//!
//! # Format
//!
//! ```text
//! [MAGIC "PAIF"] [VERSION u8] [Header]
//! [Round 1] [Round 2] ... [Round N] [End]?
//! ```
//!
//! Each round record carries the round header, the four tracks and the
//! outcome. The trailing end record holds the final scores; a stream
//! without it is a game still in progress.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod compare;
pub mod error;
pub mod hash;
pub mod infer;
pub mod look;
pub mod reader;
pub mod recorder;
pub mod snap;
pub mod types;
pub mod writer;

pub use compare::{compare_snap, compare_snaps, Divergence, DivergenceKind, DivergenceReport};
pub use error::ReplayError;
pub use hash::{rule_hash, snap_hash};
pub use look::INITIAL_WALL;
pub use paifu_core::{RoundResult, WinForm};
pub use reader::{read_replay, ReplayReader, RoundIter};
pub use recorder::Recorder;
pub use snap::{SeatSnap, TableSnap};
pub use types::{
    ChiiSide, InAct, OutAct, Record, Replay, ReplayHeader, Round, Track, HAND_SIZE,
};
pub use writer::{write_replay, ReplayWriter};

/// Magic bytes at the start of every replay stream.
pub const MAGIC: [u8; 4] = *b"PAIF";

/// Current binary format version.
pub const FORMAT_VERSION: u8 = 1;
