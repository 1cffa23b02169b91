//! Paifu: compact mahjong game records with deterministic reconstruction.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Paifu sub-crates. For most users, adding `paifu` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use paifu::prelude::*;
//!
//! // A hand-written log: the dealer draws and throws the drawn tile.
//! let mut round = Round::new(0, 0, Seat::new(0).unwrap(), false, 0, 1);
//! round.drids = vec!["3s".parse().unwrap()];
//! for track in &mut round.tracks {
//!     track.init = parse_tiles("1m 2m 3m 4m 5m 6m 7m 8m 9m 1p 2p 3p 4p").unwrap();
//! }
//! let dealer = &mut round.tracks[0];
//! dealer.ins.push(InAct::Draw("7z".parse().unwrap()));
//! dealer.outs.push(OutAct::DiscardDrawn);
//!
//! let mut replay = Replay::new(Rule::default());
//! replay.rounds.push(round);
//!
//! let snap = replay.look(0, 2);
//! assert_eq!(snap.seats[0].river, parse_tiles("7z").unwrap());
//! assert_eq!(snap.wall_remain, 69);
//!
//! // Persist and read back.
//! let bytes = write_replay(Vec::new(), &replay).unwrap();
//! assert_eq!(read_replay(bytes.as_slice()).unwrap(), replay);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `paifu-core` | Tiles, melds, seats, rules, table traits |
//! | [`replay`] | `paifu-replay` | Recording, reconstruction and persistence |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vocabulary (`paifu-core`).
///
/// Contains [`types::Tile`], [`types::Meld`], [`types::Seat`],
/// [`types::Rule`] and the live-table seams [`types::TableView`] and
/// [`types::TableObserver`].
pub use paifu_core as types;

/// Action logging and reconstruction (`paifu-replay`).
///
/// Record a live table with [`replay::Recorder`], expand any prefix of a
/// round with [`replay::Replay::look`], persist with
/// [`replay::ReplayWriter`] and [`replay::ReplayReader`].
pub use paifu_replay as replay;

/// Common imports for typical Paifu usage.
///
/// ```rust
/// use paifu::prelude::*;
/// ```
pub mod prelude {
    // Vocabulary
    pub use paifu_core::{parse_tiles, Meld, MeldKind, Rule, Seat, Tile, TileKind};

    // Live table seams
    pub use paifu_core::{RoundResult, TableObserver, TableView, WinForm};

    // Log and snapshots
    pub use paifu_replay::{InAct, OutAct, Recorder, Replay, Round, TableSnap, Track};

    // Persistence
    pub use paifu_replay::{read_replay, write_replay, ReplayError, ReplayReader, ReplayWriter};
}
