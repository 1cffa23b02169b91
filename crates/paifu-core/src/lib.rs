//! Core vocabulary for Paifu game records.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! types shared by the live table, the recorder, and the reconstructor:
//! tiles, seats, melds, round outcomes, rule configuration, and the
//! [`TableView`] / [`TableObserver`] seams to the live engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod meld;
pub mod outcome;
pub mod rule;
pub mod seat;
pub mod tile;
pub mod tile_count;
pub mod traits;

pub use error::{ParseTileError, RuleError};
pub use meld::{Meld, MeldKind};
pub use outcome::{RoundResult, WinForm};
pub use rule::Rule;
pub use seat::{Seat, NUM_SEATS};
pub use tile::{parse_tiles, Suit, Tile, TileKind, NUM_IDS, NUM_KINDS};
pub use tile_count::TileCount;
pub use traits::{TableObserver, TableView};
