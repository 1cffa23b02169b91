//! Notation helpers for test fixtures.
//!
//! All helpers panic on bad input; they are for literals in tests.

use paifu_core::{parse_tiles, Seat, Tile};

/// One tile from notation, e.g. `tile("0p")`.
pub fn tile(s: &str) -> Tile {
    s.parse()
        .unwrap_or_else(|e| panic!("bad tile literal {s:?}: {e}"))
}

/// A tile list from space-separated notation, e.g. `tiles("1m 2m 3m")`.
pub fn tiles(s: &str) -> Vec<Tile> {
    parse_tiles(s).unwrap_or_else(|e| panic!("bad tile list {s:?}: {e}"))
}

/// Seat by index.
pub fn seat(index: u8) -> Seat {
    Seat::new(index).unwrap_or_else(|| panic!("seat {index} out of range"))
}
