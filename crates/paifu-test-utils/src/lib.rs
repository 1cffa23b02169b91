//! Test utilities and mock types for Paifu development.
//!
//! Provides a settable [`StubTable`] implementing [`TableView`], a
//! seeded [`MockTable`] that plays whole games against any
//! [`TableObserver`](paifu_core::TableObserver), and small fixture
//! helpers for writing tiles in notation.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod table;

pub use fixtures::{seat, tile, tiles};
pub use table::{MockConfig, MockTable};

use paifu_core::{Meld, Rule, Seat, TableView, Tile, NUM_SEATS};

/// A [`TableView`] whose every field is set directly by the test.
///
/// Useful for driving a single observer callback without playing a
/// game. `hands` are returned sorted by
/// [`closed_hand`](TableView::closed_hand).
#[derive(Clone, Debug)]
pub struct StubTable {
    pub hands: [Vec<Tile>; NUM_SEATS],
    pub drawn: [Option<Tile>; NUM_SEATS],
    pub rivers: [Vec<Tile>; NUM_SEATS],
    pub melds: [Vec<Meld>; NUM_SEATS],
    pub focus: Seat,
    pub focus_tile: Option<Tile>,
    pub dora: Vec<Tile>,
    pub ura: Vec<Tile>,
    pub points: [i32; NUM_SEATS],
    pub girls: [u32; NUM_SEATS],
    pub rule: Rule,
}

impl StubTable {
    pub fn new() -> Self {
        let rule = Rule::default();
        Self {
            hands: Default::default(),
            drawn: [None; NUM_SEATS],
            rivers: Default::default(),
            melds: Default::default(),
            focus: Seat::ALL[0],
            focus_tile: None,
            dora: Vec::new(),
            ura: Vec::new(),
            points: [rule.initial_points; NUM_SEATS],
            girls: [0; NUM_SEATS],
            rule,
        }
    }

    /// Set `seat`'s closed hand from notation.
    pub fn with_hand(mut self, seat: Seat, hand: &str) -> Self {
        self.hands[seat.index()] = tiles(hand);
        self
    }

    /// Make `who` the discarder of `tile`.
    pub fn discard(&mut self, who: Seat, tile: Tile) {
        self.rivers[who.index()].push(tile);
        self.focus = who;
        self.focus_tile = Some(tile);
    }
}

impl Default for StubTable {
    fn default() -> Self {
        Self::new()
    }
}

impl TableView for StubTable {
    fn closed_hand(&self, seat: Seat) -> Vec<Tile> {
        let mut hand = self.hands[seat.index()].clone();
        hand.sort();
        hand
    }

    fn drawn(&self, seat: Seat) -> Option<Tile> {
        self.drawn[seat.index()]
    }

    fn river(&self, seat: Seat) -> &[Tile] {
        &self.rivers[seat.index()]
    }

    fn melds(&self, seat: Seat) -> &[Meld] {
        &self.melds[seat.index()]
    }

    fn focus(&self) -> Seat {
        self.focus
    }

    fn focus_tile(&self) -> Tile {
        self.focus_tile.expect("StubTable: no focus tile set")
    }

    fn dora_indicators(&self) -> &[Tile] {
        &self.dora
    }

    fn ura_indicators(&self) -> &[Tile] {
        &self.ura
    }

    fn points(&self) -> [i32; NUM_SEATS] {
        self.points
    }

    fn girl_id(&self, seat: Seat) -> u32 {
        self.girls[seat.index()]
    }

    fn rule(&self) -> &Rule {
        &self.rule
    }
}
