//! Seams to the live table: a read-only view and an event observer.

use crate::meld::Meld;
use crate::outcome::{RoundResult, WinForm};
use crate::rule::Rule;
use crate::seat::Seat;
use crate::tile::Tile;

/// Read-only access to the live table's public state.
///
/// Passed to every [`TableObserver`] callback so observers can pull
/// whatever they need at the moment an event fires.
pub trait TableView {
    /// Closed tiles of `seat`, sorted, excluding the drawn tile.
    fn closed_hand(&self, seat: Seat) -> Vec<Tile>;

    /// The tile `seat` currently holds apart from its closed hand.
    fn drawn(&self, seat: Seat) -> Option<Tile>;

    /// Discards of `seat` still lying in its river.
    fn river(&self, seat: Seat) -> &[Tile];

    /// Groups `seat` has declared, in declaration order.
    fn melds(&self, seat: Seat) -> &[Meld];

    /// The seat whose action is in focus (the discarder, during a call).
    fn focus(&self) -> Seat;

    /// The most recently discarded tile.
    fn focus_tile(&self) -> Tile;

    /// Dora indicators revealed so far.
    fn dora_indicators(&self) -> &[Tile];

    /// Closing indicators revealed at the end of the round.
    fn ura_indicators(&self) -> &[Tile];

    /// Current point totals.
    fn points(&self) -> [i32; 4];

    /// Identifier of the character sitting at `seat`.
    fn girl_id(&self, seat: Seat) -> u32;

    /// The rule the table runs under.
    fn rule(&self) -> &Rule;
}

/// Receives live table events in order.
///
/// Every method has an empty default body; implementors override what
/// they need. Callbacks run synchronously on the table's thread.
pub trait TableObserver {
    /// The table was set up; `seed` drives the whole game.
    fn on_table_started(&mut self, _table: &dyn TableView, _seed: u64) {}

    /// A new round begins.
    fn on_round_started(
        &mut self,
        _round: u8,
        _extra_round: u8,
        _dealer: Seat,
        _all_last: bool,
        _deposit: u32,
        _seed: u64,
    ) {
    }

    /// Dice were rolled.
    fn on_diced(&mut self, _table: &dyn TableView, _die1: u8, _die2: u8) {}

    /// Every seat received its 13 starting tiles.
    fn on_dealt(&mut self, _table: &dyn TableView) {}

    /// A dora indicator was revealed.
    fn on_flipped(&mut self, _table: &dyn TableView) {}

    /// `who` drew a tile.
    fn on_drawn(&mut self, _table: &dyn TableView, _who: Seat) {}

    /// The focus seat discarded; `spin` is true for the drawn tile.
    fn on_discarded(&mut self, _table: &dyn TableView, _spin: bool) {}

    /// `who` declared riichi; the declaring discard follows.
    fn on_riichi_called(&mut self, _who: Seat) {}

    /// The declaring discard of `who` passed without being won on.
    fn on_riichi_established(&mut self, _who: Seat) {}

    /// `who` formed `bark` (any call or quad).
    fn on_barked(&mut self, _table: &dyn TableView, _who: Seat, _bark: &Meld) {}

    /// The round ended.
    ///
    /// `openers` are the winners (or the declarer of an abortive draw),
    /// `gunner` the seat that dealt in, if any.
    fn on_round_ended(
        &mut self,
        _table: &dyn TableView,
        _result: RoundResult,
        _openers: &[Seat],
        _gunner: Option<Seat>,
        _forms: &[WinForm],
    ) {
    }

    /// Point totals changed.
    fn on_points_changed(&mut self, _table: &dyn TableView) {}

    /// The game ended with final `scores`.
    fn on_table_ended(&mut self, _table: &dyn TableView, _scores: [i32; 4]) {}
}
