//! Table snapshots produced by the reconstructor.

use std::ops::{Index, IndexMut};

use paifu_core::{Meld, RoundResult, Seat, Tile, WinForm, NUM_SEATS};

use crate::types::Round;

/// What one seat shows at a point in the round.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeatSnap {
    /// Closed tiles, sorted, excluding any held drawn tile.
    pub hand: Vec<Tile>,
    /// Discards still in the river (called tiles are removed).
    pub river: Vec<Tile>,
    /// Declared groups in declaration order.
    pub melds: Vec<Meld>,
    /// True once a riichi declaration has been paid for.
    pub riichi_bar: bool,
    /// River index of the declaring discard.
    pub riichi_pos: Option<usize>,
}

/// The full visible state of a round after some number of turns.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableSnap {
    /// Round wind and number.
    pub round: u8,
    /// Repeat counter.
    pub extra_round: u8,
    /// Dealer seat.
    pub dealer: Seat,
    /// True in the final round of the game.
    pub all_last: bool,
    /// Riichi sticks carried in.
    pub deposit: u32,
    /// Wall generator state.
    pub seed: u64,
    /// First die.
    pub die1: u8,
    /// Second die.
    pub die2: u8,
    /// How the round ended (meaningful once `end_of_round` is set).
    pub result: RoundResult,
    /// Point totals.
    pub points: [i32; NUM_SEATS],
    /// Per-seat state.
    pub seats: [SeatSnap; NUM_SEATS],
    /// The held drawn tile and its holder.
    pub drawn: Option<(Seat, Tile)>,
    /// Tiles left in the live wall.
    pub wall_remain: usize,
    /// Dora indicators revealed so far.
    pub drids: Vec<Tile>,
    /// Closing indicators, filled once the round has ended.
    pub urids: Vec<Tile>,
    /// True when the round is over.
    pub end_of_round: bool,
    /// Winners found during the walk, in walk order.
    pub openers: Vec<Seat>,
    /// The seat whose last out-stage action is under consideration.
    pub gunner: Option<Seat>,
    /// The tile a ron claimed.
    pub cannon: Option<Tile>,
    /// Scoring records, filled once the round has ended.
    pub forms: Vec<WinForm>,
}

impl TableSnap {
    pub(crate) fn start(round: &Round, points: [i32; NUM_SEATS], wall_remain: usize) -> Self {
        Self {
            round: round.round,
            extra_round: round.extra_round,
            dealer: round.dealer,
            all_last: round.all_last,
            deposit: round.deposit,
            seed: round.seed,
            die1: round.die1,
            die2: round.die2,
            result: round.result,
            points,
            seats: Default::default(),
            drawn: None,
            wall_remain,
            drids: round.drids.first().copied().into_iter().collect(),
            urids: Vec::new(),
            end_of_round: false,
            openers: Vec::new(),
            gunner: None,
            cannon: None,
            forms: Vec::new(),
        }
    }

    /// The drawn tile held by `seat`, if any.
    pub fn drawn_by(&self, seat: Seat) -> Option<Tile> {
        match self.drawn {
            Some((holder, tile)) if holder == seat => Some(tile),
            _ => None,
        }
    }

    /// Every tile `seat` has in front of it: closed hand, held drawn
    /// tile, river, and meld tiles.
    pub fn visible_tiles(&self, seat: Seat) -> impl Iterator<Item = Tile> + '_ {
        let s = &self[seat];
        s.hand
            .iter()
            .chain(s.river.iter())
            .copied()
            .chain(s.melds.iter().flat_map(|m| m.tiles().iter().copied()))
            .chain(self.drawn_by(seat))
    }
}

impl Index<Seat> for TableSnap {
    type Output = SeatSnap;

    fn index(&self, seat: Seat) -> &SeatSnap {
        &self.seats[seat.index()]
    }
}

impl IndexMut<Seat> for TableSnap {
    fn index_mut(&mut self, seat: Seat) -> &mut SeatSnap {
        &mut self.seats[seat.index()]
    }
}
