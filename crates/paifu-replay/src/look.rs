//! Deterministic reconstruction of a round from its action log.
//!
//! [`Replay::look`] replays a bounded number of turns and returns the
//! resulting [`TableSnap`]. Turns are counted per stage: every draw,
//! call, discard and quad costs one unit of budget, while reactions to
//! a discard (passes and wins) and placeholder out-stages are refunded.

use paifu_core::{Meld, MeldKind, Seat, Tile, TileCount, NUM_SEATS};
use tracing::{debug, trace};

use crate::infer;
use crate::snap::TableSnap;
use crate::types::{ChiiSide, InAct, OutAct, Replay, Round};

/// Live wall size after the deal: 136 tiles, minus the 14-tile dead
/// wall, minus 13 for each seat.
pub const INITIAL_WALL: usize = 70;

impl Replay {
    /// Snapshot of round `round_index` after `turn` units of budget.
    ///
    /// A budget larger than the round needs runs it to the end and
    /// overlays the recorded outcome: forms, result points and closing
    /// indicators. Pass `usize::MAX` for the final state.
    ///
    /// # Panics
    ///
    /// Panics if `round_index` is out of range, or if the log is
    /// inconsistent (a call with no discard to take, a discard of a tile
    /// the hand does not hold, and so on).
    pub fn look(&self, round_index: usize, turn: usize) -> TableSnap {
        assert!(
            round_index < self.rounds.len(),
            "round {round_index} out of range ({} recorded)",
            self.rounds.len()
        );
        let round = &self.rounds[round_index];
        let points = self.start_points(round_index);
        Reconstructor::new(round, points, self.rule.riichi_stake).run(turn)
    }

    /// Final snapshot of round `round_index`.
    pub fn look_final(&self, round_index: usize) -> TableSnap {
        self.look(round_index, usize::MAX)
    }
}

struct Reconstructor<'a> {
    round: &'a Round,
    stake: i32,
    snap: TableSnap,
    hands: [TileCount; NUM_SEATS],
    steps: [usize; NUM_SEATS],
    who: Seat,
    last_discarder: Option<Seat>,
    to_riichi: bool,
    to_flip: bool,
    chankan_context: bool,
    chankan_passed: bool,
}

impl<'a> Reconstructor<'a> {
    fn new(round: &'a Round, points: [i32; NUM_SEATS], stake: i32) -> Self {
        let hands = std::array::from_fn(|i| round.tracks[i].init.iter().copied().collect());
        Self {
            round,
            stake,
            snap: TableSnap::start(round, points, INITIAL_WALL),
            hands,
            steps: [0; NUM_SEATS],
            who: round.dealer,
            last_discarder: None,
            to_riichi: false,
            to_flip: false,
            chankan_context: false,
            chankan_passed: false,
        }
    }

    fn run(mut self, mut budget: usize) -> TableSnap {
        let mut in_stage = true;
        while budget > 0 {
            let round = self.round;
            let w = self.who.index();
            let track = &round.tracks[w];
            let step = self.steps[w];
            if in_stage {
                let Some(&act) = track.ins.get(step) else {
                    if self.chankan_context && !self.chankan_passed {
                        // The quad was robbed: its declarer never draws a
                        // replacement, and the ron walk starts to its right.
                        assert_eq!(
                            self.snap.gunner,
                            Some(self.who),
                            "robbing window opened by another seat"
                        );
                        self.chankan_passed = true;
                        self.who = self.who.right();
                        continue;
                    }
                    break;
                };
                budget -= 1;
                if self.step_in(act) {
                    budget += 1;
                    continue;
                }
            } else {
                let Some(&act) = track.outs.get(step) else {
                    break;
                };
                budget -= 1;
                if self.step_out(act) {
                    budget += 1;
                }
            }
            in_stage = !in_stage;
        }
        self.finish(budget)
    }

    /// Apply one incoming action. Returns true for reactions, which stay
    /// in the in-stage and cost no budget.
    fn step_in(&mut self, act: InAct) -> bool {
        let who = self.who;
        trace!(seat = who.index(), ?act, "in");
        if !act.is_reaction() {
            self.chankan_context = false;
            self.finalize_riichi();
        }
        match act {
            InAct::Draw(tile) => {
                assert!(
                    self.snap.drawn.is_none(),
                    "{who} draws while a drawn tile is still held"
                );
                assert!(self.snap.wall_remain > 0, "{who} draws from an empty wall");
                self.snap.drawn = Some((who, tile));
                self.snap.wall_remain -= 1;
            }
            InAct::Chii { side, red_five } => self.look_chii(side, red_five),
            InAct::Pon { red_fives } => self.look_pon(red_fives),
            InAct::Daiminkan => {
                self.look_daiminkan();
                self.to_flip = true;
            }
            InAct::Ron => {
                self.snap.end_of_round = true;
                self.snap.openers.push(who);
                let gunner = self
                    .snap
                    .gunner
                    .unwrap_or_else(|| panic!("{who} wins by ron with no gunner"));
                let cannon = if self.chankan_context {
                    self.snap[gunner].melds.last().and_then(Meld::added)
                } else {
                    self.snap[gunner].river.last().copied()
                };
                self.snap.cannon = Some(
                    cannon.unwrap_or_else(|| panic!("{who} wins by ron on nothing from {gunner}")),
                );
                self.pass();
                return true;
            }
            InAct::SkipIn => {
                self.pass();
                return true;
            }
        }
        false
    }

    /// Apply one outgoing action. Returns true for placeholders, which
    /// cost no budget.
    fn step_out(&mut self, act: OutAct) -> bool {
        let who = self.who;
        trace!(seat = who.index(), ?act, "out");
        self.steps[who.index()] += 1;
        self.snap.gunner = if act == OutAct::Tsumo { None } else { Some(who) };
        match act {
            OutAct::Discard(tile) => self.discard_from_hand(tile),
            OutAct::DiscardDrawn => self.discard_drawn(),
            OutAct::RiichiDiscard(tile) => {
                self.declare_riichi();
                self.discard_from_hand(tile);
            }
            OutAct::RiichiDiscardDrawn => {
                self.declare_riichi();
                self.discard_drawn();
            }
            OutAct::Ankan(kind) => {
                let held = self.snap.drawn_by(who);
                let quad = infer::ankan_tiles(kind, &self.hands[who.index()], held);
                let from_hand = if quad.uses_drawn { &quad.tiles[..3] } else { &quad.tiles[..] };
                for &tile in from_hand {
                    self.hands[who.index()].remove(tile);
                }
                if quad.uses_drawn {
                    self.snap.drawn = None;
                } else {
                    self.merge_drawn(who);
                }
                self.snap[who].melds.push(Meld::ankan(quad.tiles));
                self.open_chankan();
                self.check_flip();
                self.flip();
            }
            OutAct::Kakan(tile) => {
                assert_eq!(
                    self.snap.drawn.map(|(holder, _)| holder),
                    Some(who),
                    "{who} adds to a pon without a drawn tile"
                );
                if self.snap.drawn_by(who) == Some(tile) {
                    self.snap.drawn = None;
                } else {
                    self.hands[who.index()].remove(tile);
                    self.merge_drawn(who);
                }
                let pon = self.snap[who]
                    .melds
                    .iter_mut()
                    .find(|m| m.kind() == MeldKind::Pon && m.tiles()[0].kind() == tile.kind())
                    .unwrap_or_else(|| panic!("{who} adds {tile} to a pon it does not have"));
                pon.kakan(tile);
                self.open_chankan();
                self.check_flip();
                self.to_flip = true;
            }
            OutAct::Ryuukyoku => self.snap.end_of_round = true,
            OutAct::Tsumo => {
                self.snap.end_of_round = true;
                self.snap.openers.push(who);
            }
            OutAct::SkipOut => return true,
        }
        false
    }

    // ── Stage helpers ───────────────────────────────────────────

    /// Leave `who`'s current turn untaken and move to the next seat.
    fn pass(&mut self) {
        self.steps[self.who.index()] += 1;
        self.who = self.who.right();
    }

    fn finalize_riichi(&mut self) {
        if !self.to_riichi {
            return;
        }
        self.to_riichi = false;
        let declarer = self
            .last_discarder
            .unwrap_or_else(|| panic!("riichi pending without a declaring discard"));
        self.snap[declarer].riichi_bar = true;
        self.snap.points[declarer.index()] -= self.stake;
    }

    fn declare_riichi(&mut self) {
        let who = self.who;
        self.to_riichi = true;
        self.snap[who].riichi_pos = Some(self.snap[who].river.len());
    }

    fn discard_from_hand(&mut self, tile: Tile) {
        let who = self.who;
        self.hands[who.index()].remove(tile);
        self.merge_drawn(who);
        self.snap[who].river.push(tile);
        self.after_discard();
    }

    fn discard_drawn(&mut self) {
        let who = self.who;
        let tile = self
            .snap
            .drawn_by(who)
            .unwrap_or_else(|| panic!("{who} discards a drawn tile it does not hold"));
        self.snap.drawn = None;
        self.snap[who].river.push(tile);
        self.after_discard();
    }

    fn after_discard(&mut self) {
        self.last_discarder = Some(self.who);
        self.check_flip();
        self.who = self.who.right();
    }

    /// Move a drawn tile held by `who` into the closed hand.
    fn merge_drawn(&mut self, who: Seat) {
        if let Some(tile) = self.snap.drawn_by(who) {
            self.hands[who.index()].add(tile);
            self.snap.drawn = None;
        }
    }

    fn open_chankan(&mut self) {
        self.chankan_context = true;
        self.chankan_passed = false;
    }

    fn check_flip(&mut self) {
        if self.to_flip && self.snap.drids.len() < self.round.drids.len() {
            self.flip();
            self.to_flip = false;
        }
    }

    fn flip(&mut self) {
        if let Some(&next) = self.round.drids.get(self.snap.drids.len()) {
            self.snap.drids.push(next);
        }
    }

    // ── Calls ───────────────────────────────────────────────────

    /// The discarder and the tile a call takes from its river.
    fn take_called(&mut self) -> (Seat, Tile) {
        let who = self.who;
        let discarder = self
            .last_discarder
            .unwrap_or_else(|| panic!("{who} calls before any discard"));
        let called = self.snap[discarder]
            .river
            .pop()
            .unwrap_or_else(|| panic!("{who} calls from {discarder}'s empty river"));
        (discarder, called)
    }

    fn look_chii(&mut self, side: ChiiSide, red_five: bool) {
        let who = self.who;
        let (discarder, called) = self.take_called();
        assert_eq!(discarder, who.left(), "{who} calls chii from {discarder}");
        let others = infer::chii_others(called, side, red_five);
        for tile in others {
            self.hands[who.index()].remove(tile);
        }
        self.snap[who].melds.push(Meld::chii(called, others, side.lay()));
    }

    fn look_pon(&mut self, red_fives: u8) {
        let who = self.who;
        let (discarder, called) = self.take_called();
        let others = infer::pon_others(called, red_fives);
        for tile in others {
            self.hands[who.index()].remove(tile);
        }
        let lay = who.looks_at(discarder);
        self.snap[who].melds.push(Meld::pon(called, others, lay));
    }

    fn look_daiminkan(&mut self) {
        let who = self.who;
        let (discarder, called) = self.take_called();
        let others = infer::daiminkan_others(called, &self.hands[who.index()]);
        for tile in others {
            self.hands[who.index()].remove(tile);
        }
        let lay = who.looks_at(discarder);
        self.snap[who].melds.push(Meld::daiminkan(called, others, lay));
    }

    // ── Output ──────────────────────────────────────────────────

    fn finish(mut self, budget: usize) -> TableSnap {
        for seat in Seat::ALL {
            self.snap[seat].hand = self.hands[seat.index()].tiles();
        }
        if budget > 0 && !self.snap.end_of_round {
            debug!(
                round = self.round.round,
                extra_round = self.round.extra_round,
                "log exhausted before the budget, treating as an abort"
            );
            self.snap.end_of_round = true;
        }
        if self.snap.end_of_round {
            self.snap.forms = self.round.forms.clone();
            self.snap.points = self.round.result_points;
            self.snap.urids = self.round.urids.clone();
        }
        self.snap
    }
}
