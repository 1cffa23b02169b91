//! Live-table observer that builds a [`Replay`].
//!
//! The [`Recorder`] receives table events in order and appends compact
//! entries to the current round. It keeps a single piece of transient
//! state: the seat whose riichi declaration is waiting for its
//! discard.

use paifu_core::{
    Meld, MeldKind, RoundResult, Rule, Seat, TableObserver, TableView, WinForm, NUM_SEATS,
};
use tracing::{debug, trace};

use crate::types::{ChiiSide, InAct, OutAct, Replay, Round, HAND_SIZE};

/// Builds a [`Replay`] from live table events.
///
/// # Examples
///
/// ```
/// use paifu_core::{Rule, Seat, TableObserver};
/// use paifu_replay::Recorder;
///
/// let mut recorder = Recorder::new(Rule::default());
/// recorder.on_round_started(0, 0, Seat::new(0).unwrap(), false, 0, 7);
/// assert_eq!(recorder.replay().rounds.len(), 1);
/// ```
#[derive(Debug)]
pub struct Recorder {
    replay: Replay,
    pending_riichi: Option<Seat>,
}

impl Recorder {
    /// An empty recorder. The rule is replaced by the table's own rule
    /// once the table starts.
    pub fn new(rule: Rule) -> Self {
        Self {
            replay: Replay::new(rule),
            pending_riichi: None,
        }
    }

    /// The replay recorded so far.
    pub fn replay(&self) -> &Replay {
        &self.replay
    }

    /// Consume the recorder, returning the replay.
    pub fn into_replay(self) -> Replay {
        self.replay
    }

    fn current(&mut self) -> &mut Round {
        match self.replay.rounds.last_mut() {
            Some(round) => round,
            None => panic!("table event received before any round started"),
        }
    }

    fn push_in(&mut self, who: Seat, act: InAct) {
        trace!(seat = who.index(), ?act, "record in");
        self.current().track_mut(who).ins.push(act);
    }

    fn push_out(&mut self, who: Seat, act: OutAct) {
        trace!(seat = who.index(), ?act, "record out");
        self.current().track_mut(who).outs.push(act);
    }

    /// Record a paired pass for every seat strictly between `from`
    /// (exclusive, walking rightwards) and `to`.
    fn add_skip(&mut self, from: Seat, to: Seat) {
        let mut seat = from.right();
        while seat != to {
            self.push_in(seat, InAct::SkipIn);
            self.push_out(seat, OutAct::SkipOut);
            seat = seat.right();
        }
    }
}

impl TableObserver for Recorder {
    fn on_table_started(&mut self, table: &dyn TableView, seed: u64) {
        let rule = table.rule().clone();
        self.replay = Replay::new(rule);
        self.replay.seed = seed;
        self.replay.init_points = table.points();
        for seat in Seat::ALL {
            self.replay.girls[seat.index()] = table.girl_id(seat);
        }
        self.pending_riichi = None;
        debug!(seed, "table started");
    }

    fn on_round_started(
        &mut self,
        round: u8,
        extra_round: u8,
        dealer: Seat,
        all_last: bool,
        deposit: u32,
        seed: u64,
    ) {
        debug!(round, extra_round, dealer = dealer.index(), deposit, "round started");
        self.replay.rounds.push(Round::new(
            round,
            extra_round,
            dealer,
            all_last,
            deposit,
            seed,
        ));
        self.pending_riichi = None;
    }

    fn on_diced(&mut self, _table: &dyn TableView, die1: u8, die2: u8) {
        if let Some(round) = self.replay.rounds.last_mut() {
            round.die1 = die1;
            round.die2 = die2;
        }
    }

    fn on_dealt(&mut self, table: &dyn TableView) {
        let points = table.points();
        let round = self.current();
        for seat in Seat::ALL {
            let hand = table.closed_hand(seat);
            assert_eq!(hand.len(), HAND_SIZE, "{seat} dealt {} tiles", hand.len());
            round.track_mut(seat).init = hand;
        }
        round.result_points = points;
    }

    fn on_flipped(&mut self, table: &dyn TableView) {
        let indicator = table.dora_indicators().last().copied();
        let Some(indicator) = indicator else {
            panic!("flip reported with no indicator revealed");
        };
        self.current().drids.push(indicator);
    }

    fn on_drawn(&mut self, table: &dyn TableView, who: Seat) {
        let Some(tile) = table.drawn(who) else {
            panic!("{who} reported a draw without holding a tile");
        };
        self.push_in(who, InAct::Draw(tile));
    }

    fn on_discarded(&mut self, table: &dyn TableView, spin: bool) {
        let who = table.focus();
        let riichi = match self.pending_riichi.take() {
            Some(declarer) => {
                assert_eq!(declarer, who, "riichi declared by {declarer}, discarded by {who}");
                true
            }
            None => false,
        };
        self.push_out(who, OutAct::discard(table.focus_tile(), spin, riichi));
    }

    fn on_riichi_called(&mut self, who: Seat) {
        self.pending_riichi = Some(who);
    }

    fn on_barked(&mut self, table: &dyn TableView, who: Seat, bark: &Meld) {
        match bark.kind() {
            MeldKind::Chii | MeldKind::Pon | MeldKind::Daiminkan => {
                let discarder = table.focus();
                self.add_skip(discarder, who);
                let lay = bark
                    .lay()
                    .unwrap_or_else(|| panic!("called meld of {who} has no called slot"));
                let reds = bark
                    .tiles()
                    .iter()
                    .enumerate()
                    .filter(|&(i, t)| i != lay && t.is_red())
                    .count();
                let act = match bark.kind() {
                    MeldKind::Chii => {
                        let side = ChiiSide::from_lay(lay)
                            .unwrap_or_else(|| panic!("chii slot {lay} out of range"));
                        InAct::Chii {
                            side,
                            red_five: reds > 0,
                        }
                    }
                    MeldKind::Pon => InAct::Pon {
                        red_fives: reds as u8,
                    },
                    _ => InAct::Daiminkan,
                };
                self.push_in(who, act);
                if bark.kind() == MeldKind::Daiminkan {
                    self.push_out(who, OutAct::SkipOut);
                }
            }
            MeldKind::Ankan => self.push_out(who, OutAct::Ankan(bark.tiles()[0].kind())),
            MeldKind::Kakan => {
                let added = bark
                    .added()
                    .unwrap_or_else(|| panic!("kakan of {who} has no fourth tile"));
                self.push_out(who, OutAct::Kakan(added));
            }
        }
    }

    fn on_round_ended(
        &mut self,
        table: &dyn TableView,
        result: RoundResult,
        openers: &[Seat],
        gunner: Option<Seat>,
        forms: &[WinForm],
    ) {
        debug!(%result, winners = openers.len(), "round ended");
        let urids = table.ura_indicators().to_vec();
        let round = self.current();
        round.result = result;
        round.urids = urids;
        round.forms.extend_from_slice(forms);
        match result {
            RoundResult::Tsumo => {
                let winner = openers
                    .first()
                    .copied()
                    .unwrap_or_else(|| panic!("tsumo without a winner"));
                self.push_out(winner, OutAct::Tsumo);
            }
            RoundResult::NineTerminals => {
                let declarer = openers
                    .first()
                    .copied()
                    .unwrap_or_else(|| panic!("abortive draw without a declarer"));
                self.push_out(declarer, OutAct::Ryuukyoku);
            }
            RoundResult::Ron | RoundResult::TripleRon => {
                let gunner = gunner.unwrap_or_else(|| panic!("ron without a gunner"));
                let mut seat = gunner.right();
                while seat != gunner {
                    if openers.contains(&seat) {
                        self.push_in(seat, InAct::Ron);
                    } else {
                        self.push_in(seat, InAct::SkipIn);
                        self.push_out(seat, OutAct::SkipOut);
                    }
                    seat = seat.right();
                }
            }
            _ => {}
        }
        self.pending_riichi = None;
    }

    fn on_points_changed(&mut self, table: &dyn TableView) {
        if let Some(round) = self.replay.rounds.last_mut() {
            round.result_points = table.points();
        }
    }

    fn on_table_ended(&mut self, _table: &dyn TableView, scores: [i32; NUM_SEATS]) {
        debug!(?scores, "table ended");
        self.replay.scores = scores;
    }
}
