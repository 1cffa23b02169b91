//! Data types of the persisted action log.

use paifu_core::{Rule, RoundResult, Seat, Tile, TileKind, WinForm, NUM_SEATS};

/// Which tile of a chii run was taken from the left seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChiiSide {
    /// The called tile is the lowest of the run.
    Left,
    /// The called tile is the middle of the run.
    Middle,
    /// The called tile is the highest of the run.
    Right,
}

impl ChiiSide {
    /// Slot of the called tile in the run.
    pub fn lay(self) -> usize {
        match self {
            Self::Left => 0,
            Self::Middle => 1,
            Self::Right => 2,
        }
    }

    /// Inverse of [`ChiiSide::lay`].
    pub fn from_lay(lay: usize) -> Option<Self> {
        match lay {
            0 => Some(Self::Left),
            1 => Some(Self::Middle),
            2 => Some(Self::Right),
            _ => None,
        }
    }
}

/// An incoming event on one seat's track.
///
/// Red-five identity is stored only where it cannot be re-derived:
/// drawn tiles carry it in full, calls carry a small hint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InAct {
    /// Drew `tile` from the wall (or the dead wall after a quad).
    Draw(Tile),
    /// Called a run; `red_five` is set when a non-called tile is red.
    Chii {
        /// Position of the called tile within the run.
        side: ChiiSide,
        /// Whether one of the two hand tiles is a red five.
        red_five: bool,
    },
    /// Called a triplet; `red_fives` hand tiles (0-2) are red.
    Pon {
        /// Red fives among the two hand tiles.
        red_fives: u8,
    },
    /// Called an open quad.
    Daiminkan,
    /// Won on the previous seat's discard or on a robbed quad.
    Ron,
    /// Passed over by a call or a win elsewhere.
    SkipIn,
}

impl InAct {
    /// True for entries that react to the previous discard rather than
    /// take a turn: they cost no budget and move straight to the next seat.
    pub fn is_reaction(self) -> bool {
        matches!(self, InAct::Ron | InAct::SkipIn)
    }
}

/// An outgoing event on one seat's track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutAct {
    /// Discarded `tile` from the closed hand.
    Discard(Tile),
    /// Discarded the tile just drawn.
    DiscardDrawn,
    /// Declared riichi discarding `tile` from the closed hand.
    RiichiDiscard(Tile),
    /// Declared riichi discarding the tile just drawn.
    RiichiDiscardDrawn,
    /// Declared a concealed quad of this kind.
    Ankan(TileKind),
    /// Added this tile to an existing pon.
    Kakan(Tile),
    /// Declared an abortive draw.
    Ryuukyoku,
    /// Won by self-draw.
    Tsumo,
    /// Placeholder paired with a skip or an open quad.
    SkipOut,
}

impl OutAct {
    /// Classify a discard by whether it was the drawn tile and whether it
    /// declares riichi. `tile` is ignored for drawn-tile discards.
    pub fn discard(tile: Tile, spin: bool, riichi: bool) -> Self {
        match (spin, riichi) {
            (true, true) => OutAct::RiichiDiscardDrawn,
            (true, false) => OutAct::DiscardDrawn,
            (false, true) => OutAct::RiichiDiscard(tile),
            (false, false) => OutAct::Discard(tile),
        }
    }

    /// True for the four discard variants.
    pub fn is_discard(self) -> bool {
        matches!(
            self,
            OutAct::Discard(_)
                | OutAct::DiscardDrawn
                | OutAct::RiichiDiscard(_)
                | OutAct::RiichiDiscardDrawn
        )
    }
}

/// Tiles in each seat's starting hand.
pub const HAND_SIZE: usize = 13;

/// One seat's record for a round.
///
/// `ins[i]` and `outs[i]` form the seat's i-th turn: every entry that
/// takes no turn of its own is paired with a placeholder on the other
/// side so both sequences advance together. A winning `Ron` has no
/// pair: nothing follows it.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Track {
    /// The [`HAND_SIZE`] starting tiles.
    pub init: Vec<Tile>,
    /// Incoming events in order.
    pub ins: Vec<InAct>,
    /// Outgoing events in order.
    pub outs: Vec<OutAct>,
}

/// The compact record of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Round {
    /// Round wind and number (0 = East 1).
    pub round: u8,
    /// Repeat counter.
    pub extra_round: u8,
    /// Dealer seat.
    pub dealer: Seat,
    /// True in the final round of the game.
    pub all_last: bool,
    /// Riichi sticks carried over from earlier rounds.
    pub deposit: u32,
    /// Wall generator state.
    pub seed: u64,
    /// First die.
    pub die1: u8,
    /// Second die.
    pub die2: u8,
    /// Every dora indicator revealed during the round, in reveal order.
    pub drids: Vec<Tile>,
    /// Closing indicators revealed at the end.
    pub urids: Vec<Tile>,
    /// Per-seat action tracks.
    pub tracks: [Track; NUM_SEATS],
    /// How the round ended.
    pub result: RoundResult,
    /// Scoring record of each winning hand.
    pub forms: Vec<WinForm>,
    /// Point totals after the round.
    pub result_points: [i32; NUM_SEATS],
}

impl Round {
    /// An empty round as announced by the live table.
    pub fn new(
        round: u8,
        extra_round: u8,
        dealer: Seat,
        all_last: bool,
        deposit: u32,
        seed: u64,
    ) -> Self {
        Self {
            round,
            extra_round,
            dealer,
            all_last,
            deposit,
            seed,
            die1: 0,
            die2: 0,
            drids: Vec::new(),
            urids: Vec::new(),
            tracks: Default::default(),
            result: RoundResult::default(),
            forms: Vec::new(),
            result_points: [0; NUM_SEATS],
        }
    }

    /// The track of `seat`.
    pub fn track(&self, seat: Seat) -> &Track {
        &self.tracks[seat.index()]
    }

    /// Mutable track of `seat`.
    pub fn track_mut(&mut self, seat: Seat) -> &mut Track {
        &mut self.tracks[seat.index()]
    }

    /// Budget units needed to replay every turn-taking entry.
    ///
    /// Looking at this many turns reproduces the last recorded action;
    /// one more turn reaches the end of the round.
    pub fn turns(&self) -> usize {
        self.tracks
            .iter()
            .map(|t| {
                let ins = t.ins.iter().filter(|a| !a.is_reaction()).count();
                let outs = t.outs.iter().filter(|a| **a != OutAct::SkipOut).count();
                ins + outs
            })
            .sum()
    }
}

/// Replay-level fields known before the first round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayHeader {
    /// Character id per seat.
    pub girls: [u32; NUM_SEATS],
    /// Points per seat at the start of the game.
    pub init_points: [i32; NUM_SEATS],
    /// Table-level generator seed.
    pub seed: u64,
    /// Rule the game was played under.
    pub rule: Rule,
}

/// A whole recorded game.
///
/// Append-only while the game is live, immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Replay {
    /// Character id per seat.
    pub girls: [u32; NUM_SEATS],
    /// Points per seat at the start of the game.
    pub init_points: [i32; NUM_SEATS],
    /// Final game scores, once the game has ended.
    pub scores: [i32; NUM_SEATS],
    /// Rule the game was played under.
    pub rule: Rule,
    /// Table-level generator seed.
    pub seed: u64,
    /// Rounds in play order.
    pub rounds: Vec<Round>,
}

impl Replay {
    /// An empty replay under `rule`, every seat starting at its initial points.
    pub fn new(rule: Rule) -> Self {
        Self {
            girls: [0; NUM_SEATS],
            init_points: [rule.initial_points; NUM_SEATS],
            scores: [0; NUM_SEATS],
            rule,
            seed: 0,
            rounds: Vec::new(),
        }
    }

    /// Rebuild a replay from a decoded header.
    pub fn from_header(header: ReplayHeader) -> Self {
        Self {
            girls: header.girls,
            init_points: header.init_points,
            scores: [0; NUM_SEATS],
            rule: header.rule,
            seed: header.seed,
            rounds: Vec::new(),
        }
    }

    /// The header fields of this replay.
    pub fn header(&self) -> ReplayHeader {
        ReplayHeader {
            girls: self.girls,
            init_points: self.init_points,
            seed: self.seed,
            rule: self.rule.clone(),
        }
    }

    /// Budget units needed to reach the last action of round `round_index`.
    pub fn round_len(&self, round_index: usize) -> usize {
        self.rounds[round_index].turns()
    }

    /// Point totals at the start of round `round_index`.
    pub fn start_points(&self, round_index: usize) -> [i32; NUM_SEATS] {
        match round_index.checked_sub(1) {
            None => self.init_points,
            Some(prev) => self.rounds[prev].result_points,
        }
    }
}

/// One unit of the persisted stream after the header.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record {
    /// A completed round.
    Round(Round),
    /// The game ended with these final scores.
    End {
        /// Final score per seat.
        scores: [i32; NUM_SEATS],
    },
}

// ── Tag constants ───────────────────────────────────────────────

/// Record tag for a complete round.
pub const RECORD_ROUND: u8 = 1;
/// Record tag for the end-of-game scores.
pub const RECORD_END: u8 = 2;

/// Tag for [`InAct::Draw`].
pub const IN_DRAW: u8 = 0;
/// Tag for [`InAct::Chii`] with [`ChiiSide::Left`].
pub const IN_CHII_LEFT: u8 = 1;
/// Tag for [`InAct::Chii`] with [`ChiiSide::Middle`].
pub const IN_CHII_MIDDLE: u8 = 2;
/// Tag for [`InAct::Chii`] with [`ChiiSide::Right`].
pub const IN_CHII_RIGHT: u8 = 3;
/// Tag for [`InAct::Pon`].
pub const IN_PON: u8 = 4;
/// Tag for [`InAct::Daiminkan`].
pub const IN_DAIMINKAN: u8 = 5;
/// Tag for [`InAct::Ron`].
pub const IN_RON: u8 = 6;
/// Tag for [`InAct::SkipIn`].
pub const IN_SKIP: u8 = 7;

/// Tag for [`OutAct::Discard`].
pub const OUT_DISCARD: u8 = 0;
/// Tag for [`OutAct::DiscardDrawn`].
pub const OUT_DISCARD_DRAWN: u8 = 1;
/// Tag for [`OutAct::RiichiDiscard`].
pub const OUT_RIICHI_DISCARD: u8 = 2;
/// Tag for [`OutAct::RiichiDiscardDrawn`].
pub const OUT_RIICHI_DISCARD_DRAWN: u8 = 3;
/// Tag for [`OutAct::Ankan`].
pub const OUT_ANKAN: u8 = 4;
/// Tag for [`OutAct::Kakan`].
pub const OUT_KAKAN: u8 = 5;
/// Tag for [`OutAct::Ryuukyoku`].
pub const OUT_RYUUKYOKU: u8 = 6;
/// Tag for [`OutAct::Tsumo`].
pub const OUT_TSUMO: u8 = 7;
/// Tag for [`OutAct::SkipOut`].
pub const OUT_SKIP: u8 = 8;
