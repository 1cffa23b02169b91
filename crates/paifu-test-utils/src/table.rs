//! A seeded, simplified live table.
//!
//! [`MockTable`] plays whole games with random but legal-looking moves
//! and reports every event to a [`TableObserver`]. It knows nothing of
//! hand values: wins are rolled with small probabilities, points move
//! in flat amounts, and scoring labels are placeholders. What it gets
//! right is the event protocol and the visible tile bookkeeping, which
//! is what a recorder and reconstructor need to be checked against.

use paifu_core::{
    Meld, MeldKind, RoundResult, Rule, Seat, TableObserver, TableView, Tile, TileCount, TileKind,
    WinForm, NUM_SEATS,
};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Tiles in a full set.
const FULL_SET: usize = 136;
/// Tiles set aside as the dead wall.
const DEAD_WALL: usize = 14;
/// First dora indicator slot in the dead wall.
const DORA_BASE: usize = 4;
/// First closing indicator slot in the dead wall.
const URA_BASE: usize = 9;
/// Points moved by a ron, per winner.
const RON_VALUE: i32 = 2000;
/// Points each other seat pays on a self-draw.
const TSUMO_SHARE: i32 = 1000;

/// Probabilities and sizes driving a [`MockTable`].
#[derive(Clone, Debug)]
pub struct MockConfig {
    /// Seeds both the table and every round's wall.
    pub seed: u64,
    pub rule: Rule,
    /// Rounds in one game.
    pub rounds: usize,
    /// Chance of taking an available pon or chii.
    pub call_rate: f64,
    /// Chance of declaring an available quad.
    pub kan_rate: f64,
    /// Chance of declaring riichi when allowed.
    pub riichi_rate: f64,
    /// Chance of winning on each draw.
    pub tsumo_rate: f64,
    /// Chance of each other seat winning on each discard.
    pub ron_rate: f64,
    /// Chance of a quad being robbed.
    pub chankan_rate: f64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            rule: Rule::default(),
            rounds: 4,
            call_rate: 0.3,
            kan_rate: 0.6,
            riichi_rate: 0.05,
            tsumo_rate: 0.01,
            ron_rate: 0.004,
            chankan_rate: 0.1,
        }
    }
}

enum Reaction {
    Pass,
    Called(Seat),
    Ended(RoundResult),
}

/// A simplified live table implementing [`TableView`].
pub struct MockTable {
    config: MockConfig,
    rng: ChaCha8Rng,
    girls: [u32; NUM_SEATS],
    points: [i32; NUM_SEATS],
    deposit: u32,
    dealer: Seat,
    rounds_played: usize,
    wall: Vec<Tile>,
    dead: Vec<Tile>,
    hands: [TileCount; NUM_SEATS],
    drawn: [Option<Tile>; NUM_SEATS],
    rivers: [Vec<Tile>; NUM_SEATS],
    melds: [Vec<Meld>; NUM_SEATS],
    riichi: [bool; NUM_SEATS],
    riichi_declared: Option<Seat>,
    drids: Vec<Tile>,
    urids: Vec<Tile>,
    focus: Seat,
    focus_tile: Option<Tile>,
    kans: usize,
    pending_flip: bool,
}

/// Every tile of a set under `rule`, red fives included.
pub fn full_set(rule: &Rule) -> Vec<Tile> {
    let mut tiles = Vec::with_capacity(FULL_SET);
    for kind in TileKind::all() {
        let reds = if kind.has_red() {
            rule.red_fives_in(kind.suit())
        } else {
            0
        };
        for copy in 0..4u8 {
            let tile = Tile::new(kind);
            tiles.push(if copy < reds { tile.to_red() } else { tile });
        }
    }
    tiles
}

impl MockTable {
    pub fn new(config: MockConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let points = [config.rule.initial_points; NUM_SEATS];
        Self {
            config,
            rng,
            girls: [0; NUM_SEATS],
            points,
            deposit: 0,
            dealer: Seat::ALL[0],
            rounds_played: 0,
            wall: Vec::new(),
            dead: Vec::new(),
            hands: Default::default(),
            drawn: [None; NUM_SEATS],
            rivers: Default::default(),
            melds: Default::default(),
            riichi: [false; NUM_SEATS],
            riichi_declared: None,
            drids: Vec::new(),
            urids: Vec::new(),
            focus: Seat::ALL[0],
            focus_tile: None,
            kans: 0,
            pending_flip: false,
        }
    }

    /// Play a whole game: start, every configured round, finish.
    pub fn play_game(&mut self, obs: &mut dyn TableObserver) {
        self.start(obs);
        for _ in 0..self.config.rounds {
            self.play_round(obs);
        }
        self.finish(obs);
    }

    /// Seat the players and announce the table.
    pub fn start(&mut self, obs: &mut dyn TableObserver) {
        for girl in &mut self.girls {
            *girl = self.rng.gen_range(1..1000);
        }
        self.points = [self.config.rule.initial_points; NUM_SEATS];
        obs.on_table_started(self, self.config.seed);
    }

    /// Play one round to its end. The table keeps its end-of-round
    /// state until the next round starts.
    pub fn play_round(&mut self, obs: &mut dyn TableObserver) -> RoundResult {
        let round = self.rounds_played as u8;
        let dealer = self.dealer;
        let all_last = self.rounds_played + 1 >= self.config.rounds;
        let round_seed: u64 = self.rng.gen();
        self.reset_round(round_seed, dealer);

        obs.on_round_started(round, 0, dealer, all_last, self.deposit, round_seed);
        let die1 = self.rng.gen_range(1..=6);
        let die2 = self.rng.gen_range(1..=6);
        obs.on_diced(self, die1, die2);
        self.deal(dealer);
        obs.on_dealt(self);
        self.flip(obs);

        let result = self.run_round(obs, dealer);
        self.rounds_played += 1;
        self.dealer = dealer.right();
        result
    }

    /// Announce final scores: points relative to the start, in thousands.
    pub fn finish(&mut self, obs: &mut dyn TableObserver) {
        let base = self.config.rule.initial_points;
        let scores = self.points.map(|p| (p - base) / 1000);
        obs.on_table_ended(self, scores);
    }

    /// Tiles left in the live wall.
    pub fn wall_remain(&self) -> usize {
        self.wall.len()
    }

    /// True if `seat` has an established riichi.
    pub fn in_riichi(&self, seat: Seat) -> bool {
        self.riichi[seat.index()]
    }

    // ── Round flow ──────────────────────────────────────────────

    fn reset_round(&mut self, seed: u64, dealer: Seat) {
        let mut tiles = full_set(&self.config.rule);
        tiles.shuffle(&mut ChaCha8Rng::seed_from_u64(seed));
        self.dead = tiles.split_off(FULL_SET - DEAD_WALL);
        self.wall = tiles;
        self.hands = Default::default();
        self.drawn = [None; NUM_SEATS];
        self.rivers = Default::default();
        self.melds = Default::default();
        self.riichi = [false; NUM_SEATS];
        self.riichi_declared = None;
        self.drids.clear();
        self.urids.clear();
        self.focus = dealer;
        self.focus_tile = None;
        self.kans = 0;
        self.pending_flip = false;
    }

    fn deal(&mut self, dealer: Seat) {
        let mut seat = dealer;
        for _ in 0..NUM_SEATS {
            for _ in 0..13 {
                let tile = self.wall.pop().expect("wall too small to deal");
                self.hands[seat.index()].add(tile);
            }
            seat = seat.right();
        }
    }

    fn run_round(&mut self, obs: &mut dyn TableObserver, dealer: Seat) -> RoundResult {
        let mut who = dealer;
        let mut need_draw = true;
        loop {
            if need_draw {
                if self.wall.is_empty() {
                    return self.end_round(obs, RoundResult::Exhausted, &[], None);
                }
                self.draw(obs, who, false);
            }
            if let Some(result) = self.own_turn(obs, who) {
                return result;
            }
            match self.react(obs, who) {
                Reaction::Ended(result) => return result,
                Reaction::Pass => {
                    who = who.right();
                    need_draw = true;
                }
                Reaction::Called(caller) => {
                    who = caller;
                    need_draw = false;
                }
            }
        }
    }

    fn draw(&mut self, obs: &mut dyn TableObserver, who: Seat, rinshan: bool) {
        // Replacement draws come off the far end so the live wall
        // shrinks by one either way.
        let tile = if rinshan {
            self.wall.remove(0)
        } else {
            self.wall.pop().expect("draw from an empty wall")
        };
        self.drawn[who.index()] = Some(tile);
        obs.on_drawn(self, who);
    }

    fn flip(&mut self, obs: &mut dyn TableObserver) {
        let next = self.dead[DORA_BASE + self.drids.len()];
        self.drids.push(next);
        obs.on_flipped(self);
    }

    /// Quads, a possible self-draw win, then a discard. Returns the
    /// result if the round ended during the turn.
    fn own_turn(&mut self, obs: &mut dyn TableObserver, who: Seat) -> Option<RoundResult> {
        let w = who.index();
        while self.drawn[w].is_some() {
            if self.rng.gen_bool(self.config.tsumo_rate) {
                return Some(self.end_round(obs, RoundResult::Tsumo, &[who], None));
            }
            if self.riichi[w]
                || self.kans >= 4
                || self.wall.is_empty()
                || !self.rng.gen_bool(self.config.kan_rate)
            {
                break;
            }
            if let Some(kind) = self.ankan_candidate(who) {
                self.ankan(obs, who, kind);
            } else if let Some(index) = self.kakan_candidate(who) {
                self.kakan(obs, who, index);
            } else {
                break;
            }
            if self.rng.gen_bool(self.config.chankan_rate) {
                let robber = self.random_other(who);
                return Some(self.end_round(obs, RoundResult::Ron, &[robber], Some(who)));
            }
            self.draw(obs, who, true);
        }
        self.discard(obs, who);
        None
    }

    fn discard(&mut self, obs: &mut dyn TableObserver, who: Seat) {
        let w = who.index();
        let drawn = self.drawn[w];
        let closed = self.melds[w].iter().all(|m| m.kind() == MeldKind::Ankan);
        let declare = !self.riichi[w]
            && drawn.is_some()
            && closed
            && self.points[w] >= self.config.rule.riichi_stake
            && self.wall.len() >= 4
            && self.rng.gen_bool(self.config.riichi_rate);

        let spin = if self.riichi[w] {
            drawn.is_some()
        } else {
            let choices = self.hands[w].len() + usize::from(drawn.is_some());
            drawn.is_some() && self.rng.gen_range(0..choices) == choices - 1
        };
        let tile = if spin {
            self.drawn[w].take().expect("spin without a drawn tile")
        } else {
            let hand = self.hands[w].tiles();
            let tile = *hand.choose(&mut self.rng).expect("discard from an empty hand");
            self.hands[w].remove(tile);
            if let Some(d) = self.drawn[w].take() {
                self.hands[w].add(d);
            }
            tile
        };

        if declare {
            self.riichi_declared = Some(who);
            obs.on_riichi_called(who);
        }
        self.rivers[w].push(tile);
        self.focus = who;
        self.focus_tile = Some(tile);
        obs.on_discarded(self, spin);
        if self.pending_flip {
            self.pending_flip = false;
            self.flip(obs);
        }
    }

    fn react(&mut self, obs: &mut dyn TableObserver, discarder: Seat) -> Reaction {
        let tile = self.focus_tile.expect("reaction without a discard");

        let mut winners = Vec::new();
        let mut seat = discarder.right();
        while seat != discarder {
            if self.rng.gen_bool(self.config.ron_rate) {
                winners.push(seat);
            }
            seat = seat.right();
        }
        if !winners.is_empty() {
            self.riichi_declared = None;
            let result = if winners.len() == 3 {
                RoundResult::TripleRon
            } else {
                RoundResult::Ron
            };
            return Reaction::Ended(self.end_round(obs, result, &winners, Some(discarder)));
        }

        if let Some(declarer) = self.riichi_declared.take() {
            let d = declarer.index();
            self.riichi[d] = true;
            self.points[d] -= self.config.rule.riichi_stake;
            self.deposit += 1;
            obs.on_riichi_established(declarer);
            obs.on_points_changed(self);
        }

        // No calls on the last discard.
        if self.wall.is_empty() {
            return Reaction::Pass;
        }

        let mut seat = discarder.right();
        while seat != discarder {
            let s = seat.index();
            if !self.riichi[s] {
                let held = self.hands[s].count_kind(tile.kind());
                if held == 3 && self.kans < 4 && self.rng.gen_bool(self.config.kan_rate) {
                    self.daiminkan(obs, seat, discarder, tile);
                    return Reaction::Called(seat);
                }
                if held >= 2 && self.rng.gen_bool(self.config.call_rate) {
                    self.pon(obs, seat, discarder, tile);
                    return Reaction::Called(seat);
                }
            }
            seat = seat.right();
        }

        let caller = discarder.right();
        if !self.riichi[caller.index()] && self.rng.gen_bool(self.config.call_rate) {
            if let Some((lay, others)) = self.chii_option(caller, tile) {
                self.take_discard(discarder);
                for t in others {
                    self.hands[caller.index()].remove(t);
                }
                let meld = Meld::chii(tile, others, lay);
                self.push_meld(obs, caller, meld);
                return Reaction::Called(caller);
            }
        }
        Reaction::Pass
    }

    fn end_round(
        &mut self,
        obs: &mut dyn TableObserver,
        result: RoundResult,
        openers: &[Seat],
        gunner: Option<Seat>,
    ) -> RoundResult {
        let win = matches!(
            result,
            RoundResult::Tsumo | RoundResult::Ron | RoundResult::TripleRon
        );
        match (result, gunner) {
            (RoundResult::Tsumo, _) => {
                let winner = openers[0];
                for seat in Seat::ALL {
                    if seat != winner {
                        self.points[seat.index()] -= TSUMO_SHARE;
                        self.points[winner.index()] += TSUMO_SHARE;
                    }
                }
            }
            (RoundResult::Ron | RoundResult::TripleRon, Some(gunner)) => {
                for winner in openers {
                    self.points[winner.index()] += RON_VALUE;
                    self.points[gunner.index()] -= RON_VALUE;
                }
            }
            _ => {}
        }
        if win {
            self.points[openers[0].index()] +=
                self.deposit as i32 * self.config.rule.riichi_stake;
            self.deposit = 0;
            if self.config.rule.ura_dora && openers.iter().any(|s| self.riichi[s.index()]) {
                let count = self.drids.len();
                self.urids = self.dead[URA_BASE..URA_BASE + count].to_vec();
            }
        }
        let forms: Vec<WinForm> = if win {
            openers
                .iter()
                .map(|s| {
                    let spell = if self.riichi[s.index()] { "Riichi" } else { "Yakuhai" };
                    WinForm::new(spell, RON_VALUE.to_string())
                })
                .collect()
        } else {
            Vec::new()
        };
        obs.on_round_ended(self, result, openers, gunner, &forms);
        obs.on_points_changed(self);
        result
    }

    // ── Calls and quads ─────────────────────────────────────────

    fn take_discard(&mut self, discarder: Seat) {
        self.rivers[discarder.index()]
            .pop()
            .expect("called tile missing from the river");
    }

    fn push_meld(&mut self, obs: &mut dyn TableObserver, who: Seat, meld: Meld) {
        self.melds[who.index()].push(meld.clone());
        obs.on_barked(self, who, &meld);
    }

    fn held_of_kind(&self, who: Seat, kind: TileKind) -> Vec<Tile> {
        self.hands[who.index()]
            .tiles()
            .into_iter()
            .filter(|t| t.kind() == kind)
            .collect()
    }

    fn pon(&mut self, obs: &mut dyn TableObserver, caller: Seat, discarder: Seat, tile: Tile) {
        let mut held = self.held_of_kind(caller, tile.kind());
        held.shuffle(&mut self.rng);
        let mut others = [held[0], held[1]];
        others.sort();
        for t in others {
            self.hands[caller.index()].remove(t);
        }
        self.take_discard(discarder);
        let meld = Meld::pon(tile, others, caller.looks_at(discarder));
        self.push_meld(obs, caller, meld);
    }

    fn daiminkan(&mut self, obs: &mut dyn TableObserver, caller: Seat, discarder: Seat, tile: Tile) {
        let held = self.held_of_kind(caller, tile.kind());
        let others = [held[0], held[1], held[2]];
        for t in others {
            self.hands[caller.index()].remove(t);
        }
        self.take_discard(discarder);
        let meld = Meld::daiminkan(tile, others, caller.looks_at(discarder));
        self.kans += 1;
        self.push_meld(obs, caller, meld);
        self.pending_flip = self.config.rule.kan_dora;
        self.draw(obs, caller, true);
    }

    /// A random chii for `caller` on `tile`: the called slot and the two
    /// hand tiles in ascending rank.
    fn chii_option(&mut self, caller: Seat, tile: Tile) -> Option<(usize, [Tile; 2])> {
        let k = tile.kind();
        let runs = [
            (0, k.next(), k.next().and_then(TileKind::next)),
            (1, k.prev(), k.next()),
            (2, k.prev().and_then(TileKind::prev), k.prev()),
        ];
        let mut options = Vec::new();
        for (lay, low, high) in runs {
            let (Some(low), Some(high)) = (low, high) else {
                continue;
            };
            let lows = self.held_of_kind(caller, low);
            let highs = self.held_of_kind(caller, high);
            if let (Some(&a), Some(&b)) = (lows.choose(&mut self.rng), highs.choose(&mut self.rng)) {
                options.push((lay, [a, b]));
            }
        }
        options.choose(&mut self.rng).copied()
    }

    fn ankan_candidate(&self, who: Seat) -> Option<TileKind> {
        let hand = &self.hands[who.index()];
        let drawn = self.drawn[who.index()].map(Tile::kind);
        TileKind::all().find(|&k| {
            let held = hand.count_kind(k);
            held == 4 || (held == 3 && drawn == Some(k))
        })
    }

    fn kakan_candidate(&self, who: Seat) -> Option<usize> {
        let w = who.index();
        let drawn = self.drawn[w].map(Tile::kind);
        self.melds[w].iter().position(|m| {
            let kind = m.tiles()[0].kind();
            m.kind() == MeldKind::Pon && (drawn == Some(kind) || self.hands[w].count_kind(kind) > 0)
        })
    }

    fn ankan(&mut self, obs: &mut dyn TableObserver, who: Seat, kind: TileKind) {
        let w = who.index();
        let plain = Tile::new(kind);
        let reds = if kind.has_red() {
            self.hands[w].count(plain.to_red()) as usize
        } else {
            0
        };
        let mut tiles = [plain; 4];
        for slot in tiles.iter_mut().take(reds) {
            *slot = plain.to_red();
        }
        if self.hands[w].count_kind(kind) == 4 {
            for t in tiles {
                self.hands[w].remove(t);
            }
            if let Some(d) = self.drawn[w].take() {
                self.hands[w].add(d);
            }
        } else {
            tiles[3] = self.drawn[w].take().expect("ankan needs the drawn tile");
            for &t in &tiles[..3] {
                self.hands[w].remove(t);
            }
        }
        self.kans += 1;
        self.push_meld(obs, who, Meld::ankan(tiles));
        if self.pending_flip {
            self.pending_flip = false;
            self.flip(obs);
        }
        if self.config.rule.kan_dora {
            self.flip(obs);
        }
    }

    fn kakan(&mut self, obs: &mut dyn TableObserver, who: Seat, index: usize) {
        let w = who.index();
        let kind = self.melds[w][index].tiles()[0].kind();
        let added = match self.drawn[w] {
            Some(d) if d.kind() == kind => {
                self.drawn[w] = None;
                d
            }
            _ => {
                let held = self.held_of_kind(who, kind);
                let tile = *held.choose(&mut self.rng).expect("kakan tile missing");
                self.hands[w].remove(tile);
                if let Some(d) = self.drawn[w].take() {
                    self.hands[w].add(d);
                }
                tile
            }
        };
        self.melds[w][index].kakan(added);
        self.kans += 1;
        let meld = self.melds[w][index].clone();
        obs.on_barked(self, who, &meld);
        if self.pending_flip {
            self.flip(obs);
        }
        self.pending_flip = self.config.rule.kan_dora;
    }

    fn random_other(&mut self, who: Seat) -> Seat {
        let mut seat = who.right();
        for _ in 0..self.rng.gen_range(0..3) {
            seat = seat.right();
        }
        seat
    }
}

impl TableView for MockTable {
    fn closed_hand(&self, seat: Seat) -> Vec<Tile> {
        self.hands[seat.index()].tiles()
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
        self.focus_tile.expect("MockTable: no discard yet")
    }

    fn dora_indicators(&self) -> &[Tile] {
        &self.drids
    }

    fn ura_indicators(&self) -> &[Tile] {
        &self.urids
    }

    fn points(&self) -> [i32; NUM_SEATS] {
        self.points
    }

    fn girl_id(&self, seat: Seat) -> u32 {
        self.girls[seat.index()]
    }

    fn rule(&self) -> &Rule {
        &self.config.rule
    }
}
