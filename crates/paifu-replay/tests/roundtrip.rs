//! Whole-game verification against a live table.
//!
//! Each test plays seeded games on a [`MockTable`] with a [`Recorder`]
//! attached, then reconstructs every round and checks the result
//! against the table's own state, against tile conservation, and
//! against a copy of the log that went through the binary codec.

use paifu_core::{Seat, Tile, NUM_IDS};
use paifu_replay::{
    compare_snap, compare_snaps, read_replay, write_replay, InAct, Recorder, Replay, ReplayReader,
    TableSnap, INITIAL_WALL,
};
use paifu_test_utils::{MockConfig, MockTable};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────

fn config(seed: u64) -> MockConfig {
    MockConfig {
        seed,
        rounds: 6,
        ..MockConfig::default()
    }
}

/// A busier table: more calls, quads, riichi and wins per round.
fn lively(seed: u64) -> MockConfig {
    MockConfig {
        seed,
        rounds: 6,
        call_rate: 0.7,
        kan_rate: 0.9,
        riichi_rate: 0.3,
        tsumo_rate: 0.02,
        ron_rate: 0.02,
        chankan_rate: 0.3,
        ..MockConfig::default()
    }
}

/// Play a game, checking each round's final reconstruction against the
/// live table before the next round starts.
fn play_and_verify(config: MockConfig) -> Replay {
    let rounds = config.rounds;
    let mut table = MockTable::new(config);
    let mut recorder = Recorder::new(Default::default());
    table.start(&mut recorder);
    for i in 0..rounds {
        table.play_round(&mut recorder);
        let snap = recorder.replay().look_final(i);
        if let Some(report) = compare_snap(&snap, &table) {
            panic!("round {i} diverged: {report:#?}");
        }
        assert!(snap.end_of_round, "round {i} did not end");
        assert_eq!(snap.wall_remain, table.wall_remain(), "round {i} wall");
    }
    table.finish(&mut recorder);
    recorder.into_replay()
}

fn counts(tiles: impl Iterator<Item = Tile>) -> [i32; NUM_IDS] {
    let mut counts = [0; NUM_IDS];
    for tile in tiles {
        counts[tile.id37() as usize] += 1;
    }
    counts
}

fn check_conservation(replay: &Replay, index: usize, snap: &TableSnap) {
    let round = &replay.rounds[index];
    let dealt = counts(round.tracks.iter().flat_map(|t| t.init.iter().copied()));
    let drawable = counts(round.tracks.iter().flat_map(|t| {
        t.ins.iter().filter_map(|a| match a {
            InAct::Draw(tile) => Some(*tile),
            _ => None,
        })
    }));
    let visible = counts(Seat::ALL.into_iter().flat_map(|s| snap.visible_tiles(s)));

    let mut drawn_so_far = 0;
    for id in 0..NUM_IDS {
        let extra = visible[id] - dealt[id];
        assert!(
            (0..=drawable[id]).contains(&extra),
            "tile id {id}: {extra} beyond the deal, {} drawable",
            drawable[id]
        );
        drawn_so_far += extra;
    }
    assert_eq!(drawn_so_far as usize, INITIAL_WALL - snap.wall_remain);

    for seat in Seat::ALL {
        let s = &snap[seat];
        let held = s.hand.len() + 3 * s.melds.len() + usize::from(snap.drawn_by(seat).is_some());
        assert!(held == 13 || held == 14, "{seat} holds {held}");
    }
}

/// Tiles that left `seat`'s river into another seat's meld.
fn called_away(snap: &TableSnap, seat: Seat) -> usize {
    Seat::ALL
        .into_iter()
        .filter(|&owner| owner != seat)
        .flat_map(|owner| snap[owner].melds.iter().map(move |m| m.source(owner)))
        .filter(|&source| source == Some(seat))
        .count()
}

fn check_every_budget(replay: &Replay) {
    for index in 0..replay.rounds.len() {
        let turns = replay.round_len(index);
        let mut prev: Option<TableSnap> = None;
        for turn in 0..=turns + 1 {
            let snap = replay.look(index, turn);
            check_conservation(replay, index, &snap);
            if let Some(prev) = &prev {
                assert!(snap.drids.len() >= prev.drids.len());
                assert!(snap.wall_remain <= prev.wall_remain);
                for seat in Seat::ALL {
                    assert!(snap[seat].melds.len() >= prev[seat].melds.len());
                    let discarded = snap[seat].river.len() + called_away(&snap, seat);
                    let before = prev[seat].river.len() + called_away(prev, seat);
                    assert!(discarded >= before, "{seat} lost a discard at turn {turn}");
                }
            }
            prev = Some(snap);
        }
        let last = replay.look(index, turns + 1);
        assert!(last.end_of_round, "round {index} unfinished past its length");
    }
}

// ── Live comparison ─────────────────────────────────────────────

#[test]
fn final_snapshots_match_the_live_table() {
    for seed in 0..8 {
        play_and_verify(config(seed));
    }
}

#[test]
fn busy_tables_match_the_live_table() {
    for seed in 100..116 {
        play_and_verify(lively(seed));
    }
}

#[test]
fn game_header_is_recorded() {
    let replay = play_and_verify(config(3));
    assert_eq!(replay.seed, 3);
    assert_eq!(replay.rounds.len(), 6);
    assert!(replay.girls.iter().all(|&g| g > 0));
    assert_eq!(replay.init_points, [replay.rule.initial_points; 4]);
    let last = replay.rounds[5].result_points;
    let base = replay.rule.initial_points;
    assert_eq!(replay.scores, last.map(|p| (p - base) / 1000));
    assert!(last.iter().sum::<i32>() <= 4 * base);
}

#[test]
fn starting_points_carry_over_between_rounds() {
    let replay = play_and_verify(lively(7));
    for i in 1..replay.rounds.len() {
        let start = replay.look(i, 0);
        assert_eq!(start.points, replay.rounds[i - 1].result_points);
    }
}

// ── Reconstruction invariants ───────────────────────────────────

#[test]
fn every_budget_conserves_tiles() {
    for seed in [1, 2, 200, 201] {
        let replay = play_and_verify(lively(seed));
        check_every_budget(&replay);
    }
}

#[test]
fn looking_is_repeatable() {
    let replay = play_and_verify(lively(42));
    for index in 0..replay.rounds.len() {
        let turn = replay.round_len(index) / 2;
        let a = replay.look(index, turn);
        let b = replay.look(index, turn);
        assert_eq!(a, b);
        assert!(compare_snaps(&a, &b).is_none());
    }
}

// ── Persistence ─────────────────────────────────────────────────

#[test]
fn codec_round_trip_preserves_every_snapshot() {
    let replay = play_and_verify(lively(9));
    let buf = write_replay(Vec::new(), &replay).unwrap();
    let restored = read_replay(buf.as_slice()).unwrap();
    assert_eq!(restored, replay);

    for index in 0..replay.rounds.len() {
        let turns = replay.round_len(index);
        for turn in [0, turns / 3, turns, turns + 1] {
            let report = compare_snaps(&restored.look(index, turn), &replay.look(index, turn));
            assert!(report.is_none(), "round {index} turn {turn}: {report:#?}");
        }
    }
}

#[test]
fn streaming_reader_sees_rounds_then_scores() {
    let replay = play_and_verify(config(12));
    let buf = write_replay(Vec::new(), &replay).unwrap();

    let reader = ReplayReader::open(buf.as_slice()).unwrap();
    reader.verify_rule(&replay.rule).unwrap();
    let mut rounds = reader.rounds();
    let mut seen = 0;
    for round in rounds.by_ref() {
        assert_eq!(round.unwrap(), replay.rounds[seen]);
        seen += 1;
    }
    assert_eq!(seen, replay.rounds.len());
    assert_eq!(rounds.scores(), Some(replay.scores));
}

#[test]
fn truncated_stream_is_rejected() {
    let replay = play_and_verify(config(5));
    let buf = write_replay(Vec::new(), &replay).unwrap();
    let cut = &buf[..buf.len() - 1];
    assert!(read_replay(cut).is_err());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn any_seed_reconstructs(seed in any::<u64>()) {
        let replay = play_and_verify(lively(seed));
        for index in 0..replay.rounds.len() {
            let turns = replay.round_len(index);
            let snap = replay.look(index, turns / 2);
            check_conservation(&replay, index, &snap);
        }
    }
}
