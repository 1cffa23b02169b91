//! The facade reaches the whole pipeline through the prelude.

use paifu::prelude::*;
use paifu_test_utils::{MockConfig, MockTable};

#[test]
fn record_look_and_persist_through_the_prelude() {
    let mut table = MockTable::new(MockConfig {
        seed: 21,
        rounds: 2,
        ..MockConfig::default()
    });
    let mut recorder = Recorder::new(Rule::default());
    table.play_game(&mut recorder);
    let replay: Replay = recorder.into_replay();
    assert_eq!(replay.rounds.len(), 2);

    let last = replay.look_final(1);
    assert!(last.end_of_round);
    assert!(paifu::replay::compare_snap(&last, &table).is_none());

    let bytes = write_replay(Vec::new(), &replay).unwrap();
    let restored = read_replay(bytes.as_slice()).unwrap();
    assert_eq!(restored.look_final(0), replay.look_final(0));
}
