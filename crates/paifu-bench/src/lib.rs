//! Benchmark profiles for the Paifu replay engine.
//!
//! Provides pre-built table configurations and recorded games:
//!
//! - [`reference_profile`]: an ordinary eight-round game
//! - [`stress_profile`]: a call- and quad-heavy game with longer logs
//! - [`record_game`]: play a profile on a mock table and keep the log

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use paifu_core::Rule;
use paifu_replay::{Recorder, Replay};
use paifu_test_utils::{MockConfig, MockTable};

/// Build a reference profile: eight rounds at default rates.
pub fn reference_profile(seed: u64) -> MockConfig {
    MockConfig {
        seed,
        rule: Rule::default(),
        rounds: 8,
        ..MockConfig::default()
    }
}

/// Build a stress profile: sixteen rounds with frequent calls and quads.
///
/// Same rule as [`reference_profile`]; wins are rarer so rounds run
/// close to exhaustion.
pub fn stress_profile(seed: u64) -> MockConfig {
    MockConfig {
        seed,
        rounds: 16,
        call_rate: 0.8,
        kan_rate: 0.9,
        riichi_rate: 0.1,
        tsumo_rate: 0.002,
        ron_rate: 0.001,
        chankan_rate: 0.05,
        ..reference_profile(seed)
    }
}

/// Play `config` to the end with a recorder attached.
pub fn record_game(config: MockConfig) -> Replay {
    let mut table = MockTable::new(config);
    let mut recorder = Recorder::new(Rule::default());
    table.play_game(&mut recorder);
    recorder.into_replay()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_record_every_round() {
        assert_eq!(record_game(reference_profile(1)).rounds.len(), 8);
        assert_eq!(record_game(stress_profile(1)).rounds.len(), 16);
    }

    #[test]
    fn recording_is_deterministic() {
        assert_eq!(
            record_game(stress_profile(77)),
            record_game(stress_profile(77))
        );
    }
}
