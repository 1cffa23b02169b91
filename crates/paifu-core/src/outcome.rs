//! How a round ended, and the per-winner scoring record.

use std::fmt;

/// Outcome of a round as reported by the live table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RoundResult {
    /// The live wall ran out.
    #[default]
    Exhausted,
    /// Self-draw win.
    Tsumo,
    /// Win on another seat's discard (or robbed kan).
    Ron,
    /// Three seats claimed the same discard.
    TripleRon,
    /// Abortive draw declared with nine kinds of terminals and honors.
    NineTerminals,
    /// Abortive draw: four identical wind discards on the first go-around.
    FourWinds,
    /// Abortive draw: four quads declared by more than one seat.
    FourKans,
    /// Abortive draw: all four seats in riichi.
    FourRiichi,
    /// Exhaustive draw paid out as a full river of terminals and honors.
    NagashiMangan,
}

impl RoundResult {
    /// Every variant, in tag order.
    pub const ALL: [RoundResult; 9] = [
        RoundResult::Exhausted,
        RoundResult::Tsumo,
        RoundResult::Ron,
        RoundResult::TripleRon,
        RoundResult::NineTerminals,
        RoundResult::FourWinds,
        RoundResult::FourKans,
        RoundResult::FourRiichi,
        RoundResult::NagashiMangan,
    ];

    /// True when the round ended on a claimed discard.
    pub fn is_ron(self) -> bool {
        matches!(self, RoundResult::Ron | RoundResult::TripleRon)
    }
}

impl fmt::Display for RoundResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Exhausted => "exhausted",
            Self::Tsumo => "tsumo",
            Self::Ron => "ron",
            Self::TripleRon => "triple-ron",
            Self::NineTerminals => "nine-terminals",
            Self::FourWinds => "four-winds",
            Self::FourKans => "four-kans",
            Self::FourRiichi => "four-riichi",
            Self::NagashiMangan => "nagashi-mangan",
        };
        f.write_str(name)
    }
}

/// Scoring label and point charge of one winning hand.
///
/// Both strings come from the external scoring evaluator and are stored
/// verbatim.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WinForm {
    /// Human-readable yaku listing.
    pub spell: String,
    /// Human-readable point charge.
    pub charge: String,
}

impl WinForm {
    /// Build a form from its two labels.
    pub fn new(spell: impl Into<String>, charge: impl Into<String>) -> Self {
        Self {
            spell: spell.into(),
            charge: charge.into(),
        }
    }
}
