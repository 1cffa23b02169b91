//! Error types for the Paifu vocabulary crate.

use std::error::Error;
use std::fmt;

/// Errors detected by [`Rule::validate()`](crate::Rule::validate).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleError {
    /// A suit was configured with more red fives than it has fives.
    TooManyRedFives {
        /// Suit letter (`m`, `p` or `s`).
        suit: char,
        /// The configured count.
        configured: u8,
    },
    /// Starting points must be positive.
    NonPositivePoints {
        /// The configured value.
        value: i32,
    },
    /// The riichi stake must be positive.
    NonPositiveStake {
        /// The configured value.
        value: i32,
    },
}

impl fmt::Display for RuleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooManyRedFives { suit, configured } => {
                write!(f, "{configured} red fives configured for suit '{suit}', at most 4 allowed")
            }
            Self::NonPositivePoints { value } => {
                write!(f, "initial_points must be positive, got {value}")
            }
            Self::NonPositiveStake { value } => {
                write!(f, "riichi_stake must be positive, got {value}")
            }
        }
    }
}

impl Error for RuleError {}

/// A tile string that is not valid `1m` / `0p` / `5z` notation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseTileError {
    input: String,
}

impl ParseTileError {
    pub(crate) fn new(input: &str) -> Self {
        Self {
            input: input.to_owned(),
        }
    }

    /// The rejected input.
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseTileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid tile notation {:?}", self.input)
    }
}

impl Error for ParseTileError {}
