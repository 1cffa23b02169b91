//! Table rule configuration and validation.
//!
//! [`Rule`] is recorded once per replay. The reconstructor reads the
//! riichi stake from it; the remaining switches describe how the live
//! table built its wall and revealed indicators.

use crate::error::RuleError;
use crate::tile::Suit;

/// Rule switches that affect what a game record contains.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    /// Red fives per numbered suit (man, pin, sou). Default: 1 each.
    pub red_fives: [u8; 3],
    /// Closing (ura) indicators are revealed for riichi winners. Default: true.
    pub ura_dora: bool,
    /// Each quad reveals another dora indicator. Default: true.
    pub kan_dora: bool,
    /// Points each seat starts the game with. Default: 25000.
    pub initial_points: i32,
    /// Points placed on the table when riichi is established. Default: 1000.
    pub riichi_stake: i32,
}

impl Default for Rule {
    fn default() -> Self {
        Self {
            red_fives: [1, 1, 1],
            ura_dora: true,
            kan_dora: true,
            initial_points: 25000,
            riichi_stake: 1000,
        }
    }
}

impl Rule {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), RuleError> {
        for (suit, &configured) in [Suit::Man, Suit::Pin, Suit::Sou]
            .iter()
            .zip(self.red_fives.iter())
        {
            if configured > 4 {
                return Err(RuleError::TooManyRedFives {
                    suit: suit.letter(),
                    configured,
                });
            }
        }
        if self.initial_points <= 0 {
            return Err(RuleError::NonPositivePoints {
                value: self.initial_points,
            });
        }
        if self.riichi_stake <= 0 {
            return Err(RuleError::NonPositiveStake {
                value: self.riichi_stake,
            });
        }
        Ok(())
    }

    /// Red fives configured for `suit` (always 0 for honors).
    pub fn red_fives_in(&self, suit: Suit) -> u8 {
        match suit {
            Suit::Honor => 0,
            other => self.red_fives[other as usize],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_is_valid() {
        assert_eq!(Rule::default().validate(), Ok(()));
    }

    #[test]
    fn too_many_red_fives_rejected() {
        let rule = Rule {
            red_fives: [1, 5, 1],
            ..Rule::default()
        };
        assert_eq!(
            rule.validate(),
            Err(RuleError::TooManyRedFives {
                suit: 'p',
                configured: 5
            })
        );
    }

    #[test]
    fn non_positive_points_rejected() {
        let rule = Rule {
            initial_points: 0,
            ..Rule::default()
        };
        assert!(matches!(
            rule.validate(),
            Err(RuleError::NonPositivePoints { value: 0 })
        ));
    }

    #[test]
    fn non_positive_stake_rejected() {
        let rule = Rule {
            riichi_stake: -1000,
            ..Rule::default()
        };
        assert!(rule.validate().is_err());
    }

    #[test]
    fn honors_never_have_red_fives() {
        let rule = Rule {
            red_fives: [0, 2, 1],
            ..Rule::default()
        };
        assert_eq!(rule.red_fives_in(Suit::Pin), 2);
        assert_eq!(rule.red_fives_in(Suit::Honor), 0);
    }
}
