use crate::PokerHand;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandRule {
    pub hand: PokerHand,
    pub base_chips: i64,
    pub base_mult: i64,
    #[serde(default)]
    pub level_chips: i64,
    #[serde(default)]
    pub level_mult: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoringConfig {
    pub hands: Vec<HandRule>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("hand {0} configured more than once")]
    DuplicateHand(PokerHand),
    #[error("hand {0} has a negative value")]
    NegativeValue(PokerHand),
}

impl ScoringConfig {
    pub fn rule(&self, hand: PokerHand) -> Option<&HandRule> {
        self.hands.iter().find(|rule| rule.hand == hand)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for rule in &self.hands {
            if !seen.insert(rule.hand) {
                return Err(ConfigError::DuplicateHand(rule.hand));
            }
            let values = [
                rule.base_chips,
                rule.base_mult,
                rule.level_chips,
                rule.level_mult,
            ];
            if values.iter().any(|value| *value < 0) {
                return Err(ConfigError::NegativeValue(rule.hand));
            }
        }
        Ok(())
    }
}
