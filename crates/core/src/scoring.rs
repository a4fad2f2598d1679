use crate::{PokerHand, Score, ScoringConfig};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct ScoreTables {
    hand_rules: HashMap<PokerHand, (i64, i64)>,
    hand_level_rules: HashMap<PokerHand, (i64, i64)>,
}

impl Default for ScoreTables {
    fn default() -> Self {
        Self::from_config(&ScoringConfig::default())
    }
}

impl ScoreTables {
    /// Hands missing from `config` keep their built-in values.
    pub fn from_config(config: &ScoringConfig) -> Self {
        let mut hand_rules = HashMap::new();
        let mut hand_level_rules = HashMap::new();
        for hand in PokerHand::ALL {
            let (base, level) = match config.rule(hand) {
                Some(rule) => (
                    (rule.base_chips, rule.base_mult),
                    (rule.level_chips, rule.level_mult),
                ),
                None => (default_hand_base(hand), default_hand_scaling(hand)),
            };
            hand_rules.insert(hand, base);
            hand_level_rules.insert(hand, level);
        }
        Self {
            hand_rules,
            hand_level_rules,
        }
    }

    pub fn hand_base(&self, hand: PokerHand) -> (i64, i64) {
        self.hand_rules
            .get(&hand)
            .copied()
            .unwrap_or_else(|| default_hand_base(hand))
    }

    pub fn hand_scaling(&self, hand: PokerHand) -> (i64, i64) {
        self.hand_level_rules
            .get(&hand)
            .copied()
            .unwrap_or_else(|| default_hand_scaling(hand))
    }

    /// Base score at `level`; `halve_base` floors the unscaled base to half
    /// before level scaling is added.
    pub fn hand_base_for_level(&self, hand: PokerHand, level: u32, halve_base: bool) -> Score {
        let (mut base_chips, mut base_mult) = self.hand_base(hand);
        if halve_base {
            base_chips = base_chips.div_euclid(2);
            base_mult = base_mult.div_euclid(2);
        }
        let (level_chips, level_mult) = self.hand_scaling(hand);
        let extra = level.saturating_sub(1) as i64;
        Score {
            chips: base_chips.saturating_add(level_chips.saturating_mul(extra)),
            mult: (base_mult + level_mult * extra) as f64,
        }
    }
}

fn default_hand_base(hand: PokerHand) -> (i64, i64) {
    match hand {
        PokerHand::HighCard => (5, 1),
        PokerHand::Pair => (10, 2),
        PokerHand::TwoPair => (20, 2),
        PokerHand::ThreeOfAKind => (30, 3),
        PokerHand::Straight => (30, 4),
        PokerHand::Flush => (35, 4),
        PokerHand::FullHouse => (40, 4),
        PokerHand::FourOfAKind => (60, 7),
        PokerHand::StraightFlush => (100, 8),
        PokerHand::FiveOfAKind => (120, 12),
        PokerHand::FlushHouse => (160, 16),
        PokerHand::FlushFive => (140, 14),
    }
}

fn default_hand_scaling(hand: PokerHand) -> (i64, i64) {
    match hand {
        PokerHand::HighCard => (10, 1),
        PokerHand::Pair => (15, 1),
        PokerHand::TwoPair => (20, 1),
        PokerHand::ThreeOfAKind => (20, 2),
        PokerHand::Straight => (30, 3),
        PokerHand::Flush => (15, 2),
        PokerHand::FullHouse => (25, 2),
        PokerHand::FourOfAKind => (30, 3),
        PokerHand::StraightFlush => (40, 4),
        PokerHand::FiveOfAKind => (35, 3),
        PokerHand::FlushHouse => (40, 4),
        PokerHand::FlushFive => (50, 3),
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandLevel {
    pub lvl: u32,
    pub count: u32,
}

impl Default for HandLevel {
    fn default() -> Self {
        Self { lvl: 1, count: 0 }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum HandInfoError {
    #[error("hand level must be at least 1, got {0}")]
    LevelTooLow(u32),
}

/// Level and play count per hand category. Categories absent from the map
/// read as level 1, never played.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct HandInfo {
    hands: BTreeMap<PokerHand, HandLevel>,
}

pub fn new_hand_info(overrides: impl IntoIterator<Item = (PokerHand, HandLevel)>) -> HandInfo {
    let mut info = HandInfo::new();
    for (hand, level) in overrides {
        info.hands.insert(hand, level);
    }
    info
}

impl HandInfo {
    pub fn new() -> Self {
        Self {
            hands: PokerHand::ALL
                .into_iter()
                .map(|hand| (hand, HandLevel::default()))
                .collect(),
        }
    }

    pub fn get(&self, hand: PokerHand) -> HandLevel {
        self.hands.get(&hand).copied().unwrap_or_default()
    }

    pub fn level(&self, hand: PokerHand) -> u32 {
        self.get(hand).lvl
    }

    pub fn count(&self, hand: PokerHand) -> u32 {
        self.get(hand).count
    }

    pub fn iter(&self) -> impl Iterator<Item = (PokerHand, HandLevel)> + '_ {
        PokerHand::ALL.into_iter().map(|hand| (hand, self.get(hand)))
    }

    pub fn record_play(&mut self, hand: PokerHand) {
        let entry = self.hands.entry(hand).or_default();
        entry.count = entry.count.saturating_add(1);
    }

    pub fn set_level(&mut self, hand: PokerHand, lvl: u32) -> Result<(), HandInfoError> {
        if lvl < 1 {
            return Err(HandInfoError::LevelTooLow(lvl));
        }
        self.hands.entry(hand).or_default().lvl = lvl;
        Ok(())
    }

    pub fn set_count(&mut self, hand: PokerHand, count: u32) {
        self.hands.entry(hand).or_default().count = count;
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// True when no other category has been played more often.
    pub fn is_most_played(&self, hand: PokerHand) -> bool {
        let count = self.count(hand);
        self.iter().all(|(_, other)| other.count <= count)
    }
}
