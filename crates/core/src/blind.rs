use crate::{Card, PokerHand, Suit};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossBlind {
    #[serde(rename = "The Club")]
    Club,
    #[serde(rename = "The Goad")]
    Goad,
    #[serde(rename = "The Window")]
    Window,
    #[serde(rename = "The Head")]
    Head,
    #[serde(rename = "The Plant")]
    Plant,
    #[serde(rename = "The Psychic")]
    Psychic,
    #[serde(rename = "The Eye")]
    Eye,
    #[serde(rename = "The Mouth")]
    Mouth,
    #[serde(rename = "The Arm")]
    Arm,
    #[serde(rename = "The Flint")]
    Flint,
}

impl BossBlind {
    pub const ALL: [BossBlind; 10] = [
        BossBlind::Club,
        BossBlind::Goad,
        BossBlind::Window,
        BossBlind::Head,
        BossBlind::Plant,
        BossBlind::Psychic,
        BossBlind::Eye,
        BossBlind::Mouth,
        BossBlind::Arm,
        BossBlind::Flint,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BossBlind::Club => "The Club",
            BossBlind::Goad => "The Goad",
            BossBlind::Window => "The Window",
            BossBlind::Head => "The Head",
            BossBlind::Plant => "The Plant",
            BossBlind::Psychic => "The Psychic",
            BossBlind::Eye => "The Eye",
            BossBlind::Mouth => "The Mouth",
            BossBlind::Arm => "The Arm",
            BossBlind::Flint => "The Flint",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BossBlind::Club => "All Club cards are debuffed",
            BossBlind::Goad => "All Spade cards are debuffed",
            BossBlind::Window => "All Diamond cards are debuffed",
            BossBlind::Head => "All Heart cards are debuffed",
            BossBlind::Plant => "All face cards are debuffed",
            BossBlind::Psychic => "Must play 5 cards",
            BossBlind::Eye => "No repeat hand types this round",
            BossBlind::Mouth => "Play only 1 hand type this round",
            BossBlind::Arm => "Decrease level of played poker hand",
            BossBlind::Flint => "Base chips and mult are halved",
        }
    }

    /// The suit this blind debuffs, for the single-suit blinds.
    pub fn debuffed_suit(self) -> Option<Suit> {
        match self {
            BossBlind::Club => Some(Suit::Clubs),
            BossBlind::Goad => Some(Suit::Spades),
            BossBlind::Window => Some(Suit::Diamonds),
            BossBlind::Head => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub fn effective_level(self, lvl: u32) -> u32 {
        match self {
            BossBlind::Arm => lvl.saturating_sub(1).max(1),
            _ => lvl,
        }
    }

    pub fn halves_base(self) -> bool {
        self == BossBlind::Flint
    }
}

impl fmt::Display for BossBlind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown boss blind {0:?}")]
pub struct UnknownBossBlind(pub String);

impl FromStr for BossBlind {
    type Err = UnknownBossBlind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BossBlind::ALL
            .into_iter()
            .find(|blind| blind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownBossBlind(s.to_string()))
    }
}

/// Why a classified hand does not score under the active boss blind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlindRejection {
    TooFewCards,
    RepeatedHand,
    OffLockedHand(PokerHand),
}

pub fn debuffs_card(blind: BossBlind, card: &Card, pareidolia: bool) -> bool {
    if let Some(suit) = blind.debuffed_suit() {
        return matches!(card.suit, Suit::Wild | Suit::Unknown) || card.suit == suit;
    }
    match blind {
        BossBlind::Plant => pareidolia || card.rank.is_face(),
        _ => false,
    }
}

pub fn apply_boss_blind_debuffs(blind: Option<BossBlind>, pareidolia: bool, cards: &mut [Card]) {
    let Some(blind) = blind else {
        return;
    };
    for card in cards.iter_mut() {
        if debuffs_card(blind, card, pareidolia) {
            card.debuffed = true;
        }
    }
}

pub fn check_card_count(blind: Option<BossBlind>, cards: usize) -> Result<(), BlindRejection> {
    match blind {
        Some(BossBlind::Psychic) if cards < 5 => Err(BlindRejection::TooFewCards),
        _ => Ok(()),
    }
}

/// Eye and Mouth constraints against the hands scored earlier in the round.
pub fn check_hand_type(
    blind: Option<BossBlind>,
    hand: PokerHand,
    played: &HashSet<PokerHand>,
) -> Result<(), BlindRejection> {
    match blind {
        Some(BossBlind::Eye) if played.contains(&hand) => Err(BlindRejection::RepeatedHand),
        Some(BossBlind::Mouth) => match played.iter().next() {
            Some(locked) if *locked != hand => Err(BlindRejection::OffLockedHand(*locked)),
            _ => Ok(()),
        },
        _ => Ok(()),
    }
}
