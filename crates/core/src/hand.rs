use crate::{Card, Rank, Suit};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PokerHand {
    FlushFive,
    FlushHouse,
    FiveOfAKind,
    StraightFlush,
    FourOfAKind,
    FullHouse,
    Flush,
    Straight,
    ThreeOfAKind,
    TwoPair,
    Pair,
    HighCard,
}

impl PokerHand {
    /// Strongest first; classification takes the first match.
    pub const ALL: [PokerHand; 12] = [
        PokerHand::FlushFive,
        PokerHand::FlushHouse,
        PokerHand::FiveOfAKind,
        PokerHand::StraightFlush,
        PokerHand::FourOfAKind,
        PokerHand::FullHouse,
        PokerHand::Flush,
        PokerHand::Straight,
        PokerHand::ThreeOfAKind,
        PokerHand::TwoPair,
        PokerHand::Pair,
        PokerHand::HighCard,
    ];

    pub fn id(self) -> &'static str {
        match self {
            PokerHand::FlushFive => "flush-five",
            PokerHand::FlushHouse => "flush-house",
            PokerHand::FiveOfAKind => "five-of-a-kind",
            PokerHand::StraightFlush => "straight-flush",
            PokerHand::FourOfAKind => "four-of-a-kind",
            PokerHand::FullHouse => "full-house",
            PokerHand::Flush => "flush",
            PokerHand::Straight => "straight",
            PokerHand::ThreeOfAKind => "three-of-a-kind",
            PokerHand::TwoPair => "two-pair",
            PokerHand::Pair => "pair",
            PokerHand::HighCard => "high-card",
        }
    }

    pub fn contains_straight(self) -> bool {
        matches!(self, PokerHand::Straight | PokerHand::StraightFlush)
    }
}

impl fmt::Display for PokerHand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown poker hand {0:?}")]
pub struct UnknownHand(pub String);

impl FromStr for PokerHand {
    type Err = UnknownHand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PokerHand::ALL
            .into_iter()
            .find(|hand| hand.id() == s)
            .ok_or_else(|| UnknownHand(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankGroup {
    pub rank: Rank,
    pub cards: Vec<Card>,
}

/// Played cards plus their rank groups, in order of first appearance.
#[derive(Debug, Clone, PartialEq)]
pub struct HandDetails {
    pub cards: Vec<Card>,
    pub groups: Vec<RankGroup>,
}

impl HandDetails {
    pub fn new(cards: &[Card]) -> Self {
        let mut groups: Vec<RankGroup> = Vec::new();
        for card in cards {
            match groups.iter_mut().find(|group| group.rank == card.rank) {
                Some(group) => group.cards.push(*card),
                None => groups.push(RankGroup {
                    rank: card.rank,
                    cards: vec![*card],
                }),
            }
        }
        Self {
            cards: cards.to_vec(),
            groups,
        }
    }

    fn group_of(&self, size: usize) -> Option<Vec<Card>> {
        self.groups
            .iter()
            .find(|group| group.cards.len() == size)
            .map(|group| group.cards.clone())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub hand: PokerHand,
    /// Cards whose per-card bonuses count, sorted by play order.
    pub scoring: Vec<Card>,
}

type HandMatcher = fn(&HandDetails) -> Option<Vec<Card>>;

const HAND_MATCHERS: [(PokerHand, HandMatcher); 12] = [
    (PokerHand::FlushFive, match_flush_five),
    (PokerHand::FlushHouse, match_flush_house),
    (PokerHand::FiveOfAKind, match_five_of_a_kind),
    (PokerHand::StraightFlush, match_straight_flush),
    (PokerHand::FourOfAKind, match_four_of_a_kind),
    (PokerHand::FullHouse, match_full_house),
    (PokerHand::Flush, match_flush),
    (PokerHand::Straight, match_straight),
    (PokerHand::ThreeOfAKind, match_three_of_a_kind),
    (PokerHand::TwoPair, match_two_pair),
    (PokerHand::Pair, match_pair),
    (PokerHand::HighCard, match_high_card),
];

/// Returns `None` only for an empty hand.
pub fn classify(details: &HandDetails, splash: bool) -> Option<Classification> {
    for (hand, matcher) in HAND_MATCHERS {
        let Some(mut matched) = matcher(details) else {
            continue;
        };
        let scoring = if splash {
            details.cards.clone()
        } else {
            matched.sort_by_key(|card| card.order);
            matched
        };
        return Some(Classification { hand, scoring });
    }
    None
}

pub fn evaluate_hand(cards: &[Card]) -> Option<PokerHand> {
    classify(&HandDetails::new(cards), false).map(|found| found.hand)
}

fn match_flush_five(details: &HandDetails) -> Option<Vec<Card>> {
    match_flush(details).and(match_five_of_a_kind(details))
}

fn match_flush_house(details: &HandDetails) -> Option<Vec<Card>> {
    match_flush(details).and(match_full_house(details))
}

fn match_five_of_a_kind(details: &HandDetails) -> Option<Vec<Card>> {
    details.group_of(5)
}

fn match_straight_flush(details: &HandDetails) -> Option<Vec<Card>> {
    match_flush(details).and(match_straight(details))
}

fn match_four_of_a_kind(details: &HandDetails) -> Option<Vec<Card>> {
    details.group_of(4)
}

fn match_full_house(details: &HandDetails) -> Option<Vec<Card>> {
    let mut three = details.group_of(3)?;
    let two = details.group_of(2)?;
    three.extend(two);
    Some(three)
}

fn match_flush(details: &HandDetails) -> Option<Vec<Card>> {
    let cards = &details.cards;
    if cards.len() != 5 || cards.iter().any(|card| card.suit == Suit::Unknown) {
        return None;
    }
    let mut suits = cards
        .iter()
        .filter(|card| !card.is_wild())
        .map(|card| card.suit);
    let first = suits.next();
    match first {
        Some(suit) if !suits.all(|other| other == suit) => None,
        _ => Some(cards.clone()),
    }
}

fn match_straight(details: &HandDetails) -> Option<Vec<Card>> {
    let cards = &details.cards;
    if cards.len() != 5 {
        return None;
    }
    let mut values: Vec<u8> = cards.iter().map(|card| card.rank.order()).collect();
    values.sort_unstable_by(|a, b| b.cmp(a));
    let wheel = values == [14, 5, 4, 3, 2];
    let run = values.windows(2).all(|w| w[0] == w[1] + 1);
    (wheel || run).then(|| cards.clone())
}

fn match_three_of_a_kind(details: &HandDetails) -> Option<Vec<Card>> {
    details.group_of(3)
}

fn match_two_pair(details: &HandDetails) -> Option<Vec<Card>> {
    let pairs: Vec<&RankGroup> = details
        .groups
        .iter()
        .filter(|group| group.cards.len() == 2)
        .collect();
    if pairs.len() != 2 {
        return None;
    }
    Some(
        pairs
            .into_iter()
            .flat_map(|group| group.cards.iter().copied())
            .collect(),
    )
}

fn match_pair(details: &HandDetails) -> Option<Vec<Card>> {
    details.group_of(2)
}

fn match_high_card(details: &HandDetails) -> Option<Vec<Card>> {
    let mut best: Option<&Card> = None;
    for card in &details.cards {
        if best.map(|b| card.rank_chips() > b.rank_chips()).unwrap_or(true) {
            best = Some(card);
        }
    }
    best.map(|card| vec![*card])
}
