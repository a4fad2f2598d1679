use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
    Wild,
    Unknown,
}

impl Suit {
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            'C' => Some(Suit::Clubs),
            'D' => Some(Suit::Diamonds),
            'H' => Some(Suit::Hearts),
            'S' => Some(Suit::Spades),
            'W' => Some(Suit::Wild),
            _ => None,
        }
    }

    /// Token letter; unknown suits are written without one.
    pub fn letter(self) -> Option<char> {
        match self {
            Suit::Clubs => Some('C'),
            Suit::Diamonds => Some('D'),
            Suit::Hearts => Some('H'),
            Suit::Spades => Some('S'),
            Suit::Wild => Some('W'),
            Suit::Unknown => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '2' => Some(Rank::Two),
            '3' => Some(Rank::Three),
            '4' => Some(Rank::Four),
            '5' => Some(Rank::Five),
            '6' => Some(Rank::Six),
            '7' => Some(Rank::Seven),
            '8' => Some(Rank::Eight),
            '9' => Some(Rank::Nine),
            'T' => Some(Rank::Ten),
            'J' => Some(Rank::Jack),
            'Q' => Some(Rank::Queen),
            'K' => Some(Rank::King),
            'A' => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        }
    }

    /// Straight ordering value, ace high.
    pub fn order(self) -> u8 {
        match self {
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten => 10,
            Rank::Jack => 11,
            Rank::Queen => 12,
            Rank::King => 13,
            Rank::Ace => 14,
        }
    }

    pub fn chips(self) -> i64 {
        match self {
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
            Rank::Ace => 11,
            other => other.order() as i64,
        }
    }

    pub fn is_face(self) -> bool {
        matches!(self, Rank::Jack | Rank::Queen | Rank::King)
    }

    /// Even Steven counts the ten; Odd Todd counts the ace.
    pub fn is_even(self) -> bool {
        matches!(
            self,
            Rank::Two | Rank::Four | Rank::Six | Rank::Eight | Rank::Ten
        )
    }

    pub fn is_odd(self) -> bool {
        matches!(
            self,
            Rank::Three | Rank::Five | Rank::Seven | Rank::Nine | Rank::Ace
        )
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub order: usize,
    pub rank: Rank,
    pub suit: Suit,
    #[serde(default)]
    pub chips: i64,
    #[serde(default)]
    pub mult: i64,
    #[serde(default = "default_xmult")]
    pub xmult: f64,
    #[serde(default)]
    pub debuffed: bool,
}

fn default_xmult() -> f64 {
    1.0
}

impl Card {
    pub fn standard(order: usize, rank: Rank, suit: Suit) -> Self {
        Self {
            order,
            rank,
            suit,
            chips: 0,
            mult: 0,
            xmult: 1.0,
            debuffed: false,
        }
    }

    pub fn is_wild(&self) -> bool {
        self.suit == Suit::Wild
    }

    pub fn rank_chips(&self) -> i64 {
        self.rank.chips()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rank.letter())?;
        if let Some(letter) = self.suit.letter() {
            write!(f, "{letter}")?;
        }
        if self.chips != 0 {
            write!(f, " C{}", self.chips)?;
        }
        if self.mult != 0 {
            write!(f, " M{}", self.mult)?;
        }
        if self.xmult != 1.0 {
            write!(f, " X{}", self.xmult)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_chip_values() {
        assert_eq!(Rank::Two.chips(), 2);
        assert_eq!(Rank::Nine.chips(), 9);
        assert_eq!(Rank::Ten.chips(), 10);
        assert_eq!(Rank::King.chips(), 10);
        assert_eq!(Rank::Ace.chips(), 11);
    }

    #[test]
    fn parity_covers_ten_and_ace() {
        assert!(Rank::Ten.is_even());
        assert!(Rank::Ace.is_odd());
        assert!(!Rank::King.is_even() && !Rank::King.is_odd());
    }

    #[test]
    fn display_omits_default_segments() {
        let mut card = Card::standard(0, Rank::Ace, Suit::Hearts);
        assert_eq!(card.to_string(), "AH");
        card.chips = 10;
        card.xmult = 2.0;
        assert_eq!(card.to_string(), "AH C10 X2");
        let unknown = Card::standard(1, Rank::Ten, Suit::Unknown);
        assert_eq!(unknown.to_string(), "T");
    }
}
