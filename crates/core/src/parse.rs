//! Played-hand text format: comma-separated tokens of the form
//! `<rank><suit?>[ C<chips>][ M<mult>][ X<xmult>]`.

use crate::{Card, Rank, Suit};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStop {
    pub index: usize,
    pub token: String,
    pub reason: TokenError,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParsedHand {
    pub cards: Vec<Card>,
    pub stopped_at: Option<ParseStop>,
}

impl ParsedHand {
    pub fn is_truncated(&self) -> bool {
        self.stopped_at.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum TokenError {
    #[error("empty card token")]
    Empty,
    #[error("unknown rank {0:?}")]
    Rank(char),
    #[error("unknown suit {0:?}")]
    Suit(char),
    #[error("bad modifier segment {0:?}")]
    Segment(String),
    #[error("modifier segment {0:?} out of order or repeated")]
    SegmentOrder(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("card {index} ({token:?}): {reason}")]
pub struct ParseError {
    pub index: usize,
    pub token: String,
    pub reason: TokenError,
}

/// Parses a hand, keeping the cards before the first malformed token.
pub fn parse_hand(text: &str) -> Vec<Card> {
    parse_hand_detailed(text).cards
}

pub fn parse_hand_detailed(text: &str) -> ParsedHand {
    let mut cards = Vec::new();
    if text.trim().is_empty() {
        return ParsedHand {
            cards,
            stopped_at: None,
        };
    }
    for (index, raw) in text.split(',').enumerate() {
        match parse_card(index, raw) {
            Ok(card) => cards.push(card),
            Err(reason) => {
                tracing::trace!(index, token = raw, %reason, "hand parse stopped");
                return ParsedHand {
                    cards,
                    stopped_at: Some(ParseStop {
                        index,
                        token: raw.to_string(),
                        reason,
                    }),
                };
            }
        }
    }
    ParsedHand {
        cards,
        stopped_at: None,
    }
}

/// Parses a hand, rejecting it if any token is malformed.
pub fn parse_hand_strict(text: &str) -> Result<Vec<Card>, ParseError> {
    let parsed = parse_hand_detailed(text);
    match parsed.stopped_at {
        Some(stop) => Err(ParseError {
            index: stop.index,
            token: stop.token,
            reason: stop.reason,
        }),
        None => Ok(parsed.cards),
    }
}

pub fn parse_card(order: usize, token: &str) -> Result<Card, TokenError> {
    let mut words = token.split_whitespace();
    let head = words.next().ok_or(TokenError::Empty)?;
    let mut chars = head.chars();
    let rank_ch = chars.next().ok_or(TokenError::Empty)?;
    let rank = Rank::from_char(rank_ch).ok_or(TokenError::Rank(rank_ch))?;
    let suit = match chars.next() {
        None => Suit::Unknown,
        Some(ch) => Suit::from_char(ch).ok_or(TokenError::Suit(ch))?,
    };
    if let Some(extra) = chars.next() {
        return Err(TokenError::Suit(extra));
    }

    let mut card = Card::standard(order, rank, suit);
    // C, M and X may each appear once, in that order.
    let mut next_slot = 0;
    for word in words {
        let mut segment = word.chars();
        let position = match segment.next() {
            Some('C') => 0,
            Some('M') => 1,
            Some('X') => 2,
            _ => return Err(TokenError::Segment(word.to_string())),
        };
        let value = segment.as_str();
        if position < next_slot {
            return Err(TokenError::SegmentOrder(word.to_string()));
        }
        next_slot = position + 1;
        match position {
            0 => card.chips = parse_int(word, value)?,
            1 => card.mult = parse_int(word, value)?,
            _ => card.xmult = parse_factor(word, value)?,
        }
    }
    Ok(card)
}

fn parse_int(word: &str, value: &str) -> Result<i64, TokenError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(TokenError::Segment(word.to_string()));
    }
    value
        .parse()
        .map_err(|_| TokenError::Segment(word.to_string()))
}

fn parse_factor(word: &str, value: &str) -> Result<f64, TokenError> {
    let well_formed = !value.is_empty()
        && value.bytes().all(|b| b.is_ascii_digit() || b == b'.')
        && value.bytes().filter(|b| *b == b'.').count() <= 1
        && value.bytes().any(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(TokenError::Segment(word.to_string()));
    }
    value
        .parse()
        .map_err(|_| TokenError::Segment(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_hand() {
        let cards = parse_hand("AH,KH,QH,JH,TH");
        assert_eq!(cards.len(), 5);
        assert_eq!(cards[0].rank, Rank::Ace);
        assert_eq!(cards[0].suit, Suit::Hearts);
        assert_eq!(cards[4].rank, Rank::Ten);
        assert_eq!(cards[4].order, 4);
    }

    #[test]
    fn parses_modifier_segments() {
        let cards = parse_hand("AH C10 M5,KH X2");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0].chips, 10);
        assert_eq!(cards[0].mult, 5);
        assert_eq!(cards[0].xmult, 1.0);
        assert_eq!(cards[1].xmult, 2.0);
    }

    #[test]
    fn missing_suit_is_unknown_and_w_is_wild() {
        let cards = parse_hand("A,5W");
        assert_eq!(cards[0].suit, Suit::Unknown);
        assert_eq!(cards[1].suit, Suit::Wild);
    }

    #[test]
    fn empty_text_is_empty_hand() {
        let parsed = parse_hand_detailed("");
        assert!(parsed.cards.is_empty());
        assert!(!parsed.is_truncated());
    }

    #[test]
    fn bad_token_truncates_the_rest() {
        let parsed = parse_hand_detailed("AH,1H,KH");
        assert_eq!(parsed.cards.len(), 1);
        let stop = parsed.stopped_at.expect("truncated");
        assert_eq!(stop.index, 1);
        assert_eq!(stop.reason, TokenError::Rank('1'));
    }

    #[test]
    fn strict_parse_rejects_bad_tokens() {
        let err = parse_hand_strict("AH,KX").unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.reason, TokenError::Suit('X'));
        assert!(parse_hand_strict("AH, KH ").is_ok());
    }

    #[test]
    fn segments_must_keep_their_order() {
        assert!(matches!(
            parse_card(0, "AH M5 C10"),
            Err(TokenError::SegmentOrder(_))
        ));
        assert!(matches!(
            parse_card(0, "AH X1.5.2"),
            Err(TokenError::Segment(_))
        ));
        assert_eq!(parse_card(0, "AH X1.5").unwrap().xmult, 1.5);
    }
}
