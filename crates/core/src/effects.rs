//! Joker effects, dispatched by name once per scoring card and once per
//! scored hand. Unknown names do nothing here; their flat stats are
//! applied by the engine.

use crate::{
    Card, CounterJoker, CounterKind, HandDetails, Joker, JokerVariant, PokerHand, Rank,
    RuleEffect, ScoringContext, Suit, TraceSource,
};

/// The hand a per-hand effect sees.
#[derive(Debug, Clone, Copy)]
pub struct PlayedHand<'a> {
    pub hand: PokerHand,
    pub details: &'a HandDetails,
}

fn source(index: usize, joker: &Joker) -> TraceSource {
    TraceSource::Joker {
        index,
        name: joker.name().map(str::to_string),
    }
}

pub fn visit_card(ctx: &mut ScoringContext, index: usize, joker: &mut Joker, card: &Card) {
    let effects = card_effects(ctx, joker, card);
    for effect in effects {
        ctx.apply(source(index, joker), effect);
    }
}

fn card_effects(ctx: &ScoringContext, joker: &mut Joker, card: &Card) -> Vec<RuleEffect> {
    let name = match &mut joker.vars {
        JokerVariant::Photograph { photograph } => {
            if !*photograph && ctx.is_face(card) {
                *photograph = true;
                return vec![RuleEffect::MultiplyMult(2.0)];
            }
            return Vec::new();
        }
        JokerVariant::Counter(_) => return Vec::new(),
        JokerVariant::Simple { name: None } => return Vec::new(),
        JokerVariant::Simple { name: Some(name) } => name.as_str(),
    };

    let rank = card.rank;
    match name {
        "Scholar" if rank == Rank::Ace => {
            vec![RuleEffect::AddChips(20), RuleEffect::AddMult(4.0)]
        }
        "Walkie Talkie" if matches!(rank, Rank::Ten | Rank::Four) => {
            vec![RuleEffect::AddChips(10), RuleEffect::AddMult(4.0)]
        }
        "Scary Face" if ctx.is_face(card) => vec![RuleEffect::AddChips(30)],
        "Smiley Joker" if ctx.is_face(card) => vec![RuleEffect::AddMult(5.0)],
        "Even Steven" if rank.is_even() => vec![RuleEffect::AddMult(4.0)],
        "Odd Todd" if rank.is_odd() => vec![RuleEffect::AddChips(31)],
        "Greedy Joker" if has_suit(card, Suit::Diamonds) => vec![RuleEffect::AddMult(3.0)],
        "Lusty Joker" if has_suit(card, Suit::Hearts) => vec![RuleEffect::AddMult(3.0)],
        "Wrathful Joker" if has_suit(card, Suit::Spades) => vec![RuleEffect::AddMult(3.0)],
        "Gluttonous Joker" if has_suit(card, Suit::Clubs) => vec![RuleEffect::AddMult(3.0)],
        _ => Vec::new(),
    }
}

fn has_suit(card: &Card, suit: Suit) -> bool {
    card.suit == suit || card.is_wild()
}

pub fn visit_hand(ctx: &mut ScoringContext, index: usize, joker: &mut Joker, played: PlayedHand<'_>) {
    let effects = hand_effects(ctx, joker, played);
    for effect in effects {
        ctx.apply(source(index, joker), effect);
    }
}

fn hand_effects(ctx: &ScoringContext, joker: &mut Joker, played: PlayedHand<'_>) -> Vec<RuleEffect> {
    let name = match &mut joker.vars {
        JokerVariant::Counter(counter) => return counter_effects(ctx, counter, played),
        JokerVariant::Photograph { .. } => return Vec::new(),
        JokerVariant::Simple { name: None } => return Vec::new(),
        JokerVariant::Simple { name: Some(name) } => name.as_str(),
    };

    let hand = played.hand;
    match name {
        "Supernova" => vec![RuleEffect::AddMult(ctx.hand_info.count(hand) as f64)],
        "Sly Joker" if hand == PokerHand::Pair => vec![RuleEffect::AddChips(50)],
        "Jolly Joker" if hand == PokerHand::Pair => vec![RuleEffect::AddMult(8.0)],
        "Clever Joker" if hand == PokerHand::TwoPair => vec![RuleEffect::AddChips(80)],
        "Mad Joker" if hand == PokerHand::TwoPair => vec![RuleEffect::AddMult(10.0)],
        "Wily Joker" if hand == PokerHand::ThreeOfAKind => vec![RuleEffect::AddChips(100)],
        "Zany Joker" if hand == PokerHand::ThreeOfAKind => vec![RuleEffect::AddMult(12.0)],
        "Crafty Joker" if hand == PokerHand::Flush => vec![RuleEffect::AddChips(80)],
        "Droll Joker" if hand == PokerHand::Flush => vec![RuleEffect::AddMult(10.0)],
        "Devious Joker" if hand == PokerHand::Straight => vec![RuleEffect::AddChips(100)],
        "Crazy Joker" if hand == PokerHand::Straight => vec![RuleEffect::AddMult(12.0)],
        "Half Joker" if played.details.cards.len() <= 3 => vec![RuleEffect::AddMult(20.0)],
        _ => Vec::new(),
    }
}

/// Applies the counter's current bonus, then moves the counter. The new
/// value carries into the following hands of the pass.
fn counter_effects(
    ctx: &ScoringContext,
    joker: &mut CounterJoker,
    played: PlayedHand<'_>,
) -> Vec<RuleEffect> {
    let before = joker.counter;
    let effect = match joker.name {
        CounterKind::GreenJoker | CounterKind::RideTheBus => {
            joker.counter = before.saturating_add(1);
            RuleEffect::AddMult(before as f64)
        }
        CounterKind::SquareJoker => {
            if played.details.cards.len() == 4 {
                joker.counter = before.saturating_add(1);
            }
            RuleEffect::AddChips(before.saturating_mul(4))
        }
        CounterKind::IceCream => {
            joker.counter = before.saturating_sub(1).max(0);
            RuleEffect::AddChips(before.saturating_mul(5))
        }
        CounterKind::Runner => {
            if played.hand.contains_straight() {
                joker.counter = before.saturating_add(1);
            }
            RuleEffect::AddChips(before.saturating_mul(15))
        }
        CounterKind::Obelisk => {
            joker.counter = if ctx.hand_info.is_most_played(played.hand) {
                0
            } else {
                before.saturating_add(1)
            };
            RuleEffect::MultiplyMult(0.2 * before as f64)
        }
    };
    tracing::trace!(
        joker = joker.name.name(),
        before,
        after = joker.counter,
        "counter joker updated"
    );
    vec![effect]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_joker, parse_hand, HandInfo};

    fn ctx_with(jokers: &[&str]) -> ScoringContext {
        ScoringContext::new(
            HandInfo::new(),
            jokers.iter().map(|name| new_joker(Some(*name))).collect(),
            None,
        )
    }

    fn run_card(ctx: &mut ScoringContext, name: &str, token: &str) -> crate::Score {
        let mut joker = new_joker(Some(name));
        let card = parse_hand(token)[0];
        ctx.begin_hand();
        visit_card(ctx, 0, &mut joker, &card);
        ctx.score
    }

    macro_rules! card_case {
        ($name:ident, $joker:expr, $token:expr, $chips:expr, $mult:expr) => {
            #[test]
            fn $name() {
                let mut ctx = ctx_with(&[]);
                let score = run_card(&mut ctx, $joker, $token);
                assert_eq!(score.chips, $chips);
                assert_eq!(score.mult, $mult);
            }
        };
    }

    card_case!(scholar_ace, "Scholar", "AS", 20, 4.0);
    card_case!(scholar_king, "Scholar", "KS", 0, 0.0);
    card_case!(walkie_ten, "Walkie Talkie", "TD", 10, 4.0);
    card_case!(walkie_four, "Walkie Talkie", "4D", 10, 4.0);
    card_case!(scary_face_jack, "Scary Face", "JC", 30, 0.0);
    card_case!(scary_face_ace, "Scary Face", "AC", 0, 0.0);
    card_case!(smiley_queen, "Smiley Joker", "QH", 0, 5.0);
    card_case!(even_steven_ten, "Even Steven", "TH", 0, 4.0);
    card_case!(even_steven_jack, "Even Steven", "JH", 0, 0.0);
    card_case!(odd_todd_ace, "Odd Todd", "AH", 31, 0.0);
    card_case!(greedy_diamond, "Greedy Joker", "2D", 0, 3.0);
    card_case!(greedy_wild, "Greedy Joker", "2W", 0, 3.0);
    card_case!(lusty_spade, "Lusty Joker", "2S", 0, 0.0);
    card_case!(wrathful_spade, "Wrathful Joker", "2S", 0, 3.0);
    card_case!(gluttonous_club, "Gluttonous Joker", "2C", 0, 3.0);
    card_case!(unknown_name, "Not A Real Joker", "AS", 0, 0.0);

    #[test]
    fn pareidolia_feeds_face_jokers() {
        let mut ctx = ctx_with(&["Pareidolia"]);
        let score = run_card(&mut ctx, "Scary Face", "2C");
        assert_eq!(score.chips, 30);
    }

    #[test]
    fn photograph_fires_once() {
        let mut ctx = ctx_with(&[]);
        ctx.score.mult = 3.0;
        let mut joker = new_joker(Some("Photograph"));
        let cards = parse_hand("2C,KH,QH");
        for card in &cards {
            visit_card(&mut ctx, 0, &mut joker, card);
        }
        assert_eq!(ctx.score.mult, 6.0);
        assert_eq!(joker.vars, JokerVariant::Photograph { photograph: true });
    }

    fn run_hand(ctx: &mut ScoringContext, joker: &mut Joker, text: &str) -> crate::Score {
        let details = HandDetails::new(&parse_hand(text));
        let hand = crate::evaluate_hand(&details.cards).unwrap();
        ctx.begin_hand();
        ctx.score.mult = 1.0;
        visit_hand(ctx, 0, joker, PlayedHand { hand, details: &details });
        ctx.score
    }

    const PAIR: &str = "AH,AS";
    const TWO_PAIR: &str = "AH,AS,KD,KC";
    const THREE: &str = "AH,AS,AD";
    const STRAIGHT: &str = "9H,TS,JD,QC,KC";
    const FLUSH: &str = "2H,5H,7H,9H,JH";

    macro_rules! hand_case {
        ($name:ident, $joker:expr, $hand:expr, $chips:expr, $mult:expr) => {
            #[test]
            fn $name() {
                let mut ctx = ctx_with(&[]);
                let mut joker = new_joker(Some($joker));
                let score = run_hand(&mut ctx, &mut joker, $hand);
                assert_eq!(score.chips, $chips);
                assert_eq!(score.mult, $mult);
            }
        };
    }

    hand_case!(sly_pair, "Sly Joker", PAIR, 50, 1.0);
    hand_case!(sly_three, "Sly Joker", THREE, 0, 1.0);
    hand_case!(jolly_pair, "Jolly Joker", PAIR, 0, 9.0);
    hand_case!(jolly_two_pair, "Jolly Joker", TWO_PAIR, 0, 1.0);
    hand_case!(clever_two_pair, "Clever Joker", TWO_PAIR, 80, 1.0);
    hand_case!(clever_pair, "Clever Joker", PAIR, 0, 1.0);
    hand_case!(mad_two_pair, "Mad Joker", TWO_PAIR, 0, 11.0);
    hand_case!(mad_pair, "Mad Joker", PAIR, 0, 1.0);
    hand_case!(wily_three, "Wily Joker", THREE, 100, 1.0);
    hand_case!(wily_pair, "Wily Joker", PAIR, 0, 1.0);
    hand_case!(zany_three, "Zany Joker", THREE, 0, 13.0);
    hand_case!(zany_two_pair, "Zany Joker", TWO_PAIR, 0, 1.0);
    hand_case!(crafty_flush, "Crafty Joker", FLUSH, 80, 1.0);
    hand_case!(crafty_straight, "Crafty Joker", STRAIGHT, 0, 1.0);
    hand_case!(droll_flush, "Droll Joker", FLUSH, 0, 11.0);
    hand_case!(droll_straight, "Droll Joker", STRAIGHT, 0, 1.0);
    hand_case!(devious_straight, "Devious Joker", STRAIGHT, 100, 1.0);
    hand_case!(devious_flush, "Devious Joker", FLUSH, 0, 1.0);
    hand_case!(crazy_straight, "Crazy Joker", STRAIGHT, 0, 13.0);
    hand_case!(crazy_flush, "Crazy Joker", FLUSH, 0, 1.0);

    #[test]
    fn ride_the_bus_applies_then_counts_up() {
        let mut ctx = ctx_with(&[]);
        let mut bus = new_joker(Some("Ride The Bus"));
        let mults: Vec<f64> = [PAIR, THREE, "KS"]
            .into_iter()
            .map(|hand| run_hand(&mut ctx, &mut bus, hand).mult)
            .collect();
        assert_eq!(mults, vec![1.0, 2.0, 3.0]);
        assert_eq!(
            bus.vars,
            JokerVariant::Counter(CounterJoker {
                name: CounterKind::RideTheBus,
                counter: 3
            })
        );
    }

    #[test]
    fn huge_counters_saturate() {
        let mut ctx = ctx_with(&[]);
        let mut square = new_joker(Some("Square Joker"));
        if let JokerVariant::Counter(counter) = &mut square.vars {
            counter.counter = i64::MAX;
        }
        assert_eq!(run_hand(&mut ctx, &mut square, "AH,KS,2D,3C").chips, i64::MAX);
    }

    #[test]
    fn type_jokers_need_exact_category() {
        let mut ctx = ctx_with(&[]);
        let mut sly = new_joker(Some("Sly Joker"));
        assert_eq!(run_hand(&mut ctx, &mut sly, "AH,AS").chips, 50);
        assert_eq!(run_hand(&mut ctx, &mut sly, "AH,AS,KD,KC").chips, 0);
        let mut droll = new_joker(Some("Droll Joker"));
        assert_eq!(run_hand(&mut ctx, &mut droll, "2H,5H,7H,9H,JH").mult, 11.0);
    }

    #[test]
    fn half_joker_counts_played_cards() {
        let mut ctx = ctx_with(&[]);
        let mut half = new_joker(Some("Half Joker"));
        assert_eq!(run_hand(&mut ctx, &mut half, "AH,KS,2D").mult, 21.0);
        assert_eq!(run_hand(&mut ctx, &mut half, "AH,KS,2D,3C").mult, 1.0);
    }

    #[test]
    fn green_joker_applies_then_counts_up() {
        let mut ctx = ctx_with(&[]);
        let mut green = new_joker(Some("Green Joker"));
        assert_eq!(run_hand(&mut ctx, &mut green, "AH").mult, 1.0);
        assert_eq!(run_hand(&mut ctx, &mut green, "AH").mult, 2.0);
        assert_eq!(run_hand(&mut ctx, &mut green, "AH").mult, 3.0);
    }

    #[test]
    fn square_joker_grows_on_four_cards() {
        let mut ctx = ctx_with(&[]);
        let mut square = new_joker(Some("Square Joker"));
        assert_eq!(run_hand(&mut ctx, &mut square, "AH,KS,2D,3C").chips, 0);
        assert_eq!(run_hand(&mut ctx, &mut square, "AH,KS,2D").chips, 4);
        assert_eq!(run_hand(&mut ctx, &mut square, "AH").chips, 4);
    }

    #[test]
    fn ice_cream_melts_to_zero() {
        let mut ctx = ctx_with(&[]);
        let mut ice = new_joker(Some("Ice Cream"));
        if let JokerVariant::Counter(counter) = &mut ice.vars {
            counter.counter = 1;
        }
        assert_eq!(run_hand(&mut ctx, &mut ice, "AH").chips, 5);
        assert_eq!(run_hand(&mut ctx, &mut ice, "AH").chips, 0);
        assert_eq!(run_hand(&mut ctx, &mut ice, "AH").chips, 0);
    }

    #[test]
    fn runner_grows_on_straights() {
        let mut ctx = ctx_with(&[]);
        let mut runner = new_joker(Some("Runner"));
        assert_eq!(run_hand(&mut ctx, &mut runner, "9H,TS,JD,QC,KC").chips, 0);
        assert_eq!(run_hand(&mut ctx, &mut runner, "AH").chips, 15);
    }

    #[test]
    fn obelisk_resets_on_most_played() {
        let mut ctx = ctx_with(&[]);
        ctx.hand_info.set_count(PokerHand::Pair, 3);
        let mut obelisk = new_joker(Some("Obelisk"));
        // High card is not the most played: x1.0 now, x1.2 next time.
        assert_eq!(run_hand(&mut ctx, &mut obelisk, "AH").mult, 1.0);
        let score = run_hand(&mut ctx, &mut obelisk, "AH,AS");
        assert!((score.mult - 1.2).abs() < 1e-9);
        assert_eq!(
            obelisk.vars,
            JokerVariant::Counter(CounterJoker {
                name: CounterKind::Obelisk,
                counter: 0
            })
        );
        // A reset Obelisk multiplies by zero until it counts back up.
        assert_eq!(run_hand(&mut ctx, &mut obelisk, "KH,KS").mult, 0.0);
        assert_eq!(run_hand(&mut ctx, &mut obelisk, "AH").mult, 0.0);
        assert!((run_hand(&mut ctx, &mut obelisk, "AH").mult - 0.2).abs() < 1e-9);
    }

    #[test]
    fn supernova_uses_hand_count() {
        let mut ctx = ctx_with(&[]);
        ctx.hand_info.set_count(PokerHand::HighCard, 4);
        let mut nova = new_joker(Some("Supernova"));
        assert_eq!(run_hand(&mut ctx, &mut nova, "AH").mult, 5.0);
    }
}
