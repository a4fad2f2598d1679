use crate::{
    apply_boss_blind_debuffs, check_card_count, check_hand_type, classify, parse_hand,
    visit_card, visit_hand, BossBlind, HandDetails, HandInfo, Joker, PlayedHand, PokerHand,
    RuleEffect, ScoreTables, ScoreTraceStep, ScoringContext, TraceSource,
};
use serde::{Deserialize, Serialize};

/// Everything one scoring pass reads. The engine never writes back to it.
/// Written with snake_case keys; camelCase keys are accepted on read.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoundState {
    #[serde(default, alias = "handInfo")]
    pub hand_info: HandInfo,
    #[serde(default)]
    pub jokers: Vec<Joker>,
    #[serde(default)]
    pub rounds: Vec<String>,
    #[serde(default, alias = "bossBlind")]
    pub boss_blind: Option<BossBlind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HandScore {
    pub name: PokerHand,
    pub chips: i64,
    pub mult: f64,
    pub trace: Vec<ScoreTraceStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoredHand {
    pub cards: String,
    pub name: PokerHand,
    pub chips: i64,
    pub mult: f64,
    pub score: f64,
    pub cumulative: f64,
    pub trace: Vec<ScoreTraceStep>,
}

impl ScoringContext {
    pub fn from_state(state: &RoundState, tables: ScoreTables) -> Self {
        Self::with_tables(
            state.hand_info.clone(),
            state.jokers.clone(),
            state.boss_blind,
            tables,
        )
    }
}

/// Scores one played hand against the running context. `None` means the
/// hand does not score: it is empty or the boss blind rejects it.
pub fn score_hand(ctx: &mut ScoringContext, text: &str) -> Option<HandScore> {
    let mut cards = parse_hand(text);
    if cards.is_empty() {
        tracing::debug!(cards = text, "empty hand does not score");
        return None;
    }
    if let Err(reason) = check_card_count(ctx.boss_blind, cards.len()) {
        tracing::debug!(cards = text, ?reason, "hand rejected by boss blind");
        return None;
    }
    apply_boss_blind_debuffs(ctx.boss_blind, ctx.pareidolia, &mut cards);

    let details = HandDetails::new(&cards);
    let Some(classified) = classify(&details, ctx.splash) else {
        unreachable!("high card matches every non-empty hand");
    };
    let hand = classified.hand;
    if let Err(reason) = check_hand_type(ctx.boss_blind, hand, &ctx.played_hand_types) {
        tracing::debug!(cards = text, %hand, ?reason, "hand rejected by boss blind");
        return None;
    }
    ctx.played_hand_types.insert(hand);
    ctx.hand_info.record_play(hand);

    ctx.begin_hand();
    let level = ctx.hand_info.level(hand);
    let level = match ctx.boss_blind {
        Some(blind) => blind.effective_level(level),
        None => level,
    };
    let halve_base = ctx.boss_blind.is_some_and(BossBlind::halves_base);
    let base = ctx.tables.hand_base_for_level(hand, level, halve_base);
    ctx.apply(TraceSource::Base, RuleEffect::AddChips(base.chips));
    ctx.apply(TraceSource::Base, RuleEffect::AddMult(base.mult));

    let scoring: Vec<_> = classified
        .scoring
        .into_iter()
        .filter(|card| !card.debuffed)
        .collect();
    for card in &scoring {
        let source = TraceSource::Card { order: card.order };
        ctx.apply(
            source.clone(),
            RuleEffect::AddChips(card.chips.saturating_add(card.rank_chips())),
        );
        if card.mult != 0 {
            ctx.apply(source.clone(), RuleEffect::AddMult(card.mult as f64));
        }
        if card.xmult != 1.0 {
            ctx.apply(source, RuleEffect::MultiplyMult(card.xmult));
        }
    }

    let mut jokers = std::mem::take(&mut ctx.jokers);
    for card in &scoring {
        for (index, joker) in jokers.iter_mut().enumerate() {
            visit_card(ctx, index, joker, card);
        }
    }
    let played = PlayedHand {
        hand,
        details: &details,
    };
    for (index, joker) in jokers.iter_mut().enumerate() {
        let source = TraceSource::Joker {
            index,
            name: joker.name().map(str::to_string),
        };
        if joker.chips != 0 {
            ctx.apply(source.clone(), RuleEffect::AddChips(joker.chips));
        }
        if joker.mult != 0 {
            ctx.apply(source.clone(), RuleEffect::AddMult(joker.mult as f64));
        }
        if joker.xmult != 1.0 {
            ctx.apply(source, RuleEffect::MultiplyMult(joker.xmult));
        }
        visit_hand(ctx, index, joker, played);
    }
    ctx.jokers = jokers;

    tracing::debug!(
        cards = text,
        %hand,
        chips = ctx.score.chips,
        mult = ctx.score.mult,
        "hand scored"
    );
    Some(HandScore {
        name: hand,
        chips: ctx.score.chips,
        mult: ctx.score.mult,
        trace: ctx.take_trace(),
    })
}

pub fn score_rounds(state: &RoundState) -> Vec<Option<ScoredHand>> {
    score_rounds_with_tables(state, &ScoreTables::default())
}

/// Scores every round in order with one fresh context, so repeated calls
/// with the same state replay joker counters from their initial values.
pub fn score_rounds_with_tables(
    state: &RoundState,
    tables: &ScoreTables,
) -> Vec<Option<ScoredHand>> {
    let mut ctx = ScoringContext::from_state(state, tables.clone());
    let mut cumulative = 0.0;
    state
        .rounds
        .iter()
        .map(|text| {
            let scored = score_hand(&mut ctx, text)?;
            let score = scored.chips as f64 * scored.mult;
            cumulative += score;
            Some(ScoredHand {
                cards: text.clone(),
                name: scored.name,
                chips: scored.chips,
                mult: scored.mult,
                score,
                cumulative,
                trace: scored.trace,
            })
        })
        .collect()
}
