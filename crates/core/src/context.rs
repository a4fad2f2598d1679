use crate::{
    BossBlind, Card, HandInfo, Joker, PokerHand, RuleEffect, Score, ScoreTables, ScoreTraceStep,
    TraceSource,
};
use std::collections::HashSet;

/// Mutable state threaded through every hand of one scoring pass.
///
/// `score` and the trace are per hand; hand counts, played categories and
/// joker counters carry over from one hand to the next.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    pub score: Score,
    pub hand_info: HandInfo,
    pub jokers: Vec<Joker>,
    pub pareidolia: bool,
    pub splash: bool,
    pub boss_blind: Option<BossBlind>,
    pub played_hand_types: HashSet<PokerHand>,
    pub tables: ScoreTables,
    trace: Vec<ScoreTraceStep>,
}

impl ScoringContext {
    pub fn new(hand_info: HandInfo, jokers: Vec<Joker>, boss_blind: Option<BossBlind>) -> Self {
        Self::with_tables(hand_info, jokers, boss_blind, ScoreTables::default())
    }

    pub fn with_tables(
        hand_info: HandInfo,
        jokers: Vec<Joker>,
        boss_blind: Option<BossBlind>,
        tables: ScoreTables,
    ) -> Self {
        let pareidolia = jokers.iter().any(|joker| joker.is_named("Pareidolia"));
        let splash = jokers.iter().any(|joker| joker.is_named("Splash"));
        Self {
            score: Score::default(),
            hand_info,
            jokers,
            pareidolia,
            splash,
            boss_blind,
            played_hand_types: HashSet::new(),
            tables,
            trace: Vec::new(),
        }
    }

    pub fn is_face(&self, card: &Card) -> bool {
        self.pareidolia || card.rank.is_face()
    }

    pub fn begin_hand(&mut self) {
        self.score = Score::default();
        self.trace.clear();
    }

    pub fn apply(&mut self, source: TraceSource, effect: RuleEffect) {
        let before = self.score;
        self.score.apply(&effect);
        self.trace.push(ScoreTraceStep {
            source,
            effect,
            before,
            after: self.score,
        });
    }

    pub fn take_trace(&mut self) -> Vec<ScoreTraceStep> {
        std::mem::take(&mut self.trace)
    }
}
