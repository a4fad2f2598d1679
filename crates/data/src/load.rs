use anyhow::Context;
use chipcalc_core::{HandRule, RoundState, ScoreTables, ScoringConfig};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const HANDS_FILE: &str = "hands.json";

/// Reads `<dir>/hands.json` and rejects duplicate or negative entries.
pub fn load_scoring_config(dir: &Path) -> anyhow::Result<ScoringConfig> {
    let path = dir.join(HANDS_FILE);
    let hands: Vec<HandRule> = load_json(&path)?;
    let config = ScoringConfig { hands };
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    tracing::debug!(
        path = %path.display(),
        hands = config.hands.len(),
        "loaded scoring config"
    );
    Ok(config)
}

pub fn load_score_tables(dir: &Path) -> anyhow::Result<ScoreTables> {
    let config = load_scoring_config(dir)?;
    Ok(ScoreTables::from_config(&config))
}

pub fn load_round_state(path: &Path) -> anyhow::Result<RoundState> {
    let state: RoundState = load_json(path)?;
    tracing::debug!(
        path = %path.display(),
        rounds = state.rounds.len(),
        jokers = state.jokers.len(),
        "loaded round state"
    );
    Ok(state)
}

pub fn save_round_state(path: &Path, state: &RoundState) -> anyhow::Result<()> {
    let raw = serde_json::to_string_pretty(state).context("encode round state")?;
    fs::write(path, raw).with_context(|| format!("write {}", path.display()))
}

fn load_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> anyhow::Result<T> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
