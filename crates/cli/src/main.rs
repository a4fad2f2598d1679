use anyhow::{bail, Context};
use chipcalc_core::{
    display_counter, new_joker, parse_hand_detailed, score_rounds_with_tables, BossBlind,
    CounterJoker, CounterKind, PokerHand, RoundState, ScoreTables, ScoredHand, JOKERS,
};
use chipcalc_data::{load_round_state, load_score_tables};
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{fmt, EnvFilter};

const USAGE: &str = "usage:
  chipcalc score [--state FILE] [--hand TEXT]... [--joker NAME]... [--boss NAME]
                 [--level HAND=LVL]... [--config DIR] [--json] [--verbose]
  chipcalc parse TEXT
  chipcalc jokers
  chipcalc bosses";

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Score(ScoreOptions),
    Parse(String),
    Jokers,
    Bosses,
    Help,
}

#[derive(Debug, Clone, Default, PartialEq)]
struct ScoreOptions {
    state: Option<PathBuf>,
    hands: Vec<String>,
    jokers: Vec<String>,
    boss: Option<BossBlind>,
    levels: Vec<(PokerHand, u32)>,
    config: Option<PathBuf>,
    json: bool,
    verbose: bool,
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<Command> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];
    match command.as_str() {
        "score" => parse_score_options(rest).map(Command::Score),
        "parse" => match rest {
            [text] => Ok(Command::Parse(text.clone())),
            _ => bail!("parse takes exactly one hand"),
        },
        "jokers" => Ok(Command::Jokers),
        "bosses" => Ok(Command::Bosses),
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => bail!("unknown command {other:?}"),
    }
}

fn parse_score_options(args: &[String]) -> anyhow::Result<ScoreOptions> {
    let mut options = ScoreOptions::default();
    let mut idx = 0usize;
    while idx < args.len() {
        let flag = args[idx].as_str();
        match flag {
            "--json" => options.json = true,
            "--verbose" | "-v" => options.verbose = true,
            "--state" | "--hand" | "--joker" | "--boss" | "--level" | "--config" => {
                let Some(value) = args.get(idx + 1) else {
                    bail!("{flag} needs a value");
                };
                idx += 1;
                match flag {
                    "--state" => options.state = Some(PathBuf::from(value)),
                    "--hand" => options.hands.push(value.clone()),
                    "--joker" => options.jokers.push(parse_joker_name(value)?),
                    "--boss" => options.boss = Some(value.parse()?),
                    "--level" => options.levels.push(parse_level(value)?),
                    _ => options.config = Some(PathBuf::from(value)),
                }
            }
            other => bail!("unknown option {other:?}"),
        }
        idx += 1;
    }
    Ok(options)
}

fn parse_joker_name(value: &str) -> anyhow::Result<String> {
    JOKERS
        .iter()
        .find(|name| name.eq_ignore_ascii_case(value))
        .map(|name| name.to_string())
        .with_context(|| format!("unknown joker {value:?}, see `chipcalc jokers`"))
}

fn parse_level(value: &str) -> anyhow::Result<(PokerHand, u32)> {
    let Some((hand, level)) = value.split_once('=') else {
        bail!("level must look like HAND=LVL, got {value:?}");
    };
    let hand: PokerHand = hand.trim().parse()?;
    let level: u32 = level
        .trim()
        .parse()
        .with_context(|| format!("bad level in {value:?}"))?;
    Ok((hand, level))
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn build_state(options: &ScoreOptions) -> anyhow::Result<RoundState> {
    let mut state = match &options.state {
        Some(path) => load_round_state(path)?,
        None => RoundState::default(),
    };
    state.rounds.extend(options.hands.iter().cloned());
    state
        .jokers
        .extend(options.jokers.iter().map(|name| new_joker(Some(name.as_str()))));
    if options.boss.is_some() {
        state.boss_blind = options.boss;
    }
    for (hand, level) in &options.levels {
        state
            .hand_info
            .set_level(*hand, *level)
            .with_context(|| format!("set level of {hand}"))?;
    }
    Ok(state)
}

#[derive(Serialize)]
struct ScoreReport<'a> {
    boss_blind: Option<BossBlind>,
    results: &'a [Option<ScoredHand>],
    total: f64,
}

fn run_score(options: &ScoreOptions) -> anyhow::Result<()> {
    let state = build_state(options)?;
    if state.rounds.is_empty() {
        bail!("nothing to score, pass --hand or --state");
    }
    let tables = match &options.config {
        Some(dir) => load_score_tables(dir)?,
        None => ScoreTables::default(),
    };
    let results = score_rounds_with_tables(&state, &tables);
    let total = results
        .iter()
        .flatten()
        .last()
        .map_or(0.0, |hand| hand.cumulative);
    if options.json {
        let report = ScoreReport {
            boss_blind: state.boss_blind,
            results: &results,
            total,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }
    if let Some(blind) = state.boss_blind {
        println!("boss blind: {} ({})", blind, blind.description());
    }
    for line in format_results(&state.rounds, &results) {
        println!("{line}");
    }
    println!("total: {}", format_number(total));
    Ok(())
}

fn format_results(rounds: &[String], results: &[Option<ScoredHand>]) -> Vec<String> {
    let hand_width = rounds
        .iter()
        .map(|text| text.chars().count())
        .max()
        .unwrap_or(0)
        .max("Hand".len());
    let mut lines = vec![format!(
        "{:>3}  {:<hand_width$}  {:>6}  {:>8}  {:>10}  {:>12}  {}",
        "#", "Hand", "Chips", "Mult", "Score", "Cumulative", "Type"
    )];
    for (idx, (text, result)) in rounds.iter().zip(results).enumerate() {
        let line = match result {
            Some(hand) => format!(
                "{:>3}  {:<hand_width$}  {:>6}  {:>8}  {:>10}  {:>12}  {}",
                idx + 1,
                text,
                hand.chips,
                format_number(hand.mult),
                format_number(hand.score),
                format_number(hand.cumulative),
                hand.name
            ),
            None => format!(
                "{:>3}  {:<hand_width$}  {:>6}  {:>8}  {:>10}  {:>12}  {}",
                idx + 1,
                text,
                "-",
                "-",
                "-",
                "-",
                "-"
            ),
        };
        lines.push(line);
    }
    lines
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.2}")
    }
}

fn run_parse(text: &str) {
    let parsed = parse_hand_detailed(text);
    for card in &parsed.cards {
        println!("{:>2}  {card}", card.order);
    }
    if let Some(stop) = &parsed.stopped_at {
        println!(
            "stopped at token {} ({:?}): {}",
            stop.index, stop.token, stop.reason
        );
    }
}

fn run_jokers() {
    for name in JOKERS {
        match CounterKind::from_name(name) {
            Some(kind) => println!("{name}  [{}]", display_counter(&CounterJoker::new(kind))),
            None => println!("{name}"),
        }
    }
}

fn run_bosses() {
    for blind in BossBlind::ALL {
        println!("{:<12}  {}", blind.name(), blind.description());
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Score(options) => {
            init_logging(options.verbose);
            run_score(&options)
        }
        Command::Parse(text) => {
            init_logging(false);
            run_parse(&text);
            Ok(())
        }
        Command::Jokers => {
            run_jokers();
            Ok(())
        }
        Command::Bosses => {
            run_bosses();
            Ok(())
        }
        Command::Help => {
            println!("{USAGE}");
            Ok(())
        }
    }
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let command = match parse_cli_options(&args) {
        Ok(command) => command,
        Err(err) => {
            eprintln!("error: {err:#}\n\n{USAGE}");
            return ExitCode::from(2);
        }
    };
    match run(command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
