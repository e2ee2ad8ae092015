//! Stance Vector - replay a recorded game and print stances phase by phase
//!
//! Prints one JSON object per line for every phase that follows a movement
//! phase: the phase name, the stance (one nation's row with `--nation`,
//! the full matrix otherwise) and, with `--verbose`, the rationale.

use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use stance_vector::core::error::{Result, StanceError};
use stance_vector::core::types::Nation;
use stance_vector::game::{GameEngine, RecordedGame};
use stance_vector::stance::{
    ActionBasedStance, RationaleLog, ScoreBasedStance, StanceExtraction, StanceMatrix,
};
use stance_vector::StanceConfig;

/// Replay a recorded Diplomacy game through a stance extractor
#[derive(Parser, Debug)]
#[command(name = "stance-vector")]
#[command(about = "Print every power's stance toward every other, phase by phase")]
struct Args {
    /// Recorded game log (JSON)
    log: PathBuf,

    /// Stance configuration (TOML); defaults apply when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Random seed for reproducible betrayals
    #[arg(long)]
    seed: Option<u64>,

    /// Only print this nation's row
    #[arg(long)]
    nation: Option<String>,

    /// Include the rationale behind every entry
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Use the score-based baseline instead of the action-based extractor
    #[arg(long)]
    score: bool,
}

/// One output line
#[derive(Serialize)]
struct PhaseReport {
    phase: String,
    stance: StanceReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    rationale: Option<RationaleReport>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum StanceReport {
    Row(BTreeMap<Nation, f64>),
    Matrix(StanceMatrix),
}

#[derive(Serialize)]
#[serde(untagged)]
enum RationaleReport {
    Row(BTreeMap<Nation, String>),
    Matrix(RationaleLog),
}

enum Extractor {
    Action(ActionBasedStance),
    Score(ScoreBasedStance),
}

impl Extractor {
    fn update(
        &mut self,
        game: &dyn GameEngine,
        verbose: bool,
    ) -> Result<(StanceMatrix, Option<RationaleLog>)> {
        match self {
            Extractor::Action(extractor) if verbose => {
                let (stance, log) = extractor.get_stance_verbose(game, &[])?;
                Ok((stance, Some(log)))
            }
            Extractor::Action(extractor) => Ok((extractor.get_stance(game, &[])?, None)),
            Extractor::Score(extractor) => Ok((extractor.get_stance(game, &[])?, None)),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stance_vector=info")),
        )
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();

    let game = RecordedGame::load(&args.log)?;
    let mut config = match &args.config {
        Some(path) => StanceConfig::load(path)?,
        None => StanceConfig::default(),
    };
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let roster = game.power_names();
    let identity = match &args.nation {
        Some(name) if roster.iter().any(|nation| nation.as_str() == name) => Nation::from(name.as_str()),
        Some(name) => return Err(StanceError::UnknownNation(name.clone())),
        None => roster
            .iter()
            .min()
            .cloned()
            .ok_or_else(|| StanceError::InvalidConfig("game log lists no powers".to_string()))?,
    };

    tracing::info!(
        log = %args.log.display(),
        phases = game.phases.len(),
        powers = roster.len(),
        strategy = if args.score { "score" } else { "action" },
        "replaying game"
    );

    let mut extractor = if args.score {
        Extractor::Score(ScoreBasedStance::new(identity, &game))
    } else {
        Extractor::Action(ActionBasedStance::with_config(identity, &game, config)?)
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for view in game.replay() {
        let Some(last) = view.last_phase() else {
            continue;
        };
        if view.previous_movement_phase().is_none() {
            tracing::debug!(phase = %last.name, "no movement phase yet");
            continue;
        }

        let (stance, rationale) = extractor.update(&view, args.verbose)?;
        let report = match &args.nation {
            Some(name) => PhaseReport {
                phase: last.name.clone(),
                stance: StanceReport::Row(stance.row(name).cloned().unwrap_or_default()),
                rationale: rationale
                    .and_then(|mut log| log.remove(name.as_str()))
                    .map(RationaleReport::Row),
            },
            None => PhaseReport {
                phase: last.name.clone(),
                stance: StanceReport::Matrix(stance),
                rationale: rationale.map(RationaleReport::Matrix),
            },
        };
        serde_json::to_writer(&mut out, &report)?;
        writeln!(out)?;
    }

    Ok(())
}
