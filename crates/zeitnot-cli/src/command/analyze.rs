use std::path::{Path, PathBuf};

use anyhow::{Context as _, bail};
use chrono::Local;
use clap::Args;
use tracing::info;
use zeitnot_analysis::{AnalysisConfig, analyze_game};
use zeitnot_model::{GameInput, TimeControl};

#[derive(Debug, Clone, Args)]
pub struct AnalyzeArg {
    /// Game input file: one game object or an array of them
    #[arg(long)]
    input: PathBuf,
    /// Report file to write; stdout when neither this nor --output-dir
    /// is given
    #[arg(long, conflicts_with = "output_dir")]
    output: Option<PathBuf>,
    /// Directory to write a timestamped report file into
    #[arg(long)]
    output_dir: Option<PathBuf>,
    /// Time control override, e.g. 180+2
    #[arg(long)]
    time_control: Option<String>,
    /// Search depth recorded for the engine collaborator
    #[arg(long)]
    depth: Option<u16>,
    #[arg(long)]
    multipv: Option<u8>,
    #[arg(long)]
    movetime_ms: Option<u64>,
    #[arg(long)]
    threads: Option<u32>,
    #[arg(long)]
    hash_mb: Option<u32>,
    /// Centipawns of time equity per second of clock differential
    #[arg(long)]
    alpha: Option<f32>,
    /// Asymptotic ceiling (cp) for the time equity magnitude
    #[arg(long)]
    beta: Option<f32>,
    /// Logistic steepness for cp -> win probability
    #[arg(long)]
    k_sigmoid: Option<f32>,
    /// Clock seconds below which pressure amplification activates
    #[arg(long)]
    time_pressure_pivot: Option<f32>,
    #[arg(long)]
    time_pressure_scale: Option<f32>,
    #[arg(long)]
    time_pressure_boost: Option<f32>,
}

pub fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let config = build_config(arg)?;
    let text = std::fs::read_to_string(&arg.input)
        .with_context(|| format!("failed to read {}", arg.input.display()))?;

    let games = parse_inputs(&text)
        .with_context(|| format!("{} is not a valid game input file", arg.input.display()))?;
    if games.is_empty() {
        bail!("no games found in {}", arg.input.display());
    }
    let batch = games.len() > 1;

    let mut reports = Vec::with_capacity(games.len());
    for game in games {
        let report = analyze_game(game.meta, game.plies, &config)?;
        info!(
            white = report.meta.white.as_deref().unwrap_or("?"),
            black = report.meta.black.as_deref().unwrap_or("?"),
            plies = report.summary.total_plies,
            "analyzed game"
        );
        reports.push(report);
    }

    let json = if batch {
        serde_json::to_string_pretty(&reports)?
    } else {
        serde_json::to_string_pretty(&reports[0])?
    };
    write_output(arg, &json)
}

fn parse_inputs(text: &str) -> anyhow::Result<Vec<GameInput>> {
    if let Ok(batch) = serde_json::from_str::<Vec<GameInput>>(text) {
        return Ok(batch);
    }
    let single: GameInput = serde_json::from_str(text)?;
    Ok(vec![single])
}

fn build_config(arg: &AnalyzeArg) -> anyhow::Result<AnalysisConfig> {
    let mut config = AnalysisConfig::default();
    if let Some(raw) = arg.time_control.as_deref() {
        let Some(tc) = parse_time_control(raw) else {
            bail!("invalid --time-control value '{raw}', use a format like 180+2");
        };
        config.time_control = Some(tc);
    }

    if let Some(depth) = arg.depth {
        config.engine.depth = depth;
    }
    if let Some(multipv) = arg.multipv {
        config.engine.multipv = multipv;
    }
    config.engine.movetime_ms = arg.movetime_ms.or(config.engine.movetime_ms);
    config.engine.threads = arg.threads.or(config.engine.threads);
    config.engine.hash_mb = arg.hash_mb.or(config.engine.hash_mb);

    if let Some(alpha) = arg.alpha {
        config.alpha = alpha;
    }
    if let Some(beta) = arg.beta {
        config.beta = beta;
    }
    if let Some(k) = arg.k_sigmoid {
        config.k_sigmoid = k;
    }
    if let Some(pivot) = arg.time_pressure_pivot {
        config.time_pressure_pivot = pivot;
    }
    if let Some(scale) = arg.time_pressure_scale {
        config.time_pressure_scale = scale;
    }
    if let Some(boost) = arg.time_pressure_boost {
        config.time_pressure_boost = boost;
    }

    config.validate()?;
    Ok(config)
}

/// Parses `"180+2"` or `"300"` into a [`TimeControl`].
fn parse_time_control(raw: &str) -> Option<TimeControl> {
    let (base, increment) = match raw.split_once('+') {
        Some((base, increment)) => (base.trim(), increment.trim()),
        None => (raw.trim(), "0"),
    };
    Some(TimeControl {
        base_secs: base.parse().ok()?,
        increment_secs: increment.parse().ok()?,
    })
}

fn write_output(arg: &AnalyzeArg, json: &str) -> anyhow::Result<()> {
    let path = match (&arg.output, &arg.output_dir) {
        (Some(path), _) => Some(path.clone()),
        (None, Some(dir)) => Some(timestamped_path(dir)),
        (None, None) => None,
    };
    match path {
        Some(path) => {
            std::fs::write(&path, json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            info!(path = %path.display(), "report written");
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn timestamped_path(dir: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%d-%H%M%S");
    dir.join(format!("zeitnot-report-{stamp}.json"))
}
