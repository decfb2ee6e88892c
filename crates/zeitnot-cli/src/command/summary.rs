use std::path::PathBuf;

use anyhow::Context as _;
use clap::Args;
use zeitnot_model::{GameAnalysis, GameSummary, LabelKind, PhaseAverages};

#[derive(Debug, Clone, Args)]
pub struct SummaryArg {
    /// Persisted report file (one report or an array of them)
    #[arg(long)]
    report: PathBuf,
}

pub fn run(arg: &SummaryArg) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&arg.report)
        .with_context(|| format!("failed to read {}", arg.report.display()))?;
    let reports = parse_reports(&text)
        .with_context(|| format!("{} is not a valid report file", arg.report.display()))?;

    for report in &reports {
        print_report(report);
    }
    Ok(())
}

fn parse_reports(text: &str) -> anyhow::Result<Vec<GameAnalysis>> {
    if let Ok(batch) = serde_json::from_str::<Vec<GameAnalysis>>(text) {
        return Ok(batch);
    }
    let single: GameAnalysis = serde_json::from_str(text)?;
    Ok(vec![single])
}

fn print_report(report: &GameAnalysis) {
    let white = report.meta.white.as_deref().unwrap_or("?");
    let black = report.meta.black.as_deref().unwrap_or("?");
    let result = report.meta.result.as_deref().unwrap_or("*");
    println!("{white} - {black}  {result}");
    print_summary(&report.summary);
    println!();
}

fn print_summary(summary: &GameSummary) {
    println!("  plies analyzed: {}", summary.total_plies);
    println!(
        "  avg think time: {}",
        format_secs(summary.avg_think_time_secs)
    );

    println!("  labels:");
    for kind in LabelKind::ALL {
        let count = summary.labels_count.get(&kind).copied().unwrap_or(0);
        if count > 0 {
            println!("    {kind}: {count}");
        }
    }

    println!(
        "  time trouble: {} moves ({}), panic: {} moves ({}), blunders in trouble: {}",
        summary.time_trouble_moves,
        format_rate(summary.time_trouble_rate),
        summary.panic_moves,
        format_rate(summary.panic_rate),
        summary.blunders_in_time_trouble,
    );

    match summary.phase_time_share {
        Some(shares) => println!(
            "  time per phase: opening {:.0}%, middlegame {:.0}%, endgame {:.0}%",
            shares.opening * 100.0,
            shares.middlegame * 100.0,
            shares.endgame * 100.0,
        ),
        None => println!("  time per phase: no clock data"),
    }
    print_phase_averages("avg think by phase", &summary.phase_avg_think_time_secs);
}

fn print_phase_averages(name: &str, averages: &PhaseAverages) {
    println!(
        "  {name}: opening {}, middlegame {}, endgame {}",
        format_secs(averages.opening),
        format_secs(averages.middlegame),
        format_secs(averages.endgame),
    );
}

fn format_secs(value: Option<f32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.1}s"))
}

fn format_rate(value: Option<f32>) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{:.0}%", v * 100.0))
}
