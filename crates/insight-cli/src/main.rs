//! Command-line interface for insight-rs

use clap::Parser;
use comfy_table::{Table, presets::UTF8_FULL};
use insight_core::{AnalysisReport, OutcomeStatus, SubjectProfile};
use insight_engine::InsightEngine;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "insight-cli")]
#[command(about = "Consensus investment analysis for a subject profile", long_about = None)]
struct Args {
    /// Path to a subject profile JSON file
    #[arg(short, long)]
    profile: PathBuf,

    /// Overall analysis budget in seconds
    #[arg(long, default_value_t = 60)]
    budget: u64,

    /// Emit the full report as JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    insight_utils::init_tracing();

    let args = Args::parse();

    let raw = std::fs::read_to_string(&args.profile)?;
    let profile: SubjectProfile = serde_json::from_str(&raw)?;
    info!(subject = %profile.symbol, "loaded subject profile");

    let engine = InsightEngine::builder()
        .executors(insight_analyzers::default_executors())
        .global_budget(Duration::from_secs(args.budget))
        .build()?;

    let report = engine.analyze(&profile).await?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        render(&report);
    }

    Ok(())
}

fn render(report: &AnalysisReport) {
    let consensus = &report.consensus;

    println!(
        "{} ({}) - {}",
        consensus.subject, report.category, consensus.recommendation
    );
    println!("{}", consensus.summary);
    println!();

    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Task", "Status", "Verdict", "Target", "Rationale"]);
    for outcome in &report.outcomes {
        let status = match outcome.status {
            OutcomeStatus::Success => "ok",
            OutcomeStatus::Failed => "failed",
            OutcomeStatus::TimedOut => "timed out",
        };
        table.add_row(vec![
            outcome.kind.label().to_string(),
            status.to_string(),
            outcome
                .verdict
                .map_or_else(|| "-".to_string(), |v| v.to_string()),
            outcome
                .price_target
                .map_or_else(|| "-".to_string(), |p| format!("{p:.2}")),
            outcome.rationale.clone(),
        ]);
    }
    println!("{table}");

    println!();
    if let Some(score) = consensus.consensus_score {
        println!("Consensus score: {score:+.2}");
    }
    if let Some(target) = consensus.target_price {
        println!("Target price:    {target:.2}");
    }
    if let Some(upside) = consensus.upside_potential {
        println!("Upside:          {upside:+.1}%");
    }
    println!("Confidence:      {}", consensus.confidence);
    println!("Risk level:      {}", consensus.risk_level);
    if !consensus.key_risks.is_empty() {
        println!("Key risks:       {}", consensus.key_risks.join("; "));
    }
}
