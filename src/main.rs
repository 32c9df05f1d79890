// Only compile UI module when TUI feature is enabled
#[cfg(feature = "tui")]
mod ui;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};

// Use library instead of local modules
use merger_analysis::{
    analyze_merger, analyze_scenarios, load_scenarios, logging, AnalysisEnvelope, CompanyFinancials,
    MergerInputs, MergerReport,
};

#[derive(Debug, Parser)]
#[command(name = "merger-analysis", version, about = "Two-company merger ratio analysis")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Analyze one merger from command-line values
    #[command(allow_negative_numbers = true)]
    Analyze {
        #[command(flatten)]
        inputs: InputArgs,

        /// Print JSON instead of the text report
        #[arg(long)]
        json: bool,
    },
    /// Analyze every scenario in a CSV file
    Batch {
        path: PathBuf,

        #[arg(long)]
        json: bool,
    },
    /// Interactive terminal UI (default)
    Ui,
}

/// The eleven inputs; defaults reproduce the illustrative example
#[derive(Debug, Args)]
struct InputArgs {
    #[arg(long, default_value_t = 5_000_000.0)]
    earnings_a: f64,
    #[arg(long, default_value_t = 1_000_000.0)]
    shares_a: f64,
    #[arg(long, default_value_t = 10.0)]
    share_price_a: f64,
    #[arg(long, default_value_t = 2_000_000.0)]
    total_debt_a: f64,
    #[arg(long, default_value_t = 8_000_000.0)]
    total_equity_a: f64,

    #[arg(long, default_value_t = 2_000_000.0)]
    earnings_b: f64,
    #[arg(long, default_value_t = 500_000.0)]
    shares_b: f64,
    #[arg(long, default_value_t = 8.0)]
    share_price_b: f64,
    #[arg(long, default_value_t = 1_000_000.0)]
    total_debt_b: f64,
    #[arg(long, default_value_t = 4_000_000.0)]
    total_equity_b: f64,

    #[arg(long, default_value_t = 10_000_000.0)]
    purchase_price_b: f64,
}

impl From<InputArgs> for MergerInputs {
    fn from(args: InputArgs) -> Self {
        MergerInputs::new(
            CompanyFinancials {
                earnings: args.earnings_a,
                shares_outstanding: args.shares_a,
                share_price: args.share_price_a,
                total_debt: args.total_debt_a,
                total_equity: args.total_equity_a,
            },
            CompanyFinancials {
                earnings: args.earnings_b,
                shares_outstanding: args.shares_b,
                share_price: args.share_price_b,
                total_debt: args.total_debt_b,
                total_equity: args.total_equity_b,
            },
            args.purchase_price_b,
        )
    }
}

#[derive(Serialize)]
struct BatchEntry {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    report: Option<MergerReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn main() -> Result<()> {
    logging::init_logging("warn,merger_analysis=info");

    let cli = Cli::parse();

    match cli.command {
        Some(Command::Analyze { inputs, json }) => run_analyze(inputs.into(), json)?,
        Some(Command::Batch { path, json }) => run_batch(&path, json)?,
        Some(Command::Ui) | None => run_ui_mode()?,
    }

    Ok(())
}

fn run_analyze(inputs: MergerInputs, json: bool) -> Result<()> {
    inputs.ensure_finite()?;
    let result = analyze_merger(&inputs).context("Merger analysis failed")?;
    let report = MergerReport::from_result(&result);

    if json {
        let envelope = AnalysisEnvelope::new(inputs, report);
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        println!("{}", report.render_text());
    }

    Ok(())
}

fn run_batch(path: &Path, json: bool) -> Result<()> {
    let scenarios = load_scenarios(path)
        .with_context(|| format!("Failed to load scenarios from {}", path.display()))?;

    let entries: Vec<BatchEntry> = analyze_scenarios(&scenarios)
        .into_iter()
        .map(|outcome| match outcome.outcome {
            Ok(result) => BatchEntry {
                name: outcome.name,
                report: Some(MergerReport::from_result(&result)),
                error: None,
            },
            Err(e) => BatchEntry {
                name: outcome.name,
                report: None,
                error: Some(e.to_string()),
            },
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("📂 {} scenarios from {}", entries.len(), path.display());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    for entry in &entries {
        match (&entry.report, &entry.error) {
            (Some(report), _) => println!("✓ {:<20} {}", entry.name, report.summary()),
            (None, Some(error)) => println!("❌ {:<20} {}", entry.name, error),
            (None, None) => {}
        }
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode() -> Result<()> {
    let mut app = ui::App::new(MergerInputs::default());
    ui::run_ui(&mut app)?;
    Ok(())
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode() -> Result<()> {
    eprintln!("❌ TUI mode not available!");
    eprintln!("   Rebuild with: cargo build --features tui");
    eprintln!("   Or use: merger-analysis analyze --help");
    std::process::exit(1);
}
