//! Domus CLI Module
//!
//! Command-line interface for data preparation, synthetic drift
//! generation, drift detection, and price prediction.

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;

use crate::data::{prepare, DriftGenerator, DriftLevel};
use crate::drift::{DriftDetector, DriftSummary, RiskTier};
use crate::serving::{HouseFeatures, PredictionService};

// ─── Styling helpers ───────────────────────────────────────────────────────────

fn dim(s: &str) -> ColoredString {
    s.truecolor(100, 100, 100)
}
fn accent(s: &str) -> ColoredString {
    s.truecolor(120, 170, 255)
}
fn muted(s: &str) -> ColoredString {
    s.truecolor(140, 140, 140)
}
fn ok(s: &str) -> ColoredString {
    s.truecolor(100, 210, 120)
}
fn alert(s: &str) -> ColoredString {
    s.truecolor(230, 120, 100)
}

fn step_run(msg: &str) {
    print!("  {} {}... ", accent("›"), msg);
}

fn step_done(detail: &str) {
    println!("{} {}", ok("done"), dim(detail));
}

fn section(title: &str) {
    println!();
    println!("  {}", title.white().bold());
    println!("  {}", dim(&"─".repeat(56)));
}

// ─── CLI definition ────────────────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "domus")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "House price prediction with drift monitoring")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Prepare the cleaned reference dataset from a raw CSV
    Prepare {
        /// Raw housing CSV
        #[arg(short, long)]
        source: PathBuf,

        /// Cleaned output CSV
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Generate a synthetic production dataset with injected drift
    GenDrift {
        /// Cleaned reference CSV
        #[arg(short, long)]
        reference: PathBuf,

        /// Perturbed output CSV
        #[arg(short, long)]
        output: PathBuf,

        /// Drift level (low, medium, high)
        #[arg(long, default_value = "medium")]
        level: String,

        /// RNG seed
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Detect feature drift between a reference and a production dataset
    Detect {
        /// Reference dataset
        #[arg(short, long)]
        reference: PathBuf,

        /// Production dataset
        #[arg(short, long)]
        production: PathBuf,

        /// p-value cutoff below which drift is declared
        #[arg(short, long, default_value = "0.05")]
        threshold: f64,

        /// Directory for timestamped drift reports
        #[arg(long, default_value = "drift_reports")]
        output_dir: PathBuf,
    },

    /// Predict a house price from a model artifact
    Predict {
        /// Model artifact (JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Above-ground living area in square feet
        #[arg(long)]
        gr_liv_area: f64,

        /// Number of bedrooms above ground
        #[arg(long)]
        bedrooms: i64,

        /// Number of full bathrooms
        #[arg(long)]
        full_bath: i64,

        /// Year of construction
        #[arg(long)]
        year_built: i64,

        /// Basement area in square feet
        #[arg(long)]
        total_bsmt_sf: f64,
    },
}

// ─── Commands ──────────────────────────────────────────────────────────────────

pub fn cmd_prepare(source: &PathBuf, output: &PathBuf) -> anyhow::Result<()> {
    section("Prepare");

    step_run("Cleaning reference data");
    let start = Instant::now();
    let outcome = prepare(source, output)?;
    step_done(&format!(
        "{} → {} rows in {:?}",
        outcome.rows_before,
        outcome.rows_after,
        start.elapsed()
    ));

    println!();
    println!(
        "  {:<18} {}",
        muted("Mean sale price"),
        format!("${:.2}", outcome.mean_sale_price).white().bold()
    );
    println!("  {:<18} {}", muted("Output"), output.display());
    println!();

    Ok(())
}

pub fn cmd_gen_drift(
    reference: &PathBuf,
    output: &PathBuf,
    level: &str,
    seed: u64,
) -> anyhow::Result<()> {
    section("Generate drift");

    let level: DriftLevel = level.parse()?;

    step_run(&format!("Injecting {level:?} drift"));
    let start = Instant::now();
    DriftGenerator::new(level).with_seed(seed).generate(reference, output)?;
    step_done(&format!("{:?}", start.elapsed()));

    println!();
    println!("  {:<18} {}", muted("Output"), output.display());
    println!();

    Ok(())
}

pub fn cmd_detect(
    reference: &PathBuf,
    production: &PathBuf,
    threshold: f64,
    output_dir: &PathBuf,
) -> anyhow::Result<()> {
    section("Detect drift");

    let detector = DriftDetector::new()
        .with_threshold(threshold)
        .with_output_dir(output_dir.clone());

    step_run("Comparing datasets");
    let start = Instant::now();
    let run = detector.run(reference, production)?;
    step_done(&format!("{:?}", start.elapsed()));

    println!();
    for (name, result) in run.report.iter() {
        let flag = if result.drift_detected {
            alert("drift")
        } else {
            ok("stable")
        };
        println!(
            "  {:<14} {}  {}",
            name.white(),
            flag,
            dim(&format!(
                "statistic {:.4}  p {:.4}",
                result.statistic, result.p_value
            ))
        );
    }

    let summary = DriftSummary::from_report(&run.report);
    let risk = match summary.risk {
        RiskTier::Low => ok("LOW"),
        RiskTier::Medium => accent("MEDIUM"),
        RiskTier::High => alert("HIGH"),
    };

    println!();
    println!(
        "  {:<18} {}/{} ({:.1}%)",
        muted("Drifted"),
        summary.features_drifted,
        summary.features_analyzed,
        summary.drift_percentage
    );
    println!("  {:<18} {}", muted("Risk"), risk.bold());
    println!("  {:<18} {}", muted("Report"), run.report_path.display());
    println!();

    Ok(())
}

pub fn cmd_predict(
    model: &PathBuf,
    gr_liv_area: f64,
    bedrooms: i64,
    full_bath: i64,
    year_built: i64,
    total_bsmt_sf: f64,
) -> anyhow::Result<()> {
    section("Predict");

    step_run("Loading model");
    let service = PredictionService::from_artifact(model)?;
    step_done(&format!("{} trees", service.model().n_trees()));

    let features = HouseFeatures {
        gr_liv_area,
        bedroom_abv_gr: bedrooms,
        full_bath,
        year_built,
        total_bsmt_sf,
    };
    let response = service.predict(&features)?;

    println!();
    println!(
        "  {:<18} {}",
        muted("Predicted price"),
        format!("${:.2}", response.predicted_price).white().bold()
    );
    println!(
        "  {:<18} {}",
        muted("Price range"),
        response.price_range.to_string().cyan()
    );
    println!();

    Ok(())
}
