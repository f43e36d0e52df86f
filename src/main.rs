//! Domus - Main Entry Point
//!
//! House price prediction toolkit with statistical drift monitoring.

use clap::Parser;
use domus::cli::{cmd_detect, cmd_gen_drift, cmd_predict, cmd_prepare, Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "domus=info".into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare { source, output } => {
            cmd_prepare(&source, &output)?;
        }
        Commands::GenDrift {
            reference,
            output,
            level,
            seed,
        } => {
            cmd_gen_drift(&reference, &output, &level, seed)?;
        }
        Commands::Detect {
            reference,
            production,
            threshold,
            output_dir,
        } => {
            cmd_detect(&reference, &production, threshold, &output_dir)?;
        }
        Commands::Predict {
            model,
            gr_liv_area,
            bedrooms,
            full_bath,
            year_built,
            total_bsmt_sf,
        } => {
            cmd_predict(&model, gr_liv_area, bedrooms, full_bath, year_built, total_bsmt_sf)?;
        }
    }

    Ok(())
}
