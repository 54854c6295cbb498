use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "croprisk", version, about = "Crop yield-loss risk predictor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a risk policy YAML (thresholds and explainer weights)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate a risk report for a district and crop
    Predict {
        /// District name (see `croprisk districts`)
        #[arg(short, long)]
        district: Option<String>,

        /// Crop name
        #[arg(short, long)]
        crop: String,

        /// Rainfall as percent of normal (manual weather, overrides district lookup)
        #[arg(long)]
        rainfall_pct: Option<f64>,

        /// Heatwave day count
        #[arg(long)]
        heatwave_days: Option<f64>,

        /// Consecutive dry day count
        #[arg(long)]
        dry_days: Option<f64>,

        /// Relative humidity percent
        #[arg(long)]
        humidity: Option<f64>,

        /// Load a previously trained model instead of training at startup
        #[arg(short, long)]
        model: Option<PathBuf>,
    },
    /// Train the model and save the fitted parameters
    Train {
        /// Output path for the model blob
        #[arg(short, long, default_value = "croprisk_model.json")]
        output: PathBuf,

        /// Samples generated per district/crop combination
        #[arg(short, long, default_value_t = 80)]
        samples: usize,

        /// RNG seed for data generation and the train/test split
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List the supported districts and crops
    Districts,
}
