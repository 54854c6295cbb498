mod app;
mod cli;
mod config;
mod datasources;
mod error;
mod logic;
mod models;

use anyhow::{bail, Context};
use app::{PredictionInput, Predictor};
use clap::Parser;
use cli::{Cli, Commands};
use config::RiskPolicy;
use logic::YieldLossModel;
use models::WeatherObservation;
use tracing_subscriber::EnvFilter;

const DEFAULT_SAMPLES_PER_COMBO: usize = 80;
const DEFAULT_SEED: u64 = 42;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let policy = match &cli.policy {
        Some(path) => RiskPolicy::load(path)
            .with_context(|| format!("failed to load policy {}", path.display()))?,
        None => RiskPolicy::default(),
    };

    match cli.command {
        Commands::Predict {
            district,
            crop,
            rainfall_pct,
            heatwave_days,
            dry_days,
            humidity,
            model,
        } => {
            let predictor = match model {
                Some(path) => {
                    let model = YieldLossModel::load(&path)
                        .with_context(|| format!("failed to load model {}", path.display()))?;
                    Predictor::with_model(policy, model)?
                }
                None => Predictor::train(policy, DEFAULT_SAMPLES_PER_COMBO, DEFAULT_SEED)?,
            };

            let manual = [rainfall_pct, heatwave_days, dry_days, humidity];
            let input = match (rainfall_pct, heatwave_days, dry_days, humidity) {
                (Some(rain), Some(heat), Some(dry), Some(hum)) => {
                    PredictionInput::Manual(WeatherObservation::new(rain, heat, dry, hum))
                }
                _ if manual.iter().any(Option::is_some) => {
                    bail!("manual weather requires all of --rainfall-pct, --heatwave-days, --dry-days and --humidity")
                }
                _ => match &district {
                    Some(d) => PredictionInput::District(d),
                    None => bail!("either --district or the four manual weather flags are required"),
                },
            };

            println!("{}", predictor.predict_and_report(input, &crop));
        }
        Commands::Train {
            output,
            samples,
            seed,
        } => {
            let predictor = Predictor::train(policy, samples, seed)?;
            predictor.model().save(&output)?;
            println!(
                "Model trained (quality score {:.3}) and saved to {}",
                predictor.quality_score()?,
                output.display()
            );
        }
        Commands::Districts => {
            println!("Districts:");
            for district in datasources::DISTRICTS {
                println!("  {district}");
            }
            println!("Crops:");
            for crop in datasources::CROPS {
                println!("  {crop}");
            }
        }
    }

    Ok(())
}
