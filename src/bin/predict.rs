//! Headless car price prediction.
//!
//! Loads the model once, builds one record from the flags, applies the input
//! gate and prints the result.
//!
//! # Usage
//! ```sh
//! cargo run --bin predict -- --year 2018 --mileage 62000 --make Honda --body-style SUV
//! ```
//!
//! # Environment Variables
//! - `MODEL_PATH` - Model artifact location (default: `random_forest_model.json`)
//! - `RUST_LOG` - Log filter, logs go to stderr
//!
//! # Exit codes
//! 0 predicted, 1 prediction error, 2 model could not be loaded, 3 input rejected.

use carprice::application::ml::{
    Estimate, InferenceAdapter, ModelArtifact, ModelLoader, PricePredictor,
};
use carprice::config::Config;
use carprice::domain::car::{
    BodyStyle, CarFeatureRecord, Doors, FuelType, MAX_ENGINE_SIZE, MAX_MILEAGE, MAX_YEAR,
    MIN_ENGINE_SIZE, Make, Transmission, snap_engine_size,
};
use carprice::domain::errors::PredictionError;
use carprice::domain::pricing::{ADVISORY_NOTE, FOOTER_NOTE, PredictionResult, RETRY_HINT};
use carprice::domain::validation::VALIDATION_MESSAGE;
use carprice::infrastructure::observability::{LogStyle, init_tracing};
use clap::Parser;
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};

const EXIT_PREDICTION_ERROR: u8 = 1;
const EXIT_LOAD_ERROR: u8 = 2;
const EXIT_REJECTED: u8 = 3;

#[derive(Parser, Debug)]
#[command(author, version, about = "Predict a car's price with the trained model", long_about = None)]
struct Args {
    /// Path to the model artifact (overrides MODEL_PATH)
    #[arg(long)]
    model: Option<PathBuf>,

    /// Model year
    #[arg(long, default_value_t = 2020, value_parser = clap::value_parser!(u16).range(..=i64::from(MAX_YEAR)))]
    year: u16,

    /// Odometer reading in miles
    #[arg(long, default_value_t = 50_000, value_parser = clap::value_parser!(u32).range(..=i64::from(MAX_MILEAGE)))]
    mileage: u32,

    #[arg(long, default_value = "Toyota")]
    make: Make,

    #[arg(long, default_value = "Gasoline")]
    fuel_type: FuelType,

    #[arg(long, default_value = "Automatic")]
    transmission: Transmission,

    /// Engine size in litres (1.0 - 6.0, step 0.1)
    #[arg(long, default_value_t = 2.0, value_parser = parse_engine_size)]
    engine_size: f64,

    #[arg(long, default_value = "Sedan")]
    body_style: BodyStyle,

    /// Number of doors (2, 4 or 5)
    #[arg(long, default_value = "4")]
    doors: Doors,

    /// Print a JSON report instead of text
    #[arg(long)]
    json: bool,

    /// Print the model's input schema and exit
    #[arg(long)]
    show_schema: bool,
}

impl Args {
    fn record(&self) -> CarFeatureRecord {
        CarFeatureRecord {
            year: self.year,
            mileage: self.mileage,
            make: self.make,
            fuel_type: self.fuel_type,
            transmission: self.transmission,
            engine_size: self.engine_size,
            body_style: self.body_style,
            doors: self.doors,
        }
    }
}

fn parse_engine_size(s: &str) -> Result<f64, String> {
    let litres: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s))?;
    if !(MIN_ENGINE_SIZE..=MAX_ENGINE_SIZE).contains(&litres) {
        return Err(format!(
            "engine size must be between {:.1} and {:.1} litres",
            MIN_ENGINE_SIZE, MAX_ENGINE_SIZE
        ));
    }
    Ok(snap_engine_size(litres))
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum Report<'a> {
    Predicted {
        input: &'a CarFeatureRecord,
        price: Decimal,
        formatted: String,
        model: &'a str,
        model_version: &'a str,
    },
    Rejected {
        input: &'a CarFeatureRecord,
        warnings: Vec<String>,
        message: &'static str,
    },
    Failed {
        input: &'a CarFeatureRecord,
        error: String,
    },
    LoadFailed {
        error: String,
    },
}

fn print_json(report: &Report<'_>) {
    match serde_json::to_string_pretty(report) {
        Ok(text) => println!("{}", text),
        Err(e) => error!("Failed to serialize report: {}", e),
    }
}

fn print_schema(artifact: &ModelArtifact) {
    println!("Model:   {} {}", artifact.name(), artifact.version());
    if let Some(trained_at) = artifact.trained_at() {
        println!("Trained: {}", trained_at.format("%Y-%m-%d %H:%M:%S UTC"));
    }
    println!("Columns ({} encoded features):", artifact.schema().width());
    for column in &artifact.schema().columns {
        println!("  - {}", column);
    }
}

fn print_text(record: &CarFeatureRecord, outcome: &Result<Estimate, PredictionError>) {
    println!("Input Features");
    print!("{}", record);
    println!();

    match outcome {
        Ok(Estimate::Price(result)) => print_price(result),
        Ok(Estimate::Rejected(warnings)) => {
            println!("{}", VALIDATION_MESSAGE);
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
        Err(e) => {
            println!("An error occurred during prediction: {}", e);
            println!("{}", RETRY_HINT);
        }
    }

    println!();
    println!("{}", FOOTER_NOTE);
}

fn print_price(result: &PredictionResult) {
    println!("Prediction Results");
    println!("Predicted Car Price: {}", result);
    println!();
    println!("{}", ADVISORY_NOTE);
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(LogStyle::CompactStderr);

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load config: {:#}", e);
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };
    let model_path = args.model.clone().unwrap_or(config.model_path);

    let artifact = match ModelLoader::load(&model_path) {
        Ok(artifact) => artifact,
        Err(e) => {
            if args.json {
                print_json(&Report::LoadFailed {
                    error: e.to_string(),
                });
            } else {
                eprintln!("{}", e.user_message());
            }
            return ExitCode::from(EXIT_LOAD_ERROR);
        }
    };

    if args.show_schema {
        print_schema(&artifact);
        return ExitCode::SUCCESS;
    }

    let adapter = InferenceAdapter::new(Arc::new(artifact));
    let record = args.record();
    info!(
        "Estimating price for {} {} {}",
        record.year, record.make, record.body_style
    );
    let outcome = adapter.estimate(&record);

    if args.json {
        let predictor = adapter.predictor();
        let report = match &outcome {
            Ok(Estimate::Price(result)) => Report::Predicted {
                input: &record,
                price: result.price,
                formatted: result.formatted(),
                model: predictor.name(),
                model_version: predictor.version(),
            },
            Ok(Estimate::Rejected(warnings)) => Report::Rejected {
                input: &record,
                warnings: warnings.iter().map(ToString::to_string).collect(),
                message: VALIDATION_MESSAGE,
            },
            Err(e) => Report::Failed {
                input: &record,
                error: e.to_string(),
            },
        };
        print_json(&report);
    } else {
        print_text(&record, &outcome);
    }

    match outcome {
        Ok(Estimate::Price(_)) => ExitCode::SUCCESS,
        Ok(Estimate::Rejected(_)) => ExitCode::from(EXIT_REJECTED),
        Err(_) => ExitCode::from(EXIT_PREDICTION_ERROR),
    }
}
