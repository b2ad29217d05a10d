//! logreg demo: trains on two synthetic blobs and reports training accuracy.

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use env_logger::Env;
use log::info;
use logreg::metrics::accuracy;
use logreg::{Float, Label, LogisticRegression, Matrix, TrainConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[derive(Parser)]
#[command(name = "logreg")]
#[command(about = "Train a binary logistic regression on synthetic data")]
#[command(version)]
struct Cli {
    /// JSON training config; missing fields take their defaults
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of synthetic samples
    #[arg(short, long, default_value = "400")]
    samples: usize,

    /// Random seed for data generation and training
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// Two Gaussian-ish blobs around `(-1, -1)` and `(1, 1)`.
fn make_blobs(rng: &mut StdRng, n: usize) -> (Matrix, Vec<Label>) {
    let labels: Vec<Label> = (0..n).map(|i| i % 2).collect();
    let x = Matrix::from_fn(n, 2, |i, _| {
        let center: Float = if labels[i] == 1 { 1.0 } else { -1.0 };
        center + rng.random_range(-0.8..0.8)
    });
    (x, labels)
}

fn load_config(path: Option<&Path>) -> Result<TrainConfig, Box<dyn Error>> {
    match path {
        Some(path) => {
            let raw = fs::read_to_string(path)?;
            let config: TrainConfig = serde_json::from_str(&raw)?;
            info!("loaded config from {}", path.display());
            Ok(config)
        }
        None => Ok(TrainConfig::new()
            .with_learning_rate(0.1)
            .with_num_iters(300)
            .with_verbose(true)),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;
    config.validate()?;

    let mut rng = StdRng::seed_from_u64(cli.seed);
    let (x, y) = make_blobs(&mut rng, cli.samples);

    let mut model = LogisticRegression::new();
    let preds = model.train(&x, &y, &config, &mut rng)?.predict(&x)?;

    let acc = accuracy(&y, &preds)?;
    info!("training accuracy: {:.3}", acc);
    if let Some(w) = model.weights() {
        info!("weights (bias last): {:?}", w.as_slice());
    }

    println!("accuracy {:.3}", acc);
    Ok(())
}
