use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use knnapi::server::KnnResponse;
use knnapi::{Classification, Classifier, Point, Verdict};

use crate::config::Config;

/// k-nearest-neighbors classification service.
#[derive(Parser)]
#[command(
    name = "knnapi",
    version,
    about = "k-nearest-neighbors classification of 2-D points"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP classification service.
    Serve(ServeArgs),
    /// Classify a single point from the command line.
    Classify(ClassifyArgs),
}

/// Arguments for the `serve` subcommand.
#[derive(clap::Args)]
pub struct ServeArgs {
    /// Override bind address from config.
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Override dataset file path or URL from config.
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Override the CORS allowed origin from config.
    #[arg(long)]
    pub allow_origin: Option<String>,
}

/// Arguments for the `classify` subcommand.
#[derive(clap::Args)]
pub struct ClassifyArgs {
    /// X coordinate of the query point.
    #[arg(short, long, allow_negative_numbers = true)]
    pub x: f64,

    /// Y coordinate of the query point.
    #[arg(short, long, allow_negative_numbers = true)]
    pub y: f64,

    /// Neighbor count; repeat to evaluate several in order.
    #[arg(short, required = true)]
    pub k: Vec<u8>,

    /// Override dataset file path or URL from config.
    #[arg(short, long)]
    pub dataset: Option<String>,

    /// Print the full result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Loads the dataset once and runs the requested k-sequence.
pub async fn run_classify(args: ClassifyArgs, mut config: Config) -> Result<()> {
    config.override_dataset(args.dataset);

    let records = config
        .dataset
        .load()
        .await
        .with_context(|| format!("failed to load dataset from {}", config.dataset))?;

    let ks: Vec<usize> = args.k.iter().map(|&k| usize::from(k)).collect();
    let mut classifier = Classifier::new(records);
    let result = classifier
        .classify_sequence(&ks, Point::unlabeled(args.x, args.y))
        .context("classification failed")?;

    if args.json {
        println!("{}", render_json(result)?);
    } else {
        print!("{}", render(&result));
    }

    Ok(())
}

/// Same body `POST /api/knn` answers with.
fn render_json(result: Classification) -> Result<String> {
    Ok(serde_json::to_string_pretty(&KnnResponse::from(result))?)
}

fn render(result: &Classification) -> String {
    let mut out = String::new();

    for verdict in &result.verdicts {
        match verdict {
            Verdict::Classified { k, label, tally } => {
                let counts: Vec<String> = tally
                    .iter()
                    .map(|c| format!("{}: {}", c.label, c.count))
                    .collect();
                out.push_str(&format!("[*] Using k as {k}\n"));
                out.push_str(&format!("[*] Votes: {}\n", counts.join(", ")));
                match label {
                    Some(label) => out.push_str(&format!("[*] Dominant label: {label}\n")),
                    None => out.push_str("[*] No neighbors voted\n"),
                }
            }
            Verdict::Skipped { k, dataset_size } => {
                out.push_str(&format!(
                    "[!] Skipping k = {k}: dataset has only {dataset_size} records\n"
                ));
            }
        }
    }

    out.push_str(&format!("Result: {}\n", result.point));
    out
}
