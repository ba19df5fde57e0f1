//! URL Scanner CLI - classifies URLs using an ONNX decision-forest model.
//!
//! Usage:
//!   url-scanner https://example.com --model model.onnx --config model_config.json
//!   url-scanner --input urls.txt --model model.onnx --config model_config.json --format json

use std::path::PathBuf;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::Parser;

use urlscan_core::report::{print_results, OutputFormat};
use urlscan_core::scan::{read_url_list, run_scan, ScanConfig, ScanProgress};

#[derive(Parser)]
#[command(name = "url-scanner")]
#[command(about = "ONNX-based malicious URL scanner")]
struct Cli {
    /// URLs to classify
    urls: Vec<String>,

    /// File with one URL per line (blank lines and # comments skipped)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Path to the ONNX model file
    #[arg(short, long)]
    model: PathBuf,

    /// Path to model_config.json
    #[arg(short, long)]
    config: PathBuf,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut urls = cli.urls;
    if let Some(path) = &cli.input {
        urls.extend(read_url_list(path)?);
    }
    if urls.is_empty() {
        bail!("no URLs to scan: pass URLs as arguments or use --input");
    }

    eprintln!("[*] Loading model from {}...", cli.model.display());
    eprintln!("[*] Loading model config from {}...", cli.config.display());

    let config = ScanConfig {
        model_path: cli.model,
        config_path: cli.config,
        urls,
    };

    let progress = Arc::new(ScanProgress::new());

    eprintln!("[*] Scanning {} URLs...", config.urls.len());
    let results = run_scan(&config, &progress)?;

    let total = progress.scanned_urls.load(Ordering::Relaxed);
    eprintln!("[*] Scanned {} URLs", total);

    print_results(&results, cli.format);

    Ok(())
}
