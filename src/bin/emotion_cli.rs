use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use speech_emotion::{AnalysisReport, Analyzer, AppConfig, FeatureRecord};

#[derive(Parser, Debug)]
#[command(
    name = "emotion_cli",
    about = "Byte-level speech emotion analyzer"
)]
struct Cli {
    /// JSON configuration file (defaults to assets/emotion_config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a file and print the report as JSON
    Analyze {
        #[arg(long)]
        file: PathBuf,
        /// Write the JSON report here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
        /// Write the visualization PNG here
        #[arg(long)]
        image: Option<PathBuf>,
    },
    /// Print the extracted features of a file as JSON
    Features {
        #[arg(long)]
        file: PathBuf,
    },
    /// Serve the HTTP API until Ctrl-C
    Serve {
        /// Bind address override (e.g. 0.0.0.0:5000)
        #[arg(long)]
        addr: Option<std::net::SocketAddr>,
    },
}

fn main() -> ExitCode {
    speech_emotion::init_logging();
    match run() {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    let config = cli
        .config
        .as_deref()
        .map(AppConfig::load_from_file)
        .unwrap_or_else(AppConfig::load);

    match cli.command {
        Commands::Analyze {
            file,
            output,
            image,
        } => run_analyze(&config, &file, output, image),
        Commands::Features { file } => run_features(&config, &file),
        Commands::Serve { addr } => run_serve(config, addr),
    }
}

fn read_upload(path: &Path) -> Result<Vec<u8>> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty; could not analyze audio file", path.display());
    }
    Ok(bytes)
}

fn run_analyze(
    config: &AppConfig,
    file: &Path,
    output_path: Option<PathBuf>,
    image_path: Option<PathBuf>,
) -> Result<ExitCode> {
    let bytes = read_upload(file)?;
    let report = Analyzer::new(config).analyze(&bytes);

    if let Some(path) = image_path {
        match &report.visualization {
            Some(image) => fs::write(&path, image.png_bytes())
                .with_context(|| format!("writing {}", path.display()))?,
            None => eprintln!("Visualization unavailable; {} not written", path.display()),
        }
    }

    let json = serde_json::to_string_pretty(&ReportPayload::new(file, &report))?;
    if let Some(path) = output_path {
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
    } else {
        println!("{json}");
    }

    Ok(ExitCode::from(0))
}

fn run_features(config: &AppConfig, file: &Path) -> Result<ExitCode> {
    let bytes = read_upload(file)?;
    let features = Analyzer::new(config).features(&bytes);
    println!("{}", serde_json::to_string_pretty(&features)?);
    Ok(ExitCode::from(0))
}

#[cfg(feature = "http")]
fn run_serve(mut config: AppConfig, addr: Option<std::net::SocketAddr>) -> Result<ExitCode> {
    if let Some(addr) = addr {
        config.server.addr = addr;
    }
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("building tokio runtime")?;
    runtime.block_on(speech_emotion::http::serve(&config))?;
    Ok(ExitCode::from(0))
}

#[cfg(not(feature = "http"))]
fn run_serve(_config: AppConfig, _addr: Option<std::net::SocketAddr>) -> Result<ExitCode> {
    bail!("built without the `http` feature")
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    file: String,
    emotion: String,
    label: speech_emotion::EmotionLabel,
    confidence: f64,
    color: &'a str,
    features: &'a FeatureRecord,
    visualization_bytes: Option<usize>,
}

impl<'a> ReportPayload<'a> {
    fn new(file: &Path, report: &'a AnalysisReport) -> Self {
        let label = report.classification.label;
        Self {
            file: file.display().to_string(),
            emotion: label.display_label(),
            label,
            confidence: report.classification.confidence,
            color: label.color(),
            features: &report.features,
            visualization_bytes: report.visualization.as_ref().map(|image| image.png_bytes().len()),
        }
    }
}
