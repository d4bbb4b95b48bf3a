use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{info, Level};

use beatmarker::{
    audio::{AudioLoader, OnsetDetector},
    config::Config,
    export::{self, ExportFormat},
    marker::MarkerList,
    timecode::format_timecode,
};

#[derive(Parser)]
#[command(
    name = "beatmarker",
    version,
    about = "Detect beat onsets in audio and export editor-ready markers",
    long_about = "BeatMarker analyzes an audio file for percussive onsets and writes the \
resulting markers in formats that Premiere Pro, After Effects and Final Cut Pro can import."
)]
struct Cli {
    /// Audio file path (WAV, MP3, FLAC, OGG, M4A, AAC)
    #[arg(short, long)]
    audio: PathBuf,

    /// Export format, repeatable (csv, jsx, fcpxml)
    #[arg(short, long)]
    format: Vec<ExportFormat>,

    /// Output directory for marker files
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Detection sensitivity, 0.0-1.0 (higher finds more beats)
    #[arg(short, long)]
    sensitivity: Option<f32>,

    /// Minimum gap between detected beats, in seconds
    #[arg(short, long)]
    min_distance: Option<f64>,

    /// Relax the threshold to catch softer transients
    #[arg(long)]
    aggressive: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("Starting BeatMarker v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration, then let CLI flags override it
    let mut config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    if let Some(sensitivity) = cli.sensitivity {
        config.analysis.sensitivity = sensitivity;
    }
    if let Some(min_distance) = cli.min_distance {
        config.analysis.min_distance = min_distance;
    }
    if cli.aggressive {
        config.analysis.aggressive_mode = true;
    }
    if !cli.format.is_empty() {
        config.export.formats = cli.format.clone();
    }
    if let Some(output_dir) = &cli.output_dir {
        config.export.output_dir = output_dir.clone();
    }

    config.validate()?;

    let audio = AudioLoader::load(&cli.audio).await?;
    info!(
        "Loaded {:.2}s of audio at {} Hz ({} channel(s))",
        audio.duration, audio.sample_rate, audio.channels
    );

    // The scan is CPU-bound and synchronous; keep it off the runtime threads
    let detector = OnsetDetector::with_config(config.analysis.clone());
    let detected = tokio::task::spawn_blocking(move || detector.detect(&audio)).await??;

    let mut session = MarkerList::new();
    session.replace_detected(detected);

    if session.is_empty() {
        info!("No beats detected, nothing to export");
        return Ok(());
    }

    if let Some(last) = session.markers().last() {
        info!(
            "Detected {} beats, last at {}",
            session.len(),
            format_timecode(last.time)
        );
    }

    let source_name = cli
        .audio
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("audio");

    for format in &config.export.formats {
        let path = export::write_export(
            session.markers(),
            *format,
            source_name,
            &config.export.output_dir,
        )?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}
