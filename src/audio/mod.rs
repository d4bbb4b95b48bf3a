//! # Audio Module
//!
//! Decodes audio files into sample buffers and scans them for percussive
//! beat onsets.
//!
//! ## Core Features
//!
//! - **Onset Detection**: energy-delta peak picking with configurable
//!   sensitivity, minimum spacing and an aggressive low-transient mode
//! - **Decoding**: WAV via hound, MP3/FLAC/OGG/M4A/AAC via Symphonia
//! - **Mixdown**: channel extraction and mono reduction for analysis
//!
//! ## Usage
//!
//! ```rust,no_run
//! use beatmarker::audio::{AudioLoader, OnsetDetector};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let audio = AudioLoader::load("song.wav").await?;
//!
//! let detector = OnsetDetector::new();
//! let markers = detector.detect(&audio)?;
//!
//! println!("Found {} beats", markers.len());
//! # Ok(())
//! # }
//! ```

pub mod detector;
pub mod loader;
pub mod types;

pub use detector::OnsetDetector;
pub use loader::AudioLoader;
pub use types::{AnalysisConfig, AudioData, AudioFormat};
