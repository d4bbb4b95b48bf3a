//! # BeatMarker
//!
//! Detect percussive beat onsets in audio and export them as time-stamped
//! markers for video and motion-graphics editing tools.
//!
//! The analysis is a single-pass, energy-based peak picker over a fully
//! buffered waveform: no FFT, no tempo model, just a sensitivity-controlled
//! threshold on frame-to-frame energy jumps with a minimum-spacing rule.
//! The resulting marker list feeds exporters for Premiere Pro (CSV), After
//! Effects (JSX script) and Final Cut Pro (XML).
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use beatmarker::{
//!     audio::{AudioLoader, OnsetDetector},
//!     export::ExportFormat,
//! };
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let audio = AudioLoader::load("song.wav").await?;
//!
//! let detector = OnsetDetector::new();
//! let markers = detector.detect(&audio)?;
//!
//! let csv = ExportFormat::PremiereCsv.render(&markers)?;
//! std::fs::write("song_markers.csv", csv)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - [`audio`] - Decoding and onset detection
//! - [`marker`] - Marker model and the ordered session list
//! - [`export`] - Editor-specific serializers
//! - [`timecode`] - Fixed-field timecode formatting
//! - [`config`] - Configuration management
//!
//! Detection is a pure synchronous computation with no shared state; it can
//! run concurrently for different buffers, and interactive hosts should
//! defer it to a background task (the bundled CLI uses
//! `tokio::task::spawn_blocking`).

pub mod audio;
pub mod config;
pub mod error;
pub mod export;
pub mod marker;
pub mod timecode;

// Re-export commonly used types for convenience
pub use crate::{
    audio::{AnalysisConfig, AudioData, AudioLoader, OnsetDetector},
    config::Config,
    error::{BeatMarkerError, Result},
    export::ExportFormat,
    marker::{Marker, MarkerList},
    timecode::format_timecode,
};
