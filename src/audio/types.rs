use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw audio data with metadata
#[derive(Debug, Clone)]
pub struct AudioData {
    /// Audio samples (interleaved for stereo, mono for single channel)
    pub samples: Vec<f32>,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Number of channels (1 = mono, 2 = stereo)
    pub channels: u16,

    /// Duration in seconds
    pub duration: f64,

    /// Original file path
    pub file_path: PathBuf,

    /// Audio format information
    pub format: AudioFormat,
}

impl AudioData {
    /// Get samples for a specific channel (0-based)
    pub fn channel_samples(&self, channel: usize) -> Vec<f32> {
        if self.channels == 1 || channel >= self.channels as usize {
            return self.samples.clone();
        }

        self.samples
            .iter()
            .skip(channel)
            .step_by(self.channels as usize)
            .copied()
            .collect()
    }

    /// Get mono mix of all channels
    pub fn mono_samples(&self) -> Vec<f32> {
        if self.channels == 1 {
            return self.samples.clone();
        }

        let mut mono = Vec::with_capacity(self.samples.len() / self.channels as usize);

        for chunk in self.samples.chunks(self.channels as usize) {
            let sum: f32 = chunk.iter().sum();
            mono.push(sum / self.channels as f32);
        }

        mono
    }

    /// Get time in seconds for a sample index
    pub fn time_for_sample(&self, sample_index: usize) -> f64 {
        sample_index as f64 / self.sample_rate as f64
    }
}

/// Audio file format information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioFormat {
    /// File extension (wav, mp3, flac, etc.)
    pub extension: String,

    /// Bit depth (16, 24, 32, etc.)
    pub bit_depth: Option<u16>,

    /// Compression type (if any)
    pub compression: Option<String>,
}

/// Configuration for one onset detection run
///
/// Immutable for the duration of a run. Out-of-range values are clamped at
/// the detection boundary rather than rejected, see [`AnalysisConfig::clamped`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Detection sensitivity (0.0-1.0); higher detects more onsets
    pub sensitivity: f32,

    /// Minimum allowed gap between two accepted onsets, in seconds
    pub min_distance: f64,

    /// Relax the threshold to catch softer transients
    pub aggressive_mode: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.7,
            min_distance: 0.25,
            aggressive_mode: false,
        }
    }
}

impl AnalysisConfig {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<(), String> {
        if !self.sensitivity.is_finite() || !(0.0..=1.0).contains(&self.sensitivity) {
            return Err("Sensitivity must be between 0.0 and 1.0".to_string());
        }

        if !self.min_distance.is_finite() || self.min_distance <= 0.0 {
            return Err("Minimum distance must be a positive number of seconds".to_string());
        }

        Ok(())
    }

    /// Copy of this configuration with every field forced into its
    /// documented range
    pub fn clamped(&self) -> Self {
        Self {
            sensitivity: self.sensitivity.clamp(0.0, 1.0),
            min_distance: self.min_distance.max(f64::MIN_POSITIVE),
            aggressive_mode: self.aggressive_mode,
        }
    }
}
