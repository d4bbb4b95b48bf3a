use crate::audio::types::{AnalysisConfig, AudioData};
use crate::error::{AudioError, Result};
use crate::marker::Marker;

/// Samples per analysis frame
const FRAME_SIZE: usize = 1024;

/// Stride between successive frames (50% overlap)
const HOP_SIZE: usize = 512;

/// Energy-based onset detector producing time-stamped beat markers
///
/// The detector walks a fully buffered waveform once, comparing the mean
/// absolute amplitude of the current frame against the previous overlapping
/// frame. A sufficiently large positive energy jump is accepted as an onset
/// unless it falls inside the configured minimum distance from the last
/// accepted one.
pub struct OnsetDetector {
    config: AnalysisConfig,
}

impl OnsetDetector {
    /// Create a detector with default configuration
    pub fn new() -> Self {
        Self::with_config(AnalysisConfig::default())
    }

    /// Create a detector with custom configuration
    pub fn with_config(config: AnalysisConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Detect beat onsets in the given audio, in ascending time order
    ///
    /// Multi-channel audio is mixed down to mono before analysis. Buffers
    /// shorter than two analysis frames produce an empty result rather than
    /// an error. Marker times are deterministic for identical input; marker
    /// ids are not.
    pub fn detect(&self, audio: &AudioData) -> Result<Vec<Marker>> {
        if audio.sample_rate == 0 {
            return Err(AudioError::InvalidParameters {
                details: "Sample rate must be positive".to_string(),
            }
            .into());
        }

        if !self.config.sensitivity.is_finite() || !self.config.min_distance.is_finite() {
            return Err(AudioError::InvalidParameters {
                details: "Analysis configuration contains non-finite values".to_string(),
            }
            .into());
        }

        // Out-of-range values are clamped here, once, so the scan itself
        // never has to re-check them.
        let config = self.config.clamped();

        tracing::info!(
            "Detecting onsets in {:.2}s of audio at {} Hz (sensitivity {:.2}, min distance {:.3}s{})",
            audio.duration,
            audio.sample_rate,
            config.sensitivity,
            config.min_distance,
            if config.aggressive_mode { ", aggressive" } else { "" },
        );

        let mono = audio.mono_samples();
        let markers = scan_onsets(&mono, audio.sample_rate, &config);

        tracing::info!("Detection complete: {} beats found", markers.len());
        Ok(markers)
    }
}

impl Default for OnsetDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Single forward scan over a mono buffer
///
/// Pure apart from marker id generation: identical input always yields the
/// same marker times and labels. Output is ascending in time because the
/// scan is monotonic in the sample index.
fn scan_onsets(samples: &[f32], sample_rate: u32, config: &AnalysisConfig) -> Vec<Marker> {
    // Not enough data for even one energy comparison
    if samples.len() < 2 * FRAME_SIZE {
        return Vec::new();
    }

    // Sensitivity maps inversely onto the acceptance threshold:
    // 0.0 -> 0.165 (strict), 1.0 -> 0.015 (lenient).
    let threshold = (1.1 - config.sensitivity as f64) * 0.15;
    let active_threshold = if config.aggressive_mode {
        threshold * 0.6
    } else {
        threshold
    };

    let min_distance_samples = config.min_distance * sample_rate as f64;

    let mut markers = Vec::new();
    // Seeded so the distance rule alone can never reject the first candidate
    let mut last_accepted = -min_distance_samples;

    let end = samples.len() - FRAME_SIZE;
    let mut i = FRAME_SIZE;
    while i < end {
        let energy = mean_abs(&samples[i..i + FRAME_SIZE]);
        let prev_energy = mean_abs(&samples[i - HOP_SIZE..i - HOP_SIZE + FRAME_SIZE]);
        let delta = energy - prev_energy;

        // Distance is compared on raw sample indices, strictly: a gap equal
        // to the minimum counts as too close.
        if delta > active_threshold && (i as f64 - last_accepted) > min_distance_samples {
            let time = i as f64 / sample_rate as f64;
            markers.push(Marker::detected(time, markers.len() + 1));
            last_accepted = i as f64;
        }

        i += HOP_SIZE;
    }

    markers
}

/// Mean absolute amplitude of one frame, accumulated in f64
fn mean_abs(frame: &[f32]) -> f64 {
    let sum: f64 = frame.iter().map(|&x| (x as f64).abs()).sum();
    sum / frame.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::types::AudioFormat;
    use crate::marker::DETECTED_COLOR;
    use std::path::PathBuf;

    const SAMPLE_RATE: u32 = 44100;

    fn mono_audio(samples: Vec<f32>) -> AudioData {
        let duration = samples.len() as f64 / SAMPLE_RATE as f64;
        AudioData {
            samples,
            sample_rate: SAMPLE_RATE,
            channels: 1,
            duration,
            file_path: PathBuf::from("test.wav"),
            format: AudioFormat {
                extension: "wav".to_string(),
                bit_depth: Some(16),
                compression: None,
            },
        }
    }

    /// Flat rectangular burst, the sharpest transient the energy scan sees
    fn add_burst(samples: &mut [f32], start: usize, amplitude: f32) {
        for sample in &mut samples[start..start + FRAME_SIZE] {
            *sample = amplitude;
        }
    }

    fn detect(samples: Vec<f32>, config: AnalysisConfig) -> Vec<Marker> {
        OnsetDetector::with_config(config)
            .detect(&mono_audio(samples))
            .unwrap()
    }

    #[test]
    fn test_silence_yields_no_markers() {
        let markers = detect(vec![0.0; SAMPLE_RATE as usize * 5], AnalysisConfig::default());
        assert!(markers.is_empty());
    }

    #[test]
    fn test_short_buffer_yields_no_markers() {
        for len in [0, 1, FRAME_SIZE, 2 * FRAME_SIZE - 1, 2 * FRAME_SIZE] {
            let markers = detect(vec![1.0; len], AnalysisConfig::default());
            assert!(markers.is_empty(), "expected empty result for length {}", len);
        }
    }

    #[test]
    fn test_three_bursts_yield_three_ordered_markers() {
        let mut samples = vec![0.0; 60000];
        for start in [10000, 30000, 50000] {
            add_burst(&mut samples, start, 0.2);
        }

        let markers = detect(samples, AnalysisConfig::default());

        assert_eq!(markers.len(), 3);
        let tolerance = HOP_SIZE as f64 / SAMPLE_RATE as f64;
        for (marker, expected_index) in markers.iter().zip([10000.0, 30000.0, 50000.0]) {
            let expected = expected_index / SAMPLE_RATE as f64;
            assert!(
                (marker.time - expected).abs() <= tolerance,
                "marker at {} too far from {}",
                marker.time,
                expected
            );
            assert_eq!(marker.color, DETECTED_COLOR);
        }
        let labels: Vec<&str> = markers.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, ["Beat 1", "Beat 2", "Beat 3"]);
    }

    #[test]
    fn test_close_burst_suppressed_by_min_distance() {
        // 5000 samples apart, well inside the default 0.25s (~11025 samples)
        let mut samples = vec![0.0; SAMPLE_RATE as usize];
        add_burst(&mut samples, 20000, 0.2);
        add_burst(&mut samples, 25000, 0.2);

        let markers = detect(samples, AnalysisConfig::default());
        assert_eq!(markers.len(), 1);
    }

    #[test]
    fn test_times_are_deterministic_ids_are_not_required_to_be() {
        let mut samples = vec![0.0; SAMPLE_RATE as usize * 2];
        add_burst(&mut samples, 20000, 0.3);
        add_burst(&mut samples, 50000, 0.3);

        let first = detect(samples.clone(), AnalysisConfig::default());
        let second = detect(samples, AnalysisConfig::default());

        let first_times: Vec<f64> = first.iter().map(|m| m.time).collect();
        let second_times: Vec<f64> = second.iter().map(|m| m.time).collect();
        assert_eq!(first_times, second_times);
        assert!(!first_times.is_empty());
    }

    #[test]
    fn test_markers_strictly_increase_and_respect_spacing() {
        // Bursts every 0.15s against a 0.25s minimum: some must be dropped,
        // survivors must keep the full gap
        let mut samples = vec![0.0; 100000];
        let mut start = 20000;
        while start + FRAME_SIZE < samples.len() - FRAME_SIZE {
            add_burst(&mut samples, start, 0.3);
            start += 6615;
        }

        let config = AnalysisConfig::default();
        let min_distance_samples = config.min_distance * SAMPLE_RATE as f64;
        let markers = detect(samples, config);

        assert!(markers.len() >= 3);
        for pair in markers.windows(2) {
            assert!(pair[1].time > pair[0].time);
            let gap_samples = (pair[1].time - pair[0].time) * SAMPLE_RATE as f64;
            assert!(
                gap_samples > min_distance_samples - 1.0,
                "gap of {} samples below minimum {}",
                gap_samples,
                min_distance_samples
            );
        }
    }

    #[test]
    fn test_higher_sensitivity_never_detects_fewer() {
        let mut samples = vec![0.0; SAMPLE_RATE as usize * 3];
        add_burst(&mut samples, 44100, 0.5);
        add_burst(&mut samples, 88200, 0.15);

        let low = detect(
            samples.clone(),
            AnalysisConfig {
                sensitivity: 0.3,
                ..Default::default()
            },
        );
        let high = detect(
            samples,
            AnalysisConfig {
                sensitivity: 0.9,
                ..Default::default()
            },
        );

        assert!(high.len() >= low.len());
        assert_eq!(low.len(), 1);
        assert_eq!(high.len(), 2);
    }

    #[test]
    fn test_aggressive_mode_never_detects_fewer() {
        let mut samples = vec![0.0; SAMPLE_RATE as usize * 3];
        add_burst(&mut samples, 44100, 0.2);
        add_burst(&mut samples, 88200, 0.11);

        let normal = detect(samples.clone(), AnalysisConfig::default());
        let aggressive = detect(
            samples,
            AnalysisConfig {
                aggressive_mode: true,
                ..Default::default()
            },
        );

        assert!(aggressive.len() >= normal.len());
        assert_eq!(normal.len(), 1);
        assert_eq!(aggressive.len(), 2);
    }

    #[test]
    fn test_out_of_range_config_is_clamped_not_fatal() {
        let mut samples = vec![0.0; SAMPLE_RATE as usize];
        add_burst(&mut samples, 20000, 0.5);

        let markers = detect(
            samples,
            AnalysisConfig {
                sensitivity: 7.0,
                min_distance: -1.0,
                aggressive_mode: false,
            },
        );
        assert!(!markers.is_empty());
    }

    #[test]
    fn test_zero_sample_rate_rejected() {
        let mut audio = mono_audio(vec![0.0; 4096]);
        audio.sample_rate = 0;
        assert!(OnsetDetector::new().detect(&audio).is_err());
    }

    #[test]
    fn test_nan_config_rejected() {
        let audio = mono_audio(vec![0.0; 4096]);
        let detector = OnsetDetector::with_config(AnalysisConfig {
            sensitivity: f32::NAN,
            ..Default::default()
        });
        assert!(detector.detect(&audio).is_err());
    }

    #[test]
    fn test_stereo_input_is_mixed_down() {
        // Burst on the left channel only still raises the mono mean
        let mut samples = vec![0.0; SAMPLE_RATE as usize * 2];
        for frame in 20000..20000 + FRAME_SIZE {
            samples[frame * 2] = 0.8;
        }

        let duration = samples.len() as f64 / (SAMPLE_RATE as f64 * 2.0);
        let audio = AudioData {
            samples,
            sample_rate: SAMPLE_RATE,
            channels: 2,
            duration,
            file_path: PathBuf::from("test.wav"),
            format: AudioFormat {
                extension: "wav".to_string(),
                bit_depth: Some(16),
                compression: None,
            },
        };

        let markers = OnsetDetector::new().detect(&audio).unwrap();
        assert_eq!(markers.len(), 1);
    }
}
