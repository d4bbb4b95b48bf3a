use std::fs::File;
use std::path::Path;

use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::sample::Sample;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::audio::types::{AudioData, AudioFormat};
use crate::error::{AudioError, Result};

/// Audio file loader supporting multiple formats
///
/// The detector itself never sees a file; this is the decoding seam that
/// turns bytes on disk into an [`AudioData`] buffer. WAV goes through
/// `hound`, everything else through Symphonia.
pub struct AudioLoader;

impl AudioLoader {
    /// Load an audio file and return raw audio data
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<AudioData> {
        let path = path.as_ref();
        let extension = Self::detect_format(path).unwrap_or_default();

        let audio = match extension.as_str() {
            "wav" => Self::load_wav(path)?,
            ext if Self::is_format_supported(ext) => Self::load_compressed(path)?,
            _ => {
                return Err(AudioError::UnsupportedFormat { format: extension }.into());
            }
        };

        if audio.sample_rate == 0 {
            return Err(AudioError::InvalidParameters {
                details: format!("{} reports a zero sample rate", path.display()),
            }
            .into());
        }

        tracing::debug!(
            "Loaded {}: {:.2}s, {} Hz, {} channel(s)",
            path.display(),
            audio.duration,
            audio.sample_rate,
            audio.channels
        );

        Ok(audio)
    }

    /// Load WAV files using the hound crate
    fn load_wav(path: &Path) -> Result<AudioData> {
        let load_failed = || AudioError::LoadFailed {
            path: path.display().to_string(),
        };

        let reader = hound::WavReader::open(path).map_err(|_| load_failed())?;
        let spec = reader.spec();

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader
                .into_samples::<f32>()
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| load_failed())?,
            hound::SampleFormat::Int => {
                let raw: Vec<i32> = reader
                    .into_samples::<i32>()
                    .collect::<std::result::Result<_, _>>()
                    .map_err(|_| load_failed())?;
                raw.into_iter()
                    .map(|s| Self::pcm_to_f32(s, spec.bits_per_sample))
                    .collect()
            }
        };

        Ok(Self::assemble(
            path,
            samples,
            spec.sample_rate,
            spec.channels,
            AudioFormat {
                extension: "wav".to_string(),
                bit_depth: Some(spec.bits_per_sample),
                compression: None,
            },
        ))
    }

    /// Load compressed formats (MP3, FLAC, OGG, ...) using Symphonia
    fn load_compressed(path: &Path) -> Result<AudioData> {
        let load_failed = || AudioError::LoadFailed {
            path: path.display().to_string(),
        };

        let file = File::open(path).map_err(|_| load_failed())?;
        let mss = MediaSourceStream::new(Box::new(file), Default::default());

        let mut hint = Hint::new();
        if let Some(ext) = path.extension().and_then(|e| e.to_str()) {
            hint.with_extension(ext);
        }

        let probed = symphonia::default::get_probe()
            .format(
                &hint,
                mss,
                &FormatOptions::default(),
                &MetadataOptions::default(),
            )
            .map_err(|_| load_failed())?;
        let mut reader = probed.format;

        let track = reader
            .tracks()
            .iter()
            .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
            .ok_or_else(load_failed)?;
        let track_id = track.id;
        let params = track.codec_params.clone();

        let sample_rate = params.sample_rate.ok_or_else(|| AudioError::InvalidParameters {
            details: "No sample rate found".to_string(),
        })?;
        let channels = params
            .channels
            .ok_or_else(|| AudioError::InvalidParameters {
                details: "No channel information found".to_string(),
            })?
            .count() as u16;

        let mut decoder = symphonia::default::get_codecs()
            .make(&params, &DecoderOptions::default())
            .map_err(|_| load_failed())?;

        let mut samples = Vec::new();
        loop {
            let packet = match reader.next_packet() {
                Ok(packet) => packet,
                Err(SymphoniaError::ResetRequired) => {
                    decoder.reset();
                    continue;
                }
                // End of stream or unrecoverable container error
                Err(_) => break,
            };

            if packet.track_id() != track_id {
                continue;
            }

            match decoder.decode(&packet) {
                Ok(decoded) => Self::interleave(&decoded, &mut samples),
                // Skip corrupt packets, keep whatever decodes
                Err(SymphoniaError::DecodeError(_)) => continue,
                Err(_) => break,
            }
        }

        let format = AudioFormat {
            extension: Self::detect_format(path).unwrap_or_else(|| "unknown".to_string()),
            bit_depth: params.bits_per_sample.map(|b| b as u16),
            compression: Some(format!("{:?}", params.codec)),
        };

        Ok(Self::assemble(path, samples, sample_rate, channels, format))
    }

    fn assemble(
        path: &Path,
        samples: Vec<f32>,
        sample_rate: u32,
        channels: u16,
        format: AudioFormat,
    ) -> AudioData {
        let duration = if sample_rate > 0 && channels > 0 {
            samples.len() as f64 / (sample_rate as f64 * channels as f64)
        } else {
            0.0
        };

        AudioData {
            samples,
            sample_rate,
            channels,
            duration,
            file_path: path.to_path_buf(),
            format,
        }
    }

    /// Convert an integer PCM sample to float in [-1.0, 1.0]
    fn pcm_to_f32(sample: i32, bit_depth: u16) -> f32 {
        match bit_depth {
            8 => (sample as f32 - 128.0) / 128.0,
            24 => sample as f32 / 8388608.0,
            32 => sample as f32 / 2147483648.0,
            // 16-bit, also the fallback for unusual depths
            _ => sample as f32 / 32768.0,
        }
    }

    /// Append a decoded Symphonia buffer to `output`, interleaving channels
    fn interleave(decoded: &AudioBufferRef, output: &mut Vec<f32>) {
        fn planar<T: Copy + Sample>(buf: &AudioBuffer<T>, output: &mut Vec<f32>, to_f32: impl Fn(T) -> f32) {
            let channels = buf.spec().channels.count();
            for frame in 0..buf.frames() {
                for ch in 0..channels {
                    output.push(to_f32(buf.chan(ch)[frame]));
                }
            }
        }

        match decoded {
            AudioBufferRef::F32(buf) => planar(buf, output, |s| s),
            AudioBufferRef::F64(buf) => planar(buf, output, |s| s as f32),
            AudioBufferRef::S32(buf) => planar(buf, output, |s| s as f32 / 2147483648.0),
            AudioBufferRef::S16(buf) => planar(buf, output, |s| s as f32 / 32768.0),
            AudioBufferRef::U8(buf) => planar(buf, output, |s| (s as f32 - 128.0) / 128.0),
            _ => {
                tracing::warn!("Unsupported sample format in packet, skipping");
            }
        }
    }

    /// Detect audio format from file extension
    pub fn detect_format<P: AsRef<Path>>(path: P) -> Option<String> {
        path.as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
    }

    /// Check if a file format is supported
    pub fn is_format_supported(extension: &str) -> bool {
        matches!(
            extension.to_lowercase().as_str(),
            "wav" | "mp3" | "flac" | "ogg" | "m4a" | "aac"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_format_detection() {
        assert_eq!(AudioLoader::detect_format("beat.wav"), Some("wav".to_string()));
        assert_eq!(AudioLoader::detect_format("beat.MP3"), Some("mp3".to_string()));
        assert_eq!(AudioLoader::detect_format("beat"), None);
    }

    #[test]
    fn test_format_support() {
        assert!(AudioLoader::is_format_supported("wav"));
        assert!(AudioLoader::is_format_supported("FLAC"));
        assert!(!AudioLoader::is_format_supported("xyz"));
    }

    #[test]
    fn test_pcm_to_f32() {
        assert_eq!(AudioLoader::pcm_to_f32(0, 16), 0.0);
        assert_eq!(AudioLoader::pcm_to_f32(-32768, 16), -1.0);
        assert_eq!(AudioLoader::pcm_to_f32(32767, 16), 32767.0 / 32768.0);
        assert_eq!(AudioLoader::pcm_to_f32(128, 8), 0.0);
        assert_eq!(AudioLoader::pcm_to_f32(-8388608, 24), -1.0);
    }

    #[tokio::test]
    async fn test_unsupported_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("beat.xyz");
        let mut file = File::create(&path).unwrap();
        file.write_all(b"not audio").unwrap();

        let result = AudioLoader::load(&path).await;
        assert!(matches!(
            result,
            Err(crate::error::BeatMarkerError::Audio(
                AudioError::UnsupportedFormat { .. }
            ))
        ));
    }

    #[tokio::test]
    async fn test_wav_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("click.wav");

        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::create(&path, spec).unwrap();
        for i in 0..44100 {
            let amplitude = if (22050..23074).contains(&i) { 16000 } else { 0 };
            writer.write_sample(amplitude as i16).unwrap();
        }
        writer.finalize().unwrap();

        let audio = AudioLoader::load(&path).await.unwrap();
        assert_eq!(audio.sample_rate, 44100);
        assert_eq!(audio.channels, 1);
        assert_eq!(audio.samples.len(), 44100);
        assert!((audio.duration - 1.0).abs() < 1e-9);
        assert!(audio.samples[22500] > 0.4);
    }
}
