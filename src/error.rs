use thiserror::Error;

/// Main error type for the BeatMarker library
#[derive(Error, Debug)]
pub enum BeatMarkerError {
    #[error("Audio processing error: {0}")]
    Audio(#[from] AudioError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Generic error: {0}")]
    Generic(String),
}

/// Audio-specific errors
#[derive(Error, Debug)]
pub enum AudioError {
    #[error("Failed to load audio file: {path}")]
    LoadFailed { path: String },

    #[error("Unsupported audio format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Invalid audio parameters: {details}")]
    InvalidParameters { details: String },
}

/// Export-specific errors
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Marker serialization failed: {reason}")]
    SerializeFailed { reason: String },

    #[error("Failed to write export file: {path}")]
    WriteFailed { path: String },

    #[error("No markers to export")]
    NoMarkers,
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}")]
    ParseFailed { path: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using BeatMarkerError
pub type Result<T> = std::result::Result<T, BeatMarkerError>;

impl BeatMarkerError {
    /// Create a generic error with a custom message
    pub fn generic<S: Into<String>>(message: S) -> Self {
        Self::Generic(message.into())
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Audio(AudioError::LoadFailed { path }) => {
                format!("Could not load audio file '{}'. Please check the file exists and is a supported format.", path)
            }
            Self::Audio(AudioError::UnsupportedFormat { format }) => {
                format!("Audio format '{}' is not supported. Supported formats: wav, mp3, flac, ogg, m4a, aac", format)
            }
            Self::Export(ExportError::NoMarkers) => {
                "Nothing to export: run detection first or add markers manually.".to_string()
            }
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
