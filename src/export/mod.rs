//! # Export Module
//!
//! Serializes a marker list into the formats creative editing tools import:
//! Premiere Pro marker CSV, an After Effects JSX script, and Final Cut Pro
//! XML. The bodies are external contracts consumed by third-party tools;
//! field names and structure are reproduced exactly.

mod csv;
mod fcpxml;
mod jsx;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ExportError, Result};
use crate::marker::Marker;

/// Target editor format for a marker export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    /// Premiere Pro marker CSV, imported via the Markers panel
    #[serde(rename = "csv")]
    PremiereCsv,

    /// After Effects script applying markers to the selected layer
    #[serde(rename = "jsx")]
    AfterEffectsJsx,

    /// Final Cut Pro XML timeline document
    #[serde(rename = "fcpxml")]
    FinalCutXml,
}

impl ExportFormat {
    pub fn all() -> [ExportFormat; 3] {
        [
            ExportFormat::PremiereCsv,
            ExportFormat::AfterEffectsJsx,
            ExportFormat::FinalCutXml,
        ]
    }

    /// File extension for the exported document
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::PremiereCsv => "csv",
            ExportFormat::AfterEffectsJsx => "jsx",
            ExportFormat::FinalCutXml => "xml",
        }
    }

    /// Render the export document body for the given markers
    pub fn render(&self, markers: &[Marker]) -> Result<String> {
        match self {
            ExportFormat::PremiereCsv => Ok(csv::render(markers)),
            ExportFormat::AfterEffectsJsx => jsx::render(markers),
            ExportFormat::FinalCutXml => Ok(fcpxml::render(markers)),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" | "premiere" => Ok(ExportFormat::PremiereCsv),
            "jsx" | "aftereffects" => Ok(ExportFormat::AfterEffectsJsx),
            "fcpxml" | "xml" | "finalcut" => Ok(ExportFormat::FinalCutXml),
            other => Err(format!(
                "Unknown export format '{}', expected csv, jsx or fcpxml",
                other
            )),
        }
    }
}

/// Name of the exported file for a given source audio file
pub fn export_file_name(source_name: &str, format: ExportFormat) -> String {
    let stem = Path::new(source_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audio");
    format!("{}_markers.{}", stem, format.extension())
}

/// Render and write one export document into `output_dir`
///
/// Returns the path of the written file. An empty marker list is refused:
/// there is nothing for the target editor to import.
pub fn write_export(
    markers: &[Marker],
    format: ExportFormat,
    source_name: &str,
    output_dir: &Path,
) -> Result<PathBuf> {
    if markers.is_empty() {
        return Err(ExportError::NoMarkers.into());
    }

    let content = format.render(markers)?;
    let path = output_dir.join(export_file_name(source_name, format));
    std::fs::write(&path, content).map_err(|_| ExportError::WriteFailed {
        path: path.display().to_string(),
    })?;

    Ok(path)
}
