//! Marker model and the ordered session collection that holds detection
//! results alongside manually placed markers.

use rand::{distributions::Alphanumeric, Rng};
use serde::Serialize;

/// Display color for markers produced by the detector
pub const DETECTED_COLOR: &str = "#3b82f6";

/// Display color for manually placed markers
pub const MANUAL_COLOR: &str = "#ec4899";

/// A named, timestamped point of interest in the audio timeline
///
/// Serialized field names are part of the After Effects export contract and
/// must not change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    /// Opaque session-unique identifier, never reused
    pub id: String,

    /// Position in seconds, rounded to 3 decimal places
    pub time: f64,

    /// Human-readable name ("Beat N" for detected markers)
    pub label: String,

    /// Display color tag, carried through for UI and export layers
    pub color: String,
}

impl Marker {
    /// Create a detected marker, numbered by discovery order starting at 1
    pub fn detected(time: f64, number: usize) -> Self {
        Self {
            id: generate_id(),
            time: round_time(time),
            label: format!("Beat {}", number),
            color: DETECTED_COLOR.to_string(),
        }
    }

    /// Create a manually placed marker with a freeform label
    pub fn manual(time: f64, label: impl Into<String>) -> Self {
        Self {
            id: generate_id(),
            time: round_time(time),
            label: label.into(),
            color: MANUAL_COLOR.to_string(),
        }
    }
}

/// Round a seconds value to 3 decimal places for display and export
fn round_time(seconds: f64) -> f64 {
    (seconds * 1000.0).round() / 1000.0
}

/// Non-cryptographic 9-character id, unique within a session
fn generate_id() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(9)
        .map(char::from)
        .collect()
}

/// Ordered marker collection for one editing session
///
/// Detection results replace the whole list; manual markers are inserted
/// and the list re-sorted. Manual markers bypass the minimum-distance rule
/// that the detector enforces. That asymmetry is intentional.
#[derive(Debug, Clone, Default)]
pub struct MarkerList {
    markers: Vec<Marker>,
}

impl MarkerList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole list with a fresh detection result
    pub fn replace_detected(&mut self, detected: Vec<Marker>) {
        self.markers = detected;
    }

    /// Insert a manual marker and keep the list sorted by ascending time
    ///
    /// Returns the id of the new marker.
    pub fn add_manual(&mut self, time: f64, label: impl Into<String>) -> String {
        let marker = Marker::manual(time, label);
        let id = marker.id.clone();
        self.markers.push(marker);
        self.markers.sort_by(|a, b| a.time.total_cmp(&b.time));
        id
    }

    /// Remove a marker by id, returning whether one was removed
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.markers.len();
        self.markers.retain(|m| m.id != id);
        self.markers.len() < before
    }

    /// Remove every marker
    pub fn clear(&mut self) {
        self.markers.clear();
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }
}
