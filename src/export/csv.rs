//! Premiere Pro marker CSV.

use crate::marker::Marker;

/// Render the Premiere Pro marker CSV body
///
/// The `In` column carries raw seconds rather than a timecode; Premiere
/// accepts both, and plain seconds survive sequence frame-rate changes.
pub(super) fn render(markers: &[Marker]) -> String {
    let mut content = String::from("Name,In,Description,Marker Type\n");
    for marker in markers {
        content.push_str(&format!(
            "\"{}\",\"{}\",\"Beat detected by BeatMarker Pro\",\"Comment\"\n",
            marker.label, marker.time
        ));
    }
    content
}
