//! After Effects marker script.

use crate::error::{ExportError, Result};
use crate::marker::Marker;

/// Render the After Effects script body
///
/// The script runs inside After Effects (File > Scripts > Run Script File)
/// against the user's selected layer; the marker list is embedded as a JSON
/// literal.
pub(super) fn render(markers: &[Marker]) -> Result<String> {
    let payload = serde_json::to_string(markers).map_err(|e| ExportError::SerializeFailed {
        reason: e.to_string(),
    })?;

    Ok(format!(
        r#"(function() {{
  var layer = app.project.activeItem.selectedLayers[0];
  if (!layer) {{ alert("Select a layer first!"); return; }}
  var markers = {};
  app.beginUndoGroup("Apply Beat Markers");
  for (var i = 0; i < markers.length; i++) {{
    var myMarker = new MarkerValue(markers[i].label);
    layer.property("Marker").setValueAtTime(markers[i].time, myMarker);
  }}
  app.endUndoGroup();
}})();"#,
        payload
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_embeds_marker_payload() {
        let markers = vec![Marker::detected(1.25, 1)];
        let script = render(&markers).unwrap();

        assert!(script.starts_with("(function() {"));
        assert!(script.ends_with("})();"));
        assert!(script.contains(r#"app.beginUndoGroup("Apply Beat Markers");"#));
        assert!(script.contains(r#""time":1.25"#));
        assert!(script.contains(r#""label":"Beat 1""#));
    }

    #[test]
    fn test_script_reads_label_and_time_fields() {
        let script = render(&[Marker::detected(0.5, 1)]).unwrap();
        assert!(script.contains("new MarkerValue(markers[i].label)"));
        assert!(script.contains(r#"layer.property("Marker").setValueAtTime(markers[i].time, myMarker);"#));
    }
}
