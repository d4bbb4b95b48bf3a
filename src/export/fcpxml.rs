//! Final Cut Pro XML timeline document.

use crate::marker::Marker;

/// Render the FCPXML body
///
/// One `<marker>` element per entry inside a fixed single-sequence shell.
/// Final Cut only reads `start`, `duration` and `value` here; start is the
/// marker time in seconds, duration is always zero.
pub(super) fn render(markers: &[Marker]) -> String {
    let marker_elements = markers
        .iter()
        .map(|m| format!(r#"<marker start="{}s" duration="0s" value="{}" />"#, m.time, m.label))
        .collect::<Vec<_>>()
        .join("\n            ");

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<fcpxml version="1.8">
  <resources>
    <format id="r1" name="FFVideoFormat1080p24" frameDuration="100/2400s"/>
  </resources>
  <library>
    <event name="BeatMarker Export">
      <project name="Beat Markers">
        <sequence format="r1" duration="3600s">
          <spine>
            {}
          </spine>
        </sequence>
      </project>
    </event>
  </library>
</fcpxml>"#,
        marker_elements
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcpxml_body() {
        let markers = vec![Marker::detected(1.25, 1)];
        assert_eq!(
            render(&markers),
            r#"<?xml version="1.0" encoding="UTF-8"?>
<fcpxml version="1.8">
  <resources>
    <format id="r1" name="FFVideoFormat1080p24" frameDuration="100/2400s"/>
  </resources>
  <library>
    <event name="BeatMarker Export">
      <project name="Beat Markers">
        <sequence format="r1" duration="3600s">
          <spine>
            <marker start="1.25s" duration="0s" value="Beat 1" />
          </spine>
        </sequence>
      </project>
    </event>
  </library>
</fcpxml>"#
        );
    }

    #[test]
    fn test_markers_are_indented_siblings() {
        let markers = vec![Marker::detected(1.0, 1), Marker::detected(2.0, 2)];
        let xml = render(&markers);
        assert!(xml.contains(
            "<marker start=\"1s\" duration=\"0s\" value=\"Beat 1\" />\n            \
             <marker start=\"2s\" duration=\"0s\" value=\"Beat 2\" />"
        ));
    }
}
