//! Fixed-field timecode formatting shared by the UI and export layers.

/// Format a seconds value as `HH:MM:SS:CC`
///
/// Each field is zero-padded to width 2. Hours are unbounded (not wrapped
/// to 24) and the trailing field is hundredths of a second, truncated
/// rather than rounded so the display never runs ahead of playback.
/// Callers guarantee non-negative, finite input.
pub fn format_timecode(seconds: f64) -> String {
    let hours = (seconds / 3600.0).floor() as u64;
    let minutes = ((seconds % 3600.0) / 60.0).floor() as u64;
    let secs = (seconds % 60.0).floor() as u64;
    let hundredths = ((seconds % 1.0) * 100.0).floor() as u64;
    format!("{:02}:{:02}:{:02}:{:02}", hours, minutes, secs, hundredths)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        assert_eq!(format_timecode(0.0), "00:00:00:00");
    }

    #[test]
    fn test_field_carries() {
        assert_eq!(format_timecode(3661.5), "01:01:01:50");
    }

    #[test]
    fn test_hundredths_truncate() {
        assert_eq!(format_timecode(59.999), "00:00:59:99");
    }

    #[test]
    fn test_hours_do_not_wrap() {
        assert_eq!(format_timecode(90000.0), "25:00:00:00");
    }

    #[test]
    fn test_sub_second() {
        assert_eq!(format_timecode(0.25), "00:00:00:25");
    }
}
