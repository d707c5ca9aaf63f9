// src/trips/hour.rs

/// Hours in a day; length of every per-zone hourly profile.
pub const HOURS_PER_DAY: usize = 24;

/// Fast hour extraction from a `"... HH:MM ..."` shaped timestamp.
///
/// Reads the two characters right before the first `:` as the hour. No
/// calendar parsing and no timezone handling. Returns `None` when there is no
/// colon, fewer than two characters precede it, either character is not an
/// ASCII digit, or the value is above 23.
pub fn extract_hour(ts: &str) -> Option<u8> {
    let bytes = ts.as_bytes();
    let colon = bytes.iter().position(|&b| b == b':')?;
    if colon < 2 {
        return None;
    }

    let (hi, lo) = (bytes[colon - 2], bytes[colon - 1]);
    if !hi.is_ascii_digit() || !lo.is_ascii_digit() {
        return None;
    }

    let hour = (hi - b'0') * 10 + (lo - b'0');
    (usize::from(hour) < HOURS_PER_DAY).then_some(hour)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_layouts() {
        assert_eq!(extract_hour("2024-01-01 08:15:00"), Some(8));
        assert_eq!(extract_hour("2024/12/22 23:59:59"), Some(23));
        assert_eq!(extract_hour("00:00"), Some(0));
        assert_eq!(extract_hour("2024-01-01T17:05:00Z"), Some(17));
    }

    #[test]
    fn test_only_first_colon_matters() {
        // "1:" has a single char before the colon, later colons are ignored
        assert_eq!(extract_hour("1:23:45"), None);
        assert_eq!(extract_hour("x 12:34:56"), Some(12));
    }

    #[test]
    fn test_rejects() {
        assert_eq!(extract_hour(""), None);
        assert_eq!(extract_hour("2024-01-01"), None);
        assert_eq!(extract_hour(":15"), None);
        assert_eq!(extract_hour("a8:15"), None);
        assert_eq!(extract_hour("2024-01-01 24:00:00"), None);
        assert_eq!(extract_hour("2024-01-01 99:00:00"), None);
    }

    #[test]
    fn test_non_ascii_before_colon() {
        assert_eq!(extract_hour("é:00"), None);
        assert_eq!(extract_hour("日08:30"), Some(8));
    }
}
