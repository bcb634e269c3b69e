//! Small string helpers for log output.

/// Shorten `s` to at most `max` characters for logging.
///
/// Longer strings are cut on a character boundary and suffixed with
/// `"…(+N bytes)"`, where `N` counts the dropped bytes.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log("héllo", 2), "hé…(+3 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        None => s.to_string(),
        Some((cut, _)) => format!("{}…(+{} bytes)", &s[..cut], s.len() - cut),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_for_log_short_string() {
        assert_eq!(truncate_for_log("# Title\n", 100), "# Title\n");
        assert_eq!(truncate_for_log("exact", 5), "exact");
    }

    #[test]
    fn test_truncate_for_log_long_string() {
        let s = "a".repeat(500);
        let result = truncate_for_log(&s, 100);
        assert!(result.starts_with(&"a".repeat(100)));
        assert!(result.ends_with("…(+400 bytes)"));
    }

    #[test]
    fn test_truncate_for_log_multibyte() {
        assert_eq!(truncate_for_log("héllo", 2), "hé…(+3 bytes)");
        assert_eq!(truncate_for_log("Ewerlöf", 7), "Ewerlöf");
    }
}
