//! Small shared helpers: timestamps and model-output text hygiene.

use chrono::Utc;
use regex::Regex;
use std::sync::OnceLock;

/// Returns the current UTC time as an ISO 8601 formatted string.
///
/// Format: `YYYY-MM-DDTHH:MM:SS.ffffff+00:00`.
#[must_use]
pub fn iso_timestamp() -> String {
    Utc::now().format("%Y-%m-%dT%H:%M:%S%.6f+00:00").to_string()
}

/// Returns true for empty or whitespace-only text.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

static FENCE_PATTERN: OnceLock<Regex> = OnceLock::new();

/// Strips a single wrapping Markdown code fence from model output.
///
/// Models frequently wrap an otherwise usable answer in ```` ```json ````
/// fences; inner fences and unfenced text are left untouched.
#[must_use]
pub fn strip_code_fences(text: &str) -> String {
    let pattern = FENCE_PATTERN.get_or_init(|| {
        #[allow(clippy::expect_used)]
        let pattern = Regex::new(r"(?s)^\s*```[a-zA-Z0-9_-]*\r?\n(.*?)\r?\n?```\s*$")
            .expect("fence pattern is a valid literal");
        pattern
    });

    match pattern.captures(text) {
        Some(captures) => captures
            .get(1)
            .map_or_else(|| text.to_string(), |inner| inner.as_str().to_string()),
        None => text.to_string(),
    }
}

/// Truncates text for log lines, appending an ellipsis when shortened.
#[must_use]
pub fn truncate_for_log(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_timestamp_format() {
        let ts = iso_timestamp();
        assert!(ts.contains('T'));
        assert!(ts.ends_with("+00:00"));
    }

    #[test]
    fn blank_detection() {
        assert!(is_blank(""));
        assert!(is_blank("   \n\t"));
        assert!(!is_blank(" text "));
    }

    #[test]
    fn strips_wrapping_fence() {
        let fenced = "```json\n{\"show_title\": \"X\"}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"show_title\": \"X\"}");
    }

    #[test]
    fn strips_fence_without_language_tag() {
        let fenced = "```\nplain body\n```";
        assert_eq!(strip_code_fences(fenced), "plain body");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        let text = "a script with ``` inline backticks";
        assert_eq!(strip_code_fences(text), text);
    }

    #[test]
    fn truncation_appends_ellipsis() {
        assert_eq!(truncate_for_log("abcdef", 3), "abc...");
        assert_eq!(truncate_for_log("abc", 3), "abc");
    }
}
