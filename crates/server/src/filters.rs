//! Custom Askama template filters for the complaint pages.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year.
///
/// Used by the base layout footer: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Shortens long complaint text for table cells, appending an ellipsis.
///
/// Counts characters rather than bytes so Arabic text is never cut on a
/// UTF-8 byte boundary: `{{ complaint.content|truncate_chars(80) }}`
#[askama::filter_fn]
pub fn truncate_chars(
    value: impl Display,
    _env: &dyn askama::Values,
    limit: usize,
) -> askama::Result<String> {
    let text = value.to_string();
    if text.chars().count() <= limit {
        return Ok(text);
    }
    let truncated: String = text.chars().take(limit).collect();
    Ok(format!("{}…", truncated.trim_end()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use askama::NO_VALUES;

    use super::*;

    #[test]
    fn test_current_year_is_plausible() {
        let year = current_year::default().execute("", NO_VALUES).unwrap();
        assert!(year >= 2026);
    }

    #[test]
    fn test_truncate_chars_short_text_unchanged() {
        let result = truncate_chars::default()
            .with_limit(80)
            .execute("شكوى قصيرة", NO_VALUES)
            .unwrap();
        assert_eq!(result, "شكوى قصيرة");
    }

    #[test]
    fn test_truncate_chars_counts_characters_not_bytes() {
        // 10 Arabic characters occupy 20 bytes; a 10-char limit keeps all of
        // them while a smaller one cuts cleanly between characters.
        let text = "انقطاع الماء";
        let result = truncate_chars::default()
            .with_limit(7)
            .execute(text, NO_VALUES)
            .unwrap();
        assert_eq!(result, "انقطاع…");
    }
}
