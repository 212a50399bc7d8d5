//! Telegram HTML helpers.

use crate::domain::UserId;

/// Escape HTML special characters for Telegram HTML parse mode.
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Inline mention of a user by id, rendered with their (escaped) display name.
pub fn mention_html(user_id: UserId, name: &str) -> String {
    let name = if name.trim().is_empty() { "friend" } else { name };
    format!(
        "<a href=\"tg://user?id={}\">{}</a>",
        user_id.0,
        escape_html(name)
    )
}

/// Human-friendly duration: `1h 2m 3s`, `2m 3s`, `3s`.
pub fn format_duration(seconds: i64) -> String {
    let seconds = seconds.max(0);
    let hours = seconds / 3600;
    let mins = (seconds % 3600) / 60;
    let secs = seconds % 60;
    if hours > 0 {
        return format!("{hours}h {mins}m {secs}s");
    }
    if mins > 0 {
        return format!("{mins}m {secs}s");
    }
    format!("{secs}s")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_html_escapes_specials() {
        assert_eq!(
            escape_html("<b>Gold & \"Silver\"</b>"),
            "&lt;b&gt;Gold &amp; &quot;Silver&quot;&lt;/b&gt;"
        );
    }

    #[test]
    fn mention_escapes_name_and_falls_back() {
        assert_eq!(
            mention_html(UserId(5), "<Ann>"),
            "<a href=\"tg://user?id=5\">&lt;Ann&gt;</a>"
        );
        assert_eq!(
            mention_html(UserId(5), "  "),
            "<a href=\"tg://user?id=5\">friend</a>"
        );
    }

    #[test]
    fn durations_format_compactly() {
        assert_eq!(format_duration(3), "3s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(3725), "1h 2m 5s");
        assert_eq!(format_duration(-4), "0s");
    }
}
