use log::{info, log_enabled, Level};

/// log to console if configuration verbose.
pub fn log(message: &'static str, data: impl AsRef<str>) {
    if log_enabled!(Level::Info) {
        info!("{message} - {}", data.as_ref());
    }
}

/// Trim unicode whitespace and byte order marks from both ends.
pub fn trim_text(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// True when the text holds nothing but whitespace.
pub fn is_blank(text: &str) -> bool {
    trim_text(text).is_empty()
}

/// Replace `&nbsp;` entities and literal non-breaking spaces with plain spaces.
pub fn normalize_nbsp(html: &str) -> String {
    html.replace("&nbsp;", " ").replace('\u{00A0}', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trim_handles_nbsp_and_bom() {
        assert_eq!(trim_text("\u{FEFF} \u{00A0}a b\n\t"), "a b");
        assert!(is_blank(" \u{00A0}\r\n"));
        assert!(!is_blank(" x "));
    }

    #[test]
    fn nbsp_entity_and_char() {
        assert_eq!(normalize_nbsp("a&nbsp;b\u{00A0}c"), "a b c");
    }
}
