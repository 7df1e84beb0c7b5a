use unicode_normalization::UnicodeNormalization;

/// Normalize the raw text of one page.
///
/// Applies Unicode NFC, turns CRLF and lone CR into LF, drops the
/// replacement character and NUL, and trims trailing whitespace. Line
/// structure is otherwise left alone: the question grammar depends on it.
pub fn normalize_page_text(raw: &str) -> String {
    let mut result: String = raw.nfc().collect();

    result = result.replace("\r\n", "\n").replace('\r', "\n");
    result.retain(|c| c != '\u{FFFD}' && c != '\0');

    result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_passthrough() {
        assert_eq!(normalize_page_text("1. 題目 (A)甲"), "1. 題目 (A)甲");
    }

    #[test]
    fn test_line_endings() {
        assert_eq!(normalize_page_text("a\r\nb\rc\n"), "a\nb\nc");
    }

    #[test]
    fn test_keeps_inner_line_structure() {
        assert_eq!(normalize_page_text("1. a\n\n2. b\n"), "1. a\n\n2. b");
    }

    #[test]
    fn test_replacement_and_nul_removed() {
        assert_eq!(normalize_page_text("無\u{FFFD}人\0機"), "無人機");
    }

    #[test]
    fn test_nfc_normalization() {
        // e + combining acute should normalize to single char.
        let input = "caf\u{0065}\u{0301}";
        assert_eq!(normalize_page_text(input), "caf\u{00E9}");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize_page_text(""), "");
        assert_eq!(normalize_page_text(" \n "), "");
    }
}
