/// Characters with the Unicode `Quotation_Mark` property.
const QUOTATION_MARKS: [char; 30] = [
    '\u{0022}', '\u{0027}', '\u{00AB}', '\u{00BB}', '\u{2018}', '\u{2019}', '\u{201A}',
    '\u{201B}', '\u{201C}', '\u{201D}', '\u{201E}', '\u{201F}', '\u{2039}', '\u{203A}',
    '\u{2E42}', '\u{300C}', '\u{300D}', '\u{300E}', '\u{300F}', '\u{301D}', '\u{301E}',
    '\u{301F}', '\u{FE41}', '\u{FE42}', '\u{FE43}', '\u{FE44}', '\u{FF02}', '\u{FF07}',
    '\u{FF62}', '\u{FF63}',
];

pub(crate) fn is_quotation_mark(c: char) -> bool {
    QUOTATION_MARKS.contains(&c)
}

/// Chat clients like to "fix" typed quotes into typographic ones.
pub(crate) fn normalize_smart_quotes(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{201C}' | '\u{201D}' => '"',
            '\u{2018}' | '\u{2019}' => '\'',
            c => c,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_smart_quotes() {
        assert_eq!(normalize_smart_quotes("“a” ‘b’"), "\"a\" 'b'");
        assert_eq!(normalize_smart_quotes("«a»"), "«a»");
    }

    #[test]
    fn test_ascii_quotes_are_quotation_marks() {
        assert!(is_quotation_mark('"'));
        assert!(is_quotation_mark('\''));
        assert!(!is_quotation_mark('`'));
    }
}
