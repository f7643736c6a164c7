use log::trace;
use thiserror::Error;

mod quotes;

use quotes::{is_quotation_mark, normalize_smart_quotes};

/// Markers chat clients wrap bold, strike-through and italic text with.
const EMPHASIS_MARKERS: [char; 3] = ['*', '~', '_'];

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("quotes did not terminate")]
    UnterminatedQuote,
}

/// Splits a command line into arguments.
///
/// Whitespace separates arguments, quotes (`"`, `'` and their typographic variants) group
/// them. A quote is closed only by the same character that opened it.
pub fn parse_args(text: &str) -> Result<Vec<String>, ParseError> {
    // Trailing space flushes the last token
    let text = normalize_smart_quotes(&format!("{} ", text.trim()));
    let mut scanner = Scanner::default();
    for (i, c) in text.chars().enumerate() {
        scanner.feed(i, c);
    }
    scanner.finish()
}

/// Removes emphasis wrapping such as `*start*` or `_~start~_`, outermost first.
pub fn strip_formatting(text: &str) -> &str {
    let mut stripped = text;
    while stripped.chars().count() > 1 {
        let mut chars = stripped.chars();
        match (chars.next(), chars.next_back()) {
            (Some(first), Some(last)) if first == last && EMPHASIS_MARKERS.contains(&first) => {
                stripped = chars.as_str();
            }
            _ => break,
        }
    }
    stripped
}

#[derive(Default)]
struct Scanner {
    tokens: Vec<String>,
    token: String,
    quote: Option<char>,
    after_separator: bool,
}

impl Scanner {
    fn feed(&mut self, i: usize, c: char) {
        match self.quote {
            Some(quote) if c == quote => {
                self.quote = None;
            }
            Some(_) => {
                self.token.push(c);
            }
            None if is_quotation_mark(c) => {
                self.after_separator = false;
                self.quote = Some(c);
            }
            None if c.is_whitespace() => {
                if i == 0 || self.after_separator {
                    return;
                }
                self.after_separator = true;
                self.tokens.push(std::mem::take(&mut self.token));
            }
            None => {
                self.after_separator = false;
                self.token.push(c);
            }
        }
    }

    fn finish(self) -> Result<Vec<String>, ParseError> {
        if let Some(quote) = self.quote {
            trace!("Unterminated {quote} quote, tokens so far: {:?}", self.tokens);
            return Err(ParseError::UnterminatedQuote);
        }
        Ok(self.tokens)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn args(text: &str) -> Vec<String> {
        parse_args(text).unwrap()
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(args("a b c"), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_runs_collapse() {
        assert_eq!(args("  a \t b\n\nc   "), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(args(""), Vec::<String>::new());
        assert_eq!(args("   \t"), Vec::<String>::new());
    }

    #[test]
    fn test_double_quotes_group_words() {
        assert_eq!(args("\"hello world\" foo"), vec!["hello world", "foo"]);
    }

    #[test]
    fn test_single_quotes_group_words() {
        assert_eq!(args("say 'good  night' now"), vec!["say", "good  night", "now"]);
    }

    #[test]
    fn test_other_quote_inside_quote_is_kept() {
        assert_eq!(args("\"it's fine\""), vec!["it's fine"]);
        assert_eq!(args("'say \"hi\"'"), vec!["say \"hi\""]);
    }

    #[test]
    fn test_quotes_glue_to_adjacent_text() {
        assert_eq!(args("a\"b c\"d e"), vec!["ab cd", "e"]);
    }

    #[test]
    fn test_smart_quotes() {
        assert_eq!(args("“quoted phrase”"), vec!["quoted phrase"]);
        assert_eq!(args("‘single one’ two"), vec!["single one", "two"]);
        assert_eq!(args("“mixed\" quotes"), vec!["mixed", "quotes"]);
    }

    #[test]
    fn test_non_ascii_quotation_marks() {
        assert_eq!(args("«a b« c"), vec!["a b", "c"]);
        assert_eq!(args("「a b「"), vec!["a b"]);
    }

    #[test]
    fn test_empty_quotes_produce_empty_token() {
        assert_eq!(args("\"\" foo"), vec!["", "foo"]);
    }

    #[test]
    fn test_unterminated_quote() {
        assert_eq!(parse_args("\"abc"), Err(ParseError::UnterminatedQuote));
        assert_eq!(parse_args("a 'b c"), Err(ParseError::UnterminatedQuote));
        assert_eq!(parse_args("“abc"), Err(ParseError::UnterminatedQuote));
        assert_eq!(
            ParseError::UnterminatedQuote.to_string(),
            "quotes did not terminate"
        );
    }

    #[test]
    fn test_rejoined_tokens_parse_the_same() {
        for text in ["a b c", "deploy  prod   now", "x", "“a” b"] {
            let tokens = args(text);
            assert_eq!(args(&tokens.join(" ")), tokens);
        }
    }

    #[test]
    fn test_strip_formatting() {
        assert_eq!(strip_formatting("*start*"), "start");
        assert_eq!(strip_formatting("_~start~_"), "start");
        assert_eq!(strip_formatting("*_start_*"), "start");
        assert_eq!(strip_formatting("*start_"), "*start_");
        assert_eq!(strip_formatting("start"), "start");
        assert_eq!(strip_formatting("*"), "*");
        assert_eq!(strip_formatting("**"), "");
        assert_eq!(strip_formatting("***"), "*");
        assert_eq!(strip_formatting(""), "");
    }
}
