//! Tokenizer for TeX math source.
//!
//! The lexer only ever moves forward. Every call to [`Lexer::lex`] returns
//! one of: a whitespace run (as a single `" "` token), a control word
//! (`\alpha`, trailing spaces swallowed), a control symbol (`\,`), or a single
//! character together with any combining marks that follow it. `%` starts a
//! comment that runs to the end of the line.

use alloc::sync::Arc;

use crate::types::{Diagnostic, EOF, ErrorKind, SourceSpan, Token};

const fn is_combining_mark(ch: char) -> bool {
    (ch as u32) >= 0x0300 && (ch as u32) <= 0x036F
}

fn match_space(s: &str) -> Option<usize> {
    let len: usize = s
        .chars()
        .take_while(|c| matches!(c, ' ' | '\r' | '\n' | '\t'))
        .map(char::len_utf8)
        .sum();
    (len > 0).then_some(len)
}

fn match_combining_tail(rest: &str) -> usize {
    rest.chars()
        .take_while(|&c| is_combining_mark(c))
        .map(char::len_utf8)
        .sum()
}

fn match_normal_char(s: &str) -> Option<usize> {
    let first = s.chars().next()?;
    let u = first as u32;
    let in_range = |a: u32, b: u32| u >= a && u <= b;
    let accepted = in_range(0x0021, 0x005B)
        || in_range(0x005D, 0x2027)
        || in_range(0x202A, 0xD7FF)
        || in_range(0xF900, 0xFFFF)
        || u > 0xFFFF;
    accepted.then(|| first.len_utf8() + match_combining_tail(&s[first.len_utf8()..]))
}

fn match_control_word(s: &str) -> Option<(usize, usize)> {
    let rest = s.strip_prefix('\\')?;
    let name_len = rest
        .chars()
        .take_while(|c| c.is_ascii_alphabetic() || *c == '@')
        .count();
    if name_len == 0 {
        return None;
    }
    let len = 1 + name_len;
    let skip = match_space(&s[len..]).unwrap_or(0);
    Some((len, skip))
}

fn match_control_symbol(s: &str) -> Option<usize> {
    let mut chars = s.chars();
    if chars.next()? != '\\' {
        return None;
    }
    let c = chars.next()?;
    Some(1 + c.len_utf8())
}

enum Branch {
    Space,
    Normal,
    ControlWord { skip: usize },
    ControlSymbol,
    Unknown,
}

fn classify(slice: &str) -> (Branch, usize) {
    if let Some(l) = match_space(slice) {
        (Branch::Space, l)
    } else if let Some(l) = match_normal_char(slice) {
        (Branch::Normal, l)
    } else if let Some((l, skip)) = match_control_word(slice) {
        (Branch::ControlWord { skip }, l + skip)
    } else if let Some(l) = match_control_symbol(slice) {
        (Branch::ControlSymbol, l)
    } else {
        let len = slice.chars().next().map_or(0, char::len_utf8);
        (Branch::Unknown, len)
    }
}

/// Forward-only tokenizer over a shared input buffer.
#[derive(Debug)]
pub struct Lexer {
    input: Arc<str>,
    last_index: usize,
}

impl Lexer {
    /// Creates a lexer positioned at the start of `input`.
    #[must_use]
    pub const fn new(input: Arc<str>) -> Self {
        Self {
            input,
            last_index: 0,
        }
    }

    /// The complete input being tokenized.
    #[must_use]
    pub fn input(&self) -> &Arc<str> {
        &self.input
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.last_index
    }

    fn span(&self, start: usize, end: usize) -> Option<SourceSpan> {
        Some(SourceSpan::new(Arc::clone(&self.input), start, end))
    }

    /// Returns the next token, or the `EOF` token once the input is drained.
    ///
    /// Characters outside every accepted class (C0 controls, private use
    /// area) produce an `UnexpectedCharacter` error; the offending character
    /// is consumed so lexing can resume afterwards.
    pub fn lex(&mut self) -> Result<Token, Diagnostic> {
        loop {
            let start = self.last_index;
            if start >= self.input.len() {
                return Ok(Token::new(EOF.to_owned(), self.span(start, start)));
            }

            let slice = &self.input[start..];
            let (branch, len) = classify(slice);
            self.last_index += len;
            let end = self.last_index;

            let text = match branch {
                Branch::Space => " ".to_owned(),
                Branch::ControlWord { skip } => slice[..len - skip].to_owned(),
                Branch::ControlSymbol => slice[..len].to_owned(),
                Branch::Normal if slice.starts_with('%') => {
                    self.last_index = slice
                        .find('\n')
                        .map_or(self.input.len(), |nl| start + nl);
                    continue;
                }
                Branch::Normal => slice[..len].to_owned(),
                Branch::Unknown => {
                    let token = Token::new(slice[..len].to_owned(), self.span(start, end));
                    return Err(Diagnostic::with_token(
                        ErrorKind::UnexpectedCharacter {
                            character: token.text.clone(),
                        },
                        &token,
                    ));
                }
            };

            let span_end = match branch {
                Branch::ControlWord { skip } => end - skip,
                _ => end,
            };
            return Ok(Token::new(text, self.span(start, span_end)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(input: &str) -> Vec<String> {
        let mut lexer = Lexer::new(Arc::from(input));
        let mut out = Vec::new();
        loop {
            let token = lexer.lex().unwrap();
            if token.is_eof() {
                break;
            }
            out.push(token.text);
        }
        out
    }

    #[test]
    fn control_words_swallow_trailing_space() {
        assert_eq!(lex_all(r"\alpha  x"), vec![r"\alpha", "x"]);
    }

    #[test]
    fn control_symbols_and_spaces() {
        assert_eq!(lex_all(r"a\, b"), vec!["a", r"\,", " ", "b"]);
    }

    #[test]
    fn comments_run_to_end_of_line() {
        assert_eq!(lex_all("x % note\ny"), vec!["x", " ", " ", "y"]);
        assert_eq!(lex_all("x%"), vec!["x"]);
    }

    #[test]
    fn combining_marks_stay_with_base() {
        assert_eq!(lex_all("e\u{301}x"), vec!["e\u{301}", "x"]);
    }

    #[test]
    fn span_excludes_swallowed_space() {
        let mut lexer = Lexer::new(Arc::from(r"\foo y"));
        let token = lexer.lex().unwrap();
        let span = token.loc.unwrap();
        assert_eq!((span.start, span.end), (0, 4));
    }

    #[test]
    fn unexpected_character_is_consumed() {
        let mut lexer = Lexer::new(Arc::from("\u{1}x"));
        let err = lexer.lex().unwrap_err();
        assert_eq!(err.code(), crate::types::ErrorCode::UnexpectedCharacter);
        assert_eq!(lexer.lex().unwrap().text, "x");
    }
}
