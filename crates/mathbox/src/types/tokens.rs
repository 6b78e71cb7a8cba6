use crate::types::{ErrorLocationProvider, SourceSpan};

/// A single lexed token.
///
/// Control sequences keep their backslash (`\frac`), every other token is a
/// single character (plus combining marks). Tokens produced by macro
/// expansion carry the span of the macro invocation that produced them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Raw token text.
    pub text: String,
    /// Where the token came from, if known.
    pub loc: Option<SourceSpan>,
}

/// Text of the synthetic end-of-input token.
pub const EOF: &str = "EOF";

impl Token {
    /// Creates a token from text and an optional span.
    #[must_use]
    pub const fn new(text: String, loc: Option<SourceSpan>) -> Self {
        Self { text, loc }
    }

    /// Whether this is the end-of-input marker.
    #[must_use]
    pub fn is_eof(&self) -> bool {
        self.text == EOF
    }

    /// Whether this token is a control sequence such as `\alpha` or `\,`.
    #[must_use]
    pub fn is_control_sequence(&self) -> bool {
        self.text.len() > 1 && self.text.starts_with('\\')
    }

    /// Returns a copy of this token relocated to `loc`.
    #[must_use]
    pub fn with_loc(mut self, loc: Option<SourceSpan>) -> Self {
        self.loc = loc;
        self
    }
}

impl ErrorLocationProvider for Token {
    fn loc(&self) -> Option<&SourceSpan> {
        self.loc.as_ref()
    }
}

impl ErrorLocationProvider for Option<Token> {
    fn loc(&self) -> Option<&SourceSpan> {
        self.as_ref()?.loc.as_ref()
    }
}
