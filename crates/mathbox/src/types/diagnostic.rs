//! Structured diagnostics shared by every stage of the pipeline.
//!
//! A [`Diagnostic`] pairs an [`ErrorKind`] with the source span it concerns.
//! Parser and layout diagnostics are recoverable and travel alongside the
//! output; configuration diagnostics abort a request before parsing starts.

use core::fmt;

use strum::{AsRefStr, EnumDiscriminants, IntoStaticStr};
use thiserror::Error;

use crate::types::SourceSpan;

/// Error value reported by the registry, parser, font model and retry
/// pipeline.
///
/// Rendering it with `Display` produces the kind's message followed by the
/// position and an underlined excerpt of the source, for example
/// `Undefined control sequence: \foo at position 3: x+\̲f̲o̲o̲+y`.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}{context}")]
pub struct Diagnostic {
    /// What went wrong.
    #[source]
    pub kind: Box<ErrorKind>,
    /// Source range the diagnostic refers to, when there is one.
    pub span: Option<SourceSpan>,
    context: DiagnosticContext,
}

impl Diagnostic {
    /// Creates a diagnostic without source information.
    pub fn new<T: Into<ErrorKind>>(kind: T) -> Self {
        Self {
            kind: Box::new(kind.into()),
            span: None,
            context: DiagnosticContext::None,
        }
    }

    /// Creates a diagnostic located at a token or node.
    pub fn with_token<T: Into<ErrorKind>>(kind: T, token: &dyn ErrorLocationProvider) -> Self {
        let span = token.loc().filter(|loc| loc.start <= loc.end).cloned();
        Self::at(kind, span)
    }

    /// Creates a diagnostic for an explicit (optional) span.
    pub fn at<T: Into<ErrorKind>>(kind: T, span: Option<SourceSpan>) -> Self {
        let context = span
            .clone()
            .map_or(DiagnosticContext::None, DiagnosticContext::Location);
        Self {
            kind: Box::new(kind.into()),
            span,
            context,
        }
    }

    /// The kind's human readable message, without location context.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Discriminant of the kind, handy for assertions and grouping.
    #[must_use]
    pub fn code(&self) -> ErrorCode {
        ErrorCode::from(self.kind.as_ref())
    }

    /// Whether the pipeline can continue past this diagnostic.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self.code(),
            ErrorCode::UnknownPackage
                | ErrorCode::UnresolvedDependency
                | ErrorCode::CyclicDependency
                | ErrorCode::DependencyTimeout
                | ErrorCode::InvalidFontData
                | ErrorCode::UnknownFontVariant
        )
    }
}

/// Reason for a [`Diagnostic`].
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Error, EnumDiscriminants)]
#[strum_discriminants(name(ErrorCode))]
#[strum_discriminants(derive(AsRefStr, IntoStaticStr, Hash))]
pub enum ErrorKind {
    #[error("Undefined control sequence: {name}")]
    UndefinedControlSequence { name: String },
    #[error("Unknown environment '{name}'")]
    UnknownEnvironment { name: String },
    #[error("Too many macro expansions (limit {limit}): infinite loop or nesting too deep")]
    MacroRecursionLimit { limit: usize },
    #[error("Package '{package}' was registered twice; the later definition wins")]
    DuplicateOverride { package: String },
    #[error("Unknown package '{name}'")]
    UnknownPackage { name: String },
    #[error("Package '{package}' depends on '{dependency}', which is not registered")]
    UnresolvedDependency { package: String, dependency: String },
    #[error("Cyclic package dependency: {cycle}")]
    CyclicDependency { cycle: String },
    #[error("No glyph for U+{code:04X} in variant '{variant}'")]
    GlyphNotFound { variant: String, code: u32 },
    #[error("U+{code:04X} cannot be stretched to {target:.3}em")]
    NotStretchable { code: u32, target: f64 },
    #[error("Dependency '{dependency}' was not ready after {attempts} attempt(s)")]
    DependencyTimeout { dependency: String, attempts: usize },
    #[error("Missing close brace")]
    MissingCloseBrace,
    #[error("Extra close brace or missing open brace")]
    ExtraCloseBrace,
    #[error("Missing argument for {command}")]
    MissingArgument { command: String },
    #[error("Double exponent: use braces to clarify")]
    DoubleSuperscript,
    #[error("Double subscripts: use braces to clarify")]
    DoubleSubscript,
    #[error("Missing \\right to match \\left")]
    MissingRightDelimiter,
    #[error("Misplaced {command}")]
    MisplacedCommand { command: String },
    #[error("Unexpected character: '{character}'")]
    UnexpectedCharacter { character: String },
    #[error("Missing or unrecognized delimiter for {command}: '{delimiter}'")]
    InvalidDelimiter { command: String, delimiter: String },
    #[error("Invalid macro definition: {reason}")]
    InvalidMacroDefinition { reason: String },
    #[error("\\begin{{{begin}}} ended with \\end{{{end}}}")]
    MismatchedEnvironment { begin: String, end: String },
    #[error("Unknown font variant '{variant}'")]
    UnknownFontVariant { variant: String },
    #[error("Invalid font data: {reason}")]
    InvalidFontData { reason: String },
}

impl From<serde_json::Error> for ErrorKind {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidFontData {
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for Diagnostic {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::from(err))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum DiagnosticContext {
    None,
    Location(SourceSpan),
}

impl fmt::Display for DiagnosticContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Location(SourceSpan { input, start, end }) => {
                let input_len = input.len();
                if *start == input_len {
                    write!(f, " at end of input: ")?;
                } else {
                    write!(f, " at position {}: ", start + 1)?;
                }

                let prefix_start = adjust_char_boundary(input, start.saturating_sub(15), false);
                if prefix_start > 0 {
                    write!(f, "\u{2026}")?;
                }
                write!(f, "{}", &input[prefix_start..*start])?;
                if end > start {
                    for c in input[*start..*end].chars() {
                        write!(f, "{c}\u{0332}")?;
                    }
                }
                let suffix_end = adjust_char_boundary(input, (*end + 15).min(input_len), true);
                write!(f, "{}", &input[*end..suffix_end])?;
                if suffix_end < input_len {
                    write!(f, "\u{2026}")?;
                }
                Ok(())
            }
        }
    }
}

const fn adjust_char_boundary(input: &str, mut index: usize, forward: bool) -> usize {
    if forward {
        while index < input.len() && !input.is_char_boundary(index) {
            index += 1;
        }
    } else {
        while index > 0 && !input.is_char_boundary(index) {
            index -= 1;
        }
    }
    index
}

/// Anything that can point a diagnostic at a place in the source.
pub trait ErrorLocationProvider {
    /// The source span, if available.
    fn loc(&self) -> Option<&SourceSpan>;
}

impl ErrorLocationProvider for SourceSpan {
    fn loc(&self) -> Option<&SourceSpan> {
        Some(self)
    }
}

impl ErrorLocationProvider for Option<SourceSpan> {
    fn loc(&self) -> Option<&SourceSpan> {
        self.as_ref()
    }
}
