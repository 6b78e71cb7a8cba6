//! Core types shared by every stage: diagnostics, spans, tokens, settings.

mod diagnostic;
mod settings;
mod source_location;
mod tokens;

pub use diagnostic::{Diagnostic, ErrorCode, ErrorKind, ErrorLocationProvider};
pub use settings::{OutputTarget, Settings};
pub use source_location::SourceSpan;
pub use tokens::{EOF, Token};
