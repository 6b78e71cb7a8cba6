//! Main entry point: source in, markup out.

use thiserror::Error;
use tracing::debug;

use crate::context::TypesetContext;
use crate::layout::layout;
use crate::parser::parse;
use crate::render::{OutputTree, render};
use crate::retry::Dependency;
use crate::types::{Diagnostic, Settings};

/// A typeset expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Typeset {
    /// Serialized output in the context's target format.
    pub output: OutputTree,
    /// Recoverable diagnostics; each also appears as a visible marker in
    /// `output` or as a placeholder glyph.
    pub diagnostics: Vec<Diagnostic>,
}

/// Why a request produced no output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TypesetFailure {
    /// The package set could not be resolved; nothing was parsed.
    #[error(transparent)]
    Configuration(Diagnostic),
    /// Layout needs a resource that has not arrived yet. Retrying after it
    /// is ready yields the complete result.
    #[error("waiting for {0}")]
    Pending(Dependency),
}

/// Typesets `source` with `package_names` (plus `base`).
///
/// Runs preprocessors, parsing, postprocessors, layout and rendering in
/// order. The call is idempotent, so a `Pending` result can simply be
/// retried.
pub fn typeset<S: AsRef<str>>(
    ctx: &TypesetContext,
    source: &str,
    package_names: &[S],
    display_mode: bool,
) -> Result<Typeset, TypesetFailure> {
    let config = ctx
        .registry()
        .resolve(package_names)
        .map_err(TypesetFailure::Configuration)?;
    let settings = Settings {
        display_mode,
        ..ctx.settings().clone()
    };
    let tree = parse(source, &config, &settings);
    let boxes = layout(&tree, ctx.fonts(), &settings)
        .into_result()
        .map_err(TypesetFailure::Pending)?;
    let output = render(&boxes, settings.output);
    debug!(
        len = source.len(),
        display_mode,
        diagnostics = boxes.diagnostics.len(),
        "typeset expression"
    );
    Ok(Typeset {
        output,
        diagnostics: boxes.diagnostics,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorCode;

    #[test]
    fn unknown_package_fails_before_parsing() {
        let ctx = TypesetContext::default();
        let err = typeset(&ctx, "x", &["nope"], false).unwrap_err();
        let TypesetFailure::Configuration(diagnostic) = err else {
            panic!("expected a configuration failure");
        };
        assert_eq!(diagnostic.code(), ErrorCode::UnknownPackage);
    }

    #[test]
    fn display_mode_overrides_context_default() {
        let ctx = TypesetContext::default();
        let inline = typeset(&ctx, "x", &["ams"], false).unwrap();
        let block = typeset(&ctx, "x", &["ams"], true).unwrap();
        assert!(!inline.output.to_markup().contains("display=\"true\""));
        assert!(block.output.to_markup().contains("display=\"true\""));
    }
}
