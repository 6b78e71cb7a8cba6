//! The `autobold` package: typesets the whole expression in bold when the
//! surrounding text is bold.

use crate::config::package::{InitContext, Package};
use crate::types::Settings;

fn wrap_bold(source: &str, settings: &Settings) -> String {
    if settings.bold_context && !source.trim_start().starts_with("\\boldsymbol") {
        // The newline ends a trailing `%` comment before the closing brace.
        format!("\\boldsymbol{{{source}\n}}")
    } else {
        source.to_owned()
    }
}

fn require_boldsymbol(cx: &mut InitContext) {
    cx.require("boldsymbol");
}

/// The `autobold` package.
#[must_use]
pub fn package() -> Package {
    Package::builder("autobold")
        .preprocessor("autobold", wrap_bold)
        .init(require_boldsymbol)
        .build()
}
