//! The `newcommand` package: `\newcommand`, `\renewcommand` and `\def`.
//!
//! The commands only mark where a definition starts; the parser reads the
//! name, parameter text and body and stores the result in its group-scoped
//! macro namespace.

use crate::config::BASE_PACKAGE;
use crate::config::package::{Construct, DefineKind, Handler, Package};

/// The `newcommand` package.
#[must_use]
pub fn package() -> Package {
    let define = |kind| Handler::command(&[], Construct::Define(kind));
    Package::builder("newcommand")
        .depends_on(BASE_PACKAGE)
        .macro_handler("\\newcommand", define(DefineKind::NewCommand))
        .macro_handler("\\renewcommand", define(DefineKind::RenewCommand))
        .macro_handler("\\def", define(DefineKind::Def))
        .build()
}
