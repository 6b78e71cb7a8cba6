//! The `noundefined` package: undefined control sequences show their name.

use crate::config::package::{Package, ParserFlag};

/// The `noundefined` package.
#[must_use]
pub fn package() -> Package {
    Package::builder("noundefined")
        .flag(ParserFlag::UndefinedAsLiteral)
        .build()
}
