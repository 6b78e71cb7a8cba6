//! The `boldsymbol` package.

use crate::config::BASE_PACKAGE;
use crate::config::package::{ArgSpec, Construct, Handler, Package};

/// The `boldsymbol` package: `\boldsymbol{..}` sets letters in bold italic
/// and everything else in bold.
#[must_use]
pub fn package() -> Package {
    Package::builder("boldsymbol")
        .depends_on(BASE_PACKAGE)
        .macro_handler(
            "\\boldsymbol",
            Handler::command(&[ArgSpec::Braced], Construct::BoldSymbol),
        )
        .build()
}
