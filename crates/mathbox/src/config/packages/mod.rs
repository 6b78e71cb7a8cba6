//! Built-in packages.

mod ams;
mod autobold;
pub mod base;
mod boldsymbol;
mod newcommand;
mod noundefined;

use crate::config::package::Package;

/// Every built-in package, in registration order.
#[must_use]
pub fn builtin() -> Vec<Package> {
    vec![
        base::package(),
        ams::package(),
        newcommand::package(),
        boldsymbol::package(),
        autobold::package(),
        noundefined::package(),
    ]
}
