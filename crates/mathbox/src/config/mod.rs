//! Package registry and parser configuration.
//!
//! Packages are registered once in a [`Registry`]; each request resolves a
//! set of package names into a [`ParserConfiguration`] that the parser reads
//! handlers from.

mod configuration;
mod package;
pub mod packages;
mod registry;

pub use configuration::{HandlerOverride, HandlerTable, ParserConfiguration};
pub use package::{
    ArgSpec, CharKind, ColumnAlign, Construct, DefineKind, EnvironmentSpec, Handler, InitContext,
    InitHook, Package, PackageBuilder, ParserFlag, Postprocessor, Preprocessor,
};
pub use registry::{BASE_PACKAGE, Registry};
