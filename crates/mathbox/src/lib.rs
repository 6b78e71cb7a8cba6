//! Extensible TeX math typesetting.
//!
//! Source goes through package-defined preprocessors, a configurable parser
//! and postprocessors into an expression tree, is laid out with TeX font
//! metrics into boxes and is serialized as box (CHTML) or vector (SVG)
//! markup. Packages add macros, environments and character handlers at
//! runtime; deferred font variants are waited for and the request retried.
//!
//! ```
//! use mathbox::{TypesetContext, typeset};
//!
//! let ctx = TypesetContext::default();
//! let out = typeset(&ctx, r"\frac{1}{2}", &["ams"], false).unwrap();
//! assert!(out.diagnostics.is_empty());
//! assert!(out.output.to_markup().starts_with("<mjx-container"));
//! ```
#![warn(missing_docs)]
#![warn(clippy::nursery)]
#![warn(clippy::pedantic)]
#![warn(clippy::str_to_string)]
#![warn(clippy::pointer_format)]
#![warn(clippy::std_instead_of_core)]
#![warn(clippy::std_instead_of_alloc)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::panic)]
#![warn(clippy::expect_used)]
#![warn(clippy::unwrap_in_result)]
#![warn(clippy::if_then_some_else_none)]
#![warn(clippy::unused_trait_names)]
#![warn(clippy::get_unwrap)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::unimplemented)]
#![warn(clippy::return_and_then)]
#![warn(clippy::needless_raw_strings)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(clippy::rc_buffer)]
#![warn(clippy::undocumented_unsafe_blocks)]
#![warn(clippy::separated_literal_suffix)]
#![warn(clippy::ref_patterns)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::string_slice)]
#![allow(clippy::pub_use)]
#![allow(clippy::float_cmp)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::default_numeric_fallback)]
#![allow(clippy::single_call_fn)]
#![allow(clippy::many_single_char_names)]

extern crate alloc;

pub mod config;
pub mod context;
pub mod core;
pub mod font;
pub mod layout;
pub mod lexer;
pub mod namespace;
pub mod parser;
pub mod render;
pub mod retry;
pub mod types;

pub use crate::config::{Package, ParserConfiguration, Registry};
pub use crate::context::{TypesetContext, TypesetRequest};
pub use crate::core::{Typeset, TypesetFailure, typeset};
pub use crate::font::{FontCharRecord, FontTables, FontVariantData};
pub use crate::layout::{BoxTree, layout};
pub use crate::parser::{ExpressionTree, Node, parse};
pub use crate::render::{OutputTree, render};
pub use crate::retry::{Attempt, Dependency};
pub use crate::types::{Diagnostic, ErrorKind, OutputTarget, Settings};
