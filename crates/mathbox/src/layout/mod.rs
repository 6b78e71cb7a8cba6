//! Metric-driven layout: expression tree in, positioned boxes out.

mod box_tree;
mod engine;
mod spacing;
mod style;

pub use box_tree::{BoxContent, BoxKind, BoxNode, BoxTree, GlyphRun, GlyphSizing, PlacedGlyph};
pub use engine::layout;
pub use spacing::{MEDIUM, THICK, THIN, demote_binaries, glue};
pub use style::{DISPLAY, SCRIPT, SCRIPTSCRIPT, Style, TEXT};
