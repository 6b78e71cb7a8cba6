//! Positioned boxes produced by layout.
//!
//! Every box is measured in ems of the surrounding text. A child's `x` and
//! `shift` are relative to its parent's left edge and baseline.

use alloc::borrow::Cow;

use strum::{AsRefStr, Display, IntoStaticStr};

use crate::font::SizingClass;
use crate::types::Diagnostic;

/// What a box stands for. The kebab-case name is the element suffix used by
/// the box output (`mjx-mfrac`, `mjx-msqrt`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum BoxKind {
    /// Root of the tree.
    Math,
    /// Horizontal list.
    Mrow,
    /// Identifier glyphs.
    Mi,
    /// Number glyphs.
    Mn,
    /// Operator glyphs.
    Mo,
    /// Upright text.
    Mtext,
    /// Fraction.
    Mfrac,
    /// Square root.
    Msqrt,
    /// Root with index.
    Mroot,
    /// Base with scripts.
    Msubsup,
    /// Base with limits.
    Munderover,
    /// Base with an accent.
    Mover,
    /// Explicit space or glue.
    Mspace,
    /// Table.
    Mtable,
    /// Table cell.
    Mtd,
    /// Style override.
    Mstyle,
    /// Invisible content.
    Mphantom,
    /// Error marker.
    Merror,
    /// Delimiter or radical sign, from a size variant or assembled.
    Stretchy,
    /// Fraction bar, overline or radical vinculum.
    Line,
}

/// A glyph placed inside a run or an assembly.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedGlyph {
    /// Code point.
    pub code: u32,
    /// Font variant the metrics came from.
    pub variant: String,
    /// Horizontal offset from the box's left edge.
    pub x: f64,
    /// Baseline offset from the box's baseline, up positive.
    pub y: f64,
    /// Horizontal scale applied to the em-sized outline.
    pub scale_x: f64,
    /// Vertical scale applied to the em-sized outline.
    pub scale_y: f64,
    /// SVG outline, when the font provides one.
    pub path: Option<Cow<'static, str>>,
    /// Box output sizing the glyph asks for.
    pub sizing: Option<GlyphSizing>,
}

/// Explicit box output sizing of a glyph, in ems of the glyph's own font
/// size (before any stretching).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphSizing {
    /// Which adjustments to emit.
    pub class: SizingClass,
    /// Advance width.
    pub width: f64,
    /// Extent above the baseline.
    pub height: f64,
    /// Extent below the baseline.
    pub depth: f64,
    /// Italic correction, added as right padding.
    pub italic: f64,
}

impl PlacedGlyph {
    /// The glyph as a string, `U+FFFD` for invalid code points.
    #[must_use]
    pub fn character(&self) -> char {
        char::from_u32(self.code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }
}

/// Glyphs of a text run or assembly.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GlyphRun {
    /// Source text of the run.
    pub text: String,
    /// Font scale of the run.
    pub scale: f64,
    /// Placed glyphs in order.
    pub glyphs: Vec<PlacedGlyph>,
    /// Colour override, used for error markers.
    pub color: Option<String>,
}

/// Payload of a box.
#[derive(Debug, Clone, PartialEq)]
pub enum BoxContent {
    /// Glyphs set side by side.
    Text(GlyphRun),
    /// Glyph pieces of a stretched delimiter, radical or arrow.
    Assembly(GlyphRun),
    /// Child boxes.
    List(Vec<BoxNode>),
    /// Filled rectangle of the box's size.
    Rule,
    /// Empty space of the box's size.
    Kern,
}

/// A positioned, measured box.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxNode {
    /// What the box stands for.
    pub kind: BoxKind,
    /// Advance width.
    pub width: f64,
    /// Extent above the baseline.
    pub height: f64,
    /// Extent below the baseline.
    pub depth: f64,
    /// Offset from the parent's left edge.
    pub x: f64,
    /// Baseline shift relative to the parent's baseline, up positive.
    pub shift: f64,
    /// Payload.
    pub content: BoxContent,
}

impl BoxNode {
    /// An unplaced box.
    #[must_use]
    pub const fn new(kind: BoxKind, width: f64, height: f64, depth: f64, content: BoxContent) -> Self {
        Self {
            kind,
            width,
            height,
            depth,
            x: 0.0,
            shift: 0.0,
            content,
        }
    }

    /// Empty space.
    #[must_use]
    pub const fn kern(width: f64) -> Self {
        Self::new(BoxKind::Mspace, width, 0.0, 0.0, BoxContent::Kern)
    }

    /// Filled rule.
    #[must_use]
    pub const fn rule(width: f64, height: f64, depth: f64) -> Self {
        Self::new(BoxKind::Line, width, height, depth, BoxContent::Rule)
    }

    /// Children of a list box, empty otherwise.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match &self.content {
            BoxContent::List(children) => children,
            _ => &[],
        }
    }

    /// Total vertical extent.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.height + self.depth
    }

    /// Lays `children` out left to right and wraps them in a `kind` box.
    ///
    /// Children keep their shifts; the box grows to cover them.
    #[must_use]
    pub fn hbox(kind: BoxKind, mut children: Vec<Self>) -> Self {
        let mut x = 0.0;
        for child in &mut children {
            child.x = x;
            x += child.width;
        }
        Self::wrap(kind, x, children)
    }

    /// Wraps already placed `children` in a `kind` box of `width`.
    #[must_use]
    pub fn wrap(kind: BoxKind, width: f64, children: Vec<Self>) -> Self {
        let height = children
            .iter()
            .map(|c| c.height + c.shift)
            .fold(0.0, f64::max);
        let depth = children
            .iter()
            .map(|c| c.depth - c.shift)
            .fold(0.0, f64::max);
        Self::new(kind, width, height, depth, BoxContent::List(children))
    }

    /// Places the box at `x` with baseline `shift`.
    #[must_use]
    pub const fn at(mut self, x: f64, shift: f64) -> Self {
        self.x = x;
        self.shift = shift;
        self
    }

    /// Pre-order traversal.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }
}

/// Layout output: the root box plus every diagnostic so far.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxTree {
    /// Root box, of kind [`BoxKind::Math`].
    pub root: BoxNode,
    /// Block (display) or inline layout.
    pub display: bool,
    /// Parser diagnostics followed by layout diagnostics.
    pub diagnostics: Vec<Diagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hbox_places_children_in_sequence() {
        let raised = BoxNode::rule(1.0, 0.5, 0.0).at(0.0, 0.25);
        let row = BoxNode::hbox(BoxKind::Mrow, vec![BoxNode::kern(0.5), raised, BoxNode::rule(0.25, 0.1, 0.2)]);
        assert_eq!(row.width, 1.75);
        assert_eq!(row.height, 0.75);
        assert_eq!(row.depth, 0.2);
        let xs: Vec<f64> = row.children().iter().map(|c| c.x).collect();
        assert_eq!(xs, [0.0, 0.5, 1.5]);
    }

    #[test]
    fn kind_names_are_element_suffixes() {
        assert_eq!(BoxKind::Msubsup.as_ref(), "msubsup");
        assert_eq!(BoxKind::Stretchy.to_string(), "stretchy");
    }
}
