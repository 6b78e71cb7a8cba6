//! Expression tree produced by the parser.
//!
//! Nodes own their children in order and carry no parent pointers; layout
//! passes the inherited style down instead.

use strum::{AsRefStr, Display, EnumDiscriminants, EnumString, IntoStaticStr};

use crate::config::ColumnAlign;
use crate::types::{Diagnostic, SourceSpan};

/// TeX spacing class of an atom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum TexClass {
    /// Ordinary symbol.
    #[default]
    Ord,
    /// Large or named operator.
    Op,
    /// Binary operator.
    Bin,
    /// Relation.
    Rel,
    /// Opening fence.
    Open,
    /// Closing fence.
    Close,
    /// Punctuation.
    Punct,
    /// Delimited subformula.
    Inner,
}

/// Math alphabet of identifiers and numbers.
///
/// The kebab-case name doubles as the font variant name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "kebab-case")]
pub enum MathVariant {
    /// Upright.
    Normal,
    /// Slanted.
    Italic,
    /// Upright bold.
    Bold,
    /// Slanted bold.
    BoldItalic,
    /// Blackboard bold.
    DoubleStruck,
    /// Fraktur.
    Fraktur,
    /// Calligraphic.
    Script,
    /// Sans-serif.
    SansSerif,
    /// Typewriter.
    Monospace,
}

impl MathVariant {
    /// Font variant used for glyph lookup.
    #[must_use]
    pub fn font_name(self) -> &'static str {
        self.into()
    }

    /// Alphabet an identifier gets without an override: single Latin
    /// letters, lowercase Greek and `∂` are italic, anything else upright.
    #[must_use]
    pub fn for_identifier(text: &str) -> Self {
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None)
                if c.is_ascii_alphabetic()
                    || ('\u{3B1}'..='\u{3C9}').contains(&c)
                    || matches!(c, '\u{3D1}' | '\u{3D5}' | '\u{3D6}' | '\u{3F5}' | '\u{2202}') =>
            {
                Self::Italic
            }
            _ => Self::Normal,
        }
    }

    /// Bold counterpart used by `\boldsymbol`.
    #[must_use]
    pub const fn emboldened(self) -> Self {
        match self {
            Self::Italic | Self::BoldItalic => Self::BoldItalic,
            Self::Normal | Self::Bold => Self::Bold,
            other => other,
        }
    }
}

/// Attributes every node carries.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeAttrs {
    /// Spacing class.
    pub class: TexClass,
    /// Forced display (`true`) or text (`false`) style.
    pub display: Option<bool>,
    /// Math alphabet override.
    pub variant: Option<MathVariant>,
    /// Source range the node came from.
    pub span: Option<SourceSpan>,
}

impl NodeAttrs {
    /// Attributes with a class and span.
    #[must_use]
    pub const fn new(class: TexClass, span: Option<SourceSpan>) -> Self {
        Self {
            class,
            display: None,
            variant: None,
            span,
        }
    }

    /// Ordinary attributes at `span`.
    #[must_use]
    pub const fn ord(span: Option<SourceSpan>) -> Self {
        Self::new(TexClass::Ord, span)
    }
}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, EnumDiscriminants)]
#[strum_discriminants(vis(pub))]
#[strum_discriminants(derive(Display, Hash, AsRefStr), strum(serialize_all = "kebab-case"))]
#[strum_discriminants(name(NodeType))]
pub enum Node {
    /// Horizontal sequence.
    Row {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Items in order.
        children: Vec<Node>,
    },
    /// Letter or symbol set as a variable.
    Identifier {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Characters.
        text: String,
    },
    /// Digits.
    Number {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Characters.
        text: String,
    },
    /// Operator, relation, fence or punctuation.
    Operator {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Characters.
        text: String,
        /// Uses the large operator glyph in display style.
        large: bool,
        /// Stretches to the enclosing delimited content (`\middle`).
        stretchy: bool,
    },
    /// Upright text run.
    Text {
        /// Common attributes.
        attrs: NodeAttrs,
        /// The text.
        text: String,
    },
    /// Stacked numerator and denominator.
    Fraction {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Upper part.
        numerator: Box<Node>,
        /// Lower part.
        denominator: Box<Node>,
        /// Whether the rule is drawn.
        bar: bool,
    },
    /// Square root or n-th root.
    Radical {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Radicand.
        body: Box<Node>,
        /// Root index.
        index: Option<Box<Node>>,
    },
    /// Base with sub- and/or superscript.
    Scripts {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Base, possibly an empty row.
        base: Box<Node>,
        /// Subscript.
        sub: Option<Box<Node>>,
        /// Superscript.
        sup: Option<Box<Node>>,
    },
    /// Base with limits below and/or above.
    UnderOver {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Base operator.
        base: Box<Node>,
        /// Lower limit.
        under: Option<Box<Node>>,
        /// Upper limit.
        over: Option<Box<Node>>,
        /// Limits move to script position outside display style.
        movable: bool,
    },
    /// Explicit horizontal space.
    Space {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Width in ems.
        width: f64,
    },
    /// `\left ... \right` group.
    Delimited {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Opening delimiter, `.` for none.
        open: String,
        /// Closing delimiter, `.` for none.
        close: String,
        /// Enclosed content.
        body: Box<Node>,
    },
    /// Accented base.
    Accent {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Accented content.
        base: Box<Node>,
        /// Accent character.
        accent: String,
        /// Accent stretches to the base width.
        stretchy: bool,
    },
    /// Rows and columns of an environment.
    Table {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Cells, row-major.
        rows: Vec<Vec<Node>>,
        /// Column alignments, repeated cyclically.
        columns: Vec<ColumnAlign>,
    },
    /// Content with display or variant overrides in `attrs`.
    Styled {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Content.
        body: Box<Node>,
    },
    /// Invisible content that keeps its size.
    Phantom {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Content.
        body: Box<Node>,
    },
    /// Visible marker for a recovered error.
    Error {
        /// Common attributes.
        attrs: NodeAttrs,
        /// Diagnostic message.
        message: String,
        /// Offending source text.
        source: String,
        /// Render `source` as plain text instead of as an error.
        literal: bool,
    },
}

impl Node {
    /// An empty row.
    #[must_use]
    pub fn empty(span: Option<SourceSpan>) -> Self {
        Self::Row {
            attrs: NodeAttrs::ord(span),
            children: Vec::new(),
        }
    }

    /// Wraps `children` in a row unless there is exactly one.
    #[must_use]
    pub fn row(mut children: Vec<Self>, span: Option<SourceSpan>) -> Self {
        if children.len() == 1 {
            return children.remove(0);
        }
        Self::Row {
            attrs: NodeAttrs::ord(span),
            children,
        }
    }

    /// Error marker for `diagnostic`.
    #[must_use]
    pub fn error(diagnostic: &Diagnostic, source: impl Into<String>, literal: bool) -> Self {
        Self::Error {
            attrs: NodeAttrs::ord(diagnostic.span.clone()),
            message: diagnostic.message(),
            source: source.into(),
            literal,
        }
    }

    /// Variant tag.
    #[must_use]
    pub fn node_type(&self) -> NodeType {
        NodeType::from(self)
    }

    /// Common attributes.
    #[must_use]
    pub const fn attrs(&self) -> &NodeAttrs {
        match self {
            Self::Row { attrs, .. }
            | Self::Identifier { attrs, .. }
            | Self::Number { attrs, .. }
            | Self::Operator { attrs, .. }
            | Self::Text { attrs, .. }
            | Self::Fraction { attrs, .. }
            | Self::Radical { attrs, .. }
            | Self::Scripts { attrs, .. }
            | Self::UnderOver { attrs, .. }
            | Self::Space { attrs, .. }
            | Self::Delimited { attrs, .. }
            | Self::Accent { attrs, .. }
            | Self::Table { attrs, .. }
            | Self::Styled { attrs, .. }
            | Self::Phantom { attrs, .. }
            | Self::Error { attrs, .. } => attrs,
        }
    }

    /// Common attributes, mutably.
    pub const fn attrs_mut(&mut self) -> &mut NodeAttrs {
        match self {
            Self::Row { attrs, .. }
            | Self::Identifier { attrs, .. }
            | Self::Number { attrs, .. }
            | Self::Operator { attrs, .. }
            | Self::Text { attrs, .. }
            | Self::Fraction { attrs, .. }
            | Self::Radical { attrs, .. }
            | Self::Scripts { attrs, .. }
            | Self::UnderOver { attrs, .. }
            | Self::Space { attrs, .. }
            | Self::Delimited { attrs, .. }
            | Self::Accent { attrs, .. }
            | Self::Table { attrs, .. }
            | Self::Styled { attrs, .. }
            | Self::Phantom { attrs, .. }
            | Self::Error { attrs, .. } => attrs,
        }
    }

    /// Spacing class.
    #[must_use]
    pub const fn class(&self) -> TexClass {
        self.attrs().class
    }

    /// Direct children in order.
    #[must_use]
    pub fn children(&self) -> Vec<&Self> {
        match self {
            Self::Row { children, .. } => children.iter().collect(),
            Self::Fraction {
                numerator,
                denominator,
                ..
            } => vec![numerator, denominator],
            Self::Radical { body, index, .. } => {
                index.as_deref().into_iter().chain([body.as_ref()]).collect()
            }
            Self::Scripts { base, sub, sup, .. } => [Some(base.as_ref()), sub.as_deref(), sup.as_deref()]
                .into_iter()
                .flatten()
                .collect(),
            Self::UnderOver {
                base, under, over, ..
            } => [Some(base.as_ref()), under.as_deref(), over.as_deref()]
                .into_iter()
                .flatten()
                .collect(),
            Self::Delimited { body, .. }
            | Self::Accent { base: body, .. }
            | Self::Styled { body, .. }
            | Self::Phantom { body, .. } => vec![body],
            Self::Table { rows, .. } => rows.iter().flatten().collect(),
            Self::Identifier { .. }
            | Self::Number { .. }
            | Self::Operator { .. }
            | Self::Text { .. }
            | Self::Space { .. }
            | Self::Error { .. } => Vec::new(),
        }
    }

    /// Direct children in order, mutably.
    pub fn children_mut(&mut self) -> Vec<&mut Self> {
        match self {
            Self::Row { children, .. } => children.iter_mut().collect(),
            Self::Fraction {
                numerator,
                denominator,
                ..
            } => vec![numerator, denominator],
            Self::Radical { body, index, .. } => index
                .as_deref_mut()
                .into_iter()
                .chain([body.as_mut()])
                .collect(),
            Self::Scripts { base, sub, sup, .. } => {
                [Some(base.as_mut()), sub.as_deref_mut(), sup.as_deref_mut()]
                    .into_iter()
                    .flatten()
                    .collect()
            }
            Self::UnderOver {
                base, under, over, ..
            } => [Some(base.as_mut()), under.as_deref_mut(), over.as_deref_mut()]
                .into_iter()
                .flatten()
                .collect(),
            Self::Delimited { body, .. }
            | Self::Accent { base: body, .. }
            | Self::Styled { body, .. }
            | Self::Phantom { body, .. } => vec![body],
            Self::Table { rows, .. } => rows.iter_mut().flatten().collect(),
            Self::Identifier { .. }
            | Self::Number { .. }
            | Self::Operator { .. }
            | Self::Text { .. }
            | Self::Space { .. }
            | Self::Error { .. } => Vec::new(),
        }
    }

    /// Pre-order traversal.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in self.children() {
            child.visit(f);
        }
    }

    /// Pre-order traversal with mutable access.
    pub fn visit_mut(&mut self, f: &mut impl FnMut(&mut Self)) {
        f(self);
        for child in self.children_mut() {
            child.visit_mut(f);
        }
    }
}

/// Parser output: the tree plus every diagnostic raised while building it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionTree {
    /// Root node, a row in general.
    pub root: Node,
    /// Recoverable diagnostics, in source order of discovery.
    pub diagnostics: Vec<Diagnostic>,
}

impl ExpressionTree {
    /// All error markers in the tree.
    #[must_use]
    pub fn errors(&self) -> Vec<&Node> {
        let mut errors = Vec::new();
        self.root.visit(&mut |node| {
            if matches!(node, Node::Error { .. }) {
                errors.push(node);
            }
        });
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(text: &str) -> Node {
        Node::Identifier {
            attrs: NodeAttrs::default(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn row_of_one_is_unwrapped() {
        assert_eq!(Node::row(vec![ident("x")], None), ident("x"));
        assert_eq!(Node::row(Vec::new(), None).node_type(), NodeType::Row);
    }

    #[test]
    fn visit_is_pre_order() {
        let tree = Node::Scripts {
            attrs: NodeAttrs::default(),
            base: Box::new(ident("x")),
            sub: Some(Box::new(ident("i"))),
            sup: Some(Box::new(ident("n"))),
        };
        let mut seen = Vec::new();
        tree.visit(&mut |node| seen.push(node.node_type().to_string()));
        assert_eq!(seen, ["scripts", "identifier", "identifier", "identifier"]);
    }

    #[test]
    fn variant_names_match_fonts() {
        assert_eq!(MathVariant::BoldItalic.font_name(), "bold-italic");
        assert_eq!(MathVariant::DoubleStruck.to_string(), "double-struck");
        assert_eq!("sans-serif".parse::<MathVariant>().unwrap(), MathVariant::SansSerif);
        assert_eq!(TexClass::Rel.as_ref(), "rel");
    }

    #[test]
    fn identifier_alphabets() {
        assert_eq!(MathVariant::for_identifier("x"), MathVariant::Italic);
        assert_eq!(MathVariant::for_identifier("\u{3B1}"), MathVariant::Italic);
        assert_eq!(MathVariant::for_identifier("\u{393}"), MathVariant::Normal);
        assert_eq!(MathVariant::for_identifier("sin"), MathVariant::Normal);
        assert_eq!(MathVariant::Italic.emboldened(), MathVariant::BoldItalic);
    }
}
