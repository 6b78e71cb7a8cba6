//! The `base` package: characters, symbols, fractions, roots, delimiters,
//! fonts, accents, spacing and environments entry points.

use phf::phf_map;

use crate::config::BASE_PACKAGE;
use crate::config::package::{ArgSpec, CharKind, Construct, Handler, Package, PackageBuilder};
use crate::parser::{ExpressionTree, MathVariant, Node, TexClass};

use CharKind::{Identifier, Number, Operator};
use TexClass::{Bin, Close, Inner, Open, Ord as Ordinary, Punct, Rel};

/// Control sequences that stand for a single symbol.
pub static SYMBOLS: phf::Map<&'static str, (CharKind, TexClass, &'static str)> = phf_map! {
    "\\alpha" => (Identifier, Ordinary, "\u{3B1}"),
    "\\beta" => (Identifier, Ordinary, "\u{3B2}"),
    "\\gamma" => (Identifier, Ordinary, "\u{3B3}"),
    "\\delta" => (Identifier, Ordinary, "\u{3B4}"),
    "\\epsilon" => (Identifier, Ordinary, "\u{3F5}"),
    "\\varepsilon" => (Identifier, Ordinary, "\u{3B5}"),
    "\\zeta" => (Identifier, Ordinary, "\u{3B6}"),
    "\\eta" => (Identifier, Ordinary, "\u{3B7}"),
    "\\theta" => (Identifier, Ordinary, "\u{3B8}"),
    "\\iota" => (Identifier, Ordinary, "\u{3B9}"),
    "\\kappa" => (Identifier, Ordinary, "\u{3BA}"),
    "\\lambda" => (Identifier, Ordinary, "\u{3BB}"),
    "\\mu" => (Identifier, Ordinary, "\u{3BC}"),
    "\\nu" => (Identifier, Ordinary, "\u{3BD}"),
    "\\xi" => (Identifier, Ordinary, "\u{3BE}"),
    "\\pi" => (Identifier, Ordinary, "\u{3C0}"),
    "\\rho" => (Identifier, Ordinary, "\u{3C1}"),
    "\\sigma" => (Identifier, Ordinary, "\u{3C3}"),
    "\\tau" => (Identifier, Ordinary, "\u{3C4}"),
    "\\upsilon" => (Identifier, Ordinary, "\u{3C5}"),
    "\\phi" => (Identifier, Ordinary, "\u{3D5}"),
    "\\varphi" => (Identifier, Ordinary, "\u{3C6}"),
    "\\chi" => (Identifier, Ordinary, "\u{3C7}"),
    "\\psi" => (Identifier, Ordinary, "\u{3C8}"),
    "\\omega" => (Identifier, Ordinary, "\u{3C9}"),
    "\\Gamma" => (Identifier, Ordinary, "\u{393}"),
    "\\Delta" => (Identifier, Ordinary, "\u{394}"),
    "\\Theta" => (Identifier, Ordinary, "\u{398}"),
    "\\Lambda" => (Identifier, Ordinary, "\u{39B}"),
    "\\Xi" => (Identifier, Ordinary, "\u{39E}"),
    "\\Pi" => (Identifier, Ordinary, "\u{3A0}"),
    "\\Sigma" => (Identifier, Ordinary, "\u{3A3}"),
    "\\Phi" => (Identifier, Ordinary, "\u{3A6}"),
    "\\Psi" => (Identifier, Ordinary, "\u{3A8}"),
    "\\Omega" => (Identifier, Ordinary, "\u{3A9}"),
    "\\partial" => (Identifier, Ordinary, "\u{2202}"),
    "\\infty" => (Operator, Ordinary, "\u{221E}"),
    "\\nabla" => (Operator, Ordinary, "\u{2207}"),
    "\\prime" => (Operator, Ordinary, "\u{2032}"),
    "\\ldots" => (Operator, Inner, "\u{2026}"),
    "\\cdots" => (Operator, Inner, "\u{22EF}"),
    "\\pm" => (Operator, Bin, "\u{B1}"),
    "\\times" => (Operator, Bin, "\u{D7}"),
    "\\div" => (Operator, Bin, "\u{F7}"),
    "\\cdot" => (Operator, Bin, "\u{22C5}"),
    "\\le" => (Operator, Rel, "\u{2264}"),
    "\\ge" => (Operator, Rel, "\u{2265}"),
    "\\ne" => (Operator, Rel, "\u{2260}"),
    "\\in" => (Operator, Rel, "\u{2208}"),
    "\\mid" => (Operator, Rel, "\u{2223}"),
    "\\parallel" => (Operator, Rel, "\u{2225}"),
    "\\to" => (Operator, Rel, "\u{2192}"),
    "\\rightarrow" => (Operator, Rel, "\u{2192}"),
    "\\leftarrow" => (Operator, Rel, "\u{2190}"),
    "\\Rightarrow" => (Operator, Rel, "\u{21D2}"),
    "\\{" => (Operator, Open, "{"),
    "\\}" => (Operator, Close, "}"),
    "\\langle" => (Operator, Open, "\u{27E8}"),
    "\\rangle" => (Operator, Close, "\u{27E9}"),
    "\\lvert" => (Operator, Open, "|"),
    "\\rvert" => (Operator, Close, "|"),
    "\\vert" => (Operator, Ordinary, "|"),
    "\\|" => (Operator, Ordinary, "\u{2225}"),
    "\\Vert" => (Operator, Ordinary, "\u{2225}"),
    "\\lbrack" => (Operator, Open, "["),
    "\\rbrack" => (Operator, Close, "]"),
};

/// Large operators: symbol and whether limits go above/below.
pub static LARGE_OPERATORS: phf::Map<&'static str, (&'static str, bool)> = phf_map! {
    "\\sum" => ("\u{2211}", true),
    "\\prod" => ("\u{220F}", true),
    "\\coprod" => ("\u{2210}", true),
    "\\bigcup" => ("\u{22C3}", true),
    "\\bigcap" => ("\u{22C2}", true),
    "\\bigvee" => ("\u{22C1}", true),
    "\\bigwedge" => ("\u{22C0}", true),
    "\\int" => ("\u{222B}", false),
    "\\oint" => ("\u{222E}", false),
};

/// Upright named operators and whether they take limits.
pub static NAMED_OPERATORS: phf::Map<&'static str, bool> = phf_map! {
    "sin" => false, "cos" => false, "tan" => false, "cot" => false,
    "sec" => false, "csc" => false, "sinh" => false, "cosh" => false,
    "tanh" => false, "log" => false, "ln" => false, "exp" => false,
    "arg" => false, "deg" => false, "dim" => false, "ker" => false,
    "hom" => false, "lim" => true, "max" => true, "min" => true,
    "sup" => true, "inf" => true, "det" => true, "gcd" => true, "Pr" => true,
};

/// Math alphabet commands.
pub static FONTS: phf::Map<&'static str, MathVariant> = phf_map! {
    "\\mathrm" => MathVariant::Normal,
    "\\mathit" => MathVariant::Italic,
    "\\mathbf" => MathVariant::Bold,
    "\\mathbb" => MathVariant::DoubleStruck,
    "\\mathfrak" => MathVariant::Fraktur,
    "\\mathcal" => MathVariant::Script,
    "\\mathsf" => MathVariant::SansSerif,
    "\\mathtt" => MathVariant::Monospace,
};

/// Accent commands: accent character and stretchiness.
pub static ACCENTS: phf::Map<&'static str, (&'static str, bool)> = phf_map! {
    "\\hat" => ("\u{2C6}", false),
    "\\tilde" => ("\u{2DC}", false),
    "\\bar" => ("\u{AF}", false),
    "\\dot" => ("\u{2D9}", false),
    "\\vec" => ("\u{2192}", false),
    "\\overline" => ("\u{AF}", true),
    "\\overrightarrow" => ("\u{2192}", true),
    "\\overleftarrow" => ("\u{2190}", true),
};

/// Explicit spaces, in ems.
pub static SPACES: phf::Map<&'static str, f64> = phf_map! {
    "\\," => 0.166_666_7,
    "\\:" => 0.222_222_2,
    "\\>" => 0.222_222_2,
    "\\;" => 0.277_777_8,
    "\\!" => -0.166_666_7,
    "\\ " => 0.25,
    "\\quad" => 1.0,
    "\\qquad" => 2.0,
};

const NO_ARGS: &[ArgSpec] = &[];
const ONE: &[ArgSpec] = &[ArgSpec::Braced];
const TWO: &[ArgSpec] = &[ArgSpec::Braced, ArgSpec::Braced];
const OPTIONAL_ONE: &[ArgSpec] = &[ArgSpec::Optional, ArgSpec::Braced];
const DELIMITER: &[ArgSpec] = &[ArgSpec::Token];

fn characters(builder: PackageBuilder) -> PackageBuilder {
    let letters = ('a'..='z').chain('A'..='Z').map(|c| (c, Handler::char_class(Identifier, Ordinary)));
    let digits = ('0'..='9')
        .chain(['.'])
        .map(|c| (c, Handler::char_class(Number, Ordinary)));
    let operators = [
        ('+', Handler::char_class(Operator, Bin)),
        ('-', Handler::symbol(Operator, Bin, "\u{2212}")),
        ('*', Handler::char_class(Operator, Bin)),
        ('=', Handler::char_class(Operator, Rel)),
        ('<', Handler::char_class(Operator, Rel)),
        ('>', Handler::char_class(Operator, Rel)),
        (':', Handler::char_class(Operator, Rel)),
        (',', Handler::char_class(Operator, Punct)),
        (';', Handler::char_class(Operator, Punct)),
        ('(', Handler::char_class(Operator, Open)),
        ('[', Handler::char_class(Operator, Open)),
        (')', Handler::char_class(Operator, Close)),
        (']', Handler::char_class(Operator, Close)),
        ('!', Handler::char_class(Operator, Close)),
        ('|', Handler::char_class(Operator, Ordinary)),
        ('/', Handler::char_class(Operator, Ordinary)),
        ('~', Handler::command(NO_ARGS, Construct::Space(0.25))),
    ];
    letters
        .chain(digits)
        .chain(operators)
        .fold(builder, |builder, (ch, handler)| builder.character(ch, handler))
}

/// Merges runs of adjacent numbers (`1`, `2`, `.`, `5`) into one.
fn combine_numbers(tree: &mut ExpressionTree) {
    tree.root.visit_mut(&mut |node| {
        let Node::Row { children, .. } = node else {
            return;
        };
        let mut merged: Vec<Node> = Vec::with_capacity(children.len());
        for child in children.drain(..) {
            if let (
                Some(Node::Number {
                    attrs: prev_attrs,
                    text: prev,
                }),
                Node::Number { attrs, text },
            ) = (merged.last_mut(), &child)
                && prev_attrs.variant == attrs.variant
            {
                prev.push_str(text);
                prev_attrs.span =
                    crate::types::SourceSpan::range(prev_attrs.span.as_ref(), attrs.span.as_ref());
                continue;
            }
            merged.push(child);
        }
        *children = merged;
    });
}

/// The `base` package.
#[must_use]
pub fn package() -> Package {
    let symbols = SYMBOLS
        .entries()
        .map(|(name, (kind, class, text))| (*name, Handler::symbol(*kind, *class, *text)));
    let large = LARGE_OPERATORS.entries().map(|(name, (symbol, limits))| {
        (
            *name,
            Handler::command(
                NO_ARGS,
                Construct::LargeOperator {
                    symbol: *symbol,
                    limits: *limits,
                },
            ),
        )
    });
    let named = NAMED_OPERATORS.entries().map(|(name, limits)| {
        (
            format!("\\{name}"),
            Handler::command(
                NO_ARGS,
                Construct::NamedOperator {
                    name: *name,
                    limits: *limits,
                },
            ),
        )
    });
    let fonts = FONTS
        .entries()
        .map(|(name, variant)| (*name, Handler::command(ONE, Construct::Variant(*variant))));
    let accents = ACCENTS.entries().map(|(name, (accent, stretchy))| {
        (
            *name,
            Handler::command(
                ONE,
                Construct::Accent {
                    accent: *accent,
                    stretchy: *stretchy,
                },
            ),
        )
    });
    let spaces = SPACES
        .entries()
        .map(|(name, width)| (*name, Handler::command(NO_ARGS, Construct::Space(*width))));

    let commands = [
        (
            "\\frac",
            Handler::command(
                TWO,
                Construct::Fraction {
                    bar: true,
                    open: None,
                    close: None,
                    display: None,
                },
            ),
        ),
        ("\\sqrt", Handler::command(OPTIONAL_ONE, Construct::Radical)),
        ("\\left", Handler::command(DELIMITER, Construct::Left)),
        ("\\middle", Handler::command(DELIMITER, Construct::Middle)),
        ("\\right", Handler::command(DELIMITER, Construct::Right)),
        ("\\text", Handler::command(ONE, Construct::Text)),
        ("\\mbox", Handler::command(ONE, Construct::Text)),
        ("\\phantom", Handler::command(ONE, Construct::Phantom)),
        ("\\displaystyle", Handler::command(NO_ARGS, Construct::Style(true))),
        ("\\textstyle", Handler::command(NO_ARGS, Construct::Style(false))),
        ("\\limits", Handler::command(NO_ARGS, Construct::Limits(true))),
        ("\\nolimits", Handler::command(NO_ARGS, Construct::Limits(false))),
        ("\\over", Handler::command(NO_ARGS, Construct::Over)),
        ("\\begin", Handler::command(NO_ARGS, Construct::Begin)),
        ("\\end", Handler::command(NO_ARGS, Construct::End)),
    ];
    let substitutions = [
        ("\\leq", Handler::substitution("\\le", 0)),
        ("\\geq", Handler::substitution("\\ge", 0)),
        ("\\neq", Handler::substitution("\\ne", 0)),
        ("\\dots", Handler::substitution("\\ldots", 0)),
        ("\\implies", Handler::substitution("\\;\\Rightarrow\\;", 0)),
    ];

    let builder = Package::builder(BASE_PACKAGE)
        .macro_handlers(symbols)
        .macro_handlers(large)
        .macro_handlers(named)
        .macro_handlers(fonts)
        .macro_handlers(accents)
        .macro_handlers(spaces)
        .macro_handlers(commands)
        .macro_handlers(substitutions)
        .postprocessor("combine-numbers", combine_numbers);
    characters(builder).build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::NodeAttrs;

    fn number(text: &str) -> Node {
        Node::Number {
            attrs: NodeAttrs::default(),
            text: text.to_owned(),
        }
    }

    #[test]
    fn adjacent_numbers_are_combined() {
        let mut tree = ExpressionTree {
            root: Node::row(
                vec![
                    number("1"),
                    number("2"),
                    number("."),
                    number("5"),
                    Node::Identifier {
                        attrs: NodeAttrs::default(),
                        text: "x".to_owned(),
                    },
                    number("3"),
                ],
                None,
            ),
            diagnostics: Vec::new(),
        };
        combine_numbers(&mut tree);
        let Node::Row { children, .. } = &tree.root else {
            panic!("expected a row");
        };
        assert_eq!(children.len(), 3);
        assert_eq!(children[0], number("12.5"));
    }

    #[test]
    fn covers_every_table() {
        let base = package();
        assert!(base.macros.contains_key("\\alpha"));
        assert!(base.macros.contains_key("\\sum"));
        assert!(base.macros.contains_key("\\sin"));
        assert!(base.macros.contains_key("\\mathbf"));
        assert!(base.macros.contains_key("\\hat"));
        assert!(base.macros.contains_key("\\quad"));
        assert!(base.characters.contains_key(&'x'));
        assert!(base.depends_on.is_empty());
    }
}
