//! Serialization of laid-out boxes into box (CHTML) or vector (SVG) markup.
//!
//! Both targets are driven by the same pre-order walk over the box tree;
//! they differ only in what each callback emits.

mod chtml;
mod output;
mod svg;

use tracing::debug;

pub use output::{Element, OutputNode, OutputTree, escape_into, fixed, make_em, units};

use crate::layout::{BoxContent, BoxNode, BoxTree, GlyphRun};
use crate::types::OutputTarget;

/// Callbacks of one output target.
trait Serializer {
    /// Starts `node`. `parent_height` is `None` for the root.
    fn open(&mut self, node: &BoxNode, parent_height: Option<f64>);
    /// Emits the glyphs of a text run or assembly inside `node`.
    fn glyphs(&mut self, node: &BoxNode, run: &GlyphRun);
    /// Emits a filled rule covering `node`.
    fn rule(&mut self, node: &BoxNode);
    /// Finishes `node`.
    fn close(&mut self, node: &BoxNode);
    /// The outermost element.
    fn finish(self) -> Element;
}

fn walk(serializer: &mut impl Serializer, node: &BoxNode, parent_height: Option<f64>) {
    serializer.open(node, parent_height);
    match &node.content {
        BoxContent::List(children) => {
            for child in children {
                walk(serializer, child, Some(node.height));
            }
        }
        BoxContent::Text(run) | BoxContent::Assembly(run) => serializer.glyphs(node, run),
        BoxContent::Rule => serializer.rule(node),
        BoxContent::Kern => {}
    }
    serializer.close(node);
}

fn serialize(mut serializer: impl Serializer, tree: &BoxTree) -> Element {
    walk(&mut serializer, &tree.root, None);
    serializer.finish()
}

/// Serializes `tree` for `target`.
#[must_use]
pub fn render(tree: &BoxTree, target: OutputTarget) -> OutputTree {
    let root = match target {
        OutputTarget::Chtml => serialize(chtml::Chtml::new(tree), tree),
        OutputTarget::Svg => serialize(svg::Svg::new(tree), tree),
    };
    debug!(target = %target, width = tree.root.width, "rendered expression");
    OutputTree {
        target,
        width: tree.root.width,
        height: tree.root.height,
        depth: tree.root.depth,
        root,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Registry;
    use crate::font::FontTables;
    use crate::layout::layout;
    use crate::parser::parse;
    use crate::types::Settings;

    fn boxes(source: &str) -> BoxTree {
        let config = Registry::with_builtin_packages().resolve(&["ams"]).unwrap();
        let settings = Settings::default();
        let tree = parse(source, &config, &settings);
        layout(&tree, &FontTables::tex(), &settings).ready().unwrap()
    }

    fn tags(element: &Element) -> Vec<String> {
        let mut tags = Vec::new();
        element.visit(&mut |e| tags.push(e.tag.clone()));
        tags
    }

    #[test]
    fn chtml_nests_sized_boxes() {
        let tree = boxes("x^2");
        let out = render(&tree, OutputTarget::Chtml);
        assert_eq!(
            tags(&out.root),
            ["mjx-container", "mjx-math", "mjx-mrow", "mjx-msubsup", "mjx-mi", "mjx-c", "mjx-mn", "mjx-c"]
        );
        let markup = out.to_markup();
        assert!(markup.starts_with("<mjx-container class=\"MathJax\" jax=\"CHTML\">"));
        assert!(markup.contains("class=\"mjx-c78 TEX-I\""));
        assert!(markup.contains(">x</mjx-c>"));
    }

    #[test]
    fn svg_uses_rects_and_text_fallback() {
        let tree = boxes(r"\frac{a}{b}");
        let out = render(&tree, OutputTarget::Svg);
        let all = tags(&out.root);
        assert_eq!(all[0], "svg");
        assert!(all.contains(&"rect".to_owned()));
        assert!(all.contains(&"text".to_owned()));
        let markup = out.to_markup();
        assert!(markup.contains("transform=\"scale(1,-1)\""));
        assert!(markup.contains("data-mml-node=\"mfrac\""));
    }

    #[test]
    fn svg_defines_each_outline_once() {
        let tree = boxes("-x-y");
        let out = render(&tree, OutputTarget::Svg);
        let markup = out.to_markup();
        assert_eq!(markup.matches("<path id=\"MJX-normal-2212\"").count(), 1);
        assert_eq!(markup.matches("href=\"#MJX-normal-2212\"").count(), 2);
    }

    #[test]
    fn targets_share_root_extent() {
        let tree = boxes(r"\sqrt{\frac{1}{x}}+\left(y\right)");
        let chtml = render(&tree, OutputTarget::Chtml);
        let svg = render(&tree, OutputTarget::Svg);
        assert_eq!(
            (chtml.width, chtml.height, chtml.depth),
            (svg.width, svg.height, svg.depth)
        );
        assert_eq!(chtml.width, tree.root.width);
    }
}
