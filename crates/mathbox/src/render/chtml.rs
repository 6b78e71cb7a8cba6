//! Box output: nested, explicitly sized `mjx-*` elements.
//!
//! Each box becomes an element positioned inside its parent with `left` and
//! `top` and sized with `width` and `height` (height plus depth). Glyphs are
//! `mjx-c` elements whose `top` is the baseline offset within their box.

use phf::{Map, phf_map};

use crate::layout::{BoxNode, BoxTree, GlyphRun, GlyphSizing};
use crate::render::output::{Element, TreeBuilder, fixed, make_em};
use crate::render::Serializer;

/// Font class of each built-in variant.
static VARIANT_CLASSES: Map<&'static str, &'static str> = phf_map! {
    "normal" => "",
    "italic" => "TEX-I",
    "bold" => "TEX-B",
    "bold-italic" => "TEX-BI",
    "smallop" => "TEX-S1",
    "largeop" => "TEX-S2",
    "size3" => "TEX-S3",
    "size4" => "TEX-S4",
};

fn variant_class(variant: &str) -> String {
    VARIANT_CLASSES
        .get(variant)
        .map_or_else(|| format!("TEX-{variant}"), |class| (*class).to_owned())
}

/// Explicit width, and padding reserving the glyph's height, depth and
/// italic correction, as the glyph's sizing class asks. `sx` and `sy` are the
/// stretch factors applied by the glyph's transform.
fn sized(mut c: Element, sizing: &GlyphSizing, sx: f64, sy: f64) -> Element {
    if sizing.class.has_width() {
        c = c.style("width", make_em(sizing.width * sx));
    }
    if sizing.class.has_padding() {
        let padding = format!(
            "{} {} {} 0",
            make_em(sizing.height * sy),
            make_em(sizing.italic * sx),
            make_em(sizing.depth * sy)
        );
        c = c.style("padding", padding);
    }
    c
}

/// Serializer for [`OutputTarget::Chtml`](crate::types::OutputTarget::Chtml).
#[derive(Debug, Default)]
pub(crate) struct Chtml {
    builder: TreeBuilder,
}

impl Chtml {
    pub(crate) fn new(tree: &BoxTree) -> Self {
        let mut container = Element::new("mjx-container")
            .class("MathJax")
            .attr("jax", "CHTML");
        if tree.display {
            container = container.attr("display", "true");
        }
        let mut builder = TreeBuilder::default();
        builder.open(container);
        Self { builder }
    }
}

impl Serializer for Chtml {
    fn open(&mut self, node: &BoxNode, parent_height: Option<f64>) {
        let element = match parent_height {
            None => Element::new("mjx-math")
                .class("MJX-TEX")
                .style("width", make_em(node.width))
                .style("height", make_em(node.extent()))
                .style("vertical-align", make_em(-node.depth)),
            Some(parent_height) => Element::new(format!("mjx-{}", node.kind))
                .style("left", make_em(node.x))
                .style("top", make_em(parent_height - node.shift - node.height))
                .style("width", make_em(node.width))
                .style("height", make_em(node.extent())),
        };
        self.builder.open(element);
    }

    fn glyphs(&mut self, node: &BoxNode, run: &GlyphRun) {
        let size = run.scale;
        for glyph in &run.glyphs {
            let mut c = Element::new("mjx-c")
                .class(format!("mjx-c{:X}", glyph.code))
                .style("left", make_em(glyph.x))
                .style("top", make_em(node.height - glyph.y))
                .style("font-size", format!("{}%", fixed(size * 100.0, 1)));
            let class = variant_class(&glyph.variant);
            if !class.is_empty() {
                c = c.class(class);
            }
            let (sx, sy) = (glyph.scale_x / size, glyph.scale_y / size);
            if (sx - 1.0).abs() > 1e-6 || (sy - 1.0).abs() > 1e-6 {
                c = c.style("transform", format!("scale({},{})", fixed(sx, 3), fixed(sy, 3)));
            }
            if let Some(sizing) = &glyph.sizing {
                c = sized(c, sizing, sx, sy);
            }
            if let Some(color) = &run.color {
                c = c.style("color", color.clone());
            }
            c.push(glyph.character().to_string());
            self.builder.append(c);
        }
    }

    fn rule(&mut self, node: &BoxNode) {
        self.builder.append(
            Element::new("mjx-rule")
                .style("width", make_em(node.width))
                .style("height", make_em(node.extent()))
                .style("background-color", "currentColor"),
        );
    }

    fn close(&mut self, _node: &BoxNode) {
        self.builder.close();
    }

    fn finish(self) -> Element {
        self.builder.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::SizingClass;

    #[test]
    fn variant_classes() {
        assert_eq!(variant_class("italic"), "TEX-I");
        assert_eq!(variant_class("normal"), "");
        assert_eq!(variant_class("double-struck"), "TEX-double-struck");
    }

    #[test]
    fn sizing_class_sets_width_and_padding() {
        let sizing = GlyphSizing {
            class: SizingClass(3),
            width: 0.597,
            height: 1.15,
            depth: 0.649,
            italic: 0.0,
        };
        let c = markup(&sized(Element::new("mjx-c"), &sizing, 1.0, 1.0));
        assert!(c.contains("width:0.597em;"), "{c}");
        assert!(c.contains("padding:1.15em 0em 0.649em 0;"), "{c}");

        let width_only = GlyphSizing {
            class: SizingClass(SizingClass::WIDTH),
            ..sizing
        };
        let c = markup(&sized(Element::new("mjx-c"), &width_only, 2.0, 1.0));
        assert!(c.contains("width:1.194em;"), "{c}");
        assert!(!c.contains("padding"), "{c}");
    }

    fn markup(element: &Element) -> String {
        let mut out = String::new();
        element.write_markup(&mut out).unwrap();
        out
    }
}
