//! Vector output: glyph outlines placed with `<use>` inside an `<svg>`.
//!
//! Coordinates are thousandths of an em with y pointing up; the outer group
//! flips the axis. Each outline is defined once in `<defs>` and referenced
//! by id. Glyphs without an outline fall back to a `<text>` element.

use crate::layout::{BoxNode, BoxTree, GlyphRun, PlacedGlyph};
use crate::namespace::KeySet;
use crate::render::Serializer;
use crate::render::output::{Element, TreeBuilder, fixed, make_em, units};

/// Serializer for [`OutputTarget::Svg`](crate::types::OutputTarget::Svg).
#[derive(Debug)]
pub(crate) struct Svg {
    builder: TreeBuilder,
    defs: Element,
    defined: KeySet<String>,
}

fn glyph_id(glyph: &PlacedGlyph) -> String {
    format!("MJX-{}-{:X}", glyph.variant, glyph.code)
}

/// Font outlines leave out the initial move and the final close.
fn path_data(outline: &str) -> String {
    let mut d = String::with_capacity(outline.len() + 2);
    if !outline.starts_with('M') {
        d.push('M');
    }
    d.push_str(outline);
    if !outline.ends_with('Z') {
        d.push('Z');
    }
    d
}

fn transform(glyph: &PlacedGlyph, flip: bool) -> String {
    let sy = if flip { -glyph.scale_y } else { glyph.scale_y };
    format!(
        "translate({},{}) scale({},{})",
        units(glyph.x),
        units(glyph.y),
        fixed(glyph.scale_x, 3),
        fixed(sy, 3)
    )
}

impl Svg {
    pub(crate) fn new(tree: &BoxTree) -> Self {
        let root = &tree.root;
        let view_box = format!(
            "0 {} {} {}",
            units(-root.height),
            units(root.width),
            units(root.extent())
        );
        let svg = Element::new("svg")
            .attr("xmlns", "http://www.w3.org/2000/svg")
            .attr("width", make_em(root.width))
            .attr("height", make_em(root.extent()))
            .attr("viewBox", view_box)
            .attr("role", "img")
            .attr("focusable", "false")
            .style("vertical-align", make_em(-root.depth));
        let mut builder = TreeBuilder::default();
        builder.open(svg);
        Self {
            builder,
            defs: Element::new("defs"),
            defined: KeySet::default(),
        }
    }
}

impl Serializer for Svg {
    fn open(&mut self, node: &BoxNode, parent_height: Option<f64>) {
        let group = match parent_height {
            None => Element::new("g")
                .attr("stroke", "currentColor")
                .attr("fill", "currentColor")
                .attr("stroke-width", "0")
                .attr("transform", "scale(1,-1)"),
            Some(_) => Element::new("g")
                .attr("data-mml-node", node.kind.as_ref())
                .attr(
                    "transform",
                    format!("translate({},{})", units(node.x), units(node.shift)),
                ),
        };
        self.builder.open(group);
    }

    fn glyphs(&mut self, _node: &BoxNode, run: &GlyphRun) {
        if let Some(color) = &run.color {
            self.builder.open(
                Element::new("g")
                    .attr("fill", color.clone())
                    .attr("stroke", color.clone()),
            );
        }
        for glyph in &run.glyphs {
            let Some(path) = &glyph.path else {
                let mut text = Element::new("text")
                    .attr("data-variant", glyph.variant.clone())
                    .attr("transform", transform(glyph, true))
                    .attr("font-size", "1000px");
                text.push(glyph.character().to_string());
                self.builder.append(text);
                continue;
            };
            let id = glyph_id(glyph);
            if self.defined.insert(id.clone()) {
                self.defs
                    .push(Element::empty("path").attr("id", id.clone()).attr("d", path_data(path)));
            }
            self.builder.append(
                Element::empty("use")
                    .attr("href", format!("#{id}"))
                    .attr("transform", transform(glyph, false)),
            );
        }
        if run.color.is_some() {
            self.builder.close();
        }
    }

    fn rule(&mut self, node: &BoxNode) {
        self.builder.append(
            Element::empty("rect")
                .attr("width", units(node.width))
                .attr("height", units(node.extent()))
                .attr("x", "0")
                .attr("y", units(-node.depth)),
        );
    }

    fn close(&mut self, _node: &BoxNode) {
        self.builder.close();
    }

    fn finish(self) -> Element {
        let mut svg = self.builder.finish();
        if !self.defs.children.is_empty() {
            svg.children.insert(0, self.defs.into());
        }
        svg
    }
}
