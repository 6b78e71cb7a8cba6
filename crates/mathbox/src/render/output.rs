//! Markup tree produced by the serializers and its string form.

use core::fmt;

use crate::types::OutputTarget;

/// A node of the output tree.
#[derive(Debug, Clone, PartialEq)]
pub enum OutputNode {
    /// Element with attributes and children.
    Element(Element),
    /// Character data, escaped on output.
    Text(String),
}

impl OutputNode {
    /// Writes the node as markup.
    pub fn write_markup<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        match self {
            Self::Element(element) => element.write_markup(out),
            Self::Text(text) => escape_into(out, text),
        }
    }
}

/// An element of the output tree.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Element {
    /// Tag name.
    pub tag: String,
    /// Class names, written space separated.
    pub classes: Vec<String>,
    /// Attributes in output order.
    pub attributes: Vec<(&'static str, String)>,
    /// Inline style declarations in output order.
    pub style: Vec<(&'static str, String)>,
    /// Child nodes.
    pub children: Vec<OutputNode>,
    /// Written as `<tag/>` when childless.
    pub self_closing: bool,
}

impl Element {
    /// An empty element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// An element written as `<tag/>` when it has no children.
    #[must_use]
    pub fn empty(tag: impl Into<String>) -> Self {
        Self {
            self_closing: true,
            ..Self::new(tag)
        }
    }

    /// Adds a class name.
    #[must_use]
    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.attributes.push((name, value.into()));
        self
    }

    /// Adds a style declaration.
    #[must_use]
    pub fn style(mut self, property: &'static str, value: impl Into<String>) -> Self {
        self.style.push((property, value.into()));
        self
    }

    /// Appends a child.
    pub fn push(&mut self, child: impl Into<OutputNode>) {
        self.children.push(child.into());
    }

    /// Value of attribute `name`.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Pre-order traversal of this element and its descendant elements.
    pub fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Self)) {
        f(self);
        for child in &self.children {
            if let OutputNode::Element(element) = child {
                element.visit(f);
            }
        }
    }

    /// Writes the element as markup.
    pub fn write_markup<W: fmt::Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        write!(out, "<{}", self.tag)?;
        if !self.classes.is_empty() {
            out.write_str(" class=\"")?;
            escape_into(out, &self.classes.join(" "))?;
            out.write_char('"')?;
        }
        for (name, value) in &self.attributes {
            write!(out, " {name}=\"")?;
            escape_into(out, value)?;
            out.write_char('"')?;
        }
        if !self.style.is_empty() {
            out.write_str(" style=\"")?;
            for (property, value) in &self.style {
                write!(out, "{property}:")?;
                escape_into(out, value)?;
                out.write_char(';')?;
            }
            out.write_char('"')?;
        }
        if self.self_closing && self.children.is_empty() {
            return out.write_str("/>");
        }
        out.write_char('>')?;
        for child in &self.children {
            child.write_markup(out)?;
        }
        write!(out, "</{}>", self.tag)
    }
}

impl From<Element> for OutputNode {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<String> for OutputNode {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// Serialized expression with the extent of its root box.
///
/// The extent comes from layout and is the same for every target.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputTree {
    /// Target the tree was serialized for.
    pub target: OutputTarget,
    /// Root width in ems.
    pub width: f64,
    /// Root height above the baseline in ems.
    pub height: f64,
    /// Root depth below the baseline in ems.
    pub depth: f64,
    /// Outermost element.
    pub root: Element,
}

impl OutputTree {
    /// The tree as a markup string.
    #[must_use]
    pub fn to_markup(&self) -> String {
        let mut markup = String::new();
        // Writing into a String cannot fail.
        let _ = self.root.write_markup(&mut markup);
        markup
    }
}

impl fmt::Display for OutputTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.root.write_markup(f)
    }
}

/// Builds a nested element tree from open/close calls.
#[derive(Debug, Default)]
pub(crate) struct TreeBuilder {
    stack: Vec<Element>,
    root: Option<Element>,
}

impl TreeBuilder {
    /// Starts `element` as a child of the innermost open element.
    pub(crate) fn open(&mut self, element: Element) {
        self.stack.push(element);
    }

    /// Appends `node` to the innermost open element.
    pub(crate) fn append(&mut self, node: impl Into<OutputNode>) {
        if let Some(top) = self.stack.last_mut() {
            top.push(node);
        }
    }

    /// Finishes the innermost open element.
    pub(crate) fn close(&mut self) {
        let Some(done) = self.stack.pop() else {
            return;
        };
        match self.stack.last_mut() {
            Some(parent) => parent.push(done),
            None => self.root = Some(done),
        }
    }

    /// The finished root element.
    pub(crate) fn finish(mut self) -> Element {
        while self.stack.len() > 1 {
            self.close();
        }
        self.close();
        self.root.unwrap_or_default()
    }
}

/// Writes `text` with `& < > " '` escaped.
pub fn escape_into<W: fmt::Write + ?Sized>(writer: &mut W, text: &str) -> fmt::Result {
    let mut last = 0;
    for (idx, ch) in text.char_indices() {
        let replacement = match ch {
            '&' => "&amp;",
            '>' => "&gt;",
            '<' => "&lt;",
            '"' => "&quot;",
            '\'' => "&#x27;",
            _ => continue,
        };
        writer.write_str(&text[last..idx])?;
        writer.write_str(replacement)?;
        last = idx + ch.len_utf8();
    }
    writer.write_str(&text[last..])
}

/// `n` with at most `decimals` fraction digits, trailing zeros dropped and
/// negative zero printed as `0`.
#[must_use]
pub fn fixed(n: f64, decimals: usize) -> String {
    let mut s = format!("{n:.decimals$}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" || s.is_empty() {
        s = "0".to_owned();
    }
    s
}

/// A length in ems for style attributes, e.g. `0.5em`.
#[must_use]
pub fn make_em(n: f64) -> String {
    let mut s = fixed(n, 3);
    s.push_str("em");
    s
}

/// A length in thousandths of an em for SVG coordinates.
#[must_use]
pub fn units(n: f64) -> String {
    fixed(n * 1000.0, 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        let mut out = String::new();
        escape_into(&mut out, "a<b & \"c\" 'd'>").unwrap();
        assert_eq!(out, "a&lt;b &amp; &quot;c&quot; &#x27;d&#x27;&gt;");
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(make_em(0.5), "0.5em");
        assert_eq!(make_em(-0.000_1), "0em");
        assert_eq!(make_em(2.0), "2em");
        assert_eq!(units(0.25), "250");
        assert_eq!(units(-0.012_34), "-12.3");
    }

    #[test]
    fn elements_serialize_in_order() {
        let mut outer = Element::new("mjx-mrow")
            .class("a")
            .attr("data-x", "1<2")
            .style("width", "1em");
        outer.push(Element::empty("use").attr("href", "#g"));
        outer.push("x & y".to_owned());
        let tree = OutputTree {
            target: OutputTarget::Chtml,
            width: 1.0,
            height: 0.0,
            depth: 0.0,
            root: outer,
        };
        assert_eq!(
            tree.to_markup(),
            "<mjx-mrow class=\"a\" data-x=\"1&lt;2\" style=\"width:1em;\"><use href=\"#g\"/>x &amp; y</mjx-mrow>"
        );
        assert_eq!(tree.to_string(), tree.to_markup());
    }

    #[test]
    fn builder_nests_elements() {
        let mut builder = TreeBuilder::default();
        builder.open(Element::new("a"));
        builder.open(Element::new("b"));
        builder.append("t".to_owned());
        builder.close();
        builder.open(Element::new("c"));
        let root = builder.finish();
        let mut tags = Vec::new();
        root.visit(&mut |e| tags.push(e.tag.clone()));
        assert_eq!(tags, ["a", "b", "c"]);
    }
}
