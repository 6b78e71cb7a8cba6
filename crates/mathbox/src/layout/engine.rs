//! Bottom-up layout of an expression tree into boxes.
//!
//! The walk is a pure function of the tree, the font tables and the
//! settings. A glyph lookup that reaches a deferred font variant which has
//! not been provided yet aborts the walk with the missing dependency; the
//! caller retries the whole walk once it is ready.

use tracing::{debug, trace};

use crate::config::ColumnAlign;
use crate::font::{Assembly, Axis, FontCharRecord, FontTables, MathParams};
use crate::layout::box_tree::{
    BoxContent, BoxKind, BoxNode, BoxTree, GlyphRun, GlyphSizing, PlacedGlyph,
};
use crate::layout::spacing::{demote_binaries, glue};
use crate::layout::style::{DISPLAY, SCRIPTSCRIPT, Style, TEXT};
use crate::parser::{ExpressionTree, MathVariant, Node, TexClass};
use crate::retry::{Attempt, Dependency};
use crate::types::{Diagnostic, Settings, SourceSpan};

type Laid = Result<BoxNode, Dependency>;

/// Strut of a table row, as fractions of the baseline skip.
const STRUT_HEIGHT: f64 = 0.7 * 1.2;
const STRUT_DEPTH: f64 = 0.3 * 1.2;
/// Space between table columns.
const COLUMN_GAP: f64 = 1.0;

/// Lays `tree` out with `fonts`.
///
/// Inline math starts in text style, block math in display style. The
/// result carries the parser's diagnostics followed by any raised while
/// looking up glyphs.
pub fn layout(tree: &ExpressionTree, fonts: &FontTables, settings: &Settings) -> Attempt<BoxTree> {
    let mut engine = Engine {
        fonts,
        settings,
        params: fonts.params(),
        diagnostics: Vec::new(),
    };
    let env = Env {
        style: if settings.display_mode { DISPLAY } else { TEXT },
        variant: None,
        stretch: None,
    };
    match engine.node(&tree.root, env) {
        Ok(body) => {
            let root = BoxNode::hbox(BoxKind::Math, vec![body]);
            debug!(
                width = root.width,
                height = root.height,
                depth = root.depth,
                glyph_errors = engine.diagnostics.len(),
                "laid out expression"
            );
            let mut diagnostics = tree.diagnostics.clone();
            diagnostics.append(&mut engine.diagnostics);
            Attempt::Ready(BoxTree {
                root,
                display: settings.display_mode,
                diagnostics,
            })
        }
        Err(dependency) => {
            debug!(dependency = %dependency, "layout waiting on dependency");
            Attempt::Pending(dependency)
        }
    }
}

/// Inherited layout state.
#[derive(Debug, Clone, Copy)]
struct Env {
    style: &'static Style,
    variant: Option<MathVariant>,
    /// Target size of `\middle` delimiters inside the current `\left...\right`.
    stretch: Option<f64>,
}

impl Env {
    const fn with_style(self, style: &'static Style) -> Self {
        Self {
            style,
            variant: self.variant,
            stretch: None,
        }
    }
}

struct FoundGlyph {
    record: FontCharRecord,
    variant: String,
}

struct Engine<'a> {
    fonts: &'a FontTables,
    settings: &'a Settings,
    params: &'a MathParams,
    diagnostics: Vec<Diagnostic>,
}

impl Engine<'_> {
    fn scale(&self, env: Env) -> f64 {
        env.style.scale(self.settings)
    }

    fn node(&mut self, node: &Node, env: Env) -> Laid {
        let span = node.attrs().span.as_ref();
        match node {
            Node::Row { children, .. } => self.row(children, env),
            Node::Identifier { attrs, text } => {
                let variant = attrs
                    .variant
                    .or(env.variant)
                    .unwrap_or_else(|| MathVariant::for_identifier(text));
                self.text_run(BoxKind::Mi, text, variant.font_name(), env, span, None)
            }
            Node::Number { attrs, text } => {
                let variant = attrs.variant.or(env.variant).unwrap_or(MathVariant::Normal);
                self.text_run(BoxKind::Mn, text, variant.font_name(), env, span, None)
            }
            Node::Operator {
                attrs,
                text,
                large,
                stretchy,
            } => {
                if *stretchy && let Some(target) = env.stretch {
                    return self.fence(text, target, env, span);
                }
                if *large {
                    return self.large_operator(text, env, span);
                }
                let variant = attrs.variant.or(env.variant).unwrap_or(MathVariant::Normal);
                self.text_run(BoxKind::Mo, text, variant.font_name(), env, span, None)
            }
            Node::Text { text, .. } => self.text_run(BoxKind::Mtext, text, "normal", env, span, None),
            Node::Fraction {
                numerator,
                denominator,
                bar,
                ..
            } => self.fraction(numerator, denominator, *bar, env),
            Node::Radical { body, index, .. } => self.radical(body, index.as_deref(), env, span),
            Node::Scripts { base, sub, sup, .. } => {
                let base = self.node(base, env)?;
                self.scripts(base, sub.as_deref(), sup.as_deref(), env)
            }
            Node::UnderOver {
                base,
                under,
                over,
                movable,
                ..
            } => {
                let laid = self.node(base, env)?;
                if *movable && !env.style.is_display() {
                    self.scripts(laid, under.as_deref(), over.as_deref(), env)
                } else {
                    self.limits(laid, under.as_deref(), over.as_deref(), env)
                }
            }
            Node::Space { width, .. } => Ok(BoxNode::kern(width * self.scale(env))),
            Node::Delimited {
                open, close, body, ..
            } => self.delimited(open, close, body, env),
            Node::Accent {
                base,
                accent,
                stretchy,
                ..
            } => self.accent(base, accent, *stretchy, env, span),
            Node::Table { attrs, rows, columns } => {
                let style = env.style.with_display(attrs.display.unwrap_or(false));
                self.table(rows, columns, env.with_style(style))
            }
            Node::Styled { attrs, body } => {
                let mut inner = env;
                if let Some(display) = attrs.display {
                    inner = inner.with_style(env.style.with_display(display));
                    inner.stretch = env.stretch;
                }
                if let Some(variant) = attrs.variant {
                    inner.variant = Some(variant);
                }
                let body = self.node(body, inner)?;
                Ok(BoxNode::hbox(BoxKind::Mstyle, vec![body]))
            }
            Node::Phantom { body, .. } => {
                let body = self.node(body, env)?;
                Ok(BoxNode::new(
                    BoxKind::Mphantom,
                    body.width,
                    body.height,
                    body.depth,
                    BoxContent::Kern,
                ))
            }
            Node::Error {
                source, literal, ..
            } => {
                if *literal {
                    self.text_run(BoxKind::Mtext, source, "normal", env, span, None)
                } else {
                    let color = self.settings.error_color.clone();
                    self.text_run(BoxKind::Merror, source, "normal", env, span, Some(color))
                }
            }
        }
    }

    fn glyph(&mut self, variant: &str, code: u32, span: Option<&SourceSpan>) -> Result<FoundGlyph, Dependency> {
        let (fonts, settings) = (self.fonts, self.settings);
        let glyph = fonts.lookup(variant, code, &settings.missing_glyph).into_result()?;
        if let Some(missing) = glyph.missing {
            self.diagnostics.push(Diagnostic::at(*missing.kind, span.cloned()));
        }
        Ok(FoundGlyph {
            record: glyph.record.clone(),
            variant: glyph.variant.to_owned(),
        })
    }

    fn placed(found: &FoundGlyph, code: u32, x: f64, y: f64, scale_x: f64, scale_y: f64) -> PlacedGlyph {
        let record = &found.record;
        PlacedGlyph {
            code,
            variant: found.variant.clone(),
            x,
            y,
            scale_x,
            scale_y,
            path: record.path.clone(),
            sizing: record.sizing.map(|class| GlyphSizing {
                class,
                width: record.width,
                height: record.height,
                depth: record.depth,
                italic: record.italic.unwrap_or(0.0),
            }),
        }
    }

    /// Glyphs of `text` set side by side in `variant`. Identifiers include
    /// the italic correction of their last glyph.
    fn text_run(
        &mut self,
        kind: BoxKind,
        text: &str,
        variant: &str,
        env: Env,
        span: Option<&SourceSpan>,
        color: Option<String>,
    ) -> Laid {
        let scale = self.scale(env);
        let mut glyphs = Vec::with_capacity(text.len());
        let (mut x, mut height, mut depth, mut italic) = (0.0, 0.0_f64, 0.0_f64, 0.0);
        for ch in text.chars() {
            let code = u32::from(ch);
            let found = self.glyph(variant, code, span)?;
            glyphs.push(Self::placed(&found, code, x, 0.0, scale, scale));
            x += found.record.width * scale;
            height = height.max(found.record.height * scale);
            depth = depth.max(found.record.depth * scale);
            italic = found.record.italic.unwrap_or(0.0) * scale;
        }
        if kind == BoxKind::Mi {
            x += italic;
        }
        let run = GlyphRun {
            text: text.to_owned(),
            scale,
            glyphs,
            color,
        };
        Ok(BoxNode::new(kind, x, height, depth, BoxContent::Text(run)))
    }

    /// Concatenates `children` with inter-atom glue.
    fn row(&mut self, children: &[Node], env: Env) -> Laid {
        let mut laid = Vec::with_capacity(children.len());
        for child in children {
            let class = match child {
                Node::Space { .. } => None,
                _ => Some(child.class()),
            };
            laid.push((self.node(child, env)?, class));
        }
        let mut classes: Vec<TexClass> = laid.iter().filter_map(|(_, class)| *class).collect();
        demote_binaries(&mut classes);

        let mu = self.scale(env) / 18.0;
        let tight = env.style.is_tight();
        let mut atoms = classes.into_iter();
        let mut previous: Option<TexClass> = None;
        let mut boxes = Vec::with_capacity(laid.len() * 2);
        for (node, class) in laid {
            if class.is_some() {
                let current = atoms.next().unwrap_or_default();
                if let Some(previous) = previous {
                    let space = glue(previous, current, tight);
                    if space != 0.0 {
                        boxes.push(BoxNode::kern(space * mu));
                    }
                }
                previous = Some(current);
            }
            boxes.push(node);
        }
        Ok(BoxNode::hbox(BoxKind::Mrow, boxes))
    }

    fn fraction(&mut self, numerator: &Node, denominator: &Node, bar: bool, env: Env) -> Laid {
        let num = self.node(numerator, env.with_style(env.style.frac_num()))?;
        let den = self.node(denominator, env.with_style(env.style.frac_den()))?;
        let p = self.params;
        let fs = self.scale(env);
        let display = env.style.is_display();
        let rule = if bar { p.rule_thickness * fs } else { 0.0 };
        let axis = p.axis_height * fs;

        let (mut up, mut down) = if display {
            (p.num1, p.denom1)
        } else if bar {
            (p.num2, p.denom2)
        } else {
            (p.num3, p.denom2)
        };
        up *= fs;
        down *= fs;

        if bar {
            let clearance = if display { 3.0 * rule } else { rule };
            let above = (up - num.depth) - (axis + rule / 2.0);
            if above < clearance {
                up += clearance - above;
            }
            let below = (axis - rule / 2.0) - (den.height - down);
            if below < clearance {
                down += clearance - below;
            }
        } else {
            let clearance = (if display { 7.0 } else { 3.0 }) * p.rule_thickness * fs;
            let gap = (up - num.depth) - (den.height - down);
            if gap < clearance {
                up += (clearance - gap) / 2.0;
                down += (clearance - gap) / 2.0;
            }
        }

        let pad = p.nulldelimiterspace * fs;
        let width = num.width.max(den.width);
        let num_x = pad + (width - num.width) / 2.0;
        let den_x = pad + (width - den.width) / 2.0;
        let mut children = vec![num.at(num_x, up)];
        if bar {
            children.push(BoxNode::rule(width, rule, 0.0).at(pad, axis - rule / 2.0));
        }
        children.push(den.at(den_x, -down));
        Ok(BoxNode::wrap(BoxKind::Mfrac, width + 2.0 * pad, children))
    }

    fn radical(&mut self, body: &Node, index: Option<&Node>, env: Env, span: Option<&SourceSpan>) -> Laid {
        let inner = self.node(body, env.with_style(env.style.cramp()))?;
        let p = self.params;
        let fs = self.scale(env);
        let rule = p.rule_thickness * fs;
        let phi = if env.style.is_display() { p.x_height * fs } else { rule };
        let mut clearance = rule + phi / 4.0;

        let target = inner.extent() + clearance + rule;
        let surd = self.delimiter_box(0x221A, target, env, span)?;
        let excess = surd.extent() - target;
        if excess > 0.0 {
            clearance += excess / 2.0;
        }
        let top = inner.height + clearance + rule;
        let surd_shift = top - surd.height;
        let surd_width = surd.width;
        let radicand_width = inner.width;
        let root = BoxNode::wrap(
            BoxKind::Msqrt,
            surd_width + radicand_width,
            vec![
                surd.at(0.0, surd_shift),
                BoxNode::rule(radicand_width, rule, 0.0).at(surd_width, top - rule),
                inner.at(surd_width, 0.0),
            ],
        );
        let Some(index) = index else {
            return Ok(root);
        };

        let index = self.node(index, env.with_style(SCRIPTSCRIPT))?;
        let mu = fs / 18.0;
        let raise = 0.6 * (root.height - root.depth);
        let lead = 5.0 * mu;
        let offset = (lead + index.width - 10.0 * mu).max(0.0);
        let index_width = index.width;
        let width = offset.max(lead + index_width) + root.width;
        Ok(BoxNode::wrap(
            BoxKind::Mroot,
            width,
            vec![index.at(lead, raise), root.at(offset, 0.0)],
        ))
    }

    fn scripts(&mut self, base: BoxNode, sub: Option<&Node>, sup: Option<&Node>, env: Env) -> Laid {
        let p = self.params;
        let fs = self.scale(env);
        let sup_env = env.with_style(env.style.sup());
        let sub_env = env.with_style(env.style.sub());
        let is_glyph = matches!(base.content, BoxContent::Text(_));
        let (mut up, mut down) = if is_glyph {
            (0.0, 0.0)
        } else {
            (
                base.height - p.sup_drop * self.scale(sup_env),
                base.depth + p.sub_drop * self.scale(sub_env),
            )
        };
        let sup = sup.map(|n| self.node(n, sup_env)).transpose()?;
        let sub = sub.map(|n| self.node(n, sub_env)).transpose()?;

        if let Some(sup) = &sup {
            let min = fs
                * if env.style.is_display() {
                    p.sup1
                } else if env.style.cramped {
                    p.sup3
                } else {
                    p.sup2
                };
            up = up.max(min).max(sup.depth + p.x_height * fs / 4.0);
        }
        match (&sup, &sub) {
            (None, Some(sub)) => {
                down = down.max(p.sub1 * fs).max(sub.height - 0.8 * p.x_height * fs);
            }
            (Some(sup), Some(sub)) => {
                down = down.max(p.sub2 * fs);
                let clearance = 4.0 * p.rule_thickness * fs;
                let gap = (up - sup.depth) - (sub.height - down);
                if gap < clearance {
                    down += clearance - gap;
                    let psi = 0.8 * p.x_height * fs - (up - sup.depth);
                    if psi > 0.0 {
                        up += psi;
                        down -= psi;
                    }
                }
            }
            _ => {}
        }

        let x = base.width;
        let scripts_width = sup
            .as_ref()
            .map_or(0.0, |b| b.width)
            .max(sub.as_ref().map_or(0.0, |b| b.width));
        let width = x + scripts_width + p.scriptspace * fs;
        let mut children = vec![base];
        children.extend(sup.map(|b| b.at(x, up)));
        children.extend(sub.map(|b| b.at(x, -down)));
        Ok(BoxNode::wrap(BoxKind::Msubsup, width, children))
    }

    fn limits(&mut self, base: BoxNode, under: Option<&Node>, over: Option<&Node>, env: Env) -> Laid {
        let p = self.params;
        let fs = self.scale(env);
        let over = over.map(|n| self.node(n, env.with_style(env.style.sup()))).transpose()?;
        let under = under.map(|n| self.node(n, env.with_style(env.style.sub()))).transpose()?;
        let width = [Some(&base), over.as_ref(), under.as_ref()]
            .into_iter()
            .flatten()
            .map(|b| b.width)
            .fold(0.0, f64::max);
        let center = |b: &BoxNode| (width - b.width) / 2.0;

        let (base_height, base_depth) = (base.height, base.depth);
        let mut extra_height = 0.0;
        let mut extra_depth = 0.0;
        let mut children = Vec::with_capacity(3);
        if let Some(over) = over {
            let gap = (p.big_op_spacing1 * fs).max(p.big_op_spacing3 * fs - over.depth);
            let shift = base_height + gap + over.depth;
            extra_height = p.big_op_spacing5 * fs;
            let x = center(&over);
            children.push(over.at(x, shift));
        }
        let base_x = center(&base);
        children.push(base.at(base_x, 0.0));
        if let Some(under) = under {
            let gap = (p.big_op_spacing2 * fs).max(p.big_op_spacing4 * fs - under.height);
            let shift = base_depth + gap + under.height;
            extra_depth = p.big_op_spacing5 * fs;
            let x = center(&under);
            children.push(under.at(x, -shift));
        }
        let mut boxed = BoxNode::wrap(BoxKind::Munderover, width, children);
        boxed.height += extra_height;
        boxed.depth += extra_depth;
        Ok(boxed)
    }

    /// A large operator: the `largeop` glyph in display style, `smallop`
    /// otherwise, centred on the math axis.
    fn large_operator(&mut self, text: &str, env: Env, span: Option<&SourceSpan>) -> Laid {
        let Some(ch) = text.chars().next() else {
            return Ok(BoxNode::kern(0.0));
        };
        let code = u32::from(ch);
        let (fonts, settings) = (self.fonts, self.settings);
        let glyph = fonts
            .large_operator_lookup(code, env.style.is_display(), &settings.missing_glyph)
            .into_result()?;
        if let Some(missing) = glyph.missing {
            self.diagnostics.push(Diagnostic::at(*missing.kind, span.cloned()));
        }
        let found = FoundGlyph {
            record: glyph.record.clone(),
            variant: glyph.variant.to_owned(),
        };
        let fs = self.scale(env);
        let record = &found.record;
        let (width, height, depth) = (record.width * fs, record.height * fs, record.depth * fs);
        let run = GlyphRun {
            text: text.to_owned(),
            scale: fs,
            glyphs: vec![Self::placed(&found, code, 0.0, 0.0, fs, fs)],
            color: None,
        };
        let glyph = BoxNode::new(BoxKind::Mo, width, height, depth, BoxContent::Text(run));
        let shift = self.params.axis_height * fs - (height - depth) / 2.0;
        Ok(BoxNode::wrap(BoxKind::Mo, width, vec![glyph.at(0.0, shift)]))
    }

    fn delimited(&mut self, open: &str, close: &str, body: &Node, env: Env) -> Laid {
        let mut inner_env = env;
        inner_env.stretch = None;
        let mut inner = self.node(body, inner_env)?;
        let fs = self.scale(env);
        let p = self.params;
        let axis = p.axis_height * fs;
        let delta = (inner.height - axis).max(inner.depth + axis);
        let target = (delta * p.delimiter_factor / 500.0).max(2.0 * delta - p.delimiter_shortfall * fs);

        if has_middle(body) {
            trace!(target, "relaying delimited body with middle delimiters");
            inner_env.stretch = Some(target);
            inner = self.node(body, inner_env)?;
        }
        let span = body.attrs().span.as_ref();
        let open = self.fence(open, target, env, span)?;
        let close = self.fence(close, target, env, span)?;
        Ok(BoxNode::hbox(BoxKind::Mrow, vec![open, inner, close]))
    }

    /// A delimiter of at least `target` total size centred on the axis; `.`
    /// is an empty null delimiter.
    fn fence(&mut self, text: &str, target: f64, env: Env, span: Option<&SourceSpan>) -> Laid {
        let fs = self.scale(env);
        let Some(ch) = text.chars().next().filter(|_| text != ".") else {
            return Ok(BoxNode::kern(self.params.nulldelimiterspace * fs));
        };
        let delimiter = self.delimiter_box(u32::from(ch), target, env, span)?;
        let shift = self.params.axis_height * fs - (delimiter.height - delimiter.depth) / 2.0;
        Ok(BoxNode::wrap(BoxKind::Mo, delimiter.width, vec![delimiter.at(0.0, shift)]))
    }

    /// `code` sized to cover `target`: the first size variant that is large
    /// enough, else an assembly, else the largest size variant.
    fn delimiter_box(&mut self, code: u32, target: f64, env: Env, span: Option<&SourceSpan>) -> Laid {
        let fs = self.scale(env);
        let fonts = self.fonts;
        let mut largest = None;
        for (variant, record) in fonts.size_variants(code) {
            if record.extent() * fs >= target {
                return Ok(self.sized_glyph(code, variant, record, fs));
            }
            largest = Some((variant, record));
        }
        if fonts.composite(code).is_some() {
            match fonts.assemble_stretchy(code, target / fs) {
                Ok(assembly) => return Ok(self.assembly_box(&assembly, fs)),
                Err(diagnostic) => {
                    self.diagnostics.push(Diagnostic::at(*diagnostic.kind, span.cloned()));
                }
            }
        }
        match largest {
            Some((variant, record)) => Ok(self.sized_glyph(code, variant, record, fs)),
            None => {
                let ch = char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER);
                self.text_run(BoxKind::Stretchy, &ch.to_string(), "normal", env, span, None)
            }
        }
    }

    fn sized_glyph(&self, code: u32, variant: &str, record: &FontCharRecord, fs: f64) -> BoxNode {
        let found = FoundGlyph {
            record: record.clone(),
            variant: variant.to_owned(),
        };
        let run = GlyphRun {
            text: char::from_u32(code).map(String::from).unwrap_or_default(),
            scale: fs,
            glyphs: vec![Self::placed(&found, code, 0.0, 0.0, fs, fs)],
            color: None,
        };
        BoxNode::new(
            BoxKind::Stretchy,
            record.width * fs,
            record.height * fs,
            record.depth * fs,
            BoxContent::Text(run),
        )
    }

    /// Places the pieces of `assembly`. Vertical assemblies sit on the
    /// baseline; horizontal ones start at the left edge.
    fn assembly_box(&self, assembly: &Assembly, fs: f64) -> BoxNode {
        let mut glyphs = Vec::with_capacity(assembly.parts.len());
        let (mut height, mut depth) = (0.0_f64, 0.0_f64);
        for part in &assembly.parts {
            let Some(record) = self.fonts.record(assembly.variant, part.code) else {
                continue;
            };
            let found = FoundGlyph {
                record: record.clone(),
                variant: assembly.variant.to_owned(),
            };
            let glyph = match assembly.axis {
                Axis::Vertical => {
                    let stretch = fs * part.scale;
                    let x = (assembly.breadth - part.breadth) / 2.0 * fs;
                    let y = part.position * fs + record.depth * stretch;
                    Self::placed(&found, part.code, x, y, fs, stretch)
                }
                Axis::Horizontal => {
                    height = height.max(record.height * fs);
                    depth = depth.max(record.depth * fs);
                    Self::placed(&found, part.code, part.position * fs, 0.0, fs * part.scale, fs)
                }
            };
            glyphs.push(glyph);
        }
        let (width, height, depth) = match assembly.axis {
            Axis::Vertical => (assembly.breadth * fs, assembly.extent * fs, 0.0),
            Axis::Horizontal => (assembly.extent * fs, height, depth),
        };
        let run = GlyphRun {
            text: char::from_u32(assembly.code).map(String::from).unwrap_or_default(),
            scale: fs,
            glyphs,
            color: None,
        };
        BoxNode::new(BoxKind::Stretchy, width, height, depth, BoxContent::Assembly(run))
    }

    fn accent(&mut self, base: &Node, accent: &str, stretchy: bool, env: Env, span: Option<&SourceSpan>) -> Laid {
        let base = self.node(base, env.with_style(env.style.cramp()))?;
        let p = self.params;
        let fs = self.scale(env);
        let code = accent.chars().next().map_or(0, u32::from);

        let (mark, shift) = if stretchy {
            let rule = p.rule_thickness * fs;
            let mark = if self.fonts.composite(code).is_some() {
                match self.fonts.assemble_stretchy(code, base.width / fs) {
                    Ok(assembly) => self.assembly_box(&assembly, fs),
                    Err(diagnostic) => {
                        self.diagnostics.push(Diagnostic::at(*diagnostic.kind, span.cloned()));
                        self.text_run(BoxKind::Mo, accent, "normal", env, span, None)?
                    }
                }
            } else {
                BoxNode::rule(base.width, rule, 0.0)
            };
            let shift = base.height + 3.0 * rule + mark.depth;
            (mark, shift)
        } else {
            let mark = self.text_run(BoxKind::Mo, accent, "normal", env, span, None)?;
            let shift = base.height - base.height.min(p.x_height * fs);
            (mark, shift)
        };

        let width = base.width.max(mark.width);
        let mark_x = (width - mark.width) / 2.0;
        let base_x = (width - base.width) / 2.0;
        Ok(BoxNode::wrap(
            BoxKind::Mover,
            width,
            vec![base.at(base_x, 0.0), mark.at(mark_x, shift)],
        ))
    }

    /// Rows of cells with aligned columns, centred on the math axis.
    fn table(&mut self, rows: &[Vec<Node>], columns: &[ColumnAlign], env: Env) -> Laid {
        let fs = self.scale(env);
        let mut laid: Vec<Vec<BoxNode>> = Vec::with_capacity(rows.len());
        for row in rows {
            let mut cells = Vec::with_capacity(row.len());
            for cell in row {
                cells.push(self.node(cell, env)?);
            }
            laid.push(cells);
        }

        let column_count = laid.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0.0_f64; column_count];
        for cells in &laid {
            for (j, cell) in cells.iter().enumerate() {
                widths[j] = widths[j].max(cell.width);
            }
        }
        let metrics: Vec<(f64, f64)> = laid
            .iter()
            .map(|cells| {
                cells.iter().fold((STRUT_HEIGHT * fs, STRUT_DEPTH * fs), |(h, d), c| {
                    (h.max(c.height), d.max(c.depth))
                })
            })
            .collect();
        let total: f64 = metrics.iter().map(|(h, d)| h + d).sum();
        let gap = COLUMN_GAP * fs;

        let mut children = Vec::new();
        let mut top = total / 2.0 + self.params.axis_height * fs;
        for (cells, (height, depth)) in laid.into_iter().zip(metrics) {
            let baseline = top - height;
            let mut x = 0.0;
            for (j, cell) in cells.into_iter().enumerate() {
                let align = if columns.is_empty() {
                    ColumnAlign::Center
                } else {
                    columns[j % columns.len()]
                };
                let offset = match align {
                    ColumnAlign::Left => 0.0,
                    ColumnAlign::Center => (widths[j] - cell.width) / 2.0,
                    ColumnAlign::Right => widths[j] - cell.width,
                };
                let cell = BoxNode::hbox(BoxKind::Mtd, vec![cell]);
                children.push(cell.at(x + offset, baseline));
                x += widths[j] + gap;
            }
            top -= height + depth;
        }
        let width = widths.iter().sum::<f64>() + gap * column_count.saturating_sub(1) as f64;
        let mut table = BoxNode::wrap(BoxKind::Mtable, width, children);
        let half = total / 2.0;
        let axis = self.params.axis_height * fs;
        table.height = table.height.max(half + axis);
        table.depth = table.depth.max(half - axis);
        Ok(table)
    }
}

fn has_middle(node: &Node) -> bool {
    let mut found = false;
    node.visit(&mut |n| {
        if let Node::Operator { stretchy: true, .. } = n {
            found = true;
        }
    });
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Registry;
    use crate::font::{FontVariantData, TEX_PARAMS};
    use crate::parser::parse;
    use crate::types::ErrorCode;

    fn laid(source: &str, display: bool) -> BoxTree {
        let config = Registry::with_builtin_packages()
            .resolve(&["ams"])
            .unwrap();
        let settings = Settings::builder().display_mode(display).build();
        let tree = parse(source, &config, &settings);
        layout(&tree, &FontTables::tex(), &settings).ready().unwrap()
    }

    fn body(tree: &BoxTree) -> &BoxNode {
        &tree.root.children()[0]
    }

    fn kinds(node: &BoxNode) -> Vec<BoxKind> {
        let mut kinds = Vec::new();
        node.visit(&mut |b| kinds.push(b.kind));
        kinds
    }

    #[test]
    fn superscript_is_raised_and_smaller() {
        let tree = laid("x^2", false);
        let scripts = &body(&tree).children()[0];
        assert_eq!(scripts.kind, BoxKind::Msubsup);
        let [base, sup] = scripts.children() else {
            panic!("expected base and superscript");
        };
        assert!(sup.shift >= TEX_PARAMS.sup2);
        let BoxContent::Text(run) = &sup.content else {
            panic!("expected a glyph run");
        };
        assert_eq!(run.scale, 0.71);
        assert_eq!(sup.x, base.width);
    }

    #[test]
    fn fraction_centres_parts_over_rule() {
        let tree = laid(r"\frac{1}{2}", true);
        let frac = &body(&tree).children()[0];
        assert_eq!(frac.kind, BoxKind::Mfrac);
        let [num, rule, den] = frac.children() else {
            panic!("expected numerator, rule and denominator");
        };
        assert_eq!(rule.kind, BoxKind::Line);
        assert!(num.shift > rule.shift);
        assert!(den.shift < 0.0);
        assert!((num.x - den.x).abs() < 1e-9);
        assert!(frac.height > num.shift);
    }

    #[test]
    fn binary_operators_get_medium_glue() {
        let tree = laid("a+b", false);
        let row = body(&tree);
        let widths: Vec<(BoxKind, f64)> = row.children().iter().map(|b| (b.kind, b.width)).collect();
        assert_eq!(widths.len(), 5);
        assert_eq!(widths[1].0, BoxKind::Mspace);
        assert!((widths[1].1 - 4.0 / 18.0).abs() < 1e-9);

        let unary = laid("-b", false);
        assert!(body(&unary).children().iter().all(|b| b.kind != BoxKind::Mspace));
    }

    #[test]
    fn radical_covers_radicand() {
        let tree = laid(r"\sqrt{x}", false);
        let sqrt = &body(&tree).children()[0];
        assert_eq!(sqrt.kind, BoxKind::Msqrt);
        let [surd, vinculum, radicand] = sqrt.children() else {
            panic!("expected surd, vinculum and radicand");
        };
        assert_eq!(surd.kind, BoxKind::Stretchy);
        assert!(vinculum.shift > radicand.height);
        assert_eq!(radicand.x, surd.width);
    }

    #[test]
    fn tall_delimiters_are_assembled() {
        let tree = laid(r"\left(\begin{matrix}1\\2\\3\\4\\5\end{matrix}\right)", false);
        let delimited = &body(&tree).children()[0];
        let [open, inner, _close] = delimited.children() else {
            panic!("expected open fence, body and close fence");
        };
        let fence = &open.children()[0];
        assert_eq!(fence.kind, BoxKind::Stretchy);
        assert!(matches!(fence.content, BoxContent::Assembly(_)));
        assert!(fence.extent() >= inner.extent() * 0.9);
    }

    #[test]
    fn large_operators_switch_with_style() {
        let display = laid(r"\sum_{i=1}^n i", true);
        let inline = laid(r"\sum_{i=1}^n i", false);
        assert!(kinds(body(&display)).contains(&BoxKind::Munderover));
        assert!(!kinds(body(&inline)).contains(&BoxKind::Munderover));
        assert!(kinds(body(&inline)).contains(&BoxKind::Msubsup));
        assert!(body(&display).height > body(&inline).height);
    }

    #[test]
    fn errors_are_coloured() {
        let tree = laid(r"a+\foo", false);
        let mut colors = Vec::new();
        tree.root.visit(&mut |b| {
            if let BoxContent::Text(run) = &b.content
                && let Some(color) = &run.color
            {
                colors.push((b.kind, color.clone()));
            }
        });
        assert_eq!(colors, [(BoxKind::Merror, "#cc0000".to_owned())]);
        assert_eq!(tree.diagnostics[0].code(), ErrorCode::UndefinedControlSequence);
    }

    #[test]
    fn missing_glyphs_use_placeholder() {
        let tree = laid("\u{4E00}", false);
        assert_eq!(tree.diagnostics.len(), 1);
        assert_eq!(tree.diagnostics[0].code(), ErrorCode::GlyphNotFound);
        assert_eq!(body(&tree).width, FontCharRecord::missing().width);
    }

    #[test]
    fn deferred_variant_is_pending_until_provided() {
        let mut fonts = FontTables::tex();
        fonts.declare_deferred("double-struck", &["normal"]);
        let config = Registry::with_builtin_packages().resolve(&["ams"]).unwrap();
        let settings = Settings::default();
        let tree = parse(r"\mathbb{R}", &config, &settings);

        let first = layout(&tree, &fonts, &settings);
        assert_eq!(
            first,
            Attempt::Pending(Dependency::FontVariant("double-struck".to_owned()))
        );

        let mut data = FontVariantData::default();
        data.insert(0x52, FontCharRecord::new(0.683, 0.0, 0.722));
        fonts.provide("double-struck", data).unwrap();
        let second = layout(&tree, &fonts, &settings).ready().unwrap();
        assert!(second.diagnostics.is_empty());
        assert!((second.root.width - 0.722).abs() < 1e-9);
    }

    #[test]
    fn glyph_sizing_follows_the_record() {
        let mut fonts = FontTables::tex();
        fonts
            .load_variant(
                "double-struck",
                r#"{"chars": {"82": [0.683, 0.0, 0.722, {"ic": 0.05, "css": 3}]}}"#,
                &["normal"],
            )
            .unwrap();
        let config = Registry::with_builtin_packages().resolve(&["ams"]).unwrap();
        let settings = Settings::default();
        let tree = parse(r"x^{\mathbb{R}}", &config, &settings);
        let laid = layout(&tree, &fonts, &settings).ready().unwrap();

        let mut sized = Vec::new();
        laid.root.visit(&mut |b| {
            if let BoxContent::Text(run) = &b.content {
                sized.extend(run.glyphs.iter().filter_map(|g| g.sizing.map(|s| (run.scale, s))));
            }
        });
        let [(scale, sizing)] = sized[..] else {
            panic!("expected one sized glyph, got {sized:?}");
        };
        // Script size comes from the font size, not from the sizing.
        assert!(scale < 1.0);
        assert!(sizing.class.has_width() && sizing.class.has_padding());
        assert_eq!((sizing.width, sizing.italic), (0.722, 0.05));
    }

    #[test]
    fn matrix_rows_stack_downwards() {
        let tree = laid(r"\begin{matrix}a&b\\c&d\end{matrix}", false);
        let table = &body(&tree).children()[0];
        assert_eq!(table.kind, BoxKind::Mtable);
        let cells = table.children();
        assert_eq!(cells.len(), 4);
        assert!(cells[0].shift > cells[2].shift);
        assert!(cells[1].x > cells[0].x);
        let centre = |cell: &BoxNode| cell.x + cell.width / 2.0;
        assert!((centre(&cells[0]) - centre(&cells[2])).abs() < 1e-9);
    }
}
