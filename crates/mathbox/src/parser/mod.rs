//! Recursive-descent parser from TeX source to an [`ExpressionTree`].
//!
//! The parser reads tokens through the [`Expander`] with a single lookahead
//! token and dispatches every control sequence and character through the
//! handler tables of a [`ParserConfiguration`]. Parsing never fails: each
//! problem becomes a [`Diagnostic`] plus a visible [`Node::Error`] at the
//! offending span, and the rest of the input is parsed best effort.
//!
//! Command arguments are collected as raw tokens first and parsed afterwards
//! with [`Parser::subparse`], so a handler sees its arguments fully formed.

mod expander;
mod node;

use alloc::sync::Arc;
use core::mem;

use phf::phf_set;
use tracing::{debug, trace};

use crate::config::{
    ArgSpec, CharKind, Construct, DefineKind, EnvironmentSpec, Handler, ParserConfiguration,
    ParserFlag,
};
use crate::types::{Diagnostic, ErrorKind, Settings, SourceSpan, Token, EOF};

pub use expander::{Expander, MacroDefinition};
pub use node::{ExpressionTree, MathVariant, Node, NodeAttrs, NodeType, TexClass};

const END_OF_EXPRESSION: phf::Set<&'static str> = phf_set! {
    "}",
    "&",
    "\\\\",
    "\\end",
    "\\right",
    "EOF",
};

/// Delimiters accepted by `\left`, `\middle` and `\right`, after symbol
/// translation. `.` is the null delimiter.
const DELIMITERS: phf::Set<&'static str> = phf_set! {
    "(", ")", "[", "]", "{", "}", "|", "/", ".",
    "\u{2225}", "\u{27E8}", "\u{27E9}",
};

/// Parses `source` under `config`: preprocessors, parser, postprocessors.
#[must_use]
pub fn parse(source: &str, config: &ParserConfiguration, settings: &Settings) -> ExpressionTree {
    let source = config.preprocess(source, settings);
    let mut tree = Parser::new(Arc::from(source), config, settings).parse();
    config.postprocess(&mut tree);
    debug!(
        nodes = count_nodes(&tree.root),
        diagnostics = tree.diagnostics.len(),
        "parsed expression"
    );
    tree
}

fn count_nodes(root: &Node) -> usize {
    let mut count = 0;
    root.visit(&mut |_| count += 1);
    count
}

/// A parsed atom plus how it takes limits.
struct Atom {
    node: Node,
    /// `Some` for operators: whether scripts become limits.
    limits: Option<bool>,
}

impl Atom {
    const fn plain(node: Node) -> Self {
        Self { node, limits: None }
    }
}

#[derive(Default)]
struct Scripts {
    sub: Option<Node>,
    sup: Option<Node>,
    /// `\limits`/`\nolimits` was given explicitly.
    explicit: bool,
}

/// Parser state for one expression.
pub struct Parser<'a> {
    gullet: Expander<'a>,
    config: &'a ParserConfiguration,
    settings: &'a Settings,
    input: Arc<str>,
    next_token: Option<Token>,
    diagnostics: Vec<Diagnostic>,
    /// Open groups, arguments, environments and `\left` pairs.
    depth: usize,
    leftright_depth: usize,
}

impl<'a> Parser<'a> {
    /// Creates a parser over already preprocessed `input`.
    #[must_use]
    pub fn new(input: Arc<str>, config: &'a ParserConfiguration, settings: &'a Settings) -> Self {
        Self {
            gullet: Expander::new(Arc::clone(&input), config, settings),
            config,
            settings,
            input,
            next_token: None,
            diagnostics: Vec::new(),
            depth: 0,
            leftright_depth: 0,
        }
    }

    /// Parses the whole input.
    #[must_use]
    pub fn parse(mut self) -> ExpressionTree {
        let mut nodes = Vec::new();
        loop {
            nodes.extend(self.parse_expression());
            let token = match self.fetch() {
                Ok(token) => token,
                Err(diagnostic) => {
                    nodes.push(self.recover(diagnostic));
                    continue;
                }
            };
            if token.is_eof() {
                break;
            }
            self.consume();
            let kind = if token.text == "}" {
                ErrorKind::ExtraCloseBrace
            } else {
                ErrorKind::MisplacedCommand {
                    command: token.text.clone(),
                }
            };
            nodes.push(self.recover(Diagnostic::with_token(kind, &token)));
            // Drop the stray delimiter or environment name with it.
            let stray: &[ArgSpec] = match token.text.as_str() {
                "\\right" => &[ArgSpec::Token],
                "\\end" => &[ArgSpec::Braced],
                _ => &[],
            };
            if let Err(diagnostic) = self.command_args(&token, stray) {
                nodes.push(self.recover(diagnostic));
            }
        }
        self.gullet.end_groups();
        let span = Some(SourceSpan::new(Arc::clone(&self.input), 0, self.input.len()));
        ExpressionTree {
            root: Node::Row {
                attrs: NodeAttrs::ord(span),
                children: nodes,
            },
            diagnostics: self.diagnostics,
        }
    }

    /// Returns the lookahead token, expanding macros and skipping spaces.
    fn fetch(&mut self) -> Result<Token, Diagnostic> {
        loop {
            if let Some(token) = &self.next_token {
                return Ok(token.clone());
            }
            let token = self.gullet.expand_next_token()?;
            if token.text != " " {
                self.next_token = Some(token);
            }
        }
    }

    /// Discards the lookahead token.
    fn consume(&mut self) {
        self.next_token = None;
    }

    /// Hands the lookahead token back to the expander before reading raw
    /// tokens from it.
    fn unfetch(&mut self) {
        if let Some(token) = self.next_token.take() {
            self.gullet.push_token(token);
        }
    }

    fn span_from(&self, start: Option<&SourceSpan>) -> Option<SourceSpan> {
        SourceSpan::range(start, self.gullet.last_loc())
    }

    /// Records `diagnostic` and returns its error node.
    fn recover(&mut self, diagnostic: Diagnostic) -> Node {
        self.recover_as(diagnostic, false)
    }

    fn recover_as(&mut self, diagnostic: Diagnostic, literal: bool) -> Node {
        let source = diagnostic
            .span
            .as_ref()
            .map(|span| span.text().to_owned())
            .unwrap_or_default();
        trace!(code = ?diagnostic.code(), %source, "recovered from parse error");
        let node = Node::error(&diagnostic, source, literal);
        self.diagnostics.push(diagnostic);
        node
    }

    fn after_error(&mut self, diagnostic: &Diagnostic) {
        if matches!(*diagnostic.kind, ErrorKind::MacroRecursionLimit { .. }) {
            self.consume();
            self.gullet.discard_pending();
        }
    }

    fn nesting_error(&self, token: &Token) -> Option<Diagnostic> {
        (self.depth >= self.settings.max_nesting).then(|| {
            Diagnostic::with_token(
                ErrorKind::MacroRecursionLimit {
                    limit: self.settings.max_nesting,
                },
                token,
            )
        })
    }

    fn handler_for(&self, token: &Token) -> Option<&'a Handler> {
        if token.is_control_sequence() {
            return self.config.macro_handler(&token.text);
        }
        let mut chars = token.text.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => self.config.character(ch),
            _ => None,
        }
    }

    /// Parses atoms until an end token, folding infix `\over`.
    fn parse_expression(&mut self) -> Vec<Node> {
        let mut body = Vec::new();
        let mut over: Option<(usize, Token)> = None;
        loop {
            let token = match self.fetch() {
                Ok(token) => token,
                Err(diagnostic) => {
                    self.after_error(&diagnostic);
                    body.push(self.recover(diagnostic));
                    continue;
                }
            };
            if END_OF_EXPRESSION.contains(token.text.as_str()) {
                break;
            }
            if let Some(Handler::Command {
                construct: Construct::Over,
                ..
            }) = self.handler_for(&token)
            {
                self.consume();
                if over.is_some() {
                    let diagnostic = Diagnostic::with_token(
                        ErrorKind::MisplacedCommand {
                            command: token.text.clone(),
                        },
                        &token,
                    );
                    body.push(self.recover(diagnostic));
                } else {
                    over = Some((body.len(), token));
                }
                continue;
            }
            if let Err(diagnostic) = self.parse_atom(&mut body) {
                self.after_error(&diagnostic);
                body.push(self.recover(diagnostic));
            }
        }

        if let Some((split, token)) = over {
            let denominator = body.split_off(split);
            let span = SourceSpan::range(
                body.first().and_then(|n| n.attrs().span.as_ref()).or(token.loc.as_ref()),
                denominator
                    .last()
                    .and_then(|n| n.attrs().span.as_ref())
                    .or(token.loc.as_ref()),
            );
            body = vec![Node::Fraction {
                attrs: NodeAttrs::ord(span),
                numerator: Box::new(Node::row(body, None)),
                denominator: Box::new(Node::row(denominator, None)),
                bar: true,
            }];
        }
        body
    }

    /// Parses one atom with its scripts and pushes it onto `body`.
    ///
    /// The base is pushed even when a script fails, so the error node lands
    /// after it.
    fn parse_atom(&mut self, body: &mut Vec<Node>) -> Result<(), Diagnostic> {
        let token = self.fetch()?;
        let mut atom = if matches!(token.text.as_str(), "^" | "_" | "'") {
            Atom::plain(Node::empty(token.loc.clone()))
        } else {
            match self.parse_group_or_symbol()? {
                Some(atom) => atom,
                None => return Ok(()),
            }
        };
        let mut scripts = Scripts::default();
        let result = self.parse_scripts(&mut atom, &mut scripts);
        body.push(self.attach_scripts(atom, scripts));
        result
    }

    fn parse_scripts(&mut self, atom: &mut Atom, scripts: &mut Scripts) -> Result<(), Diagnostic> {
        loop {
            let token = self.fetch()?;
            match token.text.as_str() {
                "^" | "_" => {
                    self.consume();
                    let arg = self.parse_script_arg(&token)?;
                    let (slot, kind) = if token.text == "^" {
                        (&mut scripts.sup, ErrorKind::DoubleSuperscript)
                    } else {
                        (&mut scripts.sub, ErrorKind::DoubleSubscript)
                    };
                    if slot.is_some() {
                        return Err(Diagnostic::with_token(kind, &token));
                    }
                    *slot = Some(arg);
                }
                "'" => {
                    if scripts.sup.is_some() {
                        self.consume();
                        return Err(Diagnostic::with_token(ErrorKind::DoubleSuperscript, &token));
                    }
                    let mut primes = String::new();
                    while self.fetch()?.text == "'" {
                        self.consume();
                        primes.push('\u{2032}');
                    }
                    let mut parts = vec![Node::Operator {
                        attrs: NodeAttrs::ord(self.span_from(token.loc.as_ref())),
                        text: primes,
                        large: false,
                        stretchy: false,
                    }];
                    let next = self.fetch()?;
                    if next.text == "^" {
                        self.consume();
                        parts.push(self.parse_script_arg(&next)?);
                    }
                    scripts.sup = Some(Node::row(parts, None));
                }
                _ => match self.handler_for(&token) {
                    Some(Handler::Command {
                        construct: Construct::Limits(limits),
                        ..
                    }) => {
                        self.consume();
                        if atom.limits.is_none() {
                            return Err(Diagnostic::with_token(
                                ErrorKind::MisplacedCommand {
                                    command: token.text.clone(),
                                },
                                &token,
                            ));
                        }
                        atom.limits = Some(*limits);
                        scripts.explicit = true;
                    }
                    _ => return Ok(()),
                },
            }
        }
    }

    fn parse_script_arg(&mut self, script: &Token) -> Result<Node, Diagnostic> {
        let missing = || {
            Diagnostic::with_token(
                ErrorKind::MissingArgument {
                    command: script.text.clone(),
                },
                script,
            )
        };
        let next = self.fetch()?;
        if END_OF_EXPRESSION.contains(next.text.as_str()) || matches!(next.text.as_str(), "^" | "_") {
            return Err(missing());
        }
        self.parse_group_or_symbol()?
            .map(|atom| atom.node)
            .ok_or_else(missing)
    }

    fn attach_scripts(&self, atom: Atom, scripts: Scripts) -> Node {
        if scripts.sub.is_none() && scripts.sup.is_none() {
            return atom.node;
        }
        let attrs = NodeAttrs::new(atom.node.class(), self.span_from(atom.node.attrs().span.as_ref()));
        let base = Box::new(atom.node);
        let sub = scripts.sub.map(Box::new);
        let sup = scripts.sup.map(Box::new);
        if atom.limits == Some(true) {
            Node::UnderOver {
                attrs,
                base,
                under: sub,
                over: sup,
                movable: !scripts.explicit,
            }
        } else {
            Node::Scripts {
                attrs,
                base,
                sub,
                sup,
            }
        }
    }

    /// Parses a `{...}` group or a single symbol or command.
    ///
    /// Returns `None` for tokens that produce nothing, such as macro
    /// definitions.
    fn parse_group_or_symbol(&mut self) -> Result<Option<Atom>, Diagnostic> {
        let token = self.fetch()?;
        self.consume();
        if token.text == "{" {
            return self.parse_group(&token).map(|node| Some(Atom::plain(node)));
        }
        match self.handler_for(&token) {
            Some(handler) => self.dispatch(handler, &token),
            None if token.is_control_sequence() => {
                let literal = self.config.has_flag(ParserFlag::UndefinedAsLiteral);
                let diagnostic = Diagnostic::with_token(
                    ErrorKind::UndefinedControlSequence {
                        name: token.text.clone(),
                    },
                    &token,
                );
                Ok(Some(Atom::plain(self.recover_as(diagnostic, literal))))
            }
            None => Ok(Some(Atom::plain(unknown_character(&token)))),
        }
    }

    /// Parses the inside of a group whose `{` was consumed.
    fn parse_group(&mut self, open: &Token) -> Result<Node, Diagnostic> {
        if let Some(diagnostic) = self.nesting_error(open) {
            self.unfetch();
            self.gullet.skip_group()?;
            return Err(diagnostic);
        }
        self.depth += 1;
        self.gullet.begin_group();
        let mut body = self.parse_expression();
        match self.fetch() {
            Ok(token) if token.text == "}" => self.consume(),
            Ok(_) => {
                let diagnostic = Diagnostic::at(ErrorKind::MissingCloseBrace, open.loc.clone());
                body.push(self.recover(diagnostic));
            }
            Err(diagnostic) => body.push(self.recover(diagnostic)),
        }
        if let Err(diagnostic) = self.gullet.end_group() {
            body.push(self.recover(diagnostic));
        }
        self.depth -= 1;
        Ok(Node::row(body, self.span_from(open.loc.as_ref())))
    }

    /// Parses raw `tokens` as a nested expression.
    ///
    /// The tokens are pushed back onto the expander in front of an end
    /// marker, so expansion, grouping and error recovery work exactly as for
    /// top-level input.
    pub fn subparse(&mut self, tokens: Vec<Token>, command: &Token) -> Result<Node, Diagnostic> {
        if let Some(diagnostic) = self.nesting_error(command) {
            return Err(diagnostic);
        }
        let span = SourceSpan::range(
            tokens.first().and_then(|t| t.loc.as_ref()),
            tokens.last().and_then(|t| t.loc.as_ref()),
        );
        self.unfetch();
        self.gullet.push_token(Token::new(EOF.to_owned(), None));
        self.gullet.push_tokens(tokens.into_iter().rev());
        self.depth += 1;
        self.gullet.begin_group();
        let mut body = self.parse_expression();
        loop {
            match self.fetch() {
                Ok(token) if token.is_eof() => {
                    self.consume();
                    break;
                }
                Ok(token) => {
                    self.consume();
                    let kind = if token.text == "}" {
                        ErrorKind::ExtraCloseBrace
                    } else {
                        ErrorKind::MisplacedCommand {
                            command: token.text.clone(),
                        }
                    };
                    body.push(self.recover(Diagnostic::with_token(kind, &token)));
                    body.extend(self.parse_expression());
                }
                Err(diagnostic) => {
                    self.after_error(&diagnostic);
                    body.push(self.recover(diagnostic));
                }
            }
        }
        if let Err(diagnostic) = self.gullet.end_group() {
            body.push(self.recover(diagnostic));
        }
        self.depth -= 1;
        Ok(Node::row(body, span))
    }

    fn dispatch(&mut self, handler: &'a Handler, token: &Token) -> Result<Option<Atom>, Diagnostic> {
        match handler {
            Handler::CharClass { kind, class, text } => {
                let text = text.unwrap_or(token.text.as_str());
                Ok(Some(Atom::plain(symbol(*kind, *class, text, token.loc.clone()))))
            }
            // Expanded by the gullet before the parser sees the token.
            Handler::Substitution { .. } => Ok(None),
            Handler::Environment(_) => Err(Diagnostic::with_token(
                ErrorKind::MisplacedCommand {
                    command: token.text.clone(),
                },
                token,
            )),
            Handler::Command { args, construct } => self.command(token, args, construct),
        }
    }

    fn command_args(
        &mut self,
        command: &Token,
        specs: &[ArgSpec],
    ) -> Result<Vec<Option<Vec<Token>>>, Diagnostic> {
        self.unfetch();
        let mut args = Vec::with_capacity(specs.len());
        for spec in specs {
            args.push(match spec {
                ArgSpec::Optional => self.gullet.scan_optional()?,
                ArgSpec::Braced => Some(self.gullet.consume_arg(command, None)?),
                ArgSpec::Token => {
                    self.gullet.consume_spaces()?;
                    let token = self.gullet.pop_token()?;
                    if token.is_eof() {
                        self.gullet.push_token(token);
                        return Err(Diagnostic::with_token(
                            ErrorKind::MissingArgument {
                                command: command.text.clone(),
                            },
                            command,
                        ));
                    }
                    Some(vec![token])
                }
            });
        }
        Ok(args)
    }

    #[allow(clippy::too_many_lines)]
    fn command(
        &mut self,
        token: &Token,
        specs: &[ArgSpec],
        construct: &Construct,
    ) -> Result<Option<Atom>, Diagnostic> {
        let mut args = self.command_args(token, specs)?.into_iter();
        let mut next_arg = move || args.next().flatten();
        let misplaced = || {
            Diagnostic::with_token(
                ErrorKind::MisplacedCommand {
                    command: token.text.clone(),
                },
                token,
            )
        };

        let node = match construct {
            Construct::Fraction {
                bar,
                open,
                close,
                display,
            } => {
                let numerator = self.subparse(next_arg().unwrap_or_default(), token)?;
                let denominator = self.subparse(next_arg().unwrap_or_default(), token)?;
                let span = self.span_from(token.loc.as_ref());
                let mut node = Node::Fraction {
                    attrs: NodeAttrs::ord(span.clone()),
                    numerator: Box::new(numerator),
                    denominator: Box::new(denominator),
                    bar: *bar,
                };
                if open.is_some() || close.is_some() {
                    node = Node::Delimited {
                        attrs: NodeAttrs::new(TexClass::Inner, span.clone()),
                        open: open.unwrap_or(".").to_owned(),
                        close: close.unwrap_or(".").to_owned(),
                        body: Box::new(node),
                    };
                }
                if let Some(display) = display {
                    let mut attrs = NodeAttrs::new(node.class(), span);
                    attrs.display = Some(*display);
                    node = Node::Styled {
                        attrs,
                        body: Box::new(node),
                    };
                }
                node
            }
            Construct::Radical => {
                let index = next_arg();
                let body = next_arg().unwrap_or_default();
                let index = match index {
                    Some(tokens) => Some(Box::new(self.subparse(tokens, token)?)),
                    None => None,
                };
                let body = self.subparse(body, token)?;
                Node::Radical {
                    attrs: NodeAttrs::ord(self.span_from(token.loc.as_ref())),
                    body: Box::new(body),
                    index,
                }
            }
            Construct::Variant(variant) => {
                let body = self.subparse(next_arg().unwrap_or_default(), token)?;
                let mut attrs = NodeAttrs::ord(self.span_from(token.loc.as_ref()));
                attrs.variant = Some(*variant);
                Node::Styled {
                    attrs,
                    body: Box::new(body),
                }
            }
            Construct::BoldSymbol => {
                let mut body = self.subparse(next_arg().unwrap_or_default(), token)?;
                body.visit_mut(&mut embolden);
                body
            }
            Construct::LargeOperator { symbol, limits } => {
                return Ok(Some(Atom {
                    node: Node::Operator {
                        attrs: NodeAttrs::new(TexClass::Op, token.loc.clone()),
                        text: (*symbol).to_owned(),
                        large: true,
                        stretchy: false,
                    },
                    limits: Some(*limits),
                }));
            }
            Construct::NamedOperator { name, limits } => {
                return Ok(Some(Atom {
                    node: named_operator(name, token.loc.clone()),
                    limits: Some(*limits),
                }));
            }
            Construct::OperatorName => {
                let name: String = next_arg()
                    .unwrap_or_default()
                    .iter()
                    .filter(|t| !t.is_control_sequence() && t.text != " ")
                    .map(|t| t.text.as_str())
                    .collect();
                return Ok(Some(Atom {
                    node: named_operator(&name, self.span_from(token.loc.as_ref())),
                    limits: Some(false),
                }));
            }
            Construct::Style(display) => {
                let body = self.parse_expression();
                let mut attrs = NodeAttrs::ord(self.span_from(token.loc.as_ref()));
                attrs.display = Some(*display);
                Node::Styled {
                    attrs,
                    body: Box::new(Node::row(body, None)),
                }
            }
            Construct::Space(width) => Node::Space {
                attrs: NodeAttrs::ord(token.loc.clone()),
                width: *width,
            },
            Construct::Accent { accent, stretchy } => {
                let base = self.subparse(next_arg().unwrap_or_default(), token)?;
                Node::Accent {
                    attrs: NodeAttrs::ord(self.span_from(token.loc.as_ref())),
                    base: Box::new(base),
                    accent: (*accent).to_owned(),
                    stretchy: *stretchy,
                }
            }
            Construct::Left => {
                let open = next_arg().unwrap_or_default();
                self.left_right(token, &open)?
            }
            Construct::Middle => {
                let delimiter = next_arg().unwrap_or_default();
                if self.leftright_depth == 0 {
                    return Err(misplaced());
                }
                let text = self.delimiter(token, &delimiter)?;
                Node::Operator {
                    attrs: NodeAttrs::ord(self.span_from(token.loc.as_ref())),
                    text,
                    large: false,
                    stretchy: true,
                }
            }
            Construct::Text => {
                let tokens = next_arg().unwrap_or_default();
                Node::Text {
                    attrs: NodeAttrs::ord(self.span_from(token.loc.as_ref())),
                    text: text_of(&tokens),
                }
            }
            Construct::Phantom => {
                let body = self.subparse(next_arg().unwrap_or_default(), token)?;
                Node::Phantom {
                    attrs: NodeAttrs::ord(self.span_from(token.loc.as_ref())),
                    body: Box::new(body),
                }
            }
            Construct::Begin => self.environment(token)?,
            Construct::Define(kind) => {
                self.define(*kind, token)?;
                return Ok(None);
            }
            Construct::Right | Construct::Limits(_) | Construct::Over | Construct::End => {
                return Err(misplaced());
            }
        };
        Ok(Some(Atom::plain(node)))
    }

    /// Resolves a delimiter token to the character it draws.
    fn delimiter(&self, command: &Token, tokens: &[Token]) -> Result<String, Diagnostic> {
        let invalid = |text: &str| {
            Diagnostic::with_token(
                ErrorKind::InvalidDelimiter {
                    command: command.text.clone(),
                    delimiter: text.to_owned(),
                },
                tokens.first().map_or(command, |t| t),
            )
        };
        let [token] = tokens else {
            return Err(invalid(&text_of(tokens)));
        };
        let text = match self.handler_for(token) {
            Some(Handler::CharClass {
                text: Some(text), ..
            }) => *text,
            Some(Handler::CharClass { text: None, .. }) => token.text.as_str(),
            _ => return Err(invalid(&token.text)),
        };
        if DELIMITERS.contains(text) {
            Ok(text.to_owned())
        } else {
            Err(invalid(&token.text))
        }
    }

    fn left_right(&mut self, left: &Token, open: &[Token]) -> Result<Node, Diagnostic> {
        if let Some(diagnostic) = self.nesting_error(left) {
            self.unfetch();
            if let Some(right) = self.gullet.skip_balanced("\\left", "\\right")? {
                self.command_args(&right, &[ArgSpec::Token])?;
            }
            return Err(diagnostic);
        }
        let mut body = Vec::new();
        let open = self.delimiter(left, open).unwrap_or_else(|diagnostic| {
            body.push(self.recover(diagnostic));
            ".".to_owned()
        });
        self.depth += 1;
        self.leftright_depth += 1;
        self.gullet.begin_group();
        body.extend(self.parse_expression());
        let close = match self.fetch() {
            Ok(right) if right.text == "\\right" => {
                self.consume();
                match self.command_args(&right, &[ArgSpec::Token]) {
                    Ok(args) => {
                        let tokens = args.into_iter().flatten().flatten().collect::<Vec<_>>();
                        self.delimiter(&right, &tokens).unwrap_or_else(|diagnostic| {
                            body.push(self.recover(diagnostic));
                            ".".to_owned()
                        })
                    }
                    Err(diagnostic) => {
                        body.push(self.recover(diagnostic));
                        ".".to_owned()
                    }
                }
            }
            _ => {
                let diagnostic = Diagnostic::at(ErrorKind::MissingRightDelimiter, left.loc.clone());
                body.push(self.recover(diagnostic));
                ".".to_owned()
            }
        };
        if let Err(diagnostic) = self.gullet.end_group() {
            body.push(self.recover(diagnostic));
        }
        self.leftright_depth -= 1;
        self.depth -= 1;
        Ok(Node::Delimited {
            attrs: NodeAttrs::new(TexClass::Inner, self.span_from(left.loc.as_ref())),
            open,
            close,
            body: Box::new(Node::row(body, None)),
        })
    }

    fn environment(&mut self, begin: &Token) -> Result<Node, Diagnostic> {
        self.unfetch();
        let name = text_of(&self.gullet.consume_arg(begin, None)?);
        let mut prefix = None;
        let spec = match self.config.environment(&name) {
            Some(Handler::Environment(spec)) => spec.clone(),
            _ => {
                let diagnostic = Diagnostic::at(
                    ErrorKind::UnknownEnvironment { name: name.clone() },
                    self.span_from(begin.loc.as_ref()),
                );
                prefix = Some(self.recover(diagnostic));
                EnvironmentSpec {
                    open: None,
                    close: None,
                    columns: &[],
                    display: false,
                }
            }
        };
        if let Some(diagnostic) = self.nesting_error(begin) {
            self.unfetch();
            if let Some(end) = self.gullet.skip_balanced("\\begin", "\\end")? {
                self.command_args(&end, &[ArgSpec::Braced])?;
            }
            return Err(diagnostic);
        }
        self.depth += 1;
        self.gullet.begin_group();
        let rows = self.parse_rows(begin, &name);
        let trailing = self.gullet.end_group().err().map(|d| self.recover(d));
        self.depth -= 1;

        let span = self.span_from(begin.loc.as_ref());
        let mut attrs = NodeAttrs::ord(span.clone());
        attrs.display = Some(spec.display);
        let mut node = Node::Table {
            attrs,
            rows,
            columns: spec.columns.to_vec(),
        };
        if spec.open.is_some() || spec.close.is_some() {
            node = Node::Delimited {
                attrs: NodeAttrs::new(TexClass::Inner, span.clone()),
                open: spec.open.unwrap_or(".").to_owned(),
                close: spec.close.unwrap_or(".").to_owned(),
                body: Box::new(node),
            };
        }
        Ok(match (prefix, trailing) {
            (None, None) => node,
            (prefix, trailing) => {
                let children = prefix.into_iter().chain([node]).chain(trailing).collect();
                Node::row(children, span)
            }
        })
    }

    /// Parses cells separated by `&` and rows separated by `\\` up to the
    /// matching `\end`.
    fn parse_rows(&mut self, begin: &Token, name: &str) -> Vec<Vec<Node>> {
        let mut rows = Vec::new();
        let mut row = Vec::new();
        loop {
            let cell = self.parse_expression();
            let token = match self.fetch() {
                Ok(token) => token,
                Err(diagnostic) => {
                    row.push(self.recover(diagnostic));
                    continue;
                }
            };
            row.push(Node::row(cell, None));
            match token.text.as_str() {
                "&" => self.consume(),
                "\\\\" => {
                    self.consume();
                    rows.push(mem::take(&mut row));
                }
                "\\end" => {
                    self.consume();
                    let end = match self.command_args(&token, &[ArgSpec::Braced]) {
                        Ok(args) => text_of(&args.into_iter().flatten().flatten().collect::<Vec<_>>()),
                        Err(diagnostic) => {
                            row.push(self.recover(diagnostic));
                            break;
                        }
                    };
                    if end != name {
                        let diagnostic = Diagnostic::at(
                            ErrorKind::MismatchedEnvironment {
                                begin: name.to_owned(),
                                end,
                            },
                            self.span_from(token.loc.as_ref()),
                        );
                        row.push(self.recover(diagnostic));
                    }
                    break;
                }
                _ => {
                    // `}`, `\right` or the end of input: leave it to the caller.
                    let diagnostic = Diagnostic::at(
                        ErrorKind::MismatchedEnvironment {
                            begin: name.to_owned(),
                            end: token.text.clone(),
                        },
                        token.loc.clone().or_else(|| begin.loc.clone()),
                    );
                    row.push(self.recover(diagnostic));
                    break;
                }
            }
        }
        let trailing_empty = matches!(
            row.as_slice(),
            [Node::Row { children, .. }] if children.is_empty()
        );
        if !row.is_empty() && !(trailing_empty && !rows.is_empty()) {
            rows.push(row);
        }
        rows
    }

    fn define(&mut self, kind: DefineKind, command: &Token) -> Result<(), Diagnostic> {
        let invalid = |reason: String| {
            Diagnostic::with_token(ErrorKind::InvalidMacroDefinition { reason }, command)
        };
        self.unfetch();
        let name_tokens = match kind {
            DefineKind::Def => {
                self.gullet.consume_spaces()?;
                vec![self.gullet.pop_token()?]
            }
            DefineKind::NewCommand | DefineKind::RenewCommand => {
                self.gullet.consume_arg(command, None)?
            }
        };
        let name = match name_tokens.as_slice() {
            [name] if name.is_control_sequence() => name.text.clone(),
            _ => {
                return Err(invalid(format!(
                    "expected a control sequence name after {}, got '{}'",
                    command.text,
                    text_of(&name_tokens)
                )));
            }
        };

        let definition = if kind == DefineKind::Def {
            self.def_parameters(command)?
        } else {
            let params = match self.gullet.scan_optional()? {
                None => 0,
                Some(tokens) => {
                    let text = text_of(&tokens);
                    text.trim()
                        .parse::<usize>()
                        .ok()
                        .filter(|n| *n <= 9)
                        .ok_or_else(|| invalid(format!("invalid number of parameters '{text}'")))?
                }
            };
            let default = self.gullet.scan_optional()?;
            let body = self.gullet.consume_arg(command, None)?;
            MacroDefinition::new(body, params, default)
        };

        match kind {
            DefineKind::NewCommand if self.gullet.is_defined(&name) => Err(invalid(format!(
                "{name} is already defined; use \\renewcommand"
            ))),
            DefineKind::RenewCommand if !self.gullet.is_defined(&name) => Err(invalid(format!(
                "{name} is not defined; use \\newcommand"
            ))),
            _ => {
                self.gullet.define(&name, definition);
                Ok(())
            }
        }
    }

    /// Reads `\def` parameter text (`#1#2`, with optional delimiter tokens)
    /// and the body.
    fn def_parameters(&mut self, command: &Token) -> Result<MacroDefinition, Diagnostic> {
        let mut delimiters: Vec<Vec<String>> = vec![Vec::new()];
        let mut params = 0usize;
        loop {
            let token = self.gullet.pop_token()?;
            if token.text == "{" || token.is_eof() {
                self.gullet.push_token(token);
                break;
            }
            if token.text != "#" {
                if let Some(last) = delimiters.last_mut() {
                    last.push(token.text);
                }
                continue;
            }
            let number = self.gullet.pop_token()?;
            if number.text != (params + 1).to_string() {
                return Err(Diagnostic::with_token(
                    ErrorKind::InvalidMacroDefinition {
                        reason: format!("parameters must be numbered consecutively, got #{}", number.text),
                    },
                    &number,
                ));
            }
            params += 1;
            delimiters.push(Vec::new());
        }
        let tokens = self.gullet.consume_arg(command, None)?;
        Ok(MacroDefinition {
            tokens,
            params,
            default: None,
            delimiters,
        })
    }
}

fn symbol(kind: CharKind, class: TexClass, text: &str, span: Option<SourceSpan>) -> Node {
    let attrs = NodeAttrs::new(class, span);
    let text = text.to_owned();
    match kind {
        CharKind::Identifier => Node::Identifier { attrs, text },
        CharKind::Number => Node::Number { attrs, text },
        CharKind::Operator => Node::Operator {
            attrs,
            text,
            large: false,
            stretchy: false,
        },
    }
}

fn named_operator(name: &str, span: Option<SourceSpan>) -> Node {
    let mut attrs = NodeAttrs::new(TexClass::Op, span);
    attrs.variant = Some(MathVariant::Normal);
    Node::Operator {
        attrs,
        text: name.to_owned(),
        large: false,
        stretchy: false,
    }
}

/// Characters without a handler: letters stay identifiers, digits numbers,
/// anything else an ordinary operator.
fn unknown_character(token: &Token) -> Node {
    let kind = match token.text.chars().next() {
        Some(c) if c.is_alphabetic() => CharKind::Identifier,
        Some(c) if c.is_numeric() => CharKind::Number,
        _ => CharKind::Operator,
    };
    symbol(kind, TexClass::Ord, &token.text, token.loc.clone())
}

/// Source text of raw tokens, with control symbols reduced to their
/// character.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|t| match t.text.strip_prefix('\\') {
            Some(rest) if rest.chars().count() == 1 => rest,
            _ => t.text.as_str(),
        })
        .collect()
}

fn embolden(node: &mut Node) {
    let variant = match node {
        Node::Identifier { attrs, text } => attrs
            .variant
            .unwrap_or_else(|| MathVariant::for_identifier(text)),
        Node::Number { attrs, .. } | Node::Operator { attrs, .. } => {
            attrs.variant.unwrap_or(MathVariant::Normal)
        }
        _ => return,
    };
    node.attrs_mut().variant = Some(variant.emboldened());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Registry;
    use crate::types::ErrorCode;

    fn parse_with(source: &str, packages: &[&str]) -> ExpressionTree {
        let config = Registry::with_builtin_packages().resolve(packages).unwrap();
        parse(source, &config, &Settings::default())
    }

    fn parse_ok(source: &str) -> Vec<Node> {
        let tree = parse_with(source, &["ams", "newcommand", "boldsymbol"]);
        assert!(tree.diagnostics.is_empty(), "{:?}", tree.diagnostics);
        let Node::Row { children, .. } = tree.root else {
            panic!("root is a row");
        };
        children
    }

    fn codes(tree: &ExpressionTree) -> Vec<ErrorCode> {
        tree.diagnostics.iter().map(Diagnostic::code).collect()
    }

    #[test]
    fn superscript_binds_to_identifier() {
        let nodes = parse_ok("x^2");
        let [Node::Scripts { base, sub, sup, .. }] = nodes.as_slice() else {
            panic!("expected scripts, got {nodes:?}");
        };
        assert!(matches!(base.as_ref(), Node::Identifier { text, .. } if text == "x"));
        assert!(sub.is_none());
        assert!(matches!(sup.as_deref(), Some(Node::Number { text, .. }) if text == "2"));
    }

    #[test]
    fn frac_has_two_numbers() {
        let nodes = parse_ok(r"\frac{1}{2}");
        let [Node::Fraction { numerator, denominator, bar: true, .. }] = nodes.as_slice() else {
            panic!("expected a fraction, got {nodes:?}");
        };
        assert_eq!(numerator.node_type(), NodeType::Number);
        assert_eq!(denominator.node_type(), NodeType::Number);
    }

    #[test]
    fn undefined_macro_leaves_error_node() {
        let tree = parse_with(r"a+\foo+b", &[]);
        assert_eq!(codes(&tree), [ErrorCode::UndefinedControlSequence]);
        let errors = tree.errors();
        assert_eq!(errors.len(), 1);
        let Node::Error { source, literal, attrs, .. } = errors[0] else {
            unreachable!();
        };
        assert_eq!(source, r"\foo");
        assert!(!literal);
        assert_eq!(attrs.span.as_ref().map(SourceSpan::text), Some(r"\foo"));
        assert_eq!(tree.root.children().len(), 5);
    }

    #[test]
    fn noundefined_renders_literally() {
        let tree = parse_with(r"\foo", &["noundefined"]);
        assert!(matches!(tree.errors()[0], Node::Error { literal: true, .. }));
        assert_eq!(tree.diagnostics.len(), 1);
    }

    #[test]
    fn limits_follow_operator_kind() {
        let nodes = parse_ok(r"\sum_{i=0}^n \int_0^1 \int\limits_0^1");
        assert!(matches!(nodes[0], Node::UnderOver { movable: true, .. }));
        assert!(matches!(nodes[1], Node::Scripts { .. }));
        assert!(matches!(nodes[2], Node::UnderOver { movable: false, .. }));
    }

    #[test]
    fn primes_become_superscripts() {
        let nodes = parse_ok("f''^2");
        let [Node::Scripts { sup: Some(sup), .. }] = nodes.as_slice() else {
            panic!("expected scripts, got {nodes:?}");
        };
        let Node::Row { children, .. } = sup.as_ref() else {
            panic!("expected prime row");
        };
        assert!(matches!(&children[0], Node::Operator { text, .. } if text == "\u{2032}\u{2032}"));
    }

    #[test]
    fn infix_over_splits_expression() {
        let nodes = parse_ok(r"{a+b \over c}");
        let [Node::Fraction { numerator, .. }] = nodes.as_slice() else {
            panic!("expected a fraction, got {nodes:?}");
        };
        assert_eq!(numerator.children().len(), 3);
    }

    #[test]
    fn left_right_wraps_body() {
        let nodes = parse_ok(r"\left( x \middle| y \right\rangle");
        let [Node::Delimited { open, close, body, .. }] = nodes.as_slice() else {
            panic!("expected delimited, got {nodes:?}");
        };
        assert_eq!((open.as_str(), close.as_str()), ("(", "\u{27E9}"));
        assert!(matches!(body.children()[1], Node::Operator { stretchy: true, .. }));
    }

    #[test]
    fn environments_build_tables() {
        let nodes = parse_ok(r"\begin{pmatrix} a & b \\ c & d \\ \end{pmatrix}");
        let [Node::Delimited { open, body, .. }] = nodes.as_slice() else {
            panic!("expected delimited table, got {nodes:?}");
        };
        assert_eq!(open, "(");
        let Node::Table { rows, .. } = body.as_ref() else {
            panic!("expected a table");
        };
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|row| row.len() == 2));
    }

    #[test]
    fn environment_errors() {
        let tree = parse_with(r"\begin{foo} a \end{foo}", &[]);
        assert_eq!(codes(&tree), [ErrorCode::UnknownEnvironment]);
        let tree = parse_with(r"\begin{matrix} a \end{cases}", &["ams"]);
        assert_eq!(codes(&tree), [ErrorCode::MismatchedEnvironment]);
    }

    #[test]
    fn newcommand_with_arguments() {
        let nodes = parse_ok(r"\newcommand{\pair}[2]{(#1,#2)} \pair{a}{b}");
        assert_eq!(nodes.len(), 5);
        let nodes = parse_ok(r"\newcommand{\opt}[2][0]{#1#2} \opt{x} \opt[y]{z}");
        assert_eq!(nodes.len(), 4);
    }

    #[test]
    fn def_with_parameters() {
        let nodes = parse_ok(r"\def\sq#1{#1^2} \sq{y}");
        assert_eq!(nodes[0].node_type(), NodeType::Scripts);
    }

    #[test]
    fn definitions_are_group_scoped() {
        let tree = parse_with(r"{\def\x{1}\x}\x", &["newcommand"]);
        assert_eq!(codes(&tree), [ErrorCode::UndefinedControlSequence]);
    }

    #[test]
    fn newcommand_refuses_redefinition() {
        let tree = parse_with(r"\newcommand{\alpha}{a}", &["newcommand"]);
        assert_eq!(codes(&tree), [ErrorCode::InvalidMacroDefinition]);
        let tree = parse_with(r"\renewcommand{\alpha}{a}\alpha", &["newcommand"]);
        assert!(tree.diagnostics.is_empty());
    }

    #[test]
    fn runaway_macro_is_reported_once() {
        let tree = parse_with(r"\def\a{\a}\a x", &["newcommand"]);
        assert_eq!(codes(&tree), [ErrorCode::MacroRecursionLimit]);
    }

    #[test]
    fn nesting_limit_is_exact() {
        const LIMIT: usize = 8;
        let settings = Settings::builder().max_nesting(LIMIT).build();
        let config = Registry::with_builtin_packages().resolve(&["ams"]).unwrap();
        let nested = |open: &str, close: &str, levels: usize| {
            format!("{}x{}", open.repeat(levels), close.repeat(levels))
        };
        let cases = [
            ("{", "}"),
            (r"\sqrt{", "}"),
            (r"\frac{1}{", "}"),
            (r"\left(", r"\right)"),
            (r"\begin{matrix}", r"\end{matrix}"),
        ];
        for (open, close) in cases {
            let tree = parse(&nested(open, close, LIMIT), &config, &settings);
            assert!(tree.diagnostics.is_empty(), "{open}: {:?}", tree.diagnostics);

            // The refused level is skipped whole, so nothing else is reported.
            let tree = parse(&nested(open, close, LIMIT + 1), &config, &settings);
            assert_eq!(codes(&tree), [ErrorCode::MacroRecursionLimit], "{open}");
            assert_eq!(tree.errors().len(), 1, "{open}");
        }
    }

    #[test]
    fn stray_right_without_delimiter_is_reported() {
        let tree = parse_with(r"x\right", &[]);
        assert_eq!(
            codes(&tree),
            [ErrorCode::MisplacedCommand, ErrorCode::MissingArgument]
        );
        assert_eq!(tree.errors().len(), 2);
    }

    #[test]
    fn syntax_errors_recover() {
        let cases: [(&str, ErrorCode); 8] = [
            ("{x", ErrorCode::MissingCloseBrace),
            ("x}", ErrorCode::ExtraCloseBrace),
            (r"\frac{1}", ErrorCode::MissingArgument),
            ("x^a^b", ErrorCode::DoubleSuperscript),
            ("x_a_b", ErrorCode::DoubleSubscript),
            (r"\left( x", ErrorCode::MissingRightDelimiter),
            (r"\left\alpha x \right)", ErrorCode::InvalidDelimiter),
            ("x \u{1} y", ErrorCode::UnexpectedCharacter),
        ];
        for (source, code) in cases {
            let tree = parse_with(source, &[]);
            assert_eq!(codes(&tree), [code], "{source}");
            assert_eq!(tree.errors().len(), 1, "{source}");
        }
    }

    #[test]
    fn boldsymbol_emboldens_leaves() {
        let nodes = parse_ok(r"\boldsymbol{x+1}");
        let [Node::Row { children, .. }] = nodes.as_slice() else {
            panic!("expected a row, got {nodes:?}");
        };
        let variants: Vec<_> = children.iter().map(|n| n.attrs().variant).collect();
        assert_eq!(
            variants,
            [
                Some(MathVariant::BoldItalic),
                Some(MathVariant::Bold),
                Some(MathVariant::Bold)
            ]
        );
    }

    #[test]
    fn preprocessors_run_before_parsing() {
        let config = Registry::with_builtin_packages().resolve(&["autobold"]).unwrap();
        let settings = Settings::builder().bold_context(true).build();
        let tree = parse("x", &config, &settings);
        assert!(tree.diagnostics.is_empty());
        assert_eq!(
            tree.root.children()[0].attrs().variant,
            Some(MathVariant::BoldItalic)
        );
    }
}
