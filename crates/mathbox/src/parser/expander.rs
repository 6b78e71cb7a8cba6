//! Token stream with macro expansion.
//!
//! The expander sits between the lexer and the parser. It keeps a stack of
//! pending tokens (in reverse order, so the next token is the last element)
//! and replaces macro invocations with their bodies until an unexpandable
//! token reaches the top.

use alloc::sync::Arc;

use tracing::trace;

use crate::config::{Handler, ParserConfiguration};
use crate::lexer::Lexer;
use crate::namespace::Namespace;
use crate::types::{Diagnostic, ErrorKind, Settings, SourceSpan, Token, EOF};

/// A user macro defined while parsing (`\newcommand`, `\def`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroDefinition {
    /// Body tokens in forward order.
    pub tokens: Vec<Token>,
    /// Number of parameters.
    pub params: usize,
    /// Default for an optional first parameter.
    pub default: Option<Vec<Token>>,
    /// `\def` parameter text: `delimiters[0]` must precede the first
    /// argument, `delimiters[i]` ends argument `i`. Empty when undelimited.
    pub delimiters: Vec<Vec<String>>,
}

impl MacroDefinition {
    /// An undelimited macro.
    #[must_use]
    pub const fn new(tokens: Vec<Token>, params: usize, default: Option<Vec<Token>>) -> Self {
        Self {
            tokens,
            params,
            default,
            delimiters: Vec::new(),
        }
    }
}

/// The expansion of one macro invocation, before arguments are pasted.
struct Expansion {
    tokens: Vec<Token>,
    params: usize,
    default: Option<Vec<Token>>,
    delimiters: Vec<Vec<String>>,
}

/// Expands macros to tokens.
pub struct Expander<'a> {
    config: &'a ParserConfiguration,
    settings: &'a Settings,
    lexer: Lexer,
    macros: Namespace<MacroDefinition>,
    /// Tokens in reverse order.
    stack: Vec<Token>,
    expansion_count: usize,
    last_loc: Option<SourceSpan>,
}

impl<'a> Expander<'a> {
    /// Creates an expander over `input`.
    #[must_use]
    pub fn new(input: Arc<str>, config: &'a ParserConfiguration, settings: &'a Settings) -> Self {
        Self {
            config,
            settings,
            lexer: Lexer::new(input),
            macros: Namespace::default(),
            stack: Vec::new(),
            expansion_count: 0,
            last_loc: None,
        }
    }

    /// Span of the most recently consumed token that had one.
    #[must_use]
    pub const fn last_loc(&self) -> Option<&SourceSpan> {
        self.last_loc.as_ref()
    }

    /// Starts a group for macro definitions.
    pub fn begin_group(&mut self) {
        self.macros.begin_group();
    }

    /// Ends the innermost group, dropping its local definitions.
    pub fn end_group(&mut self) -> Result<(), Diagnostic> {
        self.macros.end_group()
    }

    /// Ends every open group.
    pub fn end_groups(&mut self) {
        self.macros.end_groups();
    }

    /// Defines `name` for the rest of the current group.
    pub fn define(&mut self, name: &str, definition: MacroDefinition) {
        trace!(name, params = definition.params, "define macro");
        self.macros.set(name, Some(definition), false);
    }

    /// Whether `name` is a user macro or has a configured handler.
    #[must_use]
    pub fn is_defined(&self, name: &str) -> bool {
        self.macros.has(name) || self.config.macro_handler(name).is_some()
    }

    /// Pushes one token back.
    pub fn push_token(&mut self, token: Token) {
        self.stack.push(token);
    }

    /// Pushes tokens given in reverse order.
    pub fn push_tokens(&mut self, tokens: impl IntoIterator<Item = Token>) {
        self.stack.extend(tokens);
    }

    /// The next token, without expansion or consumption.
    pub fn future(&mut self) -> Result<&Token, Diagnostic> {
        if self.stack.is_empty() {
            let token = self.lexer.lex()?;
            self.stack.push(token);
        }
        self.stack
            .last()
            .ok_or_else(|| Diagnostic::new(ErrorKind::MissingArgument { command: EOF.to_owned() }))
    }

    /// Removes and returns the next token, without expansion.
    pub fn pop_token(&mut self) -> Result<Token, Diagnostic> {
        self.future()?;
        let token = self
            .stack
            .pop()
            .ok_or_else(|| Diagnostic::new(ErrorKind::MissingArgument { command: EOF.to_owned() }))?;
        if token.loc.is_some() {
            self.last_loc.clone_from(&token.loc);
        }
        Ok(token)
    }

    /// Skips space tokens.
    pub fn consume_spaces(&mut self) -> Result<(), Diagnostic> {
        while self.future()?.text == " " {
            self.stack.pop();
        }
        Ok(())
    }

    /// Drops pending tokens up to (not including) the next end marker.
    ///
    /// Used after the expansion limit trips, so the runaway expansion is not
    /// parsed as content.
    pub fn discard_pending(&mut self) {
        while let Some(top) = self.stack.last() {
            if top.is_eof() {
                break;
            }
            self.stack.pop();
        }
        self.expansion_count = 0;
    }

    /// Skips raw tokens through the `}` matching an already consumed `{`.
    pub fn skip_group(&mut self) -> Result<(), Diagnostic> {
        self.skip_balanced("{", "}").map(drop)
    }

    /// Skips raw tokens through the `close` matching an already consumed
    /// `open` and returns it, or stops at the end of input.
    pub fn skip_balanced(&mut self, open: &str, close: &str) -> Result<Option<Token>, Diagnostic> {
        let mut depth = 1usize;
        loop {
            let token = self.pop_token()?;
            if token.is_eof() {
                self.push_token(token);
                return Ok(None);
            }
            if token.text == open {
                depth += 1;
            } else if token.text == close {
                depth -= 1;
                if depth == 0 {
                    return Ok(Some(token));
                }
            }
        }
    }

    fn count_expansion(&mut self, token: &Token) -> Result<(), Diagnostic> {
        self.expansion_count += 1;
        if self.expansion_count > self.settings.max_expand {
            return Err(Diagnostic::with_token(
                ErrorKind::MacroRecursionLimit {
                    limit: self.settings.max_expand,
                },
                token,
            ));
        }
        Ok(())
    }

    fn get_expansion(&self, name: &str) -> Option<Expansion> {
        if let Some(definition) = self.macros.get(name) {
            return Some(Expansion {
                tokens: definition.tokens.clone(),
                params: definition.params,
                default: definition.default.clone(),
                delimiters: definition.delimiters.clone(),
            });
        }
        let handler = if name.starts_with('\\') {
            self.config.macro_handler(name)
        } else {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => self.config.character(ch),
                _ => None,
            }
        };
        let Some(Handler::Substitution {
            template,
            params,
            default,
        }) = handler
        else {
            return None;
        };
        Some(Expansion {
            tokens: lex_string(template),
            params: *params,
            default: default.as_deref().map(lex_string),
            delimiters: Vec::new(),
        })
    }

    /// Expands the next token once. Returns `false` when it is not a macro.
    fn expand_once(&mut self) -> Result<bool, Diagnostic> {
        let top = self.pop_token()?;
        let Some(expansion) = self.get_expansion(&top.text) else {
            self.push_token(top);
            return Ok(false);
        };
        self.count_expansion(&top)?;

        let args = self.consume_macro_args(&top, &expansion)?;
        let mut out = Vec::with_capacity(expansion.tokens.len());
        let mut body = expansion.tokens.into_iter().peekable();
        while let Some(token) = body.next() {
            if token.text != "#" {
                out.push(token.with_loc(top.loc.clone()));
                continue;
            }
            let Some(next) = body.next() else {
                return Err(Diagnostic::with_token(
                    ErrorKind::InvalidMacroDefinition {
                        reason: format!("incomplete placeholder in {}", top.text),
                    },
                    &top,
                ));
            };
            if next.text == "#" {
                out.push(next.with_loc(top.loc.clone()));
                continue;
            }
            let index = next
                .text
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .filter(|n| *n < args.len())
                .ok_or_else(|| {
                    Diagnostic::with_token(
                        ErrorKind::InvalidMacroDefinition {
                            reason: format!("illegal parameter number #{} in {}", next.text, top.text),
                        },
                        &top,
                    )
                })?;
            out.extend(args[index].iter().cloned());
        }
        trace!(name = %top.text, tokens = out.len(), "expanded");
        self.push_tokens(out.into_iter().rev());
        Ok(true)
    }

    fn consume_macro_args(
        &mut self,
        top: &Token,
        expansion: &Expansion,
    ) -> Result<Vec<Vec<Token>>, Diagnostic> {
        let mut args = Vec::with_capacity(expansion.params);
        if !expansion.delimiters.is_empty() {
            for expected in &expansion.delimiters[0] {
                let token = self.pop_token()?;
                if *expected != token.text {
                    return Err(Diagnostic::with_token(
                        ErrorKind::InvalidMacroDefinition {
                            reason: format!("use of {} doesn't match its definition", top.text),
                        },
                        &token,
                    ));
                }
            }
            for i in 0..expansion.params {
                let delims = expansion.delimiters.get(i + 1).filter(|d| !d.is_empty());
                args.push(self.consume_arg(top, delims.map(Vec::as_slice))?);
            }
            return Ok(args);
        }

        let mut remaining = expansion.params;
        if let Some(default) = &expansion.default
            && remaining > 0
        {
            args.push(self.scan_optional()?.unwrap_or_else(|| default.clone()));
            remaining -= 1;
        }
        for _ in 0..remaining {
            args.push(self.consume_arg(top, None)?);
        }
        Ok(args)
    }

    /// Expands until the next token is not a macro, then pops it.
    pub fn expand_next_token(&mut self) -> Result<Token, Diagnostic> {
        while self.expand_once()? {}
        self.pop_token()
    }

    /// Collects one raw argument in forward order.
    ///
    /// Undelimited arguments are a single token or a balanced `{...}` group
    /// with the outer braces stripped. Delimited arguments run until the
    /// delimiter tokens appear at brace depth zero.
    pub fn consume_arg(
        &mut self,
        command: &Token,
        delims: Option<&[String]>,
    ) -> Result<Vec<Token>, Diagnostic> {
        let missing = || {
            Diagnostic::with_token(
                ErrorKind::MissingArgument {
                    command: command.text.clone(),
                },
                command,
            )
        };
        if delims.is_none() {
            self.consume_spaces()?;
            let start = self.future()?;
            if start.is_eof() || matches!(start.text.as_str(), "}" | "&" | "\\\\") {
                return Err(missing());
            }
            if start.text != "{" {
                return Ok(vec![self.pop_token()?]);
            }
        }

        let mut tokens = Vec::new();
        let mut depth = 0usize;
        let mut matched = 0usize;
        loop {
            let token = self.pop_token()?;
            if token.is_eof() {
                self.push_token(token);
                return Err(missing());
            }
            match token.text.as_str() {
                "{" => depth += 1,
                "}" => depth = depth.saturating_sub(1),
                _ => {}
            }
            let closes_group = token.text == "}" && depth == 0;
            match delims {
                None => {
                    tokens.push(token);
                    if closes_group {
                        tokens.pop();
                        tokens.remove(0);
                        return Ok(tokens);
                    }
                }
                Some(delims) => {
                    let at_top = depth == 0 || (depth == 1 && delims[matched] == "{");
                    if at_top && token.text == delims[matched] {
                        matched += 1;
                        tokens.push(token);
                        if matched == delims.len() {
                            tokens.truncate(tokens.len() - matched);
                            return Ok(strip_braces(tokens));
                        }
                    } else {
                        matched = 0;
                        tokens.push(token);
                    }
                }
            }
        }
    }

    /// Collects a raw `[...]` argument if one follows.
    pub fn scan_optional(&mut self) -> Result<Option<Vec<Token>>, Diagnostic> {
        self.consume_spaces()?;
        if self.future()?.text != "[" {
            return Ok(None);
        }
        let open = self.pop_token()?;
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let token = self.pop_token()?;
            if token.is_eof() {
                self.push_token(token);
                return Err(Diagnostic::with_token(
                    ErrorKind::MissingArgument {
                        command: open.text.clone(),
                    },
                    &open,
                ));
            }
            match token.text.as_str() {
                "{" => depth += 1,
                "}" => depth = depth.saturating_sub(1),
                "]" if depth == 0 => return Ok(Some(tokens)),
                _ => {}
            }
            tokens.push(token);
        }
    }
}

/// `{x}` delimited arguments lose their outer braces, like TeX.
fn strip_braces(mut tokens: Vec<Token>) -> Vec<Token> {
    let wrapped = tokens.len() >= 2
        && tokens.first().is_some_and(|t| t.text == "{")
        && tokens.last().is_some_and(|t| t.text == "}")
        && {
            let mut depth = 0usize;
            tokens[..tokens.len() - 1].iter().all(|t| {
                match t.text.as_str() {
                    "{" => depth += 1,
                    "}" => depth -= 1,
                    _ => {}
                }
                depth > 0
            })
        };
    if wrapped {
        tokens.pop();
        tokens.remove(0);
    }
    tokens
}

/// Tokenizes a handler template. Templates come from packages, so lexing
/// errors drop the offending character.
fn lex_string(text: &str) -> Vec<Token> {
    let mut lexer = Lexer::new(Arc::from(text));
    let mut tokens = Vec::new();
    loop {
        match lexer.lex() {
            Ok(token) if token.is_eof() => return tokens,
            Ok(token) => tokens.push(token.with_loc(None)),
            Err(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Registry;

    fn expand_all(input: &str, setup: impl FnOnce(&mut Expander<'_>)) -> Result<Vec<String>, Diagnostic> {
        let config = Registry::with_builtin_packages().resolve(&["ams"]).unwrap();
        let settings = Settings::default();
        let mut expander = Expander::new(Arc::from(input), &config, &settings);
        setup(&mut expander);
        let mut out = Vec::new();
        loop {
            let token = expander.expand_next_token()?;
            if token.is_eof() {
                return Ok(out);
            }
            out.push(token.text);
        }
    }

    fn body(text: &str) -> Vec<Token> {
        lex_string(text)
    }

    #[test]
    fn substitutions_expand() {
        assert_eq!(expand_all(r"a\leq b", |_| {}).unwrap(), ["a", r"\le", "b"]);
    }

    #[test]
    fn user_macros_paste_arguments() {
        let out = expand_all(r"\pair{x}y", |e| {
            e.define(r"\pair", MacroDefinition::new(body("(#1,#2)"), 2, None));
        })
        .unwrap();
        assert_eq!(out, ["(", "x", ",", "y", ")"]);
    }

    #[test]
    fn optional_first_parameter() {
        let define = |e: &mut Expander<'_>| {
            e.define(
                r"\f",
                MacroDefinition::new(body("#1#2"), 2, Some(body("d"))),
            );
        };
        assert_eq!(expand_all(r"\f{x}", define).unwrap(), ["d", "x"]);
        assert_eq!(expand_all(r"\f[o]{x}", define).unwrap(), ["o", "x"]);
    }

    #[test]
    fn optional_argument_is_scanned_raw() {
        let config = Registry::with_builtin_packages().resolve(&["ams"]).unwrap();
        let settings = Settings::default();
        let mut expander = Expander::new(Arc::from(" [a{]}b] x"), &config, &settings);
        let tokens = expander.scan_optional().unwrap().unwrap();
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, ["a", "{", "]", "}", "b"]);
        assert_eq!(expander.scan_optional().unwrap(), None);

        let mut unclosed = Expander::new(Arc::from("[a"), &config, &settings);
        let err = unclosed.scan_optional().unwrap_err();
        assert_eq!(err.code(), crate::types::ErrorCode::MissingArgument);
        assert!(err.to_string().contains('['), "{err}");
    }

    #[test]
    fn delimited_parameters() {
        let out = expand_all(r"\p a+b.c", |e| {
            e.define(
                r"\p",
                MacroDefinition {
                    tokens: body("[#1]"),
                    params: 1,
                    default: None,
                    delimiters: vec![Vec::new(), vec![".".to_owned()]],
                },
            );
        })
        .unwrap();
        assert_eq!(out, ["[", "a", "+", "b", "]", "c"]);
    }

    #[test]
    fn runaway_expansion_is_bounded() {
        let err = expand_all(r"\loop", |e| {
            e.define(r"\loop", MacroDefinition::new(body(r"\loop"), 0, None));
        })
        .unwrap_err();
        assert_eq!(*err.kind, ErrorKind::MacroRecursionLimit { limit: 1000 });
    }

    #[test]
    fn expanded_tokens_carry_invocation_span() {
        let config = Registry::with_builtin_packages().resolve::<&str>(&[]).unwrap();
        let settings = Settings::default();
        let mut expander = Expander::new(Arc::from(r"x\neq"), &config, &settings);
        expander.expand_next_token().unwrap();
        let token = expander.expand_next_token().unwrap();
        assert_eq!(token.text, r"\ne");
        assert_eq!(token.loc.unwrap().text(), r"\neq");
    }
}
