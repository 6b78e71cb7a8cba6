//! Packages: named bundles of handlers that extend the parser.

use alloc::borrow::Cow;
use core::fmt;
use std::collections::{BTreeMap, BTreeSet};

use strum::{AsRefStr, Display, EnumString};

use crate::parser::{ExpressionTree, MathVariant, TexClass};
use crate::types::Settings;

/// Parser policy switches a package can turn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, AsRefStr)]
pub enum ParserFlag {
    /// Undefined control sequences render as their literal name instead of
    /// an error message. The error node is still produced.
    UndefinedAsLiteral,
}

/// How a command collects one argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgSpec {
    /// `[...]`, may be absent.
    Optional,
    /// `{...}` group or a single token.
    Braced,
    /// Exactly one token, never a group.
    Token,
}

/// Column alignment inside an environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum ColumnAlign {
    /// Flush left.
    Left,
    /// Centred.
    #[default]
    Center,
    /// Flush right.
    Right,
}

/// Kinds of macro definition commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DefineKind {
    /// `\newcommand`: fails if the name is already defined.
    NewCommand,
    /// `\renewcommand`: fails if the name is not defined.
    RenewCommand,
    /// `\def`: TeX-style parameter text.
    Def,
}

/// What a character or control sequence produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum CharKind {
    /// `mi`-like: letters, Greek.
    Identifier,
    /// `mn`-like: digits and the decimal point.
    Number,
    /// `mo`-like: operators, relations, fences, punctuation.
    Operator,
}

/// Closed set of structures a command can build.
#[derive(Debug, Clone, PartialEq)]
pub enum Construct {
    /// `\frac`, `\binom`, `\dfrac`.
    Fraction {
        /// Whether the rule is drawn.
        bar: bool,
        /// Delimiters around the fraction.
        open: Option<&'static str>,
        /// Closing delimiter.
        close: Option<&'static str>,
        /// Forced display (`Some(true)`) or text style.
        display: Option<bool>,
    },
    /// `\sqrt[index]{body}`.
    Radical,
    /// `\mathbf{..}` and friends.
    Variant(MathVariant),
    /// `\boldsymbol{..}`.
    BoldSymbol,
    /// `\sum`, `\int`: a large operator glyph.
    LargeOperator {
        /// The operator character.
        symbol: &'static str,
        /// Whether limits go above/below in display style.
        limits: bool,
    },
    /// `\sin`, `\lim`: an upright word acting as an operator.
    NamedOperator {
        /// The operator's name.
        name: &'static str,
        /// Whether limits go above/below in display style.
        limits: bool,
    },
    /// `\operatorname{..}`.
    OperatorName,
    /// `\displaystyle` (`true`) and `\textstyle` (`false`).
    Style(bool),
    /// Horizontal space in ems.
    Space(f64),
    /// `\hat{..}`, `\overrightarrow{..}`.
    Accent {
        /// Accent character.
        accent: &'static str,
        /// Whether the accent stretches over the base.
        stretchy: bool,
    },
    /// `\left`.
    Left,
    /// `\middle`.
    Middle,
    /// `\right`.
    Right,
    /// `\text{..}`.
    Text,
    /// `\phantom{..}`.
    Phantom,
    /// `\limits` (`true`) and `\nolimits` (`false`).
    Limits(bool),
    /// Infix `\over`.
    Over,
    /// `\begin{env}`.
    Begin,
    /// `\end{env}`.
    End,
    /// `\newcommand`, `\renewcommand`, `\def`.
    Define(DefineKind),
}

/// Layout of a delegated environment.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvironmentSpec {
    /// Delimiter before the table.
    pub open: Option<&'static str>,
    /// Delimiter after the table.
    pub close: Option<&'static str>,
    /// Column alignments, repeated cyclically; empty means centred.
    pub columns: &'static [ColumnAlign],
    /// Whether cells are set in display style.
    pub display: bool,
}

/// A handler bound to a control sequence, environment or character.
#[derive(Debug, Clone, PartialEq)]
pub enum Handler {
    /// Text substitution with `#1`..`#9` parameters. When `default` is set
    /// the first parameter is optional (`[...]`) and falls back to it.
    Substitution {
        /// Replacement text.
        template: Cow<'static, str>,
        /// Number of parameters.
        params: usize,
        /// Default for an optional first parameter.
        default: Option<Cow<'static, str>>,
    },
    /// Collects arguments then builds a construct.
    Command {
        /// Argument layout.
        args: &'static [ArgSpec],
        /// What to build.
        construct: Construct,
    },
    /// A table-like environment.
    Environment(EnvironmentSpec),
    /// A single symbol.
    CharClass {
        /// Node kind to produce.
        kind: CharKind,
        /// Spacing class.
        class: TexClass,
        /// Replacement text; the token's own text when `None`.
        text: Option<&'static str>,
    },
}

impl Handler {
    /// A symbol handler that keeps the source text.
    #[must_use]
    pub const fn char_class(kind: CharKind, class: TexClass) -> Self {
        Self::CharClass {
            kind,
            class,
            text: None,
        }
    }

    /// A symbol handler that emits `text`.
    #[must_use]
    pub const fn symbol(kind: CharKind, class: TexClass, text: &'static str) -> Self {
        Self::CharClass {
            kind,
            class,
            text: Some(text),
        }
    }

    /// A command handler.
    #[must_use]
    pub const fn command(args: &'static [ArgSpec], construct: Construct) -> Self {
        Self::Command { args, construct }
    }

    /// A substitution without an optional first parameter.
    #[must_use]
    pub fn substitution(template: impl Into<Cow<'static, str>>, params: usize) -> Self {
        Self::Substitution {
            template: template.into(),
            params,
            default: None,
        }
    }
}

/// Rewrites the raw source before tokenization.
#[derive(Clone, Copy)]
pub struct Preprocessor {
    /// Name used in logs.
    pub name: &'static str,
    /// The rewrite.
    pub run: fn(&str, &Settings) -> String,
}

impl fmt::Debug for Preprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Preprocessor({})", self.name)
    }
}

impl PartialEq for Preprocessor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Rewrites the finished expression tree.
#[derive(Clone, Copy)]
pub struct Postprocessor {
    /// Name used in logs.
    pub name: &'static str,
    /// The rewrite.
    pub run: fn(&mut ExpressionTree),
}

impl fmt::Debug for Postprocessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Postprocessor({})", self.name)
    }
}

impl PartialEq for Postprocessor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// Handle given to init hooks during resolution.
///
/// Packages registered here live only for the configuration being resolved;
/// the shared registry is never modified.
#[derive(Debug, Default)]
pub struct InitContext {
    pub(crate) packages: Vec<Package>,
    pub(crate) required: Vec<String>,
}

impl InitContext {
    /// Makes `package` available to the configuration under resolution.
    pub fn register(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Adds `name` to the configuration under resolution.
    pub fn require(&mut self, name: impl Into<String>) {
        self.required.push(name.into());
    }
}

/// Hook run once per resolved configuration.
pub type InitHook = fn(&mut InitContext);

/// A named, immutable bundle of parser extensions.
#[derive(Debug, Clone)]
pub struct Package {
    /// Unique name.
    pub name: String,
    /// Merge priority: higher wins handler collisions, lower sorts first.
    pub priority: i32,
    /// Control sequence handlers, keyed with the backslash.
    pub macros: BTreeMap<String, Handler>,
    /// Environment handlers, keyed by environment name.
    pub environments: BTreeMap<String, Handler>,
    /// Single character handlers.
    pub characters: BTreeMap<char, Handler>,
    /// Source rewrites, in order.
    pub preprocessors: Vec<Preprocessor>,
    /// Tree rewrites, in order.
    pub postprocessors: Vec<Postprocessor>,
    /// Optional init hook.
    pub init: Option<InitHook>,
    /// Packages that must be resolved before this one.
    pub depends_on: Vec<String>,
    /// Parser policy switches.
    pub flags: BTreeSet<ParserFlag>,
}

impl Package {
    /// Starts building a package called `name` with priority 0.
    #[must_use]
    pub fn builder(name: impl Into<String>) -> PackageBuilder {
        PackageBuilder {
            package: Self {
                name: name.into(),
                priority: 0,
                macros: BTreeMap::new(),
                environments: BTreeMap::new(),
                characters: BTreeMap::new(),
                preprocessors: Vec::new(),
                postprocessors: Vec::new(),
                init: None,
                depends_on: Vec::new(),
                flags: BTreeSet::new(),
            },
        }
    }
}

/// Builder returned by [`Package::builder`].
#[derive(Debug)]
#[must_use]
pub struct PackageBuilder {
    package: Package,
}

impl PackageBuilder {
    /// Sets the merge priority.
    pub const fn priority(mut self, priority: i32) -> Self {
        self.package.priority = priority;
        self
    }

    /// Binds a control sequence (`"\\frac"`).
    pub fn macro_handler(mut self, name: impl Into<String>, handler: Handler) -> Self {
        self.package.macros.insert(name.into(), handler);
        self
    }

    /// Binds many control sequences at once.
    pub fn macro_handlers<I, S>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = (S, Handler)>,
        S: Into<String>,
    {
        self.package
            .macros
            .extend(handlers.into_iter().map(|(name, handler)| (name.into(), handler)));
        self
    }

    /// Binds an environment name.
    pub fn environment(mut self, name: impl Into<String>, spec: EnvironmentSpec) -> Self {
        self.package
            .environments
            .insert(name.into(), Handler::Environment(spec));
        self
    }

    /// Binds a single character.
    pub fn character(mut self, ch: char, handler: Handler) -> Self {
        self.package.characters.insert(ch, handler);
        self
    }

    /// Appends a preprocessor.
    pub fn preprocessor(mut self, name: &'static str, run: fn(&str, &Settings) -> String) -> Self {
        self.package.preprocessors.push(Preprocessor { name, run });
        self
    }

    /// Appends a postprocessor.
    pub fn postprocessor(mut self, name: &'static str, run: fn(&mut ExpressionTree)) -> Self {
        self.package.postprocessors.push(Postprocessor { name, run });
        self
    }

    /// Sets the init hook.
    pub fn init(mut self, hook: InitHook) -> Self {
        self.package.init = Some(hook);
        self
    }

    /// Declares a dependency.
    pub fn depends_on(mut self, name: impl Into<String>) -> Self {
        self.package.depends_on.push(name.into());
        self
    }

    /// Turns on a parser flag.
    pub fn flag(mut self, flag: ParserFlag) -> Self {
        self.package.flags.insert(flag);
        self
    }

    /// Finishes the package.
    #[must_use]
    pub fn build(self) -> Package {
        self.package
    }
}
