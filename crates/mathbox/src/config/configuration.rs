//! The merged, read-only view of a resolved package set.

use alloc::sync::Arc;
use std::collections::{BTreeMap, BTreeSet};

use strum::{AsRefStr, Display};
use tracing::{debug, trace};

use crate::config::package::{Handler, Package, ParserFlag, Postprocessor, Preprocessor};
use crate::parser::ExpressionTree;
use crate::types::Settings;

/// Which handler table a collision happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum HandlerTable {
    /// Control sequences.
    Macro,
    /// Environments.
    Environment,
    /// Single characters.
    Character,
}

/// One handler collision recorded during the merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerOverride {
    /// Table the key lives in.
    pub table: HandlerTable,
    /// Colliding key.
    pub key: String,
    /// Package whose handler was kept.
    pub winner: String,
    /// Package whose handler was dropped.
    pub loser: String,
}

#[derive(Debug, Clone, PartialEq)]
struct Binding {
    handler: Handler,
    package: String,
    priority: i32,
}

/// Handler tables merged from an ordered package list.
///
/// On a key collision the handler of the higher priority package wins; with
/// equal priorities the package later in resolution order wins. Every
/// collision is kept as a [`HandlerOverride`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParserConfiguration {
    packages: Vec<String>,
    macros: BTreeMap<String, Binding>,
    environments: BTreeMap<String, Binding>,
    characters: BTreeMap<char, Binding>,
    preprocessors: Vec<Preprocessor>,
    postprocessors: Vec<Postprocessor>,
    flags: BTreeSet<ParserFlag>,
    overrides: Vec<HandlerOverride>,
}

fn bind<K: Ord + Clone + ToString>(
    table: &mut BTreeMap<K, Binding>,
    kind: HandlerTable,
    key: &K,
    handler: &Handler,
    package: &Package,
    overrides: &mut Vec<HandlerOverride>,
) {
    let incoming = Binding {
        handler: handler.clone(),
        package: package.name.clone(),
        priority: package.priority,
    };
    let Some(existing) = table.get_mut(key) else {
        table.insert(key.clone(), incoming);
        return;
    };
    let (winner, loser) = if incoming.priority >= existing.priority {
        let loser = core::mem::replace(existing, incoming);
        (existing.package.clone(), loser.package)
    } else {
        (existing.package.clone(), incoming.package)
    };
    debug!(
        table = %kind,
        key = %key.to_string(),
        %winner,
        %loser,
        "handler override"
    );
    overrides.push(HandlerOverride {
        table: kind,
        key: key.to_string(),
        winner,
        loser,
    });
}

impl ParserConfiguration {
    /// Merges `packages`, which must already be in resolution order.
    #[must_use]
    pub fn merge(packages: &[Arc<Package>]) -> Self {
        let mut config = Self::default();
        for package in packages {
            config.packages.push(package.name.clone());
            for (name, handler) in &package.macros {
                bind(
                    &mut config.macros,
                    HandlerTable::Macro,
                    name,
                    handler,
                    package,
                    &mut config.overrides,
                );
            }
            for (name, handler) in &package.environments {
                bind(
                    &mut config.environments,
                    HandlerTable::Environment,
                    name,
                    handler,
                    package,
                    &mut config.overrides,
                );
            }
            for (ch, handler) in &package.characters {
                bind(
                    &mut config.characters,
                    HandlerTable::Character,
                    ch,
                    handler,
                    package,
                    &mut config.overrides,
                );
            }
            config.preprocessors.extend(package.preprocessors.iter().copied());
            config.postprocessors.extend(package.postprocessors.iter().copied());
            config.flags.extend(package.flags.iter().copied());
        }
        trace!(
            packages = ?config.packages,
            macros = config.macros.len(),
            overrides = config.overrides.len(),
            "merged configuration"
        );
        config
    }

    /// Package names in resolution order.
    #[must_use]
    pub fn packages(&self) -> &[String] {
        &self.packages
    }

    /// Handler for a control sequence (with its backslash).
    #[must_use]
    pub fn macro_handler(&self, name: &str) -> Option<&Handler> {
        self.macros.get(name).map(|b| &b.handler)
    }

    /// Handler for an environment name.
    #[must_use]
    pub fn environment(&self, name: &str) -> Option<&Handler> {
        self.environments.get(name).map(|b| &b.handler)
    }

    /// Handler for a single character.
    #[must_use]
    pub fn character(&self, ch: char) -> Option<&Handler> {
        self.characters.get(&ch).map(|b| &b.handler)
    }

    /// Package that supplied the handler for a control sequence.
    #[must_use]
    pub fn macro_owner(&self, name: &str) -> Option<&str> {
        self.macros.get(name).map(|b| b.package.as_str())
    }

    /// Whether `flag` is on.
    #[must_use]
    pub fn has_flag(&self, flag: ParserFlag) -> bool {
        self.flags.contains(&flag)
    }

    /// Every handler collision of the merge, in merge order.
    #[must_use]
    pub fn overrides(&self) -> &[HandlerOverride] {
        &self.overrides
    }

    /// Source rewrites, in configuration order.
    #[must_use]
    pub fn preprocessors(&self) -> &[Preprocessor] {
        &self.preprocessors
    }

    /// Tree rewrites, in configuration order.
    #[must_use]
    pub fn postprocessors(&self) -> &[Postprocessor] {
        &self.postprocessors
    }

    /// Runs every preprocessor over `source`.
    #[must_use]
    pub fn preprocess(&self, source: &str, settings: &Settings) -> String {
        self.preprocessors
            .iter()
            .fold(source.to_owned(), |text, pre| {
                trace!(preprocessor = pre.name, "preprocess");
                (pre.run)(&text, settings)
            })
    }

    /// Runs every postprocessor over `tree`.
    pub fn postprocess(&self, tree: &mut ExpressionTree) {
        for post in &self.postprocessors {
            trace!(postprocessor = post.name, "postprocess");
            (post.run)(tree);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CharKind, Handler};
    use crate::parser::TexClass;

    fn package(name: &str, priority: i32, text: &'static str) -> Arc<Package> {
        Arc::new(
            Package::builder(name)
                .priority(priority)
                .macro_handler(
                    "\\x",
                    Handler::symbol(CharKind::Identifier, TexClass::Ord, text),
                )
                .build(),
        )
    }

    fn text_of(config: &ParserConfiguration) -> Option<&'static str> {
        match config.macro_handler("\\x")? {
            Handler::CharClass { text, .. } => *text,
            _ => None,
        }
    }

    #[test]
    fn later_package_wins_on_equal_priority() {
        let config = ParserConfiguration::merge(&[package("a", 0, "A"), package("b", 0, "B")]);
        assert_eq!(text_of(&config), Some("B"));
        assert_eq!(
            config.overrides(),
            [HandlerOverride {
                table: HandlerTable::Macro,
                key: "\\x".to_owned(),
                winner: "b".to_owned(),
                loser: "a".to_owned(),
            }]
        );
    }

    #[test]
    fn higher_priority_wins_regardless_of_order() {
        let config = ParserConfiguration::merge(&[package("a", 10, "A"), package("b", 0, "B")]);
        assert_eq!(text_of(&config), Some("A"));
        assert_eq!(config.macro_owner("\\x"), Some("a"));
        assert_eq!(config.overrides()[0].loser, "b");
    }
}
