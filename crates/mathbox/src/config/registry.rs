//! Package registry and dependency resolution.

use alloc::sync::Arc;
use core::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tracing::{debug, info, warn};

use crate::config::configuration::ParserConfiguration;
use crate::config::package::{InitContext, Package};
use crate::config::packages;
use crate::namespace::{KeyMap, KeySet};
use crate::types::{Diagnostic, ErrorKind};

/// Name of the package every configuration includes.
pub const BASE_PACKAGE: &str = "base";

/// Upper bound on init-hook rounds before resolution gives up.
const MAX_INIT_ROUNDS: usize = 64;

#[derive(Debug, Clone)]
struct Registered {
    package: Arc<Package>,
    seq: usize,
}

/// Named packages available for resolution.
///
/// Registration happens during setup; afterwards the registry is shared
/// read-only and every [`Registry::resolve`] call is independent.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    packages: BTreeMap<String, Registered>,
    next_seq: usize,
}

/// Packages visible to one resolution: the registry plus packages added by
/// init hooks.
struct Scope<'r> {
    registry: &'r Registry,
    overlay: BTreeMap<String, Registered>,
}

impl Scope<'_> {
    fn get(&self, name: &str) -> Option<&Registered> {
        self.overlay
            .get(name)
            .or_else(|| self.registry.packages.get(name))
    }
}

impl Registry {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in package.
    #[must_use]
    pub fn with_builtin_packages() -> Self {
        let mut registry = Self::new();
        for package in packages::builtin() {
            registry.register(package);
        }
        registry
    }

    /// Adds `package`. A package with the same name is replaced and a
    /// `DuplicateOverride` diagnostic is returned; the replacement keeps the
    /// original registration position.
    pub fn register(&mut self, package: Package) -> Option<Diagnostic> {
        let name = package.name.clone();
        if let Some(existing) = self.packages.get_mut(&name) {
            warn!(package = %name, "package registered twice, replacing");
            existing.package = Arc::new(package);
            return Some(Diagnostic::new(ErrorKind::DuplicateOverride { package: name }));
        }
        debug!(package = %name, priority = package.priority, "registered package");
        let seq = self.next_seq;
        self.next_seq += 1;
        self.packages.insert(
            name,
            Registered {
                package: Arc::new(package),
                seq,
            },
        );
        None
    }

    /// Whether a package called `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.packages.contains_key(name)
    }

    /// Registered package names, sorted.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.packages.keys().map(String::as_str)
    }

    /// Resolves `names` (plus `base`) into a merged configuration.
    ///
    /// Dependencies are pulled in transitively and ordered topologically,
    /// ties broken by ascending priority then registration order. Init hooks
    /// run once each in that order; packages and names they add are folded
    /// in and resolution repeats until nothing changes.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> Result<ParserConfiguration, Diagnostic> {
        let mut scope = Scope {
            registry: self,
            overlay: BTreeMap::new(),
        };
        let mut requested: Vec<String> = Vec::with_capacity(names.len() + 1);
        for name in core::iter::once(BASE_PACKAGE).chain(names.iter().map(AsRef::as_ref)) {
            if !requested.iter().any(|r| r == name) {
                requested.push(name.to_owned());
            }
        }
        let mut initialized = KeySet::default();
        let mut next_seq = self.next_seq;

        for round in 0..MAX_INIT_ROUNDS {
            let order = order(&scope, &requested)?;
            let mut changed = false;
            for package in &order {
                let Some(init) = package.init else { continue };
                if !initialized.insert(package.name.clone()) {
                    continue;
                }
                debug!(package = %package.name, round, "running init hook");
                let mut cx = InitContext::default();
                init(&mut cx);
                for added in cx.packages {
                    debug!(package = %package.name, added = %added.name, "init hook registered package");
                    scope.overlay.insert(
                        added.name.clone(),
                        Registered {
                            package: Arc::new(added),
                            seq: next_seq,
                        },
                    );
                    next_seq += 1;
                    changed = true;
                }
                for name in cx.required {
                    if !requested.contains(&name) {
                        requested.push(name);
                        changed = true;
                    }
                }
            }
            if !changed {
                info!(
                    packages = ?order.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
                    "resolved configuration"
                );
                return Ok(ParserConfiguration::merge(&order));
            }
        }
        Err(Diagnostic::new(ErrorKind::CyclicDependency {
            cycle: format!("init hooks did not settle after {MAX_INIT_ROUNDS} rounds"),
        }))
    }
}

/// Dependency closure of `requested`, ordered with Kahn's algorithm.
fn order(scope: &Scope<'_>, requested: &[String]) -> Result<Vec<Arc<Package>>, Diagnostic> {
    let mut members: KeyMap<String, &Registered> = KeyMap::default();
    let mut stack: Vec<&str> = Vec::new();
    for name in requested {
        let registered = scope.get(name).ok_or_else(|| {
            Diagnostic::new(ErrorKind::UnknownPackage { name: name.clone() })
        })?;
        if members.insert(name.clone(), registered).is_none() {
            stack.push(name);
        }
    }
    while let Some(name) = stack.pop() {
        let current: &Registered = members[name];
        let package = &current.package;
        for dep in &package.depends_on {
            if members.contains_key(dep) {
                continue;
            }
            let registered = scope.get(dep).ok_or_else(|| {
                Diagnostic::new(ErrorKind::UnresolvedDependency {
                    package: package.name.clone(),
                    dependency: dep.clone(),
                })
            })?;
            members.insert(dep.clone(), registered);
            stack.push(dep);
        }
    }

    let mut indegree: KeyMap<&str, usize> = KeyMap::default();
    let mut dependents: KeyMap<&str, Vec<&str>> = KeyMap::default();
    for (name, registered) in &members {
        let deps: KeySet<&str> = registered.package.depends_on.iter().map(String::as_str).collect();
        indegree.insert(name.as_str(), deps.len());
        for dep in deps {
            dependents.entry(dep).or_default().push(name.as_str());
        }
    }

    let key = |name: &str| {
        let registered = members[name];
        Reverse((registered.package.priority, registered.seq, name.to_owned()))
    };
    let mut ready: BinaryHeap<_> = indegree
        .iter()
        .filter(|(_, degree)| **degree == 0)
        .map(|(name, _)| key(name))
        .collect();
    let mut ordered = Vec::with_capacity(members.len());
    while let Some(Reverse((_, _, name))) = ready.pop() {
        for dependent in dependents.get(name.as_str()).into_iter().flatten() {
            if let Some(degree) = indegree.get_mut(dependent) {
                *degree -= 1;
                if *degree == 0 {
                    ready.push(key(dependent));
                }
            }
        }
        ordered.push(Arc::clone(&members[name.as_str()].package));
    }

    if ordered.len() < members.len() {
        let remaining: KeySet<&str> = indegree
            .iter()
            .filter(|(_, degree)| **degree > 0)
            .map(|(name, _)| *name)
            .collect();
        return Err(Diagnostic::new(ErrorKind::CyclicDependency {
            cycle: find_cycle(&members, &remaining),
        }));
    }
    Ok(ordered)
}

/// Follows unresolved dependencies from the smallest remaining name until a
/// package repeats, and renders that loop as `a -> b -> a`.
fn find_cycle(members: &KeyMap<String, &Registered>, remaining: &KeySet<&str>) -> String {
    let Some(&start) = remaining.iter().min() else {
        return String::new();
    };
    let mut path: Vec<&str> = vec![start];
    loop {
        let Some(current) = path.last() else { break };
        let next = members[*current]
            .package
            .depends_on
            .iter()
            .map(String::as_str)
            .filter(|dep| remaining.contains(dep))
            .min();
        let Some(next) = next else { break };
        if let Some(pos) = path.iter().position(|p| *p == next) {
            let mut cycle: Vec<&str> = path[pos..].to_vec();
            cycle.push(next);
            return cycle.join(" -> ");
        }
        path.push(next);
    }
    path.join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ErrorCode;

    fn pkg(name: &str) -> crate::config::PackageBuilder {
        Package::builder(name)
    }

    fn registry(packages: impl IntoIterator<Item = Package>) -> Registry {
        let mut registry = Registry::new();
        registry.register(pkg(BASE_PACKAGE).build());
        for package in packages {
            registry.register(package);
        }
        registry
    }

    #[test]
    fn base_is_always_first() {
        let registry = registry([pkg("a").build()]);
        let config = registry.resolve(&["a"]).unwrap();
        assert_eq!(config.packages(), ["base", "a"]);
    }

    #[test]
    fn dependencies_come_before_dependents() {
        let registry = registry([
            pkg("a").depends_on("b").priority(-5).build(),
            pkg("b").priority(10).build(),
        ]);
        let config = registry.resolve(&["a"]).unwrap();
        assert_eq!(config.packages(), ["base", "b", "a"]);
    }

    #[test]
    fn ties_break_on_priority_then_registration() {
        let registry = registry([
            pkg("late").priority(1).build(),
            pkg("first").build(),
            pkg("second").build(),
        ]);
        let config = registry.resolve(&["late", "second", "first"]).unwrap();
        assert_eq!(config.packages(), ["base", "first", "second", "late"]);
    }

    #[test]
    fn unknown_and_unresolved_are_reported() {
        let registry = registry([pkg("a").depends_on("ghost").build()]);
        let err = registry.resolve(&["nope"]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::UnknownPackage);
        let err = registry.resolve(&["a"]).unwrap_err();
        assert_eq!(
            *err.kind,
            ErrorKind::UnresolvedDependency {
                package: "a".to_owned(),
                dependency: "ghost".to_owned(),
            }
        );
    }

    #[test]
    fn cycles_are_named() {
        let registry = registry([
            pkg("a").depends_on("b").build(),
            pkg("b").depends_on("a").build(),
        ]);
        let err = registry.resolve(&["a"]).unwrap_err();
        assert_eq!(
            *err.kind,
            ErrorKind::CyclicDependency {
                cycle: "a -> b -> a".to_owned(),
            }
        );
    }

    #[test]
    fn duplicate_registration_overrides() {
        let mut registry = registry([pkg("a").priority(1).build()]);
        let diag = registry.register(pkg("a").priority(2).build()).unwrap();
        assert_eq!(diag.code(), ErrorCode::DuplicateOverride);
        assert!(diag.is_recoverable());
        assert_eq!(registry.names().collect::<Vec<_>>(), ["a", "base"]);
    }

    #[test]
    fn init_hooks_register_and_require() {
        fn hook(cx: &mut InitContext) {
            cx.register(Package::builder("extra").build());
            cx.require("extra");
            cx.require("b");
        }
        let registry = registry([pkg("a").init(hook).build(), pkg("b").build()]);
        let config = registry.resolve(&["a"]).unwrap();
        assert_eq!(config.packages(), ["base", "a", "b", "extra"]);
        // The hook's package stays local to that resolution.
        assert!(!registry.contains("extra"));
    }

    #[test]
    fn resolution_is_idempotent() {
        let registry = Registry::with_builtin_packages();
        let first = registry.resolve(&["ams", "newcommand"]).unwrap();
        let second = registry.resolve(&["ams", "newcommand"]).unwrap();
        assert_eq!(format!("{first:?}"), format!("{second:?}"));
    }
}
