//! Scoped definitions with TeX begin/end group semantics.
//!
//! A [`Namespace`] holds the user macros defined while parsing one
//! expression (`\newcommand`, `\def`). Local definitions are undone when the
//! enclosing group ends; global ones survive every group.

use rapidhash::{RapidHashMap, RapidHashSet};

use crate::types::{Diagnostic, ErrorKind};

/// Make it easier to switch between different hash backends.
pub type KeyMap<K, V> = RapidHashMap<K, V>;
/// Alias for the default hash set.
pub type KeySet<K> = RapidHashSet<K>;

/// Name table with an undo stack per open group.
///
/// - `get` and local `set` are O(1)
/// - global `set` is O(depth), where depth is the group nesting level
#[derive(Debug, Clone)]
pub struct Namespace<V: Clone> {
    current: KeyMap<String, V>,
    /// Previous value of each name changed inside a group (`None` means the
    /// name was undefined), restored when the group ends.
    undef_stack: Vec<KeyMap<String, Option<V>>>,
}

impl<V: Clone> Default for Namespace<V> {
    fn default() -> Self {
        Self {
            current: KeyMap::default(),
            undef_stack: Vec::new(),
        }
    }
}

impl<V: Clone> Namespace<V> {
    /// Starts a new nested group.
    pub fn begin_group(&mut self) {
        self.undef_stack.push(KeyMap::default());
    }

    fn restore_changes(&mut self, undefs: KeyMap<String, Option<V>>) {
        for (name, previous) in undefs {
            match previous {
                Some(v) => {
                    self.current.insert(name, v);
                }
                None => {
                    self.current.remove(&name);
                }
            }
        }
    }

    /// Ends the innermost group, restoring values from before it began.
    pub fn end_group(&mut self) -> Result<(), Diagnostic> {
        let undefs = self
            .undef_stack
            .pop()
            .ok_or_else(|| Diagnostic::new(ErrorKind::ExtraCloseBrace))?;
        self.restore_changes(undefs);
        Ok(())
    }

    /// Ends every open group; returns how many were closed.
    pub fn end_groups(&mut self) -> usize {
        let mut count = 0;
        while let Some(undefs) = self.undef_stack.pop() {
            self.restore_changes(undefs);
            count += 1;
        }
        count
    }

    /// Current nesting depth.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.undef_stack.len()
    }

    /// Whether `name` currently has a definition.
    #[must_use]
    pub fn has(&self, name: &str) -> bool {
        self.current.contains_key(name)
    }

    /// Current value of `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&V> {
        self.current.get(name)
    }

    /// Sets (or with `None`, deletes) `name`, locally or globally.
    pub fn set(&mut self, name: &str, value: Option<V>, global: bool) {
        if global {
            // Equivalent to setting in every group: drop scheduled undos and
            // remember the new value in case it is later reset locally.
            for level in &mut self.undef_stack {
                level.remove(name);
            }
            if let Some(top) = self.undef_stack.last_mut() {
                top.insert(name.to_owned(), value.clone());
            }
        } else if let Some(top) = self.undef_stack.last_mut()
            && !top.contains_key(name)
        {
            let prev = self.current.get(name).cloned();
            top.insert(name.to_owned(), prev);
        }

        match value {
            Some(v) => {
                self.current.insert(name.to_owned(), v);
            }
            None => {
                self.current.remove(name);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_definitions_end_with_group() {
        let mut ns: Namespace<u32> = Namespace::default();
        ns.set("a", Some(1), false);
        ns.begin_group();
        ns.set("a", Some(2), false);
        ns.set("b", Some(3), false);
        assert_eq!(ns.get("a"), Some(&2));
        ns.end_group().unwrap();
        assert_eq!(ns.get("a"), Some(&1));
        assert!(!ns.has("b"));
    }

    #[test]
    fn global_definitions_survive_groups() {
        let mut ns: Namespace<u32> = Namespace::default();
        ns.begin_group();
        ns.begin_group();
        ns.set("g", Some(7), true);
        assert_eq!(ns.end_groups(), 2);
        assert_eq!(ns.get("g"), Some(&7));
    }

    #[test]
    fn unbalanced_end_group_is_reported() {
        let mut ns: Namespace<u32> = Namespace::default();
        let err = ns.end_group().unwrap_err();
        assert_eq!(err.code(), crate::types::ErrorCode::ExtraCloseBrace);
    }
}
