//! Binding sets - variable-to-term mappings
//!
//! A `BindingSet` is one solution row: an immutable-per-step mapping from
//! variable name to bound term. Operators never mutate a binding set they
//! received; they build extended or projected copies.
//!
//! # Invariants
//!
//! - Variable names are unique within one binding set (map semantics)
//! - `Eq`/`Hash` are structural, so rows can flow into a duplicate-
//!   suppression seen-set unchanged

use karst_db_core::Term;
use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

/// A mapping from variable name to bound term.
///
/// Backed by a `BTreeMap` so iteration order (and therefore `Eq`/`Hash`)
/// is deterministic regardless of insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingSet {
    bindings: BTreeMap<Arc<str>, Term>,
}

impl BindingSet {
    /// Creates an empty binding set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns an extended copy with `name` bound to `term`.
    ///
    /// Rebinding an already-bound name replaces the previous value; the
    /// operators in this workspace never do that, but the map semantics
    /// keep names unique either way.
    pub fn with(mut self, name: impl Into<Arc<str>>, term: Term) -> Self {
        self.bindings.insert(name.into(), term);
        self
    }

    /// The term bound to `name`, if any.
    pub fn get(&self, name: &str) -> Option<&Term> {
        self.bindings.get(name)
    }

    /// Whether `name` is bound.
    pub fn is_bound(&self, name: &str) -> bool {
        self.bindings.contains_key(name)
    }

    /// The bound variable names, in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.bindings.keys().map(|k| k.as_ref())
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether no variable is bound.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Returns a copy restricted to the names in `scope`.
    ///
    /// This is how a filter gets its scoped view: variables bound only as
    /// artifacts of evaluation order are projected away before the filter
    /// sees the row.
    pub fn retained(&self, scope: &HashSet<Arc<str>>) -> BindingSet {
        BindingSet {
            bindings: self
                .bindings
                .iter()
                .filter(|(name, _)| scope.contains(name.as_ref()))
                .map(|(name, term)| (name.clone(), term.clone()))
                .collect(),
        }
    }
}

impl FromIterator<(Arc<str>, Term)> for BindingSet {
    fn from_iter<T: IntoIterator<Item = (Arc<str>, Term)>>(iter: T) -> Self {
        BindingSet {
            bindings: iter.into_iter().collect(),
        }
    }
}
