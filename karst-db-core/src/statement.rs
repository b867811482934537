//! Statement - a single fact
//!
//! A statement is a subject/predicate/object tuple, optionally carrying the
//! context (named graph) it was asserted in. The execution layers treat
//! statements as opaque values: identity and equality are all they need.

use crate::term::Term;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A subject/predicate/object(/context) tuple.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Statement {
    /// Subject (who/what the fact is about).
    pub subject: Term,
    /// Predicate (the property or relationship).
    pub predicate: Term,
    /// Object (the value).
    pub object: Term,
    /// Context (named graph); `None` means the default graph.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub context: Option<Term>,
}

impl Statement {
    /// Creates a statement in the default graph.
    pub fn new(subject: Term, predicate: Term, object: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context: None,
        }
    }

    /// Creates a statement in a named graph.
    pub fn with_context(subject: Term, predicate: Term, object: Term, context: Term) -> Self {
        Self {
            subject,
            predicate,
            object,
            context: Some(context),
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.context {
            Some(context) => write!(
                f,
                "{} {} {} {} .",
                self.subject, self.predicate, self.object, context
            ),
            None => write!(f, "{} {} {} .", self.subject, self.predicate, self.object),
        }
    }
}
