//! RDF term - IRI, blank node, or literal
//!
//! Uses `Arc<str>` throughout to enable cheap clones: terms are copied into
//! binding sets and seen-sets freely during evaluation, and interning keeps
//! that a pointer bump.
//!
//! ## Ordering
//!
//! Terms order as IRI < blank node < literal, then lexically within each
//! kind. The ordering carries no RDF semantics; it exists for deterministic
//! output in sorted collections and tests.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::Arc;

/// Well-known datatype IRI for plain string literals.
pub const XSD_STRING: &str = "http://www.w3.org/2001/XMLSchema#string";

/// Well-known datatype IRI for language-tagged strings.
pub const RDF_LANG_STRING: &str =
    "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";

/// An RDF term.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Term {
    /// An IRI reference.
    Iri(Arc<str>),
    /// A blank node, identified by its label.
    BlankNode(Arc<str>),
    /// A typed (and optionally language-tagged) literal.
    Literal {
        /// The lexical form.
        lexical: Arc<str>,
        /// Datatype IRI.
        datatype: Arc<str>,
        /// Language tag, for language-tagged strings only.
        lang: Option<Arc<str>>,
    },
}

impl Term {
    /// Creates an IRI term.
    pub fn iri(value: impl AsRef<str>) -> Self {
        Term::Iri(Arc::from(value.as_ref()))
    }

    /// Creates a blank node term.
    pub fn bnode(label: impl AsRef<str>) -> Self {
        Term::BlankNode(Arc::from(label.as_ref()))
    }

    /// Creates a plain string literal (`xsd:string`).
    pub fn literal(lexical: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(lexical.as_ref()),
            datatype: Arc::from(XSD_STRING),
            lang: None,
        }
    }

    /// Creates a typed literal.
    pub fn typed_literal(lexical: impl AsRef<str>, datatype: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(lexical.as_ref()),
            datatype: Arc::from(datatype.as_ref()),
            lang: None,
        }
    }

    /// Creates a language-tagged string literal.
    pub fn lang_string(lexical: impl AsRef<str>, lang: impl AsRef<str>) -> Self {
        Term::Literal {
            lexical: Arc::from(lexical.as_ref()),
            datatype: Arc::from(RDF_LANG_STRING),
            lang: Some(Arc::from(lang.as_ref())),
        }
    }

    /// Whether this term is an IRI.
    pub fn is_iri(&self) -> bool {
        matches!(self, Term::Iri(_))
    }

    /// Whether this term is a literal.
    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal { .. })
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{iri}>"),
            Term::BlankNode(label) => write!(f, "_:{label}"),
            Term::Literal {
                lexical,
                datatype,
                lang,
            } => match lang {
                Some(lang) => write!(f, "\"{lexical}\"@{lang}"),
                None if datatype.as_ref() == XSD_STRING => write!(f, "\"{lexical}\""),
                None => write!(f, "\"{lexical}\"^^<{datatype}>"),
            },
        }
    }
}

// === Serde: serialize through owned strings, re-intern on deserialize ===

#[derive(Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum TermRepr {
    Iri {
        value: String,
    },
    BlankNode {
        label: String,
    },
    Literal {
        lexical: String,
        datatype: String,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        lang: Option<String>,
    },
}

impl Serialize for Term {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let repr = match self {
            Term::Iri(iri) => TermRepr::Iri {
                value: iri.to_string(),
            },
            Term::BlankNode(label) => TermRepr::BlankNode {
                label: label.to_string(),
            },
            Term::Literal {
                lexical,
                datatype,
                lang,
            } => TermRepr::Literal {
                lexical: lexical.to_string(),
                datatype: datatype.to_string(),
                lang: lang.as_ref().map(|l| l.to_string()),
            },
        };
        repr.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Term {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let repr = TermRepr::deserialize(deserializer)?;
        Ok(match repr {
            TermRepr::Iri { value } => Term::Iri(Arc::from(value)),
            TermRepr::BlankNode { label } => Term::BlankNode(Arc::from(label)),
            TermRepr::Literal {
                lexical,
                datatype,
                lang,
            } => Term::Literal {
                lexical: Arc::from(lexical),
                datatype: Arc::from(datatype),
                lang: lang.map(Arc::from),
            },
        })
    }
}
