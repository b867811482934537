//! # Karst DB Core
//!
//! Core RDF model types shared across the Karst DB crates.
//!
//! This crate provides:
//! - `Term`: an RDF term (IRI, blank node, or literal) with cheap clones
//! - `Statement`: a subject/predicate/object tuple with optional context
//! - The `Error` type leaf storage scans declare as their failure kind
//!
//! The iteration and query layers treat these types as opaque values with
//! identity and equality; interpretation (datatype coercion, inference)
//! belongs to higher layers.

pub mod error;
pub mod statement;
pub mod term;

pub use error::{Error, Result};
pub use statement::Statement;
pub use term::Term;
