//! Registry-backed language vocabulary.
//!
//! Each submodule is a self-contained registry: a stable ID enum plus a
//! `const` metadata table and `from_str`/`as_str`/`info_for` lookups.
//!
//! ## Notes
//! - Lookups are case-sensitive.
//! - Registries are vocabulary only; they never tokenize source text.

pub mod keywords;
pub mod operators;
pub mod punctuation;
