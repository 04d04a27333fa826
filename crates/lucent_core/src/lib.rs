//! Shared language vocabulary for the Lucent compiler and tooling.
//!
//! This crate is intentionally dependency-free: it holds the registry-first
//! vocabulary tables (keywords, operators, punctuation) that the lexer,
//! parser, and printer all key off. Enforcement of syntax rules lives in
//! `lucent_syntax`; this crate only answers "what is this spelling, and what
//! are its properties".

pub mod lang;
