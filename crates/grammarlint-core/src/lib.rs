//! Core types, syntax tree model, and configuration for grammarlint.
//!
//! This crate provides the foundational data structures used across all grammarlint crates:
//! - [`kinds`]: The closed set of grammar node kinds and their name/id registry
//! - [`syntax`]: Arena-backed syntax tree with parent back-references and the token stream
//! - [`types`]: Diagnostics, severities, and configuration errors
//! - [`config`]: Configuration loading from `grammarlint.json`

pub mod config;
pub mod kinds;
pub mod syntax;
pub mod types;
