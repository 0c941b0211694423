//! Convention enforcement for grammar files.
//!
//! Checks are independent visitors ([`check::ConventionCheck`]) subscribed to
//! node kinds. The [`dispatcher::CheckDispatcher`] walks each syntax tree once
//! and routes enter/leave events to the subscribed checks; the
//! [`engine::LintEngine`] ties configuration, parsing and dispatch together.
//!
//! Built-in checks:
//! - HeaderCheck: license notice in `@header` actions
//! - OptionsIndentationCheck / TokensIndentationCheck: pair layout
//! - OptionsSpaceCheck / TokensSpaceCheck: spaces around `=`
//! - TokensNamingCheck: upper-case imaginary tokens
//! - TokensOrderCheck: literal tokens first, each group sorted
//! - RuleColonSemicolonCheck: `:` and `;` of a rule on their own lines

pub mod check;
pub mod checks;
pub mod dispatcher;
pub mod engine;
pub mod registry;
pub mod types;
