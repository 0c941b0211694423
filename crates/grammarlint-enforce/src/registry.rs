//! Built-in check factory.

use std::path::Path;

use grammarlint_core::config::{resolve_path, CheckConfig};
use grammarlint_core::types::ConfigError;

use crate::check::ConventionCheck;
use crate::checks::{
    HeaderCheck, IndentationCheck, RuleColonSemicolonCheck, SpaceCheck, TokensNamingCheck,
    TokensOrderCheck,
};

/// Names accepted in the `checks` list of `grammarlint.json`.
pub const BUILTIN_CHECKS: [&str; 8] = [
    "HeaderCheck",
    "OptionsIndentationCheck",
    "TokensIndentationCheck",
    "OptionsSpaceCheck",
    "TokensSpaceCheck",
    "TokensNamingCheck",
    "TokensOrderCheck",
    "RuleColonSemicolonCheck",
];

/// Build the (uninitialised) check named by `config`.
///
/// Relative `headerFile` paths are resolved against `base_dir`.
pub fn create_check(
    config: &CheckConfig,
    base_dir: &Path,
) -> Result<Box<dyn ConventionCheck>, ConfigError> {
    let check: Box<dyn ConventionCheck> = match config.name.as_str() {
        "HeaderCheck" => {
            let header_file = config
                .header_file
                .as_deref()
                .filter(|f| !f.trim().is_empty())
                .map(|f| resolve_path(base_dir, f));
            Box::new(HeaderCheck::new(header_file))
        }
        "OptionsIndentationCheck" => Box::new(IndentationCheck::options()),
        "TokensIndentationCheck" => Box::new(IndentationCheck::tokens()),
        "OptionsSpaceCheck" => Box::new(SpaceCheck::options(config.with_spaces_around_equal)),
        "TokensSpaceCheck" => Box::new(SpaceCheck::tokens(config.with_spaces_around_equal)),
        "TokensNamingCheck" => Box::new(TokensNamingCheck),
        "TokensOrderCheck" => Box::new(TokensOrderCheck),
        "RuleColonSemicolonCheck" => Box::new(RuleColonSemicolonCheck),
        other => return Err(ConfigError::UnknownCheck(other.to_string())),
    };
    Ok(check)
}
