//! Configuration file loading for grammarlint.
//!
//! Reads `grammarlint.json` and provides typed access to the configured checks.
//! Falls back to the built-in defaults when the config file is missing; a file
//! that exists but cannot be parsed is an error.

use std::path::{Path, PathBuf};

use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::types::{ConfigError, Severity};

pub const CONFIG_FILE_NAME: &str = "grammarlint.json";

/// Top-level grammarlint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LintConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default = "default_checks")]
    pub checks: Vec<CheckConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ignore_patterns: Vec<String>,
}

/// Configuration of one check instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckConfig {
    pub name: String,
    /// Explicit node-kind subscription; `None` uses the check's defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokens: Option<Vec<String>>,
    #[serde(default)]
    pub severity: Severity,
    /// HeaderCheck only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_file: Option<String>,
    /// OptionsSpaceCheck / TokensSpaceCheck only.
    #[serde(default = "default_true")]
    pub with_spaces_around_equal: bool,
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    "0.1.0".to_string()
}

fn default_checks() -> Vec<CheckConfig> {
    [
        "OptionsIndentationCheck",
        "OptionsSpaceCheck",
        "TokensIndentationCheck",
        "TokensSpaceCheck",
        "TokensNamingCheck",
        "TokensOrderCheck",
        "RuleColonSemicolonCheck",
    ]
    .iter()
    .map(|name| CheckConfig::named(name))
    .collect()
}

impl CheckConfig {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tokens: None,
            severity: Severity::default(),
            header_file: None,
            with_spaces_around_equal: true,
        }
    }
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            checks: default_checks(),
            ignore_patterns: vec![],
        }
    }
}

impl LintConfig {
    /// Load `grammarlint.json` from the given directory.
    /// Returns defaults if the file doesn't exist.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_file(&path)
    }

    /// Load an explicit configuration file.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    /// Compile `ignorePatterns` into a matcher for project-relative paths.
    pub fn ignore_matcher(&self) -> Result<GlobSet, ConfigError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore_patterns {
            let glob = Glob::new(pattern).map_err(|source| ConfigError::Pattern {
                pattern: pattern.clone(),
                source,
            })?;
            builder.add(glob);
        }
        builder.build().map_err(|source| ConfigError::Pattern {
            pattern: self.ignore_patterns.join(", "),
            source,
        })
    }
}

/// Resolve a configured path against the directory of the config file.
pub fn resolve_path(base_dir: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base_dir.join(path)
    }
}
