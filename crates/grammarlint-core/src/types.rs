use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A convention violation reported by a check: a source line and a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn new(line: u32, message: impl Into<String>) -> Self {
        Self {
            line,
            message: message.into(),
        }
    }
}

/// How a check's diagnostics are classified in the final report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    #[default]
    Warning,
    Info,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Setup-time failures. All of them are fatal and surface before any file is processed.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration for {check}: {reason}")]
    InvalidConfiguration { check: String, reason: String },

    #[error("unknown node kind \"{0}\"")]
    UnknownKind(String),

    #[error("unknown check \"{0}\"")]
    UnknownCheck(String),

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid ignore pattern \"{pattern}\": {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

impl ConfigError {
    pub fn invalid(check: &str, reason: impl Into<String>) -> Self {
        ConfigError::InvalidConfiguration {
            check: check.to_string(),
            reason: reason.into(),
        }
    }
}
