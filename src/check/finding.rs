use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::validate::ErrorKind;

/// A problem found in one attestation document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    /// Stable identifier, e.g. `subject_required` or `decode_error`.
    pub code: String,
    pub severity: Severity,
    /// Which check produced the finding.
    pub stage: Stage,
    /// Root validation kind, for findings produced by a validator.
    pub kind: Option<ErrorKind>,
    /// Human-readable description.
    pub message: String,
    pub location: Location,
    /// `predicateType` of the statement, when it could be read.
    pub predicate_type: Option<String>,
}

/// Where in the input a finding applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based line for `.jsonl` input.
    pub line: Option<usize>,
    /// Dotted path inside the document, e.g. `predicate.runDetails.builder`.
    pub path: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "info" | "note" => Some(Self::Info),
            "warning" | "warn" => Some(Self::Warning),
            "error" | "err" => Some(Self::Error),
            _ => None,
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Decode,
    Statement,
    Predicate,
    Policy,
    Artifact,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Decode => write!(f, "decode"),
            Self::Statement => write!(f, "statement"),
            Self::Predicate => write!(f, "predicate"),
            Self::Policy => write!(f, "policy"),
            Self::Artifact => write!(f, "artifact"),
        }
    }
}

/// Describes a finding code, for `list-codes` output and SARIF rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeMetadata {
    pub code: String,
    pub description: String,
    pub default_severity: Severity,
}
