//! in-toto attestation Statement (the envelope layer).
//!
//! See: <https://github.com/in-toto/attestation/blob/main/spec/v1/statement.md>

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ResourceDescriptor;

/// An in-toto attestation statement binding subjects to a typed predicate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    /// Envelope schema URI; see [`StatementVersion`].
    #[serde(rename = "_type", default)]
    pub statement_type: String,
    /// Artifacts the predicate is about. Order is kept for serialization only.
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub subject: Vec<ResourceDescriptor>,
    /// URI naming the schema `predicate` conforms to.
    #[serde(rename = "predicateType", default)]
    pub predicate_type: String,
    /// Opaque predicate payload, decoded by the caller according to
    /// `predicate_type`. JSON `null` decodes as absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub predicate: Option<Value>,
}

impl Statement {
    /// Build a current-version statement.
    pub fn new(
        subject: Vec<ResourceDescriptor>,
        predicate_type: impl Into<String>,
        predicate: Value,
    ) -> Self {
        Self {
            statement_type: StatementVersion::V1.type_uri().to_owned(),
            subject,
            predicate_type: predicate_type.into(),
            predicate: Some(predicate),
        }
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Envelope version named by `_type`, if it is one this crate accepts.
    pub fn version(&self) -> Option<StatementVersion> {
        StatementVersion::from_type_uri(&self.statement_type)
    }
}

/// Envelope versions accepted by the statement validator.
///
/// The window is exactly the current major version plus one legacy one.
/// Identifiers are compared as whole strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatementVersion {
    /// `https://in-toto.io/Statement/v1`
    V1,
    /// `https://in-toto.io/Statement/v0.1`
    Legacy,
}

impl StatementVersion {
    pub const V1_URI: &'static str = "https://in-toto.io/Statement/v1";
    pub const LEGACY_URI: &'static str = "https://in-toto.io/Statement/v0.1";

    pub fn from_type_uri(uri: &str) -> Option<Self> {
        match uri {
            Self::V1_URI => Some(Self::V1),
            Self::LEGACY_URI => Some(Self::Legacy),
            _ => None,
        }
    }

    pub fn type_uri(self) -> &'static str {
        match self {
            Self::V1 => Self::V1_URI,
            Self::Legacy => Self::LEGACY_URI,
        }
    }

    pub fn is_legacy(self) -> bool {
        self == Self::Legacy
    }
}
