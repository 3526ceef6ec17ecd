//! Predicate dispatch: pick the typed predicate named by `predicateType`,
//! decode the opaque payload into it, and run its validator.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{AttributeReport, Provenance, TestResult};
use crate::validate::{Validatable, ValidationError};

/// Predicate schemas this crate knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredicateKind {
    Provenance,
    AttributeReport,
    TestResult,
    Unknown,
}

impl PredicateKind {
    pub fn from_type_uri(uri: &str) -> Self {
        match uri {
            Provenance::PREDICATE_TYPE => Self::Provenance,
            AttributeReport::PREDICATE_TYPE => Self::AttributeReport,
            TestResult::PREDICATE_TYPE => Self::TestResult,
            _ => Self::Unknown,
        }
    }

    /// Whether a structural validator exists for this kind.
    pub fn has_validator(self) -> bool {
        matches!(self, Self::Provenance | Self::AttributeReport)
    }
}

impl std::fmt::Display for PredicateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Provenance => write!(f, "SLSA Provenance"),
            Self::AttributeReport => write!(f, "SCAI Attribute Report"),
            Self::TestResult => write!(f, "Test Result"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// Result of decoding and validating one predicate payload.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateOutcome {
    Valid,
    Invalid(ValidationError),
    /// The payload does not have the shape of the declared predicate type.
    Undecodable(String),
    /// Decoded, but the kind has no structural validator.
    NotValidated,
    Unknown,
}

/// Decode `payload` as `T` and validate it.
pub fn validate_as<T>(payload: &Value) -> PredicateOutcome
where
    T: DeserializeOwned + Validatable,
{
    match T::deserialize(payload) {
        Ok(predicate) => match predicate.validate() {
            Ok(()) => PredicateOutcome::Valid,
            Err(e) => PredicateOutcome::Invalid(e),
        },
        Err(e) => PredicateOutcome::Undecodable(e.to_string()),
    }
}

/// Dispatch on `kind` and check `payload` accordingly.
pub fn decode_and_validate(kind: PredicateKind, payload: &Value) -> PredicateOutcome {
    match kind {
        PredicateKind::Provenance => validate_as::<Provenance>(payload),
        PredicateKind::AttributeReport => validate_as::<AttributeReport>(payload),
        PredicateKind::TestResult => match TestResult::deserialize(payload) {
            Ok(_) => PredicateOutcome::NotValidated,
            Err(e) => PredicateOutcome::Undecodable(e.to_string()),
        },
        PredicateKind::Unknown => PredicateOutcome::Unknown,
    }
}
