use std::fmt;

use serde::{Deserialize, Serialize};

/// Root cause of a structural validation failure.
///
/// Callers branch on the kind, never on the rendered message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error,
)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    // ResourceDescriptor
    #[error("at least one of name, URI, or digest is required")]
    RequiredFieldMissing,
    #[error("digest is not a valid hex-encoded string")]
    InvalidDigestEncoding,
    #[error("digest has incorrect length")]
    IncorrectDigestLength,

    // Statement
    #[error("wrong statement type")]
    InvalidStatementType,
    #[error("at least one subject is required")]
    SubjectRequired,
    #[error("at least one digest is required")]
    DigestRequired,
    #[error("predicate type is required")]
    PredicateTypeRequired,
    #[error("predicate object is required")]
    PredicateRequired,

    // Provenance
    #[error("buildDefinition is required")]
    BuildDefinitionRequired,
    #[error("buildDefinition.buildType is required")]
    BuildTypeRequired,
    #[error("buildDefinition.externalParameters is required")]
    ExternalParametersRequired,
    #[error("runDetails is required")]
    RunDetailsRequired,
    #[error("runDetails.builder is required")]
    BuilderRequired,
    #[error("builder.id is required")]
    BuilderIdRequired,

    // SCAI
    #[error("the attribute field is required")]
    AttributeRequired,
    #[error("at least one attribute assertion is required")]
    AtLeastOneAssertionRequired,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 16] = [
        Self::RequiredFieldMissing,
        Self::InvalidDigestEncoding,
        Self::IncorrectDigestLength,
        Self::InvalidStatementType,
        Self::SubjectRequired,
        Self::DigestRequired,
        Self::PredicateTypeRequired,
        Self::PredicateRequired,
        Self::BuildDefinitionRequired,
        Self::BuildTypeRequired,
        Self::ExternalParametersRequired,
        Self::RunDetailsRequired,
        Self::BuilderRequired,
        Self::BuilderIdRequired,
        Self::AttributeRequired,
        Self::AtLeastOneAssertionRequired,
    ];

    /// Stable snake_case identifier, used as the finding code.
    pub fn code(self) -> &'static str {
        match self {
            Self::RequiredFieldMissing => "required_field_missing",
            Self::InvalidDigestEncoding => "invalid_digest_encoding",
            Self::IncorrectDigestLength => "incorrect_digest_length",
            Self::InvalidStatementType => "invalid_statement_type",
            Self::SubjectRequired => "subject_required",
            Self::DigestRequired => "digest_required",
            Self::PredicateTypeRequired => "predicate_type_required",
            Self::PredicateRequired => "predicate_required",
            Self::BuildDefinitionRequired => "build_definition_required",
            Self::BuildTypeRequired => "build_type_required",
            Self::ExternalParametersRequired => "external_parameters_required",
            Self::RunDetailsRequired => "run_details_required",
            Self::BuilderRequired => "builder_required",
            Self::BuilderIdRequired => "builder_id_required",
            Self::AttributeRequired => "attribute_required",
            Self::AtLeastOneAssertionRequired => "at_least_one_assertion_required",
        }
    }
}

/// One layer of positional context wrapped around a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Context {
    /// A named sub-message, e.g. `buildDefinition`.
    Field { name: &'static str },
    /// An element of a repeated field, e.g. `subject[2]`.
    Index { field: &'static str, index: usize },
    /// The digest entry that failed.
    Digest { algorithm: String },
}

impl fmt::Display for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field { name } => write!(f, "{name}"),
            Self::Index { field, index } => write!(f, "{field}[{index}]"),
            Self::Digest { algorithm } => write!(f, "digest[{algorithm}]"),
        }
    }
}

/// A validation failure: a root [`ErrorKind`] plus the path that led to it.
///
/// Context is stored outermost first, so a bad dependency digest inside a
/// provenance renders as
/// `buildDefinition.resolvedDependencies[1].digest[sha256]: digest has incorrect length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    kind: ErrorKind,
    context: Vec<Context>,
}

impl ValidationError {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: Vec::new(),
        }
    }

    /// The root kind, however deeply the error has been wrapped.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn is(&self, kind: ErrorKind) -> bool {
        self.kind == kind
    }

    /// Context layers, outermost first.
    pub fn context(&self) -> &[Context] {
        &self.context
    }

    /// Dotted path to the failing element, empty for top-level failures.
    pub fn path(&self) -> String {
        self.context
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }

    /// Wrap with an outer context layer.
    pub fn within(mut self, context: Context) -> Self {
        self.context.insert(0, context);
        self
    }

    pub fn in_field(self, name: &'static str) -> Self {
        self.within(Context::Field { name })
    }

    pub fn at_index(self, field: &'static str, index: usize) -> Self {
        self.within(Context::Index { field, index })
    }
}

impl From<ErrorKind> for ValidationError {
    fn from(kind: ErrorKind) -> Self {
        Self::new(kind)
    }
}

impl PartialEq<ErrorKind> for ValidationError {
    fn eq(&self, other: &ErrorKind) -> bool {
        self.kind == *other
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}: {}", self.path(), self.kind)
        }
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_wrapping() {
        let err = ValidationError::new(ErrorKind::InvalidDigestEncoding)
            .within(Context::Digest {
                algorithm: "sha256".into(),
            })
            .at_index("resolvedDependencies", 3)
            .in_field("buildDefinition");
        assert_eq!(err.kind(), ErrorKind::InvalidDigestEncoding);
        assert!(err.is(ErrorKind::InvalidDigestEncoding));
        assert_eq!(err, ErrorKind::InvalidDigestEncoding);
        assert_eq!(err.context().len(), 3);
    }

    #[test]
    fn display_renders_path() {
        let err = ValidationError::new(ErrorKind::RequiredFieldMissing).at_index("subject", 0);
        assert_eq!(
            err.to_string(),
            "subject[0]: at least one of name, URI, or digest is required"
        );
    }

    #[test]
    fn display_without_context() {
        let err = ValidationError::from(ErrorKind::SubjectRequired);
        assert_eq!(err.path(), "");
        assert_eq!(err.to_string(), "at least one subject is required");
    }

    #[test]
    fn code_matches_serde_name() {
        let json = serde_json::to_string(&ErrorKind::AtLeastOneAssertionRequired).unwrap();
        assert_eq!(json, "\"at_least_one_assertion_required\"");
        assert_eq!(
            ErrorKind::AtLeastOneAssertionRequired.code(),
            "at_least_one_assertion_required"
        );
    }
}
