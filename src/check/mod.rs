pub mod artifacts;
pub mod finding;
pub mod policy;

use std::path::{Path, PathBuf};

use crate::loader::Document;
use crate::model::Statement;
use crate::predicate::{self, PredicateKind, PredicateOutcome};
use crate::validate::{ErrorKind, Validatable, ValidationError};

use artifacts::SubjectCheck;
pub use finding::{CodeMetadata, Finding, Location, Severity, Stage};
use policy::Policy;

pub const DECODE_ERROR: &str = "decode_error";
pub const LEGACY_STATEMENT_TYPE: &str = "legacy_statement_type";
pub const PREDICATE_TYPE_NOT_ALLOWED: &str = "predicate_type_not_allowed";
pub const PREDICATE_DECODE_ERROR: &str = "predicate_decode_error";
pub const PREDICATE_NOT_VALIDATED: &str = "predicate_not_validated";
pub const UNKNOWN_PREDICATE_TYPE: &str = "unknown_predicate_type";
pub const SUBJECT_DIGEST_MISMATCH: &str = "subject_digest_mismatch";
pub const SUBJECT_NOT_FOUND: &str = "subject_not_found";

/// Runs the validation pipeline over loaded documents.
///
/// Per document: statement envelope, then policy on `predicateType`, then
/// the typed predicate, then (optionally) subject digests on disk. A
/// statement that fails envelope validation is not checked further.
pub struct Checker<'a> {
    policy: &'a Policy,
    artifacts_dir: Option<PathBuf>,
}

impl<'a> Checker<'a> {
    pub fn new(policy: &'a Policy) -> Self {
        Self {
            policy,
            artifacts_dir: None,
        }
    }

    /// Also verify subject SHA-256 digests against files under `dir`.
    pub fn with_artifacts(mut self, dir: impl Into<PathBuf>) -> Self {
        self.artifacts_dir = Some(dir.into());
        self
    }

    /// Check every document and collect the raw findings.
    pub fn run(&self, documents: &[Document]) -> Vec<Finding> {
        documents.iter().flat_map(|d| self.check_document(d)).collect()
    }

    pub fn check_document(&self, doc: &Document) -> Vec<Finding> {
        let statement = match &doc.statement {
            Ok(statement) => statement,
            Err(message) => {
                tracing::debug!(document = %doc.display_name(), "statement failed to decode");
                let ctx = FindingContext {
                    doc,
                    predicate_type: None,
                };
                return vec![ctx.finding(
                    DECODE_ERROR,
                    Severity::Error,
                    Stage::Decode,
                    format!("not a decodable statement: {message}"),
                    None,
                )];
            }
        };

        let mut findings = Vec::new();
        let ctx = FindingContext {
            doc,
            predicate_type: (!statement.predicate_type.is_empty())
                .then(|| statement.predicate_type.clone()),
        };

        if let Err(e) = statement.validate() {
            findings.push(ctx.validation(Stage::Statement, &e, None));
            return findings;
        }

        if statement.version().is_some_and(|v| v.is_legacy()) {
            findings.push(ctx.finding(
                LEGACY_STATEMENT_TYPE,
                Severity::Info,
                Stage::Statement,
                format!("statement uses legacy type '{}'", statement.statement_type),
                Some("_type".into()),
            ));
        }

        if !self.policy.allows_predicate_type(&statement.predicate_type) {
            findings.push(ctx.finding(
                PREDICATE_TYPE_NOT_ALLOWED,
                Severity::Error,
                Stage::Policy,
                format!(
                    "predicate type '{}' is not in the allow list",
                    statement.predicate_type
                ),
                Some("predicateType".into()),
            ));
        } else {
            findings.extend(self.check_predicate(&ctx, statement));
        }

        if let Some(dir) = &self.artifacts_dir {
            findings.extend(self.check_subjects(&ctx, statement, dir));
        }

        findings
    }

    fn check_predicate(&self, ctx: &FindingContext<'_>, statement: &Statement) -> Vec<Finding> {
        let kind = PredicateKind::from_type_uri(&statement.predicate_type);
        let Some(payload) = &statement.predicate else {
            return Vec::new();
        };

        tracing::debug!(
            document = %ctx.doc.display_name(),
            predicate = %kind,
            "checking predicate"
        );

        let finding = match predicate::decode_and_validate(kind, payload) {
            PredicateOutcome::Valid => None,
            PredicateOutcome::Invalid(e) => {
                Some(ctx.validation(Stage::Predicate, &e, Some("predicate")))
            }
            PredicateOutcome::Undecodable(message) => Some(ctx.finding(
                PREDICATE_DECODE_ERROR,
                Severity::Error,
                Stage::Predicate,
                format!("predicate is not a valid {kind}: {message}"),
                Some("predicate".into()),
            )),
            PredicateOutcome::NotValidated => Some(ctx.finding(
                PREDICATE_NOT_VALIDATED,
                Severity::Info,
                Stage::Predicate,
                format!("{kind} predicates have no structural validator"),
                Some("predicate".into()),
            )),
            PredicateOutcome::Unknown => Some(ctx.finding(
                UNKNOWN_PREDICATE_TYPE,
                Severity::Info,
                Stage::Predicate,
                format!(
                    "predicate type '{}' is not recognized; payload not checked",
                    statement.predicate_type
                ),
                Some("predicateType".into()),
            )),
        };

        finding.into_iter().collect()
    }

    fn check_subjects(
        &self,
        ctx: &FindingContext<'_>,
        statement: &Statement,
        dir: &Path,
    ) -> Vec<Finding> {
        let mut findings = Vec::new();
        for (i, subject) in statement.subject.iter().enumerate() {
            let path = Some(format!("subject[{i}]"));
            match artifacts::check_subject(subject, dir) {
                SubjectCheck::Match | SubjectCheck::Skipped => {}
                SubjectCheck::Mismatch { expected, actual } => findings.push(ctx.finding(
                    SUBJECT_DIGEST_MISMATCH,
                    Severity::Error,
                    Stage::Artifact,
                    format!(
                        "'{}' has sha256 {actual}, statement claims {expected}",
                        subject.name
                    ),
                    path,
                )),
                SubjectCheck::NotFound => findings.push(ctx.finding(
                    SUBJECT_NOT_FOUND,
                    Severity::Warning,
                    Stage::Artifact,
                    format!("'{}' not found under {}", subject.name, dir.display()),
                    path,
                )),
            }
        }
        findings
    }

    /// Metadata for every code the checker can emit.
    pub fn list_codes() -> Vec<CodeMetadata> {
        let meta = |code: &str, description: &str, default_severity| CodeMetadata {
            code: code.into(),
            description: description.into(),
            default_severity,
        };

        let mut codes: Vec<CodeMetadata> = ErrorKind::ALL
            .iter()
            .map(|k| meta(k.code(), &k.to_string(), Severity::Error))
            .collect();
        codes.extend([
            meta(DECODE_ERROR, "document is not a decodable statement", Severity::Error),
            meta(
                LEGACY_STATEMENT_TYPE,
                "statement uses the legacy envelope type",
                Severity::Info,
            ),
            meta(
                PREDICATE_TYPE_NOT_ALLOWED,
                "predicate type is not in the configured allow list",
                Severity::Error,
            ),
            meta(
                PREDICATE_DECODE_ERROR,
                "predicate payload does not match its declared type",
                Severity::Error,
            ),
            meta(
                PREDICATE_NOT_VALIDATED,
                "predicate type has no structural validator",
                Severity::Info,
            ),
            meta(
                UNKNOWN_PREDICATE_TYPE,
                "predicate type is not recognized",
                Severity::Info,
            ),
            meta(
                SUBJECT_DIGEST_MISMATCH,
                "subject sha256 differs from the artifact on disk",
                Severity::Error,
            ),
            meta(
                SUBJECT_NOT_FOUND,
                "subject artifact missing from the artifacts directory",
                Severity::Warning,
            ),
        ]);
        codes
    }
}

/// Per-document fields shared by every finding.
struct FindingContext<'d> {
    doc: &'d Document,
    predicate_type: Option<String>,
}

impl FindingContext<'_> {
    fn finding(
        &self,
        code: &str,
        severity: Severity,
        stage: Stage,
        message: String,
        path: Option<String>,
    ) -> Finding {
        Finding {
            code: code.into(),
            severity,
            stage,
            kind: None,
            message,
            location: Location {
                file: self.doc.source.clone(),
                line: self.doc.line,
                path,
            },
            predicate_type: self.predicate_type.clone(),
        }
    }

    fn validation(&self, stage: Stage, err: &ValidationError, prefix: Option<&str>) -> Finding {
        let inner = err.path();
        let path = match (prefix, inner.is_empty()) {
            (Some(prefix), true) => Some(prefix.to_owned()),
            (Some(prefix), false) => Some(format!("{prefix}.{inner}")),
            (None, true) => None,
            (None, false) => Some(inner),
        };

        let mut finding = self.finding(
            err.kind().code(),
            Severity::Error,
            stage,
            err.kind().to_string(),
            path,
        );
        finding.kind = Some(err.kind());
        finding
    }
}
