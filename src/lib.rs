//! attestguard: structural validator for in-toto attestations.
//!
//! Validates the Statement envelope, SLSA v1 provenance and SCAI attribute
//! report predicates, and the ResourceDescriptors and DigestSets they embed.
//! Every failure carries a comparable [`validate::ErrorKind`] plus the path
//! to the offending element.
//!
//! # Quick Start
//!
//! ```
//! use attestguard::model::Statement;
//! use attestguard::validate::{ErrorKind, Validatable};
//!
//! let json = r#"{"_type":"https://in-toto.io/Statement/v1","subject":[],"predicateType":"p","predicate":{}}"#;
//! let statement = Statement::from_json(json).unwrap();
//! let err = statement.validate().unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::SubjectRequired);
//! ```
//!
//! For whole files or directories use [`check`], which also dispatches the
//! predicate by `predicateType` and applies the configured policy.

pub mod check;
pub mod config;
pub mod digest;
pub mod error;
pub mod loader;
pub mod model;
pub mod output;
pub mod predicate;
pub mod validate;

use std::path::{Path, PathBuf};

use check::policy::PolicyVerdict;
use check::{Checker, Finding};
use config::{Config, CONFIG_FILE_NAME};
use error::Result;
use output::OutputFormat;

/// Options for a check invocation. Rendering is separate; see
/// [`render_report`].
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// Path to config file (defaults to `.attestguard.toml` next to the input).
    pub config_path: Option<PathBuf>,
    /// CLI override for fail_on threshold.
    pub fail_on_override: Option<check::Severity>,
    /// Directory holding the subject artifacts, for digest verification.
    pub artifacts_dir: Option<PathBuf>,
}

/// Complete check report.
#[derive(Debug)]
pub struct CheckReport {
    pub target_name: String,
    pub documents: usize,
    pub findings: Vec<Finding>,
    pub verdict: PolicyVerdict,
}

/// Run a complete check: load documents, validate, evaluate policy.
pub fn check(path: &Path, options: &CheckOptions) -> Result<CheckReport> {
    let config_path = options.config_path.clone().unwrap_or_else(|| {
        let dir = if path.is_dir() {
            path
        } else {
            path.parent().unwrap_or(Path::new("."))
        };
        dir.join(CONFIG_FILE_NAME)
    });
    let mut config = Config::load(&config_path)?;

    if let Some(fail_on) = options.fail_on_override {
        config.policy.fail_on = fail_on;
    }

    let documents = loader::load(path)?;
    tracing::info!(
        path = %path.display(),
        documents = documents.len(),
        "checking attestations"
    );

    let mut checker = Checker::new(&config.policy);
    if let Some(dir) = &options.artifacts_dir {
        checker = checker.with_artifacts(dir);
    }
    let all_findings = checker.run(&documents);

    let effective_findings = config.policy.apply(&all_findings);
    let verdict = config.policy.evaluate(&all_findings);

    let target_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "unknown".into());

    Ok(CheckReport {
        target_name,
        documents: documents.len(),
        findings: effective_findings,
        verdict,
    })
}

/// Render a check report in the specified format.
pub fn render_report(report: &CheckReport, format: OutputFormat) -> Result<String> {
    output::render(
        &report.findings,
        &report.verdict,
        report.documents,
        format,
        &report.target_name,
    )
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::validate::ErrorKind;
    use std::path::Path;

    fn fixture(name: &str) -> PathBuf {
        Path::new("tests/fixtures").join(name)
    }

    #[test]
    fn valid_provenance_passes() {
        let report = check(&fixture("valid/provenance.json"), &CheckOptions::default()).unwrap();
        assert_eq!(report.documents, 1);
        assert!(report.findings.is_empty(), "{:?}", report.findings);
        assert!(report.verdict.pass);
    }

    #[test]
    fn valid_directory_passes() {
        let report = check(&fixture("valid"), &CheckOptions::default()).unwrap();
        assert_eq!(report.documents, 4);
        assert!(report.verdict.pass);
        assert!(report
            .findings
            .iter()
            .all(|f| f.severity == check::Severity::Info));
    }

    #[test]
    fn builder_id_missing_detected() {
        let report = check(
            &fixture("invalid/provenance_no_builder_id.json"),
            &CheckOptions::default(),
        )
        .unwrap();
        assert!(report
            .findings
            .iter()
            .any(|f| f.kind == Some(ErrorKind::BuilderIdRequired)));
        assert!(!report.verdict.pass);
    }

    #[test]
    fn subject_without_digest_detected() {
        let report = check(
            &fixture("invalid/subject_no_digest.json"),
            &CheckOptions::default(),
        )
        .unwrap();
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].kind, Some(ErrorKind::DigestRequired));
        assert!(!report.verdict.pass);
    }

    #[test]
    fn jsonl_bundle_reports_each_line() {
        let report = check(&fixture("invalid/bundle.jsonl"), &CheckOptions::default()).unwrap();
        assert_eq!(report.documents, 3);
        let lines: Vec<Option<usize>> = report
            .findings
            .iter()
            .map(|f| f.location.line)
            .collect();
        assert_eq!(lines, vec![Some(2), Some(3)]);
        assert_eq!(report.findings[0].code, "decode_error");
        assert_eq!(
            report.findings[1].kind,
            Some(ErrorKind::AtLeastOneAssertionRequired)
        );
    }

    #[test]
    fn fail_on_override_relaxes_verdict() {
        let options = CheckOptions {
            fail_on_override: Some(check::Severity::Error),
            ..Default::default()
        };
        let report = check(&fixture("valid/legacy.json"), &options).unwrap();
        assert!(report.verdict.pass);

        let strict = CheckOptions {
            fail_on_override: Some(check::Severity::Info),
            ..Default::default()
        };
        let report = check(&fixture("valid/legacy.json"), &strict).unwrap();
        assert!(!report.verdict.pass);
    }

    #[test]
    fn undecodable_file_does_not_abort_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::copy(fixture("valid/provenance.json"), dir.path().join("a.json")).unwrap();
        std::fs::write(dir.path().join("b.json"), b"\xff\xfe").unwrap();

        let report = check(dir.path(), &CheckOptions::default()).unwrap();
        assert_eq!(report.documents, 2);
        assert_eq!(report.findings.len(), 1);
        assert_eq!(report.findings[0].code, check::DECODE_ERROR);
        assert!(report.findings[0].location.file.ends_with("b.json"));
        assert!(!report.verdict.pass);
    }

    #[test]
    fn renders_every_format() {
        let report = check(&fixture("invalid"), &CheckOptions::default()).unwrap();
        for format in [OutputFormat::Console, OutputFormat::Json, OutputFormat::Sarif] {
            let rendered = render_report(&report, format).unwrap();
            assert!(!rendered.is_empty());
        }
    }
}
