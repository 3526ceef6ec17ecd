//! SHA-256 verification of statement subjects against files on disk.

use std::path::{Component, Path};

use crate::digest;
use crate::model::ResourceDescriptor;

/// Outcome of checking one subject against the artifacts directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectCheck {
    Match,
    Mismatch { expected: String, actual: String },
    NotFound,
    /// No `sha256` entry to compare, or no name that resolves inside the
    /// artifacts directory.
    Skipped,
}

/// Resolve `subject.name` under `base_dir` and compare its SHA-256.
pub fn check_subject(subject: &ResourceDescriptor, base_dir: &Path) -> SubjectCheck {
    let Some(expected) = subject.digest.get("sha256") else {
        return SubjectCheck::Skipped;
    };
    if subject.name.is_empty() {
        return SubjectCheck::Skipped;
    }
    if !is_contained(&subject.name) {
        tracing::warn!(name = %subject.name, "subject name escapes the artifacts directory");
        return SubjectCheck::Skipped;
    }

    let path = base_dir.join(&subject.name);
    match digest::sha256_file(&path) {
        Ok(actual) if actual.eq_ignore_ascii_case(expected) => SubjectCheck::Match,
        Ok(actual) => SubjectCheck::Mismatch {
            expected: expected.to_owned(),
            actual,
        },
        Err(e) => {
            tracing::debug!(path = %path.display(), error = %e, "subject artifact unreadable");
            SubjectCheck::NotFound
        }
    }
}

/// Relative paths made only of normal components (and `.`).
fn is_contained(name: &str) -> bool {
    Path::new(name)
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
}
