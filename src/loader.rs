//! Loads attestation statements from disk.
//!
//! `.jsonl` files hold one statement per line; any other file holds a single
//! JSON statement. Directories are walked recursively for `.json` and
//! `.jsonl` files. A document that fails to decode is still returned so the
//! checker can report it alongside the others.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{GuardError, Result};
use crate::model::Statement;

/// One statement read from disk, or the reason it could not be decoded.
#[derive(Debug, Clone)]
pub struct Document {
    pub source: PathBuf,
    /// 1-based line for `.jsonl` input.
    pub line: Option<usize>,
    pub statement: std::result::Result<Statement, String>,
}

impl Document {
    /// `file` or `file:line`, for messages.
    pub fn display_name(&self) -> String {
        match self.line {
            Some(line) => format!("{}:{}", self.source.display(), line),
            None => self.source.display().to_string(),
        }
    }
}

/// Load every document under `path`.
pub fn load(path: &Path) -> Result<Vec<Document>> {
    if path.is_dir() {
        let mut documents = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && has_statement_extension(entry.path()) {
                documents.extend(load_file(entry.path())?);
            }
        }
        if documents.is_empty() {
            return Err(GuardError::NoDocuments(path.display().to_string()));
        }
        Ok(documents)
    } else {
        load_file(path)
    }
}

/// Load the document(s) in a single file.
pub fn load_file(path: &Path) -> Result<Vec<Document>> {
    let bytes = std::fs::read(path)?;
    let content = match String::from_utf8(bytes) {
        Ok(content) => content,
        Err(e) => {
            tracing::debug!(file = %path.display(), "file is not UTF-8");
            return Ok(vec![Document {
                source: path.to_path_buf(),
                line: None,
                statement: Err(format!("file is not valid UTF-8: {e}")),
            }]);
        }
    };

    let documents = if is_jsonl(path) {
        content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| Document {
                source: path.to_path_buf(),
                line: Some(i + 1),
                statement: decode(line),
            })
            .collect()
    } else {
        vec![Document {
            source: path.to_path_buf(),
            line: None,
            statement: decode(&content),
        }]
    };

    tracing::debug!(
        file = %path.display(),
        documents = documents.len(),
        "loaded attestation file"
    );

    Ok(documents)
}

fn decode(json: &str) -> std::result::Result<Statement, String> {
    Statement::from_json(json).map_err(|e| e.to_string())
}

fn is_jsonl(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "jsonl")
}

fn has_statement_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "json" || ext == "jsonl")
}
