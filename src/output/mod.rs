pub mod console;
pub mod json;
pub mod sarif;

use serde::{Deserialize, Serialize};

use crate::check::policy::PolicyVerdict;
use crate::check::Finding;
use crate::error::Result;

/// Output format selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Console,
    Json,
    Sarif,
}

impl OutputFormat {
    pub fn from_str_lenient(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "console" | "text" => Some(Self::Console),
            "json" => Some(Self::Json),
            "sarif" => Some(Self::Sarif),
            _ => None,
        }
    }
}

/// Render findings into the specified format.
pub fn render(
    findings: &[Finding],
    verdict: &PolicyVerdict,
    documents: usize,
    format: OutputFormat,
    target_name: &str,
) -> Result<String> {
    match format {
        OutputFormat::Console => Ok(console::render(findings, verdict, documents)),
        OutputFormat::Json => json::render(findings, verdict, documents),
        OutputFormat::Sarif => sarif::render(findings, target_name),
    }
}
