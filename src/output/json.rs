use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::check::policy::PolicyVerdict;
use crate::check::Finding;
use crate::error::Result;

#[derive(Serialize)]
struct JsonReport<'a> {
    generated_at: DateTime<Utc>,
    documents: usize,
    findings: &'a [Finding],
    verdict: &'a PolicyVerdict,
}

/// Render findings as a JSON report.
pub fn render(findings: &[Finding], verdict: &PolicyVerdict, documents: usize) -> Result<String> {
    let report = JsonReport {
        generated_at: Utc::now(),
        documents,
        findings,
        verdict,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
