use std::collections::BTreeMap;

use serde_json::{json, Value};

use crate::check::{Finding, Severity};
use crate::error::Result;

/// Render findings as SARIF 2.1.0.
///
/// Statements have no meaningful columns, so results carry a start line for
/// `.jsonl` input and the in-document path as a logical location.
pub fn render(findings: &[Finding], target_name: &str) -> Result<String> {
    let first_by_code: BTreeMap<&str, &Finding> =
        findings.iter().fold(BTreeMap::new(), |mut acc, f| {
            acc.entry(f.code.as_str()).or_insert(f);
            acc
        });

    let rules: Vec<Value> = first_by_code
        .values()
        .map(|finding| {
            json!({
                "id": finding.code,
                "shortDescription": { "text": finding.code.replace('_', " ") },
                "defaultConfiguration": {
                    "level": severity_to_sarif_level(finding.severity),
                },
                "properties": {
                    "tags": [finding.stage.to_string()],
                },
            })
        })
        .collect();

    let results: Vec<Value> = findings
        .iter()
        .map(|f| {
            let mut physical = json!({
                "artifactLocation": {
                    "uri": f.location.file.display().to_string(),
                },
            });
            if let Some(line) = f.location.line {
                physical["region"] = json!({ "startLine": line });
            }

            let mut location = json!({ "physicalLocation": physical });
            if let Some(path) = &f.location.path {
                location["logicalLocations"] = json!([{ "fullyQualifiedName": path }]);
            }

            let mut result = json!({
                "ruleId": f.code,
                "level": severity_to_sarif_level(f.severity),
                "message": { "text": f.message },
                "locations": [location],
            });
            if let Some(predicate_type) = &f.predicate_type {
                result["properties"] = json!({ "predicateType": predicate_type });
            }
            result
        })
        .collect();

    let sarif = json!({
        "$schema": "https://docs.oasis-open.org/sarif/sarif/v2.1.0/errata01/os/schemas/sarif-schema-2.1.0.json",
        "version": "2.1.0",
        "runs": [{
            "tool": {
                "driver": {
                    "name": "attestguard",
                    "version": env!("CARGO_PKG_VERSION"),
                    "semanticVersion": env!("CARGO_PKG_VERSION"),
                    "rules": rules,
                },
            },
            "results": results,
            "automationDetails": {
                "id": format!("attestguard/{}", target_name),
                "guid": uuid::Uuid::new_v4().to_string(),
            },
        }],
    });

    let output = serde_json::to_string_pretty(&sarif)?;
    Ok(output)
}

fn severity_to_sarif_level(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "note",
    }
}
