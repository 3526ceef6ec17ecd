use crate::check::policy::PolicyVerdict;
use crate::check::{Finding, Severity};

/// Render findings as console output, grouped by severity then file.
pub fn render(findings: &[Finding], verdict: &PolicyVerdict, documents: usize) -> String {
    let mut output = String::new();

    if findings.is_empty() {
        output.push_str(&format!(
            "\n  {} document(s) checked, no findings.\n\n",
            documents
        ));
        return output;
    }

    // Errors first, then by file and line
    let mut sorted: Vec<&Finding> = findings.iter().collect();
    sorted.sort_by(|a, b| {
        b.severity.cmp(&a.severity).then_with(|| {
            (&a.location.file, a.location.line).cmp(&(&b.location.file, b.location.line))
        })
    });

    output.push_str(&format!(
        "\n  {} finding(s) in {} document(s):\n\n",
        findings.len(),
        documents
    ));

    for finding in &sorted {
        let severity_tag = match finding.severity {
            Severity::Error => "[ERROR]  ",
            Severity::Warning => "[WARNING]",
            Severity::Info => "[INFO]   ",
        };

        let mut location = finding.location.file.display().to_string();
        if let Some(line) = finding.location.line {
            location.push_str(&format!(":{line}"));
        }

        output.push_str(&format!(
            "  {} {} {}\n",
            severity_tag, finding.code, finding.message
        ));
        output.push_str(&format!("            in {}\n", location));
        if let Some(path) = &finding.location.path {
            output.push_str(&format!("            at {}\n", path));
        }
        output.push('\n');
    }

    let status = if verdict.pass { "PASS" } else { "FAIL" };
    output.push_str(&format!(
        "  Result: {} (threshold: {}, highest: {})\n\n",
        status,
        verdict.fail_threshold,
        verdict
            .highest_severity
            .map(|s| s.to_string())
            .unwrap_or_else(|| "none".into()),
    ));

    output
}
