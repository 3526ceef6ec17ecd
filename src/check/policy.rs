use std::collections::{BTreeSet, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::{Finding, Severity};
use crate::error::{GuardError, Result};

/// Policy verdict: the final pass/fail decision after applying the ignore
/// list and severity overrides to raw findings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyVerdict {
    pub pass: bool,
    pub total_findings: usize,
    pub effective_findings: usize,
    pub highest_severity: Option<Severity>,
    pub fail_threshold: Severity,
}

/// Policy configuration loaded from `.attestguard.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Policy {
    /// Minimum severity to fail the check.
    #[serde(default = "default_fail_on")]
    pub fail_on: Severity,
    /// Finding codes to ignore entirely.
    #[serde(default)]
    pub ignore: HashSet<String>,
    /// Per-code severity overrides.
    #[serde(default)]
    pub overrides: HashMap<String, Severity>,
    /// If non-empty, statements whose `predicateType` is not listed are
    /// reported as `predicate_type_not_allowed`.
    #[serde(default)]
    pub allowed_predicate_types: BTreeSet<String>,
}

fn default_fail_on() -> Severity {
    Severity::Error
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            fail_on: Severity::Error,
            ignore: HashSet::new(),
            overrides: HashMap::new(),
            allowed_predicate_types: BTreeSet::new(),
        }
    }
}

impl Policy {
    /// Reject settings that can never match anything.
    pub fn check(&self) -> Result<()> {
        if self.allowed_predicate_types.iter().any(String::is_empty) {
            return Err(GuardError::Config(
                "allowed_predicate_types contains an empty entry".into(),
            ));
        }
        Ok(())
    }

    pub fn allows_predicate_type(&self, predicate_type: &str) -> bool {
        self.allowed_predicate_types.is_empty()
            || self.allowed_predicate_types.contains(predicate_type)
    }

    /// Evaluate findings against this policy and produce a verdict.
    pub fn evaluate(&self, findings: &[Finding]) -> PolicyVerdict {
        let effective: Vec<Severity> = findings
            .iter()
            .filter(|f| !self.ignore.contains(&f.code))
            .map(|f| self.overrides.get(&f.code).copied().unwrap_or(f.severity))
            .collect();

        let highest = effective.iter().copied().max();
        let failed = effective.iter().any(|&sev| sev >= self.fail_on);

        PolicyVerdict {
            pass: !failed,
            total_findings: findings.len(),
            effective_findings: effective.len(),
            highest_severity: highest,
            fail_threshold: self.fail_on,
        }
    }

    /// Filter findings: remove ignored codes, apply overrides.
    pub fn apply(&self, findings: &[Finding]) -> Vec<Finding> {
        findings
            .iter()
            .filter(|f| !self.ignore.contains(&f.code))
            .map(|f| {
                let mut f = f.clone();
                if let Some(&override_sev) = self.overrides.get(&f.code) {
                    f.severity = override_sev;
                }
                f
            })
            .collect()
    }
}
