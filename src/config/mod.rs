use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::check::policy::Policy;
use crate::error::Result;

pub const CONFIG_FILE_NAME: &str = ".attestguard.toml";

/// Top-level configuration from `.attestguard.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub policy: Policy,
}

impl Config {
    /// Load config from a TOML file. Returns default if file doesn't exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.policy.check()?;
        Ok(config)
    }

    /// Generate a starter config file.
    pub fn starter_toml() -> &'static str {
        r#"# attestguard configuration

[policy]
# Minimum severity to fail the check (info, warning, error).
fail_on = "error"

# Finding codes to ignore entirely.
# ignore = ["unknown_predicate_type"]

# Only accept these predicate types (empty = accept any).
# allowed_predicate_types = [
#     "https://slsa.dev/provenance/v1",
#     "https://in-toto.io/attestation/scai/attribute-report/v0.2",
# ]

# Per-code severity overrides.
# [policy.overrides]
# "legacy_statement_type" = "error"
"#
    }
}
