//! Test result predicate.
//!
//! Decoded for inspection only; there is no structural validator for it.

use serde::{Deserialize, Serialize};

use super::ResourceDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// Overall outcome, e.g. `PASSED`, `WARNED` or `FAILED`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub result: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub configuration: Vec<ResourceDescriptor>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub url: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub passed_tests: Vec<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub warned_tests: Vec<String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub failed_tests: Vec<String>,
}

impl TestResult {
    pub const PREDICATE_TYPE: &'static str = "https://in-toto.io/attestation/test-result/v0.1";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_camel_case_lists() {
        let tr: TestResult = serde_json::from_str(
            r#"{"result":"WARNED","passedTests":["a","b"],"warnedTests":["c"],"url":"https://ci.example.com/run/1"}"#,
        )
        .unwrap();
        assert_eq!(tr.result, "WARNED");
        assert_eq!(tr.passed_tests, vec!["a", "b"]);
        assert_eq!(tr.warned_tests, vec!["c"]);
        assert!(tr.failed_tests.is_empty());
    }
}
