//! SCAI (Software Supply Chain Attribute Integrity) attribute report.
//!
//! See: <https://github.com/in-toto/attestation/blob/main/spec/predicates/scai.md>

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ResourceDescriptor;

/// A claim that an attribute holds for a target, optionally backed by evidence.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeAssertion {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub attribute: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ResourceDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub evidence: Option<ResourceDescriptor>,
}

impl AttributeAssertion {
    pub fn new(attribute: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeReport {
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub attributes: Vec<AttributeAssertion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub producer: Option<ResourceDescriptor>,
}

impl AttributeReport {
    pub const PREDICATE_TYPE: &'static str =
        "https://in-toto.io/attestation/scai/attribute-report/v0.2";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_report() {
        let report: AttributeReport = serde_json::from_str(
            r#"{
                "attributes": [{
                    "attribute": "WITH_STACK_PROTECTION",
                    "target": {"name": "app", "digest": {"sha256": "00"}},
                    "conditions": {"flags": "-fstack-protector*"},
                    "evidence": {"name": "gcc.log", "mediaType": "text/plain"}
                }],
                "producer": {"uri": "https://example.com/builder"}
            }"#,
        )
        .unwrap();
        assert_eq!(report.attributes.len(), 1);
        let assertion = &report.attributes[0];
        assert_eq!(assertion.attribute, "WITH_STACK_PROTECTION");
        assert_eq!(assertion.target.as_ref().unwrap().name, "app");
        assert_eq!(assertion.evidence.as_ref().unwrap().media_type, "text/plain");
        assert_eq!(
            report.producer.unwrap().uri,
            "https://example.com/builder"
        );
    }
}
