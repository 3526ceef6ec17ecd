//! in-toto v1 ResourceDescriptor and DigestSet.
//!
//! See: <https://github.com/in-toto/attestation/blob/main/spec/v1/resource_descriptor.md>

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Algorithm name to hex-encoded digest.
///
/// Keys are unique and their order carries no meaning; a sorted map keeps
/// serialization and first-failure reporting stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DigestSet(BTreeMap<String, String>);

impl DigestSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, algorithm: &str) -> Option<&str> {
        self.0.get(algorithm).map(String::as_str)
    }

    pub fn insert(&mut self, algorithm: impl Into<String>, value: impl Into<String>) {
        self.0.insert(algorithm.into(), value.into());
    }

    /// Entries in algorithm-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(alg, value)| (alg.as_str(), value.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DigestSet {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A reference to an artifact by name, location, and/or content digest.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceDescriptor {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub uri: String,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "DigestSet::is_empty"
    )]
    pub digest: DigestSet,
    /// Inline artifact content.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        with = "super::base64_bytes"
    )]
    pub content: Vec<u8>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub download_location: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub media_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<Map<String, Value>>,
}

impl ResourceDescriptor {
    /// A descriptor naming an artifact with a single digest entry.
    pub fn named(
        name: impl Into<String>,
        algorithm: impl Into<String>,
        digest: impl Into<String>,
    ) -> Self {
        let mut digest_set = DigestSet::new();
        digest_set.insert(algorithm, digest);
        Self {
            name: name.into(),
            digest: digest_set,
            ..Default::default()
        }
    }

    /// True when every field holds its default, i.e. the message was `{}` on
    /// the wire. Such a descriptor counts as absent where it is optional.
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL_RD: &str = r#"{"name":"theName","uri":"https://example.com","digest":{"alg1":"abc123"},"content":"Ynl0ZXNjb250ZW50","downloadLocation":"https://example.com/test.zip","mediaType":"theMediaType","annotations":{"a1":{"keyNum":13,"keyStr":"value1"},"a2":{"keyObj":{"subKey":"subVal"}}}}"#;

    #[test]
    fn decodes_canonical_json() {
        let rd: ResourceDescriptor = serde_json::from_str(FULL_RD).unwrap();
        assert_eq!(rd.name, "theName");
        assert_eq!(rd.uri, "https://example.com");
        assert_eq!(rd.digest.get("alg1"), Some("abc123"));
        assert_eq!(rd.content, b"bytescontent".to_vec());
        assert_eq!(rd.download_location, "https://example.com/test.zip");
        assert_eq!(rd.media_type, "theMediaType");
        let annotations = rd.annotations.unwrap();
        assert_eq!(annotations["a1"]["keyNum"], 13);
    }

    #[test]
    fn omits_empty_fields() {
        let rd = ResourceDescriptor::named("theSub", "sha256", "abcd");
        let json = serde_json::to_string(&rd).unwrap();
        assert_eq!(json, r#"{"name":"theSub","digest":{"sha256":"abcd"}}"#);
    }

    #[test]
    fn null_digest_is_empty() {
        let rd: ResourceDescriptor = serde_json::from_str(r#"{"name":"a","digest":null}"#).unwrap();
        assert!(rd.digest.is_empty());
    }

    #[test]
    fn empty_object_is_unset() {
        let rd: ResourceDescriptor = serde_json::from_str("{}").unwrap();
        assert!(rd.is_unset());
        assert!(!ResourceDescriptor::named("a", "sha1", "00").is_unset());
    }

    #[test]
    fn rejects_bad_base64_content() {
        let result = serde_json::from_str::<ResourceDescriptor>(r#"{"content":"***"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn digest_set_iterates_sorted() {
        let digest: DigestSet = [("sha512", "aa"), ("md5", "bb"), ("sha256", "cc")]
            .into_iter()
            .collect();
        let algs: Vec<&str> = digest.iter().map(|(a, _)| a).collect();
        assert_eq!(algs, vec!["md5", "sha256", "sha512"]);
        assert_eq!(digest.len(), 3);
    }
}
