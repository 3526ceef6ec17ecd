//! Typed in-toto attestation documents.
//!
//! Every type here mirrors the canonical JSON projection of the in-toto
//! protobuf schema: `_type` for the statement type, camelCase keys elsewhere,
//! base64 for raw bytes. Empty values are omitted on output and default on
//! input, so a decoded document re-encodes to the same canonical form.
//!
//! Decoding never validates. Call [`crate::validate::Validatable::validate`]
//! on the decoded value.

pub mod provenance;
pub mod resource_descriptor;
pub mod scai;
pub mod statement;
pub mod test_result;

pub use provenance::{BuildDefinition, BuildMetadata, Builder, Provenance, RunDetails};
pub use resource_descriptor::{DigestSet, ResourceDescriptor};
pub use scai::{AttributeAssertion, AttributeReport};
pub use statement::{Statement, StatementVersion};
pub use test_result::TestResult;

/// Repeated and map fields accept JSON `null` as empty.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Default + serde::Deserialize<'de>,
{
    let value: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

/// Serde adapter for `bytes` fields, which travel as standard base64 in JSON.
pub(crate) mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}
