//! SLSA v1.0 build provenance predicate.
//!
//! See: <https://slsa.dev/spec/v1.0/provenance>

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ResourceDescriptor;

/// SLSA provenance: what was meant to be built and what actually ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provenance {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_definition: Option<BuildDefinition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_details: Option<RunDetails>,
}

impl Provenance {
    pub const PREDICATE_TYPE: &'static str = "https://slsa.dev/provenance/v1";
}

/// The inputs to a build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildDefinition {
    /// URI describing the build template; interpretation of the parameters
    /// depends on it.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub build_type: String,
    /// Parameters under external control. Opaque here.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_parameters: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub internal_parameters: Option<Value>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub resolved_dependencies: Vec<ResourceDescriptor>,
}

impl BuildDefinition {
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// What happened when the build ran.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub builder: Option<Builder>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BuildMetadata>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub byproducts: Vec<ResourceDescriptor>,
}

impl RunDetails {
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

/// The platform that executed the build.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Builder {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Component name to version.
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub version: BTreeMap<String, String>,
    #[serde(
        default,
        deserialize_with = "super::null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub builder_dependencies: Vec<ResourceDescriptor>,
}

impl Builder {
    pub fn is_unset(&self) -> bool {
        *self == Self::default()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildMetadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub invocation_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_on: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finished_on: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const WANT_PROV: &str = r#"{"buildDefinition":{"buildType":"theBuildType","externalParameters":{"param1":{"subKey":"subVal"}},"resolvedDependencies":[{"name":"theResource","digest":{"alg1":"abc123"}}]},"runDetails":{"builder":{"id":"theId","version":{"theComponent":"v0.1"},"builderDependencies":[{"name":"theResource","digest":{"alg1":"abc123"}}]},"metadata":{"invocationId":"theInvocationId"},"byproducts":[{"name":"theResource","digest":{"alg1":"abc123"}}]}}"#;

    #[test]
    fn unmarshal_provenance() {
        let rd = ResourceDescriptor::named("theResource", "alg1", "abc123");
        let want = Provenance {
            build_definition: Some(BuildDefinition {
                build_type: "theBuildType".into(),
                external_parameters: Some(json!({"param1": {"subKey": "subVal"}})),
                internal_parameters: None,
                resolved_dependencies: vec![rd.clone()],
            }),
            run_details: Some(RunDetails {
                builder: Some(Builder {
                    id: "theId".into(),
                    version: BTreeMap::from([("theComponent".into(), "v0.1".into())]),
                    builder_dependencies: vec![rd.clone()],
                }),
                metadata: Some(BuildMetadata {
                    invocation_id: "theInvocationId".into(),
                    ..Default::default()
                }),
                byproducts: vec![rd],
            }),
        };

        let got: Provenance = serde_json::from_str(WANT_PROV).unwrap();
        assert_eq!(got, want);
    }

    #[test]
    fn parses_rfc3339_timestamps() {
        let meta: BuildMetadata = serde_json::from_str(
            r#"{"startedOn":"2024-03-01T10:00:00Z","finishedOn":"2024-03-01T10:05:30Z"}"#,
        )
        .unwrap();
        let started = meta.started_on.unwrap();
        let finished = meta.finished_on.unwrap();
        assert_eq!((finished - started).num_seconds(), 330);
    }

    #[test]
    fn empty_messages_are_unset() {
        let prov: Provenance =
            serde_json::from_str(r#"{"buildDefinition":{},"runDetails":{"builder":{}}}"#).unwrap();
        assert!(prov.build_definition.unwrap().is_unset());
        let run = prov.run_details.unwrap();
        assert!(!run.is_unset());
        assert!(run.builder.unwrap().is_unset());
    }

    #[test]
    fn null_repeated_fields_decode_empty() {
        let prov: Provenance = serde_json::from_str(
            r#"{"buildDefinition":{"buildType":"t","externalParameters":{},"resolvedDependencies":null},
                "runDetails":{"builder":{"id":"b","version":null,"builderDependencies":null},"byproducts":null}}"#,
        )
        .unwrap();
        let build = prov.build_definition.unwrap();
        assert!(build.resolved_dependencies.is_empty());
        let run = prov.run_details.unwrap();
        assert!(run.byproducts.is_empty());
        let builder = run.builder.unwrap();
        assert!(builder.version.is_empty());
        assert!(builder.builder_dependencies.is_empty());
    }
}
