//! Minimum structure for SLSA Build L1 provenance. Anything stricter is a
//! policy decision for the consumer.

use crate::model::{BuildDefinition, Builder, Provenance, RunDetails};

use super::{validate_each, ErrorKind, Validatable, ValidationResult};

impl Validatable for Builder {
    fn validate(&self) -> ValidationResult {
        if self.id.is_empty() {
            return Err(ErrorKind::BuilderIdRequired.into());
        }
        validate_each("builderDependencies", &self.builder_dependencies)
    }
}

impl Validatable for BuildDefinition {
    fn validate(&self) -> ValidationResult {
        if self.build_type.is_empty() {
            return Err(ErrorKind::BuildTypeRequired.into());
        }
        if self.external_parameters.is_none() {
            return Err(ErrorKind::ExternalParametersRequired.into());
        }
        validate_each("resolvedDependencies", &self.resolved_dependencies)
    }
}

impl Validatable for RunDetails {
    fn validate(&self) -> ValidationResult {
        let builder = self
            .builder
            .as_ref()
            .filter(|b| !b.is_unset())
            .ok_or(ErrorKind::BuilderRequired)?;
        builder.validate().map_err(|e| e.in_field("builder"))?;

        validate_each("byproducts", &self.byproducts)
    }
}

impl Validatable for Provenance {
    fn validate(&self) -> ValidationResult {
        let build_definition = self
            .build_definition
            .as_ref()
            .filter(|b| !b.is_unset())
            .ok_or(ErrorKind::BuildDefinitionRequired)?;
        build_definition
            .validate()
            .map_err(|e| e.in_field("buildDefinition"))?;

        let run_details = self
            .run_details
            .as_ref()
            .filter(|r| !r.is_unset())
            .ok_or(ErrorKind::RunDetailsRequired)?;
        run_details.validate().map_err(|e| e.in_field("runDetails"))
    }
}
