use crate::model::{AttributeAssertion, AttributeReport, ResourceDescriptor};

use super::{ErrorKind, Validatable, ValidationResult};

/// Validate an optional descriptor. `{}` on the wire counts as absent.
fn validate_optional(rd: Option<&ResourceDescriptor>, field: &'static str) -> ValidationResult {
    match rd {
        Some(rd) if !rd.is_unset() => rd.validate().map_err(|e| e.in_field(field)),
        _ => Ok(()),
    }
}

impl Validatable for AttributeAssertion {
    fn validate(&self) -> ValidationResult {
        if self.attribute.is_empty() {
            return Err(ErrorKind::AttributeRequired.into());
        }
        validate_optional(self.target.as_ref(), "target")?;
        validate_optional(self.evidence.as_ref(), "evidence")
    }
}

impl Validatable for AttributeReport {
    fn validate(&self) -> ValidationResult {
        if self.attributes.is_empty() {
            return Err(ErrorKind::AtLeastOneAssertionRequired.into());
        }
        super::validate_each("attributes", &self.attributes)?;
        validate_optional(self.producer.as_ref(), "producer")
    }
}
