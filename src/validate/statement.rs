use crate::model::Statement;

use super::{ErrorKind, Validatable, ValidationError, ValidationResult};

impl Validatable for Statement {
    /// Envelope checks only. The predicate payload is never inspected here;
    /// callers decode it by `predicate_type` and validate it separately.
    fn validate(&self) -> ValidationResult {
        if self.version().is_none() {
            return Err(ErrorKind::InvalidStatementType.into());
        }

        if self.subject.is_empty() {
            return Err(ErrorKind::SubjectRequired.into());
        }

        for (i, rd) in self.subject.iter().enumerate() {
            rd.validate().map_err(|e| e.at_index("subject", i))?;

            // subjects must be content-addressed, stricter than a bare descriptor
            if rd.digest.is_empty() {
                return Err(ValidationError::new(ErrorKind::DigestRequired).at_index("subject", i));
            }
        }

        if self.predicate_type.is_empty() {
            return Err(ErrorKind::PredicateTypeRequired.into());
        }

        if self.predicate.is_none() {
            return Err(ErrorKind::PredicateRequired.into());
        }

        Ok(())
    }
}
