//! Structural validation for every document layer.
//!
//! Each validator is a pure function of its input and stops at the first
//! violation. Nested failures keep their root [`ErrorKind`] and gain
//! positional [`Context`] on the way out.

pub mod error;
mod provenance;
mod resource_descriptor;
mod scai;
mod statement;

pub use error::{Context, ErrorKind, ValidationError};

pub type ValidationResult = std::result::Result<(), ValidationError>;

/// A document layer with structural invariants.
pub trait Validatable {
    /// Check this value, returning the first violation found.
    fn validate(&self) -> ValidationResult;
}

/// Validate every element of a repeated field, tagging failures with the
/// field name and element index.
pub(crate) fn validate_each<T: Validatable>(field: &'static str, items: &[T]) -> ValidationResult {
    items
        .iter()
        .enumerate()
        .try_for_each(|(i, item)| item.validate().map_err(|e| e.at_index(field, i)))
}
