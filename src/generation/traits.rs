//! Traits shared by request types and document layouts.

use super::composer::ComposedDocument;
use super::validation::ValidationErrors;

/// Trait for validating request objects.
pub trait Validator {
    /// Validate the state of the object.
    fn validate(&self) -> Result<(), ValidationErrors>;
}

/// Something that turns itself into composer blocks.
pub trait Layout {
    fn build(&self) -> ComposedDocument;
}
