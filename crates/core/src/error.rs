use crate::types::DbId;

/// A single field-level rule violation.
///
/// Every variant names the offending field so the API can render a
/// human-readable message without extra context.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{field} must not be blank")]
    EmptyField { field: &'static str },

    #[error("{field} must be at most {max} characters long")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A partial update set a field to an explicit `null`.
    #[error("{field} may not be null")]
    NullField { field: &'static str },

    #[error("{field} must be greater than or equal to {min}")]
    BelowMinimum { field: &'static str, min: &'static str },

    #[error("{field} must not exceed {max}")]
    ExceedsMaximum { field: &'static str, max: &'static str },

    #[error("{field} must have no more than {places} decimal places")]
    PrecisionError { field: &'static str, places: u32 },

    #[error("{value:?} is not a valid choice for {field}")]
    InvalidChoice { field: &'static str, value: String },

    /// A required relation is absent. This is an integrity failure, not a
    /// user-correctable field error, and converts to [`CoreError::Integrity`].
    #[error("{field} reference is required")]
    MissingReference { field: &'static str },
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(ValidationError),

    #[error("Integrity violation: {0}")]
    Integrity(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),
}

impl From<ValidationError> for CoreError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::MissingReference { .. } => CoreError::Integrity(err.to_string()),
            other => CoreError::Validation(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn field_errors_convert_to_validation() {
        let err: CoreError = ValidationError::EmptyField { field: "name" }.into();
        assert_matches!(err, CoreError::Validation(ValidationError::EmptyField { field: "name" }));
    }

    #[test]
    fn missing_reference_converts_to_integrity() {
        let err: CoreError = ValidationError::MissingReference { field: "customer" }.into();
        assert_matches!(err, CoreError::Integrity(msg) if msg.contains("customer"));
    }

    #[test]
    fn messages_name_the_field() {
        let err = ValidationError::FieldTooLong {
            field: "name",
            max: 255,
        };
        assert_eq!(err.to_string(), "name must be at most 255 characters long");

        let err = ValidationError::InvalidChoice {
            field: "status",
            value: "Lost".into(),
        };
        assert_eq!(err.to_string(), "\"Lost\" is not a valid choice for status");
    }
}
