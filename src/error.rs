use thiserror::Error;

/// The single decode-failure kind shared by every wire entity.
///
/// Raised when a payload cannot satisfy an entity's declared shape.
/// Encoding never fails.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SchemaViolation {
    /// Payload root was not a JSON object.
    #[error("{entity}: expected a JSON object, found {found}")]
    NotAnObject {
        entity: &'static str,
        found: &'static str,
    },

    /// A required field was absent, or explicitly null.
    #[error("{entity}.{field}: required field is missing")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    /// A field held the wrong JSON type. Values are never coerced.
    #[error("{entity}.{field}: expected {expected}, found {found}")]
    TypeMismatch {
        entity: &'static str,
        field: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// A field was well-typed but unparseable (bad timestamp, out-of-range
    /// integer).
    #[error("{entity}.{field}: {message}")]
    Malformed {
        entity: &'static str,
        field: &'static str,
        message: String,
    },
}

impl SchemaViolation {
    /// Entity whose decode failed.
    pub fn entity(&self) -> &'static str {
        match self {
            Self::NotAnObject { entity, .. }
            | Self::MissingField { entity, .. }
            | Self::TypeMismatch { entity, .. }
            | Self::Malformed { entity, .. } => entity,
        }
    }

    /// Offending wire key, when the failure is tied to one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NotAnObject { .. } => None,
            Self::MissingField { field, .. }
            | Self::TypeMismatch { field, .. }
            | Self::Malformed { field, .. } => Some(field),
        }
    }
}
