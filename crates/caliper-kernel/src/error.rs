//! Error types for Caliper kernel operations.

use crate::registry::{Kind, TypeTag};

/// A candidate value rejected by the property validator or the container.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    /// The value's shape does not match the declared property type.
    #[error("property `{property}` expects {expected}, got {actual}")]
    TypeMismatch {
        property: String,
        expected: String,
        actual: String,
    },

    /// An enum-constrained string outside its fixed set.
    #[error(
        "property `{property}` expects one of [{}], got `{value}`",
        .allowed.join(", ")
    )]
    NotInEnum {
        property: String,
        value: String,
        allowed: &'static [&'static str],
    },

    /// A nested container whose kind does not satisfy the declared tag.
    #[error("property `{property}` expects {expected}, got {actual}")]
    KindMismatch {
        property: String,
        expected: TypeTag,
        actual: Kind,
    },

    /// A timestamp string that is not RFC 3339 with a zone designator.
    #[error("property `{property}` is not a date-time with timezone: `{value}`")]
    InvalidDateTime { property: String, value: String },

    /// A duration string that is not an ISO-8601 duration.
    #[error("property `{property}` is not an ISO-8601 duration: `{value}`")]
    InvalidDuration { property: String, value: String },

    /// NaN or an infinity where a number is declared.
    #[error("property `{property}` must be a finite number")]
    NonFinite { property: String },

    /// A list element failed validation.
    #[error("{source}")]
    ListElement {
        property: String,
        index: usize,
        source: Box<ValidationError>,
    },

    /// The kind declares no property with this name.
    #[error("{kind} has no property `{property}`")]
    UnknownProperty { kind: Kind, property: String },

    /// Re-assignment of a write-once property.
    #[error("property `{property}` of {kind} is write-once")]
    Immutable { kind: Kind, property: String },

    /// A configuration document that is not a JSON object.
    #[error("expected a JSON object for {context}")]
    NotAnObject { context: String },

    /// A nested configuration object without its `type` discriminator.
    #[error("nested object for `{property}` is missing its `type`")]
    MissingType { property: String },
}

/// Errors arising from building or serializing Caliper documents.
#[derive(Debug, thiserror::Error)]
pub enum CaliperError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Required properties absent at assignment time or before serialization.
    #[error("{kind}{} is missing required properties: {}", display_id(.id), .properties.join(", "))]
    RequiredPropertyMissing {
        kind: Kind,
        id: Option<String>,
        properties: Vec<String>,
    },

    /// A type tag name outside the closed tag set.
    #[error("unknown type tag `{0}`")]
    UnknownTypeTag(String),

    /// A builder of one node class was asked to build a kind of another.
    #[error("{kind} is declared as {actual}, not {expected}")]
    WrongClass {
        kind: Kind,
        expected: &'static str,
        actual: &'static str,
    },

    /// A scalar that cannot be represented in JSON reached the serializer.
    #[error("property `{property}` of {kind} cannot be serialized")]
    NonSerializable { kind: Kind, property: String },

    #[error("JSON encoding failed: {0}")]
    Encode(#[from] serde_json::Error),
}

fn display_id(id: &Option<String>) -> String {
    match id {
        Some(id) => format!(" `{id}`"),
        None => String::new(),
    }
}

impl CaliperError {
    /// Names of the missing properties, when this is a missing-property error.
    pub fn missing_properties(&self) -> &[String] {
        match self {
            Self::RequiredPropertyMissing { properties, .. } => properties,
            _ => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_property_message_names_kind_id_and_properties() {
        let err = CaliperError::RequiredPropertyMissing {
            kind: Kind::Membership,
            id: Some("membership:1".to_string()),
            properties: vec!["status".to_string(), "member".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Membership `membership:1` is missing required properties: status, member"
        );
        assert_eq!(err.missing_properties(), ["status", "member"]);
    }

    #[test]
    fn list_element_error_displays_its_source() {
        let err = ValidationError::ListElement {
            property: "roles".to_string(),
            index: 1,
            source: Box::new(ValidationError::NotInEnum {
                property: "roles[1]".to_string(),
                value: "Janitor".to_string(),
                allowed: &["Learner", "Mentor"],
            }),
        };
        assert_eq!(
            err.to_string(),
            "property `roles[1]` expects one of [Learner, Mentor], got `Janitor`"
        );
    }
}
