//! Property declarations and the validator that checks candidate values
//! against them.
//!
//! Validation is pure: it consumes a candidate and returns the normalized
//! value to store, or an error naming the property. Date-times come back in
//! UTC truncated to milliseconds; integers offered for float slots come back
//! widened.

use crate::duration::IsoDuration;
use crate::error::ValidationError;
use crate::registry::{TypeTag, registry};
use crate::value::Value;
use chrono::{DateTime, SubsecRound, Utc};
use std::fmt;

/// The fixed vocabulary of declared property types.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyType {
    String,
    Enum(&'static [&'static str]),
    Integer,
    Float,
    Boolean,
    DateTime,
    Duration,
    Object(TypeTag),
    List(&'static PropertyType),
    Map,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String => f.write_str("string"),
            Self::Enum(members) => write!(f, "one of [{}]", members.join(", ")),
            Self::Integer => f.write_str("integer"),
            Self::Float => f.write_str("float"),
            Self::Boolean => f.write_str("boolean"),
            Self::DateTime => f.write_str("date-time"),
            Self::Duration => f.write_str("duration"),
            Self::Object(tag) => write!(f, "{tag}"),
            Self::List(item) => write!(f, "list of {item}"),
            Self::Map => f.write_str("map"),
        }
    }
}

/// How a nested node is rendered when it is not the document subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Embed {
    /// Reduce nested entities to their identifier.
    Reference,
    /// Render the nested node in full.
    Always,
}

/// One declared property of a kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PropertyDecl {
    pub name: &'static str,
    pub ty: PropertyType,
    pub required: bool,
    pub mutable: bool,
    pub embed: Embed,
}

impl PropertyDecl {
    pub const fn required(name: &'static str, ty: PropertyType) -> Self {
        Self {
            name,
            ty,
            required: true,
            mutable: false,
            embed: Embed::Reference,
        }
    }

    pub const fn optional(name: &'static str, ty: PropertyType) -> Self {
        Self {
            name,
            ty,
            required: false,
            mutable: false,
            embed: Embed::Reference,
        }
    }

    pub const fn mutable(self) -> Self {
        Self {
            mutable: true,
            ..self
        }
    }

    pub const fn always_embed(self) -> Self {
        Self {
            embed: Embed::Always,
            ..self
        }
    }
}

/// Render a timestamp the way documents carry it: UTC, millisecond precision.
pub fn format_date_time(value: &DateTime<Utc>) -> String {
    value.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Check `value` against `ty` and return the normalized value to store.
pub fn validate(property: &str, ty: &PropertyType, value: Value) -> Result<Value, ValidationError> {
    match (ty, value) {
        (PropertyType::String, value @ Value::Text(_)) => Ok(value),

        (PropertyType::Enum(members), Value::Text(text)) => {
            if members.contains(&text.as_str()) {
                Ok(Value::Text(text))
            } else {
                Err(ValidationError::NotInEnum {
                    property: property.to_string(),
                    value: text,
                    allowed: *members,
                })
            }
        }

        (PropertyType::Integer, value @ Value::Integer(_)) => Ok(value),
        (PropertyType::Integer, Value::Float(number))
            if number.is_finite()
                && number.fract() == 0.0
                && number >= i64::MIN as f64
                && number < i64::MAX as f64 =>
        {
            Ok(Value::Integer(number as i64))
        }

        (PropertyType::Float, Value::Integer(number)) => Ok(Value::Float(number as f64)),
        (PropertyType::Float, Value::Float(number)) => {
            if number.is_finite() {
                Ok(Value::Float(number))
            } else {
                Err(ValidationError::NonFinite {
                    property: property.to_string(),
                })
            }
        }

        (PropertyType::Boolean, value @ Value::Boolean(_)) => Ok(value),

        (PropertyType::DateTime, Value::DateTime(instant)) => {
            Ok(Value::DateTime(instant.trunc_subsecs(3)))
        }
        (PropertyType::DateTime, Value::Text(text)) => DateTime::parse_from_rfc3339(text.trim())
            .map(|instant| Value::DateTime(instant.with_timezone(&Utc).trunc_subsecs(3)))
            .map_err(|_| ValidationError::InvalidDateTime {
                property: property.to_string(),
                value: text,
            }),

        (PropertyType::Duration, value @ Value::Duration(_)) => Ok(value),
        (PropertyType::Duration, Value::Text(text)) => text
            .parse::<IsoDuration>()
            .map(Value::Duration)
            .map_err(|_| ValidationError::InvalidDuration {
                property: property.to_string(),
                value: text,
            }),

        (PropertyType::Object(tag), Value::Node(node)) => {
            if registry().satisfies(node.kind(), *tag) {
                Ok(Value::Node(node))
            } else {
                Err(ValidationError::KindMismatch {
                    property: property.to_string(),
                    expected: *tag,
                    actual: node.kind(),
                })
            }
        }

        (PropertyType::List(item), Value::List(items)) => items
            .into_iter()
            .enumerate()
            .map(|(index, element)| {
                validate(&format!("{property}[{index}]"), item, element).map_err(|source| {
                    ValidationError::ListElement {
                        property: property.to_string(),
                        index,
                        source: Box::new(source),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),

        (PropertyType::Map, value @ Value::Map(_)) => Ok(value),

        (ty, value) => Err(ValidationError::TypeMismatch {
            property: property.to_string(),
            expected: ty.to_string(),
            actual: value.type_label(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::registry::{Capability, Kind};
    use crate::vocab::{ROLES, STATUSES};

    fn person(id: &str) -> Value {
        Entity::builder(Kind::Person)
            .id(id)
            .build()
            .expect("person should build")
            .into()
    }

    #[test]
    fn enum_members_pass_and_others_name_the_value() {
        let roles = PropertyType::Enum(ROLES);
        assert_eq!(
            validate("roles", &roles, "Instructor#Lecturer".into()),
            Ok(Value::from("Instructor#Lecturer"))
        );
        assert_eq!(
            validate("roles", &roles, "Janitor".into()),
            Err(ValidationError::NotInEnum {
                property: "roles".to_string(),
                value: "Janitor".to_string(),
                allowed: ROLES,
            })
        );

        let status = PropertyType::Enum(STATUSES);
        let err = validate("status", &status, "Dormant".into()).expect_err("not a status");
        assert_eq!(
            err.to_string(),
            "property `status` expects one of [Active, Inactive], got `Dormant`"
        );
        let err = validate("status", &status, Value::Integer(1)).expect_err("not a string");
        assert_eq!(
            err.to_string(),
            "property `status` expects one of [Active, Inactive], got integer"
        );
    }

    #[test]
    fn floats_accept_integers_and_reject_non_finite_numbers() {
        assert_eq!(
            validate("metricValue", &PropertyType::Float, Value::Integer(12)),
            Ok(Value::Float(12.0))
        );
        assert!(matches!(
            validate("metricValue", &PropertyType::Float, Value::Float(f64::NAN)),
            Err(ValidationError::NonFinite { .. })
        ));
        assert!(matches!(
            validate("count", &PropertyType::Integer, Value::Float(2.5)),
            Err(ValidationError::TypeMismatch { .. })
        ));
        assert_eq!(
            validate("count", &PropertyType::Integer, Value::Float(2.0)),
            Ok(Value::Integer(2))
        );
        assert!(matches!(
            validate("count", &PropertyType::Integer, Value::Float(i64::MAX as f64)),
            Err(ValidationError::TypeMismatch { .. })
        ));
        assert_eq!(
            validate("count", &PropertyType::Integer, Value::Float(i64::MIN as f64)),
            Ok(Value::Integer(i64::MIN))
        );
    }

    #[test]
    fn date_times_normalize_to_utc_milliseconds() {
        let value = validate(
            "startedAtTime",
            &PropertyType::DateTime,
            "2016-11-15T10:15:00.123456+02:00".into(),
        )
        .expect("offset timestamps are accepted");
        match value {
            Value::DateTime(instant) => {
                assert_eq!(format_date_time(&instant), "2016-11-15T08:15:00.123Z")
            }
            other => panic!("expected a date-time, got {other:?}"),
        }
    }

    #[test]
    fn date_times_without_a_zone_are_rejected() {
        let err = validate(
            "startedAtTime",
            &PropertyType::DateTime,
            "2016-11-15T10:15:00".into(),
        )
        .expect_err("naive timestamps carry no zone");
        assert!(matches!(err, ValidationError::InvalidDateTime { .. }));
    }

    #[test]
    fn object_slots_check_capabilities() {
        let referrable = PropertyType::Object(TypeTag::Capability(Capability::Referrable));
        assert!(validate("subject", &referrable, person("person:1")).is_ok());

        let organization = PropertyType::Object(TypeTag::Kind(Kind::Organization));
        assert_eq!(
            validate("organization", &organization, person("person:1")),
            Err(ValidationError::KindMismatch {
                property: "organization".to_string(),
                expected: TypeTag::Kind(Kind::Organization),
                actual: Kind::Person,
            })
        );
    }

    #[test]
    fn list_failures_carry_the_element_index() {
        static AGENT: PropertyType = PropertyType::Object(TypeTag::Kind(Kind::Agent));
        let members = PropertyType::List(&AGENT);
        let err = validate(
            "members",
            &members,
            Value::List(vec![person("person:1"), Value::from("person:2")]),
        )
        .expect_err("bare strings are not agents");
        match err {
            ValidationError::ListElement { index, source, .. } => {
                assert_eq!(index, 1);
                assert!(matches!(*source, ValidationError::TypeMismatch { .. }));
            }
            other => panic!("expected list element error, got {other:?}"),
        }
        assert_eq!(
            validate("members", &members, Value::List(Vec::new())),
            Ok(Value::List(Vec::new()))
        );
    }
}
