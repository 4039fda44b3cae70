//! Construction from JSON configuration objects.
//!
//! A configuration object names properties with their document keys.
//! Object-typed properties take nested configuration objects that carry their
//! own `type`; `null` leaves a property absent. An `@context` key overrides the
//! context label. Names the kind does not declare are rejected.

use crate::catalog::{NodeClass, schema};
use crate::container::PropertyContainer;
use crate::entity::{Composite, Entity, NodeBuilder};
use crate::error::{CaliperError, ValidationError};
use crate::event::Event;
use crate::property::PropertyType;
use crate::registry::Kind;
use crate::serialize;
use crate::value::Value;
use serde_json::{Map, Value as Json};

/// A node of any class, as read from a self-describing document.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Entity(Entity),
    Composite(Composite),
    Event(Event),
}

impl Node {
    /// Build from a document whose `type` names the kind.
    pub fn from_document(document: &Json) -> Result<Self, CaliperError> {
        let kind = document_kind(document, "document")?;
        Self::from_config(kind, document)
    }

    pub fn from_config(kind: Kind, config: &Json) -> Result<Self, CaliperError> {
        let container = container_from_config(kind, config)?;
        Ok(match container.class() {
            NodeClass::Entity => Self::Entity(Entity::from_container(container)),
            NodeClass::Composite => Self::Composite(Composite::from_container(container)),
            NodeClass::Event => Self::Event(Event::from_container(container)),
        })
    }

    pub fn kind(&self) -> Kind {
        self.container().kind()
    }

    pub fn container(&self) -> &PropertyContainer {
        match self {
            Self::Entity(entity) => entity.container(),
            Self::Composite(composite) => composite.container(),
            Self::Event(event) => event.container(),
        }
    }

    pub fn to_document(&self) -> Result<Json, CaliperError> {
        serialize::to_document(self.container())
    }
}

impl Entity {
    pub fn from_config(kind: Kind, config: &Json) -> Result<Self, CaliperError> {
        let container = checked(kind, NodeClass::Entity, config)?;
        Ok(Self::from_container(container))
    }
}

impl Composite {
    pub fn from_config(kind: Kind, config: &Json) -> Result<Self, CaliperError> {
        let container = checked(kind, NodeClass::Composite, config)?;
        Ok(Self::from_container(container))
    }
}

impl Event {
    pub fn from_config(kind: Kind, config: &Json) -> Result<Self, CaliperError> {
        let container = checked(kind, NodeClass::Event, config)?;
        Ok(Self::from_container(container))
    }
}

fn checked(kind: Kind, class: NodeClass, config: &Json) -> Result<PropertyContainer, CaliperError> {
    let actual = schema(kind).class;
    if actual != class {
        return Err(CaliperError::WrongClass {
            kind,
            expected: class.as_str(),
            actual: actual.as_str(),
        });
    }
    container_from_config(kind, config)
}

fn document_kind(document: &Json, context: &str) -> Result<Kind, CaliperError> {
    let object = as_object(document, context)?;
    match object.get("type") {
        Some(Json::String(name)) => name.parse(),
        _ => Err(ValidationError::MissingType {
            property: context.to_string(),
        }
        .into()),
    }
}

fn as_object<'a>(config: &'a Json, context: &str) -> Result<&'a Map<String, Json>, CaliperError> {
    config.as_object().ok_or_else(|| {
        ValidationError::NotAnObject {
            context: context.to_string(),
        }
        .into()
    })
}

fn container_from_config(kind: Kind, config: &Json) -> Result<PropertyContainer, CaliperError> {
    let object = as_object(config, kind.as_str())?;
    let schema = schema(kind);
    let mut builder = NodeBuilder::new(kind);

    for (key, raw) in object {
        match key.as_str() {
            "@context" => match raw {
                Json::String(context) => builder.context(context.clone()),
                other => {
                    return Err(ValidationError::TypeMismatch {
                        property: key.clone(),
                        expected: "string".to_string(),
                        actual: loose_label(other).to_string(),
                    }
                    .into());
                }
            },
            "type" => {
                if raw.as_str() != Some(kind.as_str()) {
                    return Err(ValidationError::TypeMismatch {
                        property: "type".to_string(),
                        expected: kind.to_string(),
                        actual: raw.to_string(),
                    }
                    .into());
                }
            }
            name => {
                let decl = schema.property(name).ok_or_else(|| {
                    ValidationError::UnknownProperty {
                        kind,
                        property: name.to_string(),
                    }
                })?;
                if let Some(value) = to_value(name, &decl.ty, raw)? {
                    builder.set(name, value);
                }
            }
        }
    }

    builder.build(schema.class)
}

/// Convert a JSON value for a declared property. Shape errors are left to
/// the validator, which reports them against the declaration.
fn to_value(property: &str, ty: &PropertyType, raw: &Json) -> Result<Option<Value>, CaliperError> {
    match (ty, raw) {
        (_, Json::Null) => Ok(None),
        (PropertyType::Object(_), Json::Object(_)) => {
            let kind = document_kind(raw, property)?;
            let nested = container_from_config(kind, raw)?;
            Ok(Some(Value::Node(Box::new(nested))))
        }
        (PropertyType::List(item), Json::Array(items)) => {
            let mut values = Vec::with_capacity(items.len());
            for (index, element) in items.iter().enumerate() {
                let label = format!("{property}[{index}]");
                match to_value(&label, item, element)? {
                    Some(value) => values.push(value),
                    None => {
                        return Err(ValidationError::ListElement {
                            property: property.to_string(),
                            index,
                            source: Box::new(ValidationError::TypeMismatch {
                                property: label,
                                expected: item.to_string(),
                                actual: "null".to_string(),
                            }),
                        }
                        .into());
                    }
                }
            }
            Ok(Some(Value::List(values)))
        }
        (_, raw) => Ok(Some(loose(raw))),
    }
}

fn loose(raw: &Json) -> Value {
    match raw {
        Json::String(text) => Value::Text(text.clone()),
        Json::Number(number) => match number.as_i64() {
            Some(integer) => Value::Integer(integer),
            None => Value::Float(number.as_f64().unwrap_or(f64::NAN)),
        },
        Json::Bool(flag) => Value::Boolean(*flag),
        Json::Array(items) => Value::List(items.iter().map(loose).collect()),
        Json::Object(map) => Value::Map(map.clone()),
        // Only reachable inside arrays bound for a non-list slot, which the
        // validator rejects by shape.
        Json::Null => Value::Map(Map::new()),
    }
}

fn loose_label(raw: &Json) -> &'static str {
    match raw {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "list",
        Json::Object(_) => "map",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn nested_objects_are_built_from_their_type() {
        let membership = Entity::from_config(
            Kind::Membership,
            &json!({
                "id": "https://example.edu/terms/201601/courses/7/sections/1/rosters/1",
                "member": {"type": "Person", "id": "https://example.edu/users/554433"},
                "organization": {"type": "CourseSection", "id": "https://example.edu/terms/201601/courses/7/sections/1"},
                "roles": ["Learner"],
                "status": "Active",
                "dateCreated": "2016-11-01T06:00:00.000Z"
            }),
        )
        .expect("membership builds");
        let document = membership.to_document().expect("renders");
        assert_eq!(document["member"], "https://example.edu/users/554433");
        assert_eq!(
            document["organization"],
            "https://example.edu/terms/201601/courses/7/sections/1"
        );
        assert_eq!(document["dateCreated"], "2016-11-01T06:00:00.000Z");
    }

    #[test]
    fn nested_objects_need_a_type() {
        let err = Entity::from_config(
            Kind::Membership,
            &json!({
                "id": "membership:1",
                "member": {"id": "person:1"},
                "organization": {"type": "Organization", "id": "org:1"},
                "status": "Active"
            }),
        )
        .expect_err("member carries no type");
        assert_eq!(
            err.to_string(),
            "nested object for `member` is missing its `type`"
        );
    }

    #[test]
    fn nulls_leave_optional_properties_absent() {
        let person = Entity::from_config(
            Kind::Person,
            &json!({"id": "person:1", "name": null}),
        )
        .expect("null is absent");
        assert!(person.get_property("name").is_none());
    }

    #[test]
    fn undeclared_keys_and_foreign_types_are_rejected() {
        assert!(Entity::from_config(Kind::Person, &json!({"id": "p", "index": 1})).is_err());
        assert!(Entity::from_config(Kind::Person, &json!({"id": "p", "type": "Group"})).is_err());
        assert!(Entity::from_config(Kind::Person, &json!(["p"])).is_err());
        assert!(Entity::from_config(Kind::ViewEvent, &json!({})).is_err());
    }

    #[test]
    fn string_ids_do_not_stand_in_for_nested_objects() {
        let err = Entity::from_config(
            Kind::Membership,
            &json!({
                "id": "membership:1",
                "member": "person:1",
                "organization": {"type": "Organization", "id": "org:1"},
                "status": "Active"
            }),
        )
        .expect_err("member must be an object");
        assert!(matches!(
            err,
            CaliperError::Validation(ValidationError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn documents_round_trip_through_their_type() {
        let document = json!({
            "@context": "http://purl.imsglobal.org/ctx/caliper/v1p1",
            "id": "https://example.edu/terms/201601/courses/7/sections/1/assess/1/items/3/users/554433/responses/1",
            "type": "FillinBlankResponse",
            "attempt": {
                "id": "https://example.edu/terms/201601/courses/7/sections/1/assess/1/items/3/users/554433/attempts/1",
                "type": "Attempt",
                "count": 1
            },
            "values": ["data", "learning analytics"]
        });
        let node = Node::from_document(&document).expect("response builds");
        assert_eq!(node.kind(), Kind::FillinBlankResponse);
        let rendered = node.to_document().expect("renders");
        assert_eq!(
            rendered["attempt"],
            "https://example.edu/terms/201601/courses/7/sections/1/assess/1/items/3/users/554433/attempts/1"
        );
        assert_eq!(rendered["values"], json!(["data", "learning analytics"]));
    }
}
