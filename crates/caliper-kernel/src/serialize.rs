//! Canonical JSON rendering of containers.
//!
//! The document subject is rendered in full. A nested entity is reduced to
//! its identifier unless its declaration is marked always-embed, it is a
//! composite, or its owner is an event subject: the entity-valued properties
//! of an event are the payload's principal subjects and are embedded, with
//! their own nested entities reduced to identifiers. Every embedded entity
//! carries its `@context` and `type`; composites carry neither context nor
//! identifier.

use crate::catalog::{NodeClass, schema};
use crate::container::PropertyContainer;
use crate::error::{CaliperError, ValidationError};
use crate::property::{Embed, PropertyDecl, PropertyType, format_date_time};
use crate::registry::{TypeTag, registry};
use crate::value::Value;
use serde_json::{Map, Number, Value as Json};

/// Render `container` as the document subject.
pub fn to_document(container: &PropertyContainer) -> Result<Json, CaliperError> {
    let embed_children = container.class() == NodeClass::Event;
    let document = render(container, embed_children)?;
    tracing::debug!(
        kind = %container.kind(),
        id = container.id().unwrap_or_default(),
        "rendered document"
    );
    Ok(document)
}

/// Compact JSON text of [`to_document`].
pub fn to_json_string(container: &PropertyContainer) -> Result<String, CaliperError> {
    Ok(serde_json::to_string(&to_document(container)?)?)
}

/// Indented JSON text of [`to_document`].
pub fn to_json_pretty(container: &PropertyContainer) -> Result<String, CaliperError> {
    Ok(serde_json::to_string_pretty(&to_document(container)?)?)
}

fn render(container: &PropertyContainer, embed_children: bool) -> Result<Json, CaliperError> {
    container.assert_complete()?;
    let kind = container.kind();
    let mut document = Map::new();

    if let Some(context) = container.context() {
        document.insert("@context".to_string(), Json::String(context.to_string()));
    }
    if let Some(id) = container.id() {
        document.insert("id".to_string(), Json::String(id.to_string()));
    }
    if schema(kind).emits_type {
        document.insert("type".to_string(), Json::String(kind.as_str().to_string()));
    }

    for (decl, value) in container.properties() {
        if decl.name == "id" {
            continue;
        }
        let rendered = render_value(container, decl, &decl.ty, value, embed_children)?;
        document.insert(decl.name.to_string(), rendered);
    }
    Ok(Json::Object(document))
}

fn render_value(
    owner: &PropertyContainer,
    decl: &'static PropertyDecl,
    ty: &PropertyType,
    value: &Value,
    embed_children: bool,
) -> Result<Json, CaliperError> {
    let non_serializable = || CaliperError::NonSerializable {
        kind: owner.kind(),
        property: decl.name.to_string(),
    };

    match value {
        Value::Text(text) => Ok(Json::String(text.clone())),
        Value::Integer(number) => Ok(Json::from(*number)),
        Value::Float(number) => Number::from_f64(*number)
            .map(Json::Number)
            .ok_or_else(non_serializable),
        Value::Boolean(flag) => Ok(Json::Bool(*flag)),
        Value::DateTime(instant) => Ok(Json::String(format_date_time(instant))),
        Value::Duration(duration) => Ok(Json::String(duration.to_string())),
        Value::Map(map) => Ok(Json::Object(map.clone())),
        Value::List(items) => {
            let item_ty = match ty {
                PropertyType::List(item) => *item,
                _ => ty,
            };
            items
                .iter()
                .map(|item| render_value(owner, decl, item_ty, item, embed_children))
                .collect::<Result<Vec<_>, _>>()
                .map(Json::Array)
        }
        Value::Node(node) => {
            if let PropertyType::Object(tag) = ty {
                recheck_kind(decl, *tag, node)?;
            }
            let embed = embed_children
                || decl.embed == Embed::Always
                || node.class() == NodeClass::Composite;
            if embed {
                render(node, false)
            } else {
                node.id()
                    .map(|id| Json::String(id.to_string()))
                    .ok_or_else(|| CaliperError::RequiredPropertyMissing {
                        kind: node.kind(),
                        id: None,
                        properties: vec!["id".to_string()],
                    })
            }
        }
    }
}

fn recheck_kind(
    decl: &PropertyDecl,
    tag: TypeTag,
    node: &PropertyContainer,
) -> Result<(), CaliperError> {
    if registry().satisfies(node.kind(), tag) {
        Ok(())
    } else {
        Err(ValidationError::KindMismatch {
            property: decl.name.to_string(),
            expected: tag,
            actual: node.kind(),
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::Kind;
    use serde_json::json;

    fn person(id: &str) -> PropertyContainer {
        let mut person = PropertyContainer::new(Kind::Person);
        person
            .set_property("id", Some(id.into()))
            .expect("id is a string");
        person
    }

    #[test]
    fn header_fields_precede_properties() {
        let mut frame = PropertyContainer::new(Kind::Frame);
        frame
            .set_property("id", Some("frame:1".into()))
            .expect("id");
        frame.set_property("index", Some(2.into())).expect("index");
        frame
            .set_property("name", Some("Frame 2".into()))
            .expect("name");
        let text = to_json_string(&frame).expect("frame renders");
        assert_eq!(
            text,
            r#"{"@context":"http://purl.imsglobal.org/ctx/caliper/v1p1","id":"frame:1","type":"Frame","name":"Frame 2","index":2}"#
        );
    }

    #[test]
    fn nested_entities_collapse_to_identifiers() {
        let mut organization = PropertyContainer::new(Kind::Organization);
        organization
            .set_property("id", Some("org:1".into()))
            .expect("id");
        organization
            .set_property(
                "members",
                Some(Value::List(vec![person("person:1").into(), person("person:2").into()])),
            )
            .expect("people are agents");
        let document = to_document(&organization).expect("renders");
        assert_eq!(document["members"], json!(["person:1", "person:2"]));
    }

    #[test]
    fn embedded_entities_carry_their_own_context() {
        let mut actor = person("person:1");
        actor.set_context("http://example.edu/ctx/custom");
        let mut event = PropertyContainer::new(Kind::Event);
        event.set_property("actor", Some(actor.into())).expect("actor");
        event.set_property("action", Some("Viewed".into())).expect("action");
        event
            .set_property("object", Some(person("person:2").into()))
            .expect("object");
        event
            .set_property("eventTime", Some("2016-11-15T10:15:00.000Z".into()))
            .expect("eventTime");

        let document = to_document(&event).expect("renders");
        assert_eq!(
            document["actor"],
            json!({
                "@context": "http://example.edu/ctx/custom",
                "id": "person:1",
                "type": "Person"
            })
        );
        assert_eq!(
            document["object"]["@context"],
            "http://purl.imsglobal.org/ctx/caliper/v1p1"
        );
    }

    #[test]
    fn non_finite_floats_cannot_be_rendered() {
        let mut measure = PropertyContainer::new(Kind::AggregateMeasure);
        measure
            .set_property("id", Some("measure:1".into()))
            .expect("id");
        measure
            .set_property("metric", Some("MinutesOnTask".into()))
            .expect("metric");
        assert!(
            measure
                .set_property("metricValue", Some(f64::INFINITY.into()))
                .is_err()
        );
        measure
            .set_property("metricValue", Some(12.5.into()))
            .expect("finite");
        let document = to_document(&measure).expect("renders");
        assert_eq!(document["metricValue"], json!(12.5));
    }

    #[test]
    fn incomplete_containers_do_not_render() {
        let container = PropertyContainer::new(Kind::Person);
        let err = to_document(&container).expect_err("id is missing");
        assert_eq!(err.missing_properties(), ["id"]);
    }
}
