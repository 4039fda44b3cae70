//! Events: actor, action and object at a point in time.

use crate::catalog::NodeClass;
use crate::container::PropertyContainer;
use crate::entity::{Composite, NodeBuilder};
use crate::error::CaliperError;
use crate::registry::Kind;
use crate::serialize;
use crate::value::{Extensions, Value};

/// Prefix of generated event identifiers.
pub const UUID_URN_PREFIX: &str = "urn:uuid:";

#[derive(Debug, Clone, PartialEq)]
pub struct Event(PropertyContainer);

impl Event {
    pub fn builder(kind: Kind) -> EventBuilder {
        EventBuilder(NodeBuilder::new(kind))
    }

    pub(crate) fn from_container(container: PropertyContainer) -> Self {
        Self(container)
    }

    pub fn kind(&self) -> Kind {
        self.0.kind()
    }

    pub fn id(&self) -> Option<&str> {
        self.0.id()
    }

    pub fn action(&self) -> Option<&str> {
        self.0.get_property("action").and_then(Value::as_str)
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.0.get_property(name)
    }

    pub fn container(&self) -> &PropertyContainer {
        &self.0
    }

    pub fn to_document(&self) -> Result<serde_json::Value, CaliperError> {
        serialize::to_document(&self.0)
    }

    pub fn to_json_string(&self) -> Result<String, CaliperError> {
        serialize::to_json_string(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct EventBuilder(NodeBuilder);

impl EventBuilder {
    pub fn id(self, id: impl Into<String>) -> Self {
        self.property("id", Value::Text(id.into()))
    }

    /// Assign a fresh `urn:uuid:` identifier.
    pub fn generate_id(self) -> Self {
        let id = format!("{UUID_URN_PREFIX}{}", uuid::Uuid::new_v4());
        self.id(id)
    }

    pub fn actor(self, actor: impl Into<Value>) -> Self {
        self.property("actor", actor)
    }

    pub fn action(self, action: impl Into<String>) -> Self {
        self.property("action", Value::Text(action.into()))
    }

    pub fn object(self, object: impl Into<Value>) -> Self {
        self.property("object", object)
    }

    pub fn event_time(self, at: impl Into<Value>) -> Self {
        self.property("eventTime", at)
    }

    pub fn target(self, target: impl Into<Value>) -> Self {
        self.property("target", target)
    }

    pub fn generated(self, generated: impl Into<Value>) -> Self {
        self.property("generated", generated)
    }

    pub fn ed_app(self, ed_app: impl Into<Value>) -> Self {
        self.property("edApp", ed_app)
    }

    pub fn group(self, group: impl Into<Value>) -> Self {
        self.property("group", group)
    }

    pub fn membership(self, membership: impl Into<Value>) -> Self {
        self.property("membership", membership)
    }

    pub fn federated_session(self, session: impl Into<Value>) -> Self {
        self.property("federatedSession", session)
    }

    pub fn extensions(self, extensions: Extensions) -> Self {
        self.property("extensions", extensions)
    }

    /// Copy the references of a `LearningContext` onto the event; its
    /// `session` becomes the event's `federatedSession`.
    pub fn learning_context(mut self, context: &Composite) -> Self {
        for (from, to) in [
            ("edApp", "edApp"),
            ("group", "group"),
            ("membership", "membership"),
            ("session", "federatedSession"),
        ] {
            if let Some(value) = context.get_property(from) {
                self.0.set(to, value.clone());
            }
        }
        self
    }

    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.set(name, value);
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.0.context(context);
        self
    }

    pub fn build(self) -> Result<Event, CaliperError> {
        self.0.build(NodeClass::Event).map(Event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::error::ValidationError;
    use serde_json::json;

    fn person() -> Entity {
        Entity::builder(Kind::Person)
            .id("https://example.edu/users/554433")
            .build()
            .expect("person builds")
    }

    fn epub() -> Entity {
        Entity::builder(Kind::Document)
            .id("https://example.com/#/texts/imscaliperimplguide")
            .name("IMS Caliper Implementation Guide")
            .property(
                "isPartOf",
                Entity::builder(Kind::DigitalResourceCollection)
                    .id("https://example.com/#/collections/caliper")
                    .build()
                    .expect("collection builds"),
            )
            .build()
            .expect("document builds")
    }

    #[test]
    fn event_subjects_are_embedded_with_their_references_collapsed() {
        let event = Event::builder(Kind::ViewEvent)
            .id("urn:uuid:cd088ca7-c044-405c-bb41-0b2a8506f907")
            .actor(person())
            .action("Viewed")
            .object(epub())
            .event_time("2016-11-15T10:15:00.000Z")
            .build()
            .expect("view event builds");
        let document = event.to_document().expect("renders");
        assert_eq!(
            document["actor"],
            json!({
                "@context": "http://purl.imsglobal.org/ctx/caliper/v1p1",
                "id": "https://example.edu/users/554433",
                "type": "Person"
            })
        );
        assert_eq!(document["object"]["type"], "Document");
        assert_eq!(
            document["object"]["isPartOf"],
            "https://example.com/#/collections/caliper"
        );
        assert_eq!(
            document["object"]["@context"],
            "http://purl.imsglobal.org/ctx/caliper/v1p1"
        );
        assert_eq!(document["eventTime"], "2016-11-15T10:15:00.000Z");
    }

    #[test]
    fn actions_are_constrained_per_event_kind() {
        let err = Event::builder(Kind::ViewEvent)
            .actor(person())
            .action("Graded")
            .object(epub())
            .event_time("2016-11-15T10:15:00Z")
            .build()
            .expect_err("Graded is not a view action");
        assert!(matches!(
            err,
            CaliperError::Validation(ValidationError::NotInEnum { .. })
        ));

        Event::builder(Kind::Event)
            .actor(person())
            .action("Graded")
            .object(epub())
            .event_time("2016-11-15T10:15:00Z")
            .build()
            .expect("the generic event accepts every action");
    }

    #[test]
    fn object_kinds_are_constrained_per_event_kind() {
        let err = Event::builder(Kind::ViewEvent)
            .actor(person())
            .action("Viewed")
            .object(person())
            .event_time("2016-11-15T10:15:00Z")
            .build()
            .expect_err("a person is not a digital resource");
        assert!(matches!(
            err,
            CaliperError::Validation(ValidationError::KindMismatch { .. })
        ));
    }

    #[test]
    fn generated_ids_are_uuid_urns() {
        let event = Event::builder(Kind::NavigationEvent)
            .generate_id()
            .actor(person())
            .action("NavigatedTo")
            .object(epub())
            .event_time("2016-11-15T10:15:00Z")
            .build()
            .expect("navigation event builds");
        let id = event.id().expect("generated");
        assert!(id.starts_with(UUID_URN_PREFIX));
        assert!(uuid::Uuid::parse_str(&id[UUID_URN_PREFIX.len()..]).is_ok());
    }

    #[test]
    fn learning_context_maps_session_to_federated_session() {
        let app = Entity::builder(Kind::SoftwareApplication)
            .id("https://example.edu")
            .build()
            .expect("app builds");
        let session = Entity::builder(Kind::LtiSession)
            .id("https://example.edu/lti/sessions/b533eb02823f31024e6b7f53436c42fb99b31241")
            .build()
            .expect("session builds");
        let context = Composite::builder(Kind::LearningContext)
            .property("edApp", app)
            .property("session", session)
            .build()
            .expect("context builds");
        let event = Event::builder(Kind::SessionEvent)
            .actor(person())
            .action("LoggedIn")
            .object(epub())
            .event_time("2016-11-15T10:15:00Z")
            .learning_context(&context)
            .build()
            .expect("session event builds");
        assert_eq!(
            event
                .get_property("federatedSession")
                .and_then(Value::as_node)
                .map(|node| node.kind()),
            Some(Kind::LtiSession)
        );
        assert!(event.get_property("edApp").is_some());
        assert!(event.get_property("group").is_none());
    }
}
