//! Entities, composites and their builders.

use crate::catalog::{NodeClass, schema};
use crate::container::PropertyContainer;
use crate::error::{CaliperError, ValidationError};
use crate::registry::Kind;
use crate::serialize;
use crate::value::{Extensions, Value};
use std::collections::BTreeMap;

/// Collects named candidate values and assigns them in declaration order.
#[derive(Debug, Clone)]
pub(crate) struct NodeBuilder {
    kind: Kind,
    context: Option<String>,
    values: BTreeMap<String, Value>,
}

impl NodeBuilder {
    pub(crate) fn new(kind: Kind) -> Self {
        Self {
            kind,
            context: None,
            values: BTreeMap::new(),
        }
    }

    pub(crate) fn set(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(name.into(), value.into());
    }

    pub(crate) fn context(&mut self, context: impl Into<String>) {
        self.context = Some(context.into());
    }

    pub(crate) fn build(mut self, expected: NodeClass) -> Result<PropertyContainer, CaliperError> {
        let schema = schema(self.kind);
        if schema.class != expected {
            return Err(CaliperError::WrongClass {
                kind: self.kind,
                expected: expected.as_str(),
                actual: schema.class.as_str(),
            });
        }
        if let Some(unknown) = self
            .values
            .keys()
            .find(|name| schema.property(name).is_none())
        {
            return Err(ValidationError::UnknownProperty {
                kind: self.kind,
                property: unknown.clone(),
            }
            .into());
        }

        let missing: Vec<String> = schema
            .required()
            .filter(|decl| !self.values.contains_key(decl.name))
            .map(|decl| decl.name.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CaliperError::RequiredPropertyMissing {
                kind: self.kind,
                id: self
                    .values
                    .get("id")
                    .and_then(Value::as_str)
                    .map(str::to_string),
                properties: missing,
            });
        }

        let mut container = PropertyContainer::new(self.kind);
        if let Some(context) = self.context {
            container.set_context(context);
        }
        for decl in &schema.properties {
            if let Some(value) = self.values.remove(decl.name) {
                container.set_property(decl.name, Some(value))?;
            }
        }
        tracing::debug!(kind = %self.kind, id = container.id().unwrap_or_default(), "built");
        Ok(container)
    }
}

/// An identified domain object: a person, a resource, an attempt, ...
#[derive(Debug, Clone, PartialEq)]
pub struct Entity(PropertyContainer);

impl Entity {
    pub fn builder(kind: Kind) -> EntityBuilder {
        EntityBuilder(NodeBuilder::new(kind))
    }

    pub(crate) fn from_container(container: PropertyContainer) -> Self {
        Self(container)
    }

    pub fn kind(&self) -> Kind {
        self.0.kind()
    }

    pub fn id(&self) -> &str {
        self.0.id().unwrap_or_default()
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.0.get_property(name)
    }

    /// Re-set a mutable property (`endedAtTime`, `isPartOf`, ...).
    pub fn update_property(
        &mut self,
        name: &str,
        value: Option<Value>,
    ) -> Result<(), CaliperError> {
        self.0.update_property(name, value)
    }

    pub fn container(&self) -> &PropertyContainer {
        &self.0
    }

    pub fn into_container(self) -> PropertyContainer {
        self.0
    }

    pub fn to_document(&self) -> Result<serde_json::Value, CaliperError> {
        serialize::to_document(&self.0)
    }

    pub fn to_json_string(&self) -> Result<String, CaliperError> {
        serialize::to_json_string(&self.0)
    }
}

impl From<Entity> for Value {
    fn from(entity: Entity) -> Self {
        Value::Node(Box::new(entity.0))
    }
}

impl From<&Entity> for Value {
    fn from(entity: &Entity) -> Self {
        Value::Node(Box::new(entity.0.clone()))
    }
}

#[derive(Debug, Clone)]
pub struct EntityBuilder(NodeBuilder);

impl EntityBuilder {
    pub fn id(self, id: impl Into<String>) -> Self {
        self.property("id", Value::Text(id.into()))
    }

    pub fn name(self, name: impl Into<String>) -> Self {
        self.property("name", Value::Text(name.into()))
    }

    pub fn description(self, description: impl Into<String>) -> Self {
        self.property("description", Value::Text(description.into()))
    }

    pub fn date_created(self, at: impl Into<Value>) -> Self {
        self.property("dateCreated", at)
    }

    pub fn date_modified(self, at: impl Into<Value>) -> Self {
        self.property("dateModified", at)
    }

    pub fn extensions(self, extensions: Extensions) -> Self {
        self.property("extensions", extensions)
    }

    /// Any declared property of the kind. Checked at [`build`](Self::build).
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.set(name, value);
        self
    }

    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.0.context(context);
        self
    }

    pub fn build(self) -> Result<Entity, CaliperError> {
        self.0.build(NodeClass::Entity).map(Entity)
    }
}

/// An unidentified value object that is always embedded in full:
/// `TextPositionSelector`, `LearningContext`.
#[derive(Debug, Clone, PartialEq)]
pub struct Composite(PropertyContainer);

impl Composite {
    pub fn builder(kind: Kind) -> CompositeBuilder {
        CompositeBuilder(NodeBuilder::new(kind))
    }

    pub fn text_position_selector(start: i64, end: i64) -> Result<Self, CaliperError> {
        Self::builder(Kind::TextPositionSelector)
            .property("start", start)
            .property("end", end)
            .build()
    }

    pub(crate) fn from_container(container: PropertyContainer) -> Self {
        Self(container)
    }

    pub fn kind(&self) -> Kind {
        self.0.kind()
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.0.get_property(name)
    }

    pub fn update_property(
        &mut self,
        name: &str,
        value: Option<Value>,
    ) -> Result<(), CaliperError> {
        self.0.update_property(name, value)
    }

    pub fn container(&self) -> &PropertyContainer {
        &self.0
    }

    pub fn to_document(&self) -> Result<serde_json::Value, CaliperError> {
        serialize::to_document(&self.0)
    }
}

impl From<Composite> for Value {
    fn from(composite: Composite) -> Self {
        Value::Node(Box::new(composite.0))
    }
}

#[derive(Debug, Clone)]
pub struct CompositeBuilder(NodeBuilder);

impl CompositeBuilder {
    pub fn property(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.set(name, value);
        self
    }

    pub fn build(self) -> Result<Composite, CaliperError> {
        self.0.build(NodeClass::Composite).map(Composite)
    }
}
