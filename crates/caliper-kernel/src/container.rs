//! The ordered, typed property store behind every entity, composite and
//! event.
//!
//! A container is created with one empty slot per declared property of its
//! kind, in declaration order. Every write goes through the validator, so a
//! container never holds a value its declaration would reject.

use crate::catalog::{NodeClass, schema};
use crate::error::{CaliperError, ValidationError};
use crate::property::{PropertyDecl, validate};
use crate::registry::Kind;
use crate::value::Value;
use crate::vocab::{DEFAULT_CONTEXT, Profile};

#[derive(Debug, Clone, PartialEq)]
struct Slot {
    decl: &'static PropertyDecl,
    value: Option<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PropertyContainer {
    kind: Kind,
    context: Option<String>,
    slots: Vec<Slot>,
}

impl PropertyContainer {
    /// An empty container for `kind`. Entities and events start with the
    /// default JSON-LD context; composites carry none.
    pub fn new(kind: Kind) -> Self {
        let schema = schema(kind);
        let context = match schema.class {
            NodeClass::Composite => None,
            NodeClass::Entity | NodeClass::Event => Some(DEFAULT_CONTEXT.to_string()),
        };
        Self {
            kind,
            context,
            slots: schema
                .properties
                .iter()
                .map(|decl| Slot {
                    decl: *decl,
                    value: None,
                })
                .collect(),
        }
    }

    pub fn kind(&self) -> Kind {
        self.kind
    }

    pub fn class(&self) -> NodeClass {
        schema(self.kind).class
    }

    pub fn profile(&self) -> Profile {
        schema(self.kind).profile
    }

    pub fn context(&self) -> Option<&str> {
        self.context.as_deref()
    }

    /// Override the JSON-LD context label. Ignored for composites, which
    /// never carry one.
    pub fn set_context(&mut self, context: impl Into<String>) {
        if self.class() != NodeClass::Composite {
            self.context = Some(context.into());
        }
    }

    pub fn id(&self) -> Option<&str> {
        self.get_property("id").and_then(Value::as_str)
    }

    pub fn declaration(&self, name: &str) -> Option<&'static PropertyDecl> {
        self.slot(name).map(|slot| slot.decl)
    }

    pub fn get_property(&self, name: &str) -> Option<&Value> {
        self.slot(name).and_then(|slot| slot.value.as_ref())
    }

    /// Set properties with their declarations, in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = (&'static PropertyDecl, &Value)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.value.as_ref().map(|value| (slot.decl, value)))
    }

    /// First assignment of a property.
    ///
    /// `None` leaves an optional property absent and fails for a required
    /// one. Re-assigning a write-once property that already holds a value
    /// fails with [`ValidationError::Immutable`].
    pub fn set_property(&mut self, name: &str, value: Option<Value>) -> Result<(), CaliperError> {
        let kind = self.kind;
        let index = self.slot_index(name)?;
        let slot = &self.slots[index];
        if slot.value.is_some() && !slot.decl.mutable {
            return Err(ValidationError::Immutable {
                kind,
                property: name.to_string(),
            }
            .into());
        }
        self.assign(index, value)
    }

    /// Re-assignment of a property declared mutable. Validation runs again;
    /// every other property is write-once.
    pub fn update_property(
        &mut self,
        name: &str,
        value: Option<Value>,
    ) -> Result<(), CaliperError> {
        let index = self.slot_index(name)?;
        if !self.slots[index].decl.mutable {
            return Err(ValidationError::Immutable {
                kind: self.kind,
                property: name.to_string(),
            }
            .into());
        }
        self.assign(index, value)
    }

    /// Names of required properties that are still absent.
    pub fn missing_required(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|slot| slot.decl.required && slot.value.is_none())
            .map(|slot| slot.decl.name.to_string())
            .collect()
    }

    /// Fail with every required property still absent.
    pub fn assert_complete(&self) -> Result<(), CaliperError> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(self.missing(missing))
        }
    }

    fn assign(&mut self, index: usize, value: Option<Value>) -> Result<(), CaliperError> {
        let decl = self.slots[index].decl;
        let value = match value {
            Some(value) => Some(validate(decl.name, &decl.ty, value)?),
            None if decl.required => return Err(self.missing(vec![decl.name.to_string()])),
            None => None,
        };
        tracing::trace!(
            kind = %self.kind,
            property = decl.name,
            present = value.is_some(),
            "property assigned"
        );
        self.slots[index].value = value;
        Ok(())
    }

    fn missing(&self, properties: Vec<String>) -> CaliperError {
        CaliperError::RequiredPropertyMissing {
            kind: self.kind,
            id: self.id().map(str::to_string),
            properties,
        }
    }

    fn slot(&self, name: &str) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.decl.name == name)
    }

    fn slot_index(&self, name: &str) -> Result<usize, CaliperError> {
        self.slots
            .iter()
            .position(|slot| slot.decl.name == name)
            .ok_or_else(|| {
                ValidationError::UnknownProperty {
                    kind: self.kind,
                    property: name.to_string(),
                }
                .into()
            })
    }
}
