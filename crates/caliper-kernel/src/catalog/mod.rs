//! The static kind catalog: supertypes, capabilities and property
//! declarations for every entity, composite and event kind.
//!
//! Kind schemas declare only their own properties. Resolution merges parent
//! property lists in parent order; a redeclared property replaces the parent
//! entry at the parent's position.

mod entities;
mod events;

use crate::property::{Embed, PropertyDecl, PropertyType};
use crate::registry::{Capability, Kind, TypeTag, registry};
use crate::vocab::Profile;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

/// Which family a kind belongs to. Drives header emission and the
/// embedding policy of nested values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeClass {
    Entity,
    Composite,
    Event,
}

impl NodeClass {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Entity => "entity",
            Self::Composite => "composite",
            Self::Event => "event",
        }
    }
}

impl fmt::Display for NodeClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A kind as declared in the static tables.
#[derive(Debug, Clone, Copy)]
pub struct KindSchema {
    pub kind: Kind,
    pub class: NodeClass,
    pub parents: &'static [TypeTag],
    pub properties: &'static [PropertyDecl],
    pub profile: Profile,
    /// Whether documents carry a `type` discriminator for this kind.
    pub emits_type: bool,
}

/// A kind with its inherited property list flattened.
#[derive(Debug, Clone)]
pub struct ResolvedSchema {
    pub kind: Kind,
    pub class: NodeClass,
    pub parents: &'static [TypeTag],
    pub profile: Profile,
    pub emits_type: bool,
    pub properties: Vec<&'static PropertyDecl>,
}

impl ResolvedSchema {
    pub fn property(&self, name: &str) -> Option<&'static PropertyDecl> {
        self.properties.iter().copied().find(|decl| decl.name == name)
    }

    pub fn required(&self) -> impl Iterator<Item = &'static PropertyDecl> + '_ {
        self.properties.iter().copied().filter(|decl| decl.required)
    }
}

pub(crate) const fn object(kind: Kind) -> PropertyType {
    PropertyType::Object(TypeTag::Kind(kind))
}

pub(crate) const fn capable(capability: Capability) -> PropertyType {
    PropertyType::Object(TypeTag::Capability(capability))
}

/// Every declared kind schema, entities and composites first.
pub fn all_schemas() -> impl Iterator<Item = &'static KindSchema> {
    entities::SCHEMAS.iter().chain(events::SCHEMAS.iter())
}

fn resolved() -> &'static BTreeMap<Kind, ResolvedSchema> {
    static RESOLVED: OnceLock<BTreeMap<Kind, ResolvedSchema>> = OnceLock::new();
    RESOLVED.get_or_init(|| {
        let declared: BTreeMap<Kind, &'static KindSchema> =
            all_schemas().map(|schema| (schema.kind, schema)).collect();
        let mut flattened = BTreeMap::new();
        for schema in declared.values() {
            flatten(schema.kind, &declared, &mut flattened);
        }
        declared
            .values()
            .map(|schema| {
                let properties = flattened.get(&schema.kind).cloned().unwrap_or_default();
                (
                    schema.kind,
                    ResolvedSchema {
                        kind: schema.kind,
                        class: schema.class,
                        parents: schema.parents,
                        profile: schema.profile,
                        emits_type: schema.emits_type,
                        properties,
                    },
                )
            })
            .collect()
    })
}

fn flatten(
    kind: Kind,
    declared: &BTreeMap<Kind, &'static KindSchema>,
    flattened: &mut BTreeMap<Kind, Vec<&'static PropertyDecl>>,
) -> Vec<&'static PropertyDecl> {
    if let Some(done) = flattened.get(&kind) {
        return done.clone();
    }
    let Some(schema) = declared.get(&kind) else {
        return Vec::new();
    };

    let mut properties: Vec<&'static PropertyDecl> = Vec::new();
    let parent_kinds = schema.parents.iter().filter_map(|tag| match tag {
        TypeTag::Kind(parent) => Some(*parent),
        TypeTag::Capability(_) => None,
    });
    for parent in parent_kinds {
        for decl in flatten(parent, declared, flattened) {
            if !properties.iter().any(|known| known.name == decl.name) {
                properties.push(decl);
            }
        }
    }
    for decl in schema.properties {
        match properties.iter_mut().find(|known| known.name == decl.name) {
            Some(slot) => *slot = decl,
            None => properties.push(decl),
        }
    }

    flattened.insert(kind, properties.clone());
    properties
}

/// The resolved schema of `kind`.
///
/// # Panics
///
/// Panics when `kind` has no schema; every `Kind` variant is declared.
pub fn schema(kind: Kind) -> &'static ResolvedSchema {
    resolved()
        .get(&kind)
        .unwrap_or_else(|| panic!("kind `{kind}` has no catalog schema"))
}

/// Machine-readable dump of the whole catalog.
pub fn catalog_json() -> Value {
    let kinds: Vec<Value> = Kind::ALL
        .iter()
        .map(|kind| {
            let schema = schema(*kind);
            let properties: Vec<Value> = schema
                .properties
                .iter()
                .map(|decl| {
                    json!({
                        "name": decl.name,
                        "type": decl.ty.to_string(),
                        "required": decl.required,
                        "mutable": decl.mutable,
                        "alwaysEmbed": decl.embed == Embed::Always,
                    })
                })
                .collect();
            json!({
                "type": kind.as_str(),
                "class": schema.class.as_str(),
                "profile": schema.profile.as_str(),
                "ancestors": registry().ancestors(*kind),
                "capabilities": registry().capabilities(*kind),
                "properties": properties,
            })
        })
        .collect();
    json!({ "kinds": kinds })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(kind: Kind) -> Vec<&'static str> {
        schema(kind).properties.iter().map(|decl| decl.name).collect()
    }

    #[test]
    fn every_kind_has_exactly_one_schema() {
        let mut seen = BTreeMap::new();
        for declared in all_schemas() {
            assert!(
                seen.insert(declared.kind, ()).is_none(),
                "{} declared twice",
                declared.kind
            );
        }
        for kind in Kind::ALL {
            assert!(seen.contains_key(kind), "{kind} has no schema");
        }
    }

    #[test]
    fn entity_base_properties_come_first() {
        assert_eq!(
            names(Kind::Person),
            [
                "id",
                "dateCreated",
                "dateModified",
                "description",
                "name",
                "extensions"
            ]
        );
        assert_eq!(
            &names(Kind::SoftwareApplication)[6..],
            ["version"]
        );
    }

    #[test]
    fn redeclared_properties_keep_the_parent_position() {
        let group = schema(Kind::Group);
        let organization = schema(Kind::Organization);
        assert_eq!(names(Kind::Group), names(Kind::Organization));
        assert_eq!(
            group.property("members").map(|decl| decl.ty.to_string()),
            Some("list of Person".to_string())
        );
        assert_eq!(
            organization.property("members").map(|decl| decl.ty.to_string()),
            Some("list of Agent".to_string())
        );
    }

    #[test]
    fn multiple_parents_merge_without_duplicates() {
        let assessment = names(Kind::Assessment);
        let items = assessment.iter().filter(|name| **name == "items").count();
        assert_eq!(items, 1);
        assert!(assessment.contains(&"dateToSubmit"));
        assert_eq!(
            schema(Kind::Assessment)
                .property("items")
                .map(|decl| decl.ty.to_string()),
            Some("list of AssessmentItem".to_string())
        );
    }

    #[test]
    fn event_kinds_narrow_the_base_event() {
        let view = schema(Kind::ViewEvent);
        assert_eq!(names(Kind::ViewEvent), names(Kind::Event));
        assert_eq!(
            view.property("object").map(|decl| decl.ty.to_string()),
            Some("DigitalResource".to_string())
        );
        let required: Vec<_> = view.required().map(|decl| decl.name).collect();
        assert_eq!(required, ["actor", "action", "object", "eventTime"]);
    }

    #[test]
    fn composites_carry_no_identifier() {
        assert_eq!(names(Kind::TextPositionSelector), ["start", "end"]);
        assert!(schema(Kind::LearningContext).property("id").is_none());
        assert!(!schema(Kind::LearningContext).emits_type);
    }

    #[test]
    fn catalog_dump_lists_every_kind() {
        let dump = catalog_json();
        let kinds = dump["kinds"].as_array().expect("kinds array");
        assert_eq!(kinds.len(), Kind::ALL.len());
        let frame = kinds
            .iter()
            .find(|entry| entry["type"] == "Frame")
            .expect("Frame entry");
        assert_eq!(
            frame["capabilities"],
            json!(["Generatable", "Referrable", "Targetable"])
        );
        assert_eq!(frame["class"], "entity");
    }
}
