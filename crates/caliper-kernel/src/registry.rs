//! Type registry: which concrete kinds satisfy which type tags.
//!
//! A tag is either a concrete kind (`Person`, `DigitalResource`, ...) or a
//! capability marker (`Assignable`, `Generatable`, `Referrable`,
//! `Targetable`). A kind satisfies itself, every ancestor kind, and every
//! capability declared by it or by an ancestor.
//!
//! The registry is built once from the static catalog and never mutated, so
//! it can be read concurrently without synchronization.

use crate::catalog::{self, KindSchema};
use crate::error::CaliperError;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

macro_rules! kinds {
    ($($variant:ident),* $(,)?) => {
        /// Every concrete kind in the catalog: entities, composites and events.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        pub enum Kind {
            $($variant),*
        }

        impl Kind {
            pub const ALL: &'static [Kind] = &[$(Kind::$variant),*];

            /// The type discriminator emitted in documents.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(Kind::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

kinds![
    // Entities
    Entity,
    Agent,
    Person,
    SoftwareApplication,
    Organization,
    CourseOffering,
    CourseSection,
    Group,
    Membership,
    LearningObjective,
    AggregateMeasure,
    AggregateMeasureCollection,
    DigitalResource,
    DigitalResourceCollection,
    Frame,
    Reading,
    Link,
    LtiLink,
    WebPage,
    Document,
    Chapter,
    Page,
    EpubChapter,
    EpubPart,
    EpubSubChapter,
    EpubVolume,
    Annotation,
    BookmarkAnnotation,
    HighlightAnnotation,
    SharedAnnotation,
    TagAnnotation,
    AssignableDigitalResource,
    Assessment,
    AssessmentItem,
    Attempt,
    Response,
    FillinBlankResponse,
    MultipleChoiceResponse,
    MultipleResponseResponse,
    SelectTextResponse,
    TrueFalseResponse,
    Forum,
    Thread,
    Message,
    MediaObject,
    MediaLocation,
    AudioObject,
    ImageObject,
    VideoObject,
    Result,
    Score,
    Query,
    SearchResponse,
    Session,
    LtiSession,
    // Composites
    TextPositionSelector,
    LearningContext,
    // Events
    Event,
    AnnotationEvent,
    AssessmentEvent,
    AssessmentItemEvent,
    AssignableEvent,
    ForumEvent,
    MediaEvent,
    MessageEvent,
    NavigationEvent,
    GradeEvent,
    SessionEvent,
    ThreadEvent,
    ToolUseEvent,
    ViewEvent,
    SearchEvent,
];

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Kind {
    type Err = CaliperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Kind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| CaliperError::UnknownTypeTag(name.to_string()))
    }
}

/// Structural roles a kind may carry in addition to its kind ancestry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Capability {
    Assignable,
    Generatable,
    Referrable,
    Targetable,
}

impl Capability {
    pub const ALL: &'static [Capability] = &[
        Capability::Assignable,
        Capability::Generatable,
        Capability::Referrable,
        Capability::Targetable,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Assignable => "Assignable",
            Self::Generatable => "Generatable",
            Self::Referrable => "Referrable",
            Self::Targetable => "Targetable",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A requirement on the kind of a nested value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(untagged)]
pub enum TypeTag {
    Kind(Kind),
    Capability(Capability),
}

impl TypeTag {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Kind(kind) => kind.as_str(),
            Self::Capability(capability) => capability.as_str(),
        }
    }
}

impl From<Kind> for TypeTag {
    fn from(kind: Kind) -> Self {
        Self::Kind(kind)
    }
}

impl From<Capability> for TypeTag {
    fn from(capability: Capability) -> Self {
        Self::Capability(capability)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TypeTag {
    type Err = CaliperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Some(capability) = Capability::ALL
            .iter()
            .copied()
            .find(|capability| capability.as_str() == name)
        {
            return Ok(Self::Capability(capability));
        }
        name.parse::<Kind>().map(Self::Kind)
    }
}

/// Tag → satisfying kinds, and kind → satisfied tags.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    satisfying: BTreeMap<TypeTag, BTreeSet<Kind>>,
    satisfied: BTreeMap<Kind, BTreeSet<TypeTag>>,
}

impl TypeRegistry {
    /// Build the closure over a set of kind declarations.
    ///
    /// Every declared kind and every parent tag mentioned by a declaration
    /// becomes a known tag, even when nothing satisfies it.
    pub fn from_schemas(schemas: &[KindSchema]) -> Self {
        let parents: BTreeMap<Kind, &[TypeTag]> = schemas
            .iter()
            .map(|schema| (schema.kind, schema.parents))
            .collect();

        let mut registry = Self::default();
        for schema in schemas {
            registry.satisfying.entry(TypeTag::Kind(schema.kind)).or_default();
            for parent in schema.parents {
                registry.satisfying.entry(*parent).or_default();
            }
        }

        for schema in schemas {
            let mut tags = BTreeSet::new();
            let mut pending = vec![TypeTag::Kind(schema.kind)];
            while let Some(tag) = pending.pop() {
                if !tags.insert(tag) {
                    continue;
                }
                if let TypeTag::Kind(kind) = tag
                    && let Some(direct) = parents.get(&kind)
                {
                    pending.extend(direct.iter().copied());
                }
            }
            for tag in &tags {
                registry
                    .satisfying
                    .entry(*tag)
                    .or_default()
                    .insert(schema.kind);
            }
            registry.satisfied.insert(schema.kind, tags);
        }
        registry
    }

    /// Whether `candidate` satisfies `required`.
    ///
    /// # Panics
    ///
    /// Panics when either side is unknown to the registry. The tag set is
    /// closed, so an unknown tag is a programming error.
    pub fn satisfies(&self, candidate: Kind, required: TypeTag) -> bool {
        if !self.satisfying.contains_key(&required) {
            panic!("type tag `{required}` is not declared in the type registry");
        }
        self.tags_of(candidate).contains(&required)
    }

    /// Every concrete kind satisfying `tag`.
    ///
    /// # Panics
    ///
    /// Panics when `tag` is unknown to the registry.
    pub fn kinds_satisfying(&self, tag: TypeTag) -> &BTreeSet<Kind> {
        self.satisfying
            .get(&tag)
            .unwrap_or_else(|| panic!("type tag `{tag}` is not declared in the type registry"))
    }

    /// Every tag `kind` satisfies, itself included.
    ///
    /// # Panics
    ///
    /// Panics when `kind` is unknown to the registry.
    pub fn tags_of(&self, kind: Kind) -> &BTreeSet<TypeTag> {
        self.satisfied
            .get(&kind)
            .unwrap_or_else(|| panic!("kind `{kind}` is not declared in the type registry"))
    }

    /// Capabilities carried by `kind`, directly or through an ancestor.
    pub fn capabilities(&self, kind: Kind) -> Vec<Capability> {
        self.tags_of(kind)
            .iter()
            .filter_map(|tag| match tag {
                TypeTag::Capability(capability) => Some(*capability),
                TypeTag::Kind(_) => None,
            })
            .collect()
    }

    /// Ancestor kinds of `kind`, excluding itself.
    pub fn ancestors(&self, kind: Kind) -> Vec<Kind> {
        self.tags_of(kind)
            .iter()
            .filter_map(|tag| match tag {
                TypeTag::Kind(ancestor) if *ancestor != kind => Some(*ancestor),
                _ => None,
            })
            .collect()
    }
}

/// The process-wide registry built from the static catalog.
pub fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let schemas: Vec<KindSchema> = catalog::all_schemas().copied().collect();
        TypeRegistry::from_schemas(&schemas)
    })
}
