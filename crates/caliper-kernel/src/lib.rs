//! # Caliper Kernel
//!
//! Typed learning-analytics entities and events that render to canonical
//! Caliper JSON documents.
//!
//! Every entity, composite and event is a [`PropertyContainer`] whose slots
//! are fixed by its kind's schema. Values are validated on the way in, so a
//! container never holds anything its declaration would reject, and the
//! serializer only has to decide what to embed and what to reduce to an
//! identifier.
//!
//! This crate does no I/O. Transmission lives in `caliper-sensor`.
//!
//! ## Architecture
//!
//! ```text
//! TypeRegistry          ← kinds + capability tags, closed over ancestry
//!     │
//! PropertyValidator     ← typed checks and normalization per declaration
//!     │
//! PropertyContainer     ← ordered slots, write-once unless declared mutable
//!     │
//! Catalog               ← entity, composite and event kind schemas
//!     │
//! Entity / Event        ← builders and JSON configuration objects
//!     │
//! Serializer            ← canonical document, embed vs. reference
//! ```

pub mod catalog;
pub mod config;
pub mod container;
pub mod duration;
pub mod entity;
pub mod error;
pub mod event;
pub mod property;
pub mod registry;
pub mod serialize;
pub mod value;
pub mod vocab;

pub use catalog::{KindSchema, NodeClass, ResolvedSchema, catalog_json, schema};
pub use config::Node;
pub use container::PropertyContainer;
pub use duration::IsoDuration;
pub use entity::{Composite, CompositeBuilder, Entity, EntityBuilder};
pub use error::{CaliperError, ValidationError};
pub use event::{Event, EventBuilder};
pub use property::{Embed, PropertyDecl, PropertyType, format_date_time, validate};
pub use registry::{Capability, Kind, TypeRegistry, TypeTag, registry};
pub use serialize::{to_document, to_json_pretty, to_json_string};
pub use value::{Extensions, Value};
pub use vocab::{DEFAULT_CONTEXT, Profile};
