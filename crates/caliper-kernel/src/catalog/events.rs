//! Event kinds. Every kind narrows the base `Event` through its action set
//! and the kinds accepted as `object`, `generated` and `target`.

use super::{KindSchema, NodeClass, capable, object};
use crate::property::{PropertyDecl, PropertyType};
use crate::registry::{Capability, Kind, TypeTag};
use crate::vocab::{self, Profile};

const EVENT: TypeTag = TypeTag::Kind(Kind::Event);

const EVENT_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("id", PropertyType::String),
    PropertyDecl::required("actor", object(Kind::Agent)),
    PropertyDecl::required("action", PropertyType::Enum(vocab::ACTIONS)),
    PropertyDecl::required("object", object(Kind::Entity)),
    PropertyDecl::required("eventTime", PropertyType::DateTime),
    PropertyDecl::optional("target", capable(Capability::Targetable)),
    PropertyDecl::optional("generated", capable(Capability::Generatable)),
    PropertyDecl::optional("edApp", object(Kind::SoftwareApplication)),
    PropertyDecl::optional("group", object(Kind::Organization)),
    PropertyDecl::optional("membership", object(Kind::Membership)),
    PropertyDecl::optional("federatedSession", object(Kind::Session)),
    PropertyDecl::optional("extensions", PropertyType::Map),
];

const fn action(actions: &'static [&'static str]) -> PropertyDecl {
    PropertyDecl::required("action", PropertyType::Enum(actions))
}

const fn subject(kind: Kind) -> PropertyDecl {
    PropertyDecl::required("object", object(kind))
}

const fn generated(kind: Kind) -> PropertyDecl {
    PropertyDecl::optional("generated", object(kind))
}

const fn target(kind: Kind) -> PropertyDecl {
    PropertyDecl::optional("target", object(kind))
}

const ANNOTATION_EVENT: &[PropertyDecl] = &[
    action(vocab::ANNOTATION_ACTIONS),
    subject(Kind::DigitalResource),
    generated(Kind::Annotation),
];

const ASSESSMENT_EVENT: &[PropertyDecl] = &[
    action(vocab::ASSESSMENT_ACTIONS),
    subject(Kind::Assessment),
    generated(Kind::Attempt),
];

const ASSESSMENT_ITEM_EVENT: &[PropertyDecl] = &[
    action(vocab::ASSESSMENT_ITEM_ACTIONS),
    subject(Kind::AssessmentItem),
    generated(Kind::Response),
];

const ASSIGNABLE_EVENT: &[PropertyDecl] = &[
    action(vocab::ASSIGNABLE_ACTIONS),
    subject(Kind::AssignableDigitalResource),
    generated(Kind::Attempt),
];

const FORUM_EVENT: &[PropertyDecl] = &[action(vocab::FORUM_ACTIONS), subject(Kind::Forum)];

const MEDIA_EVENT: &[PropertyDecl] = &[
    action(vocab::MEDIA_ACTIONS),
    subject(Kind::MediaObject),
    target(Kind::MediaLocation),
];

const MESSAGE_EVENT: &[PropertyDecl] = &[action(vocab::MESSAGE_ACTIONS), subject(Kind::Message)];

const NAVIGATION_EVENT: &[PropertyDecl] = &[action(vocab::NAVIGATION_ACTIONS)];

const GRADE_EVENT: &[PropertyDecl] = &[
    action(vocab::GRADE_ACTIONS),
    subject(Kind::Attempt),
    generated(Kind::Score),
];

const SESSION_EVENT: &[PropertyDecl] = &[action(vocab::SESSION_ACTIONS)];

const THREAD_EVENT: &[PropertyDecl] = &[action(vocab::THREAD_ACTIONS), subject(Kind::Thread)];

const TOOL_USE_EVENT: &[PropertyDecl] = &[
    action(vocab::TOOL_USE_ACTIONS),
    subject(Kind::SoftwareApplication),
    generated(Kind::AggregateMeasureCollection),
];

const VIEW_EVENT: &[PropertyDecl] = &[action(vocab::VIEW_ACTIONS), subject(Kind::DigitalResource)];

const SEARCH_EVENT: &[PropertyDecl] = &[
    action(vocab::SEARCH_ACTIONS),
    generated(Kind::SearchResponse),
];

const fn event(kind: Kind, properties: &'static [PropertyDecl], profile: Profile) -> KindSchema {
    KindSchema {
        kind,
        class: NodeClass::Event,
        parents: &[EVENT],
        properties,
        profile,
        emits_type: true,
    }
}

pub(super) static SCHEMAS: &[KindSchema] = &[
    KindSchema {
        kind: Kind::Event,
        class: NodeClass::Event,
        parents: &[],
        properties: EVENT_PROPERTIES,
        profile: Profile::General,
        emits_type: true,
    },
    event(Kind::AnnotationEvent, ANNOTATION_EVENT, Profile::Annotation),
    event(Kind::AssessmentEvent, ASSESSMENT_EVENT, Profile::Assessment),
    event(
        Kind::AssessmentItemEvent,
        ASSESSMENT_ITEM_EVENT,
        Profile::Assessment,
    ),
    event(Kind::AssignableEvent, ASSIGNABLE_EVENT, Profile::Assignable),
    event(Kind::ForumEvent, FORUM_EVENT, Profile::Forum),
    event(Kind::MediaEvent, MEDIA_EVENT, Profile::Media),
    event(Kind::MessageEvent, MESSAGE_EVENT, Profile::Forum),
    event(Kind::NavigationEvent, NAVIGATION_EVENT, Profile::Reading),
    event(Kind::GradeEvent, GRADE_EVENT, Profile::Grading),
    event(Kind::SessionEvent, SESSION_EVENT, Profile::Session),
    event(Kind::ThreadEvent, THREAD_EVENT, Profile::Forum),
    event(Kind::ToolUseEvent, TOOL_USE_EVENT, Profile::ToolUse),
    event(Kind::ViewEvent, VIEW_EVENT, Profile::Reading),
    event(Kind::SearchEvent, SEARCH_EVENT, Profile::Search),
];
