//! Entity and composite kinds.

use super::{KindSchema, NodeClass, capable, object};
use crate::property::{PropertyDecl, PropertyType};
use crate::registry::{Capability, Kind, TypeTag};
use crate::vocab::{LTI_MESSAGE_TYPES, METRICS, Profile, ROLES, STATUSES};

use crate::property::PropertyType::{Boolean, DateTime, Duration, Float, Integer, Map, String as Text};

const ENTITY: TypeTag = TypeTag::Kind(Kind::Entity);
const AGENT: TypeTag = TypeTag::Kind(Kind::Agent);
const ORGANIZATION: TypeTag = TypeTag::Kind(Kind::Organization);
const DIGITAL_RESOURCE: TypeTag = TypeTag::Kind(Kind::DigitalResource);
const ASSIGNABLE: TypeTag = TypeTag::Capability(Capability::Assignable);
const GENERATABLE: TypeTag = TypeTag::Capability(Capability::Generatable);
const REFERRABLE: TypeTag = TypeTag::Capability(Capability::Referrable);
const TARGETABLE: TypeTag = TypeTag::Capability(Capability::Targetable);

// List item types.
const AGENT_ITEM: PropertyType = object(Kind::Agent);
const PERSON_ITEM: PropertyType = object(Kind::Person);
const ENTITY_ITEM: PropertyType = object(Kind::Entity);
const DIGITAL_RESOURCE_ITEM: PropertyType = object(Kind::DigitalResource);
const LEARNING_OBJECTIVE_ITEM: PropertyType = object(Kind::LearningObjective);
const AGGREGATE_MEASURE_ITEM: PropertyType = object(Kind::AggregateMeasure);
const ASSESSMENT_ITEM_ITEM: PropertyType = object(Kind::AssessmentItem);
const THREAD_ITEM: PropertyType = object(Kind::Thread);
const MESSAGE_ITEM: PropertyType = object(Kind::Message);
const STRING_ITEM: PropertyType = Text;
const ROLE_ITEM: PropertyType = PropertyType::Enum(ROLES);

const ENTITY_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("id", Text),
    PropertyDecl::optional("dateCreated", DateTime),
    PropertyDecl::optional("dateModified", DateTime),
    PropertyDecl::optional("description", Text),
    PropertyDecl::optional("name", Text),
    PropertyDecl::optional("extensions", Map),
];

const SOFTWARE_APPLICATION_PROPERTIES: &[PropertyDecl] =
    &[PropertyDecl::optional("version", Text)];

const ORGANIZATION_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("members", PropertyType::List(&AGENT_ITEM)),
    PropertyDecl::optional("subOrganizationOf", object(Kind::Organization)),
];

const COURSE_OFFERING_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("academicSession", Text),
    PropertyDecl::optional("courseNumber", Text),
];

const COURSE_SECTION_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional("category", Text)];

const GROUP_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "members",
    PropertyType::List(&PERSON_ITEM),
)];

const MEMBERSHIP_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("member", object(Kind::Agent)),
    PropertyDecl::required("organization", object(Kind::Organization)),
    PropertyDecl::optional("roles", PropertyType::List(&ROLE_ITEM)),
    PropertyDecl::required("status", PropertyType::Enum(STATUSES)),
];

const AGGREGATE_MEASURE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("metricValue", Float),
    PropertyDecl::required("metric", PropertyType::Enum(METRICS)),
    PropertyDecl::optional("metricValueMax", Float),
    PropertyDecl::optional("startedAtTime", DateTime),
    PropertyDecl::optional("endedAtTime", DateTime).mutable(),
];

const AGGREGATE_MEASURE_COLLECTION_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "items",
    PropertyType::List(&AGGREGATE_MEASURE_ITEM),
)];

const DIGITAL_RESOURCE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional(
        "learningObjectives",
        PropertyType::List(&LEARNING_OBJECTIVE_ITEM),
    ),
    PropertyDecl::optional("creators", PropertyType::List(&AGENT_ITEM)),
    PropertyDecl::optional("datePublished", DateTime),
    PropertyDecl::optional("isPartOf", object(Kind::Entity)).mutable(),
    PropertyDecl::optional("keywords", PropertyType::List(&STRING_ITEM)),
    PropertyDecl::optional("mediaType", Text),
    PropertyDecl::optional("version", Text),
];

const DIGITAL_RESOURCE_COLLECTION_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "items",
    PropertyType::List(&DIGITAL_RESOURCE_ITEM),
)];

const FRAME_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::required("index", Integer)];

const LTI_LINK_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "messageType",
    PropertyType::Enum(LTI_MESSAGE_TYPES),
)];

const ANNOTATION_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("annotated", object(Kind::DigitalResource)),
    PropertyDecl::required("annotator", object(Kind::Person)),
];

const BOOKMARK_ANNOTATION_PROPERTIES: &[PropertyDecl] =
    &[PropertyDecl::optional("bookmarkNotes", Text)];

const HIGHLIGHT_ANNOTATION_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("selection", object(Kind::TextPositionSelector)).always_embed(),
    PropertyDecl::optional("selectionText", Text),
];

const SHARED_ANNOTATION_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "withAgents",
    PropertyType::List(&AGENT_ITEM),
)];

const TAG_ANNOTATION_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "tags",
    PropertyType::List(&STRING_ITEM),
)];

const TEXT_POSITION_SELECTOR_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("start", Integer).mutable(),
    PropertyDecl::required("end", Integer).mutable(),
];

const ASSIGNABLE_DIGITAL_RESOURCE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("dateToActivate", DateTime),
    PropertyDecl::optional("dateToShow", DateTime),
    PropertyDecl::optional("dateToStartOn", DateTime),
    PropertyDecl::optional("dateToSubmit", DateTime),
    PropertyDecl::optional("maxAttempts", Integer),
    PropertyDecl::optional("maxSubmits", Integer),
    PropertyDecl::optional("maxScore", Float),
];

const ASSESSMENT_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "items",
    PropertyType::List(&ASSESSMENT_ITEM_ITEM),
)];

const ASSESSMENT_ITEM_PROPERTIES: &[PropertyDecl] =
    &[PropertyDecl::optional("isTimeDependent", Boolean)];

const ATTEMPT_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("assignable", capable(Capability::Assignable)),
    PropertyDecl::optional("assignee", object(Kind::Person)),
    PropertyDecl::optional("count", Integer),
    PropertyDecl::optional("duration", Duration).mutable(),
    PropertyDecl::optional("endedAtTime", DateTime).mutable(),
    PropertyDecl::optional("isPartOf", object(Kind::Attempt)).mutable(),
    PropertyDecl::optional("startedAtTime", DateTime),
];

const RESPONSE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("attempt", object(Kind::Attempt)),
    PropertyDecl::optional("duration", Duration).mutable(),
    PropertyDecl::optional("endedAtTime", DateTime).mutable(),
    PropertyDecl::optional("startedAtTime", DateTime),
];

const VALUES_RESPONSE_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "values",
    PropertyType::List(&STRING_ITEM),
)];

const VALUE_RESPONSE_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional("value", Text)];

const FORUM_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "items",
    PropertyType::List(&THREAD_ITEM),
)];

const THREAD_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional(
    "items",
    PropertyType::List(&MESSAGE_ITEM),
)];

const MESSAGE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("body", Text),
    PropertyDecl::optional("replyTo", object(Kind::Message)),
    PropertyDecl::optional("attachments", PropertyType::List(&DIGITAL_RESOURCE_ITEM)),
];

const MEDIA_OBJECT_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional("duration", Duration)];

const MEDIA_LOCATION_PROPERTIES: &[PropertyDecl] =
    &[PropertyDecl::optional("currentTime", Duration)];

const AUDIO_OBJECT_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("muted", Boolean),
    PropertyDecl::optional("volumeLevel", Text),
    PropertyDecl::optional("volumeMax", Text),
    PropertyDecl::optional("volumeMin", Text),
];

const RESULT_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("attempt", object(Kind::Attempt)),
    PropertyDecl::optional("comment", Text),
    PropertyDecl::optional("maxResultScore", Float),
    PropertyDecl::optional("resultScore", Float),
    PropertyDecl::optional("scoredBy", object(Kind::Agent)),
];

const SCORE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::required("attempt", object(Kind::Attempt)),
    PropertyDecl::optional("comment", Text),
    PropertyDecl::optional("maxScore", Float),
    PropertyDecl::optional("scoreGiven", Float),
    PropertyDecl::optional("scoredBy", object(Kind::Agent)),
];

const QUERY_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("creator", object(Kind::Person)),
    PropertyDecl::optional("searchTarget", object(Kind::Entity)),
    PropertyDecl::optional("searchTerms", Text),
];

const SEARCH_RESPONSE_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("searchProvider", object(Kind::SoftwareApplication)),
    PropertyDecl::optional("searchTarget", object(Kind::Entity)),
    PropertyDecl::optional("query", object(Kind::Query)),
    PropertyDecl::optional("searchResultsItemCount", Integer).mutable(),
    PropertyDecl::optional("searchResults", PropertyType::List(&ENTITY_ITEM)).mutable(),
];

const SESSION_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("duration", Duration).mutable(),
    PropertyDecl::optional("endedAtTime", DateTime).mutable(),
    PropertyDecl::optional("startedAtTime", DateTime),
    PropertyDecl::optional("user", object(Kind::Person)),
];

const LTI_SESSION_PROPERTIES: &[PropertyDecl] = &[PropertyDecl::optional("messageParameters", Map)];

const LEARNING_CONTEXT_PROPERTIES: &[PropertyDecl] = &[
    PropertyDecl::optional("edApp", object(Kind::SoftwareApplication)),
    PropertyDecl::optional("group", object(Kind::Organization)),
    PropertyDecl::optional("membership", object(Kind::Membership)),
    PropertyDecl::optional("session", object(Kind::Session)),
];

const fn entity(
    kind: Kind,
    parents: &'static [TypeTag],
    properties: &'static [PropertyDecl],
    profile: Profile,
) -> KindSchema {
    KindSchema {
        kind,
        class: NodeClass::Entity,
        parents,
        properties,
        profile,
        emits_type: true,
    }
}

/// A resource kind that only narrows `DigitalResource`.
const fn resource(kind: Kind, profile: Profile) -> KindSchema {
    entity(kind, &[DIGITAL_RESOURCE], &[], profile)
}

pub(super) static SCHEMAS: &[KindSchema] = &[
    entity(Kind::Entity, &[], ENTITY_PROPERTIES, Profile::General),
    entity(Kind::Agent, &[ENTITY, REFERRABLE], &[], Profile::General),
    entity(Kind::Person, &[AGENT], &[], Profile::General),
    entity(
        Kind::SoftwareApplication,
        &[AGENT],
        SOFTWARE_APPLICATION_PROPERTIES,
        Profile::General,
    ),
    entity(
        Kind::Organization,
        &[AGENT],
        ORGANIZATION_PROPERTIES,
        Profile::General,
    ),
    entity(
        Kind::CourseOffering,
        &[ORGANIZATION],
        COURSE_OFFERING_PROPERTIES,
        Profile::General,
    ),
    entity(
        Kind::CourseSection,
        &[TypeTag::Kind(Kind::CourseOffering)],
        COURSE_SECTION_PROPERTIES,
        Profile::General,
    ),
    entity(Kind::Group, &[ORGANIZATION], GROUP_PROPERTIES, Profile::General),
    entity(
        Kind::Membership,
        &[ENTITY],
        MEMBERSHIP_PROPERTIES,
        Profile::General,
    ),
    entity(Kind::LearningObjective, &[ENTITY], &[], Profile::General),
    entity(
        Kind::AggregateMeasure,
        &[ENTITY, GENERATABLE],
        AGGREGATE_MEASURE_PROPERTIES,
        Profile::ToolUse,
    ),
    entity(
        Kind::AggregateMeasureCollection,
        &[ENTITY, GENERATABLE],
        AGGREGATE_MEASURE_COLLECTION_PROPERTIES,
        Profile::ToolUse,
    ),
    entity(
        Kind::DigitalResource,
        &[ENTITY, GENERATABLE, REFERRABLE, TARGETABLE],
        DIGITAL_RESOURCE_PROPERTIES,
        Profile::General,
    ),
    entity(
        Kind::DigitalResourceCollection,
        &[DIGITAL_RESOURCE],
        DIGITAL_RESOURCE_COLLECTION_PROPERTIES,
        Profile::General,
    ),
    entity(
        Kind::Frame,
        &[DIGITAL_RESOURCE, TARGETABLE],
        FRAME_PROPERTIES,
        Profile::Reading,
    ),
    resource(Kind::Reading, Profile::Reading),
    entity(Kind::Link, &[ENTITY, TARGETABLE], &[], Profile::General),
    entity(
        Kind::LtiLink,
        &[DIGITAL_RESOURCE],
        LTI_LINK_PROPERTIES,
        Profile::General,
    ),
    resource(Kind::WebPage, Profile::Reading),
    resource(Kind::Document, Profile::Reading),
    resource(Kind::Chapter, Profile::Reading),
    resource(Kind::Page, Profile::Reading),
    resource(Kind::EpubChapter, Profile::Reading),
    resource(Kind::EpubPart, Profile::Reading),
    resource(Kind::EpubSubChapter, Profile::Reading),
    resource(Kind::EpubVolume, Profile::Reading),
    entity(
        Kind::Annotation,
        &[ENTITY, GENERATABLE],
        ANNOTATION_PROPERTIES,
        Profile::Annotation,
    ),
    entity(
        Kind::BookmarkAnnotation,
        &[TypeTag::Kind(Kind::Annotation)],
        BOOKMARK_ANNOTATION_PROPERTIES,
        Profile::Annotation,
    ),
    entity(
        Kind::HighlightAnnotation,
        &[TypeTag::Kind(Kind::Annotation)],
        HIGHLIGHT_ANNOTATION_PROPERTIES,
        Profile::Annotation,
    ),
    entity(
        Kind::SharedAnnotation,
        &[TypeTag::Kind(Kind::Annotation)],
        SHARED_ANNOTATION_PROPERTIES,
        Profile::Annotation,
    ),
    entity(
        Kind::TagAnnotation,
        &[TypeTag::Kind(Kind::Annotation)],
        TAG_ANNOTATION_PROPERTIES,
        Profile::Annotation,
    ),
    entity(
        Kind::AssignableDigitalResource,
        &[DIGITAL_RESOURCE, ASSIGNABLE],
        ASSIGNABLE_DIGITAL_RESOURCE_PROPERTIES,
        Profile::Assignable,
    ),
    entity(
        Kind::Assessment,
        &[
            TypeTag::Kind(Kind::AssignableDigitalResource),
            TypeTag::Kind(Kind::DigitalResourceCollection),
        ],
        ASSESSMENT_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::AssessmentItem,
        &[TypeTag::Kind(Kind::AssignableDigitalResource)],
        ASSESSMENT_ITEM_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::Attempt,
        &[ENTITY, GENERATABLE],
        ATTEMPT_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::Response,
        &[ENTITY, GENERATABLE],
        RESPONSE_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::FillinBlankResponse,
        &[TypeTag::Kind(Kind::Response)],
        VALUES_RESPONSE_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::MultipleChoiceResponse,
        &[TypeTag::Kind(Kind::Response)],
        VALUE_RESPONSE_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::MultipleResponseResponse,
        &[TypeTag::Kind(Kind::Response)],
        VALUES_RESPONSE_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::SelectTextResponse,
        &[TypeTag::Kind(Kind::Response)],
        VALUES_RESPONSE_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::TrueFalseResponse,
        &[TypeTag::Kind(Kind::Response)],
        VALUE_RESPONSE_PROPERTIES,
        Profile::Assessment,
    ),
    entity(
        Kind::Forum,
        &[TypeTag::Kind(Kind::DigitalResourceCollection)],
        FORUM_PROPERTIES,
        Profile::Forum,
    ),
    entity(
        Kind::Thread,
        &[TypeTag::Kind(Kind::DigitalResourceCollection)],
        THREAD_PROPERTIES,
        Profile::Forum,
    ),
    entity(
        Kind::Message,
        &[DIGITAL_RESOURCE],
        MESSAGE_PROPERTIES,
        Profile::Forum,
    ),
    entity(
        Kind::MediaObject,
        &[DIGITAL_RESOURCE],
        MEDIA_OBJECT_PROPERTIES,
        Profile::Media,
    ),
    entity(
        Kind::MediaLocation,
        &[DIGITAL_RESOURCE, TARGETABLE],
        MEDIA_LOCATION_PROPERTIES,
        Profile::Media,
    ),
    entity(
        Kind::AudioObject,
        &[TypeTag::Kind(Kind::MediaObject)],
        AUDIO_OBJECT_PROPERTIES,
        Profile::Media,
    ),
    entity(
        Kind::ImageObject,
        &[TypeTag::Kind(Kind::MediaObject)],
        &[],
        Profile::Media,
    ),
    entity(
        Kind::VideoObject,
        &[TypeTag::Kind(Kind::MediaObject)],
        &[],
        Profile::Media,
    ),
    entity(
        Kind::Result,
        &[ENTITY, GENERATABLE],
        RESULT_PROPERTIES,
        Profile::Grading,
    ),
    entity(
        Kind::Score,
        &[ENTITY, GENERATABLE],
        SCORE_PROPERTIES,
        Profile::Grading,
    ),
    entity(Kind::Query, &[ENTITY], QUERY_PROPERTIES, Profile::Search),
    entity(
        Kind::SearchResponse,
        &[ENTITY, GENERATABLE],
        SEARCH_RESPONSE_PROPERTIES,
        Profile::Search,
    ),
    entity(
        Kind::Session,
        &[ENTITY, GENERATABLE, TARGETABLE],
        SESSION_PROPERTIES,
        Profile::Session,
    ),
    entity(
        Kind::LtiSession,
        &[TypeTag::Kind(Kind::Session)],
        LTI_SESSION_PROPERTIES,
        Profile::Session,
    ),
    KindSchema {
        kind: Kind::TextPositionSelector,
        class: NodeClass::Composite,
        parents: &[],
        properties: TEXT_POSITION_SELECTOR_PROPERTIES,
        profile: Profile::Annotation,
        emits_type: true,
    },
    KindSchema {
        kind: Kind::LearningContext,
        class: NodeClass::Composite,
        parents: &[],
        properties: LEARNING_CONTEXT_PROPERTIES,
        profile: Profile::General,
        emits_type: false,
    },
];
