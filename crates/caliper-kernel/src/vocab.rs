//! Fixed vocabularies: roles, statuses, metrics, LTI message types, actions
//! and the metric profiles kinds belong to.

use serde::Serialize;
use std::fmt;

/// JSON-LD context emitted on entities and events unless overridden.
pub const DEFAULT_CONTEXT: &str = "http://purl.imsglobal.org/ctx/caliper/v1p1";

/// Metric profile a kind belongs to. Informational; never serialized into
/// documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Profile {
    General,
    Annotation,
    Assessment,
    Assignable,
    Forum,
    Grading,
    Media,
    Reading,
    Search,
    Session,
    ToolUse,
}

impl Profile {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::General => "GeneralProfile",
            Self::Annotation => "AnnotationProfile",
            Self::Assessment => "AssessmentProfile",
            Self::Assignable => "AssignableProfile",
            Self::Forum => "ForumProfile",
            Self::Grading => "GradingProfile",
            Self::Media => "MediaProfile",
            Self::Reading => "ReadingProfile",
            Self::Search => "SearchProfile",
            Self::Session => "SessionProfile",
            Self::ToolUse => "ToolUseProfile",
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub const ROLES: &[&str] = &[
    "Learner",
    "Learner#ExternalLearner",
    "Learner#GuestLearner",
    "Learner#Learner",
    "Learner#NonCreditLearner",
    "Instructor",
    "Instructor#ExternalInstructor",
    "Instructor#Grader",
    "Instructor#GuestInstructor",
    "Instructor#Lecturer",
    "Instructor#PrimaryInstructor",
    "Instructor#SecondaryInstructor",
    "Instructor#TeachingAssistant",
    "Instructor#TeachingAssistantGroup",
    "Instructor#TeachingAssistantOffering",
    "Instructor#TeachingAssistantSection",
    "Instructor#TeachingAssistantTemplate",
    "Administrator",
    "Administrator#Administrator",
    "Administrator#Developer",
    "Administrator#ExternalDeveloper",
    "Administrator#ExternalSupport",
    "Administrator#ExternalSystemAdministrator",
    "Administrator#Support",
    "Administrator#SystemAdministrator",
    "ContentDeveloper",
    "ContentDeveloper#ContentDeveloper",
    "ContentDeveloper#ContentExpert",
    "ContentDeveloper#ExternalContentExpert",
    "ContentDeveloper#Librarian",
    "Manager",
    "Manager#AreaManager",
    "Manager#CourseCoordinator",
    "Manager#ExternalObserver",
    "Manager#Manager",
    "Manager#Observer",
    "Member",
    "Member#Member",
    "Mentor",
    "Mentor#Advisor",
    "Mentor#Auditor",
    "Mentor#ExternalAdvisor",
    "Mentor#ExternalAuditor",
    "Mentor#ExternalLearningFacilitator",
    "Mentor#ExternalMentor",
    "Mentor#ExternalReviewer",
    "Mentor#ExternalTutor",
    "Mentor#LearningFacilitator",
    "Mentor#Mentor",
    "Mentor#Reviewer",
    "Mentor#Tutor",
    "TeachingAssistant",
    "TeachingAssistant#Grader",
    "TeachingAssistant#TeachingAssistant",
    "TeachingAssistant#TeachingAssistantGroup",
    "TeachingAssistant#TeachingAssistantOffering",
    "TeachingAssistant#TeachingAssistantSection",
    "TeachingAssistant#TeachingAssistantSectionAssociation",
    "TeachingAssistant#TeachingAssistantTemplate",
];

pub const STATUSES: &[&str] = &["Active", "Inactive"];

pub const METRICS: &[&str] = &[
    "AssessmentsPassed",
    "AssessmentsSubmitted",
    "MinutesOnTask",
    "SkillsMastered",
    "StandardsMastered",
    "UnitsCompleted",
    "UnitsPassed",
    "WordsRead",
];

pub const LTI_MESSAGE_TYPES: &[&str] = &[
    "LtiResourceLinkRequest",
    "LtiDeepLinkingRequest",
    "LtiDeepLinkingResponse",
];

/// Every action a generic `Event` may carry.
pub const ACTIONS: &[&str] = &[
    "Abandoned",
    "Activated",
    "Added",
    "Attached",
    "Bookmarked",
    "ChangedResolution",
    "ChangedSize",
    "ChangedSpeed",
    "ChangedVolume",
    "Classified",
    "ClosedPopout",
    "Commented",
    "Completed",
    "Copied",
    "Created",
    "Deactivated",
    "Deleted",
    "Described",
    "DisabledClosedCaptioning",
    "Disliked",
    "Downloaded",
    "EnabledClosedCaptioning",
    "Ended",
    "EnteredFullScreen",
    "ExitedFullScreen",
    "ForwardedTo",
    "Graded",
    "Hid",
    "Highlighted",
    "Identified",
    "JumpedTo",
    "Launched",
    "Liked",
    "Linked",
    "LoggedIn",
    "LoggedOut",
    "MarkedAsRead",
    "MarkedAsUnread",
    "Modified",
    "Muted",
    "NavigatedTo",
    "OpenedPopout",
    "OptedIn",
    "OptedOut",
    "Paused",
    "Posted",
    "Printed",
    "Questioned",
    "Ranked",
    "Recommended",
    "Removed",
    "Reset",
    "Restarted",
    "Restored",
    "Resumed",
    "Retrieved",
    "Returned",
    "Reviewed",
    "Rewound",
    "Saved",
    "Searched",
    "Sent",
    "Shared",
    "Showed",
    "Skipped",
    "Started",
    "Submitted",
    "Subscribed",
    "Tagged",
    "TimedOut",
    "Unmuted",
    "Unsubscribed",
    "Uploaded",
    "Used",
    "Viewed",
];

pub const ANNOTATION_ACTIONS: &[&str] = &["Bookmarked", "Highlighted", "Shared", "Tagged"];

pub const ASSESSMENT_ACTIONS: &[&str] = &[
    "Started",
    "Paused",
    "Resumed",
    "Restarted",
    "Reset",
    "Submitted",
];

pub const ASSESSMENT_ITEM_ACTIONS: &[&str] = &["Started", "Skipped", "Completed"];

pub const ASSIGNABLE_ACTIONS: &[&str] = &[
    "Activated",
    "Deactivated",
    "Started",
    "Completed",
    "Submitted",
    "Reviewed",
];

pub const FORUM_ACTIONS: &[&str] = &["Subscribed", "Unsubscribed"];

pub const MEDIA_ACTIONS: &[&str] = &[
    "Started",
    "Ended",
    "Paused",
    "Resumed",
    "Restarted",
    "ForwardedTo",
    "JumpedTo",
    "ChangedResolution",
    "ChangedSize",
    "ChangedSpeed",
    "ChangedVolume",
    "EnabledClosedCaptioning",
    "DisabledClosedCaptioning",
    "EnteredFullScreen",
    "ExitedFullScreen",
    "Muted",
    "Unmuted",
    "OpenedPopout",
    "ClosedPopout",
];

pub const MESSAGE_ACTIONS: &[&str] = &["Posted", "MarkedAsRead", "MarkedAsUnread"];

pub const NAVIGATION_ACTIONS: &[&str] = &["NavigatedTo"];

pub const GRADE_ACTIONS: &[&str] = &["Graded"];

pub const SESSION_ACTIONS: &[&str] = &["LoggedIn", "LoggedOut", "TimedOut"];

pub const THREAD_ACTIONS: &[&str] = &["MarkedAsRead", "MarkedAsUnread"];

pub const TOOL_USE_ACTIONS: &[&str] = &["Used"];

pub const VIEW_ACTIONS: &[&str] = &["Viewed"];

pub const SEARCH_ACTIONS: &[&str] = &["Searched"];
