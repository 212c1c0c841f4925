//! Schema types for memoir
//!
//! All types serialize to the JSON shapes stored under `.memoir/` and
//! exchanged with the session store and webhook callers.

mod config;
mod content;
mod draft;
mod history;
mod index;
mod interview;

pub use config::EngineConfig;
pub use content::{
    DraftChanges, DraftContent, DraftProgress, InterviewSummary, KindProgress, PersonalSection,
    ProfessionalSection, RecommendationDecision, RecommendationsSection,
};
pub use draft::{Draft, Stage};
pub use history::{
    HistoryFilter, StageSnapshot, TransitionAction, TransitionRecord, TriggeredBy,
};
pub use index::{Index, IndexEntry};
pub use interview::{Interview, InterviewContent, InterviewKind, InterviewStatus, Session};
