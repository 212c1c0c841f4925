//! Normalized draft content and progress schemas
//!
//! `DraftContent` is what the aggregator produces from a session's completed
//! interviews; `DraftProgress` carries the derived completion metrics.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{InterviewKind, Stage};

/// Ordered summary of one contributing interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewSummary {
    /// Interview id
    pub id: String,

    /// Kind of interview
    pub kind: InterviewKind,

    /// Name of the interviewer, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interviewer: Option<String>,

    /// When the interview completed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,

    /// Numeric quality rating, if one was assigned
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Free-text summary
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Strengths observed
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Areas flagged for improvement
    #[serde(default)]
    pub improvements: Vec<String>,
}

/// Personal narrative section of a draft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct PersonalSection {
    /// Narrative fragments drawn from friend interviews, in interview order
    #[serde(default)]
    pub narrative: Vec<String>,
}

/// Professional section: skills, achievements and per-kind ratings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ProfessionalSection {
    /// Deduplicated skills from technical interviews
    #[serde(default)]
    pub skills: Vec<String>,

    /// Deduplicated achievements from professional interviews
    #[serde(default)]
    pub achievements: Vec<String>,

    /// Mean rating per interview kind, one decimal place
    #[serde(default)]
    pub ratings_by_kind: BTreeMap<InterviewKind, f64>,
}

/// Derived recommendation decision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationDecision {
    /// Mean rating at or above 4.0
    Strong,
    /// Mean rating at or above 3.0
    Favorable,
    /// Mean rating at or above 2.0
    Mixed,
    /// Mean rating below 2.0
    Reserved,
}

impl RecommendationDecision {
    /// Derive the decision from a mean interview rating
    pub fn from_rating(rating: f64) -> Self {
        if rating >= 4.0 {
            RecommendationDecision::Strong
        } else if rating >= 3.0 {
            RecommendationDecision::Favorable
        } else if rating >= 2.0 {
            RecommendationDecision::Mixed
        } else {
            RecommendationDecision::Reserved
        }
    }
}

/// Recommendations section: strengths, improvements and the overall verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct RecommendationsSection {
    /// Deduplicated strengths across all interviews
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Deduplicated improvements across all interviews
    #[serde(default)]
    pub improvements: Vec<String>,

    /// Derived decision, absent until at least one interview carries a rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decision: Option<RecommendationDecision>,

    /// Arithmetic mean of contributing interview ratings, one decimal place.
    /// Interviews without a rating do not count toward the mean.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub overall_rating: Option<f64>,
}

/// Normalized draft content assembled from completed interviews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DraftContent {
    /// Personal narrative section
    #[serde(default)]
    pub personal: PersonalSection,

    /// Professional section
    #[serde(default)]
    pub professional: ProfessionalSection,

    /// Recommendations section
    #[serde(default)]
    pub recommendations: RecommendationsSection,

    /// Ordered summaries of contributing interviews
    #[serde(default)]
    pub interviews: Vec<InterviewSummary>,
}

impl DraftContent {
    /// Check whether an interview id is already reflected in this content
    pub fn contains_interview(&self, id: &str) -> bool {
        self.interviews.iter().any(|i| i.id == id)
    }
}

/// Per-interview-kind completion counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct KindProgress {
    /// Completed interviews of this kind
    pub completed: u32,

    /// Total interviews of this kind in the session
    pub total: u32,
}

/// Completion metrics for a draft
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DraftProgress {
    /// Overall completion percentage (0-100)
    pub overall: u8,

    /// Personal section completion percentage
    pub personal: u8,

    /// Professional section completion percentage
    pub professional: u8,

    /// Recommendations section completion percentage
    pub recommendations: u8,

    /// Completion counts per interview kind
    #[serde(default)]
    pub by_kind: BTreeMap<InterviewKind, KindProgress>,
}

/// Structured diff attached to an `Updated` completion result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DraftChanges {
    /// Interview ids newly reflected in the draft
    #[serde(default)]
    pub new_interviews: Vec<String>,

    /// Signed change of the overall rating, if both sides had one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_delta: Option<f64>,

    /// Skills observed for the first time
    #[serde(default)]
    pub added_skills: Vec<String>,

    /// Strengths observed for the first time
    #[serde(default)]
    pub added_strengths: Vec<String>,

    /// Stage before the update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_stage: Option<Stage>,

    /// Stage after the update
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_stage: Option<Stage>,

    /// True when the computed stage was refused by validation and the
    /// previous stage was kept (lenient degrade)
    #[serde(default)]
    pub stage_retained: bool,
}
