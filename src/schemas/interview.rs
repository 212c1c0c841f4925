//! Interview and session schemas - read-only inputs to the engine
//!
//! Sessions and their interviews belong to the external session store. The
//! engine never mutates them; it only reads completed interviews out of a
//! session to aggregate draft content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of recorded interview contributing to a life story
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewKind {
    /// Career-focused interview probing skills and work history
    Technical,
    /// Interview about habits, values and formative decisions
    Behavioral,
    /// Interview with a friend or family member of the client
    Friend,
}

impl std::fmt::Display for InterviewKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InterviewKind::Technical => write!(f, "technical"),
            InterviewKind::Behavioral => write!(f, "behavioral"),
            InterviewKind::Friend => write!(f, "friend"),
        }
    }
}

impl InterviewKind {
    /// Kinds that feed the professional section of a draft
    pub fn is_professional(self) -> bool {
        matches!(self, InterviewKind::Technical | InterviewKind::Behavioral)
    }
}

/// Processing status of an interview
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewStatus {
    /// Interview scheduled but not yet recorded
    Scheduled,
    /// Recording or transcription still running
    InProgress,
    /// Transcription and extraction finished
    Completed,
    /// Interview cancelled, will never complete
    Cancelled,
}

/// Structured content extracted from a completed interview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct InterviewContent {
    /// Numeric quality rating assigned by the reviewer or pipeline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Free-text summary of the conversation
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Strengths observed in the interview
    #[serde(default)]
    pub strengths: Vec<String>,

    /// Areas flagged for improvement or follow-up
    #[serde(default)]
    pub improvements: Vec<String>,

    /// Skills mentioned (only meaningful for technical interviews)
    #[serde(default)]
    pub skills: Vec<String>,
}

/// A single recorded interview belonging to a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interview {
    /// Unique identifier for the interview
    pub id: String,

    /// Session this interview belongs to
    pub session_id: String,

    /// Kind of interview
    pub kind: InterviewKind,

    /// Current processing status
    pub status: InterviewStatus,

    /// Name of the interviewer, if known
    #[serde(default)]
    pub interviewer: Option<String>,

    /// When the interview completed (null until completed)
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,

    /// Extracted content payload
    #[serde(default)]
    pub content: InterviewContent,
}

impl Interview {
    /// Check if the interview has completed processing
    pub fn is_completed(&self) -> bool {
        self.status == InterviewStatus::Completed
    }
}

/// A client session owning a set of interviews and (eventually) one draft lineage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Schema version for forward compatibility
    pub schema_version: u32,

    /// Unique identifier for the session
    pub id: String,

    /// Client user owning the session
    pub user_id: String,

    /// All interviews planned or recorded for this session
    #[serde(default)]
    pub interviews: Vec<Interview>,

    /// ISO 8601 creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session with no interviews
    pub fn new(id: String, user_id: String) -> Self {
        Session {
            schema_version: 1,
            id,
            user_id,
            interviews: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Completed interviews in session order, first occurrence per id.
    ///
    /// Webhook re-deliveries can leave duplicate records behind; aggregation
    /// must count each interview once.
    pub fn completed_interviews(&self) -> Vec<&Interview> {
        let mut seen = std::collections::HashSet::new();
        self.interviews
            .iter()
            .filter(|i| i.is_completed())
            .filter(|i| seen.insert(i.id.as_str()))
            .collect()
    }

    /// Total number of distinct interviews in the session
    pub fn total_interviews(&self) -> u32 {
        let mut seen = std::collections::HashSet::new();
        self.interviews
            .iter()
            .filter(|i| seen.insert(i.id.as_str()))
            .count() as u32
    }

    /// Return a new Session with the given interview result folded in.
    ///
    /// A completion event can race ahead of the session store; if the event's
    /// interview is already present it is replaced by id, otherwise appended.
    pub fn absorb(mut self, interview: &Interview) -> Self {
        match self.interviews.iter_mut().find(|i| i.id == interview.id) {
            Some(existing) => *existing = interview.clone(),
            None => self.interviews.push(interview.clone()),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn completed(id: &str, kind: InterviewKind) -> Interview {
        Interview {
            id: id.to_string(),
            session_id: "s-1".to_string(),
            kind,
            status: InterviewStatus::Completed,
            interviewer: None,
            completed_at: Some(Utc::now()),
            content: InterviewContent::default(),
        }
    }

    #[test]
    fn test_interview_kind_serialization() {
        assert_eq!(serde_json::to_string(&InterviewKind::Technical).unwrap(), "\"technical\"");
        assert_eq!(serde_json::to_string(&InterviewKind::Behavioral).unwrap(), "\"behavioral\"");
        assert_eq!(serde_json::to_string(&InterviewKind::Friend).unwrap(), "\"friend\"");
    }

    #[test]
    fn test_interview_status_serialization() {
        assert_eq!(serde_json::to_string(&InterviewStatus::InProgress).unwrap(), "\"in_progress\"");
        assert_eq!(serde_json::to_string(&InterviewStatus::Completed).unwrap(), "\"completed\"");
    }

    #[test]
    fn test_is_completed() {
        let mut interview = completed("i-1", InterviewKind::Technical);
        assert!(interview.is_completed());

        interview.status = InterviewStatus::Scheduled;
        assert!(!interview.is_completed());
    }

    #[test]
    fn test_is_professional() {
        assert!(InterviewKind::Technical.is_professional());
        assert!(InterviewKind::Behavioral.is_professional());
        assert!(!InterviewKind::Friend.is_professional());
    }

    #[test]
    fn test_completed_interviews_dedup_by_id() {
        let mut session = Session::new("s-1".to_string(), "u-1".to_string());
        session.interviews.push(completed("i-1", InterviewKind::Technical));
        session.interviews.push(completed("i-1", InterviewKind::Technical));
        session.interviews.push(completed("i-2", InterviewKind::Friend));

        let completed = session.completed_interviews();
        assert_eq!(completed.len(), 2);
        assert_eq!(session.total_interviews(), 2);
    }

    #[test]
    fn test_completed_interviews_skips_incomplete() {
        let mut session = Session::new("s-1".to_string(), "u-1".to_string());
        let mut scheduled = completed("i-1", InterviewKind::Technical);
        scheduled.status = InterviewStatus::Scheduled;
        session.interviews.push(scheduled);
        session.interviews.push(completed("i-2", InterviewKind::Behavioral));

        let done = session.completed_interviews();
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, "i-2");
        assert_eq!(session.total_interviews(), 2);
    }

    #[test]
    fn test_absorb_replaces_by_id() {
        let mut session = Session::new("s-1".to_string(), "u-1".to_string());
        let mut pending = completed("i-1", InterviewKind::Technical);
        pending.status = InterviewStatus::InProgress;
        session.interviews.push(pending);

        let event = completed("i-1", InterviewKind::Technical);
        let merged = session.absorb(&event);

        assert_eq!(merged.interviews.len(), 1);
        assert!(merged.interviews[0].is_completed());
    }

    #[test]
    fn test_absorb_appends_unknown_interview() {
        let session = Session::new("s-1".to_string(), "u-1".to_string());
        let event = completed("i-9", InterviewKind::Friend);
        let merged = session.absorb(&event);

        assert_eq!(merged.interviews.len(), 1);
        assert_eq!(merged.interviews[0].id, "i-9");
    }

    #[test]
    fn test_session_json_round_trip() {
        let mut session = Session::new("s-1".to_string(), "u-1".to_string());
        session.interviews.push(completed("i-1", InterviewKind::Friend));

        let json = serde_json::to_string_pretty(&session).unwrap();
        let parsed: Session = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.id, session.id);
        assert_eq!(parsed.interviews.len(), 1);
        assert_eq!(parsed.interviews[0].kind, InterviewKind::Friend);
    }
}
