//! Content aggregation
//!
//! Merges a session's completed interviews into one normalized draft
//! content structure and computes the progress metrics. Pure: reads the
//! session, produces a value, touches nothing else.

use std::collections::{BTreeMap, HashSet};

use crate::schemas::{
    DraftContent, DraftProgress, EngineConfig, Interview, InterviewKind, InterviewSummary,
    KindProgress, RecommendationDecision, Session,
};

/// Result of aggregating a session's completed interviews
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation {
    /// Normalized draft content
    pub content: DraftContent,

    /// Derived completion metrics
    pub progress: DraftProgress,

    /// Number of completed interviews reflected in the content
    pub interview_count: u32,

    /// Total interviews in the session
    pub total_interviews: u32,

    /// Mean rating across rated interviews, one decimal place
    pub overall_rating: Option<f64>,
}

/// Round to one decimal place.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Percentage as a rounded integer, zero when the denominator is zero.
fn pct(numerator: u32, denominator: u32) -> u8 {
    if denominator == 0 {
        return 0;
    }
    ((f64::from(numerator) / f64::from(denominator)) * 100.0).round() as u8
}

/// Append items not yet seen, preserving first-observed order.
fn union_into(target: &mut Vec<String>, seen: &mut HashSet<String>, items: &[String]) {
    for item in items {
        let trimmed = item.trim();
        if trimmed.is_empty() {
            continue;
        }
        if seen.insert(trimmed.to_string()) {
            target.push(trimmed.to_string());
        }
    }
}

/// Merge the session's completed interviews into normalized content and
/// progress metrics.
///
/// Interviews are deduplicated by id and processed in session order.
/// Only interviews carrying a rating contribute to the mean; skills are
/// collected from technical interviews only.
pub fn aggregate(session: &Session, config: &EngineConfig) -> Aggregation {
    let completed = session.completed_interviews();
    let total_interviews = session.total_interviews();
    let interview_count = completed.len() as u32;

    let mut content = DraftContent::default();
    let mut rating_sum = 0.0;
    let mut rated_count = 0u32;
    let mut seen_skills = HashSet::new();
    let mut seen_achievements = HashSet::new();
    let mut seen_strengths = HashSet::new();
    let mut seen_improvements = HashSet::new();
    let mut kind_rating_sums: BTreeMap<InterviewKind, (f64, u32)> = BTreeMap::new();

    for interview in &completed {
        content.interviews.push(summarize(interview));

        if let Some(rating) = interview.content.rating {
            rating_sum += rating;
            rated_count += 1;
            let entry = kind_rating_sums.entry(interview.kind).or_insert((0.0, 0));
            entry.0 += rating;
            entry.1 += 1;
        }

        union_into(
            &mut content.recommendations.strengths,
            &mut seen_strengths,
            &interview.content.strengths,
        );
        union_into(
            &mut content.recommendations.improvements,
            &mut seen_improvements,
            &interview.content.improvements,
        );
        if interview.kind == InterviewKind::Technical {
            union_into(
                &mut content.professional.skills,
                &mut seen_skills,
                &interview.content.skills,
            );
        }
        if interview.kind.is_professional() {
            union_into(
                &mut content.professional.achievements,
                &mut seen_achievements,
                &interview.content.strengths,
            );
        }
        if interview.kind == InterviewKind::Friend {
            if let Some(summary) = &interview.content.summary {
                content.personal.narrative.push(summary.clone());
            }
        }
    }

    let overall_rating = if rated_count > 0 {
        Some(round1(rating_sum / f64::from(rated_count)))
    } else {
        None
    };
    content.recommendations.overall_rating = overall_rating;
    content.recommendations.decision = overall_rating.map(RecommendationDecision::from_rating);
    for (kind, (sum, count)) in &kind_rating_sums {
        content
            .professional
            .ratings_by_kind
            .insert(*kind, round1(sum / f64::from(*count)));
    }

    let progress = compute_progress(session, &completed, config);

    Aggregation {
        content,
        progress,
        interview_count,
        total_interviews,
        overall_rating,
    }
}

/// Build the per-interview summary entry.
fn summarize(interview: &Interview) -> InterviewSummary {
    InterviewSummary {
        id: interview.id.clone(),
        kind: interview.kind,
        interviewer: interview.interviewer.clone(),
        completed_at: interview.completed_at,
        rating: interview.content.rating,
        summary: interview.content.summary.clone(),
        strengths: interview.content.strengths.clone(),
        improvements: interview.content.improvements.clone(),
    }
}

/// Derive the progress metrics.
fn compute_progress(
    session: &Session,
    completed: &[&Interview],
    config: &EngineConfig,
) -> DraftProgress {
    let total = session.total_interviews();
    let overall = pct(completed.len() as u32, total);

    let personal = if completed.is_empty() { 0 } else { 100 };

    let mut seen = HashSet::new();
    let distinct: Vec<&Interview> = session
        .interviews
        .iter()
        .filter(|i| seen.insert(i.id.as_str()))
        .collect();

    let professional_total = distinct.iter().filter(|i| i.kind.is_professional()).count() as u32;
    let professional_done = completed.iter().filter(|i| i.kind.is_professional()).count() as u32;
    let professional = pct(professional_done, professional_total);

    let high_confidence = completed
        .iter()
        .filter_map(|i| i.content.rating)
        .any(|r| r >= config.high_confidence_rating);
    let factor = if high_confidence {
        config.high_confidence_factor
    } else {
        config.low_confidence_factor
    };
    let recommendations = ((f64::from(overall) * factor).round() as u8).min(100);

    let mut by_kind: BTreeMap<InterviewKind, KindProgress> = BTreeMap::new();
    for interview in &distinct {
        let entry = by_kind.entry(interview.kind).or_default();
        entry.total += 1;
    }
    for interview in completed {
        if let Some(entry) = by_kind.get_mut(&interview.kind) {
            entry.completed += 1;
        }
    }

    DraftProgress {
        overall,
        personal,
        professional,
        recommendations,
        by_kind,
    }
}
