//! Priority-ordered study suggestions.

use chrono::NaiveDate;
use serde_json::{json, Map, Value};

use crate::domain::{Deadline, DeadlineStatus, Recommendation, RecommendationKind, TopicProgress};

/// Topics at or above this confidence are not suggested
pub const WEAK_TOPIC_CONFIDENCE: u8 = 60;

/// At most this many weak topics are suggested
pub const MAX_TOPIC_SUGGESTIONS: usize = 3;

/// Deadlines further out than this are not suggested
pub const DEADLINE_WINDOW_DAYS: i64 = 7;

/// Study minutes in the trailing 24 hours above which a break is suggested
pub const BREAK_THRESHOLD_MINUTES: u32 = 300;

pub const BREAK_PRIORITY: i32 = 70;

fn metadata(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn topic_recommendations(topics: &[TopicProgress]) -> Vec<Recommendation> {
    let mut weak: Vec<&TopicProgress> = topics
        .iter()
        .filter(|t| t.snapshot.confidence_level < WEAK_TOPIC_CONFIDENCE)
        .collect();
    weak.sort_by_key(|t| (t.snapshot.confidence_level, t.topic_id));

    weak.into_iter()
        .take(MAX_TOPIC_SUGGESTIONS)
        .map(|t| {
            let confidence = t.snapshot.confidence_level;
            Recommendation {
                kind: RecommendationKind::Topic,
                title: format!("Review {}", t.name),
                description: format!(
                    "Your confidence in {} is {}%. Difficulty score {}.",
                    t.name, confidence, t.snapshot.difficulty_score
                ),
                priority: 100 - confidence as i32,
                metadata: metadata(json!({
                    "topic_id": t.topic_id,
                    "confidence_level": confidence,
                    "difficulty_score": t.snapshot.difficulty_score,
                })),
            }
        })
        .collect()
}

fn deadline_recommendations(deadlines: &[Deadline], today: NaiveDate) -> Vec<Recommendation> {
    let mut pending: Vec<&Deadline> = deadlines
        .iter()
        .filter(|d| d.status == DeadlineStatus::Pending)
        .collect();
    pending.sort_by_key(|d| (d.due_date, d.id));

    pending
        .into_iter()
        .filter_map(|d| {
            let days_until = (d.due_date - today).num_days();
            if !(0..=DEADLINE_WINDOW_DAYS).contains(&days_until) {
                return None;
            }
            let when = match days_until {
                0 => "today".to_string(),
                1 => "tomorrow".to_string(),
                n => format!("in {} days", n),
            };
            Some(Recommendation {
                kind: RecommendationKind::Revision,
                title: format!("Prepare for {}", d.title),
                description: format!("{} is due {}.", d.title, when),
                priority: 100 - (days_until as i32) * 10,
                metadata: metadata(json!({
                    "deadline_id": d.id,
                    "due_date": d.due_date,
                    "days_until_due": days_until,
                })),
            })
        })
        .collect()
}

fn break_recommendation(recent_study_minutes: u32) -> Option<Recommendation> {
    (recent_study_minutes > BREAK_THRESHOLD_MINUTES).then(|| Recommendation {
        kind: RecommendationKind::Break,
        title: "Take a break".to_string(),
        description: format!(
            "You studied {} minutes in the last 24 hours. Rest helps retention.",
            recent_study_minutes
        ),
        priority: BREAK_PRIORITY,
        metadata: metadata(json!({ "recent_study_minutes": recent_study_minutes })),
    })
}

/// Build the ranked suggestion list.
///
/// `recent_study_minutes` covers the trailing 24 hours. Output is sorted by
/// priority, highest first; equal priorities keep the topic, deadline, break
/// order. Within a group, weak topics are ordered by confidence then id and
/// deadlines by due date then id, so shuffled input gives the same output.
pub fn recommend(
    topics: &[TopicProgress],
    deadlines: &[Deadline],
    recent_study_minutes: u32,
    today: NaiveDate,
) -> Vec<Recommendation> {
    let mut out = topic_recommendations(topics);
    out.extend(deadline_recommendations(deadlines, today));
    out.extend(break_recommendation(recent_study_minutes));

    // Stable: ties keep insertion order
    out.sort_by(|a, b| b.priority.cmp(&a.priority));

    tracing::debug!(count = out.len(), "Built recommendations");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DifficultySnapshot;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, 1).unwrap()
    }

    fn topic(topic_id: i64, confidence_level: u8) -> TopicProgress {
        TopicProgress {
            topic_id,
            name: format!("Topic {}", topic_id),
            snapshot: DifficultySnapshot {
                difficulty_score: 60,
                confidence_level,
                time_spent_minutes: 0,
                revision_count: 1,
                predicted_mastery_date: today(),
            },
        }
    }

    fn deadline(id: i64, in_days: i64, status: DeadlineStatus) -> Deadline {
        Deadline {
            id,
            title: format!("Exam {}", id),
            due_date: today() + chrono::Duration::days(in_days),
            status,
        }
    }

    #[test]
    fn nothing_to_recommend() {
        assert!(recommend(&[], &[], 0, today()).is_empty());
        assert!(recommend(&[topic(1, 60), topic(2, 95)], &[], 300, today()).is_empty());
    }

    #[test]
    fn three_weakest_topics() {
        let topics = vec![topic(1, 55), topic(2, 10), topic(3, 40), topic(4, 59), topic(5, 80)];
        let recs = recommend(&topics, &[], 0, today());
        let ids: Vec<i64> = recs.iter().map(|r| r.metadata["topic_id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
        let priorities: Vec<i32> = recs.iter().map(|r| r.priority).collect();
        assert_eq!(priorities, vec![90, 60, 45]);
        assert!(recs.iter().all(|r| r.kind == RecommendationKind::Topic));
    }

    #[test]
    fn deadline_window() {
        let deadlines = vec![
            deadline(1, 0, DeadlineStatus::Pending),
            deadline(2, 7, DeadlineStatus::Pending),
            deadline(3, 8, DeadlineStatus::Pending),
            deadline(4, -1, DeadlineStatus::Pending),
            deadline(5, 2, DeadlineStatus::Completed),
        ];
        let recs = recommend(&[], &deadlines, 0, today());
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].priority, 100);
        assert_eq!(recs[0].metadata["deadline_id"], json!(1));
        assert_eq!(recs[0].description, "Exam 1 is due today.");
        assert_eq!(recs[1].priority, 30);
        assert_eq!(recs[1].metadata["days_until_due"], json!(7));
        assert_eq!(recs[1].metadata["due_date"], json!("2025-04-08"));
        assert!(recs.iter().all(|r| r.kind == RecommendationKind::Revision));
    }

    #[test]
    fn break_after_long_day() {
        assert!(recommend(&[], &[], 300, today()).is_empty());
        let recs = recommend(&[], &[], 301, today());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].kind, RecommendationKind::Break);
        assert_eq!(recs[0].priority, BREAK_PRIORITY);
    }

    #[test]
    fn mixed_sorted_by_priority() {
        let topics = vec![topic(1, 50), topic(2, 20)];
        let deadlines = vec![deadline(9, 1, DeadlineStatus::Pending)];
        let recs = recommend(&topics, &deadlines, 400, today());
        let got: Vec<(RecommendationKind, i32)> = recs.iter().map(|r| (r.kind, r.priority)).collect();
        assert_eq!(
            got,
            vec![
                (RecommendationKind::Revision, 90),
                (RecommendationKind::Topic, 80),
                (RecommendationKind::Break, 70),
                (RecommendationKind::Topic, 50),
            ]
        );
    }

    #[test]
    fn ties_keep_topic_deadline_break_order() {
        let topics = vec![topic(1, 30)];
        let deadlines = vec![deadline(2, 3, DeadlineStatus::Pending)];
        let recs = recommend(&topics, &deadlines, 500, today());
        let kinds: Vec<RecommendationKind> = recs.iter().map(|r| r.kind).collect();
        assert_eq!(
            kinds,
            vec![RecommendationKind::Topic, RecommendationKind::Revision, RecommendationKind::Break]
        );
        assert!(recs.iter().all(|r| r.priority == 70));
    }

    #[test]
    fn weak_topic_cut_agrees_with_scorer() {
        use crate::domain::RevisionRecord;
        use crate::progress::score;

        let scored = |topic_id: i64, confidences: &[u8]| {
            let revisions: Vec<RevisionRecord> = confidences
                .iter()
                .enumerate()
                .map(|(i, &confidence_level)| RevisionRecord {
                    revision_number: i as u32 + 1,
                    revision_date: today(),
                    confidence_level,
                    next_revision_date: today(),
                })
                .collect();
            TopicProgress {
                topic_id,
                name: format!("Topic {}", topic_id),
                snapshot: score(0, &revisions, today()),
            }
        };

        // mean 59.5 rounds to 60, mean 59 stays weak
        let borderline = scored(1, &[59, 60]);
        let weak = scored(2, &[59, 59]);
        assert_eq!(borderline.snapshot.difficulty_score, 50);
        assert_eq!(weak.snapshot.difficulty_score, 60);

        let recs = recommend(&[borderline, weak], &[], 0, today());
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].metadata["topic_id"], json!(2));
        assert_eq!(recs[0].priority, 41);
    }

    #[test]
    fn shuffled_input_gives_same_output() {
        let topics = vec![topic(1, 40), topic(2, 40), topic(3, 10), topic(4, 55)];
        let deadlines = vec![deadline(5, 2, DeadlineStatus::Pending), deadline(6, 2, DeadlineStatus::Pending)];
        let expected = recommend(&topics, &deadlines, 350, today());

        let mut topics_rev = topics.clone();
        topics_rev.reverse();
        let mut deadlines_rev = deadlines.clone();
        deadlines_rev.reverse();
        assert_eq!(recommend(&topics_rev, &deadlines_rev, 350, today()), expected);
    }
}
