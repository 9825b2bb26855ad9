use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type CardId = Uuid;
pub type ReviewId = Uuid;

/// Default fixed-interval ladder, in days.
pub const DEFAULT_LADDER: [u32; 5] = [1, 3, 7, 14, 30];
/// Cap on the exponential interval, in days.
pub const DEFAULT_MAX_DAYS: u32 = 90;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SchedulePolicy {
    /// Interval doubles with every completed review, capped at `max_days`.
    /// An incorrect review resets the interval to 1 day.
    Exponential { max_days: u32 },
    /// Interval follows a fixed ladder of day lengths; clearing the ladder
    /// marks the card mastered. An incorrect review drops back to rung 0.
    FixedLadder { intervals: Vec<u32> },
}

impl SchedulePolicy {
    pub fn exponential() -> Self {
        Self::Exponential {
            max_days: DEFAULT_MAX_DAYS,
        }
    }

    pub fn fixed_ladder() -> Self {
        Self::FixedLadder {
            intervals: DEFAULT_LADDER.to_vec(),
        }
    }

    /// Ladder length, if this policy has one.
    pub fn ladder_len(&self) -> Option<usize> {
        match self {
            Self::Exponential { .. } => None,
            Self::FixedLadder { intervals } => Some(intervals.len()),
        }
    }
}

impl Default for SchedulePolicy {
    fn default() -> Self {
        Self::exponential()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,

    /// Total completed reviews; always equals `review_history.len()`.
    pub review_count: u32,
    /// Position on the fixed ladder. Untouched by the exponential policy.
    pub review_index: u32,
    /// `None` once the card has cleared the ladder (mastered); such cards
    /// never come due until the caller reschedules them explicitly.
    pub next_review_at: Option<DateTime<Utc>>,
    pub review_history: Vec<ReviewRecord>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Card {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            question: question.into(),
            answer: answer.into(),
            tags: Vec::new(),
            source: None,
            source_url: None,
            review_count: 0,
            review_index: 0,
            next_review_at: Some(now + Duration::days(1)),
            review_history: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_new(&self) -> bool {
        self.review_count == 0
    }

    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review_at.map(|t| t <= now).unwrap_or(false)
    }

    pub fn correct_count(&self) -> u32 {
        self.review_history.iter().filter(|r| r.correct).count() as u32
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub id: ReviewId,
    pub reviewed_at: DateTime<Utc>,
    pub correct: bool,
    pub user_answer: Option<String>,
}

impl ReviewRecord {
    pub fn new(correct: bool, user_answer: Option<String>, reviewed_at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            reviewed_at,
            correct,
            user_answer,
        }
    }
}
