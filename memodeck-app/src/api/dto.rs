use chrono::{DateTime, Utc};
use memodeck_core::{mastery::status_label, Card, SchedulePolicy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize)]
pub struct CardOut {
    pub id: Uuid,
    pub question: String,
    pub answer: String,
    pub tags: Vec<String>,
    pub source: Option<String>,
    pub source_url: Option<String>,
    pub next_review_at: Option<DateTime<Utc>>,
    pub review_count: u32,
    pub review_index: u32,
    /// Ladder position label; absent under the exponential policy.
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl CardOut {
    pub fn from_card(c: Card, policy: &SchedulePolicy) -> Self {
        let status = policy
            .ladder_len()
            .map(|len| status_label(c.review_index, len));
        Self {
            id: c.id,
            question: c.question,
            answer: c.answer,
            tags: c.tags,
            source: c.source,
            source_url: c.source_url,
            next_review_at: c.next_review_at,
            review_count: c.review_count,
            review_index: c.review_index,
            status,
            created_at: c.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct ReviewOut {
    pub id: Uuid,
    pub reviewed_at: DateTime<Utc>,
    pub is_correct: bool,
    pub user_answer: Option<String>,
}

#[derive(Deserialize)]
pub struct CardIn {
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Deserialize)]
pub struct ReviewIn {
    pub card_id: Uuid,
    pub is_correct: bool,
    #[serde(default)]
    pub user_answer: Option<String>,
}

#[derive(Serialize)]
pub struct StatsOut {
    pub total_cards: usize,
    pub reviews_due_today: usize,
    pub total_reviews_completed: u32,
    pub average_accuracy: f32,
    pub day_streak: u32,
}

#[derive(Serialize)]
pub struct ProfileOut {
    pub level: u32,
    pub title: &'static str,
    pub current_xp: u64,
    pub next_level_xp: u64,
    pub progress: f32,
    pub total_xp: u64,
}
