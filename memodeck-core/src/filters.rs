use crate::{mastery::card_is_mastered, Card, SchedulePolicy};
use chrono::{DateTime, Utc};

pub fn filter_by_text(cards: &[Card], query: &str) -> Vec<Card> {
    let q = query.trim().to_lowercase();
    if q.is_empty() {
        return cards.to_vec();
    }
    cards
        .iter()
        .filter(|c| {
            c.question.to_lowercase().contains(&q)
                || c.answer.to_lowercase().contains(&q)
                || c.tags.iter().any(|t| t.to_lowercase().contains(&q))
        })
        .cloned()
        .collect()
}

pub fn filter_by_tag(cards: &[Card], tag: &str) -> Vec<Card> {
    let q = tag.trim().to_lowercase();
    cards
        .iter()
        .filter(|c| c.tags.iter().any(|t| t.to_lowercase() == q))
        .cloned()
        .collect()
}

/// Cards whose `next_review_at` has arrived. Mastered cards carry no next
/// review, so they never show up here.
pub fn filter_due(cards: &[Card], now: DateTime<Utc>) -> Vec<Card> {
    cards.iter().filter(|c| c.is_due(now)).cloned().collect()
}

pub fn filter_not_mastered(cards: &[Card], policy: &SchedulePolicy) -> Vec<Card> {
    cards
        .iter()
        .filter(|c| !card_is_mastered(c, policy))
        .cloned()
        .collect()
}
