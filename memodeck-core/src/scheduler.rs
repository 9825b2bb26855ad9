use crate::{Card, CoreError, ReviewRecord, SchedulePolicy};
use chrono::{DateTime, Duration, Utc};

pub struct ScheduleOutcome {
    pub updated_card: Card,
    pub record: ReviewRecord,
}

/// Records one review event and reschedules the card under `policy`.
///
/// `now` is injected so the scheduling decision is deterministic. Each
/// call is a distinct event: the record id is fresh and `review_count`
/// grows, even for identical inputs.
pub fn record_review(
    mut card: Card,
    correct: bool,
    user_answer: Option<String>,
    now: DateTime<Utc>,
    policy: &SchedulePolicy,
) -> Result<ScheduleOutcome, CoreError> {
    if card.review_count as usize != card.review_history.len() {
        return Err(CoreError::Invalid("review count does not match history"));
    }
    if let SchedulePolicy::FixedLadder { intervals } = policy {
        if intervals.is_empty() {
            return Err(CoreError::Invalid("ladder must not be empty"));
        }
    }

    let record = ReviewRecord::new(correct, user_answer, now);
    card.review_history.push(record.clone());
    card.review_count += 1;

    match policy {
        SchedulePolicy::Exponential { max_days } => {
            // Exponent uses the count including the review just recorded,
            // so the first correct answer lands 2 days out, not 1.
            let days = if correct {
                exponential_interval(card.review_count, *max_days)
            } else {
                1
            };
            card.next_review_at = Some(now + Duration::days(days as i64));
        }
        SchedulePolicy::FixedLadder { intervals } => {
            if correct {
                card.review_index += 1;
                card.next_review_at = intervals
                    .get(card.review_index as usize)
                    .map(|days| now + Duration::days(*days as i64));
            } else {
                card.review_index = 0;
                card.next_review_at = Some(now + Duration::days(intervals[0] as i64));
            }
        }
    }

    card.updated_at = now;

    Ok(ScheduleOutcome {
        updated_card: card,
        record,
    })
}

fn exponential_interval(review_count: u32, max_days: u32) -> u32 {
    if review_count >= 32 {
        return max_days;
    }
    ((1u64 << review_count).min(max_days as u64)) as u32
}
