use crate::{Card, ReviewRecord};
use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default)]
pub struct Totals {
    pub total: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl Totals {
    pub fn record(&mut self, r: &ReviewRecord) {
        self.total += 1;
        if r.correct {
            self.correct += 1;
        } else {
            self.incorrect += 1;
        }
    }

    pub fn accuracy(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatsSummary {
    pub totals: Totals,
    pub per_day: BTreeMap<NaiveDate, Totals>,
}

pub fn summarize(records: &[ReviewRecord]) -> StatsSummary {
    let mut summary = StatsSummary::default();
    for r in records {
        summary.totals.record(r);
        let d = r.reviewed_at.date_naive();
        summary.per_day.entry(d).or_default().record(r);
    }
    summary
}

/// Consecutive days ending at `today` with at least one review each.
pub fn daily_streak(records: &[ReviewRecord], today: NaiveDate) -> u32 {
    let per_day = summarize(records).per_day;
    let mut streak = 0u32;
    let mut day = today;
    loop {
        if per_day.get(&day).map(|t| t.total > 0).unwrap_or(false) {
            streak += 1;
            day -= Duration::days(1);
        } else {
            break;
        }
    }
    streak
}

#[derive(Clone, Debug, Default)]
pub struct DashboardStats {
    pub total_cards: usize,
    pub due_today: usize,
    pub total_reviews: u32,
    pub average_accuracy: f32,
    pub day_streak: u32,
}

/// Collection-wide snapshot for the dashboard. "Due today" compares dates,
/// not instants, so anything due earlier today still counts.
pub fn dashboard(cards: &[Card], now: DateTime<Utc>) -> DashboardStats {
    let today = now.date_naive();
    let due_today = cards
        .iter()
        .filter(|c| {
            c.next_review_at
                .map(|t| t.date_naive() <= today)
                .unwrap_or(false)
        })
        .count();

    let records: Vec<ReviewRecord> = cards
        .iter()
        .flat_map(|c| c.review_history.iter().cloned())
        .collect();
    let summary = summarize(&records);

    DashboardStats {
        total_cards: cards.len(),
        due_today,
        total_reviews: summary.totals.total,
        average_accuracy: summary.totals.accuracy(),
        day_streak: daily_streak(&records, today),
    }
}
