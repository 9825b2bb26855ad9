use chrono::{Duration, TimeZone, Utc};
use memodeck_core::{
    daily_streak, dashboard, filter_by_tag, filter_by_text, filter_due, filter_not_mastered,
    record_review, summarize, Card, ReviewRecord, SchedulePolicy,
};

#[test]
fn filters_text_and_tag() {
    let mut c1 = Card::new("hola", "hello");
    c1.tags = vec!["greeting".into(), "spanish".into()];
    let c2 = Card::new("adios", "goodbye");

    let v = vec![c1.clone(), c2.clone()];

    let by_text = filter_by_text(&v, "hol");
    assert_eq!(by_text.len(), 1);
    assert_eq!(by_text[0].question, "hola");

    let by_tag = filter_by_tag(&v, "spanish");
    assert_eq!(by_tag.len(), 1);
    assert_eq!(by_tag[0].question, "hola");

    // answers are searched too
    let by_answer = filter_by_text(&v, "goodbye");
    assert_eq!(by_answer.len(), 1);
    assert_eq!(by_answer[0].question, "adios");
}

#[test]
fn due_filter_excludes_future_and_mastered() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();

    let mut due = Card::new("due", "x");
    due.next_review_at = Some(now - Duration::hours(1));

    let mut future = Card::new("future", "x");
    future.next_review_at = Some(now + Duration::days(2));

    let mut mastered = Card::new("mastered", "x");
    mastered.review_index = 5;
    mastered.next_review_at = None;

    let v = vec![due.clone(), future, mastered];
    let d = filter_due(&v, now);
    assert_eq!(d.len(), 1);
    assert_eq!(d[0].question, "due");
}

#[test]
fn mastered_filter_follows_policy() {
    let ladder = SchedulePolicy::fixed_ladder();

    let mut done = Card::new("done", "x");
    done.review_index = 5;
    let active = Card::new("active", "x");

    let v = vec![done.clone(), active];
    let remaining = filter_not_mastered(&v, &ladder);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].question, "active");

    // Exponential policy has no mastered state; everything stays.
    assert_eq!(filter_not_mastered(&v, &SchedulePolicy::exponential()).len(), 2);
}

#[test]
fn summary_and_accuracy() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let records = vec![
        ReviewRecord::new(true, None, now - Duration::days(2)),
        ReviewRecord::new(true, None, now - Duration::days(1)),
        ReviewRecord::new(false, None, now),
    ];

    let s = summarize(&records);
    assert_eq!(s.totals.total, 3);
    assert_eq!(s.totals.correct, 2);
    assert_eq!(s.totals.incorrect, 1);
    assert!((s.totals.accuracy() - 2.0 / 3.0).abs() < 1e-6);
    assert_eq!(s.per_day.len(), 3);
}

#[test]
fn streak_counts_consecutive_days() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let today = now.date_naive();

    let records = vec![
        ReviewRecord::new(true, None, now - Duration::days(1)),
        ReviewRecord::new(false, None, now),
    ];
    assert_eq!(daily_streak(&records, today), 2);

    // A gap breaks the streak.
    let gapped = vec![
        ReviewRecord::new(true, None, now - Duration::days(3)),
        ReviewRecord::new(true, None, now),
    ];
    assert_eq!(daily_streak(&gapped, today), 1);

    assert_eq!(daily_streak(&[], today), 0);
}

#[test]
fn dashboard_snapshot() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let policy = SchedulePolicy::exponential();

    let mut a = Card::new("a", "x");
    a.next_review_at = Some(now - Duration::hours(6)); // earlier today
    a = record_review(a, true, None, now, &policy).unwrap().updated_card;
    a.next_review_at = Some(now - Duration::hours(6));

    let mut b = Card::new("b", "x");
    b.next_review_at = Some(now + Duration::days(5));

    let d = dashboard(&[a, b], now);
    assert_eq!(d.total_cards, 2);
    assert_eq!(d.due_today, 1);
    assert_eq!(d.total_reviews, 1);
    assert_eq!(d.average_accuracy, 1.0);
    assert_eq!(d.day_streak, 1);
}
