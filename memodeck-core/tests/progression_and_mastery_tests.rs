use chrono::{TimeZone, Utc};
use memodeck_core::{
    card_is_mastered, collection_xp, is_mastered, level_info, mastery_state, record_review,
    status_label, total_xp, Card, MasteryState, SchedulePolicy,
};

#[test]
fn xp_weights() {
    assert_eq!(total_xp(0, 0, 0), 0);
    assert_eq!(total_xp(1, 0, 0), 10);
    assert_eq!(total_xp(0, 1, 1), 8); // 5 base + 3 bonus
    assert_eq!(total_xp(2, 4, 3), 2 * 10 + 4 * 5 + 3 * 3);
}

#[test]
fn level_one_at_zero_xp() {
    let info = level_info(0);
    assert_eq!(info.level, 1);
    assert_eq!(info.current_xp, 0);
    assert_eq!(info.next_level_xp, 100);
    assert_eq!(info.progress, 0.0);
    assert_eq!(info.title, "Beginner");
}

#[test]
fn exact_boundary_lands_on_next_level() {
    // 100 XP is exactly the cost of level 1 -> 2.
    let info = level_info(100);
    assert_eq!(info.level, 2);
    assert_eq!(info.current_xp, 0);
    assert_eq!(info.next_level_xp, 200);
    assert_eq!(info.progress, 0.0);

    // 100 + 200 lands exactly on level 3.
    let info = level_info(300);
    assert_eq!(info.level, 3);
    assert_eq!(info.current_xp, 0);
}

#[test]
fn partial_progress_within_a_level() {
    let info = level_info(150);
    assert_eq!(info.level, 2);
    assert_eq!(info.current_xp, 50);
    assert_eq!(info.next_level_xp, 200);
    assert_eq!(info.progress, 25.0);
}

#[test]
fn titles_change_every_five_levels() {
    // Levels 1-5 cost 100+200+300+400+500 = 1500 XP in total.
    let info = level_info(1500);
    assert_eq!(info.level, 6);
    assert_eq!(info.title, "Learner");

    // Far beyond the table: clamped to the last title.
    let info = level_info(100_000_000);
    assert_eq!(info.title, "Grand Master");
}

#[test]
fn mastery_predicate() {
    assert!(!is_mastered(0, 5));
    assert!(!is_mastered(4, 5));
    assert!(is_mastered(5, 5));
    assert!(is_mastered(6, 5));

    assert_eq!(mastery_state(2, 5), MasteryState::Active(2));
    assert_eq!(mastery_state(5, 5), MasteryState::Mastered);
}

#[test]
fn status_labels() {
    assert_eq!(status_label(0, 5), "1st Review");
    assert_eq!(status_label(1, 5), "2nd Review");
    assert_eq!(status_label(2, 5), "3rd Review");
    assert_eq!(status_label(4, 5), "5th Review");
    assert_eq!(status_label(5, 5), "Mastered");
}

#[test]
fn generated_ordinals_beyond_the_table() {
    assert_eq!(status_label(10, 100), "11th Review");
    assert_eq!(status_label(12, 100), "13th Review");
    assert_eq!(status_label(20, 100), "21st Review");
    assert_eq!(status_label(21, 100), "22nd Review");
    assert_eq!(status_label(22, 100), "23rd Review");
    assert_eq!(status_label(110, 200), "111th Review");
}

#[test]
fn exponential_policy_never_masters() {
    let card = Card::new("a", "b");
    assert!(!card_is_mastered(&card, &SchedulePolicy::exponential()));
}

#[test]
fn ladder_card_masters_after_clearing_every_rung() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let policy = SchedulePolicy::fixed_ladder();
    let mut card = Card::new("a", "b");
    for _ in 0..5 {
        assert!(!card_is_mastered(&card, &policy));
        card = record_review(card, true, None, now, &policy)
            .unwrap()
            .updated_card;
    }
    assert!(card_is_mastered(&card, &policy));
}

#[test]
fn collection_xp_aggregates_cards_and_histories() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let policy = SchedulePolicy::exponential();

    let mut a = Card::new("a", "b");
    a = record_review(a, true, None, now, &policy).unwrap().updated_card;
    a = record_review(a, false, None, now, &policy)
        .unwrap()
        .updated_card;
    let b = Card::new("c", "d");

    // 2 cards, 2 reviews, 1 correct: 20 + 10 + 3.
    assert_eq!(collection_xp(&[a, b]), 33);
}
