use crate::Card;
use serde::Serialize;

pub const XP_PER_CARD_ADDED: u64 = 10;
pub const XP_PER_REVIEW: u64 = 5;
pub const XP_PER_CORRECT_REVIEW: u64 = 3;

/// One title per five levels, clamped at the top.
pub const LEVEL_TITLES: [&str; 10] = [
    "Beginner",
    "Learner",
    "Student",
    "Scholar",
    "Expert",
    "Master",
    "Guru",
    "Sage",
    "Legend",
    "Grand Master",
];

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct LevelInfo {
    pub level: u32,
    pub title: &'static str,
    pub current_xp: u64,
    pub next_level_xp: u64,
    pub progress: f32,
}

/// XP required to advance from `level` to `level + 1`.
pub fn xp_for_level(level: u32) -> u64 {
    level as u64 * 100
}

pub fn total_xp(cards_created: u64, total_reviews: u64, correct_reviews: u64) -> u64 {
    cards_created * XP_PER_CARD_ADDED
        + total_reviews * XP_PER_REVIEW
        + correct_reviews * XP_PER_CORRECT_REVIEW
}

/// Resolves a total XP figure into level, title, and progress toward the
/// next level. An exact level boundary lands on the new level with zero
/// progress.
pub fn level_info(total_xp: u64) -> LevelInfo {
    let mut level = 1u32;
    let mut consumed = 0u64;
    while total_xp >= consumed + xp_for_level(level) {
        consumed += xp_for_level(level);
        level += 1;
    }

    let current_xp = total_xp - consumed;
    let next_level_xp = xp_for_level(level);
    let progress = (current_xp as f32 / next_level_xp as f32) * 100.0;

    let title_idx = (((level - 1) / 5) as usize).min(LEVEL_TITLES.len() - 1);

    LevelInfo {
        level,
        title: LEVEL_TITLES[title_idx],
        current_xp,
        next_level_xp,
        progress,
    }
}

/// Total XP earned by a whole collection: creation XP per card plus review
/// and correct-answer XP from each card's history.
pub fn collection_xp(cards: &[Card]) -> u64 {
    let total_reviews: u64 = cards.iter().map(|c| c.review_count as u64).sum();
    let correct_reviews: u64 = cards.iter().map(|c| c.correct_count() as u64).sum();
    total_xp(cards.len() as u64, total_reviews, correct_reviews)
}
