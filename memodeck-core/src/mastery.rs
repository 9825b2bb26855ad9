use crate::{Card, SchedulePolicy};

/// Ladder position as a state: either still climbing or graduated.
///
/// `Mastered` is terminal; nothing here schedules a mastered card again.
/// Whether mastered cards appear in a due queue is the caller's call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MasteryState {
    Active(u32),
    Mastered,
}

pub fn mastery_state(review_index: u32, ladder_len: usize) -> MasteryState {
    if is_mastered(review_index, ladder_len) {
        MasteryState::Mastered
    } else {
        MasteryState::Active(review_index)
    }
}

pub fn is_mastered(review_index: u32, ladder_len: usize) -> bool {
    review_index as usize >= ladder_len
}

/// True when `card` has graduated off the ladder. Exponential scheduling
/// has no terminal state, so it never masters a card.
pub fn card_is_mastered(card: &Card, policy: &SchedulePolicy) -> bool {
    match policy.ladder_len() {
        Some(len) => is_mastered(card.review_index, len),
        None => false,
    }
}

const ORDINAL_LABELS: [&str; 10] = [
    "1st Review",
    "2nd Review",
    "3rd Review",
    "4th Review",
    "5th Review",
    "6th Review",
    "7th Review",
    "8th Review",
    "9th Review",
    "10th Review",
];

pub const MASTERED_LABEL: &str = "Mastered";

/// Human label for a card's ladder position: "1st Review", "2nd Review",
/// ... then "Mastered" once the ladder is cleared.
pub fn status_label(review_index: u32, ladder_len: usize) -> String {
    if is_mastered(review_index, ladder_len) {
        return MASTERED_LABEL.to_string();
    }
    match ORDINAL_LABELS.get(review_index as usize) {
        Some(label) => (*label).to_string(),
        None => format!("{} Review", ordinal(review_index + 1)),
    }
}

fn ordinal(n: u32) -> String {
    // 11th-13th are irregular; otherwise the last digit decides.
    let suffix = match n % 100 {
        11..=13 => "th",
        _ => match n % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{n}{suffix}")
}
