use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;

use memodeck_core::{
    filters::filter_due,
    progression::{collection_xp, level_info},
    scheduler::record_review,
    stats::dashboard,
    SchedulePolicy,
};

use crate::api::dto::{CardIn, CardOut, ProfileOut, ReviewIn, ReviewOut, StatsOut};

#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn memodeck_core::Repository>,
    pub policy: SchedulePolicy,
}

#[derive(Deserialize)]
pub struct DueQuery {
    max: Option<usize>,
}

pub async fn list_cards(State(st): State<Arc<AppState>>) -> Result<Json<Vec<CardOut>>, StatusCode> {
    let mut cards = st
        .repo
        .list_cards()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    cards.sort_by_key(|c| c.created_at);
    Ok(Json(
        cards
            .into_iter()
            .map(|c| CardOut::from_card(c, &st.policy))
            .collect(),
    ))
}

pub async fn create_card(
    State(st): State<Arc<AppState>>,
    Json(body): Json<CardIn>,
) -> Result<(StatusCode, Json<CardOut>), StatusCode> {
    let card = st
        .repo
        .add_card(&body.question, &body.answer, body.source.as_deref(), &body.tags)
        .await
        .map_err(|e| match e {
            memodeck_core::CoreError::DuplicateQuestion(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        })?;
    Ok((StatusCode::CREATED, Json(CardOut::from_card(card, &st.policy))))
}

pub async fn due_cards(
    State(st): State<Arc<AppState>>,
    Query(q): Query<DueQuery>,
) -> Result<Json<Vec<CardOut>>, StatusCode> {
    let now = chrono::Utc::now();
    let cards = st
        .repo
        .list_cards()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut pool = filter_due(&cards, now);
    pool.sort_by_key(|c| (c.next_review_at, c.created_at));
    if let Some(m) = q.max {
        pool.truncate(m);
    }

    Ok(Json(
        pool.into_iter()
            .map(|c| CardOut::from_card(c, &st.policy))
            .collect(),
    ))
}

pub async fn post_review(
    State(st): State<Arc<AppState>>,
    Json(body): Json<ReviewIn>,
) -> Result<Json<CardOut>, StatusCode> {
    let card = st
        .repo
        .get_card(body.card_id)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    let out = record_review(
        card,
        body.is_correct,
        body.user_answer,
        chrono::Utc::now(),
        &st.policy,
    )
    .map_err(|_| StatusCode::BAD_REQUEST)?;
    st.repo
        .update_card(&out.updated_card)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(CardOut::from_card(out.updated_card, &st.policy)))
}

pub async fn list_reviews(
    State(st): State<Arc<AppState>>,
    axum::extract::Path(id): axum::extract::Path<uuid::Uuid>,
) -> Result<Json<Vec<ReviewOut>>, StatusCode> {
    let card = st
        .repo
        .get_card(id)
        .await
        .map_err(|_| StatusCode::NOT_FOUND)?;
    Ok(Json(
        card.review_history
            .into_iter()
            .map(|r| ReviewOut {
                id: r.id,
                reviewed_at: r.reviewed_at,
                is_correct: r.correct,
                user_answer: r.user_answer,
            })
            .collect(),
    ))
}

pub async fn get_stats(State(st): State<Arc<AppState>>) -> Result<Json<StatsOut>, StatusCode> {
    let cards = st
        .repo
        .list_cards()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let d = dashboard(&cards, chrono::Utc::now());
    Ok(Json(StatsOut {
        total_cards: d.total_cards,
        reviews_due_today: d.due_today,
        total_reviews_completed: d.total_reviews,
        average_accuracy: d.average_accuracy,
        day_streak: d.day_streak,
    }))
}

pub async fn get_profile(State(st): State<Arc<AppState>>) -> Result<Json<ProfileOut>, StatusCode> {
    let cards = st
        .repo
        .list_cards()
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let xp = collection_xp(&cards);
    let info = level_info(xp);
    Ok(Json(ProfileOut {
        level: info.level,
        title: info.title,
        current_xp: info.current_xp,
        next_level_xp: info.next_level_xp,
        progress: info.progress,
        total_xp: xp,
    }))
}
