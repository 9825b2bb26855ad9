use axum::{
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::api::routes::{
    create_card, due_cards, get_profile, get_stats, list_cards, list_reviews, post_review,
    AppState,
};
use memodeck_core::{Repository, SchedulePolicy};

pub async fn run(
    repo: Arc<dyn Repository>,
    policy: SchedulePolicy,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    let state = Arc::new(AppState { repo, policy });

    let app = Router::new()
        .route("/cards", get(list_cards).post(create_card))
        .route("/cards/:id/reviews", get(list_reviews))
        .route("/due", get(due_cards))
        .route("/review", post(post_review))
        .route("/stats", get(get_stats))
        .route("/profile", get(get_profile))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app.into_make_service()).await?;
    Ok(())
}
