use chrono::{TimeZone, Utc};
use memodeck_core::{
    record_review, repo::memory::MemoryRepo, CoreError, Repository, SchedulePolicy,
};
use uuid::Uuid;

#[tokio::test]
async fn add_and_get_roundtrip() {
    let repo = MemoryRepo::new();
    let tags = vec!["spanish".to_string()];
    let card = repo
        .add_card("hola", "hello", Some("phrasebook"), &tags)
        .await
        .unwrap();

    let got = repo.get_card(card.id).await.unwrap();
    assert_eq!(got.question, "hola");
    assert_eq!(got.answer, "hello");
    assert_eq!(got.source.as_deref(), Some("phrasebook"));
    assert_eq!(got.tags, tags);
    assert_eq!(repo.list_cards().await.unwrap().len(), 1);
}

#[tokio::test]
async fn duplicate_question_conflicts_case_insensitively() {
    let repo = MemoryRepo::new();
    repo.add_card("hola", "hello", None, &[]).await.unwrap();

    let err = repo.add_card("HOLA", "hi", None, &[]).await;
    assert!(matches!(err, Err(CoreError::DuplicateQuestion(q)) if q == "HOLA"));
    assert_eq!(repo.list_cards().await.unwrap().len(), 1);
}

#[tokio::test]
async fn unknown_card_is_not_found() {
    let repo = MemoryRepo::new();
    let id = Uuid::new_v4();

    let err = repo.get_card(id).await;
    assert!(matches!(err, Err(CoreError::NotFound(got)) if got == id));

    let mut phantom = memodeck_core::Card::new("ghost", "boo");
    phantom.id = id;
    let err = repo.update_card(&phantom).await;
    assert!(matches!(err, Err(CoreError::NotFound(got)) if got == id));

    let err = repo.delete_card(id).await;
    assert!(matches!(err, Err(CoreError::NotFound(got)) if got == id));
}

#[tokio::test]
async fn update_persists_a_recorded_review() {
    let now = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
    let repo = MemoryRepo::new();
    let card = repo.add_card("hola", "hello", None, &[]).await.unwrap();

    let out = record_review(card, true, None, now, &SchedulePolicy::exponential()).unwrap();
    repo.update_card(&out.updated_card).await.unwrap();

    let got = repo.get_card(out.updated_card.id).await.unwrap();
    assert_eq!(got.review_count, 1);
    assert_eq!(got.review_history.len(), 1);
    assert_eq!(got.next_review_at, out.updated_card.next_review_at);
}

#[tokio::test]
async fn delete_removes_the_card() {
    let repo = MemoryRepo::new();
    let card = repo.add_card("hola", "hello", None, &[]).await.unwrap();

    repo.delete_card(card.id).await.unwrap();
    assert!(repo.list_cards().await.unwrap().is_empty());
    assert!(matches!(
        repo.get_card(card.id).await,
        Err(CoreError::NotFound(_))
    ));
}
