use crate::{Card, CardId, CoreError};
use async_trait::async_trait;

pub mod memory;

/// Persistence seam. The scheduler never calls this itself; the caller
/// orchestrates load -> record_review -> save.
#[async_trait]
pub trait Repository: Send + Sync {
    async fn add_card(
        &self,
        question: &str,
        answer: &str,
        source: Option<&str>,
        tags: &[String],
    ) -> Result<Card, CoreError>;

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError>;
    async fn list_cards(&self) -> Result<Vec<Card>, CoreError>;
    async fn update_card(&self, card: &Card) -> Result<Card, CoreError>;
    async fn delete_card(&self, id: CardId) -> Result<(), CoreError>;
}
