use crate::{Card, CardId, CoreError};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;

#[derive(Default)]
pub struct MemoryRepo {
    cards: RwLock<HashMap<CardId, Card>>,
}

impl MemoryRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl crate::repo::Repository for MemoryRepo {
    async fn add_card(
        &self,
        question: &str,
        answer: &str,
        source: Option<&str>,
        tags: &[String],
    ) -> Result<Card, CoreError> {
        let mut m = self.cards.write();
        if m.values()
            .any(|c| c.question.eq_ignore_ascii_case(question))
        {
            return Err(CoreError::DuplicateQuestion(question.to_string()));
        }
        let mut card = Card::new(question, answer);
        card.source = source.map(|s| s.to_string());
        card.tags = tags.to_vec();
        m.insert(card.id, card.clone());
        Ok(card)
    }

    async fn get_card(&self, id: CardId) -> Result<Card, CoreError> {
        self.cards
            .read()
            .get(&id)
            .cloned()
            .ok_or(CoreError::NotFound(id))
    }

    async fn list_cards(&self) -> Result<Vec<Card>, CoreError> {
        Ok(self.cards.read().values().cloned().collect())
    }

    async fn update_card(&self, card: &Card) -> Result<Card, CoreError> {
        let mut m = self.cards.write();
        if !m.contains_key(&card.id) {
            return Err(CoreError::NotFound(card.id));
        }
        m.insert(card.id, card.clone());
        Ok(card.clone())
    }

    async fn delete_card(&self, id: CardId) -> Result<(), CoreError> {
        self.cards
            .write()
            .remove(&id)
            .ok_or(CoreError::NotFound(id))?;
        Ok(())
    }
}
