use super::{Question, QuestionCategory, QuestionStore};
use anyhow::Result;

/// In-memory question store for tests and offline runs
#[derive(Debug, Default)]
pub struct InMemoryStore {
    categories: Vec<QuestionCategory>,
    questions: Vec<Question>,
}

impl InMemoryStore {
    pub fn new(categories: Vec<QuestionCategory>, questions: Vec<Question>) -> Self {
        Self {
            categories,
            questions,
        }
    }
}

#[async_trait::async_trait]
impl QuestionStore for InMemoryStore {
    async fn categories(&self) -> Result<Vec<QuestionCategory>> {
        Ok(self.categories.clone())
    }

    async fn questions(&self, category_id: Option<&str>) -> Result<Vec<Question>> {
        let questions = self
            .questions
            .iter()
            .filter(|q| category_id.map_or(true, |id| q.category_id == id))
            .cloned()
            .collect();

        Ok(questions)
    }

    async fn question_by_id(&self, id: &str) -> Result<Option<Question>> {
        Ok(self.questions.iter().find(|q| q.id == id).cloned())
    }
}
