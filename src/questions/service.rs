use super::sampler;
use crate::store::{Question, QuestionCategory, QuestionStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Store-facing question selection service
pub struct QuestionService {
    store: Arc<dyn QuestionStore>,
    questions_per_session: usize,
}

impl QuestionService {
    pub fn new(store: Arc<dyn QuestionStore>, questions_per_session: usize) -> Self {
        Self {
            store,
            questions_per_session,
        }
    }

    pub async fn categories(&self) -> Result<Vec<QuestionCategory>> {
        self.store.categories().await
    }

    pub async fn question_by_id(&self, id: &str) -> Result<Option<Question>> {
        self.store.question_by_id(id).await
    }

    /// Draw the interview set for the requested categories.
    ///
    /// Zero categories samples across the whole bank, one category samples
    /// within it, several categories get the balanced per-category draw.
    pub async fn interview_set(&self, category_ids: &[String]) -> Result<Vec<Question>> {
        let n = self.questions_per_session;

        let sample = match category_ids {
            [] => {
                let pool = self.store.questions(None).await?;
                let mut rng = rand::thread_rng();
                sampler::sample_uniform(&mut rng, pool, n)
            }
            [category] => {
                let pool = self.store.questions(Some(category.as_str())).await?;
                let mut rng = rand::thread_rng();
                sampler::sample_uniform(&mut rng, pool, n)
            }
            _ => {
                let mut per_category = Vec::with_capacity(category_ids.len());
                for category in category_ids {
                    per_category.push(self.store.questions(Some(category.as_str())).await?);
                }
                let mut rng = rand::thread_rng();
                sampler::balanced_sample(&mut rng, per_category, n)
            }
        };

        info!(
            "Sampled {} questions for {} requested categories",
            sample.len(),
            category_ids.len()
        );

        Ok(sample)
    }
}
