//! Question store access
//!
//! The store holds two read-only collections seeded out of band:
//! - `questions` - the interview question bank
//! - `questions-categories` - category reference data
//!
//! `QuestionStore` is the seam the rest of the service programs against;
//! `MongoStore` backs it in production and `InMemoryStore` backs tests.

mod memory;
mod model;
mod mongo;

use anyhow::Result;

pub use memory::InMemoryStore;
pub use model::{Question, QuestionCategory};
pub use mongo::MongoStore;

/// Read access to the question bank
#[async_trait::async_trait]
pub trait QuestionStore: Send + Sync {
    /// All category reference documents
    async fn categories(&self) -> Result<Vec<QuestionCategory>>;

    /// Questions, optionally restricted to one category
    async fn questions(&self, category_id: Option<&str>) -> Result<Vec<Question>>;

    /// Look a single question up by its document id
    async fn question_by_id(&self, id: &str) -> Result<Option<Question>>;
}
