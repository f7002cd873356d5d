use super::{Question, QuestionCategory, QuestionStore};
use anyhow::{Context, Result};
use futures::stream::TryStreamExt;
use mongodb::bson::doc;
use mongodb::{Client, Database};
use tracing::info;

const QUESTIONS: &str = "questions";
const CATEGORIES: &str = "questions-categories";

/// MongoDB-backed question store
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connect to the store and select the application database
    pub async fn connect(url: &str, database: &str) -> Result<Self> {
        info!("Connecting to question store at {}", url);

        let client = Client::with_uri_str(url)
            .await
            .context("Failed to connect to question store")?;
        let db = client.database(database);

        info!("Connected to question store, database: {}", database);

        Ok(Self { db })
    }
}

#[async_trait::async_trait]
impl QuestionStore for MongoStore {
    async fn categories(&self) -> Result<Vec<QuestionCategory>> {
        let cursor = self
            .db
            .collection::<QuestionCategory>(CATEGORIES)
            .find(doc! {})
            .await
            .context("Failed to query question categories")?;

        let categories = cursor
            .try_collect()
            .await
            .context("Failed to read question categories")?;

        Ok(categories)
    }

    async fn questions(&self, category_id: Option<&str>) -> Result<Vec<Question>> {
        let filter = match category_id {
            Some(id) => doc! { "categoryId": id },
            None => doc! {},
        };

        let cursor = self
            .db
            .collection::<Question>(QUESTIONS)
            .find(filter)
            .await
            .context("Failed to query questions")?;

        let questions = cursor
            .try_collect()
            .await
            .context("Failed to read questions")?;

        Ok(questions)
    }

    async fn question_by_id(&self, id: &str) -> Result<Option<Question>> {
        let question = self
            .db
            .collection::<Question>(QUESTIONS)
            .find_one(doc! { "_id": id })
            .await
            .context("Failed to look question up")?;

        Ok(question)
    }
}
