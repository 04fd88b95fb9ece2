use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::TryStreamExt;
use mongodb::{
    bson::{self, doc},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::Quiz,
};

/// Quizzes are stored as one document each, questions and options embedded,
/// so every write to a quiz is atomic.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuizRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>>;
    /// Newest first.
    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>>;
    async fn list_public(&self) -> AppResult<Vec<Quiz>>;
    async fn count(&self) -> AppResult<u64>;
    async fn create(&self, quiz: Quiz) -> AppResult<Quiz>;
    /// Returns false when no quiz with that id exists.
    async fn replace(&self, quiz: &Quiz) -> AppResult<bool>;
    async fn delete(&self, id: &str) -> AppResult<bool>;
    async fn touch_last_used(&self, id: &str, at: DateTime<Utc>) -> AppResult<()>;
    async fn health_check(&self) -> AppResult<()>;
    async fn ensure_indexes(&self) -> AppResult<()>;
}

pub struct MongoQuizRepository {
    db: Database,
    collection: Collection<Quiz>,
}

impl MongoQuizRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.quizzes();
        Self {
            db: db.clone(),
            collection,
        }
    }
}

#[async_trait]
impl QuizRepository for MongoQuizRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Quiz>> {
        let quiz = self.collection.find_one(doc! { "id": id }).await?;
        Ok(quiz)
    }

    async fn list_by_user(&self, user_id: &str) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "user_id": user_id })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn list_public(&self) -> AppResult<Vec<Quiz>> {
        let quizzes = self
            .collection
            .find(doc! { "is_public": true })
            .sort(doc! { "created_at": -1 })
            .await?
            .try_collect()
            .await?;
        Ok(quizzes)
    }

    async fn count(&self) -> AppResult<u64> {
        let total = self.collection.count_documents(doc! {}).await?;
        Ok(total)
    }

    async fn create(&self, quiz: Quiz) -> AppResult<Quiz> {
        self.collection.insert_one(&quiz).await?;
        Ok(quiz)
    }

    async fn replace(&self, quiz: &Quiz) -> AppResult<bool> {
        let result = self
            .collection
            .replace_one(doc! { "id": &quiz.id }, quiz)
            .await?;
        Ok(result.matched_count > 0)
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;
        Ok(result.deleted_count > 0)
    }

    async fn touch_last_used(&self, id: &str, at: DateTime<Utc>) -> AppResult<()> {
        // Same representation serde gives the field on insert.
        let at = bson::to_bson(&at)?;
        self.collection
            .update_one(doc! { "id": id }, doc! { "$set": { "last_used_at": at } })
            .await?;
        Ok(())
    }

    async fn health_check(&self) -> AppResult<()> {
        self.db.ping().await
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for quizzes collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        let owner_index = IndexModel::builder()
            .keys(doc! { "user_id": 1, "created_at": -1 })
            .options(IndexOptions::builder().name("owner_created".to_string()).build())
            .build();

        let public_index = IndexModel::builder()
            .keys(doc! { "is_public": 1 })
            .options(IndexOptions::builder().name("is_public".to_string()).build())
            .build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(owner_index).await?;
        self.collection.create_index(public_index).await?;

        log::info!("Successfully created indexes for quizzes collection");
        Ok(())
    }
}
