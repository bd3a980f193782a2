use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{NewQuestion, Question},
};

const QUESTIONS_COLLECTION: &str = "questions";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// All questions ordered by id.
    async fn find_all(&self) -> AppResult<Vec<Question>>;
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>>;
    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Question>>;
    /// Case-insensitive substring match on the question text.
    async fn search(&self, term: &str) -> AppResult<Vec<Question>>;
    async fn insert(&self, question: NewQuestion) -> AppResult<Question>;
    async fn update(&self, question: Question) -> AppResult<Question>;
    async fn delete(&self, id: i64) -> AppResult<()>;
}

pub struct MongoQuestionRepository {
    db: Database,
    collection: Collection<Question>,
}

impl MongoQuestionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection(QUESTIONS_COLLECTION);
        Self {
            db: db.clone(),
            collection,
        }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for questions collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();
        let category_index = IndexModel::builder().keys(doc! { "category": 1 }).build();

        self.collection.create_index(id_index).await?;
        self.collection.create_index(category_index).await?;

        log::info!("Successfully created indexes for questions collection");
        Ok(())
    }

    async fn find_sorted(&self, filter: mongodb::bson::Document) -> AppResult<Vec<Question>> {
        let find_options = FindOptions::builder().sort(doc! { "id": 1 }).build();
        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let items: Vec<Question> = cursor.try_collect().await?;
        Ok(items)
    }
}

#[async_trait]
impl QuestionRepository for MongoQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<Question>> {
        self.find_sorted(doc! {}).await
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let question = self.collection.find_one(doc! { "id": id }).await?;
        Ok(question)
    }

    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Question>> {
        self.find_sorted(doc! { "category": category }).await
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Question>> {
        let pattern = regex::escape(term);
        self.find_sorted(doc! { "question": { "$regex": pattern, "$options": "i" } })
            .await
    }

    async fn insert(&self, question: NewQuestion) -> AppResult<Question> {
        let id = self.db.next_id(QUESTIONS_COLLECTION).await?;
        let question = question.with_id(id);
        self.collection.insert_one(&question).await?;
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let result = self
            .collection
            .replace_one(doc! { "id": question.id }, &question)
            .await?;

        if result.matched_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        }

        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let result = self.collection.delete_one(doc! { "id": id }).await?;

        if result.deleted_count == 0 {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                id
            )));
        }

        Ok(())
    }
}
