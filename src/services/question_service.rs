use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::Question, dto::request::QuestionPayload},
    repositories::{CategoryRepository, QuestionRepository},
    services::{category_service::CategoryService, pagination::paginate},
};

/// One page of questions plus the size of the set it was cut from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionPage {
    pub questions: Vec<Question>,
    pub total: usize,
}

pub struct QuestionService {
    questions: Arc<dyn QuestionRepository>,
    categories: CategoryService,
}

impl QuestionService {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            questions,
            categories: CategoryService::new(categories),
        }
    }

    /// An empty page is an error here, including when there are no questions at all.
    pub async fn list_page(&self, page: i64) -> AppResult<QuestionPage> {
        let all = self.questions.find_all().await?;
        let questions = paginate(&all, page);

        if questions.is_empty() {
            return Err(AppError::NotFound(format!("Page {} of questions is empty", page)));
        }

        Ok(QuestionPage {
            questions,
            total: all.len(),
        })
    }

    pub async fn all_questions(&self) -> AppResult<Vec<Question>> {
        self.questions.find_all().await
    }

    pub async fn delete_question(&self, id: i64) -> AppResult<i64> {
        if self.questions.find_by_id(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Question with id '{}' not found", id)));
        }

        self.questions.delete(id).await?;
        log::info!("Deleted question {}", id);
        Ok(id)
    }

    // TODO: reject categories that do not exist once clients stop relying on free-form ids.
    pub async fn create_question(&self, payload: QuestionPayload) -> AppResult<Question> {
        let new_question = payload.into_new_question()?;
        let question = self.questions.insert(new_question).await?;

        log::info!("Created question {}", question.id);
        Ok(question)
    }

    /// Overwrites every field present in `payload` and leaves the rest untouched.
    pub async fn update_question(&self, id: i64, payload: QuestionPayload) -> AppResult<Question> {
        if payload.is_empty() {
            return Err(AppError::Unprocessable(
                "At least one field must be supplied".to_string(),
            ));
        }
        payload.validate()?;

        let mut question = self
            .questions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))?;

        if let Some(text) = payload.question {
            question.question = text;
        }
        if let Some(answer) = payload.answer {
            question.answer = answer;
        }
        if let Some(category) = payload.category {
            question.category = category;
        }
        if let Some(difficulty) = payload.difficulty {
            question.difficulty = difficulty;
        }

        self.questions.update(question).await
    }

    pub async fn search(&self, term: &str) -> AppResult<Vec<Question>> {
        if term.is_empty() {
            return Err(AppError::Unprocessable("Search term is required".to_string()));
        }
        self.questions.search(term).await
    }

    /// Every question filed under `category_id`; the category itself must exist.
    pub async fn questions_in_category(&self, category_id: i64) -> AppResult<Vec<Question>> {
        self.categories.get_category(category_id).await?;

        self.questions
            .find_by_category(&category_id.to_string())
            .await
    }

    /// Unlike [`Self::list_page`], a page past the end is returned empty.
    pub async fn category_page(&self, category_id: i64, page: i64) -> AppResult<QuestionPage> {
        let all = self.questions_in_category(category_id).await?;

        Ok(QuestionPage {
            questions: paginate(&all, page),
            total: all.len(),
        })
    }
}
