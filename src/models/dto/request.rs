use serde::Deserialize;
use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{domain::NewQuestion, dto::deserializers},
};

/// Body of `POST /questions` and `PATCH /questions/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct QuestionPayload {
    #[serde(default, deserialize_with = "deserializers::non_empty_string")]
    pub question: Option<String>,

    #[serde(default, deserialize_with = "deserializers::non_empty_string")]
    pub answer: Option<String>,

    #[serde(default, deserialize_with = "deserializers::string_or_number")]
    pub category: Option<String>,

    #[serde(default, deserialize_with = "deserializers::optional_i32")]
    #[validate(range(min = 1))]
    pub difficulty: Option<i32>,
}

impl QuestionPayload {
    pub fn is_empty(&self) -> bool {
        self.question.is_none()
            && self.answer.is_none()
            && self.category.is_none()
            && self.difficulty.is_none()
    }

    /// All four fields are required to create a question.
    pub fn into_new_question(self) -> AppResult<NewQuestion> {
        self.validate()?;

        let (Some(question), Some(answer), Some(category), Some(difficulty)) =
            (self.question, self.answer, self.category, self.difficulty)
        else {
            return Err(AppError::Unprocessable(
                "question, answer, category and difficulty are required".to_string(),
            ));
        };

        let new_question = NewQuestion {
            question,
            answer,
            category,
            difficulty,
        };
        new_question.validate()?;
        Ok(new_question)
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchRequest {
    #[serde(rename = "searchTerm", default)]
    #[validate(length(min = 1))]
    pub search_term: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizCategory {
    #[serde(default, deserialize_with = "deserializers::optional_int")]
    pub id: Option<i64>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizRequest {
    #[serde(default)]
    pub previous_questions: Vec<i64>,
    #[serde(default)]
    pub quiz_category: Option<QuizCategory>,
}

impl QuizRequest {
    /// `None` means "all categories" (the client sends id 0 for that).
    pub fn category_id(&self) -> Option<i64> {
        self.quiz_category.as_ref().and_then(|c| c.id)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
}

impl PageParams {
    /// 1-indexed page number; a missing or non-numeric value means page 1.
    pub fn page(&self) -> i64 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(1)
    }
}
