use std::collections::BTreeMap;

use serde::{Serialize, Serializer};

use crate::models::domain::Question;

/// Placeholder sent where the client expects a current category but none applies.
pub const NO_CURRENT_CATEGORY: &str = "Null";

/// Category id → display label.
pub type CategoryMap = BTreeMap<i64, String>;

#[derive(Debug, Serialize)]
pub struct CategoriesResponse {
    pub success: bool,
    pub categories: CategoryMap,
    pub total_categories: usize,
}

#[derive(Debug, Serialize)]
pub struct QuestionPageResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub page: i64,
    pub total_questions: usize,
    pub categories: CategoryMap,
    pub current_category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CategoryQuestionsResponse {
    pub success: bool,
    pub questions: Vec<Question>,
    pub page: i64,
    pub total_questions: usize,
    pub current_category: i64,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub success: bool,
    pub total_questions: usize,
    pub questions: Vec<Question>,
    pub current_category: &'static str,
}

#[derive(Debug, Serialize)]
pub struct DeleteQuestionResponse {
    pub success: bool,
    pub deleted_id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuestionIdResponse {
    pub success: bool,
    pub question_id: i64,
}

#[derive(Debug, Serialize)]
pub struct QuizResponse {
    pub success: bool,
    #[serde(serialize_with = "question_or_false")]
    pub question: Option<Question>,
}

// The quiz client checks `question === false` to detect the end of a round.
fn question_or_false<S>(question: &Option<Question>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match question {
        Some(question) => question.serialize(serializer),
        None => serializer.serialize_bool(false),
    }
}

#[derive(Debug, Serialize)]
pub struct IndexResponse {
    pub message: String,
    pub url: String,
}
