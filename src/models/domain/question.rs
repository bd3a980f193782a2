use serde::{Deserialize, Serialize};
use validator::Validate;

/// A persisted trivia question.
///
/// `category` holds the referenced category id in its string form; the
/// reference is not checked against the categories collection.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    pub difficulty: i32,
}

/// A question that has passed input validation but has no id yet.
#[derive(Clone, Debug, PartialEq, Eq, Validate)]
pub struct NewQuestion {
    #[validate(length(min = 1))]
    pub question: String,
    #[validate(length(min = 1))]
    pub answer: String,
    #[validate(length(min = 1))]
    pub category: String,
    #[validate(range(min = 1))]
    pub difficulty: i32,
}

impl NewQuestion {
    pub fn with_id(self, id: i64) -> Question {
        Question {
            id,
            question: self.question,
            answer: self.answer,
            category: self.category,
            difficulty: self.difficulty,
        }
    }
}
