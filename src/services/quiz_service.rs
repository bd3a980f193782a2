use std::sync::Arc;

use rand::seq::SliceRandom;

use crate::{
    errors::AppResult,
    models::{domain::Question, dto::request::QuizRequest},
    services::question_service::QuestionService,
};

pub struct QuizService {
    questions: Arc<QuestionService>,
}

impl QuizService {
    pub fn new(questions: Arc<QuestionService>) -> Self {
        Self { questions }
    }

    /// Picks a random question the player has not seen yet, or `None` when
    /// the pool is exhausted. Without a category the whole store is scanned.
    pub async fn next_question(&self, request: &QuizRequest) -> AppResult<Option<Question>> {
        let pool = match request.category_id() {
            Some(category_id) => self.questions.questions_in_category(category_id).await?,
            None => self.questions.all_questions().await?,
        };

        Ok(pick_unseen(pool, &request.previous_questions))
    }
}

fn pick_unseen(pool: Vec<Question>, previous: &[i64]) -> Option<Question> {
    let candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    candidates.choose(&mut rand::thread_rng()).cloned()
}
