use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        CategoryRepository, MongoCategoryRepository, MongoQuestionRepository, QuestionRepository,
    },
    services::{CategoryService, QuestionService, QuizService},
};

#[derive(Clone)]
pub struct AppState {
    pub category_service: Arc<CategoryService>,
    pub question_service: Arc<QuestionService>,
    pub quiz_service: Arc<QuizService>,
    pub config: Arc<Config>,
    /// Absent when the repositories are not backed by MongoDB.
    pub database: Option<Database>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let question_repository = Arc::new(MongoQuestionRepository::new(&db));
        question_repository.ensure_indexes().await?;

        let category_repository = Arc::new(MongoCategoryRepository::new(&db));
        category_repository.ensure_indexes().await?;

        let mut state = Self::from_repositories(config, question_repository, category_repository);
        state.database = Some(db);
        Ok(state)
    }

    pub fn from_repositories(
        config: Config,
        questions: Arc<dyn QuestionRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        let category_service = Arc::new(CategoryService::new(categories.clone()));
        let question_service = Arc::new(QuestionService::new(questions, categories));
        let quiz_service = Arc::new(QuizService::new(question_service.clone()));

        Self {
            category_service,
            question_service,
            quiz_service,
            config: Arc::new(config),
            database: None,
        }
    }
}
