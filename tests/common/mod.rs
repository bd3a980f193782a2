#![allow(dead_code, unused_macros)]

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use chrono::Utc;
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::json;
use tokio::sync::RwLock;

use trivia_server::{
    app_state::AppState,
    auth::{AuthGuard, InMemoryKeySource, TokenVerifier},
    config::Config,
    errors::{AppError, AppResult},
    models::domain::{Category, NewQuestion, Question},
    repositories::{CategoryRepository, QuestionRepository},
};

pub const PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/rsa_private.pem");
pub const OTHER_PRIVATE_KEY: &[u8] = include_bytes!("../fixtures/rsa_other_private.pem");
pub const PUBLIC_KEY: &[u8] = include_bytes!("../fixtures/rsa_public.pem");
pub const KID: &str = "trivia-test-key";
pub const AUTH0_DOMAIN: &str = "trivia-test.auth0.com";
pub const AUDIENCE: &str = "trivia-api";

pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<BTreeMap<i64, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self {
            questions: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    pub async fn seed(&self, questions: Vec<Question>) {
        let mut store = self.questions.write().await;
        for question in questions {
            store.insert(question.id, question);
        }
    }

    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_all(&self) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Question>> {
        let questions = self.questions.read().await;
        Ok(questions.get(&id).cloned())
    }

    async fn find_by_category(&self, category: &str) -> AppResult<Vec<Question>> {
        let questions = self.questions.read().await;
        Ok(questions
            .values()
            .filter(|q| q.category == category)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str) -> AppResult<Vec<Question>> {
        let term = term.to_lowercase();
        let questions = self.questions.read().await;
        Ok(questions
            .values()
            .filter(|q| q.question.to_lowercase().contains(&term))
            .cloned()
            .collect())
    }

    async fn insert(&self, question: NewQuestion) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let id = questions.keys().next_back().copied().unwrap_or(0) + 1;
        let question = question.with_id(id);
        questions.insert(id, question.clone());
        Ok(question)
    }

    async fn update(&self, question: Question) -> AppResult<Question> {
        let mut questions = self.questions.write().await;
        let Some(existing) = questions.get_mut(&question.id) else {
            return Err(AppError::NotFound(format!(
                "Question with id '{}' not found",
                question.id
            )));
        };
        *existing = question.clone();
        Ok(question)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut questions = self.questions.write().await;
        questions
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| AppError::NotFound(format!("Question with id '{}' not found", id)))
    }
}

pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<BTreeMap<i64, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            categories: Arc::new(RwLock::new(
                categories.into_iter().map(|c| (c.id, c)).collect(),
            )),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn find_all(&self) -> AppResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }
}

pub fn categories() -> Vec<Category> {
    ["Science", "Art", "Geography", "History", "Entertainment", "Sports"]
        .iter()
        .enumerate()
        .map(|(i, kind)| Category::new(i as i64 + 1, kind))
        .collect()
}

fn question(id: i64, text: &str, answer: &str, category: i64, difficulty: i32) -> Question {
    Question {
        id,
        question: text.to_string(),
        answer: answer.to_string(),
        category: category.to_string(),
        difficulty,
    }
}

/// Seventeen questions spread over the six categories.
pub fn questions() -> Vec<Question> {
    vec![
        question(1, "Whose autobiography is entitled 'I Know Why the Caged Bird Sings'?", "Maya Angelou", 4, 2),
        question(2, "What boxer's original name is Cassius Clay?", "Muhammad Ali", 4, 1),
        question(3, "What movie earned Tom Hanks his third straight Oscar nomination, in 1996?", "Apollo 13", 5, 4),
        question(4, "Which is the only team to play in every soccer World Cup tournament?", "Brazil", 6, 3),
        question(5, "Which country won the first ever soccer World Cup in 1930?", "Uruguay", 6, 4),
        question(6, "What is the largest lake in Africa?", "Lake Victoria", 3, 2),
        question(7, "In which royal palace would you find the Hall of Mirrors?", "The Palace of Versailles", 3, 3),
        question(8, "The Taj Mahal is located in which Indian city?", "Agra", 3, 2),
        question(9, "Which Dutch graphic artist, initials M C, was a creator of optical illusions?", "Escher", 2, 1),
        question(10, "La Giaconda is better known as what?", "Mona Lisa", 2, 3),
        question(11, "How many paintings did Van Gogh sell in his lifetime?", "One", 2, 4),
        question(12, "What is the heaviest organ in the human body?", "The Liver", 1, 4),
        question(13, "Who discovered penicillin?", "Alexander Fleming", 1, 3),
        question(14, "Hematology is a branch of medicine involving the study of what?", "Blood", 1, 4),
        question(15, "Which dung beetle was worshipped by the ancient Egyptians?", "Scarab", 4, 4),
        question(16, "What was the title of the 1990 fantasy directed by Tim Burton about a young man with multi-bladed appendages?", "Edward Scissorhands", 5, 3),
        question(17, "Who invented Peanut Butter?", "George Washington Carver", 4, 2),
    ]
}

pub fn config() -> Config {
    Config {
        database_url: SecretString::from("mongodb://localhost:27017".to_string()),
        database_name: "trivia-test".to_string(),
        auth0_domain: AUTH0_DOMAIN.to_string(),
        api_audience: AUDIENCE.to_string(),
        client_id: "test-client".to_string(),
        callback_url: "http://127.0.0.1:8080/".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        jwks_cache_ttl_secs: 600,
        jwks_fetch_timeout_secs: 5,
        jwks_fetch_retries: 0,
        jwt_leeway_secs: 0,
    }
}

/// Application state over a seeded in-memory store. The question repository
/// is returned as well so tests can inspect what was persisted.
pub async fn seeded_state() -> (AppState, Arc<InMemoryQuestionRepository>) {
    let questions = Arc::new(InMemoryQuestionRepository::new());
    questions.seed(self::questions()).await;
    let categories = Arc::new(InMemoryCategoryRepository::new(self::categories()));

    let state = AppState::from_repositories(config(), questions.clone(), categories);
    (state, questions)
}

pub fn guard() -> AuthGuard {
    let keys = InMemoryKeySource::new()
        .with_rsa_pem(KID, PUBLIC_KEY)
        .expect("fixture public key should parse");
    AuthGuard::new(TokenVerifier::from_config(Arc::new(keys), &config()))
}

pub fn claims(permissions: &[&str]) -> serde_json::Value {
    json!({
        "sub": "auth0|integration",
        "iss": format!("https://{}/", AUTH0_DOMAIN),
        "aud": AUDIENCE,
        "iat": Utc::now().timestamp(),
        "exp": Utc::now().timestamp() + 3600,
        "permissions": permissions,
    })
}

pub fn sign(claims: &serde_json::Value, key: &[u8], kid: &str) -> String {
    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(kid.to_string());
    let key = EncodingKey::from_rsa_pem(key).expect("fixture private key should parse");
    encode(&header, claims, &key).expect("token should encode")
}

/// `Authorization` header value for a token carrying `permissions`.
pub fn bearer(permissions: &[&str]) -> String {
    format!("Bearer {}", sign(&claims(permissions), PRIVATE_KEY, KID))
}

/// Initializes the full application around `$state` with the fixture key set.
macro_rules! init_app {
    ($state:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($state))
                .app_data(actix_web::web::Data::new(common::guard()))
                .wrap(trivia_server::middleware::RequestIdMiddleware)
                .configure(trivia_server::handlers::configure),
        )
        .await
    };
}
