pub mod category_service;
pub mod pagination;
pub mod question_service;
pub mod quiz_service;

pub use category_service::CategoryService;
pub use question_service::{QuestionPage, QuestionService};
pub use quiz_service::QuizService;
