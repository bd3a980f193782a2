pub mod category_handler;
pub mod index_handler;
pub mod question_handler;
pub mod quiz_handler;

use actix_web::{web, Resource};

use crate::{
    auth::{permissions, RequirePermission},
    errors::AppError,
};

pub use category_handler::{list_categories, list_category_questions};
pub use index_handler::{health_check, index, method_not_allowed, not_found};
pub use question_handler::{
    create_question, delete_question, list_questions, search_questions, update_question,
};
pub use quiz_handler::next_quiz_question;

/// Registers every route together with the permission it requires.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .app_data(web::PathConfig::default().error_handler(|err, _req| {
        AppError::NotFound(err.to_string()).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        AppError::BadRequest(err.to_string()).into()
    }))
    .service(resource("/").route(web::get().to(index)))
    .service(resource("/health").route(web::get().to(health_check)))
    .service(
        resource("/categories").route(
            web::get()
                .to(list_categories)
                .wrap(RequirePermission::new(permissions::GET_CATEGORIES)),
        ),
    )
    .service(
        resource("/categories/{category_id}/questions").route(
            web::get()
                .to(list_category_questions)
                .wrap(RequirePermission::new(permissions::GET_QUESTIONS)),
        ),
    )
    .service(
        resource("/questions")
            .route(
                web::get()
                    .to(list_questions)
                    .wrap(RequirePermission::new(permissions::GET_QUESTIONS)),
            )
            .route(
                web::post()
                    .to(create_question)
                    .wrap(RequirePermission::new(permissions::CREATE_QUESTIONS)),
            ),
    )
    .service(
        resource("/questions/search").route(
            web::post()
                .to(search_questions)
                .wrap(RequirePermission::new(permissions::GET_QUESTIONS)),
        ),
    )
    .service(
        resource("/questions/{question_id}")
            .route(
                web::delete()
                    .to(delete_question)
                    .wrap(RequirePermission::new(permissions::DELETE_QUESTIONS)),
            )
            .route(
                web::patch()
                    .to(update_question)
                    .wrap(RequirePermission::new(permissions::UPDATE_QUESTIONS)),
            ),
    )
    .service(
        resource("/quizzes").route(
            web::post()
                .to(next_quiz_question)
                .wrap(RequirePermission::new(permissions::GET_QUIZZES)),
        ),
    )
    .default_service(web::to(not_found));
}

fn resource(path: &str) -> Resource {
    web::resource(path).default_service(web::route().to(method_not_allowed))
}
