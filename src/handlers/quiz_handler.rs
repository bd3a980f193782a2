use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{request::QuizRequest, response::QuizResponse},
};

pub async fn next_quiz_question(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    request: web::Json<QuizRequest>,
) -> Result<HttpResponse, AppError> {
    let question = state.quiz_service.next_question(&request).await?;

    Ok(HttpResponse::Ok().json(QuizResponse {
        success: true,
        question,
    }))
}
