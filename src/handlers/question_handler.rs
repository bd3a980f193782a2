use actix_web::{web, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::{PageParams, QuestionPayload, SearchRequest},
        response::{
            DeleteQuestionResponse, QuestionIdResponse, QuestionPageResponse, SearchResponse,
            NO_CURRENT_CATEGORY,
        },
    },
};

pub async fn list_questions(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let page = query.page();
    let result = state.question_service.list_page(page).await?;
    let categories = state.category_service.category_map().await?;

    Ok(HttpResponse::Ok().json(QuestionPageResponse {
        success: true,
        questions: result.questions,
        page,
        total_questions: result.total,
        categories,
        current_category: NO_CURRENT_CATEGORY,
    }))
}

pub async fn delete_question(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    question_id: web::Path<i64>,
) -> Result<HttpResponse, AppError> {
    let deleted_id = state
        .question_service
        .delete_question(question_id.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(DeleteQuestionResponse {
        success: true,
        deleted_id,
    }))
}

pub async fn create_question(
    auth: AuthenticatedUser,
    state: web::Data<AppState>,
    payload: web::Json<QuestionPayload>,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .create_question(payload.into_inner())
        .await?;
    log::debug!("Question {} created by {}", question.id, auth.0.sub);

    Ok(HttpResponse::Ok().json(QuestionIdResponse {
        success: true,
        question_id: question.id,
    }))
}

pub async fn update_question(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    question_id: web::Path<i64>,
    payload: web::Json<QuestionPayload>,
) -> Result<HttpResponse, AppError> {
    let question = state
        .question_service
        .update_question(question_id.into_inner(), payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(QuestionIdResponse {
        success: true,
        question_id: question.id,
    }))
}

pub async fn search_questions(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    request: web::Json<SearchRequest>,
) -> Result<HttpResponse, AppError> {
    request.validate()?;

    let questions = state.question_service.search(&request.search_term).await?;

    Ok(HttpResponse::Ok().json(SearchResponse {
        success: true,
        total_questions: questions.len(),
        questions,
        current_category: NO_CURRENT_CATEGORY,
    }))
}
