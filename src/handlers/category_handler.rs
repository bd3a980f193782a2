use actix_web::{web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        request::PageParams,
        response::{CategoriesResponse, CategoryQuestionsResponse},
    },
};

pub async fn list_categories(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let categories = state.category_service.category_map().await?;

    Ok(HttpResponse::Ok().json(CategoriesResponse {
        success: true,
        total_categories: categories.len(),
        categories,
    }))
}

pub async fn list_category_questions(
    _auth: AuthenticatedUser,
    state: web::Data<AppState>,
    category_id: web::Path<i64>,
    query: web::Query<PageParams>,
) -> Result<HttpResponse, AppError> {
    let category_id = category_id.into_inner();
    let page = query.page();
    let result = state
        .question_service
        .category_page(category_id, page)
        .await?;

    Ok(HttpResponse::Ok().json(CategoryQuestionsResponse {
        success: true,
        questions: result.questions,
        page,
        total_questions: result.total,
        current_category: category_id,
    }))
}
