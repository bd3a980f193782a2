use actix_web::{web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::response::IndexResponse};

/// Public landing route pointing operators at the login page for role tokens.
pub async fn index(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(IndexResponse {
        message: "Log in at the following URL to obtain a JWT for your role".to_string(),
        url: state.config.login_url(),
    })
}

pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    if let Some(db) = &state.database {
        if let Err(err) = db.health_check().await {
            log::error!("Health check failed: {}", err);
            return HttpResponse::ServiceUnavailable().json(serde_json::json!({
                "status": "unhealthy",
                "version": env!("CARGO_PKG_VERSION")
            }));
        }
    }

    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

pub async fn not_found() -> Result<HttpResponse, AppError> {
    Err(AppError::NotFound("No route matches the request path".to_string()))
}

pub async fn method_not_allowed() -> Result<HttpResponse, AppError> {
    Err(AppError::MethodNotAllowed)
}
