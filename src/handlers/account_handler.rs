use actix_web::{post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::request::{ForgotPasswordRequest, LoginRequest, RegisterRequest},
};

#[post("/api/account/register")]
pub async fn register(
    state: web::Data<AppState>,
    request: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.account_service.register(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/account/login")]
pub async fn login(
    state: web::Data<AppState>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state.account_service.login(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/api/account/forgot-password")]
pub async fn forgot_password(
    state: web::Data<AppState>,
    request: web::Json<ForgotPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    let response = state
        .account_service
        .forgot_password(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(response))
}
