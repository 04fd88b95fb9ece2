use actix_web::{get, post, web, HttpResponse};

use crate::{app_state::AppState, errors::AppError, models::dto::request::SubmitQuizRequest};

#[get("/api/takequiz/{id}")]
pub async fn get_quiz_for_taking(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_for_taking(&id).await?;
    Ok(HttpResponse::Ok().json(quiz))
}

#[post("/api/takequiz/submit")]
pub async fn submit_quiz(
    state: web::Data<AppState>,
    request: web::Json<SubmitQuizRequest>,
) -> Result<HttpResponse, AppError> {
    let result = state.quiz_service.submit(request.into_inner()).await?;
    Ok(HttpResponse::Ok().json(result))
}
