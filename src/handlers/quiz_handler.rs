use actix_web::{delete, get, post, put, web, HttpResponse};

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::Quiz,
        dto::{
            request::{CreateQuizRequest, UpdateQuizRequest},
            response::QuizDto,
        },
    },
};

fn to_dtos(quizzes: Vec<Quiz>) -> Vec<QuizDto> {
    quizzes.into_iter().map(QuizDto::from).collect()
}

#[get("/api/quiz")]
pub async fn list_my_quizzes(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_for_user(auth.user_id()).await?;
    Ok(HttpResponse::Ok().json(to_dtos(quizzes)))
}

#[get("/api/quiz/public")]
pub async fn list_public_quizzes(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let quizzes = state.quiz_service.list_public().await?;
    Ok(HttpResponse::Ok().json(to_dtos(quizzes)))
}

#[get("/api/quiz/public/{id}")]
pub async fn get_public_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_public(&id).await?;
    Ok(HttpResponse::Ok().json(QuizDto::from(quiz)))
}

#[get("/api/quiz/{id}")]
pub async fn get_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let quiz = state.quiz_service.get_quiz(&id).await?;
    Ok(HttpResponse::Ok().json(QuizDto::from(quiz)))
}

#[post("/api/quiz")]
pub async fn create_quiz(
    state: web::Data<AppState>,
    request: web::Json<CreateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let quiz = state
        .quiz_service
        .create_quiz(request.into_inner(), auth.user_id())
        .await?;
    Ok(HttpResponse::Created().json(QuizDto::from(quiz)))
}

#[put("/api/quiz/{id}")]
pub async fn update_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    request: web::Json<UpdateQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state
        .quiz_service
        .update_quiz(&id, request.into_inner(), auth.user_id())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[delete("/api/quiz/{id}")]
pub async fn delete_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.quiz_service.delete_quiz(&id, auth.user_id()).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[post("/api/quiz/{id}/duplicate")]
pub async fn duplicate_quiz(
    state: web::Data<AppState>,
    id: web::Path<String>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let copy = state
        .quiz_service
        .duplicate_quiz(&id, auth.user_id())
        .await?;
    Ok(HttpResponse::Created().json(QuizDto::from(copy)))
}
