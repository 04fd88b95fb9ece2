pub mod account_handler;
pub mod graphql_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod take_quiz_handler;

use actix_web::web;

use crate::{app_state::AppState, errors::AppError, graphql::create_schema};

/// Registers shared state and every route on an actix app.
///
/// `/api/quiz/public` is registered ahead of `/api/quiz/{id}` so the literal
/// segment wins.
pub fn configure_app(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        let expose_graphiql = !state.config.is_production();
        let schema = create_schema(state.clone());

        cfg.app_data(web::Data::new(state))
            .app_data(web::Data::new(schema))
            .app_data(json_config())
            .service(health_handler::health_check)
            .service(health_handler::health_check_live)
            .service(health_handler::health_check_ready)
            .service(account_handler::register)
            .service(account_handler::login)
            .service(account_handler::forgot_password)
            .service(quiz_handler::list_my_quizzes)
            .service(quiz_handler::list_public_quizzes)
            .service(quiz_handler::get_public_quiz)
            .service(quiz_handler::get_quiz)
            .service(quiz_handler::create_quiz)
            .service(quiz_handler::update_quiz)
            .service(quiz_handler::delete_quiz)
            .service(quiz_handler::duplicate_quiz)
            .service(take_quiz_handler::get_quiz_for_taking)
            .service(take_quiz_handler::submit_quiz)
            .route("/graphql", web::post().to(graphql_handler::graphql));

        if expose_graphiql {
            cfg.route("/graphiql", web::get().to(graphql_handler::graphiql));
        }
    }
}

fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::warn!("Rejected request body: {}", err);
        AppError::ValidationError(format!("Invalid request body: {}", err)).into()
    })
}
