use actix_cors::Cors;
use actix_web::{middleware::Logger, App, HttpServer};

use factify_server::{
    app_state::AppState,
    config::Config,
    handlers::configure_app,
    middleware::{RequestIdMiddleware, REQUEST_ID_HEADER},
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    if config.is_production() {
        config
            .validate_for_production()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()))?;
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;
    let graphiql_enabled = !config.is_production();

    let state = AppState::new(config).await.map_err(|e| {
        log::error!("Failed to initialise application state: {}", e);
        std::io::Error::other(e.to_string())
    })?;

    log::info!("Starting HTTP server on {}:{}", host, port);
    if graphiql_enabled {
        log::info!("GraphiQL playground: http://{}:{}/graphiql", host, port);
    }

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .expose_headers([REQUEST_ID_HEADER]),
            )
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .configure(configure_app(state.clone()))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
