use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{http::header, middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use trivia_server::{
    app_state::AppState,
    auth::{AuthGuard, RemoteJwks, TokenVerifier},
    config::Config,
    handlers,
    middleware::RequestIdMiddleware,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = Config::from_env();
    let bind_address = (config.web_server_host.clone(), config.web_server_port);

    let keys = RemoteJwks::from_config(&config).map_err(std::io::Error::other)?;
    let guard = AuthGuard::new(TokenVerifier::from_config(Arc::new(keys), &config));

    let state = AppState::new(config)
        .await
        .map_err(std::io::Error::other)?;

    log::info!(
        "Starting trivia server on http://{}:{}",
        bind_address.0,
        bind_address.1
    );

    let state = web::Data::new(state);
    let guard = web::Data::new(guard);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION])
            .max_age(3600);

        App::new()
            .app_data(state.clone())
            .app_data(guard.clone())
            .wrap(RequestIdMiddleware)
            .wrap(Logger::default())
            .wrap(cors)
            .configure(handlers::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
