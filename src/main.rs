use actix_web::{web, App, HttpServer};
use portal_auth::auth::token::TokenService;
use portal_auth::config::{EnvConfig, CONFIG};
use portal_auth::db::postgres_service::PostgresService;
use portal_auth::routes::configure_routes;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    let config = EnvConfig::from_env();
    let addr = format!("0.0.0.0:{}", config.port);

    let postgres_service = Arc::new(
        PostgresService::new(&config.db_url)
            .await
            .expect("Failed to initialize PostgresService"),
    );

    let tokens = web::Data::new(TokenService::from_config(&config.jwt));
    CONFIG.set(config).expect("Config already initialized");

    println!("Starting server on {}", addr);

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(Arc::clone(&postgres_service)))
            .app_data(tokens.clone())
            .configure(configure_routes)
    })
    .bind(addr)?
    .run()
    .await
}
