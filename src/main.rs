use std::path::Path;

use actix_web::{App, HttpServer, middleware, web};

use user_segments::db::{establish_connection_pool, run_migrations};
use user_segments::models::config::ServerConfig;
use user_segments::repository::DieselRepository;
use user_segments::routes;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let server_config = ServerConfig::load(Path::new("config")).map_err(|e| {
        log::error!("Failed to load configuration: {e}");
        std::io::Error::other(e)
    })?;

    let pool = establish_connection_pool(&server_config.database_url, server_config.pool_size)
        .map_err(|e| {
            log::error!("Failed to open database {}: {e}", server_config.database_url);
            std::io::Error::other(e)
        })?;

    run_migrations(&pool).map_err(|e| {
        log::error!("Failed to run migrations: {e}");
        std::io::Error::other(e)
    })?;

    let repo = web::Data::new(DieselRepository::new(pool));
    let bind_address = (server_config.address.clone(), server_config.port);

    log::info!(
        "Starting server on {}:{}",
        server_config.address,
        server_config.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(repo.clone())
            .configure(routes::configure)
    })
    .bind(bind_address)?
    .run()
    .await
}
