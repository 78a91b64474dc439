use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use freelance_backend::auth::middleware::JwtSettings;
use freelance_backend::cache::{CategoryCache, RedisCache};
use freelance_backend::{AppConfig, create_pool, handlers};
use migration::{Migrator, MigratorTrait};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = AppConfig::from_env().unwrap_or_else(|e| panic!("Invalid configuration: {e}"));

    let db = create_pool(&config.database_url)
        .await
        .expect("Failed to connect to database");
    if config.run_migrations {
        Migrator::up(&db, None)
            .await
            .expect("Failed to run migrations");
        tracing::info!("Migrations applied");
    }
    let db_data = web::Data::new(db);

    // Initialize Redis cache
    let redis_cache = RedisCache::new(&config.redis_url)
        .await
        .expect("Failed to connect to Redis");
    let redis_data = web::Data::new(Arc::new(redis_cache));
    tracing::info!("Connected to Redis");

    let jwt_settings = web::Data::new(JwtSettings {
        secret: config.jwt_secret.clone(),
        ttl_secs: config.jwt_ttl_secs,
    });
    let category_cache = web::Data::new(CategoryCache::new(Duration::from_secs(
        config.category_cache_ttl_secs,
    )));

    let bind_addr = config.bind_addr();
    let cors_origins = config.cors_origins.clone();
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);
        if cors_origins.is_empty() {
            cors = cors.allow_any_origin();
        } else {
            for origin in &cors_origins {
                cors = cors.allowed_origin(origin);
            }
        }

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(jwt_settings.clone())
            .app_data(category_cache.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
