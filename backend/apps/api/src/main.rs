//! API Server Entry Point
//!
//! Loads configuration, connects and migrates the database, then serves the
//! JSON API under `/api/v1`, the admin panel and the static assets.
//! Startup errors use `anyhow`; request errors render through each crate's
//! error type.

mod config;

use std::net::SocketAddr;
use std::sync::Arc;

use account::application::BootstrapAdminUseCase;
use account::{AccountConfig, PgUserRepository, account_router};
use admin::{AdminConfig, admin_router};
use axum::{
    Router,
    http::{Method, header},
};
use campaign::{CampaignConfig, PgCampaignRepository, campaign_router};
use funding::{FundingConfig, PgTransactionRepository, SnapGateway, funding_router};
use platform::upload::UploadStore;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{DEFAULT_LOG_FILTER, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!(
        max_connections = config.database_max_connections,
        "Connected to database"
    );

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    // Shared configuration, built once
    let uploads = UploadStore::new(&config.images_dir, "images");
    let account_config = Arc::new(AccountConfig::new(
        config.token_secret.as_bytes(),
        config.token_ttl,
        uploads.clone(),
    ));
    let campaign_config = Arc::new(CampaignConfig::new(uploads));
    let funding_config = Arc::new(FundingConfig::new(config.payment_server_key.clone()));
    let admin_config = match &config.session_secret {
        Some(secret) => AdminConfig::new(secret.clone()),
        None => {
            tracing::warn!("SESSION_SECRET not set, admin sessions use a random key");
            AdminConfig::development()
        }
    };
    let admin_config = admin_config.secure_cookie(!cfg!(debug_assertions));

    let users = PgUserRepository::new(pool.clone());
    let campaigns = PgCampaignRepository::new(pool.clone());
    let transactions = PgTransactionRepository::new(pool.clone());
    let gateway = SnapGateway::new(
        config.payment_base_url.clone(),
        config.payment_server_key.clone(),
    )?;

    // Admin bootstrap
    if let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) {
        BootstrapAdminUseCase::new(Arc::new(users.clone()), account_config.clone())
            .execute(email, password.clone())
            .await
            .map_err(|e| anyhow::anyhow!("admin bootstrap failed: {e}"))?;
    }

    // CORS configuration
    let allowed_origins = config.cors_origins();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]));

    // Build router
    let shared_users = Arc::new(users.clone());
    let api = Router::new()
        .merge(account_router(users, account_config.clone()))
        .merge(campaign_router(
            campaigns.clone(),
            shared_users.clone(),
            campaign_config.clone(),
            account_config.clone(),
        ))
        .merge(funding_router(
            transactions.clone(),
            campaigns.clone(),
            shared_users.clone(),
            gateway,
            funding_config,
            account_config.clone(),
        ));

    let panel = admin_router(
        shared_users,
        campaigns,
        transactions,
        account_config,
        campaign_config,
        admin_config,
    );

    let assets = &config.web_assets_dir;
    let app = Router::new()
        .nest("/api/v1", api)
        .merge(panel)
        .nest_service("/images", ServeDir::new(&config.images_dir))
        .nest_service("/css", ServeDir::new(assets.join("css")))
        .nest_service("/js", ServeDir::new(assets.join("js")))
        .nest_service("/webfonts", ServeDir::new(assets.join("webfonts")))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        );

    // Start server
    tracing::info!("Listening on {}", config.bind_addr);

    let listener = TcpListener::bind(config.bind_addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
