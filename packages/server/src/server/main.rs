// Main entry point for the member registry API server

use anyhow::{Context, Result};
use server_core::common::password;
use server_core::domains::auth::models::AppUser;
use server_core::server::build_app;
use server_core::Config;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Member Registry API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Run migrations
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Migrations complete");

    seed_admin(&pool, &config).await?;

    // Build application
    let app = build_app(pool, &config);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Seed or refresh the admin credential when ADMIN_PASSWORD is set.
async fn seed_admin(pool: &PgPool, config: &Config) -> Result<()> {
    let Some(admin_password) = &config.admin_password else {
        tracing::info!("ADMIN_PASSWORD not set, skipping admin seed");
        return Ok(());
    };

    let hash = password::hash(admin_password, config.bcrypt_cost)
        .context("Failed to hash admin password")?;
    AppUser::upsert(&config.admin_username, &hash, "ROLE_ADMIN", pool)
        .await
        .context("Failed to seed admin user")?;
    tracing::info!("Seeded admin user: {}", config.admin_username);

    Ok(())
}
