use anyhow::Context;
use primal_fit::api::routes::{create_routes, AppDependencies};
use primal_fit::config::{run_migrations, AppConfig, CompletionConfig, DatabaseConfig, ImageConfig};
use primal_fit::services::{ChatSessionStore, CompletionClient, ImageResolver};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let app_config = AppConfig::from_env()?;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&app_config.log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let db_config = DatabaseConfig::from_env()?;
    let completion_config = CompletionConfig::from_env()?;
    let image_config = ImageConfig::from_env(&app_config.static_root)?;

    if app_config.is_production() && app_config.uses_default_jwt_secret() {
        warn!("JWT_SECRET is not set; tokens are signed with the built-in development secret");
    }

    if completion_config.api_key.is_none() {
        warn!("GROQ_API_KEY is not set; plan generation and chat will fail");
    }

    let db = db_config
        .create_pool()
        .await
        .context("Failed to connect to the database")?;
    run_migrations(&db).await.context("Failed to run migrations")?;

    tokio::fs::create_dir_all(image_config.generated_dir())
        .await
        .with_context(|| format!("Failed to create {}", image_config.generated_dir().display()))?;

    let deps = AppDependencies {
        db,
        completion: CompletionClient::new(completion_config)?,
        images: ImageResolver::from_config(image_config)?,
        chat_sessions: ChatSessionStore::new(),
    };

    let app = create_routes(&app_config, deps);

    let address = app_config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Primal Fit server starting on http://{} ({})", address, app_config.environment);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}
