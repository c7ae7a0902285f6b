use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitals_ai::{ChatClient, ChatConfig};
use vitals_api::config::ServerConfig;
use vitals_api::router::build_app_router;
use vitals_api::state::AppState;
use vitals_mail::{EmailConfig, Mailer};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vitals_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let service_database_url =
        std::env::var("SERVICE_DATABASE_URL").unwrap_or_else(|_| database_url.clone());

    let pool = vitals_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    let service_pool = vitals_db::create_pool(&service_database_url)
        .await
        .expect("Failed to connect to service database");
    tracing::info!("Database connection pools created");

    vitals_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    vitals_db::run_migrations(&service_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Integrations ---
    let http_client = reqwest::Client::new();

    let chat = ChatConfig::from_env().map(|cfg| {
        tracing::info!(model = %cfg.model, "AI chat enabled");
        Arc::new(ChatClient::with_client(http_client.clone(), cfg))
    });
    if chat.is_none() {
        tracing::warn!("CLOUDFLARE_ACCOUNT_ID/CLOUDFLARE_API_TOKEN not set, AI chat disabled");
    }

    let mailer = match EmailConfig::from_env() {
        Some(cfg) => {
            let host = cfg.smtp_host.clone();
            let mailer = Mailer::new(cfg).expect("Invalid SMTP configuration");
            tracing::info!(%host, "Email delivery enabled");
            Some(Arc::new(mailer))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, email delivery disabled");
            None
        }
    };

    // --- App state ---
    let state = AppState {
        pool,
        service_pool,
        config: Arc::new(config.clone()),
        chat,
        mailer,
    };

    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Wait for SIGINT (Ctrl-C) or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
