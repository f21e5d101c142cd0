//! # buffbuddies-pay
//!
//! Payment order proxy in front of Cashfree PG.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export APP_ID=...
//! export SECRET_KEY=...
//! export CASHFREE_ENV=sandbox
//!
//! # Run the server
//! buffbuddies-pay
//! ```

use pay_api::{routes, AppConfig, AppState, LogFormat};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env()?;

    // Initialize logging
    init_tracing(config.log_format);

    // Print banner
    if config.log_format == LogFormat::Pretty {
        print_banner();
    }

    // Initialize application state
    let state = AppState::new(config)?;

    let addr = state.config.socket_addr()?;
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Payment provider: {}", state.adapter.provider_name());

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("Buff Buddies pay starting on http://{}", addr);

    if !is_prod {
        info!("Health: GET http://{}/", addr);
        info!("Create order: POST http://{}/", addr);
        info!("Verify order: POST http://{}/verify/{{order_id}}", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Shut down cleanly");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::builder()
        .with_default_directive(Level::INFO.into())
        .from_env_lossy();

    match format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init(),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

fn print_banner() {
    println!(
        r#"
  Buff Buddies Pay
  ━━━━━━━━━━━━━━━━━━━━━━━
  Cashfree order proxy
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
