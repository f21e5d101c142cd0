//! # Application State
//!
//! Shared state for the Axum application: the gateway adapter and the host
//! configuration.

use anyhow::Context;
use pay_cashfree::{CashfreeConfig, CashfreeGateway};
use pay_core::{AdapterConfig, GatewayAdapter};
use std::net::SocketAddr;
use std::sync::Arc;

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Load from environment variables (and `.env`, if present)
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match lookup("PORT") {
            Some(p) => p
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a port number, got {p:?}"))?,
            None => 8080,
        };

        let log_format = match lookup("LOG_FORMAT").as_deref().map(str::trim) {
            None | Some("") | Some("pretty") | Some("text") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => anyhow::bail!("LOG_FORMAT must be pretty or json, got {other:?}"),
        };

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port,
            environment: lookup("ENVIRONMENT").unwrap_or_else(|| "development".to_string()),
            log_format,
        })
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid bind address {}:{}", self.host, self.port))
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub adapter: Arc<GatewayAdapter>,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState backed by Cashfree
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let cashfree = CashfreeConfig::from_env().context("Invalid Cashfree configuration")?;
        let adapter_config = AdapterConfig::from_env().context("Invalid adapter configuration")?;

        if adapter_config.credentials.is_none() {
            tracing::warn!(
                body_fallback = adapter_config.allow_body_credentials,
                "APP_ID/SECRET_KEY not set; order requests will fail with a configuration error"
            );
        }
        if adapter_config.allow_body_credentials {
            tracing::warn!("Request-body credentials are enabled (ALLOW_BODY_CREDENTIALS)");
        }

        tracing::info!(
            "Cashfree: {} (api version {}, timeout {:?})",
            cashfree.api_base_url,
            cashfree.api_version,
            cashfree.timeout
        );

        let gateway = CashfreeGateway::new(cashfree)
            .context("Failed to initialize Cashfree client")?;

        Ok(Self::with_adapter(
            GatewayAdapter::new(Arc::new(gateway), adapter_config),
            config,
        ))
    }

    /// Create state around an existing adapter (tests, alternative gateways)
    pub fn with_adapter(adapter: GatewayAdapter, config: AppConfig) -> Self {
        Self {
            adapter: Arc::new(adapter),
            config,
        }
    }
}
