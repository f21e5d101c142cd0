//! # Cashfree Configuration
//!
//! Where and how to reach the Cashfree PG API. Credentials are not part of
//! this config; they are resolved per request by the adapter.

use pay_core::{PaymentError, PaymentResult};
use std::env;
use std::time::Duration;

pub const SANDBOX_BASE_URL: &str = "https://sandbox.cashfree.com";
pub const PRODUCTION_BASE_URL: &str = "https://api.cashfree.com";
pub const DEFAULT_API_VERSION: &str = "2023-08-01";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Cashfree account environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashfreeEnvironment {
    Sandbox,
    Production,
}

impl CashfreeEnvironment {
    pub fn base_url(&self) -> &'static str {
        match self {
            CashfreeEnvironment::Sandbox => SANDBOX_BASE_URL,
            CashfreeEnvironment::Production => PRODUCTION_BASE_URL,
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "sandbox" | "test" => Some(CashfreeEnvironment::Sandbox),
            "production" | "prod" | "live" => Some(CashfreeEnvironment::Production),
            _ => None,
        }
    }
}

/// Cashfree API configuration
#[derive(Debug, Clone)]
pub struct CashfreeConfig {
    pub environment: CashfreeEnvironment,

    /// API base URL, without the `/pg` prefix (overridable for testing)
    pub api_base_url: String,

    /// Sent as `x-api-version`
    pub api_version: String,

    /// Per-request timeout for outbound calls
    pub timeout: Duration,
}

impl CashfreeConfig {
    /// Load configuration from environment variables.
    ///
    /// Optional env vars:
    /// - `CASHFREE_ENV` (`sandbox` or `production`, default `sandbox`)
    /// - `CASHFREE_BASE_URL`
    /// - `CASHFREE_API_VERSION`
    /// - `GATEWAY_TIMEOUT_SECS`
    pub fn from_env() -> PaymentResult<Self> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> PaymentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("CASHFREE_ENV") {
            None => CashfreeEnvironment::Sandbox,
            Some(value) => CashfreeEnvironment::parse(&value).ok_or_else(|| {
                PaymentError::Configuration(format!(
                    "CASHFREE_ENV must be sandbox or production, got {value:?}"
                ))
            })?,
        };

        let timeout_secs = match lookup("GATEWAY_TIMEOUT_SECS") {
            None => DEFAULT_TIMEOUT_SECS,
            Some(value) => value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| {
                    PaymentError::Configuration(format!(
                        "GATEWAY_TIMEOUT_SECS must be a positive integer, got {value:?}"
                    ))
                })?,
        };

        let mut config = Self::new(environment).with_timeout(Duration::from_secs(timeout_secs));

        if let Some(url) = lookup("CASHFREE_BASE_URL").filter(|v| !v.is_empty()) {
            config = config.with_api_base_url(url);
        }
        if let Some(version) = lookup("CASHFREE_API_VERSION").filter(|v| !v.is_empty()) {
            config.api_version = version;
        }

        Ok(config)
    }

    /// Create config with defaults for an environment
    pub fn new(environment: CashfreeEnvironment) -> Self {
        Self {
            environment,
            api_base_url: environment.base_url().to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn sandbox() -> Self {
        Self::new(CashfreeEnvironment::Sandbox)
    }

    pub fn production() -> Self {
        Self::new(CashfreeEnvironment::Production)
    }

    pub fn is_production(&self) -> bool {
        self.environment == CashfreeEnvironment::Production
    }

    /// `{base}/pg/orders`
    pub fn orders_url(&self) -> String {
        format!("{}/pg/orders", self.api_base_url)
    }

    /// Builder: set custom API base URL (for testing)
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: set the outbound request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for CashfreeConfig {
    fn default() -> Self {
        Self::sandbox()
    }
}
