//! # Adapter Configuration
//!
//! Credentials and order defaults, injected into the adapter at construction.
//! Everything here loads from an arbitrary key lookup so tests never have to
//! touch the process environment.

use crate::error::{PaymentError, PaymentResult};
use serde_json::Value;
use std::fmt;

/// Gateway API credentials
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Sent as `x-client-id`
    pub app_id: String,
    /// Sent as `x-client-secret`
    pub secret_key: String,
}

impl Credentials {
    pub fn new(app_id: impl Into<String>, secret_key: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            secret_key: secret_key.into(),
        }
    }

    /// Build from a lookup; `None` unless both values are present and non-empty.
    pub fn from_lookup<F>(lookup: F) -> Option<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_id = lookup("APP_ID").filter(|v| !v.is_empty())?;
        let secret_key = lookup("SECRET_KEY").filter(|v| !v.is_empty())?;
        Some(Self::new(app_id, secret_key))
    }

    /// Legacy fallback: `appId` / `secretKey` carried in the request body.
    pub fn from_body(body: &Value) -> Option<Self> {
        let field = |name: &str| {
            body.get(name)
                .and_then(Value::as_str)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        Some(Self::new(field("appId")?, field("secretKey")?))
    }

    /// First few characters of the app id, safe for logs
    pub fn app_id_prefix(&self) -> &str {
        let end = self
            .app_id
            .char_indices()
            .nth(6)
            .map(|(i, _)| i)
            .unwrap_or(self.app_id.len());
        &self.app_id[..end]
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("app_id", &format_args!("{}…", self.app_id_prefix()))
            .field("secret_key", &"[redacted]")
            .finish()
    }
}

/// Defaults applied when building a gateway order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderSettings {
    /// Host the gateway redirects back to after payment
    pub app_domain: String,
    /// Domain used for synthesized customer emails
    pub email_domain: String,
    /// Note attached when the caller sends none
    pub order_note: String,
}

impl OrderSettings {
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            app_domain: lookup("APP_DOMAIN").unwrap_or(defaults.app_domain),
            email_domain: lookup("CUSTOMER_EMAIL_DOMAIN").unwrap_or(defaults.email_domain),
            order_note: lookup("ORDER_NOTE").unwrap_or(defaults.order_note),
        }
    }

    pub fn return_url(&self, order_id: &str) -> String {
        format!(
            "https://{}/booking/success?order_id={}",
            self.app_domain, order_id
        )
    }
}

impl Default for OrderSettings {
    fn default() -> Self {
        Self {
            app_domain: "buffbuddies.com".to_string(),
            email_domain: "buffbuddies.com".to_string(),
            order_note: "Buff Buddies Booking".to_string(),
        }
    }
}

/// Everything the adapter needs besides the gateway client
#[derive(Debug, Clone, Default)]
pub struct AdapterConfig {
    /// Credentials from process configuration
    pub credentials: Option<Credentials>,
    /// Accept `appId`/`secretKey` from request bodies when `credentials` is unset.
    /// Legacy behaviour; off unless explicitly enabled.
    pub allow_body_credentials: bool,
    pub order: OrderSettings,
}

impl AdapterConfig {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials: Some(credentials),
            ..Self::default()
        }
    }

    /// Load from environment variables.
    ///
    /// Reads `APP_ID`, `SECRET_KEY`, `ALLOW_BODY_CREDENTIALS`, `APP_DOMAIN`,
    /// `CUSTOMER_EMAIL_DOMAIN` and `ORDER_NOTE`.
    pub fn from_env() -> PaymentResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> PaymentResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let allow_body_credentials = match lookup("ALLOW_BODY_CREDENTIALS").as_deref() {
            None | Some("") => false,
            Some(v) => parse_bool(v).ok_or_else(|| {
                PaymentError::Configuration(format!(
                    "ALLOW_BODY_CREDENTIALS must be true or false, got {v:?}"
                ))
            })?,
        };

        Ok(Self {
            credentials: Credentials::from_lookup(&lookup),
            allow_body_credentials,
            order: OrderSettings::from_lookup(&lookup),
        })
    }

    /// Builder: enable the legacy request-body credential fallback
    pub fn with_body_credentials(mut self, allow: bool) -> Self {
        self.allow_body_credentials = allow;
        self
    }

    /// Resolve credentials for one invocation.
    pub fn resolve_credentials(&self, body: Option<&Value>) -> PaymentResult<Credentials> {
        if let Some(credentials) = &self.credentials {
            return Ok(credentials.clone());
        }

        if self.allow_body_credentials {
            if let Some(credentials) = body.and_then(Credentials::from_body) {
                return Ok(credentials);
            }
        }

        Err(PaymentError::Configuration(
            "Payment gateway credentials are not configured".to_string(),
        ))
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_with_credentials() {
        let config = AdapterConfig::from_lookup(lookup(&[
            ("APP_ID", "TEST1234567890"),
            ("SECRET_KEY", "cfsk_secret"),
        ]))
        .unwrap();

        let credentials = config.credentials.unwrap();
        assert_eq!(credentials.app_id, "TEST1234567890");
        assert!(!config.allow_body_credentials);
        assert_eq!(config.order, OrderSettings::default());
    }

    #[test]
    fn test_partial_credentials_are_absent() {
        let config = AdapterConfig::from_lookup(lookup(&[("APP_ID", "TEST1")])).unwrap();
        assert!(config.credentials.is_none());
    }

    #[test]
    fn test_invalid_flag_rejected() {
        let result = AdapterConfig::from_lookup(lookup(&[("ALLOW_BODY_CREDENTIALS", "maybe")]));
        assert!(matches!(result, Err(PaymentError::Configuration(_))));
    }

    #[test]
    fn test_order_settings_overrides() {
        let settings = OrderSettings::from_lookup(lookup(&[
            ("APP_DOMAIN", "staging.buffbuddies.com"),
            ("ORDER_NOTE", "Trial session"),
        ]));

        assert_eq!(
            settings.return_url("O1"),
            "https://staging.buffbuddies.com/booking/success?order_id=O1"
        );
        assert_eq!(settings.order_note, "Trial session");
        assert_eq!(settings.email_domain, "buffbuddies.com");
    }

    #[test]
    fn test_resolve_prefers_configured_credentials() {
        let config = AdapterConfig::new(Credentials::new("env_app", "env_secret"))
            .with_body_credentials(true);
        let body = json!({ "appId": "body_app", "secretKey": "body_secret" });

        let credentials = config.resolve_credentials(Some(&body)).unwrap();
        assert_eq!(credentials.app_id, "env_app");
    }

    #[test]
    fn test_body_fallback_only_when_enabled() {
        let body = json!({ "appId": "body_app", "secretKey": "body_secret" });

        let strict = AdapterConfig::default();
        let err = strict.resolve_credentials(Some(&body)).unwrap_err();
        assert_eq!(err.status_code(), 500);

        let legacy = AdapterConfig::default().with_body_credentials(true);
        assert_eq!(
            legacy.resolve_credentials(Some(&body)).unwrap().app_id,
            "body_app"
        );
        assert!(legacy.resolve_credentials(None).is_err());
    }

    #[test]
    fn test_debug_redacts_secret() {
        let credentials = Credentials::new("TEST1234567890", "cfsk_super_secret");
        let rendered = format!("{:?}", credentials);

        assert!(rendered.contains("TEST12"));
        assert!(!rendered.contains("TEST1234567890"));
        assert!(!rendered.contains("cfsk_super_secret"));
    }
}
