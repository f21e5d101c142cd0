//! # Route Table
//!
//! Classifies an inbound method/path pair into one of the adapter's routes.
//!
//! | Method  | Path                        | Route          |
//! |---------|-----------------------------|----------------|
//! | OPTIONS | any                         | `Preflight`    |
//! | GET     | any                         | `Health`       |
//! | POST    | has a `verify` segment      | `VerifyOrder`  |
//! | POST    | anything else               | `CreateOrder`  |
//! | other   | any                         | `NotFound`     |

use percent_encoding::percent_decode_str;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Path segment that marks the verification route
pub const VERIFY_SEGMENT: &str = "verify";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// CORS preflight
    Preflight,
    /// Liveness probe
    Health,
    CreateOrder,
    VerifyOrder,
    NotFound,
}

impl Route {
    /// Classify a request. Method matching is case-insensitive and any
    /// query string on the path is ignored.
    pub fn classify(method: &str, path: &str) -> Self {
        if method.eq_ignore_ascii_case("OPTIONS") {
            Route::Preflight
        } else if method.eq_ignore_ascii_case("GET") {
            Route::Health
        } else if method.eq_ignore_ascii_case("POST") {
            if segments(path).any(|s| s == VERIFY_SEGMENT) {
                Route::VerifyOrder
            } else {
                Route::CreateOrder
            }
        } else {
            Route::NotFound
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Route::Preflight => "preflight",
            Route::Health => "health",
            Route::CreateOrder => "create_order",
            Route::VerifyOrder => "verify_order",
            Route::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Extract the order id from a verification path.
///
/// Takes the first non-empty segment after the last `verify` segment, or
/// failing that the nearest one before it, so `/verify/O1`, `/verify/O1/`
/// and `/O1/verify` all yield `O1`. The segment is percent-decoded; one that
/// does not decode to UTF-8 yields `None`.
pub fn verify_order_id(path: &str) -> Option<Cow<'_, str>> {
    let parts: Vec<&str> = segments(path).collect();
    let marker = parts.iter().rposition(|s| *s == VERIFY_SEGMENT)?;

    parts[marker + 1..]
        .iter()
        .chain(parts[..marker].iter().rev())
        .find(|s| !s.is_empty())
        .and_then(|s| percent_decode_str(s).decode_utf8().ok())
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/')
}
