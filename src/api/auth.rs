//! HTTP Basic credential check
//!
//! The credential table is read-only configuration built at startup and
//! injected into the router state. Passwords are compared as plain strings;
//! this is access control for a local tool, not a hardened auth layer.

use crate::api::AppState;
use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::json;
use std::collections::HashMap;
use tracing::warn;

/// Value of the `WWW-Authenticate` header on 401 responses
pub const AUTH_CHALLENGE: &str = "Basic realm=\"Transaction API\"";

/// Built-in accounts used when no `--user` is configured
const DEFAULT_USERS: [(&str, &str); 3] = [
    ("admin", "password123"),
    ("user", "user123"),
    ("test", "test123"),
];

/// Username to password table
#[derive(Debug, Clone)]
pub struct CredentialTable {
    users: HashMap<String, String>,
}

impl CredentialTable {
    /// Build a table from `(username, password)` pairs
    ///
    /// A repeated username keeps its last password.
    pub fn new<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        CredentialTable {
            users: entries.into_iter().collect(),
        }
    }

    /// Whether the username exists with exactly this password
    pub fn validate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }

    /// Check a raw `Authorization` header value
    pub fn authenticate(&self, header: Option<&str>) -> bool {
        header
            .and_then(parse_basic_auth)
            .is_some_and(|(username, password)| self.validate(&username, &password))
    }
}

impl Default for CredentialTable {
    fn default() -> Self {
        CredentialTable::new(
            DEFAULT_USERS
                .iter()
                .map(|&(name, password)| (name.to_string(), password.to_string())),
        )
    }
}

/// Decode a `Basic <base64(user:password)>` header value
///
/// Returns `None` for any other scheme, bad base64, non-UTF-8 content, or a
/// decoded value without a colon.
pub fn parse_basic_auth(header: &str) -> Option<(String, String)> {
    let encoded = header.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Middleware rejecting requests without valid Basic credentials
pub async fn require_auth(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let authorization = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    if state.credentials.authenticate(authorization) {
        return next.run(request).await;
    }

    warn!(
        method = %request.method(),
        path = %request.uri().path(),
        "rejected request without valid credentials"
    );
    (
        StatusCode::UNAUTHORIZED,
        [(header::WWW_AUTHENTICATE, AUTH_CHALLENGE)],
        Json(json!({
            "success": false,
            "error": "Unauthorized - Valid credentials required",
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn basic(credentials: &str) -> String {
        format!("Basic {}", STANDARD.encode(credentials))
    }

    #[test]
    fn test_parse_basic_auth() {
        assert_eq!(
            parse_basic_auth(&basic("admin:password123")),
            Some(("admin".to_string(), "password123".to_string()))
        );
        assert_eq!(
            parse_basic_auth(&basic("user:a:b")),
            Some(("user".to_string(), "a:b".to_string()))
        );
    }

    #[rstest]
    #[case::bearer_scheme("Bearer abc")]
    #[case::bad_base64("Basic !!!not-base64")]
    #[case::no_colon("Basic YWRtaW4=")]
    #[case::empty("")]
    fn test_parse_basic_auth_rejects(#[case] header: &str) {
        assert_eq!(parse_basic_auth(header), None);
    }

    #[rstest]
    #[case::admin("admin:password123", true)]
    #[case::user("user:user123", true)]
    #[case::test("test:test123", true)]
    #[case::wrong_password("admin:wrongpass", false)]
    #[case::unknown_user("root:password123", false)]
    fn test_default_table(#[case] credentials: &str, #[case] accepted: bool) {
        let table = CredentialTable::default();
        assert_eq!(table.authenticate(Some(&basic(credentials))), accepted);
    }

    #[test]
    fn test_missing_header_is_rejected() {
        assert!(!CredentialTable::default().authenticate(None));
    }

    #[test]
    fn test_custom_table() {
        let table = CredentialTable::new(vec![("ops".to_string(), "pw".to_string())]);
        assert!(table.validate("ops", "pw"));
        assert!(!table.validate("admin", "password123"));
    }
}
