use crate::config::Config;
use crate::errors::AuthError;
use crate::session::{SessionKeys, SessionToken};
use axum::http::{header, HeaderMap};
use chrono::Utc;
use subtle::ConstantTimeEq;

/// The single admin account, as configured at startup.
#[derive(Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.admin_username, &config.admin_password)
    }

    /// Both fields are always compared so a wrong username and a wrong
    /// password take the same path.
    pub fn matches(&self, username: &str, password: &str) -> bool {
        let user_ok = secret_eq(username, &self.username);
        let pass_ok = secret_eq(password, &self.password);
        user_ok & pass_ok
    }
}

/// Checks the submitted credentials and, on a match, issues a session token
/// valid for 24 hours.
pub fn login(
    credentials: &AdminCredentials,
    keys: &SessionKeys,
    username: &str,
    password: &str,
) -> Result<SessionToken, AuthError> {
    if !credentials.matches(username, password) {
        return Err(AuthError::InvalidCredentials);
    }
    keys.issue(username, Utc::now())
}

/// True when the request carries `Authorization: Bearer <api_key>`.
pub fn bearer_matches(headers: &HeaderMap, api_key: &str) -> bool {
    let Some(value) = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
    else {
        return false;
    };

    match value.split_once(' ') {
        Some(("Bearer", key)) => !api_key.is_empty() && secret_eq(key, api_key),
        _ => false,
    }
}

fn secret_eq(given: &str, expected: &str) -> bool {
    given.as_bytes().ct_eq(expected.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn credentials() -> AdminCredentials {
        AdminCredentials::new("admin", "correct horse")
    }

    fn keys() -> SessionKeys {
        SessionKeys::new("auth-test-key").unwrap()
    }

    #[test]
    fn correct_login_yields_verifiable_token() {
        let keys = keys();
        let token = login(&credentials(), &keys, "admin", "correct horse").unwrap();
        assert!(keys.verify(Some(token.as_str())));
        assert_eq!(keys.claims(token.as_str()).unwrap().username, "admin");
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let result = login(&credentials(), &keys(), "admin", "battery staple");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn wrong_username_is_the_same_error() {
        let result = login(&credentials(), &keys(), "root", "correct horse");
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[test]
    fn comparison_is_exact() {
        let creds = credentials();
        assert!(!creds.matches("Admin", "correct horse"));
        assert!(!creds.matches("admin", "correct horse "));
        assert!(!creds.matches("admin", ""));
    }

    fn with_authorization(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[test]
    fn bearer_key_must_match_exactly() {
        assert!(bearer_matches(&with_authorization("Bearer op-key"), "op-key"));
        assert!(!bearer_matches(&with_authorization("Bearer op-key2"), "op-key"));
        assert!(!bearer_matches(&with_authorization("Basic op-key"), "op-key"));
        assert!(!bearer_matches(&with_authorization("Bearer"), "op-key"));
        assert!(!bearer_matches(&HeaderMap::new(), "op-key"));
    }

    #[test]
    fn empty_api_key_never_matches() {
        assert!(!bearer_matches(&with_authorization("Bearer "), ""));
    }
}
