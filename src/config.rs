use crate::errors::ConfigError;
use std::{env, path::PathBuf};

pub const DEFAULT_DATA_PATH: &str = "data/visitor-data.json";
pub const DEFAULT_PORT: u16 = 8080;

/// Process-wide settings, read once at startup.
///
/// No `Debug` impl: it holds the admin password, the signing key and the
/// operator API key.
#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub data_path: PathBuf,
    pub admin_username: String,
    pub admin_password: String,
    pub jwt_secret: String,
    pub api_key: String,
    /// Marks the session cookie `Secure`. Set when `APP_ENV=production`.
    pub secure_cookies: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let port = match lookup("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|err| ConfigError::Invalid {
                name: "PORT",
                reason: err.to_string(),
            })?,
            None => DEFAULT_PORT,
        };

        let data_path = lookup("APP_DATA_PATH")
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let secure_cookies = lookup("APP_ENV")
            .map(|value| value.eq_ignore_ascii_case("production"))
            .unwrap_or(false);

        Ok(Self {
            port,
            data_path,
            admin_username: required("ADMIN_USERNAME")?,
            admin_password: required("ADMIN_PASSWORD")?,
            jwt_secret: required("JWT_SECRET")?,
            api_key: required("VISITOR_DATA_API_KEY")?,
            secure_cookies,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRETS: [(&str, &str); 4] = [
        ("ADMIN_USERNAME", "admin"),
        ("ADMIN_PASSWORD", "hunter2"),
        ("JWT_SECRET", "test-signing-key"),
        ("VISITOR_DATA_API_KEY", "operator-key"),
    ];

    #[test]
    fn defaults_apply_when_only_secrets_are_set() {
        let config = Config::from_lookup(lookup_from(&SECRETS)).unwrap();
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert!(!config.secure_cookies);
        assert_eq!(config.admin_username, "admin");
    }

    #[test]
    fn missing_signing_key_fails_closed() {
        let pairs: Vec<_> = SECRETS
            .iter()
            .copied()
            .filter(|(k, _)| *k != "JWT_SECRET")
            .collect();
        let err = Config::from_lookup(lookup_from(&pairs)).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("JWT_SECRET")));
    }

    #[test]
    fn blank_secret_counts_as_missing() {
        let mut pairs = SECRETS.to_vec();
        // later entries win when collected into the lookup map
        pairs.push(("ADMIN_PASSWORD", "   "));
        let err = Config::from_lookup(lookup_from(&pairs)).err().unwrap();
        assert!(matches!(err, ConfigError::Missing("ADMIN_PASSWORD")));
    }

    #[test]
    fn production_env_marks_cookies_secure() {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("APP_ENV", "production"));
        pairs.push(("PORT", "9090"));
        pairs.push(("APP_DATA_PATH", "/tmp/visits.json"));
        let config = Config::from_lookup(lookup_from(&pairs)).unwrap();
        assert!(config.secure_cookies);
        assert_eq!(config.port, 9090);
        assert_eq!(config.data_path, PathBuf::from("/tmp/visits.json"));
    }

    #[test]
    fn bad_port_is_rejected() {
        let mut pairs = SECRETS.to_vec();
        pairs.push(("PORT", "eighty"));
        let err = Config::from_lookup(lookup_from(&pairs)).err().unwrap();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }
}
