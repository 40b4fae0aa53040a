use crate::auth::AdminCredentials;
use crate::config::Config;
use crate::errors::AuthError;
use crate::session::SessionKeys;
use crate::storage::VisitStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: VisitStore,
    pub credentials: AdminCredentials,
    pub sessions: SessionKeys,
    pub api_key: Arc<str>,
    pub secure_cookies: bool,
}

impl AppState {
    pub fn new(config: &Config) -> Result<Self, AuthError> {
        Ok(Self {
            store: VisitStore::new(config.data_path.clone()),
            credentials: AdminCredentials::from_config(config),
            sessions: SessionKeys::new(&config.jwt_secret)?,
            api_key: Arc::from(config.api_key.as_str()),
            secure_cookies: config.secure_cookies,
        })
    }
}
