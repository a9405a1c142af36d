//! Mock session over `KeyValueStore`. Not a security boundary: the only
//! accepted credentials are the demo pair from config.

use crate::shared::app_state::AppState;
use crate::shared::storage::KeyValueStore;
use contracts::system::auth::{LoginRequest, SignupRequest, UserInfo};
use thiserror::Error;

const AUTH_USER_SUFFIX: &str = "auth_user";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,
    #[error("{0} is required")]
    MissingField(&'static str),
}

#[derive(Debug, Clone)]
pub struct AuthService {
    store: KeyValueStore,
    key: String,
    demo_email: String,
    demo_password: String,
}

impl AuthService {
    pub fn new(app: &AppState) -> Self {
        let auth = &app.config().auth;
        Self {
            store: app.store().clone(),
            key: app.storage_key(AUTH_USER_SUFFIX),
            demo_email: auth.demo_email.clone(),
            demo_password: auth.demo_password.clone(),
        }
    }

    /// Пользователь из прошлой сессии, если есть
    pub fn current_user(&self) -> Option<UserInfo> {
        self.store.get::<UserInfo>(&self.key)
    }

    pub fn login(&self, request: LoginRequest) -> Result<UserInfo, AuthError> {
        let email = request.email.trim();
        require("Email", email)?;
        require("Password", &request.password)?;

        if !email.eq_ignore_ascii_case(&self.demo_email) || request.password != self.demo_password {
            log::warn!("Rejected login for {}", email);
            return Err(AuthError::InvalidCredentials);
        }

        let user = UserInfo {
            id: "1".to_string(),
            name: "Test User".to_string(),
            email: self.demo_email.clone(),
        };
        self.store.set(&self.key, &user);
        log::info!("Signed in as {}", user.email);
        Ok(user)
    }

    /// Creates a mock account and signs it in immediately
    pub fn signup(&self, request: SignupRequest) -> Result<UserInfo, AuthError> {
        require("Name", &request.name)?;
        require("Email", &request.email)?;
        require("Password", &request.password)?;

        let user = UserInfo {
            id: uuid::Uuid::new_v4().to_string(),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
        };
        self.store.set(&self.key, &user);
        log::info!("Signed up {}", user.email);
        Ok(user)
    }

    pub fn logout(&self) {
        self.store.remove(&self.key);
        log::info!("Signed out");
    }
}

fn require(field: &'static str, value: &str) -> Result<(), AuthError> {
    if value.trim().is_empty() {
        Err(AuthError::MissingField(field))
    } else {
        Ok(())
    }
}
