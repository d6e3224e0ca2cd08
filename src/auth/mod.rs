//! Placeholder authentication.
//!
//! Login and signup accept any input that passes form validation: there is no
//! password check and no server. The resulting user is kept in session storage
//! under [`SESSION_KEY`] and read back by [`AuthContext::restore`].

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, SessionStorage};

use crate::forms::{self, FormErrors};
use crate::models::{SessionUser, UserType};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};
use validator::Validate;

/// Storage key holding the JSON-encoded [`SessionUser`]
pub const SESSION_KEY: &str = "user";

/// Identifier handed to every mock user
pub const MOCK_USER_ID: &str = "123456";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("{0}")]
    Invalid(FormErrors),
    #[error("Session storage failed: {0}")]
    Storage(#[from] anyhow::Error),
}

impl From<FormErrors> for AuthError {
    fn from(errors: FormErrors) -> Self {
        Self::Invalid(errors)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub user_type: UserType,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "Please enter a valid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[serde(default)]
    pub user_type: UserType,
}

/// Holds the signed-in user for one session.
///
/// Passed explicitly to whatever needs to know who is signed in.
pub struct AuthContext {
    storage: Arc<dyn SessionStorage>,
    delay: Duration,
    user: Option<SessionUser>,
}

impl AuthContext {
    /// A signed-out context
    pub fn new(storage: Arc<dyn SessionStorage>, delay: Duration) -> Self {
        Self {
            storage,
            delay,
            user: None,
        }
    }

    /// Picks up a user persisted earlier in the same session.
    /// An unreadable record or store is discarded and the context starts signed out.
    pub async fn restore(
        storage: Arc<dyn SessionStorage>,
        delay: Duration,
    ) -> Result<Self, AuthError> {
        let mut context = Self::new(storage, delay);

        let saved = match context.storage.get(SESSION_KEY).await {
            Ok(saved) => saved,
            Err(e) => {
                warn!("Session storage unreadable, starting signed out: {:#}", e);
                return Ok(context);
            }
        };

        if let Some(saved) = saved {
            match serde_json::from_str::<SessionUser>(&saved) {
                Ok(user) => {
                    info!("Restored session for {}", user.email);
                    context.user = Some(user);
                }
                Err(e) => {
                    warn!("Discarding unreadable session record: {}", e);
                    context.storage.remove(SESSION_KEY).await?;
                }
            }
        }

        Ok(context)
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// Signs in with any valid email/password pair.
    /// The display name is the capitalised local part of the email.
    pub async fn login(&mut self, form: LoginForm) -> Result<&SessionUser, AuthError> {
        forms::check(&form)?;
        tokio::time::sleep(self.delay).await;

        let user = SessionUser {
            id: MOCK_USER_ID.to_string(),
            name: display_name(&form.email),
            email: form.email,
            user_type: form.user_type,
        };

        info!("Logged in {} as {}", user.email, user.user_type.as_str());
        self.replace_user(user).await
    }

    /// Creates the account in memory only and signs it in
    pub async fn signup(&mut self, form: SignupForm) -> Result<&SessionUser, AuthError> {
        forms::check(&form)?;
        tokio::time::sleep(self.delay).await;

        let user = SessionUser {
            id: MOCK_USER_ID.to_string(),
            name: form.name.trim().to_string(),
            email: form.email,
            user_type: form.user_type,
        };

        info!("Signed up {} as {}", user.email, user.user_type.as_str());
        self.replace_user(user).await
    }

    pub async fn logout(&mut self) -> Result<(), AuthError> {
        if let Some(user) = self.user.take() {
            info!("Logged out {}", user.email);
        }
        self.storage.remove(SESSION_KEY).await?;
        Ok(())
    }

    async fn replace_user(&mut self, user: SessionUser) -> Result<&SessionUser, AuthError> {
        let json = serde_json::to_string(&user).map_err(anyhow::Error::from)?;
        self.storage.set(SESSION_KEY, &json).await?;
        Ok(self.user.insert(user))
    }
}

fn display_name(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    let mut chars = local.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
