//! Local account registration, login and the admin-promotion shortcut.

use crate::app::{present, ServiceError};
use crate::crypto::{hash_password, verify_password, TokenIssuer};
use crate::domain::model::{User, UserProfile};
use crate::infra::ids::{generate_id, referral_code};
use crate::storage::DocumentStore;
use serde_json::Value as JsonValue;
use std::sync::Arc;
use tracing::{info, warn};

const DEFAULT_DISPLAY_NAME: &str = "User";

/// A public user projection plus a freshly issued session token.
#[derive(Debug, Clone)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Clone)]
pub struct IdentityService {
    store: Arc<DocumentStore>,
    tokens: TokenIssuer,
}

impl IdentityService {
    pub fn new(store: Arc<DocumentStore>, tokens: TokenIssuer) -> Self {
        Self { store, tokens }
    }

    pub fn tokens(&self) -> &TokenIssuer {
        &self.tokens
    }

    /// Creates a user with zero credits and zero data balance.
    ///
    /// Email uniqueness is checked against the current document, not enforced by storage.
    pub async fn register(
        &self,
        name: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Session, ServiceError> {
        let (Some(email), Some(password)) = (present(email), present(password)) else {
            return Err(ServiceError::Validation("missing"));
        };
        let name = present(name).unwrap_or(DEFAULT_DISPLAY_NAME);

        // bcrypt is CPU-bound; hash off the runtime and outside the writer lock.
        let plaintext = password.to_string();
        let hash = tokio::task::spawn_blocking(move || hash_password(&plaintext)).await??;

        let user = self
            .store
            .update(|doc| {
                if doc.find_user(email).is_some() {
                    return Err(ServiceError::Conflict);
                }
                let user = User {
                    id: generate_id(),
                    name: name.to_string(),
                    email: email.to_string(),
                    password: hash,
                    credits: JsonValue::from(0),
                    is_admin: false,
                    referral_code: referral_code(),
                    data_balance_mb: 0,
                };
                doc.users.push(user.clone());
                Ok(user)
            })
            .await?;

        info!(user_id = %user.id, "user registered");
        self.session_for(&user)
    }

    pub async fn login(
        &self,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Session, ServiceError> {
        let doc = self.store.load().await;
        let user = present(email)
            .and_then(|email| doc.find_user(email))
            .ok_or(ServiceError::InvalidCredentials)?;

        let password = password.ok_or(ServiceError::InvalidCredentials)?.to_string();
        let hash = user.password.clone();
        let matches = tokio::task::spawn_blocking(move || verify_password(&password, &hash)).await?;
        if !matches {
            warn!(user_id = %user.id, "login rejected");
            return Err(ServiceError::InvalidCredentials);
        }
        self.session_for(user)
    }

    /// Sets `is_admin` on the named user. Unauthenticated and idempotent.
    pub async fn promote_admin(&self, email: Option<&str>) -> Result<String, ServiceError> {
        let email = present(email).ok_or(ServiceError::Validation("missing_email"))?;

        self.store
            .update(|doc| match doc.find_user_mut(email) {
                Some(user) => {
                    user.is_admin = true;
                    Ok(())
                }
                None => Err(ServiceError::NotFound("user_not_found")),
            })
            .await?;

        info!(email, "user promoted to admin");
        Ok(format!("User {} promoted to admin.", email))
    }

    fn session_for(&self, user: &User) -> Result<Session, ServiceError> {
        Ok(Session {
            user: user.profile(),
            token: self.tokens.issue(user)?,
        })
    }
}
