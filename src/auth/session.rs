//! Session credential lifecycle.
//!
//! Holds the dependency-injected storage and notification collaborators and
//! implements the single entry point callers use before any action that
//! requires an authenticated session: [`SessionManager::validate_current`].

use crate::auth::claims;
use crate::auth::endpoints::{AuthResponse, LoginEndpoint, RegisterEndpoint};
use crate::dispatcher::Dispatcher;
use crate::events::{EventSink, SessionEvent};
use crate::storage::CredentialStore;
use crate::{NetError, Result};
use std::sync::Arc;
use tracing::info;

const CREDENTIAL_KEY: &str = "session.credential";
const USERNAME_KEY: &str = "session.username";

/// Manages the stored bearer credential and its lifecycle events.
///
/// The credential is process-wide mutable state with a single-writer
/// expectation: only login, sign-out, and expiry handling write it. Readers
/// always fetch the latest value from the store and never hold a stale copy
/// across a suspension point.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    events: Arc<dyn EventSink>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn CredentialStore>, events: Arc<dyn EventSink>) -> Self {
        Self { store, events }
    }

    /// The stored bearer credential, if any.
    pub fn credential(&self) -> Option<String> {
        self.store.get(CREDENTIAL_KEY)
    }

    /// The last authenticated username, if any.
    pub fn username(&self) -> Option<String> {
        self.store.get(USERNAME_KEY)
    }

    /// `Authorization` header value for the stored credential.
    pub fn authorization_header(&self) -> Option<String> {
        self.credential().map(|c| format!("Bearer {c}"))
    }

    /// Whether a credential is stored and currently valid.
    pub fn is_authenticated(&self) -> bool {
        match self.credential() {
            Some(credential) => claims::is_valid(&credential),
            None => false,
        }
    }

    /// Validate the stored credential, handling expiry as a side effect.
    ///
    /// Absent credential → `false`. Valid → `true`. Invalid or undecodable →
    /// [`Self::handle_expiry`] runs and this returns `false`. Callers should
    /// go through here before any authenticated action.
    pub fn validate_current(&self) -> bool {
        let Some(credential) = self.credential() else {
            return false;
        };
        if claims::is_valid(&credential) {
            true
        } else {
            self.handle_expiry();
            false
        }
    }

    /// Clear the stored credential and username, then publish
    /// [`SessionEvent::CredentialExpired`] followed by
    /// [`SessionEvent::SessionEnded`], in that order.
    ///
    /// Idempotent: with nothing stored the notifications still fire.
    pub fn handle_expiry(&self) {
        info!("credential expired, ending session");
        self.store.set(CREDENTIAL_KEY, None);
        self.store.set(USERNAME_KEY, None);
        self.events.publish(SessionEvent::CredentialExpired);
        self.events.publish(SessionEvent::SessionEnded);
    }

    /// Clear the session on explicit sign-out.
    pub fn sign_out(&self) {
        info!("signing out");
        self.store.set(CREDENTIAL_KEY, None);
        self.store.set(USERNAME_KEY, None);
        self.events.publish(SessionEvent::SessionEnded);
    }

    /// Authenticate against the community backend.
    ///
    /// On success the returned credential and the username are persisted and
    /// [`SessionEvent::SessionStarted`] is published.
    pub async fn login(
        &self,
        dispatcher: &Dispatcher,
        base_url: &str,
        username: &str,
        password: &str,
    ) -> Result<AuthResponse> {
        let endpoint = LoginEndpoint {
            base_url: base_url.to_string(),
            username: username.to_string(),
            password: password.to_string(),
        };
        let payload = dispatcher.dispatch(&endpoint).await?;
        let response: AuthResponse =
            serde_json::from_value(payload).map_err(NetError::Decoding)?;

        self.store.set(CREDENTIAL_KEY, response.data.clone());
        self.store.set(USERNAME_KEY, Some(username.to_string()));
        self.events.publish(SessionEvent::SessionStarted);
        info!(username, "session started");

        Ok(response)
    }

    /// Register a new account. Does not touch the stored session.
    pub async fn register(
        &self,
        dispatcher: &Dispatcher,
        base_url: &str,
        username: &str,
        password: &str,
        nickname: &str,
    ) -> Result<AuthResponse> {
        let endpoint = RegisterEndpoint::new(base_url, username, password, nickname);
        let payload = dispatcher.dispatch(&endpoint).await?;
        serde_json::from_value(payload).map_err(NetError::Decoding)
    }
}
