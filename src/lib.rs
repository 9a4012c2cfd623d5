//! # ember-net
//!
//! Client-side network execution layer for the Ember app: many distinct
//! remote operations (authentication, registration, AI chat completion, AI
//! image generation) share one request/response pipeline, one error taxonomy,
//! and one session-credential validity engine.
//!
//! ## Overview
//!
//! - **Descriptors**: each logical API call is a small value type
//!   implementing [`Endpoint`], overriding only what differs from the
//!   defaults (POST, no headers, empty parameters, 30 s timeout).
//! - **Dispatch**: [`Dispatcher`] executes any descriptor exactly once over a
//!   pooled HTTP client and classifies the outcome into [`NetError`] or an
//!   untyped JSON payload tree. No retries, no caching, no queuing.
//! - **Sessions**: [`SessionManager`] decodes the three-segment bearer
//!   credential, answers validity and remaining-time queries from the current
//!   wall clock, and raises lifecycle events through injected collaborators
//!   when the credential expires.
//! - **AI services**: [`ai::ChatService`] and [`ai::ImageService`] package
//!   typed provider bodies and ride the same pipeline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ember_net::{Dispatcher, SessionManager, MemoryStore, NoopSink};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> ember_net::Result<()> {
//!     let dispatcher = Dispatcher::new()?;
//!     let session = SessionManager::new(Arc::new(MemoryStore::new()), Arc::new(NoopSink));
//!
//!     let response = session
//!         .login(&dispatcher, "http://api.example.com", "ada", "secret")
//!         .await?;
//!     println!("logged in: {:?}", response.msg);
//!
//!     if session.validate_current() {
//!         // dispatch authenticated operations...
//!     }
//!     Ok(())
//! }
//! ```

pub mod ai;
pub mod auth;
pub mod classify;
pub mod dispatcher;
pub mod endpoint;
pub mod error;
pub mod events;
pub mod storage;

pub use auth::{claims, AuthResponse, SessionManager, UserProfile};
pub use classify::classify;
pub use dispatcher::{Dispatcher, DispatcherBuilder};
pub use endpoint::{Endpoint, Method, DEFAULT_TIMEOUT};
pub use error::NetError;
pub use events::{EventSink, NoopSink, SessionEvent};
pub use storage::{CredentialStore, MemoryStore};

/// Result type alias for the library.
pub type Result<T> = std::result::Result<T, NetError>;
