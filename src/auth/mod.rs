//! Session credential validation and authentication operations.

pub mod claims;
pub mod endpoints;
pub mod session;

pub use claims::Claims;
pub use endpoints::{AuthResponse, LoginEndpoint, RegisterEndpoint, UserProfile};
pub use session::SessionManager;
