// Client for the hosted authentication service and the per-request session handle.
// Decision: the service owns all token and identity state; this crate only moves
// cookies between the request, the service, and the response.

pub mod client;
pub mod config;
pub mod error;
pub mod session;

pub use client::{AuthUser, HttpSessionService, SessionService, TokenBundle};
pub use config::AuthConfig;
pub use error::AuthApiError;
pub use session::{ServerSession, ACCESS_COOKIE, REFRESH_COOKIE};
