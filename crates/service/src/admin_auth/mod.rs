//! Admin authentication: static operator credentials, a server-side session
//! table and two verifier strategies tried in fixed order.

pub mod session;
pub mod verifier;
pub mod service;

pub use service::{AdminAuthService, AdminLogin, AdminLoginInput};
pub use session::SessionStore;
pub use verifier::{AdminAuthMethod, AdminCredentials, AdminIdentity, AdminVerifier};
