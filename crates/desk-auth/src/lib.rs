//! # desk-auth
//!
//! Access gate for auditdesk.
//!
//! Issues HS256 session tokens on login, verifies bearer tokens, and manages
//! administrator accounts. Passwords are stored as argon2id PHC strings.

pub mod claims;
pub mod error;
pub mod gate;
pub mod password;

pub use claims::Claims;
pub use error::AuthError;
pub use gate::{AccessGate, LoginResponse};
