//! Auth domain - credential verification and JWT issuance
//!
//! Responsibilities:
//! - Verifying username/password pairs against the credential store
//! - Issuing and validating HMAC-signed tokens carrying username + role

pub mod data;
pub mod jwt;
pub mod models;
pub mod service;
pub mod store;
pub mod testing;

pub use data::LoginData;
pub use jwt::{Claims, JwtService};
pub use service::{AuthError, AuthenticationService};
pub use store::{CredentialStore, PgCredentialStore};
