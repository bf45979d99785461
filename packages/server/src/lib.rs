// Member Registry API
//
// Backend service for managing member records behind JWT authentication
// with two roles (ROLE_USER, ROLE_ADMIN). Reads on the single-member
// path go through a process-local cache that writes invalidate.

pub mod common;
pub mod config;
pub mod domains;
pub mod server;

pub use config::*;
