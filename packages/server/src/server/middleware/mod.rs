// HTTP middleware
pub mod jwt_auth;
pub mod require_role;

pub use jwt_auth::*;
pub use require_role::*;
