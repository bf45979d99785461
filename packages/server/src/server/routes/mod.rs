// HTTP routes
pub mod auth;
pub mod health;
pub mod members;

pub use auth::*;
pub use health::*;
pub use members::*;
