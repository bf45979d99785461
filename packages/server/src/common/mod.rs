// Common types and utilities shared across the application

pub mod pagination;
pub mod password;
pub mod validation;

pub use pagination::{PageRequest, SortDirection};
