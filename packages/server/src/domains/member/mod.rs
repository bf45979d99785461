//! Member domain - CRUD over member records
//!
//! Reads of a single member go through a process-local cache; every
//! successful write evicts the touched entry.

pub mod cache;
pub mod data;
pub mod models;
pub mod service;
pub mod store;
pub mod testing;

pub use cache::MemberCache;
pub use data::{MemberData, PagedMemberData};
pub use models::member::{Member, NewMember};
pub use service::{MemberError, MemberService};
pub use store::{MemberStore, PgMemberStore};
