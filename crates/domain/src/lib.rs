//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod user;

pub use user::{User, UserId};
