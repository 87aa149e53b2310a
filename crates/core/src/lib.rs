//! `printstock-core`: shared domain primitives.
//!
//! Pure types only: the error model and strongly-typed identifiers. No IO.

pub mod error;
pub mod id;

pub use error::{DomainError, DomainResult};
pub use id::SessionId;
