//! # ck-core
//!
//! Core types for CollabKit RS: the shared error taxonomy, application
//! configuration, and the entity traits the other crates build on.

pub mod config;
pub mod error;
pub mod traits;

pub use config::AppConfig;
pub use error::{CkError, CkResult};
pub use traits::{Entity, Id, Identifiable, Timestamped};
