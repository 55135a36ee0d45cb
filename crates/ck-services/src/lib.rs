//! # ck-services
//!
//! The project aggregation and mutation layers:
//!
//! - [`aggregation::ProjectLoader`] merges owned and member projects,
//!   hydrates them with members and tasks, and substitutes the fixed
//!   sample dataset when live retrieval fails.
//! - [`mutations::ProjectService`] writes through to the store and keeps a
//!   session-scoped [`workspace::Workspace`] usable when writes fail.

pub mod aggregation;
pub mod mutations;
pub mod sample;
pub mod workspace;

#[cfg(test)]
pub(crate) mod memstore;

pub use aggregation::ProjectLoader;
pub use mutations::ProjectService;
pub use sample::sample_projects;
pub use workspace::Workspace;
