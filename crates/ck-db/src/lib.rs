//! # ck-db
//!
//! PostgreSQL access for CollabKit RS using SQLx:
//!
//! - Connection pool management
//! - Raw row types with read-time normalization into domain entities
//! - The `ProjectStore` seam consumed by the aggregation and mutation layers
//!
//! ## Example
//!
//! ```ignore
//! use ck_db::{Database, DatabaseConfig, PgProjectStore};
//!
//! let db = Database::connect(&DatabaseConfig::from_env()).await?;
//! let store = PgProjectStore::new(db.pool().clone());
//! let owned = store.projects_owned_by(user_id).await?;
//! ```

pub mod members;
pub mod nudges;
pub mod pool;
pub mod projects;
pub mod repository;
pub mod tasks;
pub mod videos;

pub use members::MemberRow;
pub use nudges::{NudgeStore, PgNudgeStore};
pub use pool::{Database, DatabaseConfig};
pub use projects::{PgProjectStore, ProjectRow};
pub use repository::{ProjectStore, RepositoryError, RepositoryResult};
pub use tasks::TaskRow;
pub use videos::{PgVideoStore, VideoStore};
