//! Core entity traits shared across the workspace.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Primary key type. Entities created by the hosted identity service and the
/// store use UUIDs; locally synthesized fallback records do too.
pub type Id = Uuid;

/// Trait for entities that have a primary key
pub trait Identifiable {
    fn id(&self) -> Id;
}

/// Trait for entities with a creation timestamp
pub trait Timestamped {
    fn created_at(&self) -> DateTime<Utc>;
}

/// Base trait for domain entities
pub trait Entity: Identifiable + Send + Sync {
    /// The database table name
    const TABLE_NAME: &'static str;

    /// Human-readable type name for error messages
    const TYPE_NAME: &'static str;
}
