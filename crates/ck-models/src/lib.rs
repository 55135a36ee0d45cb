//! # ck-models
//!
//! Domain entities for CollabKit RS: identities, projects, members, tasks,
//! and generated-video records, plus the partial-update DTOs the mutation
//! layer applies both against the store and against in-memory state.

pub mod member;
pub mod project;
pub mod task;
pub mod user;
pub mod video;

pub use member::{MemberInput, ProjectMember};
pub use project::{
    progress_percent, CreateProjectInput, Project, ProjectPatch, ProjectStatus, DEFAULT_PHASES,
};
pub use task::{Task, TaskInput, TaskPatch, TaskPriority, TaskStatus};
pub use user::{Identity, UserRole};
pub use video::GeneratedVideo;
