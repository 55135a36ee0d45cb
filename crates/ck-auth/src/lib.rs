//! # ck-auth
//!
//! Authentication for CollabKit RS. Credentials are verified by a hosted
//! identity service; this crate wraps its HTTP API and manages the local
//! session lifecycle (create on sign-in, destroy on sign-out).

pub mod identity;
pub mod session;

pub use identity::{AuthClient, AuthClientConfig};
pub use session::{MemorySessionStore, Session, SessionError, SessionStore};
