//! Identity model
//!
//! The authenticated identity handed out by the hosted auth service.
//! Lifetime is the session: created on sign-in, dropped on sign-out.

use ck_core::traits::{Id, Identifiable};
use serde::{Deserialize, Serialize};

/// Role carried in the identity service's user metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Professor,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Professor => "professor",
        }
    }
}

/// Authenticated identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    pub id: Id,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub role: UserRole,
    pub avatar_url: String,
}

impl Identity {
    pub fn new(id: Id, email: impl Into<String>, name: impl Into<String>, role: UserRole) -> Self {
        let email = email.into();
        let avatar_url = default_avatar(&email);
        Self {
            id,
            email,
            name: name.into(),
            role,
            avatar_url,
        }
    }
}

impl Identifiable for Identity {
    fn id(&self) -> Id {
        self.id
    }
}

/// Seeded avatar for accounts without an uploaded picture
pub fn default_avatar(seed: &str) -> String {
    format!("https://api.dicebear.com/7.x/avataaars/svg?seed={seed}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_role_defaults_to_student() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id": Uuid::new_v4(),
            "email": "alice@university.edu",
            "name": "Alice",
            "avatarUrl": "https://example.com/a.png"
        }))
        .unwrap();
        assert_eq!(identity.role, UserRole::Student);
    }

    #[test]
    fn test_avatar_seeded_from_email() {
        let identity = Identity::new(
            Uuid::new_v4(),
            "bob@university.edu",
            "Bob",
            UserRole::Professor,
        );
        assert!(identity.avatar_url.contains("seed=bob@university.edu"));
    }
}
