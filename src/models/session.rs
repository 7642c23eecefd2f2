use serde::{Deserialize, Serialize};

use super::role::Role;

/// An authenticated viewer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl User {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            name: None,
            email: None,
        }
    }
}

/// Snapshot of the viewer's identity as reported by the session provider.
///
/// Sessions are **read-only** here. The provider owns the lifecycle: a session
/// starts out `loading`, resolves to signed in or signed out, and is dropped on
/// sign-out. The provider promises that `is_authenticated` implies `user` is
/// present, but nothing in this crate relies on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Session {
    pub loading: bool,
    pub is_authenticated: bool,
    pub user: Option<User>,
}

impl Session {
    /// Identity not yet resolved.
    pub fn loading() -> Self {
        Self {
            loading: true,
            is_authenticated: false,
            user: None,
        }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn signed_in(user: User) -> Self {
        Self {
            loading: false,
            is_authenticated: true,
            user: Some(user),
        }
    }

    /// The viewer's role, only when the session is authenticated and carries a user.
    pub fn role(&self) -> Option<Role> {
        if !self.is_authenticated {
            return None;
        }
        self.user.as_ref().map(|u| u.role)
    }

    /// Authenticated but without a user: the provider broke its contract.
    pub fn is_inconsistent(&self) -> bool {
        self.is_authenticated && self.user.is_none()
    }
}
