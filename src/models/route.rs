use serde::{Deserialize, Serialize};

use super::role::Role;

/// The role, if any, a navigable path demands.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteRequirement {
    pub path: String,
    pub required_role: Option<Role>,
}

impl RouteRequirement {
    /// A route any authenticated viewer may open.
    pub fn open(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            required_role: None,
        }
    }

    pub fn for_role(path: impl Into<String>, role: Role) -> Self {
        Self {
            path: path.into(),
            required_role: Some(role),
        }
    }
}
