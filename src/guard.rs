//! Session route guard.
//!
//! Decides, for one protected route, whether to show a loading indicator,
//! redirect, or render the guarded content. The decision is a pure function of
//! the session snapshot and the route requirement, so re-evaluating with the
//! same inputs always yields the same outcome.
//!
//! | loading | authenticated | user    | required role | state           |
//! |---------|---------------|---------|---------------|-----------------|
//! | true    | *             | *       | *             | Loading         |
//! | false   | false         | *       | *             | Unauthenticated |
//! | false   | true          | none    | *             | Unauthenticated |
//! | false   | true          | present | unset / equal | Authorized      |
//! | false   | true          | present | differs       | WrongRole       |

use serde::{Deserialize, Serialize};

use crate::models::{Role, RouteRequirement, Session};

/// Where unauthenticated viewers are sent.
pub const DEFAULT_SIGN_IN_PATH: &str = "/auth";

/// Static settings the guard needs to build redirect targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardConfig {
    pub sign_in_path: String,
}

impl Default for GuardConfig {
    fn default() -> Self {
        Self {
            sign_in_path: DEFAULT_SIGN_IN_PATH.to_string(),
        }
    }
}

/// Classification of a session against a route requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
    Loading,
    Unauthenticated,
    /// Signed in, but the route belongs to the other role.
    WrongRole(Role),
    Authorized,
}

/// A navigation the caller should perform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Redirect {
    pub path: String,
    /// Replace the current history entry so back-navigation skips the guarded page.
    pub replace: bool,
}

impl Redirect {
    pub fn replace(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            replace: true,
        }
    }
}

/// What the presentation layer should do for this navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Loading,
    RedirectTo(Redirect),
    Render,
}

/// Classify the session against the requirement.
pub fn classify(session: &Session, requirement: &RouteRequirement) -> GuardState {
    if session.loading {
        return GuardState::Loading;
    }

    if !session.is_authenticated {
        return GuardState::Unauthenticated;
    }

    let Some(role) = session.role() else {
        tracing::warn!(
            path = %requirement.path,
            "Session is authenticated without a user, treating as signed out"
        );
        return GuardState::Unauthenticated;
    };

    match requirement.required_role {
        Some(required) if required != role => GuardState::WrongRole(role),
        _ => GuardState::Authorized,
    }
}

impl GuardState {
    pub fn outcome(self, config: &GuardConfig) -> Outcome {
        match self {
            Self::Loading => Outcome::Loading,
            Self::Unauthenticated => Outcome::RedirectTo(Redirect::replace(&config.sign_in_path)),
            Self::WrongRole(role) => Outcome::RedirectTo(Redirect::replace(role.dashboard_path())),
            Self::Authorized => Outcome::Render,
        }
    }
}

/// Decide what to show for a protected route.
pub fn decide(session: &Session, requirement: &RouteRequirement, config: &GuardConfig) -> Outcome {
    let state = classify(session, requirement);
    let outcome = state.outcome(config);
    tracing::debug!(path = %requirement.path, ?state, ?outcome, "Route guard decision");
    outcome
}

/// [`decide`] with the default sign-in entry point.
pub fn evaluate_route(session: &Session, requirement: &RouteRequirement) -> Outcome {
    decide(session, requirement, &GuardConfig::default())
}
