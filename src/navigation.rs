//! Top-level route tree.
//!
//! The whole protected tree sits behind one gate: while the session is loading
//! the viewer sees a loading indicator, and while signed out every path shows
//! the sign-in page. Only authenticated viewers reach the route table, where
//! per-route role checks go through [`guard::decide`].

use serde::{Deserialize, Serialize};

use crate::guard::{self, GuardConfig, Outcome, Redirect};
use crate::models::{Role, RouteRequirement, Session};

/// Pages the route table can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    StudentDashboard,
    AdminDashboard,
}

impl Page {
    pub fn for_role(role: Role) -> Self {
        match role {
            Role::Student => Self::StudentDashboard,
            Role::Admin => Self::AdminDashboard,
        }
    }
}

/// What the application shell shows for a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "screen", rename_all = "snake_case")]
pub enum Screen {
    Loading,
    SignIn,
    RedirectTo(Redirect),
    Render { page: Page },
}

enum RouteMatch {
    Dashboard(Role),
    /// `/` and any unmatched path.
    Fallback,
}

fn match_route(path: &str) -> RouteMatch {
    let trimmed = path.trim_end_matches('/');
    match trimmed {
        "/student/dashboard" => RouteMatch::Dashboard(Role::Student),
        "/admin/dashboard" => RouteMatch::Dashboard(Role::Admin),
        _ => RouteMatch::Fallback,
    }
}

/// Resolve a requested path against the route table.
pub fn navigate(session: &Session, path: &str, config: &GuardConfig) -> Screen {
    if session.loading {
        return Screen::Loading;
    }

    let Some(role) = session.role() else {
        if session.is_inconsistent() {
            tracing::warn!(path, "Session is authenticated without a user, showing sign-in");
        }
        return Screen::SignIn;
    };

    let screen = match match_route(path) {
        RouteMatch::Dashboard(required) => {
            let requirement = RouteRequirement::for_role(path, required);
            match guard::decide(session, &requirement, config) {
                Outcome::Render => Screen::Render {
                    page: Page::for_role(required),
                },
                Outcome::RedirectTo(redirect) => Screen::RedirectTo(redirect),
                Outcome::Loading => Screen::Loading,
            }
        }
        RouteMatch::Fallback => Screen::RedirectTo(Redirect::replace(role.dashboard_path())),
    };

    tracing::debug!(path, ?screen, "Navigation resolved");
    screen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;

    #[test]
    fn trailing_slash_matches_dashboard() {
        let session = Session::signed_in(User::new("s1", Role::Student));
        let screen = navigate(&session, "/student/dashboard/", &GuardConfig::default());
        assert_eq!(
            screen,
            Screen::Render {
                page: Page::StudentDashboard
            }
        );
    }

    #[test]
    fn root_redirects_to_own_dashboard() {
        let session = Session::signed_in(User::new("a1", Role::Admin));
        let screen = navigate(&session, "/", &GuardConfig::default());
        assert_eq!(screen, Screen::RedirectTo(Redirect::replace("/admin/dashboard")));
    }
}
