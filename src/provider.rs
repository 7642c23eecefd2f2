//! Collaborator contracts and in-memory reference implementations.
//!
//! The session provider owns identity and the exam data provider owns exams and
//! registrations. The portal core only reads snapshots from them and asks the
//! exam data provider to register a viewer when eligibility allows it.

use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use uuid::Uuid;

use crate::error::RegistrationError;
use crate::models::*;

/// Source of session snapshots.
pub trait SessionProvider: Send + Sync {
    /// Current session for a bearer token. Unknown or missing tokens are signed out.
    fn session(&self, token: Option<&str>) -> Session;
}

/// Source of exams and the registration action.
pub trait ExamDataProvider: Send + Sync {
    fn exams(&self) -> Vec<Exam>;

    fn exam(&self, exam_id: &str) -> Option<Exam>;

    fn is_registered(&self, user_id: &str, exam_id: &str) -> bool;

    /// Register a user. Capacity is checked and incremented atomically here.
    fn submit_registration(
        &self,
        exam_id: &str,
        user_id: &str,
    ) -> Result<Registration, RegistrationError>;
}

// ============================================================
// Session store
// ============================================================

/// In-memory session provider keyed by bearer token.
///
/// A token is either pending (identity still resolving, reported as loading)
/// or bound to a user.
#[derive(Clone, Default)]
pub struct SessionStore {
    sessions: Arc<Mutex<HashMap<String, Option<User>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a token bound to `user`.
    pub fn sign_in(&self, user: User) -> String {
        let token = Uuid::new_v4().to_string();
        tracing::info!(user_id = %user.id, role = %user.role, "Signed in");
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .insert(token.clone(), Some(user));
        token
    }

    /// Issue a token whose identity is still being resolved.
    pub fn begin(&self) -> String {
        let token = Uuid::new_v4().to_string();
        self.sessions
            .lock()
            .expect("session lock poisoned")
            .insert(token.clone(), None);
        token
    }

    /// Finish resolving a pending token. Returns false for unknown tokens.
    pub fn resolve(&self, token: &str, user: User) -> bool {
        let mut sessions = self.sessions.lock().expect("session lock poisoned");
        match sessions.get_mut(token) {
            Some(slot) => {
                *slot = Some(user);
                true
            }
            None => false,
        }
    }

    /// Drop a token. Returns false if it was not known.
    pub fn sign_out(&self, token: &str) -> bool {
        let removed = self
            .sessions
            .lock()
            .expect("session lock poisoned")
            .remove(token)
            .is_some();
        if removed {
            tracing::info!("Signed out");
        }
        removed
    }
}

impl SessionProvider for SessionStore {
    fn session(&self, token: Option<&str>) -> Session {
        let Some(token) = token else {
            return Session::signed_out();
        };
        let sessions = self.sessions.lock().expect("session lock poisoned");
        match sessions.get(token) {
            Some(Some(user)) => Session::signed_in(user.clone()),
            Some(None) => Session::loading(),
            None => Session::signed_out(),
        }
    }
}

// ============================================================
// Exam catalog
// ============================================================

#[derive(Default)]
struct CatalogState {
    exams: Vec<Exam>,
    registrations: HashSet<(String, String)>,
}

/// In-memory exam data provider.
///
/// Keeps exams in publication order. Registration checks capacity and bumps
/// `enrolled` under a single lock, so two viewers racing for the last spot
/// cannot both succeed.
#[derive(Clone, Default)]
pub struct ExamCatalog {
    state: Arc<Mutex<CatalogState>>,
}

impl ExamCatalog {
    pub fn new(exams: Vec<Exam>) -> Self {
        Self {
            state: Arc::new(Mutex::new(CatalogState {
                exams,
                registrations: HashSet::new(),
            })),
        }
    }

    /// Load a JSON array of exams.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        let exams: Vec<Exam> =
            serde_json::from_str(&content).context("Failed to parse seed file")?;
        tracing::info!(count = exams.len(), "Loaded exam catalog");
        Ok(Self::new(exams))
    }
}

impl ExamDataProvider for ExamCatalog {
    fn exams(&self) -> Vec<Exam> {
        self.state.lock().expect("catalog lock poisoned").exams.clone()
    }

    fn exam(&self, exam_id: &str) -> Option<Exam> {
        self.state
            .lock()
            .expect("catalog lock poisoned")
            .exams
            .iter()
            .find(|e| e.id == exam_id)
            .cloned()
    }

    fn is_registered(&self, user_id: &str, exam_id: &str) -> bool {
        self.state
            .lock()
            .expect("catalog lock poisoned")
            .registrations
            .contains(&(user_id.to_string(), exam_id.to_string()))
    }

    fn submit_registration(
        &self,
        exam_id: &str,
        user_id: &str,
    ) -> Result<Registration, RegistrationError> {
        let mut state = self.state.lock().expect("catalog lock poisoned");
        let key = (user_id.to_string(), exam_id.to_string());

        if state.registrations.contains(&key) {
            return Err(RegistrationError::AlreadyRegistered(exam_id.to_string()));
        }

        let exam = state
            .exams
            .iter_mut()
            .find(|e| e.id == exam_id)
            .ok_or_else(|| RegistrationError::ExamNotFound(exam_id.to_string()))?;

        if exam.enrolled >= exam.capacity {
            return Err(RegistrationError::ExamFull(exam_id.to_string()));
        }
        exam.enrolled += 1;
        state.registrations.insert(key);

        Ok(Registration {
            exam_id: exam_id.to_string(),
            user_id: user_id.to_string(),
            registered_at: Utc::now(),
        })
    }
}
