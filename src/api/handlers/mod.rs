use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use super::middleware::CurrentSession;
use super::AppState;
use crate::card::ExamCard;
use crate::eligibility::RegistrationUiState;
use crate::error::RegistrationError;
use crate::models::*;
use crate::navigation::{self, Screen};

// ============================================================
// Error Handling
// ============================================================

/// Map a collaborator rejection to a client-visible status.
fn registration_error(e: RegistrationError) -> (StatusCode, String) {
    tracing::warn!("Registration rejected: {}", e);
    let status = match &e {
        RegistrationError::ExamNotFound(_) => StatusCode::NOT_FOUND,
        RegistrationError::ExamFull(_) | RegistrationError::AlreadyRegistered(_) => {
            StatusCode::CONFLICT
        }
        RegistrationError::NotEligible(_) => StatusCode::FORBIDDEN,
    };
    (status, e.to_string())
}

fn exam_not_found(id: &str) -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, format!("Exam not found: {}", id))
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Sessions
// ============================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInInput {
    pub user_id: String,
    pub role: Role,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignInResponse {
    pub token: String,
    pub session: Session,
    /// Where the viewer lands after signing in.
    pub redirect: String,
}

pub async fn sign_in(
    State(state): State<AppState>,
    Json(input): Json<SignInInput>,
) -> (StatusCode, Json<SignInResponse>) {
    let user = User {
        id: input.user_id,
        role: input.role,
        name: input.name,
        email: input.email,
    };
    let redirect = user.role.dashboard_path();
    let token = state.sessions.sign_in(user.clone());

    (
        StatusCode::CREATED,
        Json(SignInResponse {
            token,
            session: Session::signed_in(user),
            redirect,
        }),
    )
}

pub async fn sign_out(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Result<StatusCode, (StatusCode, String)> {
    match current.token {
        Some(token) if state.sessions.sign_out(&token) => Ok(StatusCode::NO_CONTENT),
        _ => Err((StatusCode::NOT_FOUND, "Session not found".to_string())),
    }
}

// ============================================================
// Navigation
// ============================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NavigateQuery {
    pub path: Option<String>,
}

pub async fn navigate(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Query(query): Query<NavigateQuery>,
) -> Json<Screen> {
    let path = query.path.as_deref().unwrap_or("/");
    Json(navigation::navigate(&current.session, path, &state.guard))
}

// ============================================================
// Exams
// ============================================================

fn card_for(state: &AppState, session: &Session, exam: &Exam) -> ExamCard {
    let is_registered = session.role().is_some()
        && session
            .user
            .as_ref()
            .is_some_and(|u| state.exams.is_registered(&u.id, &exam.id));
    ExamCard::build(exam, session, is_registered)
}

pub async fn list_exams(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
) -> Json<Vec<ExamCard>> {
    let cards = state
        .exams
        .exams()
        .iter()
        .map(|exam| card_for(&state, &current.session, exam))
        .collect();
    Json(cards)
}

pub async fn get_exam(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<Json<ExamCard>, (StatusCode, String)> {
    state
        .exams
        .exam(&id)
        .map(|exam| Json(card_for(&state, &current.session, &exam)))
        .ok_or_else(|| exam_not_found(&id))
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationResponse {
    pub registration: Registration,
    /// The exam re-read from the provider after the registration.
    pub exam: ExamCard,
}

/// Register the current viewer for an exam.
///
/// The collaborator is only called when the eligibility model allows an
/// attempt. The returned card is rebuilt from fresh provider data.
pub async fn register(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentSession>,
    Path(id): Path<String>,
) -> Result<(StatusCode, Json<RegistrationResponse>), (StatusCode, String)> {
    let session = &current.session;
    let exam = state.exams.exam(&id).ok_or_else(|| exam_not_found(&id))?;
    let card = card_for(&state, session, &exam);

    if !card.evaluation.can_attempt_register {
        return Err(match card.evaluation.ui_state {
            RegistrationUiState::Registered => {
                registration_error(RegistrationError::AlreadyRegistered(id))
            }
            RegistrationUiState::Full => registration_error(RegistrationError::ExamFull(id)),
            RegistrationUiState::Unauthenticated | RegistrationUiState::Open => (
                StatusCode::UNAUTHORIZED,
                "Sign in to register".to_string(),
            ),
        });
    }

    let user = session
        .user
        .as_ref()
        .ok_or_else(|| registration_error(RegistrationError::NotEligible("no user in session")))?;

    let registration = state
        .exams
        .submit_registration(&id, &user.id)
        .map_err(registration_error)?;
    tracing::info!(exam_id = %id, user_id = %user.id, "Registered for exam");

    let exam = state.exams.exam(&id).ok_or_else(|| exam_not_found(&id))?;
    Ok((
        StatusCode::CREATED,
        Json(RegistrationResponse {
            registration,
            exam: card_for(&state, session, &exam),
        }),
    ))
}
