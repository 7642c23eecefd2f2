//! Exam capacity status and registration eligibility.
//!
//! Everything here is a pure function of the exam counters and the viewer's
//! authentication/registration flags. Nothing is cached: a registration only
//! shows up once the exam data provider reports new counters and the caller
//! evaluates again.

use serde::{Deserialize, Serialize};

/// Remaining spots at or below which an exam counts as almost full.
pub const ALMOST_FULL_THRESHOLD: i64 = 10;

/// Classification of an exam's remaining capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AvailabilityStatus {
    Full,
    AlmostFull,
    Open,
}

impl AvailabilityStatus {
    pub fn from_available_spots(available_spots: i64) -> Self {
        if available_spots <= 0 {
            Self::Full
        } else if available_spots <= ALMOST_FULL_THRESHOLD {
            Self::AlmostFull
        } else {
            Self::Open
        }
    }
}

/// State of the registration call-to-action, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationUiState {
    Registered,
    Full,
    Unauthenticated,
    Open,
}

impl RegistrationUiState {
    /// Registration beats fullness, fullness beats authentication.
    pub fn resolve(is_registered: bool, status: AvailabilityStatus, is_authenticated: bool) -> Self {
        if is_registered {
            Self::Registered
        } else if status == AvailabilityStatus::Full {
            Self::Full
        } else if !is_authenticated {
            Self::Unauthenticated
        } else {
            Self::Open
        }
    }

    pub fn button_label(&self) -> &'static str {
        match self {
            Self::Registered => "Registered",
            Self::Full => "Exam Full",
            Self::Unauthenticated => "Sign In to Register",
            Self::Open => "Register Now",
        }
    }
}

/// Result of evaluating one exam for one viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamEvaluation {
    /// `capacity - enrolled`; negative when overbooked.
    pub available_spots: i64,
    pub status: AvailabilityStatus,
    pub ui_state: RegistrationUiState,
    pub can_attempt_register: bool,
    pub button_label: String,
}

/// Evaluate availability and registration eligibility for one exam.
pub fn evaluate_exam(
    capacity: u32,
    enrolled: u32,
    is_authenticated: bool,
    is_registered: bool,
) -> ExamEvaluation {
    let available_spots = i64::from(capacity) - i64::from(enrolled);
    let status = AvailabilityStatus::from_available_spots(available_spots);
    let ui_state = RegistrationUiState::resolve(is_registered, status, is_authenticated);
    let can_attempt_register =
        is_authenticated && status != AvailabilityStatus::Full && !is_registered;

    ExamEvaluation {
        available_spots,
        status,
        ui_state,
        can_attempt_register,
        button_label: ui_state.button_label().to_string(),
    }
}

/// Share of capacity taken, as a percentage clamped to `0..=100`.
///
/// A zero-capacity exam reads as completely filled.
pub fn fill_percent(capacity: u32, enrolled: u32) -> f64 {
    if capacity == 0 {
        return 100.0;
    }
    (f64::from(enrolled) / f64::from(capacity) * 100.0).clamp(0.0, 100.0)
}

/// Human-readable remaining-capacity line shown under the capacity bar.
pub fn availability_message(evaluation: &ExamEvaluation) -> String {
    match evaluation.status {
        AvailabilityStatus::Full => "Exam is full".to_string(),
        AvailabilityStatus::AlmostFull => {
            format!("Only {} spots left!", evaluation.available_spots)
        }
        AvailabilityStatus::Open => format!("{} spots available", evaluation.available_spots),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn threshold_is_inclusive_at_ten() {
        assert_eq!(
            AvailabilityStatus::from_available_spots(10),
            AvailabilityStatus::AlmostFull
        );
        assert_eq!(
            AvailabilityStatus::from_available_spots(11),
            AvailabilityStatus::Open
        );
    }

    #[test]
    fn extreme_counters_do_not_overflow() {
        let eval = evaluate_exam(0, u32::MAX, true, false);
        assert_eq!(eval.available_spots, -i64::from(u32::MAX));
        assert_eq!(eval.status, AvailabilityStatus::Full);
    }

    #[test]
    fn fill_percent_clamps_overbooked() {
        assert_eq!(fill_percent(30, 45), 100.0);
        assert_eq!(fill_percent(0, 0), 100.0);
        assert_eq!(fill_percent(40, 10), 25.0);
    }

    #[test]
    fn availability_messages() {
        assert_eq!(
            availability_message(&evaluate_exam(30, 25, true, false)),
            "Only 5 spots left!"
        );
        assert_eq!(
            availability_message(&evaluate_exam(30, 10, true, false)),
            "20 spots available"
        );
        assert_eq!(
            availability_message(&evaluate_exam(30, 31, true, false)),
            "Exam is full"
        );
    }
}
