//! View model for one exam listing.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::eligibility::{self, ExamEvaluation};
use crate::models::{Exam, Session};

/// Everything the presentation layer needs to draw an exam card.
///
/// Built fresh from the current session and exam snapshot on each render.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExamCard {
    pub id: String,
    pub name: String,
    pub code: String,
    pub description: String,
    pub fee: f64,
    pub date: String,
    pub time: String,
    pub duration: u32,
    pub location: String,
    pub instructor: String,
    pub prerequisites: Vec<String>,
    /// `enrolled/capacity`
    pub capacity_label: String,
    pub fill_percent: f64,
    pub availability_message: String,
    pub is_registered: bool,
    #[serde(flatten)]
    pub evaluation: ExamEvaluation,
}

impl ExamCard {
    pub fn build(exam: &Exam, session: &Session, is_registered: bool) -> Self {
        let is_authenticated = session.role().is_some();
        let evaluation =
            eligibility::evaluate_exam(exam.capacity, exam.enrolled, is_authenticated, is_registered);

        Self {
            id: exam.id.clone(),
            name: exam.name.clone(),
            code: exam.code.clone(),
            description: exam.description.clone(),
            fee: exam.fee,
            date: format_date(&exam.date),
            time: format!("{} ({} minutes)", format_time(&exam.time), exam.duration),
            duration: exam.duration,
            location: exam.location.clone(),
            instructor: exam.instructor.clone(),
            prerequisites: exam.prerequisites.clone(),
            capacity_label: format!("{}/{}", exam.enrolled, exam.capacity),
            fill_percent: eligibility::fill_percent(exam.capacity, exam.enrolled),
            availability_message: eligibility::availability_message(&evaluation),
            is_registered,
            evaluation,
        }
    }
}

/// `2024-01-15` → `Monday, January 15, 2024`. Unparseable input is returned as-is.
pub fn format_date(date: &str) -> String {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map(|d| d.format("%A, %B %-d, %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// `14:30` → `2:30 PM`. Unparseable input is returned as-is.
pub fn format_time(time: &str) -> String {
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map(|t| t.format("%-I:%M %p").to_string())
        .unwrap_or_else(|_| time.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eligibility::AvailabilityStatus;
    use crate::models::{Role, User};

    fn sample_exam() -> Exam {
        Exam {
            name: "Data Structures Final".to_string(),
            code: "CS201".to_string(),
            date: "2024-01-15".to_string(),
            time: "09:00".to_string(),
            duration: 120,
            prerequisites: vec!["CS101".to_string()],
            ..Exam::with_counts("e1", 30, 25)
        }
    }

    #[test]
    fn formats_date_and_time_in_us_english() {
        assert_eq!(format_date("2024-01-15"), "Monday, January 15, 2024");
        assert_eq!(format_time("14:30"), "2:30 PM");
        assert_eq!(format_time("09:00"), "9:00 AM");
    }

    #[test]
    fn malformed_metadata_passes_through() {
        assert_eq!(format_date("next tuesday"), "next tuesday");
        assert_eq!(format_time(""), "");
    }

    #[test]
    fn card_for_signed_out_viewer() {
        let card = ExamCard::build(&sample_exam(), &Session::signed_out(), false);

        assert_eq!(card.capacity_label, "25/30");
        assert_eq!(card.time, "9:00 AM (120 minutes)");
        assert_eq!(card.evaluation.status, AvailabilityStatus::AlmostFull);
        assert_eq!(card.evaluation.button_label, "Sign In to Register");
        assert!(!card.evaluation.can_attempt_register);
    }

    #[test]
    fn card_for_signed_in_student() {
        let session = Session::signed_in(User::new("s1", Role::Student));
        let card = ExamCard::build(&sample_exam(), &session, false);

        assert!(card.evaluation.can_attempt_register);
        assert_eq!(card.evaluation.button_label, "Register Now");
        assert_eq!(card.availability_message, "Only 5 spots left!");
    }

    #[test]
    fn inconsistent_session_counts_as_signed_out() {
        let session = Session {
            loading: false,
            is_authenticated: true,
            user: None,
        };
        let card = ExamCard::build(&sample_exam(), &session, false);
        assert!(!card.evaluation.can_attempt_register);
    }
}
