use serde::{Deserialize, Serialize};

/// An exam as published by the exam data provider.
///
/// Only `capacity`, `enrolled` and `prerequisites` drive eligibility. The rest
/// is display metadata for the listing card and is passed through unvalidated.
/// `enrolled` may exceed `capacity` when the upstream count is inconsistent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exam {
    pub id: String,
    pub capacity: u32,
    pub enrolled: u32,
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub description: String,
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(default)]
    pub date: String,
    /// Start time, `HH:MM` (24h).
    #[serde(default)]
    pub time: String,
    /// Length in minutes.
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub fee: f64,
}

impl Exam {
    /// An exam with counters only and empty metadata.
    pub fn with_counts(id: impl Into<String>, capacity: u32, enrolled: u32) -> Self {
        Self {
            id: id.into(),
            capacity,
            enrolled,
            prerequisites: Vec::new(),
            name: String::new(),
            code: String::new(),
            description: String::new(),
            date: String::new(),
            time: String::new(),
            duration: 0,
            location: String::new(),
            instructor: String::new(),
            fee: 0.0,
        }
    }
}

/// Confirmation that the exam data provider accepted a registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Registration {
    pub exam_id: String,
    pub user_id: String,
    pub registered_at: chrono::DateTime<chrono::Utc>,
}
