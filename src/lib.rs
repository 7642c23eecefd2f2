//! Exam portal core: session-gated navigation and exam registration eligibility.

pub mod api;
pub mod card;
pub mod config;
pub mod eligibility;
pub mod error;
pub mod guard;
pub mod models;
pub mod navigation;
pub mod provider;
