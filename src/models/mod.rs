//! Domain models for the exam portal.
//!
//! # Core Concepts
//!
//! - [`Session`]: the viewer's loading/authentication/identity snapshot, owned
//!   by the session provider and only read here.
//! - [`Role`]: closed set of audiences, each with its own dashboard.
//! - [`RouteRequirement`]: the role a protected path demands, if any.
//! - [`Exam`]: capacity and enrollment counters plus display metadata, owned by
//!   the exam data provider.
//!
//! Nothing here is cached between evaluations. Derived values such as
//! availability are recomputed from these inputs every time.

mod exam;
mod role;
mod route;
mod session;

pub use exam::*;
pub use role::*;
pub use route::*;
pub use session::*;
