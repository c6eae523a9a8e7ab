//! Per-domain service clients
//!
//! ## Table of Contents
//! 1. Submodules
//! 2. Re-exports
//!
//! One client per backend: identity, courses, assessment, dashboard, and
//! user-profile. All of them share one [`HttpClient`](crate::http::HttpClient)
//! and therefore one session and one 401-recovery path.

pub mod assessment;
pub mod courses;
pub mod dashboard;
pub mod identity;
pub mod profile;

pub use assessment::AssessmentClient;
pub use courses::CourseClient;
pub use dashboard::DashboardClient;
pub use identity::IdentityClient;
pub use profile::ProfileClient;
