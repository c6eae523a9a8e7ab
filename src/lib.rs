//! # LearnHub SDK
//!
//! Typed client library for the LearnHub online-learning platform backends
//! (identity, courses, assessment, dashboard, user-profile).
//!
//! ## Features
//!
//! - **Uniform envelopes**: every backend envelope dialect is normalized
//!   into one `{success, message, data, status}` record
//! - **Never-throw clients**: service methods resolve to a failure envelope
//!   instead of returning errors, so call sites need no catch logic
//! - **Session handling**: bearer attach, refresh-on-401 with a single
//!   in-flight refresh, atomic logout
//! - **Graceful degradation**: opt-in fallback substitution when a backend
//!   is offline
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use learnhub_sdk::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> learnhub_sdk::Result<()> {
//!     let hub = LearnHub::new(ClientConfig::from_env())?;
//!
//!     let session = hub.login("alice", "secret").await;
//!     if !session.success {
//!         eprintln!("login failed: {}", session.message);
//!         return Ok(());
//!     }
//!
//!     let courses = hub.courses().published_courses(&Default::default()).await;
//!     for course in courses.data.unwrap_or_default() {
//!         println!("{}", course.title.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod fallback;
pub mod http;
pub mod interceptor;
pub mod services;
pub mod token;

// Re-exports for ergonomic API
pub use client::LearnHub;
pub use config::ClientConfig;
pub use envelope::{ApiResponse, RawEnvelope};
pub use error::{ClientError, Result};
pub use fallback::{resolve, resolve_list, resolve_with};
pub use http::{Auth, HttpClient};
pub use interceptor::{AuthInterceptor, TokenRefresher};
pub use token::{FileTokenStore, MemoryTokenStore, StoredUser, TokenPair, TokenStore};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::client::LearnHub;
    pub use crate::config::ClientConfig;
    pub use crate::envelope::ApiResponse;
    pub use crate::error::Result;
    pub use crate::fallback::{resolve, resolve_list, resolve_with};
    pub use crate::services::{
        AssessmentClient, CourseClient, DashboardClient, IdentityClient, ProfileClient,
    };
    pub use crate::token::{StoredUser, TokenPair, TokenStore};
}
