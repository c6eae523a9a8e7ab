//! Client configuration
//!
//! ## Table of Contents
//! - **ClientConfig**: Endpoints, timeout, and environment loading
//!
//! The platform runs one backend per domain (identity, course, assessment,
//! dashboard, user-profile). A single gateway URL covers the common
//! deployment; per-service overrides cover the port-per-service one.

use std::time::Duration;

/// Environment variable for the gateway base URL
pub const API_URL_ENV: &str = "LEARNHUB_API_URL";
/// Environment variable overriding the identity service URL
pub const IDENTITY_URL_ENV: &str = "LEARNHUB_IDENTITY_URL";
/// Environment variable overriding the course service URL
pub const COURSE_URL_ENV: &str = "LEARNHUB_COURSE_URL";
/// Environment variable overriding the assessment service URL
pub const ASSESSMENT_URL_ENV: &str = "LEARNHUB_ASSESSMENT_URL";
/// Environment variable overriding the dashboard service URL
pub const DASHBOARD_URL_ENV: &str = "LEARNHUB_DASHBOARD_URL";
/// Environment variable overriding the user-profile service URL
pub const PROFILE_URL_ENV: &str = "LEARNHUB_PROFILE_URL";
/// Environment variable for the request timeout in seconds
pub const TIMEOUT_SECS_ENV: &str = "LEARNHUB_TIMEOUT_SECS";
/// Environment variable for the dev bypass user id (requires `dev-headers`)
#[cfg(feature = "dev-headers")]
pub const DEV_USER_ID_ENV: &str = "LEARNHUB_DEV_USER_ID";

const DEFAULT_GATEWAY_URL: &str = "http://localhost:8181";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration for the LearnHub client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Gateway base URL, used for every service without an override
    pub gateway_url: String,
    /// Identity service URL override
    pub identity_url: Option<String>,
    /// Course service URL override
    pub course_url: Option<String>,
    /// Assessment service URL override
    pub assessment_url: Option<String>,
    /// Dashboard service URL override
    pub dashboard_url: Option<String>,
    /// User-profile service URL override
    pub profile_url: Option<String>,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
    /// Dev bypass user id, sent as `X-User-Id`/`X-Dev-User-Id`
    #[cfg(feature = "dev-headers")]
    pub dev_user_id: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            gateway_url: DEFAULT_GATEWAY_URL.to_string(),
            identity_url: None,
            course_url: None,
            assessment_url: None,
            dashboard_url: None,
            profile_url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            #[cfg(feature = "dev-headers")]
            dev_user_id: None,
        }
    }
}

impl ClientConfig {
    /// Create a config pointing every service at the default gateway
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.gateway_url = url;
        }
        if let Ok(url) = std::env::var(IDENTITY_URL_ENV) {
            config.identity_url = Some(url);
        }
        if let Ok(url) = std::env::var(COURSE_URL_ENV) {
            config.course_url = Some(url);
        }
        if let Ok(url) = std::env::var(ASSESSMENT_URL_ENV) {
            config.assessment_url = Some(url);
        }
        if let Ok(url) = std::env::var(DASHBOARD_URL_ENV) {
            config.dashboard_url = Some(url);
        }
        if let Ok(url) = std::env::var(PROFILE_URL_ENV) {
            config.profile_url = Some(url);
        }
        if let Some(secs) = std::env::var(TIMEOUT_SECS_ENV)
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.timeout_secs = secs;
        }
        #[cfg(feature = "dev-headers")]
        if let Ok(id) = std::env::var(DEV_USER_ID_ENV) {
            config.dev_user_id = Some(id);
        }

        config
    }

    /// Set the gateway base URL
    pub fn with_gateway_url(mut self, url: impl Into<String>) -> Self {
        self.gateway_url = url.into();
        self
    }

    /// Override the identity service URL
    pub fn with_identity_url(mut self, url: impl Into<String>) -> Self {
        self.identity_url = Some(url.into());
        self
    }

    /// Override the course service URL
    pub fn with_course_url(mut self, url: impl Into<String>) -> Self {
        self.course_url = Some(url.into());
        self
    }

    /// Override the assessment service URL
    pub fn with_assessment_url(mut self, url: impl Into<String>) -> Self {
        self.assessment_url = Some(url.into());
        self
    }

    /// Override the dashboard service URL
    pub fn with_dashboard_url(mut self, url: impl Into<String>) -> Self {
        self.dashboard_url = Some(url.into());
        self
    }

    /// Override the user-profile service URL
    pub fn with_profile_url(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the dev bypass user id
    #[cfg(feature = "dev-headers")]
    pub fn with_dev_user_id(mut self, id: impl Into<String>) -> Self {
        self.dev_user_id = Some(id.into());
        self
    }

    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    fn service_root(&self, service_override: &Option<String>) -> String {
        service_override
            .as_deref()
            .unwrap_or(&self.gateway_url)
            .trim_end_matches('/')
            .to_string()
    }

    /// Identity service base (`<root>/api/v1/auth`)
    pub fn identity_base(&self) -> String {
        format!("{}/api/v1/auth", self.service_root(&self.identity_url))
    }

    /// Course service base (`<root>/api/v1`)
    pub fn course_base(&self) -> String {
        format!("{}/api/v1", self.service_root(&self.course_url))
    }

    /// Assessment service root (method paths carry their own prefixes)
    pub fn assessment_base(&self) -> String {
        self.service_root(&self.assessment_url)
    }

    /// Dashboard service root (method paths carry their own prefixes)
    pub fn dashboard_base(&self) -> String {
        self.service_root(&self.dashboard_url)
    }

    /// User-profile service base (`<root>/api/v1`)
    pub fn profile_base(&self) -> String {
        format!("{}/api/v1", self.service_root(&self.profile_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bases_share_the_gateway() {
        let config = ClientConfig::default();

        assert_eq!(config.identity_base(), "http://localhost:8181/api/v1/auth");
        assert_eq!(config.course_base(), "http://localhost:8181/api/v1");
        assert_eq!(config.assessment_base(), "http://localhost:8181");
        assert_eq!(config.dashboard_base(), "http://localhost:8181");
        assert_eq!(config.profile_base(), "http://localhost:8181/api/v1");
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = ClientConfig::new()
            .with_gateway_url("https://api.learnhub.dev/")
            .with_identity_url("https://id.learnhub.dev/");

        assert_eq!(config.identity_base(), "https://id.learnhub.dev/api/v1/auth");
        assert_eq!(config.course_base(), "https://api.learnhub.dev/api/v1");
    }

    #[test]
    fn test_timeout_builder() {
        let config = ClientConfig::new().with_timeout_secs(5);
        assert_eq!(config.timeout(), Duration::from_secs(5));
    }
}
