//! Identity service client
//!
//! ## Table of Contents
//! - **IdentityClient**: Authentication endpoints
//! - Request/response types for the identity API
//!
//! Login, register, and refresh are public requests; everything else rides
//! the session bearer. The client also acts as the [`TokenRefresher`] for
//! the auth interceptor, exchanging the stored refresh token for a new pair.

use crate::envelope::ApiResponse;
use crate::http::{Auth, HttpClient};
use crate::interceptor::TokenRefresher;
use crate::token::TokenPair;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Registration payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Plain password, hashed server-side
    pub password: String,
    /// Requested roles (`STUDENT`, `TEACHER`, `ADMIN`)
    pub roles: Vec<String>,
}

/// Login payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Login name
    pub username: String,
    /// Plain password
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct RefreshTokenRequest<'a> {
    refresh_token: &'a str,
}

/// Account record returned by `/me`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User id
    pub id: String,
    /// Login name
    pub username: String,
    /// Email address
    pub email: String,
    /// Assigned roles
    #[serde(default)]
    pub roles: Vec<String>,
    /// Whether the account is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Creation timestamp as sent by the backend
    pub created_at: Option<String>,
}

/// Client for the identity service
#[derive(Clone)]
pub struct IdentityClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl IdentityClient {
    pub(crate) fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Register a new account; a successful registration already returns a
    /// token pair
    pub async fn register(&self, payload: &RegisterRequest) -> ApiResponse<TokenPair> {
        self.http
            .post(
                self.url("/register"),
                payload,
                Auth::Public,
                "Failed to register user",
            )
            .await
    }

    /// Authenticate with username and password
    pub async fn login(&self, payload: &LoginRequest) -> ApiResponse<TokenPair> {
        self.http
            .post(self.url("/login"), payload, Auth::Public, "Failed to login")
            .await
    }

    /// Exchange a refresh token for a new pair
    pub async fn refresh_token(&self, refresh_token: &str) -> ApiResponse<TokenPair> {
        self.http
            .post(
                self.url("/refresh"),
                &RefreshTokenRequest { refresh_token },
                Auth::Public,
                "Failed to refresh token",
            )
            .await
    }

    /// Fetch the account behind the current session
    pub async fn current_user(&self) -> ApiResponse<UserResponse> {
        self.http
            .get(self.url("/me"), Auth::Bearer, "Failed to get current user")
            .await
    }

    /// Client-side logout. The tokens are stateless JWTs, so no server call
    /// is made; the facade clears the stored session group.
    pub async fn logout(&self) -> ApiResponse<()> {
        ApiResponse {
            success: true,
            message: "Logged out successfully".to_string(),
            data: None,
            status: 200,
        }
    }
}

impl From<UserResponse> for crate::token::StoredUser {
    fn from(user: UserResponse) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            roles: user.roles,
        }
    }
}

#[async_trait]
impl TokenRefresher for IdentityClient {
    async fn refresh(&self, refresh_token: &str) -> ApiResponse<TokenPair> {
        self.refresh_token(refresh_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_wire_format() {
        let payload = RegisterRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "secret".to_string(),
            roles: vec!["STUDENT".to_string()],
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["username"], "alice");
        assert_eq!(json["roles"][0], "STUDENT");
    }

    #[test]
    fn test_refresh_request_uses_camel_case() {
        let json = serde_json::to_value(RefreshTokenRequest {
            refresh_token: "r-1",
        })
        .unwrap();
        assert_eq!(json["refreshToken"], "r-1");
    }

    #[test]
    fn test_user_response_tolerates_missing_fields() {
        let user: UserResponse = serde_json::from_str(
            r#"{"id": "u-1", "username": "alice", "email": "a@example.com"}"#,
        )
        .unwrap();

        assert!(user.roles.is_empty());
        assert!(!user.enabled);
        assert!(user.created_at.is_none());
    }
}
