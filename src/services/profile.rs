//! User-profile service client
//!
//! ## Table of Contents
//! - **ProfileClient**: Profile read/update endpoints
//! - Wire types for the user-profile API

use crate::envelope::ApiResponse;
use crate::http::{Auth, HttpClient};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// User profile record
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileResponse {
    /// Profile id
    pub id: Option<String>,
    /// Owning account id
    pub user_id: Option<String>,
    /// Display name
    pub full_name: Option<String>,
    /// Avatar URL
    pub avatar_url: Option<String>,
    /// Short biography
    pub bio: Option<String>,
    /// Contact phone number
    pub phone: Option<String>,
    /// Date of birth
    pub date_of_birth: Option<String>,
    /// Postal address
    pub address: Option<String>,
    /// Class or cohort label
    pub class_name: Option<String>,
    /// Academic year label
    pub academic_year: Option<String>,
    /// Creation timestamp
    pub created_at: Option<String>,
    /// Last update timestamp
    pub updated_at: Option<String>,
}

/// Profile update payload; unset fields keep their current value
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileRequest {
    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    /// Avatar URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Short biography
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Contact phone number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Date of birth
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<String>,
    /// Postal address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Class or cohort label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
    /// Academic year label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub academic_year: Option<String>,
}

/// Client for the user-profile service
#[derive(Clone)]
pub struct ProfileClient {
    http: Arc<HttpClient>,
    base_url: String,
}

impl ProfileClient {
    pub(crate) fn new(http: Arc<HttpClient>, base_url: String) -> Self {
        Self { http, base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// The caller's profile
    pub async fn my_profile(&self) -> ApiResponse<UserProfileResponse> {
        self.http
            .get(self.url("/profile/me"), Auth::Bearer, "Failed to fetch profile")
            .await
    }

    /// Update the caller's profile
    pub async fn update_my_profile(&self, payload: &UserProfileRequest) -> ApiResponse<UserProfileResponse> {
        self.http
            .put(
                self.url("/profile/me"),
                payload,
                Auth::Bearer,
                "Failed to update profile",
            )
            .await
    }

    /// Another user's profile
    pub async fn profile(&self, user_id: &str) -> ApiResponse<UserProfileResponse> {
        self.http
            .get(
                self.url(&format!("/profile/{}", user_id)),
                Auth::Bearer,
                "Failed to fetch user profile",
            )
            .await
    }

    /// Batch-fetch profiles; ids go out as one comma-joined query value
    pub async fn profiles(&self, ids: &[&str]) -> ApiResponse<Vec<UserProfileResponse>> {
        self.http
            .get_query(
                self.url("/profile/users"),
                &[("ids", ids.join(","))],
                Auth::Bearer,
                "Failed to fetch user profiles",
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_payload_skips_unset_fields() {
        let payload = UserProfileRequest {
            full_name: Some("Alice Nguyen".to_string()),
            ..Default::default()
        };

        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["fullName"], "Alice Nguyen");
        assert!(json.get("bio").is_none());
    }

    #[test]
    fn test_profile_tolerates_sparse_payload() {
        let profile: UserProfileResponse =
            serde_json::from_str(r#"{"userId": "u-1", "fullName": "Alice"}"#).unwrap();

        assert_eq!(profile.user_id.as_deref(), Some("u-1"));
        assert!(profile.avatar_url.is_none());
    }
}
