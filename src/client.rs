//! Platform facade wiring the service clients together
//!
//! ## Table of Contents
//! - **LearnHub**: One client per backend over a shared session
//!
//! The facade owns the session store, the auth interceptor, and one HTTP
//! client, and hands out the five domain clients built on top of them. A
//! token refreshed for any one client is immediately visible to the others.

use crate::config::ClientConfig;
use crate::envelope::ApiResponse;
use crate::error::Result;
use crate::http::HttpClient;
use crate::interceptor::{AuthInterceptor, SessionExpiryHook};
use crate::services::identity::LoginRequest;
use crate::services::{
    AssessmentClient, CourseClient, DashboardClient, IdentityClient, ProfileClient,
};
use crate::token::{MemoryTokenStore, StoredUser, TokenStore};
use std::sync::Arc;
use tracing::{info, warn};

/// Entry point to the LearnHub backends
pub struct LearnHub {
    store: Arc<dyn TokenStore>,
    interceptor: Arc<AuthInterceptor>,
    identity: IdentityClient,
    courses: CourseClient,
    assessment: AssessmentClient,
    dashboard: DashboardClient,
    profile: ProfileClient,
}

impl LearnHub {
    /// Build a client with an in-memory session store
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_store(config, Arc::new(MemoryTokenStore::new()))
    }

    /// Build a client over a caller-provided session store
    pub fn with_store(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        let interceptor = Arc::new(AuthInterceptor::new(store.clone()));
        let http = Arc::new(HttpClient::new(&config, interceptor.clone())?);

        let identity = IdentityClient::new(http.clone(), config.identity_base());
        interceptor.set_refresher(Arc::new(identity.clone()));

        let courses = CourseClient::new(http.clone(), config.course_base());
        let assessment = AssessmentClient::new(http.clone(), config.assessment_base());
        let dashboard = DashboardClient::new(http.clone(), config.dashboard_base());
        let profile = ProfileClient::new(http, config.profile_base());

        info!(store = store.name(), "LearnHub client ready");

        Ok(Self {
            store,
            interceptor,
            identity,
            courses,
            assessment,
            dashboard,
            profile,
        })
    }

    /// Identity service client
    pub fn identity(&self) -> &IdentityClient {
        &self.identity
    }

    /// Course service client
    pub fn courses(&self) -> &CourseClient {
        &self.courses
    }

    /// Assessment service client
    pub fn assessment(&self) -> &AssessmentClient {
        &self.assessment
    }

    /// Dashboard service client
    pub fn dashboard(&self) -> &DashboardClient {
        &self.dashboard
    }

    /// User-profile service client
    pub fn profile(&self) -> &ProfileClient {
        &self.profile
    }

    /// The session store backing this client
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Register a callback fired when the session expires irrecoverably
    pub fn on_session_expired(&self, hook: SessionExpiryHook) {
        self.interceptor.on_session_expired(hook);
    }

    /// Whether a session token is currently stored
    pub async fn is_authenticated(&self) -> bool {
        self.store.access_token().await.is_some()
    }

    /// The persisted user behind the current session, if any
    pub async fn session_user(&self) -> Option<StoredUser> {
        self.store.user().await
    }

    /// Authenticate, persist the token pair, then fetch and persist the
    /// account record behind the new session.
    pub async fn login(&self, username: &str, password: &str) -> ApiResponse<StoredUser> {
        let response = self
            .identity
            .login(&LoginRequest {
                username: username.to_string(),
                password: password.to_string(),
            })
            .await;

        let Some(tokens) = response.data else {
            return ApiResponse::failure_with_status(response.message, response.status);
        };

        if let Err(err) = self.store.save_tokens(&tokens).await {
            warn!(error = %err, "Failed to persist session tokens");
        }

        let me = self.identity.current_user().await;
        match me.data {
            Some(account) => {
                let user = StoredUser::from(account);
                if let Err(err) = self.store.save_user(&user).await {
                    warn!(error = %err, "Failed to persist session user");
                }
                info!(username = %user.username, "Logged in");
                ApiResponse::success(user)
            }
            // Tokens are saved either way; the caller still has a session.
            None => ApiResponse::failure_with_status(me.message, me.status),
        }
    }

    /// Drop the session: clears the stored token pair and user as one group
    pub async fn logout(&self) -> ApiResponse<()> {
        if let Err(err) = self.store.clear_auth().await {
            warn!(error = %err, "Failed to clear stored session");
            return ApiResponse::failure(err.to_string());
        }

        self.identity.logout().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::Mutex;
    use std::thread;

    fn read_request(stream: &mut std::net::TcpStream) -> Vec<u8> {
        let mut raw = Vec::new();
        let mut buf = [0u8; 4096];
        loop {
            match stream.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => {
                    raw.extend_from_slice(&buf[..n]);
                    if let Some(header_end) = raw.windows(4).position(|w| w == b"\r\n\r\n") {
                        let headers = String::from_utf8_lossy(&raw[..header_end]);
                        let body_len = headers
                            .lines()
                            .find(|l| l.to_ascii_lowercase().starts_with("content-length:"))
                            .and_then(|l| l.splitn(2, ':').nth(1))
                            .and_then(|v| v.trim().parse::<usize>().ok())
                            .unwrap_or(0);
                        if raw.len() >= header_end + 4 + body_len {
                            break;
                        }
                    }
                }
                Err(_) => break,
            }
        }
        raw
    }

    fn spawn_server(responses: Vec<(u16, &'static str)>) -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let base_url = format!("http://{}", listener.local_addr().unwrap());
        let auth_headers = Arc::new(Mutex::new(Vec::new()));
        let captured = auth_headers.clone();

        thread::spawn(move || {
            for (status, body) in responses {
                let (mut stream, _) = match listener.accept() {
                    Ok(conn) => conn,
                    Err(_) => return,
                };

                let raw = read_request(&mut stream);
                let request = String::from_utf8_lossy(&raw);
                let auth = request
                    .lines()
                    .find(|l| l.to_ascii_lowercase().starts_with("authorization:"))
                    .and_then(|l| l.splitn(2, ':').nth(1))
                    .map(|v| v.trim().to_string())
                    .unwrap_or_default();
                captured.lock().unwrap().push(auth);

                let response = format!(
                    "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        (base_url, auth_headers)
    }

    #[tokio::test]
    async fn test_login_persists_session_and_user() {
        let (base_url, auth_headers) = spawn_server(vec![
            (
                200,
                r#"{"success": true, "message": "Authenticated", "body": {"accessToken": "a-1", "refreshToken": "r-1", "tokenType": "Bearer"}}"#,
            ),
            (
                200,
                r#"{"data": {"id": "u-1", "username": "alice", "email": "alice@example.com", "roles": ["STUDENT"]}}"#,
            ),
        ]);

        let hub = LearnHub::new(ClientConfig::new().with_gateway_url(base_url)).unwrap();
        let resp = hub.login("alice", "secret").await;

        assert!(resp.success);
        assert_eq!(resp.data.as_ref().unwrap().username, "alice");
        assert!(hub.is_authenticated().await);
        assert_eq!(hub.session_user().await.unwrap().id, "u-1");
        assert_eq!(
            hub.store().access_token().await.as_deref(),
            Some("a-1")
        );

        let headers = auth_headers.lock().unwrap();
        assert_eq!(headers.as_slice(), ["", "Bearer a-1"]);
    }

    #[tokio::test]
    async fn test_failed_login_leaves_no_session() {
        let (base_url, _) = spawn_server(vec![(
            401,
            r#"{"message": "Invalid credentials"}"#,
        )]);

        let hub = LearnHub::new(ClientConfig::new().with_gateway_url(base_url)).unwrap();
        let resp = hub.login("alice", "wrong").await;

        assert!(!resp.success);
        assert_eq!(resp.message, "Invalid credentials");
        assert_eq!(resp.status, 401);
        assert!(!hub.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_logout_clears_the_session_group() {
        let store = Arc::new(MemoryTokenStore::new());
        store
            .save_tokens(&crate::token::TokenPair {
                access_token: "a-1".to_string(),
                refresh_token: "r-1".to_string(),
                token_type: "Bearer".to_string(),
            })
            .await
            .unwrap();

        let hub = LearnHub::with_store(ClientConfig::default(), store.clone()).unwrap();
        let resp = hub.logout().await;

        assert!(resp.success);
        assert_eq!(resp.message, "Logged out successfully");
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
        assert!(store.user().await.is_none());
    }
}
