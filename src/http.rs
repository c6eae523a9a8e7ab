//! HTTP plumbing shared by every service client
//!
//! ## Table of Contents
//! - **Auth**: Whether a request carries the session bearer
//! - **HttpClient**: reqwest wrapper with envelope normalization
//!
//! Every request funnels through [`HttpClient::execute`], which attaches
//! the bearer token, runs the 401 recovery path, and converts every outcome
//! (including transport failures) into an [`ApiResponse`]. Service methods
//! therefore never return `Err` and callers never need a catch block.

use crate::config::ClientConfig;
use crate::envelope::{ApiResponse, RawEnvelope};
use crate::error::{ClientError, Result};
use crate::interceptor::AuthInterceptor;
use reqwest::header::AUTHORIZATION;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Authorization mode for a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Attach the session bearer and run 401 recovery
    Bearer,
    /// No bearer, no recovery (login, register, refresh, health probes)
    Public,
}

/// HTTP client shared by the service clients
pub struct HttpClient {
    inner: reqwest::Client,
    interceptor: Arc<AuthInterceptor>,
    #[cfg(feature = "dev-headers")]
    dev_user_id: Option<String>,
}

impl HttpClient {
    /// Build the client from a config and a shared interceptor
    pub fn new(config: &ClientConfig, interceptor: Arc<AuthInterceptor>) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.timeout())
            .cookie_store(true)
            .build()
            .map_err(|e| ClientError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            inner,
            interceptor,
            #[cfg(feature = "dev-headers")]
            dev_user_id: config.dev_user_id.clone(),
        })
    }

    /// The interceptor (and through it the session store) behind this client
    pub fn interceptor(&self) -> &Arc<AuthInterceptor> {
        &self.interceptor
    }

    /// GET without query parameters
    pub async fn get<T: DeserializeOwned>(
        &self,
        url: String,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(self.inner.get(&url), auth, context).await
    }

    /// GET with a typed query struct
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        url: String,
        query: &Q,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(self.inner.get(&url).query(query), auth, context)
            .await
    }

    /// POST with a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(self.inner.post(&url).json(body), auth, context)
            .await
    }

    /// POST with an empty JSON body (lifecycle endpoints)
    pub async fn post_empty<T: DeserializeOwned>(
        &self,
        url: String,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(
            self.inner.post(&url).json(&serde_json::json!({})),
            auth,
            context,
        )
        .await
    }

    /// PUT with a JSON body
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(self.inner.put(&url).json(body), auth, context)
            .await
    }

    /// PATCH with a JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        url: String,
        body: &B,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(self.inner.patch(&url).json(body), auth, context)
            .await
    }

    /// DELETE
    pub async fn delete<T: DeserializeOwned>(
        &self,
        url: String,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        self.execute(self.inner.delete(&url), auth, context).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
        auth: Auth,
        context: &str,
    ) -> ApiResponse<T> {
        let req = self.decorate(req);
        // Clone before the bearer is attached so a retry can carry a fresh one.
        let retry = req.try_clone();

        let token = match auth {
            Auth::Bearer => self.interceptor.access_token().await,
            Auth::Public => None,
        };

        let response = match Self::attach_bearer(req, token.as_deref()).send().await {
            Ok(response) => response,
            Err(err) => return Self::transport_failure(err, context),
        };

        if response.status().as_u16() == 401 && auth == Auth::Bearer {
            if let Some(retry_req) = retry {
                if let Some(new_token) =
                    self.interceptor.recover_unauthorized(token.as_deref()).await
                {
                    debug!(context = context, "Retrying request with refreshed token");
                    return match Self::attach_bearer(retry_req, Some(&new_token)).send().await {
                        Ok(retried) => Self::read(retried, context).await,
                        Err(err) => Self::transport_failure(err, context),
                    };
                }
            }
        }

        Self::read(response, context).await
    }

    fn attach_bearer(req: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {}", token)),
            None => req,
        }
    }

    #[cfg(feature = "dev-headers")]
    fn decorate(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.dev_user_id {
            Some(id) => req.header("X-User-Id", id).header("X-Dev-User-Id", id),
            None => req,
        }
    }

    #[cfg(not(feature = "dev-headers"))]
    fn decorate(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req
    }

    async fn read<T: DeserializeOwned>(response: reqwest::Response, context: &str) -> ApiResponse<T> {
        let status = response.status();

        let text = match response.text().await {
            Ok(text) => text,
            Err(err) => {
                warn!(error = %err, context = context, "Failed to read response body");
                return ApiResponse::failure_with_status(context, status.as_u16());
            }
        };

        let payload = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        if status.is_success() {
            return RawEnvelope::normalize(status.as_u16(), payload).into_typed();
        }

        let message = payload
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .unwrap_or_else(|| context.to_string());

        warn!(status = status.as_u16(), context = context, "Request failed");
        ApiResponse::failure_with_status(message, status.as_u16())
    }

    fn transport_failure<T>(err: reqwest::Error, context: &str) -> ApiResponse<T> {
        let status = err.status().map(|s| s.as_u16()).unwrap_or(500);
        warn!(error = %err, context = context, "Transport failure");
        ApiResponse::failure_with_status(context, status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interceptor::TokenRefresher;
    use crate::token::{MemoryTokenStore, TokenPair, TokenStore};
    use async_trait::async_trait;
    use serde::Deserialize;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::thread;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Payload {
        id: i64,
    }

    /// Minimal scripted HTTP server: serves the given responses in order and
    /// captures the Authorization header of each request.
    struct ScriptedServer {
        base_url: String,
        auth_headers: Arc<Mutex<Vec<String>>>,
    }

    /// Read one request: headers, then as many body bytes as Content-Length
    /// announces.
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

    fn spawn_server(responses: Vec<(u16, &'static str)>) -> ScriptedServer {
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

                let reason = match status {
                    200 => "OK",
                    401 => "Unauthorized",
                    _ => "Status",
                };
                let response = format!(
                    "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    reason,
                    body.len(),
                    body
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        ScriptedServer {
            base_url,
            auth_headers,
        }
    }

    struct CountingRefresher {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl TokenRefresher for CountingRefresher {
        async fn refresh(&self, _refresh_token: &str) -> ApiResponse<TokenPair> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            ApiResponse::success(TokenPair {
                access_token: "access-2".to_string(),
                refresh_token: "refresh-2".to_string(),
                token_type: "Bearer".to_string(),
            })
        }
    }

    async fn client_with_session() -> (HttpClient, Arc<CountingRefresher>) {
        let store = Arc::new(MemoryTokenStore::new());
        store
            .save_tokens(&TokenPair {
                access_token: "access-1".to_string(),
                refresh_token: "refresh-1".to_string(),
                token_type: "Bearer".to_string(),
            })
            .await
            .unwrap();

        let interceptor = Arc::new(AuthInterceptor::new(store));
        let refresher = Arc::new(CountingRefresher {
            calls: AtomicUsize::new(0),
        });
        interceptor.set_refresher(refresher.clone());

        let client = HttpClient::new(&ClientConfig::default(), interceptor).unwrap();
        (client, refresher)
    }

    #[tokio::test]
    async fn test_connection_refused_resolves_to_failure_envelope() {
        // Grab a free port, then close the listener so nothing answers.
        let dead_url = {
            let listener = TcpListener::bind("127.0.0.1:0").unwrap();
            format!("http://{}/courses", listener.local_addr().unwrap())
        };

        let (client, _) = client_with_session().await;
        let resp: ApiResponse<Payload> = client
            .get(dead_url, Auth::Public, "Failed to fetch courses")
            .await;

        assert!(!resp.success);
        assert_eq!(resp.message, "Failed to fetch courses");
        assert!(resp.data.is_none());
        assert_eq!(resp.status, 500);
    }

    #[tokio::test]
    async fn test_unauthorized_refreshes_and_retries_once() {
        let server = spawn_server(vec![
            (401, "{}"),
            (200, r#"{"success": true, "message": "ok", "data": {"id": 1}}"#),
        ]);

        let (client, refresher) = client_with_session().await;
        let resp: ApiResponse<Payload> = client
            .get(format!("{}/thing", server.base_url), Auth::Bearer, "Failed to fetch thing")
            .await;

        assert!(resp.success);
        assert_eq!(resp.data, Some(Payload { id: 1 }));
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);

        let headers = server.auth_headers.lock().unwrap();
        assert_eq!(headers.as_slice(), ["Bearer access-1", "Bearer access-2"]);
    }

    #[tokio::test]
    async fn test_second_unauthorized_is_not_retried_again() {
        let server = spawn_server(vec![(401, "{}"), (401, "{}")]);

        let (client, refresher) = client_with_session().await;
        let resp: ApiResponse<Payload> = client
            .get(format!("{}/thing", server.base_url), Auth::Bearer, "Failed to fetch thing")
            .await;

        assert!(!resp.success);
        assert_eq!(resp.status, 401);
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        assert_eq!(server.auth_headers.lock().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_public_requests_skip_bearer_and_recovery() {
        let server = spawn_server(vec![(200, r#"{"id": 7}"#)]);

        let (client, refresher) = client_with_session().await;
        let resp: ApiResponse<Payload> = client
            .get(format!("{}/health", server.base_url), Auth::Public, "Failed to fetch health")
            .await;

        assert!(resp.success);
        assert_eq!(resp.data, Some(Payload { id: 7 }));
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
        assert_eq!(server.auth_headers.lock().unwrap().as_slice(), [""]);
    }

    #[tokio::test]
    async fn test_error_status_uses_server_message() {
        let server = spawn_server(vec![(404, r#"{"message": "Course not found"}"#)]);

        let (client, _) = client_with_session().await;
        let resp: ApiResponse<Payload> = client
            .get(format!("{}/courses/9", server.base_url), Auth::Public, "Failed to fetch course")
            .await;

        assert!(!resp.success);
        assert_eq!(resp.message, "Course not found");
        assert_eq!(resp.status, 404);
    }

    #[tokio::test]
    async fn test_error_status_without_body_uses_context() {
        let server = spawn_server(vec![(500, "")]);

        let (client, _) = client_with_session().await;
        let resp: ApiResponse<Payload> = client
            .get(format!("{}/courses", server.base_url), Auth::Public, "Failed to fetch courses")
            .await;

        assert!(!resp.success);
        assert_eq!(resp.message, "Failed to fetch courses");
        assert_eq!(resp.status, 500);
    }
}
