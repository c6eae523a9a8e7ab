//! Refresh-on-401 auth interceptor
//!
//! ## Table of Contents
//! - **TokenRefresher**: Trait for exchanging a refresh token for a new pair
//! - **AuthInterceptor**: Process-wide 401 recovery state machine
//!
//! Per pending request the flow is: `Sending` → 2xx done, or on a first 401
//! `Refreshing` → `Retrying` (refresh succeeded, original request re-issued
//! once with the new token) or `Failed` (auth cleared, expiry hook fired).
//! A request is retried at most once; a second 401 is returned as-is.
//!
//! Concurrent 401s share a single in-flight refresh: whoever wins the gate
//! refreshes, later waiters observe the rotated token and reuse it.

use crate::envelope::ApiResponse;
use crate::token::{TokenPair, TokenStore};
use async_trait::async_trait;
use std::sync::{Arc, Mutex, OnceLock};
use tracing::{info, warn};

/// Callback invoked when the session cannot be recovered.
///
/// The browser original redirected to the login page here; a library leaves
/// navigation to the host application.
pub type SessionExpiryHook = Box<dyn Fn() + Send + Sync>;

/// Trait for exchanging a refresh token for a new token pair.
///
/// Implemented by the identity client. The exchange itself must go out as a
/// public request so a rejected refresh can never re-enter the 401 path.
#[async_trait]
pub trait TokenRefresher: Send + Sync {
    /// Exchange the refresh token for a fresh pair
    async fn refresh(&self, refresh_token: &str) -> ApiResponse<TokenPair>;
}

/// Process-wide 401 recovery state machine
pub struct AuthInterceptor {
    store: Arc<dyn TokenStore>,
    refresher: OnceLock<Arc<dyn TokenRefresher>>,
    refresh_gate: tokio::sync::Mutex<()>,
    expiry_hook: Mutex<Option<SessionExpiryHook>>,
}

impl AuthInterceptor {
    /// Create an interceptor over a session store
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        Self {
            store,
            refresher: OnceLock::new(),
            refresh_gate: tokio::sync::Mutex::new(()),
            expiry_hook: Mutex::new(None),
        }
    }

    /// Wire in the refresher. Only the first call takes effect.
    pub fn set_refresher(&self, refresher: Arc<dyn TokenRefresher>) {
        let _ = self.refresher.set(refresher);
    }

    /// Register a callback fired when the session expires irrecoverably
    pub fn on_session_expired(&self, hook: SessionExpiryHook) {
        if let Ok(mut slot) = self.expiry_hook.lock() {
            *slot = Some(hook);
        }
    }

    /// The session store backing this interceptor
    pub fn store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Current access token for outgoing requests
    pub async fn access_token(&self) -> Option<String> {
        self.store.access_token().await
    }

    /// Attempt to recover from a 401 on an authorized request.
    ///
    /// Returns a token to retry the request with, or `None` when the
    /// session is gone (the caller then surfaces the original 401). The
    /// `rejected_token` is the bearer the failed request carried, used to
    /// detect a refresh that already happened on another task.
    pub async fn recover_unauthorized(&self, rejected_token: Option<&str>) -> Option<String> {
        let _gate = self.refresh_gate.lock().await;

        // Another task may have rotated the token while we waited.
        if let Some(current) = self.store.access_token().await {
            if Some(current.as_str()) != rejected_token {
                return Some(current);
            }
        }

        let Some(refresh_token) = self.store.refresh_token().await else {
            self.expire_session("no refresh token stored").await;
            return None;
        };

        let Some(refresher) = self.refresher.get() else {
            self.expire_session("no token refresher configured").await;
            return None;
        };

        let response = refresher.refresh(&refresh_token).await;
        match response.data {
            Some(pair) if response.success => {
                if let Err(err) = self.store.save_tokens(&pair).await {
                    warn!(error = %err, "Failed to persist refreshed tokens");
                }
                info!("Access token refreshed");
                Some(pair.access_token)
            }
            _ => {
                self.expire_session(&response.message).await;
                None
            }
        }
    }

    async fn expire_session(&self, reason: &str) {
        warn!(reason = %reason, "Session expired, clearing stored auth");

        if let Err(err) = self.store.clear_auth().await {
            warn!(error = %err, "Failed to clear stored auth");
        }

        if let Ok(slot) = self.expiry_hook.lock() {
            if let Some(hook) = slot.as_ref() {
                hook();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token::MemoryTokenStore;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRefresher {
        calls: AtomicUsize,
        outcome: ApiResponse<TokenPair>,
    }

    impl CountingRefresher {
        fn succeeding(access: &str) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: ApiResponse::success(TokenPair {
                    access_token: access.to_string(),
                    refresh_token: "refresh-2".to_string(),
                    token_type: "Bearer".to_string(),
                }),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                outcome: ApiResponse::failure_with_status("Invalid refresh token", 401),
            }
        }
    }

    #[async_trait]
    impl TokenRefresher for CountingRefresher {
        async fn refresh(&self, _refresh_token: &str) -> ApiResponse<TokenPair> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }
    }

    async fn seeded_store() -> Arc<MemoryTokenStore> {
        let store = Arc::new(MemoryTokenStore::new());
        store
            .save_tokens(&TokenPair {
                access_token: "access-1".to_string(),
                refresh_token: "refresh-1".to_string(),
                token_type: "Bearer".to_string(),
            })
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_refresh_rotates_tokens() {
        let store = seeded_store().await;
        let interceptor = AuthInterceptor::new(store.clone());
        let refresher = Arc::new(CountingRefresher::succeeding("access-2"));
        interceptor.set_refresher(refresher.clone());

        let token = interceptor.recover_unauthorized(Some("access-1")).await;

        assert_eq!(token.as_deref(), Some("access-2"));
        assert_eq!(store.access_token().await.as_deref(), Some("access-2"));
        assert_eq!(store.refresh_token().await.as_deref(), Some("refresh-2"));
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_already_rotated_token_is_reused() {
        let store = seeded_store().await;
        let interceptor = AuthInterceptor::new(store.clone());
        let refresher = Arc::new(CountingRefresher::succeeding("access-9"));
        interceptor.set_refresher(refresher.clone());

        // The 401 carried a stale bearer; the store already holds a newer one.
        let token = interceptor.recover_unauthorized(Some("access-0")).await;

        assert_eq!(token.as_deref(), Some("access-1"));
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_refresh_token_clears_group() {
        let store = Arc::new(MemoryTokenStore::new());
        store
            .save_user(&crate::token::StoredUser {
                id: "u-1".to_string(),
                username: "alice".to_string(),
                email: "a@example.com".to_string(),
                roles: vec![],
            })
            .await
            .unwrap();

        let interceptor = AuthInterceptor::new(store.clone());
        interceptor.set_refresher(Arc::new(CountingRefresher::succeeding("unused")));

        let expired = Arc::new(AtomicUsize::new(0));
        let observed = expired.clone();
        interceptor.on_session_expired(Box::new(move || {
            observed.fetch_add(1, Ordering::SeqCst);
        }));

        let token = interceptor.recover_unauthorized(None).await;

        assert!(token.is_none());
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
        assert!(store.user().await.is_none());
        assert_eq!(expired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_refresh_failure_clears_group() {
        let store = seeded_store().await;
        let interceptor = AuthInterceptor::new(store.clone());
        let refresher = Arc::new(CountingRefresher::failing());
        interceptor.set_refresher(refresher.clone());

        let token = interceptor.recover_unauthorized(Some("access-1")).await;

        assert!(token.is_none());
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
        assert!(store.access_token().await.is_none());
        assert!(store.refresh_token().await.is_none());
    }

    #[tokio::test]
    async fn test_concurrent_recoveries_share_one_refresh() {
        let store = seeded_store().await;
        let interceptor = Arc::new(AuthInterceptor::new(store.clone()));
        let refresher = Arc::new(CountingRefresher::succeeding("access-2"));
        interceptor.set_refresher(refresher.clone());

        let mut handles = Vec::new();
        for _ in 0..4 {
            let interceptor = interceptor.clone();
            handles.push(tokio::spawn(async move {
                interceptor.recover_unauthorized(Some("access-1")).await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().as_deref(), Some("access-2"));
        }
        assert_eq!(refresher.calls.load(Ordering::SeqCst), 1);
    }
}
