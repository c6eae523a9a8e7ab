//! Graceful-degradation fallback resolver
//!
//! ## Table of Contents
//! - **resolve**: Substitute a static value when a live call yields nothing
//! - **resolve_with**: Same, with a caller-supplied emptiness predicate
//!
//! Deliberate policy, not an error path: when a backend is offline or
//! answers without usable data, the caller's static substitute is served as
//! a *successful* result so the UI layer never sees the outage. Live data is
//! never overridden by the fallback.

use crate::envelope::ApiResponse;
use std::future::Future;
use tracing::warn;

/// Run a live call and substitute `fallback` when it fails or returns no
/// data.
///
/// The substitution is reported as success. A successful live result with
/// data is returned unchanged.
pub async fn resolve<T, F, Fut>(live: F, fallback: T) -> ApiResponse<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResponse<T>>,
{
    resolve_with(live, fallback, |_| false).await
}

/// Run a live call and substitute `fallback` when it fails, returns no
/// data, or returns data the predicate classifies as empty.
///
/// The predicate covers payloads that are present but unusable, an empty
/// course list being the typical case.
pub async fn resolve_with<T, F, Fut, P>(live: F, fallback: T, considered_empty: P) -> ApiResponse<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResponse<T>>,
    P: Fn(&T) -> bool,
{
    let response = live().await;

    match &response.data {
        Some(data) if response.success && !considered_empty(data) => response,
        _ => {
            warn!(
                status = response.status,
                message = %response.message,
                "Live call yielded no usable data, serving fallback"
            );
            ApiResponse::success(fallback)
        }
    }
}

/// List variant of [`resolve`]: an empty `Vec` also triggers the fallback.
pub async fn resolve_list<T, F, Fut>(live: F, fallback: Vec<T>) -> ApiResponse<Vec<T>>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = ApiResponse<Vec<T>>>,
{
    resolve_with(live, fallback, |items: &Vec<T>| items.is_empty()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_failed_live_call_yields_fallback() {
        let resp = resolve(
            || async { ApiResponse::<Vec<i32>>::failure("backend offline") },
            vec![1, 2, 3],
        )
        .await;

        assert!(resp.success);
        assert_eq!(resp.data, Some(vec![1, 2, 3]));
        assert_eq!(resp.status, 200);
    }

    #[tokio::test]
    async fn test_missing_data_yields_fallback() {
        let resp = resolve(
            || async {
                ApiResponse::<i32> {
                    success: true,
                    message: "Success".to_string(),
                    data: None,
                    status: 200,
                }
            },
            42,
        )
        .await;

        assert_eq!(resp.data, Some(42));
    }

    #[tokio::test]
    async fn test_live_data_is_never_overridden() {
        let resp = resolve(|| async { ApiResponse::success(vec![9]) }, vec![1, 2, 3]).await;

        assert!(resp.success);
        assert_eq!(resp.data, Some(vec![9]));
    }

    #[tokio::test]
    async fn test_empty_list_triggers_list_fallback() {
        let resp = resolve_list(
            || async { ApiResponse::success(Vec::<i32>::new()) },
            vec![7],
        )
        .await;

        assert_eq!(resp.data, Some(vec![7]));
    }

    #[tokio::test]
    async fn test_non_empty_list_passes_through() {
        let resp = resolve_list(|| async { ApiResponse::success(vec![5]) }, vec![7]).await;

        assert_eq!(resp.data, Some(vec![5]));
    }
}
