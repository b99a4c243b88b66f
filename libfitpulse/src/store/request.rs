//! Remote request lifecycle
//!
//! Every remote-backed slice wraps its payload in a [`RemoteRequestState`]:
//!
//! ```text
//! Idle ──begin──▶ Pending ──succeed──▶ Succeeded
//!                    │                     │
//!                    └──fail──▶ Failed ◀───┘ (begin again from either)
//! ```
//!
//! Transitions consume the old value and return the new one, matching the
//! reducer's replace-on-write model. There is no request identity: if two
//! requests are in flight, whichever completion is applied last wins.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Idle => "idle",
            RequestStatus::Pending => "pending",
            RequestStatus::Succeeded => "succeeded",
            RequestStatus::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status, payload and error of one remote fetch
///
/// `error` is `Some` only while `status` is `Failed`. Only `data` is
/// serialized; a rehydrated request always starts `Idle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteRequestState<T> {
    #[serde(skip)]
    status: RequestStatus,
    data: T,
    #[serde(skip)]
    error: Option<String>,
}

impl<T: Default> Default for RemoteRequestState<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> RemoteRequestState<T> {
    pub fn new(data: T) -> Self {
        Self {
            status: RequestStatus::Idle,
            data,
            error: None,
        }
    }

    /// A fetch was issued: Pending, error cleared, data kept
    pub fn begin(self) -> Self {
        Self {
            status: RequestStatus::Pending,
            error: None,
            ..self
        }
    }

    /// The fetch resolved: Succeeded with the new payload
    pub fn succeed(self, data: T) -> Self {
        Self {
            status: RequestStatus::Succeeded,
            data,
            error: None,
        }
    }

    /// The fetch resolved with a payload derived from the previous one
    pub fn succeed_with(self, update: impl FnOnce(T) -> T) -> Self {
        Self {
            status: RequestStatus::Succeeded,
            data: update(self.data),
            error: None,
        }
    }

    /// The fetch failed: Failed with the message, data untouched
    pub fn fail(self, error: impl Into<String>) -> Self {
        Self {
            status: RequestStatus::Failed,
            error: Some(error.into()),
            ..self
        }
    }

    /// Back to Idle without touching data
    pub fn reset(self) -> Self {
        Self {
            status: RequestStatus::Idle,
            error: None,
            ..self
        }
    }

    /// Rewrite the payload without changing status or error
    pub fn map_data(self, update: impl FnOnce(T) -> T) -> Self {
        Self {
            data: update(self.data),
            ..self
        }
    }

    pub fn status(&self) -> RequestStatus {
        self.status
    }

    pub fn data(&self) -> &T {
        &self.data
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_idle(&self) -> bool {
        self.status == RequestStatus::Idle
    }

    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Pending
    }
}

impl<T> RemoteRequestState<Vec<T>> {
    /// Pending while earlier results are still on screen
    pub fn is_refreshing(&self) -> bool {
        self.is_loading() && !self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_idle_without_error() {
        let state: RemoteRequestState<Vec<u32>> = RemoteRequestState::default();
        assert_eq!(state.status(), RequestStatus::Idle);
        assert!(state.data().is_empty());
        assert!(state.error().is_none());
    }

    #[test]
    fn test_begin_keeps_data_and_clears_error() {
        let state = RemoteRequestState::new(vec![1, 2])
            .begin()
            .fail("boom")
            .begin();
        assert_eq!(state.status(), RequestStatus::Pending);
        assert_eq!(state.data(), &vec![1, 2]);
        assert!(state.error().is_none());
        assert!(state.is_refreshing());
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let before = RemoteRequestState::new(Vec::new()).begin().succeed(vec![7, 8, 9]);
        let after = before.clone().begin().fail("X");

        assert_eq!(after.status(), RequestStatus::Failed);
        assert_eq!(after.error(), Some("X"));
        assert_eq!(after.data(), before.data());
    }

    #[test]
    fn test_success_replaces_data_and_clears_error() {
        let state = RemoteRequestState::new(vec![1])
            .begin()
            .fail("first")
            .begin()
            .succeed(vec![2, 3]);
        assert_eq!(state.status(), RequestStatus::Succeeded);
        assert_eq!(state.data(), &vec![2, 3]);
        assert!(state.error().is_none());
    }

    #[test]
    fn test_fail_without_begin_is_allowed() {
        // validation failures land directly on the slice
        let state: RemoteRequestState<Vec<u8>> = RemoteRequestState::default().fail("bad input");
        assert_eq!(state.status(), RequestStatus::Failed);
        assert_eq!(state.error(), Some("bad input"));
    }

    #[test]
    fn test_initial_load_is_not_refreshing() {
        let state: RemoteRequestState<Vec<u8>> = RemoteRequestState::default().begin();
        assert!(state.is_loading());
        assert!(!state.is_refreshing());
    }

    #[test]
    fn test_last_applied_completion_wins() {
        let state: RemoteRequestState<Vec<&str>> = RemoteRequestState::default().begin().begin();
        let state = state.succeed(vec!["newer"]).succeed(vec!["older"]);
        assert_eq!(state.data(), &vec!["older"]);
    }

    #[test]
    fn test_serialization_drops_status_and_error() {
        let state = RemoteRequestState::new(vec![1, 2]).begin().fail("offline");
        let json = serde_json::to_value(&state).unwrap();
        assert_eq!(json, serde_json::json!({ "data": [1, 2] }));

        let restored: RemoteRequestState<Vec<i32>> = serde_json::from_value(json).unwrap();
        assert!(restored.is_idle());
        assert!(restored.error().is_none());
        assert_eq!(restored.data(), &vec![1, 2]);
    }
}
