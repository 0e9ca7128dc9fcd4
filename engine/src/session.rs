//! Authenticated session and synchronization lifecycle.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Error shown when a synchronization run fails as a whole.
pub const SYNC_FAILED_MESSAGE: &str = "Failed to sync user data";

/// Observable phase of the most recent synchronization.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SyncPhase {
    #[default]
    Idle,
    InProgress,
    Completed,
    Failed,
}

/// The signed-in principal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub email: Option<String>,
    pub name: Option<String>,
    pub created_at: Option<String>,
}

impl SessionUser {
    /// Normalize an account object from the auth provider.
    ///
    /// The id may arrive as `id` or `$id`, the creation time as
    /// `$createdAt` or `createdAt`.
    pub fn from_account(account: &Value) -> Self {
        let text = |key: &str| account.get(key).and_then(Value::as_str).map(str::to_string);

        Self {
            id: text("id").or_else(|| text("$id")).unwrap_or_default(),
            email: text("email"),
            name: text("name"),
            created_at: text("$createdAt").or_else(|| text("createdAt")),
        }
    }
}

/// Auth and sync status for the UI.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub user: Option<SessionUser>,
    pub loading: bool,
    pub error: Option<String>,
    pub syncing: bool,
    pub data_loaded: bool,
    pub phase: SyncPhase,
}

impl SessionState {
    pub fn set_user(&mut self, user: SessionUser) {
        self.user = Some(user);
        self.loading = false;
        self.error = None;
    }

    /// Forget the user and everything loaded for them.
    pub fn clear_user(&mut self) {
        *self = Self::default();
    }

    pub fn set_loading(&mut self, loading: bool) {
        self.loading = loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error = Some(error.into());
        self.loading = false;
    }

    pub fn begin_sync(&mut self) {
        self.syncing = true;
        self.phase = SyncPhase::InProgress;
    }

    pub fn finish_sync(&mut self, success: bool) {
        self.syncing = false;
        if success {
            self.data_loaded = true;
            self.phase = SyncPhase::Completed;
        } else {
            self.error = Some(SYNC_FAILED_MESSAGE.to_string());
            self.phase = SyncPhase::Failed;
        }
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    /// Id of the signed-in user, if any.
    pub fn user_id(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_account_reads_provider_keys() {
        let user = SessionUser::from_account(&json!({
            "$id": "u-42",
            "email": "owner@shop.test",
            "name": "Owner",
            "$createdAt": "2024-01-01T00:00:00.000Z"
        }));
        assert_eq!(user.id, "u-42");
        assert_eq!(user.email.as_deref(), Some("owner@shop.test"));
        assert_eq!(user.created_at.as_deref(), Some("2024-01-01T00:00:00.000Z"));

        let user = SessionUser::from_account(&json!({"id": "u-1", "$id": "ignored"}));
        assert_eq!(user.id, "u-1");
        assert_eq!(user.name, None);
    }

    #[test]
    fn sync_lifecycle() {
        let mut session = SessionState::default();
        assert_eq!(session.phase(), SyncPhase::Idle);

        session.begin_sync();
        assert!(session.syncing);
        assert_eq!(session.phase(), SyncPhase::InProgress);

        session.finish_sync(true);
        assert!(!session.syncing);
        assert!(session.data_loaded);
        assert_eq!(session.phase(), SyncPhase::Completed);
        assert_eq!(session.error, None);
    }

    #[test]
    fn failed_sync_sets_error() {
        let mut session = SessionState::default();
        session.set_loading(true);
        session.begin_sync();
        session.finish_sync(false);

        assert!(!session.syncing);
        assert!(!session.data_loaded);
        assert_eq!(session.phase(), SyncPhase::Failed);
        assert_eq!(session.error.as_deref(), Some(SYNC_FAILED_MESSAGE));
    }

    #[test]
    fn set_user_clears_error_and_loading() {
        let mut session = SessionState::default();
        session.set_loading(true);
        session.set_error("bad password");
        assert!(!session.loading);

        session.set_loading(true);
        session.set_user(SessionUser {
            id: "u-1".into(),
            ..Default::default()
        });
        assert!(!session.loading);
        assert_eq!(session.error, None);
        assert_eq!(session.user_id(), Some("u-1"));

        session.clear_user();
        assert_eq!(session, SessionState::default());
    }
}
