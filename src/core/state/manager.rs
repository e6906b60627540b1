//! State manager for persisted analysis results, session and preferences
//!
//! All state lives in a [`StateStore`] under fixed keys. The stored analysis
//! is overwritten wholesale on every save; there is no history.

use super::preferences::{ComplianceType, Plan};
use super::session::{Session, SessionStatus};
use super::store::StateStore;
use crate::domain::{AnalysisPayload, Result};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use std::sync::Arc;

pub const KEY_LOGGED_IN: &str = "whispLoggedIn";
pub const KEY_LOGIN_TIME: &str = "whispLoginTime";
pub const KEY_USERNAME: &str = "whispUsername";
pub const KEY_COMPLIANCE: &str = "selectedCompliance";
pub const KEY_PLAN: &str = "selectedPlan";
pub const KEY_RESULTS: &str = "whispAnalysisResults";
pub const KEY_FILE_NAME: &str = "whispAnalysisFileName";

/// Keys written by older releases, removed on logout
pub const LEGACY_SESSION_KEYS: [&str; 3] = ["isAuthenticated", "loginTime", "username"];

const SESSION_KEYS: [&str; 3] = [KEY_LOGGED_IN, KEY_LOGIN_TIME, KEY_USERNAME];

/// Analysis result restored from state
#[derive(Debug, Clone, PartialEq)]
pub struct StoredAnalysis {
    pub payload: AnalysisPayload,
    /// Name of the uploaded file; absent when the payload came from a handoff URL
    pub file_name: Option<String>,
}

/// State manager over a pluggable store
pub struct StateManager {
    store: Arc<dyn StateStore + Send + Sync>,
}

impl StateManager {
    /// Create a new StateManager with a storage backend
    pub fn new_with_store(store: Arc<dyn StateStore + Send + Sync>) -> Self {
        Self { store }
    }

    /// Load the stored analysis result
    ///
    /// Returns `Ok(None)` when nothing is stored. A stored result that is
    /// not valid JSON is removed together with its file name, and a warning
    /// is logged; this is not an error.
    pub fn load_analysis(&self) -> Result<Option<StoredAnalysis>> {
        let Some(raw) = self.store.get(KEY_RESULTS)? else {
            return Ok(None);
        };

        match AnalysisPayload::from_json_str(&raw) {
            Ok(payload) => Ok(Some(StoredAnalysis {
                payload,
                file_name: self.store.get(KEY_FILE_NAME)?,
            })),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "Stored analysis results are corrupt, clearing them"
                );
                self.clear_analysis()?;
                Ok(None)
            }
        }
    }

    /// Persist an analysis result and the name of the file it came from
    pub fn save_analysis(&self, payload: &AnalysisPayload, file_name: &str) -> Result<()> {
        self.store.set(KEY_RESULTS, &payload.to_json_string()?)?;
        self.store.set(KEY_FILE_NAME, file_name)?;

        tracing::debug!(file_name = %file_name, "Saved analysis results");
        Ok(())
    }

    /// Persist a payload without touching the stored file name
    pub fn save_payload(&self, payload: &AnalysisPayload) -> Result<()> {
        self.store.set(KEY_RESULTS, &payload.to_json_string()?)
    }

    /// Remove the stored result and file name
    pub fn clear_analysis(&self) -> Result<()> {
        self.store.remove(KEY_RESULTS)?;
        self.store.remove(KEY_FILE_NAME)
    }

    /// Record a login at `now`
    pub fn login(&self, username: &str, now: DateTime<Utc>) -> Result<Session> {
        self.store.set(KEY_LOGGED_IN, "true")?;
        self.store
            .set(KEY_LOGIN_TIME, &now.to_rfc3339_opts(SecondsFormat::Millis, true))?;
        self.store.set(KEY_USERNAME, username)?;

        tracing::info!(username = %username, "Logged in");
        Ok(Session::new(username, now))
    }

    /// Check the stored session at `now`
    ///
    /// An expired session is cleared before `Expired` is returned.
    pub fn check_session(&self, now: DateTime<Utc>, ttl: Duration) -> Result<SessionStatus> {
        if self.store.get(KEY_LOGGED_IN)?.as_deref() != Some("true") {
            return Ok(SessionStatus::LoggedOut);
        }

        let login_time = self.store.get(KEY_LOGIN_TIME)?.and_then(|raw| {
            match DateTime::parse_from_rfc3339(&raw) {
                Ok(t) => Some(t.with_timezone(&Utc)),
                Err(e) => {
                    tracing::warn!(value = %raw, error = %e, "Unreadable login time");
                    None
                }
            }
        });

        let session = Session {
            username: self.store.get(KEY_USERNAME)?,
            login_time,
        };

        if session.is_expired(now, ttl) {
            tracing::info!(
                username = %session.display_name(),
                "Session expired, logging out"
            );
            self.remove_keys(&SESSION_KEYS)?;
            return Ok(SessionStatus::Expired(session));
        }

        Ok(SessionStatus::Active(session))
    }

    /// Remove the session, including keys from older releases
    pub fn logout(&self) -> Result<()> {
        self.remove_keys(&SESSION_KEYS)?;
        self.remove_keys(&LEGACY_SESSION_KEYS)?;
        tracing::info!("Logged out");
        Ok(())
    }

    pub fn compliance_type(&self) -> Result<Option<ComplianceType>> {
        self.preference(KEY_COMPLIANCE)
    }

    pub fn set_compliance_type(&self, compliance: ComplianceType) -> Result<()> {
        self.store.set(KEY_COMPLIANCE, compliance.as_str())
    }

    pub fn plan(&self) -> Result<Option<Plan>> {
        self.preference(KEY_PLAN)
    }

    pub fn set_plan(&self, plan: Plan) -> Result<()> {
        self.store.set(KEY_PLAN, plan.as_str())
    }

    // Unparseable stored preferences read as unset.
    fn preference<T: std::str::FromStr>(&self, key: &str) -> Result<Option<T>> {
        Ok(self.store.get(key)?.and_then(|raw| raw.parse().ok()))
    }

    fn remove_keys(&self, keys: &[&str]) -> Result<()> {
        for key in keys {
            self.store.remove(key)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::store::MemoryStateStore;
    use chrono::TimeZone;
    use serde_json::json;

    fn manager() -> (Arc<MemoryStateStore>, StateManager) {
        let store = Arc::new(MemoryStateStore::new());
        let manager = StateManager::new_with_store(store.clone());
        (store, manager)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_analysis_round_trip() {
        let (_, manager) = manager();
        assert_eq!(manager.load_analysis().unwrap(), None);

        let payload = AnalysisPayload::new(json!({"data": {"features": []}}));
        manager.save_analysis(&payload, "plots.geojson").unwrap();

        let stored = manager.load_analysis().unwrap().unwrap();
        assert_eq!(stored.payload, payload);
        assert_eq!(stored.file_name.as_deref(), Some("plots.geojson"));
    }

    #[test]
    fn test_corrupt_results_are_removed() {
        let (store, manager) = manager();
        store.set(KEY_RESULTS, "{broken").unwrap();
        store.set(KEY_FILE_NAME, "plots.json").unwrap();

        assert_eq!(manager.load_analysis().unwrap(), None);
        assert_eq!(store.get(KEY_RESULTS).unwrap(), None);
        assert_eq!(store.get(KEY_FILE_NAME).unwrap(), None);
    }

    #[test]
    fn test_save_payload_keeps_file_name() {
        let (store, manager) = manager();
        manager
            .save_analysis(&AnalysisPayload::new(json!([])), "a.json")
            .unwrap();
        manager
            .save_payload(&AnalysisPayload::new(json!([{"plot_id": "X"}])))
            .unwrap();

        assert_eq!(store.get(KEY_FILE_NAME).unwrap().as_deref(), Some("a.json"));
        assert_eq!(
            store.get(KEY_RESULTS).unwrap().as_deref(),
            Some(r#"[{"plot_id":"X"}]"#)
        );
    }

    #[test]
    fn test_login_and_active_session() {
        let (store, manager) = manager();
        manager.login("ana", noon()).unwrap();

        assert_eq!(
            store.get(KEY_LOGIN_TIME).unwrap().as_deref(),
            Some("2025-06-01T12:00:00.000Z")
        );

        let status = manager
            .check_session(noon() + Duration::hours(2), Duration::hours(24))
            .unwrap();
        match status {
            SessionStatus::Active(session) => assert_eq!(session.display_name(), "ana"),
            other => panic!("expected active session, got {other:?}"),
        }
    }

    #[test]
    fn test_expired_session_is_cleared() {
        let (store, manager) = manager();
        manager.login("ana", noon()).unwrap();

        let status = manager
            .check_session(noon() + Duration::hours(24), Duration::hours(24))
            .unwrap();
        assert!(matches!(status, SessionStatus::Expired(_)));
        assert_eq!(store.get(KEY_LOGGED_IN).unwrap(), None);
        assert_eq!(store.get(KEY_USERNAME).unwrap(), None);
    }

    #[test]
    fn test_logged_in_flag_must_be_true() {
        let (store, manager) = manager();
        store.set(KEY_LOGGED_IN, "yes").unwrap();
        assert_eq!(
            manager.check_session(noon(), Duration::hours(24)).unwrap(),
            SessionStatus::LoggedOut
        );
    }

    #[test]
    fn test_unreadable_login_time_keeps_session_active() {
        let (store, manager) = manager();
        store.set(KEY_LOGGED_IN, "true").unwrap();
        store.set(KEY_LOGIN_TIME, "yesterday").unwrap();

        let status = manager
            .check_session(noon() + Duration::days(30), Duration::hours(24))
            .unwrap();
        assert!(status.is_active());
    }

    #[test]
    fn test_logout_removes_legacy_keys() {
        let (store, manager) = manager();
        manager.login("ana", noon()).unwrap();
        store.set("isAuthenticated", "true").unwrap();
        store.set("loginTime", "x").unwrap();
        store.set("username", "old").unwrap();
        manager.set_plan(Plan::Pro).unwrap();

        manager.logout().unwrap();

        assert_eq!(store.keys().unwrap(), vec![KEY_PLAN]);
    }

    #[test]
    fn test_preferences() {
        let (store, manager) = manager();
        assert_eq!(manager.compliance_type().unwrap(), None);

        manager
            .set_compliance_type(ComplianceType::RainforestAlliance)
            .unwrap();
        manager.set_plan(Plan::Ultra).unwrap();

        assert_eq!(
            store.get(KEY_COMPLIANCE).unwrap().as_deref(),
            Some("Rainforest Alliance")
        );
        assert_eq!(
            manager.compliance_type().unwrap(),
            Some(ComplianceType::RainforestAlliance)
        );
        assert_eq!(manager.plan().unwrap(), Some(Plan::Ultra));
    }
}
