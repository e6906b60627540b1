//! Shared command setup and exit-code mapping

use crate::config::{load_config_or_default, WhispConfig};
use crate::core::export::ExportOptions;
use crate::core::render::MapOptions;
use crate::core::state::{FileStateStore, Session, SessionStatus, StateManager};
use crate::domain::{AnalysisError, Result, WhispError};
use chrono::Utc;
use std::sync::Arc;

pub const EXIT_OK: i32 = 0;
pub const EXIT_CONFIG: i32 = 2;
pub const EXIT_SESSION: i32 = 3;
pub const EXIT_CONNECTION: i32 = 4;
pub const EXIT_FATAL: i32 = 5;

/// Configuration and state opened for one command
pub struct CommandContext {
    pub config: WhispConfig,
    pub state: Arc<StateManager>,
}

impl CommandContext {
    /// Load configuration (defaults when the file is absent) and open the state file
    pub fn load(config_path: &str) -> Result<Self> {
        let config = load_config_or_default(config_path)?;
        let store = FileStateStore::open(&config.state.path)?;
        Ok(Self {
            state: Arc::new(StateManager::new_with_store(Arc::new(store))),
            config,
        })
    }

    pub fn map_options(&self) -> MapOptions {
        MapOptions {
            zoom: self.config.map.default_zoom,
            fill_opacity: self.config.map.fill_opacity,
            center: self.config.map.center,
        }
    }

    pub fn export_options(&self) -> ExportOptions {
        ExportOptions {
            producer_name: self.config.export.producer_name.clone(),
        }
    }

    /// Require an active session when `session.require_login` is set
    ///
    /// Returns the session when one is active, or `None` when login is not
    /// required and nobody is logged in.
    pub fn require_session(&self) -> Result<Option<Session>> {
        let status = self
            .state
            .check_session(Utc::now(), self.config.session.ttl())?;

        match status {
            SessionStatus::Active(session) => Ok(Some(session)),
            _ if !self.config.session.require_login => Ok(None),
            SessionStatus::Expired(_) => Err(WhispError::Session(
                "Session expired, please log in again with `whisp login`".to_string(),
            )),
            SessionStatus::LoggedOut => Err(WhispError::Session(
                "Not logged in, run `whisp login <username>` first".to_string(),
            )),
        }
    }
}

/// Process exit code for a failed command
pub fn exit_code(err: &WhispError) -> i32 {
    match err {
        WhispError::Configuration(_) | WhispError::Validation(_) => EXIT_CONFIG,
        WhispError::Session(_) => EXIT_SESSION,
        WhispError::Analysis(AnalysisError::InvalidFile(_)) => EXIT_CONFIG,
        WhispError::Analysis(
            AnalysisError::ConnectionFailed(_)
            | AnalysisError::HttpStatus { .. }
            | AnalysisError::InvalidResponse(_),
        ) => EXIT_CONNECTION,
        _ => EXIT_FATAL,
    }
}

/// Report a failed command and return its exit code
pub fn fail(err: &WhispError, what: &str) -> i32 {
    crate::log_error_with_context!(err, what);
    eprintln!("❌ {what}");
    eprintln!("   Error: {err}");
    exit_code(err)
}
