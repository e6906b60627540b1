// Persisted client state: analysis results, session and preferences

pub mod manager;
pub mod preferences;
pub mod session;
pub mod store;

pub use manager::{StateManager, StoredAnalysis};
pub use preferences::{ComplianceType, Plan};
pub use session::{is_expired, Session, SessionStatus};
pub use store::{FileStateStore, MemoryStateStore, StateStore};
