//! Login session
//!
//! A session is a username plus the instant of login. Whether it has
//! expired is a pure function of the current time, the login time and the
//! time-to-live, so callers decide what "now" is.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

pub const DEFAULT_TTL_HOURS: u32 = 24;

/// Username shown when none was stored
pub const ANONYMOUS_USER: &str = "Anonymous User";

/// True once `ttl` or more has passed since `login_time`
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use whisp::core::state::session::is_expired;
///
/// let login = Utc.with_ymd_and_hms(2025, 1, 1, 8, 0, 0).unwrap();
/// let ttl = Duration::hours(24);
/// assert!(!is_expired(login + Duration::hours(23), login, ttl));
/// assert!(is_expired(login + Duration::hours(24), login, ttl));
/// ```
pub fn is_expired(now: DateTime<Utc>, login_time: DateTime<Utc>, ttl: Duration) -> bool {
    now - login_time >= ttl
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Session {
    pub username: Option<String>,
    /// `None` when the stored login time is missing or unreadable
    pub login_time: Option<DateTime<Utc>>,
}

impl Session {
    pub fn new(username: impl Into<String>, login_time: DateTime<Utc>) -> Self {
        Self {
            username: Some(username.into()),
            login_time: Some(login_time),
        }
    }

    /// Display name, falling back to `Anonymous User`
    pub fn display_name(&self) -> &str {
        self.username.as_deref().unwrap_or(ANONYMOUS_USER)
    }

    /// A session without a login time never expires
    pub fn is_expired(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        self.login_time
            .is_some_and(|login_time| is_expired(now, login_time, ttl))
    }

    /// Time left before expiry, if the session has a login time
    ///
    /// Saturates at zero and never overflows, whatever the `ttl`.
    pub fn remaining(&self, now: DateTime<Utc>, ttl: Duration) -> Option<Duration> {
        self.login_time.map(|login_time| {
            let elapsed = now.signed_duration_since(login_time);
            ttl.checked_sub(&elapsed)
                .map_or(Duration::zero(), |left| left.max(Duration::zero()))
        })
    }
}

/// Outcome of checking the stored session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Active(Session),
    /// Found but past its time-to-live; it has been cleared
    Expired(Session),
    LoggedOut,
}

impl SessionStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }
}
