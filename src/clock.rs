//! Wall-clock source for response timestamps
//!
//! Handlers read time through `Clock` so tests can swap in a pinned instant.

use chrono::{DateTime, SecondsFormat, Utc};

/// Trait for getting the current time
///
/// Injected via `ServerState` so handler tests can pin the timestamps they assert on.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;

    /// Current time rendered for a response payload
    fn timestamp(&self) -> String {
        format_timestamp(self.now())
    }
}

/// Real UTC time
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Format a UTC instant as ISO-8601 with microseconds and an explicit offset
///
/// Example: `2024-05-01T12:34:56.789012+00:00`
pub fn format_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Micros, false)
}

/// Clock frozen at a chosen instant until a test moves it
#[cfg(test)]
#[allow(clippy::expect_used)]
pub struct MockClock {
    instant: std::sync::Mutex<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl MockClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self {
            instant: std::sync::Mutex::new(instant),
        }
    }

    /// Move the frozen instant forward
    pub fn advance(&self, by: chrono::Duration) {
        *self.instant.lock().expect("clock mutex poisoned") += by;
    }
}

#[cfg(test)]
#[allow(clippy::expect_used)]
impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.instant.lock().expect("clock mutex poisoned")
    }
}
