//! Shared provider traits for dependency injection.
//!
//! External dependencies that would make tests nondeterministic are hidden
//! behind small traits so modules can be tested in isolation with mock
//! implementations.

use time::OffsetDateTime;

/// Trait for providing timestamps.
///
/// History entries are stamped through this trait so tests can pin the
/// clock to a fixed instant.
///
/// # Example
///
/// ```
/// use fiat::providers::{Clock, SystemClock};
///
/// let clock = SystemClock;
/// let now = clock.now();
/// assert!(now.year() >= 2024);
/// ```
pub trait Clock: Send + Sync {
    /// Returns the current instant in UTC.
    fn now(&self) -> OffsetDateTime;
}

/// Default clock using system time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
