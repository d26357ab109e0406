//! # Timestamp Value Object
//!
//! DateTime wrapper used for ad creation and update times.
//!
//! # Examples
//!
//! ```
//! use classified_ads::domain::value_objects::timestamp::Timestamp;
//!
//! let ts = Timestamp::from_secs(1_704_067_200).unwrap();
//! assert_eq!(ts.to_display_format(), "2024-01-01 00:00:00");
//! ```

use chrono::{DateTime, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A UTC point in time.
///
/// # Invariants
///
/// - Always in UTC timezone
/// - Values produced by [`Timestamp::now`] have microsecond precision, which
///   is what PostgreSQL `TIMESTAMPTZ` stores, so a value survives a database
///   round trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Wire format shared by the REST and gRPC APIs: `YYYY-MM-DD HH:MM:SS`.
    pub const DISPLAY_FORMAT: &'static str = "%Y-%m-%d %H:%M:%S";

    /// Creates a timestamp for the current moment, truncated to microseconds.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now().trunc_subsecs(6))
    }

    /// Creates a timestamp from Unix seconds.
    ///
    /// Returns `None` if the value is out of range.
    ///
    /// # Examples
    ///
    /// ```
    /// use classified_ads::domain::value_objects::timestamp::Timestamp;
    ///
    /// let ts = Timestamp::from_secs(1000).unwrap();
    /// assert_eq!(ts.timestamp_secs(), 1000);
    /// ```
    #[must_use]
    pub fn from_secs(secs: i64) -> Option<Self> {
        Utc.timestamp_opt(secs, 0).single().map(Self)
    }

    /// Returns the Unix timestamp in seconds.
    #[inline]
    #[must_use]
    pub fn timestamp_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Returns true if this timestamp is strictly after `other`.
    #[inline]
    #[must_use]
    pub fn is_after(&self, other: &Self) -> bool {
        self.0 > other.0
    }

    /// Formats the timestamp as `YYYY-MM-DD HH:MM:SS`.
    #[must_use]
    pub fn to_display_format(&self) -> String {
        self.0.format(Self::DISPLAY_FORMAT).to_string()
    }

    /// Returns the inner `DateTime<Utc>`.
    #[inline]
    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::now()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_format())
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

impl From<Timestamp> for DateTime<Utc> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn now_is_current_and_microsecond_precise() {
        let before = Utc::now().trunc_subsecs(6);
        let ts = Timestamp::now();
        let after = Utc::now();

        assert!(ts.0 >= before);
        assert!(ts.0 <= after);
        assert_eq!(ts.0.nanosecond() % 1_000, 0);
    }

    #[test]
    fn from_secs_works() {
        let ts = Timestamp::from_secs(1_704_067_200).unwrap();
        assert_eq!(ts.timestamp_secs(), 1_704_067_200);
    }

    #[test]
    fn display_format_drops_subseconds() {
        let dt = Utc.with_ymd_and_hms(2023, 3, 7, 9, 5, 1).unwrap() + chrono::Duration::milliseconds(250);
        let ts = Timestamp::from(dt);
        assert_eq!(ts.to_display_format(), "2023-03-07 09:05:01");
        assert_eq!(ts.to_string(), "2023-03-07 09:05:01");
    }

    #[test]
    fn is_after() {
        let ts1 = Timestamp::from_secs(1000).unwrap();
        let ts2 = Timestamp::from_secs(2000).unwrap();
        assert!(ts2.is_after(&ts1));
        assert!(!ts1.is_after(&ts2));
        assert!(!ts1.is_after(&ts1));
    }

    #[test]
    fn datetime_conversion_round_trips() {
        let dt = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let ts = Timestamp::from(dt);
        assert_eq!(ts.as_datetime(), &dt);
        assert_eq!(DateTime::<Utc>::from(ts), dt);
    }

    #[test]
    fn serializes_transparently() {
        let ts = Timestamp::from_secs(0).unwrap();
        let json = serde_json::to_string(&ts).unwrap();
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, back);
    }
}
