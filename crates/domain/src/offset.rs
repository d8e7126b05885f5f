use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// The symbolic lead times a `Reminder` can be requested with.
///
/// `None` is the sentinel for "no reminder" and is the only variant
/// without a duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReminderOffset {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "30m")]
    ThirtyMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "2h")]
    TwoHours,
    #[serde(rename = "6h")]
    SixHours,
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "3d")]
    ThreeDays,
    #[serde(rename = "7d")]
    SevenDays,
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Unknown reminder offset key: `{0}`")]
pub struct UnknownOffsetKey(pub String);

impl ReminderOffset {
    pub const ALL: [ReminderOffset; 9] = [
        Self::None,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::SixHours,
        Self::OneDay,
        Self::ThreeDays,
        Self::SevenDays,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::TwoHours => "2h",
            Self::SixHours => "6h",
            Self::OneDay => "1d",
            Self::ThreeDays => "3d",
            Self::SevenDays => "7d",
        }
    }

    fn minutes(&self) -> Option<i64> {
        match self {
            Self::None => None,
            Self::FifteenMinutes => Some(15),
            Self::ThirtyMinutes => Some(30),
            Self::OneHour => Some(60),
            Self::TwoHours => Some(2 * 60),
            Self::SixHours => Some(6 * 60),
            Self::OneDay => Some(24 * 60),
            Self::ThreeDays => Some(3 * 24 * 60),
            Self::SevenDays => Some(7 * 24 * 60),
        }
    }

    /// How long before the event the reminder should trigger
    pub fn duration(&self) -> Option<Duration> {
        self.minutes().map(Duration::minutes)
    }

    /// Looks up the duration behind a symbolic key. `Ok(None)` means the
    /// key was the `none` sentinel.
    pub fn resolve(key: &str) -> Result<Option<Duration>, UnknownOffsetKey> {
        key.parse::<Self>().map(|offset| offset.duration())
    }

    /// Recovers the offset a reminder was created with from the event time and
    /// the trigger time. Lead times that do not match a known offset when rounded
    /// to whole minutes map to `None`.
    pub fn from_lead_time(event_ts: i64, remind_at: i64) -> Self {
        let diff_millis = (event_ts - remind_at) as f64;
        let diff_minutes = (diff_millis / (1000.0 * 60.0)).round() as i64;
        Self::ALL
            .iter()
            .copied()
            .find(|offset| offset.minutes() == Some(diff_minutes))
            .unwrap_or(Self::None)
    }
}

impl Default for ReminderOffset {
    fn default() -> Self {
        Self::None
    }
}

impl FromStr for ReminderOffset {
    type Err = UnknownOffsetKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|offset| offset.key() == s)
            .ok_or_else(|| UnknownOffsetKey(s.to_string()))
    }
}

impl Display for ReminderOffset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}
