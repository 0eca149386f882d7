#![forbid(unsafe_code)]

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Calendar day a response belongs to. The caller decides the offset of `now`;
/// the day is whatever date that instant falls on in that offset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Day(Date);

impl Day {
    pub fn of(now: OffsetDateTime) -> Self {
        Self(now.date())
    }

    pub fn from_date(date: Date) -> Self {
        Self(date)
    }

    pub fn date(self) -> Date {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        self.0.next_day().map(Self)
    }

    /// `YYYY-MM-DD`, the form persisted in `submitted_day` and used in evidence paths.
    pub fn as_key(self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }

    pub fn parse_key(value: &str) -> Result<Self, DayError> {
        Date::parse(value.trim(), format_description!("[year]-[month]-[day]"))
            .map(Self)
            .map_err(|_| DayError::InvalidFormat)
    }
}

impl std::fmt::Display for Day {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_key())
    }
}

impl Serialize for Day {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_key())
    }
}

impl<'de> Deserialize<'de> for Day {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Day::parse_key(&raw).map_err(|err| serde::de::Error::custom(err.message()))
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DayError {
    InvalidFormat,
}

impl DayError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidFormat => "day must be formatted as YYYY-MM-DD",
        }
    }
}

pub fn timestamp_ms(now: OffsetDateTime) -> i64 {
    let ms = now.unix_timestamp_nanos() / 1_000_000i128;
    if ms <= 0 {
        0
    } else if ms >= i64::MAX as i128 {
        i64::MAX
    } else {
        ms as i64
    }
}

pub fn ts_ms_to_rfc3339(ts_ms: i64) -> String {
    let nanos = (ts_ms as i128) * 1_000_000i128;
    let dt = OffsetDateTime::from_unix_timestamp_nanos(nanos).unwrap_or(OffsetDateTime::UNIX_EPOCH);
    dt.format(&Rfc3339)
        .unwrap_or_else(|_| "1970-01-01T00:00:00Z".to_string())
}
