//! Wire codecs for Bitbucket's two timestamp flavours.
//!
//! - REST resources carry [`DateTime`]s as epoch *milliseconds* (`"createdDate": 1672996351030`).
//! - Webhook envelopes carry [`IsoTime`]s as ISO-8601 with a compact offset (`"2023-01-13T22:26:25+1100"`).

use std::fmt::{Display, Formatter};

use chrono::{FixedOffset, TimeZone, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

const ISO_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// An epoch-milliseconds timestamp. Precision is one second: the millisecond remainder is dropped
/// on decode, so `decode(encode(t)) == t` for any whole-second `t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime(chrono::DateTime<Utc>);

impl DateTime {
    /// Builds a [`DateTime`] out of its wire representation; `None` if out of chrono's range.
    pub fn from_millis(millis: i64) -> Option<Self> {
        Utc.timestamp_opt(millis / 1000, 0).single().map(DateTime)
    }

    /// Wire representation; always a whole amount of seconds.
    pub fn to_millis(&self) -> i64 {
        self.0.timestamp() * 1000
    }

    pub fn inner(&self) -> &chrono::DateTime<Utc> {
        &self.0
    }
}

impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(value: chrono::DateTime<Utc>) -> Self {
        DateTime(value)
    }
}

impl From<DateTime> for chrono::DateTime<Utc> {
    fn from(value: DateTime) -> Self {
        value.0
    }
}

impl Display for DateTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339())
    }
}

impl Serialize for DateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.to_millis())
    }
}

impl<'de> Deserialize<'de> for DateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = i64::deserialize(deserializer)?;
        DateTime::from_millis(millis)
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {}", millis)))
    }
}

/// An ISO-8601 timestamp that keeps the offset it was sent with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoTime(chrono::DateTime<FixedOffset>);

impl IsoTime {
    pub fn inner(&self) -> &chrono::DateTime<FixedOffset> {
        &self.0
    }
}

impl From<chrono::DateTime<FixedOffset>> for IsoTime {
    fn from(value: chrono::DateTime<FixedOffset>) -> Self {
        IsoTime(value)
    }
}

impl Display for IsoTime {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.format(ISO_TIME_FORMAT))
    }
}

impl Serialize for IsoTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for IsoTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        chrono::DateTime::parse_from_str(&raw, ISO_TIME_FORMAT)
            .map(IsoTime)
            .map_err(|e| D::Error::custom(format!("invalid ISO time [{}]: {}", raw, e)))
    }
}
