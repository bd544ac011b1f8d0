use std::fmt;

use bytes::{Bytes, BytesMut};
use chrono::{TimeZone, Utc};

use crate::{BinaryDecode, BinaryEncode, CodecError};

const TICKS_PER_SECOND: i64 = 10_000_000;
const NANOS_PER_TICK: i64 = 100;

/// Ticks between 1601-01-01 and the Unix epoch.
pub const UNIX_EPOCH_TICKS: i64 = 116_444_736_000_000_000;

/// Timestamp as a count of 100 ns ticks since 1601-01-01 00:00:00 UTC.
///
/// Encoded as a little-endian `i64`. The zero value is the null timestamp.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DateTime(pub i64);

impl DateTime {
    pub const NULL: Self = Self(0);

    pub fn ticks(self) -> i64 {
        self.0
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Build from UTC calendar fields; `None` for an invalid date.
    pub fn from_ymd_hms(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        min: u32,
        sec: u32,
    ) -> Option<Self> {
        Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
            .single()
            .map(Self::from)
    }

    /// The timestamp as a `chrono` value, or `None` when it is out of its range.
    pub fn to_chrono(self) -> Option<chrono::DateTime<Utc>> {
        let unix = self.0.checked_sub(UNIX_EPOCH_TICKS)?;
        let secs = unix.div_euclid(TICKS_PER_SECOND);
        let nanos = unix.rem_euclid(TICKS_PER_SECOND) * NANOS_PER_TICK;
        chrono::DateTime::from_timestamp(secs, u32::try_from(nanos).ok()?)
    }
}

/// Sub-tick precision is truncated; dates beyond the tick range saturate.
impl From<chrono::DateTime<Utc>> for DateTime {
    fn from(dt: chrono::DateTime<Utc>) -> Self {
        let ticks = dt
            .timestamp()
            .saturating_mul(TICKS_PER_SECOND)
            .saturating_add(i64::from(dt.timestamp_subsec_nanos()) / NANOS_PER_TICK)
            .saturating_add(UNIX_EPOCH_TICKS);
        Self(ticks)
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_chrono() {
            Some(dt) => write!(f, "{}", dt.to_rfc3339_opts(chrono::SecondsFormat::AutoSi, true)),
            None => write!(f, "{} ticks", self.0),
        }
    }
}

impl BinaryEncode for DateTime {
    fn encode(&self, buf: &mut BytesMut) -> Result<(), CodecError> {
        self.0.encode(buf)
    }
}

impl BinaryDecode for DateTime {
    fn decode(buf: &mut Bytes) -> Result<Self, CodecError> {
        i64::decode(buf).map(Self)
    }
}
