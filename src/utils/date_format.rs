use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serializer, de::Error};

pub const WIRE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// Parse a calendar date from the wire.
///
/// The attendance service stores dates as midnight timestamps, so a full
/// timestamp (`2024-01-15T00:00:00`, optionally with an offset) is accepted
/// as well as `2024-01-15`. Anything else, trailing text included, is not.
pub fn parse(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, WIRE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map(|t| t.date()))
        .or_else(|_| DateTime::parse_from_rfc3339(value).map(|t| t.date_naive()))
        .ok()
}

/// Today in the local timezone, as sent to the service.
pub fn today() -> String {
    Local::now().date_naive().format(WIRE_FORMAT).to_string()
}

/// `Jan 15, 2024`
pub fn display(date: &NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

pub fn serialize<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&date.format(WIRE_FORMAT).to_string())
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse(&raw).ok_or_else(|| D::Error::custom(format!("invalid date: {raw}")))
}
