pub mod user;
pub mod item;
pub mod claim;

/// Current time as an RFC 3339 UTC string; lexical order equals time order.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
