/// Numeric identifiers for users and access tokens.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Render a timestamp the way the wiki API reports commit dates
/// (RFC 3339, second precision, `Z` suffix).
pub fn format_commit_date(ts: &Timestamp) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}
