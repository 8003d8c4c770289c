use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid commit ID: {0}")]
    InvalidCommitId(String),
    #[error("invalid date filter '{input}': expected YYYY-MM-DD")]
    InvalidDateFilter { input: String },
    #[error("timestamp out of range: {seconds}s with offset {offset_minutes}m")]
    TimestampOutOfRange { seconds: i64, offset_minutes: i32 },
}
