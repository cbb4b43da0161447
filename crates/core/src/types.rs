/// Remote workflow identifiers are opaque strings.
pub type WorkflowId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
