/// Account ids are UUIDs generated by the credential store at creation.
/// The profile store reuses the same value as its document id, so the two
/// records of one account join on this type alone.
pub type UserId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
