use serde::{Deserialize, Serialize};

/// All database primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Caller-supplied actor context for mutating workflow operations.
///
/// The engine does not authenticate; it trusts the caller's identity claim
/// and applies ownership checks only where the workflow requires them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub email: String,
}
