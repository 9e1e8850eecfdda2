use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted name/value record. `id` and `submitted_at` are assigned
/// by the store on insert and never change afterwards.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Submission {
    pub id: u64,
    pub name: String,
    pub value: String,
    pub submitted_at: DateTime<Utc>,
}
