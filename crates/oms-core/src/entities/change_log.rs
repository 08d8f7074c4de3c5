use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::change_detail::ChangeSet;
use crate::enums::LoggedEntity;

/// One appended row of a `*_logs` table.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct ChangeLog {
    pub id: i64,
    pub entity: LoggedEntity,
    /// Key of the edited record (ledger id or integer id rendered as text).
    pub record_id: String,
    pub changed_by: Option<String>,
    pub changed_at: DateTime<Utc>,
    pub changes: ChangeSet,
}
