use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One entry in the append-only chat log, scoped by teacher.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Chat {
    pub id: String,
    pub role: String,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
    pub teacher_id: String,
    pub timestamp: DateTime<Utc>,
}

impl Chat {
    pub fn new(role: &str, text: &str, meta: Option<Value>, teacher_id: &str) -> Self {
        Chat {
            id: Uuid::new_v4().to_string(),
            role: role.to_string(),
            text: text.to_string(),
            meta,
            teacher_id: teacher_id.to_string(),
            timestamp: Utc::now(),
        }
    }
}
