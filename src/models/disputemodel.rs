use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "dispute_status", rename_all = "snake_case")]
pub enum DisputeStatus {
    Pending,
    Resolved,
    Rejected,
}

impl DisputeStatus {
    pub fn to_str(&self) -> &str {
        match self {
            DisputeStatus::Pending => "Pending",
            DisputeStatus::Resolved => "Resolved",
            DisputeStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Dispute {
    pub id: Uuid,
    // Human-facing reference of the form DSP-XXXXXXXX
    pub dispute_id: String,
    pub parcel_id: Uuid,
    pub parcel_lr: String,
    pub complainant: Option<String>,
    pub defendant: String,
    pub reason: String,
    pub filed_by: Uuid,
    pub status: DisputeStatus,
    pub date_filed: DateTime<Utc>,
}
