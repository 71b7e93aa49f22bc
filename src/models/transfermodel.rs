use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Active is kept for wire compatibility with older clients; no transition
// table edge leads into it.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "transfer_status", rename_all = "snake_case")]
pub enum TransferStatus {
    Pending,
    Approved,
    Rejected,
    Active,
}

impl TransferStatus {
    pub fn to_str(&self) -> &str {
        match self {
            TransferStatus::Pending => "Pending",
            TransferStatus::Approved => "Approved",
            TransferStatus::Rejected => "Rejected",
            TransferStatus::Active => "Active",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct TransferRequest {
    pub id: Uuid,
    pub parcel_id: Uuid,
    pub receiver_name: String,
    pub status: TransferStatus,
    pub requested_by: Uuid,
    pub requested_at: DateTime<Utc>,
}
