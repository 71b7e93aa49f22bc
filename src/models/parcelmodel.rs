use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "parcel_status", rename_all = "snake_case")]
pub enum ParcelStatus {
    Pending,  // Awaiting admin review
    Approved,
    Rejected,
    Active,
}

impl ParcelStatus {
    pub fn to_str(&self) -> &str {
        match self {
            ParcelStatus::Pending => "Pending",
            ParcelStatus::Approved => "Approved",
            ParcelStatus::Rejected => "Rejected",
            ParcelStatus::Active => "Active",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Parcel {
    pub id: Uuid,
    pub title_deed: String,
    pub lr_number: String,
    pub location: String,
    pub size: f64,
    pub status: ParcelStatus,
    pub owner_id: Uuid,
    pub surveyor_id: Option<Uuid>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
