use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "survey_status", rename_all = "snake_case")]
pub enum SurveyStatus {
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl SurveyStatus {
    pub fn to_str(&self) -> &str {
        match self {
            SurveyStatus::Pending => "Pending",
            SurveyStatus::InProgress => "In Progress",
            SurveyStatus::Completed => "Completed",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Survey {
    pub id: Uuid,
    pub parcel_id: Uuid,
    pub surveyor_id: Uuid,
    pub owner_id: Uuid,
    pub status: SurveyStatus,
    pub feedback: Option<String>,
    pub assigned_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
