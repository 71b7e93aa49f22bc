use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::disputemodel::DisputeStatus;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateDisputeDto {
    #[serde(rename = "parcelId")]
    pub parcel_id: Uuid,

    // Defaults to the filer's name when omitted
    pub complainant: Option<String>,

    #[validate(length(min = 1, message = "Defendant is required"))]
    pub defendant: String,

    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateDisputeStatusDto {
    pub status: DisputeStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_dispute_requires_reason() {
        let dto = CreateDisputeDto {
            parcel_id: Uuid::new_v4(),
            complainant: None,
            defendant: "John Doe".to_string(),
            reason: "".to_string(),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn status_dto_parses_resolved() {
        let dto: UpdateDisputeStatusDto = serde_json::from_str(r#"{"status":"Resolved"}"#).unwrap();
        assert_eq!(dto.status, DisputeStatus::Resolved);
    }
}
