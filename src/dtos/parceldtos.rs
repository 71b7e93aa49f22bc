use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::parcelmodel::ParcelStatus;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateParcelDto {
    #[validate(length(min = 1, message = "Title deed is required"))]
    #[serde(rename = "titleDeed")]
    pub title_deed: String,

    #[validate(length(min = 1, message = "LR number is required"))]
    #[serde(rename = "lrNumber")]
    pub lr_number: String,

    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,

    #[validate(range(min = 0.01, message = "Size must be greater than zero"))]
    pub size: f64,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateParcelDto {
    #[serde(rename = "titleDeed")]
    pub title_deed: Option<String>,

    #[serde(rename = "lrNumber")]
    pub lr_number: Option<String>,

    pub location: Option<String>,

    #[validate(range(min = 0.01, message = "Size must be greater than zero"))]
    pub size: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParcelStatusDto {
    pub status: ParcelStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_parcel_requires_all_fields() {
        let dto = CreateParcelDto {
            title_deed: "".to_string(),
            lr_number: "LR1".to_string(),
            location: "X".to_string(),
            size: 5.0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn create_parcel_rejects_zero_size() {
        let dto = CreateParcelDto {
            title_deed: "TD1".to_string(),
            lr_number: "LR1".to_string(),
            location: "X".to_string(),
            size: 0.0,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn status_dto_uses_wire_names() {
        let dto: UpdateParcelStatusDto = serde_json::from_str(r#"{"status":"Approved"}"#).unwrap();
        assert_eq!(dto.status, ParcelStatus::Approved);
    }
}
