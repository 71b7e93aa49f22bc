use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct CreateTransferRequestDto {
    #[serde(rename = "parcelId")]
    pub parcel_id: Uuid,

    #[validate(length(min = 1, message = "Receiver name is required"))]
    #[serde(rename = "receiverName")]
    pub receiver_name: String,
}
