use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, sqlx::Type, PartialEq)]
#[sqlx(type_name = "document_type", rename_all = "snake_case")]
pub enum DocumentType {
    #[serde(rename = "Title Deed")]
    TitleDeed,
    #[serde(rename = "Transfer Agreement")]
    TransferAgreement,
    #[serde(rename = "Dispute Resolution")]
    DisputeResolution,
    #[serde(rename = "Tax Certificate")]
    TaxCertificate,
}

impl DocumentType {
    pub fn to_str(&self) -> &str {
        match self {
            DocumentType::TitleDeed => "Title Deed",
            DocumentType::TransferAgreement => "Transfer Agreement",
            DocumentType::DisputeResolution => "Dispute Resolution",
            DocumentType::TaxCertificate => "Tax Certificate",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "Title Deed" => Some(DocumentType::TitleDeed),
            "Transfer Agreement" => Some(DocumentType::TransferAgreement),
            "Dispute Resolution" => Some(DocumentType::DisputeResolution),
            "Tax Certificate" => Some(DocumentType::TaxCertificate),
            _ => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Document {
    pub id: Uuid,
    pub name: String,
    pub doc_type: DocumentType,
    pub parcel_id: Uuid,
    pub date_issued: DateTime<Utc>,
    pub file_url: String,
    pub uploaded_by: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
