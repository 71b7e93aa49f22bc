use thiserror::Error;
use uuid::Uuid;

use crate::error::HttpError;

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Parcel {0} not found")]
    ParcelNotFound(Uuid),

    #[error("Transfer request {0} not found")]
    TransferNotFound(Uuid),

    #[error("Dispute {0} not found")]
    DisputeNotFound(Uuid),

    #[error("Survey {0} not found")]
    SurveyNotFound(Uuid),

    #[error("Invalid {entity} transition from {from} to {to}")]
    InvalidTransition {
        entity: &'static str,
        from: String,
        to: String,
    },

    #[error("Survey already assigned for this parcel")]
    SurveyAlreadyAssigned(Uuid),

    #[error("Survey {0} is already completed")]
    SurveyAlreadyCompleted(Uuid),

    #[error("User {0} is not authorized to perform this action on {1}")]
    UnauthorizedAccess(Uuid, &'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<WorkflowError> for HttpError {
    fn from(error: WorkflowError) -> Self {
        match error {
            WorkflowError::ParcelNotFound(_)
            | WorkflowError::TransferNotFound(_)
            | WorkflowError::DisputeNotFound(_)
            | WorkflowError::SurveyNotFound(_) => HttpError::not_found(error.to_string()),

            WorkflowError::InvalidTransition { .. }
            | WorkflowError::SurveyAlreadyAssigned(_)
            | WorkflowError::SurveyAlreadyCompleted(_)
            | WorkflowError::Validation(_) => HttpError::bad_request(error.to_string()),

            WorkflowError::UnauthorizedAccess(_, _) => HttpError::forbidden(error.to_string()),

            WorkflowError::Database(_) => HttpError::server_error(error.to_string()),
        }
    }
}
