use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssignSurveyorDto {
    #[serde(rename = "surveyorId")]
    pub surveyor_id: Uuid,
}

#[derive(Validate, Debug, Clone, Serialize, Deserialize)]
pub struct SubmitFeedbackDto {
    #[validate(
        length(min = 1, message = "Feedback is required"),
        length(max = 1000, message = "Feedback must not be more than 1000 characters")
    )]
    pub feedback: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct SurveyorLoginDto {
    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateSurveyorDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(
        length(min = 1, message = "Email is required"),
        email(message = "Email is invalid")
    )]
    pub email: String,

    #[validate(
        length(min = 1, message = "Password is required"),
        length(min = 6, message = "Password must be at least 6 characters")
    )]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn feedback_is_capped_at_1000_chars() {
        let dto = SubmitFeedbackDto {
            feedback: "x".repeat(1001),
        };
        assert!(dto.validate().is_err());

        let dto = SubmitFeedbackDto {
            feedback: "x".repeat(1000),
        };
        assert!(dto.validate().is_ok());
    }
}
