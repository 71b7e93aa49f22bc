pub mod disputemodel;
pub mod documentmodel;
pub mod parcelmodel;
pub mod surveymodel;
pub mod transfermodel;
pub mod usermodel;
