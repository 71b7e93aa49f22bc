pub mod db;
pub mod disputedb;
pub mod documentdb;
pub mod parceldb;
pub mod surveydb;
pub mod transferdb;
pub mod userdb;
