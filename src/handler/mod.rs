pub mod auth;
pub mod disputes;
pub mod documents;
pub mod parcels;
pub mod surveys;
pub mod transfers;
pub mod users;
