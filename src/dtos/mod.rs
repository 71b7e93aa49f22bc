pub mod disputedtos;
pub mod parceldtos;
pub mod surveydtos;
pub mod transferdtos;
pub mod userdtos;
