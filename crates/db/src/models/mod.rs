pub mod action;
pub mod admin;
pub mod organization;
pub mod question;
pub mod respondent;
pub mod response;
pub mod survey;
pub mod user;
