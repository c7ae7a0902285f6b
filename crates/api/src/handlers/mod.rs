pub mod actions;
pub mod admin;
pub mod ai;
pub mod email;
pub mod session;
pub mod surveys;
