pub mod admin;
pub mod approver;
pub mod debug;
pub mod health;
pub mod requests;
pub mod user;
