pub mod admin;
pub mod applications;
pub mod auth;
pub mod jobs;
pub mod messages;
pub mod proposals;
pub mod questions;
pub mod reviews;
