pub mod auth;
pub mod contact;
pub mod pages;
pub mod projects;
pub mod results;
