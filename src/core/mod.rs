pub mod app;
pub mod backend;
pub mod config;
pub mod greeting;
pub mod request_service;
pub mod submission;
