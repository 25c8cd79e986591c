pub mod auth;
pub mod charts;
pub mod collectors;
pub mod config;
pub mod error;
pub mod models;
pub mod transform;
