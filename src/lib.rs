pub mod api;
pub mod config;
pub mod errors;
pub mod models;
pub mod store;
