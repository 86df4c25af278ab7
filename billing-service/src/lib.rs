pub mod api;
pub mod billing;
pub mod config;
pub mod observability;
