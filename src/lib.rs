pub mod accounts;
pub mod app;
pub mod cli;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod logging;
pub mod notes;
pub mod store;
