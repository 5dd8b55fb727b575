//! One module per top-level subcommand.

pub mod account;
pub mod generate;
pub mod keygen;
pub mod note;
