//! Accounts module: account records, storage contract and the
//! registration/login service.

pub mod model;
pub mod service;
pub mod store;

pub use model::{Account, AccountId, AccountInput, AccountLoginInput, StoredAccount};
pub use service::AccountService;
pub use store::AccountStore;
