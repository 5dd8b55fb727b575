//! Persistence contract for accounts.

use crate::errors::Result;

use super::model::{AccountInput, StoredAccount};

/// Storage operations the account service depends on.
///
/// # Invariants
/// - Lookups return `NotFound` for unknown or deleted accounts.
/// - `create` returns `AlreadyExists` if a live account has the same email.
/// - `delete` is idempotent.
pub trait AccountStore {
    fn get_by_id(&self, id: &str) -> Result<StoredAccount>;
    fn get_by_email(&self, email: &str) -> Result<StoredAccount>;
    fn create(&self, input: AccountInput) -> Result<StoredAccount>;
    fn delete(&self, id: &str) -> Result<()>;
}
