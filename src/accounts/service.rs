//! Account registration and login.
//!
//! Raw passwords never leave this module: they are hashed before storage
//! and only ever compared through `CredentialHasher::verify`.  Login does
//! not reveal whether an email is registered; an unknown email and a
//! wrong password fail the same way.

use std::sync::OnceLock;

use log::{debug, info};

use crate::crypto::CredentialHasher;
use crate::errors::{NoteVaultError, Result};

use super::model::{Account, AccountInput, AccountLoginInput};
use super::store::AccountStore;

/// Account service facade over a storage implementation.
pub struct AccountService<S: AccountStore> {
    store: S,
    hasher: CredentialHasher,
    /// Hash verified against when the email is unknown, so both login
    /// failures pay one Argon2 run.  Built on first use.
    dummy_hash: OnceLock<Option<String>>,
}

/// Password behind `dummy_hash`.  Never matches a real login.
const DUMMY_PASSWORD: &str = "notevault-unknown-account";

impl<S: AccountStore> AccountService<S> {
    pub fn new(store: S, hasher: CredentialHasher) -> Self {
        Self {
            store,
            hasher,
            dummy_hash: OnceLock::new(),
        }
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Create an account for a new email.
    ///
    /// Fails with `AlreadyExists` if the email is taken.
    pub fn register(&self, credentials: AccountLoginInput) -> Result<Account> {
        validate_credentials(&credentials)?;

        match self.store.get_by_email(&credentials.email) {
            Ok(_) => {
                return Err(NoteVaultError::AlreadyExists(format!(
                    "account '{}'",
                    credentials.email
                )))
            }
            Err(NoteVaultError::NotFound(_)) => {}
            Err(e) => return Err(e),
        }

        let password_hash = self.hasher.hash(&credentials.password)?;

        let saved = self.store.create(AccountInput {
            email: credentials.email,
            password_hash,
        })?;
        info!("event=account_register module=accounts status=ok id={}", saved.id);

        Ok(saved.into())
    }

    /// Authenticate an email/password pair.
    ///
    /// Fails with `InvalidCredentials` for an unknown email or a wrong
    /// password.  A stored hash that cannot be parsed surfaces as
    /// `MalformedPasswordHash`.
    pub fn login(&self, credentials: AccountLoginInput) -> Result<Account> {
        let stored = match self.store.get_by_email(&credentials.email) {
            Ok(stored) => stored,
            Err(NoteVaultError::NotFound(_)) => {
                self.burn_verify(&credentials.password);
                debug!("event=account_login module=accounts status=rejected");
                return Err(NoteVaultError::InvalidCredentials);
            }
            Err(e) => return Err(e),
        };

        if !self
            .hasher
            .verify(&credentials.password, &stored.password_hash)?
        {
            debug!("event=account_login module=accounts status=rejected");
            return Err(NoteVaultError::InvalidCredentials);
        }

        debug!("event=account_login module=accounts status=ok id={}", stored.id);
        Ok(stored.into())
    }

    /// Run a verify whose outcome is discarded.
    fn burn_verify(&self, password: &str) {
        let dummy = self
            .dummy_hash
            .get_or_init(|| self.hasher.hash(DUMMY_PASSWORD).ok());
        if let Some(hash) = dummy {
            let _ = self.hasher.verify(password, hash);
        }
    }
}

fn validate_credentials(credentials: &AccountLoginInput) -> Result<()> {
    if credentials.email.trim().is_empty() {
        return Err(NoteVaultError::InvalidInput("email cannot be empty".into()));
    }
    if credentials.password.is_empty() {
        return Err(NoteVaultError::InvalidInput(
            "password cannot be empty".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::password::MIN_MEMORY_KIB;
    use crate::crypto::Argon2Params;
    use crate::store::MemoryStore;

    fn service() -> AccountService<MemoryStore> {
        let hasher = CredentialHasher::new(Argon2Params {
            memory_kib: MIN_MEMORY_KIB,
            iterations: 1,
            parallelism: 1,
        })
        .unwrap();
        AccountService::new(MemoryStore::new(), hasher)
    }

    #[test]
    fn unknown_email_runs_the_hasher() {
        let svc = service();
        assert!(svc.dummy_hash.get().is_none());

        assert!(matches!(
            svc.login(AccountLoginInput::new("ghost@x.com", "pw-123456")),
            Err(NoteVaultError::InvalidCredentials)
        ));

        let dummy = svc.dummy_hash.get().unwrap().as_deref().unwrap();
        assert!(dummy.starts_with("$argon2id$"));
        assert!(!svc.hasher.verify("pw-123456", dummy).unwrap());
    }

    #[test]
    fn dummy_hash_is_built_once() {
        let svc = service();
        for _ in 0..2 {
            let _ = svc.login(AccountLoginInput::new("ghost@x.com", "pw"));
        }
        let first = svc.dummy_hash.get().cloned();
        let _ = svc.login(AccountLoginInput::new("other@x.com", "pw"));
        assert_eq!(svc.dummy_hash.get().cloned(), first);
    }
}
