//! Composition root: turns `Settings` into ready-to-use services.

use std::path::Path;

use log::info;

use crate::accounts::AccountService;
use crate::config::Settings;
use crate::crypto::CredentialHasher;
use crate::errors::Result;
use crate::notes::NoteService;
use crate::store::StoreBackend;

/// Both services, sharing one storage backend.
pub struct App {
    notes: NoteService<StoreBackend>,
    accounts: AccountService<StoreBackend>,
}

impl App {
    /// Validate `settings`, open the configured store and wire the services.
    ///
    /// Relative database paths resolve against `base_dir`.
    pub fn from_settings(settings: &Settings, base_dir: &Path) -> Result<Self> {
        settings.validate()?;

        let cipher = settings.cipher()?;
        let hasher = CredentialHasher::new(settings.argon2_params())?;
        let store = StoreBackend::open(settings, base_dir)?;

        info!(
            "event=app_start module=app status=ok store={:?}",
            settings.store_type
        );

        Ok(Self {
            notes: NoteService::new(store.clone(), cipher),
            accounts: AccountService::new(store, hasher),
        })
    }

    pub fn notes(&self) -> &NoteService<StoreBackend> {
        &self.notes
    }

    pub fn accounts(&self) -> &AccountService<StoreBackend> {
        &self.accounts
    }
}
