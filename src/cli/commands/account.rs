//! `notevault account ...`: register and log in.

use crate::accounts::AccountLoginInput;
use crate::app::App;
use crate::cli::{output, prompt_new_password, prompt_password};
use crate::errors::Result;

/// Execute `account register`.
pub fn register(app: &App, email: &str) -> Result<()> {
    let password = prompt_new_password()?;
    let account = app
        .accounts()
        .register(AccountLoginInput::new(email, password.as_str()))?;

    output::success(&format!("Registered {} ({})", account.email, account.id));
    Ok(())
}

/// Execute `account login`.
pub fn login(app: &App, email: &str) -> Result<()> {
    let password = prompt_password()?;
    let account = app
        .accounts()
        .login(AccountLoginInput::new(email, password.as_str()))?;

    output::success(&format!("Logged in as {} ({})", account.email, account.id));
    Ok(())
}
