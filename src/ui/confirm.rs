//! Interactive prompts

use dialoguer::{Confirm, Input, Password};

use crate::error::FavroError;

/// Ask before a destructive operation.
///
/// `force` skips the prompt. In quiet mode nothing is asked and the answer is
/// "no", so scripts must pass `--force` explicitly.
pub fn confirm_action(prompt: &str, force: bool, quiet: bool) -> Result<bool, dialoguer::Error> {
    if force {
        return Ok(true);
    }
    if quiet {
        return Ok(false);
    }
    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
}

/// Read a value from the terminal, refusing to prompt in quiet mode
pub fn prompt_text(prompt: &str, allow_empty: bool, quiet: bool) -> Result<String, Box<dyn std::error::Error>> {
    if quiet {
        return Err(FavroError::invalid(format!("{} is required", prompt)).into());
    }
    let value: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(allow_empty)
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Read a secret from the terminal without echo
pub fn prompt_secret(prompt: &str, quiet: bool) -> Result<String, Box<dyn std::error::Error>> {
    if quiet {
        return Err(FavroError::invalid(format!("{} is required", prompt)).into());
    }
    let value = Password::new().with_prompt(prompt).interact()?;
    Ok(value.trim().to_string())
}
