//! Login, logout and whoami command handlers

use crate::cli::LoginArgs;
use crate::context::{Credentials, SessionScope};
use crate::output::{output_organizations, output_user, print_json};
use crate::runtime::Runtime;
use crate::ui::{create_spinner, finish_spinner, prompt_secret, prompt_text};

use super::{login, whoami, Identity};

/// Run the login command
pub async fn run_login_command(
    runtime: &Runtime,
    args: &LoginArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let overrides = &runtime.overrides;

    let token = match overrides.cli.token.clone().or_else(|| overrides.env.token.clone()) {
        Some(token) => token,
        None => prompt_secret("API token", runtime.quiet)?,
    };

    let email = if args.no_email {
        None
    } else {
        match overrides.cli.email.clone().or_else(|| overrides.env.email.clone()) {
            Some(email) => Some(email),
            None if runtime.quiet => None,
            None => Some(prompt_text("Email (empty for token-only)", true, runtime.quiet)?)
                .filter(|e| !e.is_empty()),
        }
    };

    let mut credentials = Credentials::new(token);
    if let Some(email) = &email {
        credentials = credentials.with_email(email);
    }

    let spinner = create_spinner("Validating token...", runtime.quiet);
    let result = login(&runtime.store, &runtime.settings, credentials).await;
    finish_spinner(spinner);
    let organizations = result?;

    if runtime.json {
        print_json(&organizations)?;
        return Ok(());
    }

    match &email {
        Some(email) => println!("✓ Logged in as {}", email),
        None => println!("✓ Logged in"),
    }
    println!();
    output_organizations(&organizations, None, false)?;
    println!("\nRun 'favroctl org select <id>' to choose an organization.");
    Ok(())
}

/// Run the logout command
pub fn run_logout_command(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    runtime.context_manager().logout()?;
    if !runtime.json {
        println!("✓ Logged out");
    }
    Ok(())
}

/// Run the whoami command
pub async fn run_whoami_command(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Account)?;

    let spinner = create_spinner("Fetching account...", runtime.quiet);
    let identity = whoami(&client).await;
    finish_spinner(spinner);

    match identity? {
        Identity::User {
            user,
            organization_id,
        } => output_user(&user, &organization_id, runtime.json)?,
        Identity::Account { organizations } => {
            if !runtime.json {
                println!("Authenticated. No organization selected or no email stored.\n");
            }
            output_organizations(&organizations, None, runtime.json)?;
        }
    }
    Ok(())
}
