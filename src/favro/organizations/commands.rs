//! Organization command handlers

use log::debug;

use crate::cli::OrgAction;
use crate::context::SessionScope;
use crate::output::{output_organizations, print_json};
use crate::runtime::Runtime;
use crate::ui::{create_spinner, finish_spinner};

/// Dispatch organization subcommands
pub async fn run_org_command(
    runtime: &Runtime,
    action: &OrgAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        OrgAction::List => run_org_list(runtime).await,
        OrgAction::Select { organization } => run_org_select(runtime, organization).await,
        OrgAction::Current => run_org_current(runtime).await,
    }
}

async fn run_org_list(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Account)?;

    let spinner = create_spinner("Fetching organizations...", runtime.quiet);
    let organizations = client.list_organizations().await;
    finish_spinner(spinner);
    let organizations = organizations?;

    debug!("Found {} organizations", organizations.len());
    output_organizations(
        &organizations,
        client.session().organization_id(),
        runtime.json,
    )?;
    Ok(())
}

async fn run_org_select(
    runtime: &Runtime,
    organization: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Account)?;

    let spinner = create_spinner("Looking up organization...", runtime.quiet);
    let selected = runtime
        .context_manager()
        .select_organization(&client, organization)
        .await;
    finish_spinner(spinner);
    let selected = selected?;

    if runtime.json {
        print_json(&selected)?;
    } else {
        println!(
            "✓ Selected organization '{}' ({})",
            selected.name, selected.organization_id
        );
    }
    Ok(())
}

async fn run_org_current(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Organization)?;
    let organization_id = client.session().require_organization()?;

    let spinner = create_spinner("Fetching organization...", runtime.quiet);
    let organization = client.get_organization(organization_id).await;
    finish_spinner(spinner);
    let organization = organization?;

    output_organizations(
        std::slice::from_ref(&organization),
        Some(organization_id),
        runtime.json,
    )?;
    Ok(())
}
