//! Column command handlers

use crate::cli::{ColumnAction, ColumnCreateArgs, ColumnDeleteArgs};
use crate::context::SessionScope;
use crate::favro::{Column, ColumnUpdate, FavroClient};
use crate::output::{output_columns, print_json};
use crate::runtime::Runtime;
use crate::ui::{confirm_action, create_spinner, finish_spinner};

/// Dispatch column subcommands
pub async fn run_column_command(
    runtime: &Runtime,
    action: &ColumnAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Organization)?;
    let board_id = client.session().require_board()?.to_string();

    match action {
        ColumnAction::List => run_column_list(runtime, &client, &board_id).await,
        ColumnAction::Create(args) => run_column_create(runtime, &client, &board_id, args).await,
        ColumnAction::Rename { column, name } => {
            let update = ColumnUpdate {
                name: Some(name.clone()),
                position: None,
            };
            run_column_update(runtime, &client, &board_id, column, &update).await
        }
        ColumnAction::Move { column, position } => {
            let update = ColumnUpdate {
                name: None,
                position: Some(*position),
            };
            run_column_update(runtime, &client, &board_id, column, &update).await
        }
        ColumnAction::Delete(args) => run_column_delete(runtime, &client, &board_id, args).await,
    }
}

async fn run_column_list(
    runtime: &Runtime,
    client: &FavroClient,
    board_id: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner("Fetching columns...", runtime.quiet);
    let columns = client.list_columns(board_id).await;
    finish_spinner(spinner);

    output_columns(&columns?, runtime.json)?;
    Ok(())
}

async fn run_column_create(
    runtime: &Runtime,
    client: &FavroClient,
    board_id: &str,
    args: &ColumnCreateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let column = client
        .create_column(board_id, &args.name, args.position)
        .await?;
    report(runtime, "Created", &column)
}

async fn run_column_update(
    runtime: &Runtime,
    client: &FavroClient,
    board_id: &str,
    column: &str,
    update: &ColumnUpdate,
) -> Result<(), Box<dyn std::error::Error>> {
    let existing = client.find_column(board_id, column).await?;
    let updated = client.update_column(&existing.column_id, update).await?;
    report(runtime, "Updated", &updated)
}

async fn run_column_delete(
    runtime: &Runtime,
    client: &FavroClient,
    board_id: &str,
    args: &ColumnDeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let column = client.find_column(board_id, &args.column).await?;

    let prompt = format!(
        "Delete column '{}' and its {} card(s)?",
        column.name, column.card_count
    );
    if !confirm_action(&prompt, args.force, runtime.quiet)? {
        println!("Aborted. Pass --force to delete without asking.");
        return Ok(());
    }

    client.delete_column(&column.column_id).await?;
    if runtime.json {
        print_json(&column)?;
    } else {
        println!("✓ Deleted column '{}' ({})", column.name, column.column_id);
    }
    Ok(())
}

fn report(runtime: &Runtime, verb: &str, column: &Column) -> Result<(), Box<dyn std::error::Error>> {
    if runtime.json {
        print_json(column)?;
    } else {
        println!(
            "✓ {} column '{}' ({}) at position {}",
            verb, column.name, column.column_id, column.position
        );
    }
    Ok(())
}
