//! Board command handlers

use log::debug;

use crate::cli::{BoardAction, BoardListArgs, BoardShowArgs};
use crate::context::SessionScope;
use crate::favro::CardFilter;
use crate::output::{output_board_overview, output_boards, print_json};
use crate::runtime::Runtime;
use crate::ui::{create_spinner, finish_spinner};

/// Dispatch board subcommands
pub async fn run_board_command(
    runtime: &Runtime,
    action: &BoardAction,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        BoardAction::List(args) => run_board_list(runtime, args).await,
        BoardAction::Select { target } => run_board_select(runtime, target).await,
        BoardAction::Current => run_board_current(runtime).await,
        BoardAction::Show(args) => run_board_show(runtime, args).await,
    }
}

async fn run_board_list(
    runtime: &Runtime,
    args: &BoardListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Organization)?;

    let spinner = create_spinner("Fetching boards...", runtime.quiet);
    let boards = client
        .list_boards(args.collection.as_deref(), args.archived)
        .await;
    finish_spinner(spinner);
    let boards = boards?;

    debug!("Found {} boards", boards.len());
    output_boards(&boards, client.session().board_id(), runtime.json)?;
    Ok(())
}

async fn run_board_select(runtime: &Runtime, target: &str) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Account)?;
    let explicit_org = runtime.overrides.cli.organization_id.as_deref();

    let spinner = create_spinner("Looking up board...", runtime.quiet);
    let selected = runtime
        .context_manager()
        .select_board(&client, target, explicit_org)
        .await;
    finish_spinner(spinner);
    let board = selected?;

    if runtime.json {
        print_json(&board)?;
    } else {
        println!(
            "✓ Selected board '{}' ({}) in organization {}",
            board.name, board.widget_common_id, board.organization_id
        );
    }
    Ok(())
}

async fn run_board_current(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Organization)?;
    let board_id = client.session().require_board()?;

    let spinner = create_spinner("Fetching board...", runtime.quiet);
    let board = client.get_board(board_id).await;
    finish_spinner(spinner);
    let board = board?;

    output_boards(std::slice::from_ref(&board), Some(board_id), runtime.json)?;
    Ok(())
}

async fn run_board_show(
    runtime: &Runtime,
    args: &BoardShowArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Organization)?;

    let spinner = create_spinner("Fetching board...", runtime.quiet);
    let fetched = async {
        let board = client.resolve_board(args.target.as_deref()).await?;
        let columns = client.list_columns(&board.widget_common_id).await?;
        let cards = client
            .list_cards(&CardFilter::board(&board.widget_common_id))
            .await?;
        Ok::<_, crate::error::FavroError>((board, columns, cards))
    }
    .await;
    finish_spinner(spinner);
    let (board, columns, cards) = fetched?;

    debug!(
        "Board '{}' has {} columns and {} cards",
        board.widget_common_id,
        columns.len(),
        cards.len()
    );
    output_board_overview(&board, &columns, &cards, args.limit, runtime.json)?;
    Ok(())
}
