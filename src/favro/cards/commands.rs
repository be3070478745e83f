//! Card command handlers

use log::debug;

use crate::cli::{
    CardAction, CardAssignArgs, CardCreateArgs, CardDeleteArgs, CardListArgs, CardMoveArgs,
    CardTagArgs, CardUpdateArgs,
};
use crate::context::SessionScope;
use crate::error::FavroError;
use crate::favro::traits::find_match;
use crate::favro::{Card, CardDraft, CardFilter, CardUpdate, FavroClient, FavroResource};
use crate::output::{output_card, output_cards, print_json};
use crate::runtime::Runtime;
use crate::ui::{confirm_action, create_spinner, finish_spinner};

/// Dispatch card subcommands
pub async fn run_card_command(
    runtime: &Runtime,
    action: &CardAction,
) -> Result<(), Box<dyn std::error::Error>> {
    let client = runtime.client(SessionScope::Organization)?;

    match action {
        CardAction::List(args) => run_card_list(runtime, &client, args).await,
        CardAction::Show { card } => run_card_show(runtime, &client, card).await,
        CardAction::Create(args) => run_card_create(runtime, &client, args).await,
        CardAction::Update(args) => run_card_update(runtime, &client, args).await,
        CardAction::Move(args) => run_card_move(runtime, &client, args).await,
        CardAction::Assign(args) => run_card_assign(runtime, &client, args).await,
        CardAction::Tag(args) => run_card_tag(runtime, &client, args).await,
        CardAction::Delete(args) => run_card_delete(runtime, &client, args).await,
    }
}

async fn run_card_list(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner("Fetching cards...", runtime.quiet);
    let fetched = async {
        if let Some(collection) = &args.collection {
            let filter = CardFilter {
                collection_id: Some(collection.clone()),
                ..CardFilter::default()
            };
            return Ok((client.list_cards(&filter).await?, Vec::new()));
        }

        let board_id = client.session().require_board()?;
        let columns = client.list_columns(board_id).await?;
        let mut filter = CardFilter::board(board_id);
        if let Some(column) = &args.column {
            let column = find_match(&columns, column).ok_or_else(|| {
                FavroError::not_found(format!(
                    "Column '{}' not found on board '{}'",
                    column, board_id
                ))
            })?;
            filter.column_id = Some(column.column_id.clone());
        }
        Ok::<_, FavroError>((client.list_cards(&filter).await?, columns))
    }
    .await;
    finish_spinner(spinner);
    let (cards, columns) = fetched?;

    debug!("Found {} cards", cards.len());
    output_cards(&cards, &columns, runtime.json)?;
    Ok(())
}

async fn run_card_show(
    runtime: &Runtime,
    client: &FavroClient,
    input: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = client.find_card(input, client.session().board_id()).await?;

    let column = match (&card.widget_common_id, &card.column_id) {
        (Some(board_id), Some(column_id)) if !runtime.json => client
            .list_columns(board_id)
            .await?
            .into_iter()
            .find(|c| c.id() == column_id.as_str()),
        _ => None,
    };

    output_card(&card, column.as_ref(), runtime.json)?;
    Ok(())
}

async fn run_card_create(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardCreateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let board_id = client.session().require_board()?;
    let column_id = match &args.column {
        Some(column) => Some(client.find_column(board_id, column).await?.column_id),
        None => None,
    };

    let draft = CardDraft {
        name: args.name.clone(),
        board_id: Some(board_id.to_string()),
        column_id,
        description: args.description.clone(),
    };
    let card = client.create_card(&draft).await?;
    report(runtime, "Created", &card)
}

async fn run_card_update(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardUpdateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let update = CardUpdate {
        name: args.name.clone(),
        description: args.description.clone(),
        ..CardUpdate::default()
    };
    if update.is_empty() {
        return Err(FavroError::invalid("Nothing to update: pass --name or --description").into());
    }

    let card = client.find_card(&args.card, client.session().board_id()).await?;
    let updated = client.update_card(&card.card_id, &update).await?;
    report(runtime, "Updated", &updated)
}

async fn run_card_move(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardMoveArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = client.find_card(&args.card, client.session().board_id()).await?;
    let board_id = match card.widget_common_id.as_deref() {
        Some(board_id) => board_id,
        None => client.session().require_board()?,
    };
    let column = client.find_column(board_id, &args.column).await?;

    let update = CardUpdate {
        board_id: Some(board_id.to_string()),
        column_id: Some(column.column_id.clone()),
        ..CardUpdate::default()
    };
    let moved = client.update_card(&card.card_id, &update).await?;

    if runtime.json {
        print_json(&moved)?;
    } else {
        println!(
            "✓ Moved card {} '{}' to column '{}'",
            moved.reference(),
            moved.name,
            column.name
        );
    }
    Ok(())
}

async fn run_card_assign(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardAssignArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = client.find_card(&args.card, client.session().board_id()).await?;

    let users = client.list_users().await?;
    let user_ids = args
        .users
        .iter()
        .map(|input| {
            find_match(&users, input)
                .map(|user| user.user_id.clone())
                .ok_or_else(|| FavroError::not_found(format!("User '{}' not found", input)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let update = if args.remove {
        CardUpdate {
            remove_assignments: user_ids,
            ..CardUpdate::default()
        }
    } else {
        CardUpdate {
            add_assignments: user_ids,
            ..CardUpdate::default()
        }
    };
    let updated = client.update_card(&card.card_id, &update).await?;
    report(runtime, "Updated", &updated)
}

async fn run_card_tag(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardTagArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = client.find_card(&args.card, client.session().board_id()).await?;

    let update = if args.remove {
        CardUpdate {
            remove_tags: args.tags.clone(),
            ..CardUpdate::default()
        }
    } else {
        CardUpdate {
            add_tags: args.tags.clone(),
            ..CardUpdate::default()
        }
    };
    let updated = client.update_card(&card.card_id, &update).await?;
    report(runtime, "Updated", &updated)
}

async fn run_card_delete(
    runtime: &Runtime,
    client: &FavroClient,
    args: &CardDeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let card = client.find_card(&args.card, client.session().board_id()).await?;

    let scope = if args.everywhere { " from every board" } else { "" };
    let prompt = format!("Delete card {} '{}'{}?", card.reference(), card.name, scope);
    if !confirm_action(&prompt, args.force, runtime.quiet)? {
        println!("Aborted. Pass --force to delete without asking.");
        return Ok(());
    }

    client.delete_card(&card.card_id, args.everywhere).await?;
    if runtime.json {
        print_json(&card)?;
    } else {
        println!("✓ Deleted card {} '{}'", card.reference(), card.name);
    }
    Ok(())
}

fn report(runtime: &Runtime, verb: &str, card: &Card) -> Result<(), Box<dyn std::error::Error>> {
    if runtime.json {
        print_json(card)?;
    } else {
        println!("✓ {} card {} '{}'", verb, card.reference(), card.name);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, ContextPersistence, Credentials, CredentialStore, Overrides};
    use crate::favro::client::test_settings;
    use serde_json::json;
    use tempfile::TempDir;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn runtime(server: &MockServer, dir: &TempDir) -> Runtime {
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        store.save(&Credentials::new("tok")).unwrap();
        store
            .save_context(&Context::with_board("org-1", "b-1"))
            .unwrap();
        Runtime {
            store,
            overrides: Overrides::default(),
            settings: test_settings(&server.uri()),
            json: true,
            quiet: true,
        }
    }

    fn page(entities: serde_json::Value) -> serde_json::Value {
        json!({"limit": 100, "page": 0, "pages": 1, "requestId": "r-1", "entities": entities})
    }

    fn card_json() -> serde_json::Value {
        json!({
            "cardId": "card-1", "cardCommonId": "common-1", "organizationId": "org-1",
            "widgetCommonId": "b-1", "columnId": "c-1", "name": "Fix login", "sequentialId": 12
        })
    }

    async fn mount_card_by_number(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/cards"))
            .and(query_param("cardSequentialId", "12"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([card_json()]))))
            .mount(server)
            .await;
    }

    async fn mount_columns(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/columns"))
            .and(query_param("widgetCommonId", "b-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
                {"columnId": "c-1", "organizationId": "org-1", "widgetCommonId": "b-1", "name": "Todo", "position": 0},
                {"columnId": "c-2", "organizationId": "org-1", "widgetCommonId": "b-1", "name": "Done", "position": 1}
            ]))))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_move_sends_board_and_column() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        mount_card_by_number(&server).await;
        mount_columns(&server).await;

        Mock::given(method("PUT"))
            .and(path("/cards/card-1"))
            .and(body_json(json!({"widgetCommonId": "b-1", "columnId": "c-2"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
            .expect(1)
            .mount(&server)
            .await;

        let action = CardAction::Move(CardMoveArgs {
            card: "#12".to_string(),
            column: "done".to_string(),
        });
        run_card_command(&runtime(&server, &dir), &action).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_filters_by_column_name() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        mount_columns(&server).await;

        Mock::given(method("GET"))
            .and(path("/cards"))
            .and(query_param("widgetCommonId", "b-1"))
            .and(query_param("columnId", "c-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([card_json()]))))
            .expect(1)
            .mount(&server)
            .await;

        let action = CardAction::List(CardListArgs {
            column: Some("Todo".to_string()),
            collection: None,
        });
        run_card_command(&runtime(&server, &dir), &action).await.unwrap();
    }

    #[tokio::test]
    async fn test_assign_resolves_users() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        mount_card_by_number(&server).await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
                {"userId": "u-7", "name": "Dev", "email": "dev@example.com"}
            ]))))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/cards/card-1"))
            .and(body_json(json!({"addAssignmentIds": ["u-7"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
            .expect(1)
            .mount(&server)
            .await;

        let action = CardAction::Assign(CardAssignArgs {
            card: "#12".to_string(),
            users: vec!["dev@example.com".to_string()],
            remove: false,
        });
        run_card_command(&runtime(&server, &dir), &action).await.unwrap();
    }

    #[tokio::test]
    async fn test_assign_unknown_user_sends_nothing() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        mount_card_by_number(&server).await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([]))))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
            .expect(0)
            .mount(&server)
            .await;

        let action = CardAction::Assign(CardAssignArgs {
            card: "#12".to_string(),
            users: vec!["ghost".to_string()],
            remove: false,
        });
        let err = run_card_command(&runtime(&server, &dir), &action)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("ghost"));
    }

    #[tokio::test]
    async fn test_assign_empty_user_matches_nobody() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        mount_card_by_number(&server).await;

        Mock::given(method("GET"))
            .and(path("/users"))
            .respond_with(ResponseTemplate::new(200).set_body_json(page(json!([
                {"userId": "u-9", "name": "Integration Bot"}
            ]))))
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card_json()))
            .expect(0)
            .mount(&server)
            .await;

        let action = CardAction::Assign(CardAssignArgs {
            card: "#12".to_string(),
            users: vec![String::new()],
            remove: false,
        });
        let err = run_card_command(&runtime(&server, &dir), &action)
            .await
            .unwrap_err();
        let err = err.downcast_ref::<FavroError>().unwrap();
        assert_eq!(err.kind(), crate::error::ErrorKind::NotFound);
        assert_eq!(err.status(), None);
    }

    #[tokio::test]
    async fn test_delete_everywhere_with_force() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();
        mount_card_by_number(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/cards/card-1"))
            .and(query_param("everywhere", "true"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let action = CardAction::Delete(CardDeleteArgs {
            card: "#12".to_string(),
            everywhere: true,
            force: true,
        });
        run_card_command(&runtime(&server, &dir), &action).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_without_changes_is_rejected_locally() {
        let server = MockServer::start().await;
        let dir = TempDir::new().unwrap();

        let action = CardAction::Update(CardUpdateArgs {
            card: "#12".to_string(),
            name: None,
            description: None,
        });
        let err = run_card_command(&runtime(&server, &dir), &action)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Nothing to update"));
        assert!(server.received_requests().await.unwrap_or_default().is_empty());
    }
}
