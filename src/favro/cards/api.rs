//! Card API operations

use log::debug;
use reqwest::Method;

use crate::config::api;
use crate::error::{FavroError, Result};
use crate::favro::traits::{find_match, Query};
use crate::favro::FavroClient;

use super::models::{parse_sequential_id, Card, CardDraft, CardFilter, CardUpdate};

impl FavroClient {
    /// List cards matching `filter` (at least one criterion is required)
    pub async fn list_cards(&self, filter: &CardFilter) -> Result<Vec<Card>> {
        self.session().require_organization()?;
        if filter.is_empty() {
            return Err(FavroError::invalid(
                "At least one filter is required: board, column, collection or card number",
            ));
        }
        let sequential_id = filter.sequential_id.map(|id| id.to_string());
        let query = Query::new()
            .push_opt("widgetCommonId", filter.board_id.as_deref())
            .push_opt("columnId", filter.column_id.as_deref())
            .push_opt("collectionId", filter.collection_id.as_deref())
            .push_opt("cardSequentialId", sequential_id.as_deref());
        debug!("Fetching cards with filter {:?}", filter);
        self.fetch_all(api::CARDS, query).await
    }

    /// Get a single card by card ID
    pub async fn get_card(&self, card_id: &str) -> Result<Card> {
        self.session().require_organization()?;
        let path = format!("{}/{}", api::CARDS, urlencoding::encode(card_id));
        debug!("Fetching card '{}'", card_id);
        self.get(&path, &Query::new()).await
    }

    /// Find a card by ID, `#<sequentialId>` or name.
    ///
    /// Name lookup needs a board to search in.
    pub async fn find_card(&self, input: &str, board_id: Option<&str>) -> Result<Card> {
        let not_found = || FavroError::not_found(format!("Card '{}' not found", input));

        if let Some(sequential_id) = parse_sequential_id(input) {
            let filter = CardFilter {
                board_id: board_id.map(str::to_string),
                sequential_id: Some(sequential_id),
                ..CardFilter::default()
            };
            let cards = self.list_cards(&filter).await?;
            return cards.into_iter().next().ok_or_else(not_found);
        }

        match self.get_card(input).await {
            Ok(card) => Ok(card),
            Err(FavroError::NotFound { status, .. }) => {
                let Some(board_id) = board_id else {
                    return Err(FavroError::NotFound {
                        status,
                        message: format!("Card '{}' not found", input),
                    });
                };
                debug!("Card '{}' not found by ID, searching board '{}'", input, board_id);
                let cards = self.list_cards(&CardFilter::board(board_id)).await?;
                find_match(&cards, input).cloned().ok_or_else(not_found)
            }
            Err(e) => Err(e),
        }
    }

    /// Create a card
    pub async fn create_card(&self, draft: &CardDraft) -> Result<Card> {
        self.session().require_organization()?;
        if draft.name.trim().is_empty() {
            return Err(FavroError::invalid("Card name must not be empty"));
        }
        if draft.column_id.is_some() && draft.board_id.is_none() {
            return Err(FavroError::invalid("A column requires its board"));
        }
        debug!("Creating card '{}'", draft.name);
        self.request(Method::POST, api::CARDS, &Query::new(), Some(&draft.to_body()))
            .await
    }

    /// Update a card (fields, column move, assignments, tags)
    pub async fn update_card(&self, card_id: &str, update: &CardUpdate) -> Result<Card> {
        self.session().require_organization()?;
        if update.is_empty() {
            return Err(FavroError::invalid("Nothing to update"));
        }
        if update.column_id.is_some() && update.board_id.is_none() {
            return Err(FavroError::invalid("Moving a card requires its board"));
        }
        let path = format!("{}/{}", api::CARDS, urlencoding::encode(card_id));
        debug!("Updating card '{}'", card_id);
        self.request(Method::PUT, &path, &Query::new(), Some(&update.to_body()))
            .await
    }

    /// Delete a card from its board, or from every board with `everywhere`
    pub async fn delete_card(&self, card_id: &str, everywhere: bool) -> Result<()> {
        self.session().require_organization()?;
        let path = format!("{}/{}", api::CARDS, urlencoding::encode(card_id));
        let query = Query::new().push_opt("everywhere", everywhere.then_some("true"));
        debug!("Deleting card '{}' (everywhere={})", card_id, everywhere);
        self.request_empty(Method::DELETE, &path, &query, None).await
    }
}
