//! Card output formatter

use comfy_table::Table;

use super::common::{plain_table, print_json, truncate};
use crate::favro::{Card, Column, FavroResource};

/// Longest card name shown in a listing
const MAX_NAME_CHARS: usize = 60;

/// Output a card listing. `columns` is used to show column names instead of IDs.
pub fn output_cards(cards: &[Card], columns: &[Column], json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(cards);
    }
    if cards.is_empty() {
        println!("No cards found.");
        return Ok(());
    }
    println!("{}", cards_table(cards, columns));
    Ok(())
}

/// Output the details of one card
pub fn output_card(card: &Card, column: Option<&Column>, json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(card);
    }
    print!("{}", card_details(card, column));
    Ok(())
}

fn column_label(card: &Card, columns: &[Column]) -> String {
    match card.column_id.as_deref() {
        Some(column_id) => columns
            .iter()
            .find(|c| c.id() == column_id)
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| column_id.to_string()),
        None => String::new(),
    }
}

fn cards_table(cards: &[Card], columns: &[Column]) -> Table {
    let mut table = plain_table(vec!["#", "ID", "Name", "Column", "Assignees", "Tags"]);
    for card in cards {
        table.add_row(vec![
            card.reference(),
            card.id().to_string(),
            truncate(card.name(), MAX_NAME_CHARS),
            column_label(card, columns),
            card.assignments.len().to_string(),
            card.tags.join(", "),
        ]);
    }
    table
}

fn card_details(card: &Card, column: Option<&Column>) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} {}\n", card.reference(), card.name));
    out.push_str(&format!("  ID:          {}\n", card.card_id));
    out.push_str(&format!("  Common ID:   {}\n", card.card_common_id));
    if let Some(board_id) = &card.widget_common_id {
        out.push_str(&format!("  Board:       {}\n", board_id));
    }
    match (column, card.column_id.as_deref()) {
        (Some(column), _) => out.push_str(&format!("  Column:      {}\n", column.name)),
        (None, Some(column_id)) => out.push_str(&format!("  Column:      {}\n", column_id)),
        (None, None) => {}
    }
    if !card.assignments.is_empty() {
        out.push_str(&format!("  Assignees:   {}\n", card.assignee_ids().join(", ")));
    }
    if !card.tags.is_empty() {
        out.push_str(&format!("  Tags:        {}\n", card.tags.join(", ")));
    }
    if let Some(due) = card.due_date {
        out.push_str(&format!("  Due:         {}\n", due.format("%Y-%m-%d")));
    }
    if card.tasks_total > 0 {
        out.push_str(&format!(
            "  Tasks:       {}/{}\n",
            card.tasks_done, card.tasks_total
        ));
    }
    if card.archived {
        out.push_str("  Archived:    yes\n");
    }
    if let Some(description) = card.detailed_description.as_deref().filter(|d| !d.is_empty()) {
        out.push('\n');
        for line in description.lines() {
            out.push_str(&format!("  {}\n", line));
        }
    }
    out
}
