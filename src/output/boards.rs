//! Board output formatter

use comfy_table::Table;
use serde::Serialize;

use super::common::{current_marker, plain_table, print_json, truncate};
use crate::favro::{Board, Card, Column, FavroResource};

/// Longest card name shown in the board overview
const MAX_NAME_CHARS: usize = 48;

/// Output boards, marking the selected one
pub fn output_boards(
    boards: &[Board],
    current: Option<&str>,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        return print_json(boards);
    }
    if boards.is_empty() {
        println!("No boards found.");
        return Ok(());
    }
    println!("{}", boards_table(boards, current));
    Ok(())
}

fn boards_table(boards: &[Board], current: Option<&str>) -> Table {
    let mut table = plain_table(vec!["", "ID", "Name", "Archived"]);
    for board in boards {
        table.add_row(vec![
            current_marker(board.id(), current).to_string(),
            board.id().to_string(),
            board.name().to_string(),
            if board.archived { "yes" } else { "" }.to_string(),
        ]);
    }
    table
}

/// One column of the board overview with its leading cards
#[derive(Serialize, Debug)]
struct ColumnOverview<'a> {
    #[serde(flatten)]
    column: &'a Column,
    total_cards: usize,
    cards: Vec<&'a Card>,
}

#[derive(Serialize, Debug)]
struct BoardOverview<'a> {
    #[serde(flatten)]
    board: &'a Board,
    columns: Vec<ColumnOverview<'a>>,
}

impl<'a> BoardOverview<'a> {
    fn new(board: &'a Board, columns: &'a [Column], cards: &'a [Card], limit: usize) -> Self {
        let columns = columns
            .iter()
            .map(|column| {
                let in_column: Vec<&Card> = cards
                    .iter()
                    .filter(|card| card.column_id.as_deref() == Some(column.id()))
                    .collect();
                ColumnOverview {
                    column,
                    total_cards: in_column.len(),
                    cards: in_column.into_iter().take(limit).collect(),
                }
            })
            .collect();
        Self { board, columns }
    }
}

/// Output a board with its columns and the first `limit` cards of each column
pub fn output_board_overview(
    board: &Board,
    columns: &[Column],
    cards: &[Card],
    limit: usize,
    json: bool,
) -> Result<(), serde_json::Error> {
    let overview = BoardOverview::new(board, columns, cards, limit);
    if json {
        return print_json(&overview);
    }
    print!("{}", render_overview(&overview));
    Ok(())
}

fn render_overview(overview: &BoardOverview<'_>) -> String {
    let mut out = format!(
        "{} ({})\n",
        overview.board.name, overview.board.widget_common_id
    );
    if overview.columns.is_empty() {
        out.push_str("\nNo columns.\n");
        return out;
    }
    for column in &overview.columns {
        out.push_str(&format!(
            "\n{} [{}]\n",
            column.column.name, column.total_cards
        ));
        for card in &column.cards {
            out.push_str(&format!(
                "  {:>6}  {}\n",
                card.reference(),
                truncate(&card.name, MAX_NAME_CHARS)
            ));
        }
        let hidden = column.total_cards - column.cards.len();
        if hidden > 0 {
            out.push_str(&format!("  ... {} more\n", hidden));
        }
    }
    out
}
