//! Column output formatter

use comfy_table::Table;

use super::common::{plain_table, print_json};
use crate::favro::{Column, FavroResource};

pub fn output_columns(columns: &[Column], json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(columns);
    }
    if columns.is_empty() {
        println!("No columns found.");
        return Ok(());
    }
    println!("{}", columns_table(columns));
    Ok(())
}

fn columns_table(columns: &[Column]) -> Table {
    let mut table = plain_table(vec!["Position", "ID", "Name", "Cards"]);
    for column in columns {
        table.add_row(vec![
            column.position.to_string(),
            column.id().to_string(),
            column.name().to_string(),
            column.card_count.to_string(),
        ]);
    }
    table
}
