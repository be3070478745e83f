//! Organization output formatter

use comfy_table::Table;

use super::common::{current_marker, plain_table, print_json};
use crate::favro::{FavroResource, Organization};

/// Output organizations, marking the selected one
pub fn output_organizations(
    organizations: &[Organization],
    current: Option<&str>,
    json: bool,
) -> Result<(), serde_json::Error> {
    if json {
        return print_json(organizations);
    }
    if organizations.is_empty() {
        println!("No organizations found.");
        return Ok(());
    }
    println!("{}", organizations_table(organizations, current));
    Ok(())
}

fn organizations_table(organizations: &[Organization], current: Option<&str>) -> Table {
    let mut table = plain_table(vec!["", "ID", "Name", "Members"]);
    for org in organizations {
        table.add_row(vec![
            current_marker(org.id(), current).to_string(),
            org.id().to_string(),
            org.name().to_string(),
            org.member_count().to_string(),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_table_marks_current_organization() {
        let orgs: Vec<Organization> = serde_json::from_value(json!([
            {"organizationId": "org-1", "name": "Acme", "sharedToUsers": [{"userId": "u-1"}]},
            {"organizationId": "org-2", "name": "Globex"}
        ]))
        .unwrap();

        let rendered = organizations_table(&orgs, Some("org-2")).to_string();
        let globex = rendered
            .lines()
            .find(|line| line.contains("Globex"))
            .unwrap();
        assert!(globex.contains('*'));
        let acme = rendered.lines().find(|line| line.contains("Acme")).unwrap();
        assert!(!acme.contains('*'));
        assert!(acme.contains('1'));
    }
}
