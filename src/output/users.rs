//! User output formatter

use super::common::print_json;
use crate::favro::User;

/// Output the authenticated user
pub fn output_user(user: &User, organization_id: &str, json: bool) -> Result<(), serde_json::Error> {
    if json {
        return print_json(user);
    }
    println!("{}", user.name);
    println!("  ID:           {}", user.user_id);
    if !user.email().is_empty() {
        println!("  Email:        {}", user.email());
    }
    if !user.role().is_empty() {
        println!("  Role:         {}", user.role());
    }
    println!("  Organization: {}", organization_id);
    Ok(())
}
