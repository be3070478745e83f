//! Context command handler

use serde::Serialize;

use crate::output::print_json;
use crate::runtime::Runtime;

use super::models::ConfigFile;

/// Persisted configuration as shown to the user (token masked)
#[derive(Serialize, Debug, PartialEq, Eq)]
struct ContextView {
    config_path: String,
    token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expires_at: Option<String>,
    organization_id: Option<String>,
    board_id: Option<String>,
}

impl ContextView {
    fn new(config_path: String, document: &ConfigFile) -> Self {
        let context = document.context();
        let board_id = context.organization_id.as_ref().and(context.board_id);
        Self {
            config_path,
            token: mask_token(document.token.as_deref()),
            email: document.email.clone(),
            expires_at: document.expires_at.map(|t| t.to_rfc3339()),
            organization_id: context.organization_id,
            board_id,
        }
    }
}

/// Show the persisted context. Reads the config file only, never the network.
pub fn run_context_command(runtime: &Runtime) -> Result<(), Box<dyn std::error::Error>> {
    let document = runtime.store.read_document()?.unwrap_or_default();
    let view = ContextView::new(runtime.store.path().display().to_string(), &document);

    if runtime.json {
        print_json(&view)?;
        return Ok(());
    }

    println!("Config file:  {}", view.config_path);
    println!("Token:        {}", view.token);
    if let Some(email) = &view.email {
        println!("Email:        {}", email);
    }
    if let Some(expires_at) = &view.expires_at {
        println!("Expires at:   {}", expires_at);
    }
    println!(
        "Organization: {}",
        view.organization_id.as_deref().unwrap_or("<not set>")
    );
    println!(
        "Board:        {}",
        view.board_id.as_deref().unwrap_or("<not set>")
    );

    Ok(())
}

/// Mask a token for display, show last 4 chars or "<not set>"
pub(crate) fn mask_token(token: Option<&str>) -> String {
    match token {
        Some(t) if t.chars().count() >= 8 => {
            let tail: String = t.chars().skip(t.chars().count() - 4).collect();
            format!("****{}", tail)
        }
        Some(t) if !t.is_empty() => "****".to_string(),
        _ => "<not set>".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{Context, Credentials};

    #[test]
    fn test_mask_token_long() {
        assert_eq!(mask_token(Some("abcdefghijklmnop")), "****mnop");
    }

    #[test]
    fn test_mask_token_short() {
        assert_eq!(mask_token(Some("abcd")), "****");
    }

    #[test]
    fn test_mask_token_none() {
        assert_eq!(mask_token(None), "<not set>");
        assert_eq!(mask_token(Some("")), "<not set>");
    }

    #[test]
    fn test_view_masks_token() {
        let mut document = ConfigFile::default();
        document.set_credentials(&Credentials::new("secret-token-1234").with_email("dev@example.com"));
        document.set_context(&Context::with_board("org-1", "b-1"));

        let view = ContextView::new("/tmp/config.json".to_string(), &document);

        assert_eq!(view.token, "****1234");
        assert_eq!(view.email.as_deref(), Some("dev@example.com"));
        assert_eq!(view.organization_id.as_deref(), Some("org-1"));
        assert_eq!(view.board_id.as_deref(), Some("b-1"));
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("secret-token"));
    }

    #[test]
    fn test_view_hides_orphan_board() {
        let document = ConfigFile {
            board_id: Some("b-1".to_string()),
            ..Default::default()
        };
        let view = ContextView::new("/tmp/config.json".to_string(), &document);
        assert!(view.organization_id.is_none());
        assert!(view.board_id.is_none());
        assert_eq!(view.token, "<not set>");
    }
}
