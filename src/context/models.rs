//! Credential and context data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// On-disk configuration document (~/.favroctl/config.json)
///
/// Credentials and context live in one document so every write replaces both
/// together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigFile {
    /// API token (secret)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Account email the token belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
    /// Selected organization
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<String>,
    /// Selected board (only meaningful together with organization_id)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub board_id: Option<String>,
}

impl ConfigFile {
    /// Stored credentials, if a non-empty token is present
    pub fn credentials(&self) -> Option<Credentials> {
        let token = self.token.as_deref().filter(|t| !t.is_empty())?;
        Some(Credentials {
            token: token.to_string(),
            email: self.email.clone(),
            issued_at: self.issued_at,
            expires_at: self.expires_at,
        })
    }

    pub fn set_credentials(&mut self, credentials: &Credentials) {
        self.token = Some(credentials.token.clone());
        self.email = credentials.email.clone();
        self.issued_at = credentials.issued_at;
        self.expires_at = credentials.expires_at;
    }

    pub fn clear_credentials(&mut self) {
        self.token = None;
        self.email = None;
        self.issued_at = None;
        self.expires_at = None;
    }

    pub fn context(&self) -> Context {
        Context {
            organization_id: self.organization_id.clone(),
            board_id: self.board_id.clone(),
        }
    }

    pub fn set_context(&mut self, context: &Context) {
        self.organization_id = context.organization_id.clone();
        self.board_id = context.board_id.clone();
    }
}

/// Authentication material for the remote service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub token: String,
    pub email: Option<String>,
    pub issued_at: Option<DateTime<Utc>>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl Credentials {
    /// Credentials issued now with no expiry
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            email: None,
            issued_at: Some(Utc::now()),
            expires_at: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Whether the token is expired at the given instant (no expiry = never)
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires| expires <= now)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Persisted "current organization/board" selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Context {
    pub organization_id: Option<String>,
    pub board_id: Option<String>,
}

/// Lifecycle view of a [`Context`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextState<'a> {
    Unset,
    OrganizationSelected {
        organization_id: &'a str,
    },
    BoardSelected {
        organization_id: &'a str,
        board_id: &'a str,
    },
}

impl Context {
    pub fn state(&self) -> ContextState<'_> {
        match (self.organization_id.as_deref(), self.board_id.as_deref()) {
            (Some(organization_id), Some(board_id)) => ContextState::BoardSelected {
                organization_id,
                board_id,
            },
            (Some(organization_id), None) => ContextState::OrganizationSelected { organization_id },
            // A board without an organization is never written; treat it as unset.
            (None, _) => ContextState::Unset,
        }
    }

    /// Transition to `organization_id`.
    ///
    /// Switching to a different organization drops the board selection;
    /// re-selecting the current organization keeps it.
    pub fn with_organization(&self, organization_id: &str) -> Context {
        match self.state() {
            ContextState::BoardSelected {
                organization_id: current,
                board_id,
            } if current == organization_id => Context {
                organization_id: Some(organization_id.to_string()),
                board_id: Some(board_id.to_string()),
            },
            _ => Context {
                organization_id: Some(organization_id.to_string()),
                board_id: None,
            },
        }
    }

    /// Transition to a board inside `organization_id`
    pub fn with_board(organization_id: &str, board_id: &str) -> Context {
        Context {
            organization_id: Some(organization_id.to_string()),
            board_id: Some(board_id.to_string()),
        }
    }
}
