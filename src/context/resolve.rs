//! Session resolution from CLI flags, environment values and the config file

use std::fmt;

use log::debug;

use crate::config::env as env_config;
use crate::error::{FavroError, Result};

use super::models::{ConfigFile, Credentials};
use super::store::CredentialStore;

/// Where a resolved value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSource {
    Cli,
    Env,
    Stored,
}

/// One layer of override values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideValues {
    pub token: Option<String>,
    /// Account email paired with the token (enables Basic auth)
    pub email: Option<String>,
    pub organization_id: Option<String>,
    pub board_id: Option<String>,
}

impl OverrideValues {
    /// Build the environment layer from a variable lookup.
    ///
    /// The binary passes `std::env::var`; the core itself never touches the
    /// process environment. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        Self {
            token: get(env_config::TOKEN),
            email: get(env_config::EMAIL),
            organization_id: get(env_config::ORGANIZATION_ID),
            board_id: get(env_config::BOARD_ID),
        }
    }
}

/// Override layers handed to the resolver. CLI beats env, env beats the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub cli: OverrideValues,
    pub env: OverrideValues,
}

/// What the upcoming operation needs from the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionScope {
    /// Token only (listing organizations, login checks)
    Account,
    /// Token and an organization id
    Organization,
}

/// Per-invocation authenticated handle. Never persisted.
#[derive(Clone)]
pub struct Session {
    token: String,
    token_source: ValueSource,
    email: Option<String>,
    organization_id: Option<String>,
    board_id: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"****")
            .field("token_source", &self.token_source)
            .field("email", &self.email)
            .field("organization_id", &self.organization_id)
            .field("board_id", &self.board_id)
            .finish()
    }
}

impl Session {
    /// Build a session from credentials, refusing expired ones
    pub fn from_credentials(credentials: &Credentials, source: ValueSource) -> Result<Self> {
        if credentials.token.is_empty() {
            return Err(FavroError::Unauthenticated {
                status: None,
                message: "Empty API token".to_string(),
            });
        }
        if credentials.is_expired() {
            return Err(FavroError::Unauthenticated {
                status: None,
                message: format!(
                    "Stored token expired at {}. Run 'favroctl login' again.",
                    credentials
                        .expires_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_default()
                ),
            });
        }
        Ok(Self {
            token: credentials.token.clone(),
            token_source: source,
            email: credentials.email.clone(),
            organization_id: None,
            board_id: None,
        })
    }

    /// Scope the session to an organization (drops any board)
    pub fn with_organization(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self.board_id = None;
        self
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn token_source(&self) -> ValueSource {
        self.token_source
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id.as_deref()
    }

    pub fn board_id(&self) -> Option<&str> {
        self.board_id.as_deref()
    }

    /// Organization id or `NoOrganizationSelected`
    pub fn require_organization(&self) -> Result<&str> {
        self.organization_id
            .as_deref()
            .ok_or(FavroError::NoOrganizationSelected)
    }

    /// Board id, or a validation error pointing at `board select`
    pub fn require_board(&self) -> Result<&str> {
        self.board_id.as_deref().ok_or_else(|| {
            FavroError::invalid(
                "No board selected. Run 'favroctl board select <id>' or pass --board.",
            )
        })
    }
}

/// Derives a [`Session`] from override layers and the credential store
pub struct SessionResolver<'a> {
    store: &'a CredentialStore,
}

impl<'a> SessionResolver<'a> {
    pub fn new(store: &'a CredentialStore) -> Self {
        Self { store }
    }

    /// Resolve the session for one invocation.
    ///
    /// Per field (token, organization id, board id) the first layer that
    /// supplies a value wins: CLI flag, then environment, then the config
    /// file. A value supplied by a higher layer is never replaced by a lower
    /// one. A stored board is only used when the resolved organization is the
    /// stored one. No network calls are made.
    pub fn resolve(&self, overrides: &Overrides, scope: SessionScope) -> Result<Session> {
        let cli = &overrides.cli;
        let env = &overrides.env;

        reject_empty("--token", cli.token.as_deref())?;
        reject_empty("--email", cli.email.as_deref())?;
        reject_empty("--org", cli.organization_id.as_deref())?;
        reject_empty("--board", cli.board_id.as_deref())?;

        let needs_file = [&cli.token, &cli.organization_id, &cli.board_id]
            .iter()
            .zip([&env.token, &env.organization_id, &env.board_id])
            .any(|(c, e)| c.is_none() && e.is_none());

        let stored = if needs_file {
            self.store.read_document()?.unwrap_or_default()
        } else {
            ConfigFile::default()
        };

        let mut session = match pick(cli.token.as_deref(), env.token.as_deref()) {
            Some((token, source)) => {
                debug!("Using token from {:?}", source);
                let mut credentials = Credentials::new(token);
                if let Some((email, _)) = pick(cli.email.as_deref(), env.email.as_deref()) {
                    credentials = credentials.with_email(email);
                }
                Session::from_credentials(&credentials, source)?
            }
            None => {
                let credentials = stored.credentials().ok_or_else(|| FavroError::Unauthenticated {
                    status: None,
                    message: "Not logged in. Run 'favroctl login' first.".to_string(),
                })?;
                debug!("Using token from config file {}", self.store.path().display());
                Session::from_credentials(&credentials, ValueSource::Stored)?
            }
        };

        let stored_org = stored.organization_id.as_deref().filter(|o| !o.is_empty());
        let organization = pick(cli.organization_id.as_deref(), env.organization_id.as_deref())
            .or_else(|| stored_org.map(|o| (o, ValueSource::Stored)));

        if let Some((org, source)) = organization {
            debug!("Using organization '{}' from {:?}", org, source);
            session.organization_id = Some(org.to_string());
        }

        session.board_id = match pick(cli.board_id.as_deref(), env.board_id.as_deref()) {
            Some((board, _)) => Some(board.to_string()),
            None if stored_org.is_some() && session.organization_id.as_deref() == stored_org => {
                stored.board_id.clone()
            }
            None => None,
        };

        if scope == SessionScope::Organization && session.organization_id.is_none() {
            return Err(FavroError::NoOrganizationSelected);
        }

        Ok(session)
    }
}

fn pick<'v>(cli: Option<&'v str>, env: Option<&'v str>) -> Option<(&'v str, ValueSource)> {
    cli.map(|v| (v, ValueSource::Cli))
        .or_else(|| env.map(|v| (v, ValueSource::Env)))
}

fn reject_empty(flag: &str, value: Option<&str>) -> Result<()> {
    match value {
        Some(v) if v.trim().is_empty() => {
            Err(FavroError::invalid(format!("{} must not be empty", flag)))
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::models::Context;
    use crate::context::store::ContextPersistence;
    use crate::error::ErrorKind;
    use chrono::{Duration, Utc};
    use tempfile::TempDir;

    fn logged_in_store(dir: &TempDir) -> CredentialStore {
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        store.save(&Credentials::new("stored-token")).unwrap();
        store
    }

    fn values(token: Option<&str>, org: Option<&str>, board: Option<&str>) -> OverrideValues {
        OverrideValues {
            token: token.map(String::from),
            email: None,
            organization_id: org.map(String::from),
            board_id: board.map(String::from),
        }
    }

    #[test]
    fn test_no_config_is_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        let err = SessionResolver::new(&store)
            .resolve(&Overrides::default(), SessionScope::Account)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
    }

    #[test]
    fn test_stored_token_used() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        let session = SessionResolver::new(&store)
            .resolve(&Overrides::default(), SessionScope::Account)
            .unwrap();
        assert_eq!(session.token(), "stored-token");
        assert_eq!(session.token_source(), ValueSource::Stored);
        assert!(session.organization_id().is_none());
    }

    #[test]
    fn test_expired_stored_token_is_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        store
            .save(&Credentials::new("old").with_expiry(Utc::now() - Duration::minutes(5)))
            .unwrap();

        let err = SessionResolver::new(&store)
            .resolve(&Overrides::default(), SessionScope::Account)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthenticated);
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_cli_beats_env_beats_stored() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        store
            .save_context(&Context::default().with_organization("stored-org"))
            .unwrap();
        let resolver = SessionResolver::new(&store);

        let overrides = Overrides {
            cli: values(Some("cli-token"), Some("cli-org"), None),
            env: values(Some("env-token"), Some("env-org"), None),
        };
        let session = resolver.resolve(&overrides, SessionScope::Organization).unwrap();
        assert_eq!(session.token(), "cli-token");
        assert_eq!(session.token_source(), ValueSource::Cli);
        assert_eq!(session.organization_id(), Some("cli-org"));

        let overrides = Overrides {
            cli: OverrideValues::default(),
            env: values(Some("env-token"), Some("env-org"), None),
        };
        let session = resolver.resolve(&overrides, SessionScope::Organization).unwrap();
        assert_eq!(session.token(), "env-token");
        assert_eq!(session.token_source(), ValueSource::Env);
        assert_eq!(session.organization_id(), Some("env-org"));

        let session = resolver
            .resolve(&Overrides::default(), SessionScope::Organization)
            .unwrap();
        assert_eq!(session.organization_id(), Some("stored-org"));
    }

    #[test]
    fn test_organization_scope_requires_organization() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        let err = SessionResolver::new(&store)
            .resolve(&Overrides::default(), SessionScope::Organization)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoOrganizationSelected);
    }

    #[test]
    fn test_stored_board_follows_stored_organization() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        store
            .save_context(&Context::with_board("org-1", "b-42"))
            .unwrap();
        let resolver = SessionResolver::new(&store);

        let session = resolver
            .resolve(&Overrides::default(), SessionScope::Organization)
            .unwrap();
        assert_eq!(session.board_id(), Some("b-42"));

        // Same organization given explicitly keeps the stored board
        let overrides = Overrides {
            cli: values(None, Some("org-1"), None),
            env: OverrideValues::default(),
        };
        let session = resolver.resolve(&overrides, SessionScope::Organization).unwrap();
        assert_eq!(session.board_id(), Some("b-42"));

        // Another organization never inherits it
        let overrides = Overrides {
            cli: values(None, Some("org-2"), None),
            env: OverrideValues::default(),
        };
        let session = resolver.resolve(&overrides, SessionScope::Organization).unwrap();
        assert_eq!(session.organization_id(), Some("org-2"));
        assert!(session.board_id().is_none());
    }

    #[test]
    fn test_env_board_beats_stored_board() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        store
            .save_context(&Context::with_board("org-1", "b-42"))
            .unwrap();
        let overrides = Overrides {
            cli: OverrideValues::default(),
            env: values(None, None, Some("b-env")),
        };
        let session = SessionResolver::new(&store)
            .resolve(&overrides, SessionScope::Organization)
            .unwrap();
        assert_eq!(session.board_id(), Some("b-env"));
    }

    #[test]
    fn test_full_overrides_skip_config_file() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        std::fs::write(store.path(), "corrupt").unwrap();

        let overrides = Overrides {
            cli: values(Some("t"), Some("o"), Some("b")),
            env: OverrideValues::default(),
        };
        let session = SessionResolver::new(&store)
            .resolve(&overrides, SessionScope::Organization)
            .unwrap();
        assert_eq!(session.board_id(), Some("b"));
    }

    #[test]
    fn test_corrupt_config_is_fatal_when_needed() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        std::fs::write(store.path(), "corrupt").unwrap();

        let err = SessionResolver::new(&store)
            .resolve(&Overrides::default(), SessionScope::Account)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ConfigCorrupt);
    }

    #[test]
    fn test_empty_cli_value_rejected() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        let overrides = Overrides {
            cli: values(None, Some(""), None),
            env: OverrideValues::default(),
        };
        let err = SessionResolver::new(&store)
            .resolve(&overrides, SessionScope::Account)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
    }

    #[test]
    fn test_empty_cli_email_rejected() {
        let dir = TempDir::new().unwrap();
        let store = logged_in_store(&dir);
        let overrides = Overrides {
            cli: OverrideValues {
                email: Some(String::new()),
                ..OverrideValues::default()
            },
            env: OverrideValues::default(),
        };
        let err = SessionResolver::new(&store)
            .resolve(&overrides, SessionScope::Account)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValidationFailed);
        assert!(err.to_string().contains("--email"));
    }

    #[test]
    fn test_from_lookup_ignores_empty_values() {
        let values = OverrideValues::from_lookup(|name| match name {
            "FAVRO_TOKEN" => Some("env-token".to_string()),
            "FAVRO_ORGANIZATION_ID" => Some("  ".to_string()),
            _ => None,
        });
        assert_eq!(values.token.as_deref(), Some("env-token"));
        assert!(values.organization_id.is_none());
        assert!(values.board_id.is_none());
    }

    #[test]
    fn test_session_debug_masks_token() {
        let session =
            Session::from_credentials(&Credentials::new("super-secret"), ValueSource::Cli).unwrap();
        let text = format!("{:?}", session);
        assert!(!text.contains("super-secret"));
    }

    #[test]
    fn test_with_organization_drops_board() {
        let session = Session::from_credentials(&Credentials::new("t"), ValueSource::Cli)
            .unwrap()
            .with_organization("org-9");
        assert_eq!(session.require_organization().unwrap(), "org-9");
        assert!(session.board_id().is_none());
        assert_eq!(
            session.require_board().unwrap_err().kind(),
            ErrorKind::ValidationFailed
        );
    }

    #[test]
    fn test_email_follows_token_layer() {
        let dir = TempDir::new().unwrap();
        let store = CredentialStore::with_path(dir.path().join("config.json"));
        store
            .save(&Credentials::new("stored").with_email("stored@example.com"))
            .unwrap();
        let resolver = SessionResolver::new(&store);

        let session = resolver
            .resolve(&Overrides::default(), SessionScope::Account)
            .unwrap();
        assert_eq!(session.email(), Some("stored@example.com"));

        // An override token never borrows the stored account's email
        let overrides = Overrides {
            cli: values(Some("cli-token"), None, None),
            env: OverrideValues::default(),
        };
        let session = resolver.resolve(&overrides, SessionScope::Account).unwrap();
        assert!(session.email().is_none());

        let overrides = Overrides {
            cli: values(Some("cli-token"), None, None),
            env: OverrideValues {
                email: Some("env@example.com".to_string()),
                ..Default::default()
            },
        };
        let session = resolver.resolve(&overrides, SessionScope::Account).unwrap();
        assert_eq!(session.email(), Some("env@example.com"));
    }
}
