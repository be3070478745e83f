//! Per-invocation wiring of store, overrides and client settings

use std::time::Duration;

use crate::cli::Cli;
use crate::context::{
    ContextManager, CredentialStore, OverrideValues, Overrides, Session, SessionResolver,
    SessionScope,
};
use crate::error::Result;
use crate::favro::{ClientSettings, FavroClient};

/// Everything a command handler needs to reach the core
#[derive(Debug, Clone)]
pub struct Runtime {
    pub store: CredentialStore,
    pub overrides: Overrides,
    pub settings: ClientSettings,
    /// Print JSON instead of tables
    pub json: bool,
    /// Suppress spinners and prompts
    pub quiet: bool,
}

impl Runtime {
    /// Build from parsed arguments and an environment lookup
    pub fn from_cli<F>(cli: &Cli, env_lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides = Overrides {
            cli: OverrideValues {
                token: cli.token.clone(),
                email: cli.email.clone(),
                organization_id: cli.org.clone(),
                board_id: cli.board.clone(),
            },
            env: OverrideValues::from_lookup(env_lookup),
        };

        let mut settings = ClientSettings::default();
        if let Some(api_url) = &cli.api_url {
            settings = settings.with_base_url(api_url);
        }
        if let Some(timeout) = cli.timeout {
            settings = settings.with_timeout(Duration::from_secs(timeout));
        }

        Self {
            store: CredentialStore::new(),
            overrides,
            settings,
            json: cli.json,
            quiet: cli.quiet || cli.json,
        }
    }

    pub fn with_store(mut self, store: CredentialStore) -> Self {
        self.store = store;
        self
    }

    /// Resolve the session for this invocation (no network)
    pub fn session(&self, scope: SessionScope) -> Result<Session> {
        SessionResolver::new(&self.store).resolve(&self.overrides, scope)
    }

    /// Client for the resolved session, wired to invalidate the store on 401
    pub fn client(&self, scope: SessionScope) -> Result<FavroClient> {
        let session = self.session(scope)?;
        Ok(FavroClient::new(session, self.settings.clone()).with_credential_store(self.store.clone()))
    }

    pub fn context_manager(&self) -> ContextManager<CredentialStore> {
        ContextManager::new(self.store.clone())
    }
}
