//! Configuration file I/O (credentials and context)

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::config::context as context_config;
use crate::error::{FavroError, Result};

use super::models::{ConfigFile, Context, Credentials};

/// Read/write access to the persisted context, abstracted so the context
/// manager can be exercised against a failing writer.
pub trait ContextPersistence {
    fn load_context(&self) -> Result<Context>;
    fn save_context(&self, context: &Context) -> Result<()>;
    /// Drop credentials and context together
    fn reset(&self) -> Result<()>;
}

/// Handles reading and writing the configuration file
#[derive(Debug, Clone)]
pub struct CredentialStore {
    config_path: PathBuf,
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialStore {
    /// Create a new store using the default config path (~/.favroctl/config.json)
    pub fn new() -> Self {
        Self {
            config_path: Self::default_config_path(),
        }
    }

    /// Create a store with a custom config path (for testing)
    pub fn with_path(path: PathBuf) -> Self {
        Self { config_path: path }
    }

    pub fn path(&self) -> &Path {
        &self.config_path
    }

    fn default_config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(context_config::DIR_NAME)
            .join(context_config::FILE_NAME)
    }

    /// Read the whole document. `None` if the file does not exist.
    pub fn read_document(&self) -> Result<Option<ConfigFile>> {
        let content = match fs::read_to_string(&self.config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(FavroError::config(
                    &self.config_path,
                    format!("Failed to read config: {}", e),
                ))
            }
        };

        serde_json::from_str(&content).map(Some).map_err(|e| {
            FavroError::config(&self.config_path, format!("Failed to parse config: {}", e))
        })
    }

    /// Write the whole document atomically.
    ///
    /// The document goes to a temp file next to the target that is created
    /// with 0600 permissions before any byte is written, is flushed to disk
    /// and then renamed over the target, so a reader sees either the old or
    /// the new document.
    pub fn write_document(&self, document: &ConfigFile) -> Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                FavroError::config(
                    &self.config_path,
                    format!("Failed to create config directory {}: {}", parent.display(), e),
                )
            })?;
        }

        let json = serde_json::to_string_pretty(document).map_err(|e| {
            FavroError::config(&self.config_path, format!("Failed to serialize config: {}", e))
        })?;

        let tmp_path = self.tmp_path();
        self.write_tmp(&tmp_path, json.as_bytes()).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            FavroError::config(
                &self.config_path,
                format!("Failed to write temp config file {}: {}", tmp_path.display(), e),
            )
        })?;

        fs::rename(&tmp_path, &self.config_path).map_err(|e| {
            let _ = fs::remove_file(&tmp_path);
            FavroError::config(
                &self.config_path,
                format!("Failed to replace config file: {}", e),
            )
        })?;

        debug!("Wrote config file {}", self.config_path.display());
        Ok(())
    }

    /// Temp file name is per-process so concurrent writers never share one
    fn tmp_path(&self) -> PathBuf {
        let file_name = self
            .config_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| context_config::FILE_NAME.to_string());
        self.config_path.with_file_name(format!(
            "{}.{}.{}",
            file_name,
            std::process::id(),
            context_config::TMP_EXTENSION
        ))
    }

    fn write_tmp(&self, tmp_path: &Path, bytes: &[u8]) -> io::Result<()> {
        let mut file = open_tmp(tmp_path)?;
        file.write_all(bytes)?;
        file.sync_all()
    }

    /// Load stored credentials. `None` when there is no file or no token.
    pub fn load(&self) -> Result<Option<Credentials>> {
        Ok(self.read_document()?.and_then(|doc| doc.credentials()))
    }

    /// Store credentials, keeping the current context.
    ///
    /// A corrupt file is replaced: logging in again is the recovery path.
    pub fn save(&self, credentials: &Credentials) -> Result<()> {
        let mut document = match self.read_document() {
            Ok(doc) => doc.unwrap_or_default(),
            Err(e @ FavroError::ConfigCorrupt { .. }) => {
                warn!("Replacing unreadable config file: {}", e);
                ConfigFile::default()
            }
            Err(e) => return Err(e),
        };
        document.set_credentials(credentials);
        self.write_document(&document)
    }

    /// Remove the stored token. Idempotent; the context is kept.
    pub fn clear(&self) -> Result<()> {
        let Some(mut document) = self.read_document()? else {
            return Ok(());
        };
        if document.token.is_none() && document.email.is_none() {
            return Ok(());
        }
        document.clear_credentials();
        self.write_document(&document)
    }

    /// Delete the whole config file. Idempotent.
    pub fn reset(&self) -> Result<()> {
        match fs::remove_file(&self.config_path) {
            Ok(()) => {
                debug!("Removed config file {}", self.config_path.display());
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(FavroError::config(
                &self.config_path,
                format!("Failed to remove config file: {}", e),
            )),
        }
    }
}

/// Create a fresh temp file, owner-only on Unix from the first byte.
///
/// A leftover temp file from a crashed writer with the same pid is removed
/// first, since `create_new` refuses to reuse it.
fn open_tmp(tmp_path: &Path) -> io::Result<fs::File> {
    match fs::remove_file(tmp_path) {
        Ok(()) => warn!("Removed stale temp config file {}", tmp_path.display()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }

    let mut options = fs::OpenOptions::new();
    options.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    options.open(tmp_path)
}

impl ContextPersistence for CredentialStore {
    fn load_context(&self) -> Result<Context> {
        Ok(self
            .read_document()?
            .map(|doc| doc.context())
            .unwrap_or_default())
    }

    fn save_context(&self, context: &Context) -> Result<()> {
        let mut document = self.read_document()?.unwrap_or_default();
        document.set_context(context);
        self.write_document(&document)
    }

    fn reset(&self) -> Result<()> {
        CredentialStore::reset(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn test_store(dir: &TempDir) -> CredentialStore {
        CredentialStore::with_path(dir.path().join("config.json"))
    }

    #[test]
    fn test_load_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        assert!(store.load().unwrap().is_none());
        assert_eq!(store.load_context().unwrap(), Context::default());
    }

    #[test]
    fn test_load_corrupt_json_errors() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::write(store.path(), "not valid json!!!").unwrap();

        let err = store.load().unwrap_err();
        assert!(matches!(err, FavroError::ConfigCorrupt { .. }));
        assert!(err.to_string().contains("Failed to parse config"));

        let err = store.load_context().unwrap_err();
        assert!(matches!(err, FavroError::ConfigCorrupt { .. }));
    }

    #[test]
    fn test_save_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let creds = Credentials {
            token: "secret-token".to_string(),
            email: Some("dev@example.com".to_string()),
            issued_at: Some(Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap()),
            expires_at: Some(Utc.with_ymd_and_hms(2027, 1, 2, 3, 4, 5).unwrap()),
        };

        store.save(&creds).unwrap();
        assert_eq!(store.load().unwrap(), Some(creds));
    }

    #[test]
    fn test_save_roundtrip_without_optional_metadata() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let creds = Credentials {
            token: "t".to_string(),
            email: None,
            issued_at: None,
            expires_at: None,
        };
        store.save(&creds).unwrap();
        assert_eq!(store.load().unwrap(), Some(creds));
    }

    #[test]
    fn test_save_creates_parent_dir() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("subdir").join("config.json");
        let store = CredentialStore::with_path(path.clone());
        store.save(&Credentials::new("tok")).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_save_keeps_context() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store
            .save_context(&Context::with_board("org-1", "b-1"))
            .unwrap();

        store.save(&Credentials::new("tok")).unwrap();

        assert_eq!(
            store.load_context().unwrap(),
            Context::with_board("org-1", "b-1")
        );
    }

    #[test]
    fn test_save_overwrites_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        fs::write(store.path(), "{{{").unwrap();

        store.save(&Credentials::new("fresh")).unwrap();

        assert_eq!(store.load().unwrap().unwrap().token, "fresh");
    }

    #[test]
    fn test_clear_is_idempotent_and_keeps_context() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);

        // No file at all
        store.clear().unwrap();

        store.save(&Credentials::new("tok")).unwrap();
        store
            .save_context(&Context::default().with_organization("org-1"))
            .unwrap();

        store.clear().unwrap();
        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert_eq!(
            store.load_context().unwrap().organization_id.as_deref(),
            Some("org-1")
        );
    }

    #[test]
    fn test_reset_removes_everything() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.save(&Credentials::new("tok")).unwrap();

        store.reset().unwrap();
        store.reset().unwrap();

        assert!(!store.path().exists());
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_no_temp_files_left_behind() {
        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.save(&Credentials::new("tok")).unwrap();
        store
            .save_context(&Context::default().with_organization("org-1"))
            .unwrap();

        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["config.json".to_string()]);
    }

    #[test]
    fn test_write_failure_leaves_previous_document() {
        let dir = TempDir::new().unwrap();
        // Parent "directory" is a regular file, so every write fails.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "x").unwrap();
        let store = CredentialStore::with_path(blocker.join("config.json"));

        let err = store.save(&Credentials::new("tok")).unwrap_err();
        assert!(matches!(err, FavroError::ConfigCorrupt { .. }));
        assert_eq!(fs::read_to_string(&blocker).unwrap(), "x");
    }

    #[cfg(unix)]
    #[test]
    fn test_save_sets_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        store.save(&Credentials::new("tok")).unwrap();

        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_temp_file_is_private_before_write() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let tmp_path = store.tmp_path();

        let file = open_tmp(&tmp_path).unwrap();
        assert_eq!(file.metadata().unwrap().len(), 0);
        let mode = fs::metadata(&tmp_path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[cfg(unix)]
    #[test]
    fn test_stale_world_readable_temp_file_is_replaced() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = test_store(&dir);
        let tmp_path = store.tmp_path();
        fs::write(&tmp_path, "leftover").unwrap();
        fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o644)).unwrap();

        store.save(&Credentials::new("tok")).unwrap();

        assert!(!tmp_path.exists());
        let mode = fs::metadata(store.path()).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
        assert_eq!(store.load().unwrap().unwrap().token, "tok");
    }

    #[test]
    fn test_default_config_path() {
        let path = CredentialStore::default_config_path();
        assert!(path.to_string_lossy().contains(context_config::DIR_NAME));
        assert!(path.to_string_lossy().contains(context_config::FILE_NAME));
    }
}
