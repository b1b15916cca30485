use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// Store key holding the bearer token.
pub const TOKEN_KEY: &str = "token";
/// Store key holding the last-used login name.
pub const USERNAME_KEY: &str = "username";

/// Opaque secure key-value capability for credentials.
///
/// The API client and controllers take `Arc<dyn CredentialStore>` so tests can
/// substitute [`MemoryCredentialStore`] for the file-backed default.
pub trait CredentialStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    fn get(&self, key: &str) -> Option<String>;
    /// Writes `value` under `key`, replacing any prior value.
    fn set(&self, key: &str, value: &str) -> anyhow::Result<()>;
    /// Removes the value under `key`; removing a missing key is not an error.
    fn delete(&self, key: &str) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CredentialFile {
    #[serde(default)]
    entries: BTreeMap<String, String>,
}

/// TOML-backed credential store under the user's config directory.
///
/// The file and its parent directory are kept private (0600/0700); writes go
/// through a temp file in the same directory and are persisted atomically.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Opens the store at its default location without touching the disk.
    pub fn open_default() -> anyhow::Result<Self> {
        Ok(Self { path: Self::path()? })
    }

    /// Default credential file path, honoring `XDG_CONFIG_HOME`.
    pub fn path() -> anyhow::Result<PathBuf> {
        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            return Ok(PathBuf::from(xdg).join("peerctl").join("credentials.toml"));
        }

        let home = std::env::var("HOME")
            .map(PathBuf::from)
            .map_err(|_| anyhow::anyhow!("HOME is not set and XDG_CONFIG_HOME is not set"))?;
        Ok(home.join(".config").join("peerctl").join("credentials.toml"))
    }

    fn load(&self) -> anyhow::Result<CredentialFile> {
        if !self.path.exists() {
            return Ok(CredentialFile::default());
        }

        ensure_private_file(&self.path)?;
        let raw = fs::read_to_string(&self.path)?;
        Ok(toml::from_str::<CredentialFile>(&raw)?)
    }

    fn persist(&self, file: &CredentialFile) -> anyhow::Result<()> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("invalid credential path: missing parent dir"))?;
        ensure_private_dir(dir)?;

        let rendered = toml::to_string_pretty(file)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        set_private_file_perms(tmp.path())?;
        tmp.write_all(rendered.as_bytes())?;
        tmp.flush()?;
        tmp.persist(&self.path)?;
        Ok(())
    }
}

impl CredentialStore for FileCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.load() {
            Ok(file) => file.entries.get(key).cloned(),
            Err(err) => {
                tracing::warn!(path = %self.path.display(), %err, "failed to read credential store");
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        let mut file = self.load()?;
        file.entries.insert(key.to_string(), value.to_string());
        self.persist(&file)
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        let mut file = self.load()?;
        if file.entries.remove(key).is_none() {
            return Ok(());
        }
        self.persist(&file)
    }
}

/// In-process credential store used as the substitution seam in tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryCredentialStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds a bearer token.
    pub fn with_token(token: &str) -> Self {
        let store = Self::new();
        store
            .set(TOKEN_KEY, token)
            .expect("memory store set cannot fail");
        store
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().expect("poisoned").get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> anyhow::Result<()> {
        self.entries
            .lock()
            .expect("poisoned")
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> anyhow::Result<()> {
        self.entries.lock().expect("poisoned").remove(key);
        Ok(())
    }
}

fn ensure_private_dir(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o700))?;
    }
    Ok(())
}

fn set_private_file_perms(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o600))?;
    }
    Ok(())
}

fn ensure_private_file(path: &Path) -> anyhow::Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = fs::metadata(path)?.permissions().mode() & 0o777;
        if mode & 0o077 != 0 {
            anyhow::bail!(
                "credential file is too permissive (mode {:o}); run: chmod 600 {}",
                mode,
                path.display()
            );
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_creates_toml_with_private_perms() {
        let _guard = crate::test_support::ENV_LOCK.lock().expect("lock");
        let dir = tempfile::tempdir().expect("tempdir");
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
            std::env::remove_var("HOME");
        }

        let store = FileCredentialStore::open_default().expect("open");
        store.set(TOKEN_KEY, "tok-1").expect("set");
        store.set(USERNAME_KEY, "alice").expect("set");

        let path = FileCredentialStore::path().expect("path");
        assert!(path.exists());
        let raw = fs::read_to_string(&path).expect("read");
        assert!(raw.contains("tok-1"));
        assert!(raw.contains("alice"));

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).expect("metadata").permissions().mode() & 0o777;
            assert_eq!(mode, 0o600);
        }
    }

    #[test]
    fn get_returns_none_when_missing() {
        let _guard = crate::test_support::ENV_LOCK.lock().expect("lock");
        let dir = tempfile::tempdir().expect("tempdir");
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
            std::env::remove_var("HOME");
        }

        let store = FileCredentialStore::open_default().expect("open");
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn delete_round_trips_through_file() {
        let _guard = crate::test_support::ENV_LOCK.lock().expect("lock");
        let dir = tempfile::tempdir().expect("tempdir");
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
            std::env::remove_var("HOME");
        }

        let store = FileCredentialStore::open_default().expect("open");
        store.set(TOKEN_KEY, "tok-2").expect("set");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("tok-2"));

        store.delete(TOKEN_KEY).expect("delete");
        assert!(store.get(TOKEN_KEY).is_none());

        // Deleting an absent key is a no-op.
        store.delete(TOKEN_KEY).expect("delete again");
    }

    #[cfg(unix)]
    #[test]
    fn load_fails_when_file_is_too_permissive() {
        use std::os::unix::fs::PermissionsExt;

        let _guard = crate::test_support::ENV_LOCK.lock().expect("lock");
        let dir = tempfile::tempdir().expect("tempdir");
        // SAFETY: Tests hold ENV_LOCK to serialize env mutations.
        unsafe {
            std::env::set_var("XDG_CONFIG_HOME", dir.path());
            std::env::remove_var("HOME");
        }

        let path = FileCredentialStore::path().expect("path");
        let parent = path.parent().expect("parent");
        fs::create_dir_all(parent).expect("mkdir");
        fs::write(&path, "[entries]\ntoken = \"t\"\n").expect("write");
        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).expect("chmod");

        let store = FileCredentialStore::open_default().expect("open");
        let err = store.set(TOKEN_KEY, "new").expect_err("should fail");
        assert!(err.to_string().contains("too permissive"));
        // Reads degrade to None instead of failing.
        assert!(store.get(TOKEN_KEY).is_none());
    }

    #[test]
    fn memory_store_last_writer_wins() {
        let store = MemoryCredentialStore::new();
        store.set(TOKEN_KEY, "a").expect("set");
        store.set(TOKEN_KEY, "b").expect("set");
        assert_eq!(store.get(TOKEN_KEY).as_deref(), Some("b"));
        store.delete(TOKEN_KEY).expect("delete");
        assert!(store.get(TOKEN_KEY).is_none());
    }
}
