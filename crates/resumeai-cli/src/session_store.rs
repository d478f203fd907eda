use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

const SESSION_FILE: &str = "session";

/// Session cookie persisted between CLI invocations
#[derive(Clone, Debug)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(SESSION_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored `Cookie` header value, if any.
    pub async fn load(&self) -> Option<String> {
        let content = fs::read_to_string(&self.path).await.ok()?;
        let cookie = content.trim();
        (!cookie.is_empty()).then(|| cookie.to_string())
    }

    pub async fn save(&self, cookie: &str) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o600);

        let mut file = options
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {}", self.path.display()))?;

        // A file left by an older run may still be world-readable
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(0o600))
                .await
                .with_context(|| format!("Failed to restrict {}", self.path.display()))?;
        }

        file.write_all(cookie.as_bytes())
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        file.flush()
            .await
            .with_context(|| format!("Failed to write {}", self.path.display()))?;

        tracing::debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    pub async fn clear(&self) -> anyhow::Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => {
                Err(e).with_context(|| format!("Failed to remove {}", self.path.display()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(&dir.path().join("nested"));

        assert!(store.load().await.is_none());

        store.save("token=abc123").await.unwrap();
        assert_eq!(store.load().await.as_deref(), Some("token=abc123"));

        store.clear().await.unwrap();
        assert!(store.load().await.is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_blank_file_is_no_session() {
        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());
        tokio::fs::write(store.path(), "  \n").await.unwrap();
        assert!(store.load().await.is_none());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_session_file_is_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TempDir::new().unwrap();
        let store = SessionStore::new(dir.path());

        std::fs::write(store.path(), "stale").unwrap();
        std::fs::set_permissions(store.path(), std::fs::Permissions::from_mode(0o644)).unwrap();

        store.save("token=abc123").await.unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
        assert_eq!(store.load().await.as_deref(), Some("token=abc123"));

        store.clear().await.unwrap();
        store.save("token=fresh").await.unwrap();
        let mode = std::fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
