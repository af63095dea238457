use std::fs;
use std::path::PathBuf;

use crate::credentials::{StoredSession, TokenStore};
use crate::error::Result;

/// Session file on disk (`session.json` in the renderdesk directory).
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self) -> Result<StoredSession> {
        if !self.path.exists() {
            return Ok(StoredSession::default());
        }
        let content = fs::read_to_string(&self.path)?;
        let session: StoredSession = serde_json::from_str(&content)?;
        Ok(session)
    }

    /// Atomic write: temp file, restrict permissions, then rename.
    fn persist(&self, session: &StoredSession) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_vec(session)?;
        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, &content)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
