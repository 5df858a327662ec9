use std::io::ErrorKind;
use std::path::PathBuf;

/// Durable single-value store for the provider refresh token.
///
/// One plain-text file, trimmed on read, overwritten in place on save. The
/// previous value is unrecoverable once overwritten and a crash mid-write is
/// not guarded against; this is a single-process, infrequent-write store.
#[derive(Debug, Clone)]
pub struct CredentialStore {
    path: PathBuf,
}

impl CredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        CredentialStore { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Reads the stored token. A missing file or blank content is a valid
    /// initial state, not an error.
    pub async fn load(&self) -> std::io::Result<Option<String>> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) => {
                let token = content.trim().to_string();
                if token.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(token))
                }
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Overwrites the stored token with the given value.
    pub async fn save(&self, token: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                async_fs::create_dir_all(parent).await?;
            }
        }
        async_fs::write(&self.path, token).await
    }
}
