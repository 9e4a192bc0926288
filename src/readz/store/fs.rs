use super::KeyValueStore;
use crate::error::{ReadzError, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Keys become file names, so anything outside `[A-Za-z0-9._-]` is replaced.
    fn key_path(&self, key: &str) -> Result<PathBuf> {
        let safe: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == '.' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        if safe.is_empty() || safe.chars().all(|c| c == '.') {
            return Err(ReadzError::Store(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.root.join(format!("{}.json", safe)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.key_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(ReadzError::Io(err)),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.key_path(key)?;
        fs::create_dir_all(&self.root).await?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &path).await?;
        Ok(())
    }
}
