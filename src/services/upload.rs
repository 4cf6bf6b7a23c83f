use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::errors::AppResult;

/// Public URL prefix for stored uploads.
pub fn public_url(stored_name: &str) -> String {
    format!("/uploads/{}", stored_name)
}

/// Stores uploaded files under a single directory with UUID names,
/// keeping the original extension.
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> AppResult<String> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = match Path::new(original_name)
            .extension()
            .and_then(|ext| ext.to_str())
        {
            Some(ext) => format!("{}.{}", Uuid::new_v4(), ext.to_ascii_lowercase()),
            None => Uuid::new_v4().to_string(),
        };

        tokio::fs::write(self.dir.join(&stored_name), bytes).await?;
        Ok(stored_name)
    }

    pub fn path_of(&self, stored_name: &str) -> PathBuf {
        self.dir.join(stored_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_keeps_the_extension_and_writes_bytes() {
        let dir = std::env::temp_dir().join(format!("quizforge-upload-{}", Uuid::new_v4()));
        let store = UploadStore::new(&dir);

        let stored = store
            .save("lecture.PDF", b"%PDF-1.4")
            .await
            .expect("save should succeed");

        assert!(stored.ends_with(".pdf"));
        let written = tokio::fs::read(store.path_of(&stored))
            .await
            .expect("file should exist");
        assert_eq!(written, b"%PDF-1.4");

        tokio::fs::remove_dir_all(&dir).await.ok();
    }

    #[test]
    fn public_url_prefixes_uploads() {
        assert_eq!(public_url("abc.png"), "/uploads/abc.png");
    }
}
