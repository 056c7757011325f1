//! Local Upload Storage
//!
//! Files are written under one directory and named `{owner_id}-{filename}`.
//! The returned path (e.g. `images/3-avatar.png`) is what gets persisted and
//! is also the URL path the static file service answers on.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use axum::body::Bytes;
use axum::extract::Multipart;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use rand::{RngCore, rngs::OsRng};
use thiserror::Error;

/// Upload size limit (5 MiB)
pub const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Request body limit for upload routes (file plus form overhead)
pub const MAX_UPLOAD_BODY_BYTES: usize = MAX_UPLOAD_BYTES + 64 * 1024;

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("uploaded file is empty")]
    Empty,

    #[error("uploaded file exceeds {max} bytes")]
    TooLarge { max: usize },

    #[error("file name is missing or invalid")]
    InvalidFileName,

    #[error("field `{0}` is required")]
    MissingField(&'static str),

    #[error("malformed multipart body: {0}")]
    Multipart(String),

    #[error("failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<MultipartError> for UploadError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            UploadError::TooLarge {
                max: MAX_UPLOAD_BYTES,
            }
        } else {
            UploadError::Multipart(err.body_text())
        }
    }
}

/// File part of a multipart form
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub bytes: Bytes,
}

/// Multipart form split into text fields and file parts
#[derive(Debug, Default)]
pub struct MultipartForm {
    fields: HashMap<String, String>,
    files: HashMap<String, UploadedFile>,
}

impl MultipartForm {
    /// Drain a multipart body. Parts with a file name are files, others text.
    pub async fn read(mut multipart: Multipart) -> Result<Self, UploadError> {
        let mut form = Self::default();

        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else {
                continue;
            };

            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let bytes = field.bytes().await?;
                    form.files.insert(name, UploadedFile { file_name, bytes });
                }
                None => {
                    let text = field.text().await?;
                    form.fields.insert(name, text);
                }
            }
        }

        Ok(form)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }

    /// Checkbox-style flag: "true", "1", "on" are truthy
    pub fn flag(&self, name: &str) -> bool {
        self.text(name)
            .is_some_and(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "true" | "1" | "on"))
    }

    pub fn take_file(&mut self, name: &'static str) -> Result<UploadedFile, UploadError> {
        self.files.remove(name).ok_or(UploadError::MissingField(name))
    }
}

/// Directory-backed upload store
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
    public_prefix: String,
}

impl UploadStore {
    /// `dir` is where files land; `public_prefix` is the path stored in the DB
    pub fn new(dir: impl Into<PathBuf>, public_prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_prefix: public_prefix.into().trim_matches('/').to_string(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write `bytes` for `owner_id` under a temporary name.
    ///
    /// Nothing is visible at the final path until [`StagedUpload::commit`],
    /// so a caller whose database write fails can [`StagedUpload::discard`]
    /// without touching a file an existing row may still point at.
    pub async fn stage(
        &self,
        owner_id: i64,
        original_name: &str,
        bytes: &[u8],
    ) -> Result<StagedUpload, UploadError> {
        if bytes.is_empty() {
            return Err(UploadError::Empty);
        }
        if bytes.len() > MAX_UPLOAD_BYTES {
            return Err(UploadError::TooLarge {
                max: MAX_UPLOAD_BYTES,
            });
        }

        let file_name = format!("{}-{}", owner_id, sanitize_file_name(original_name)?);
        let temp_name = format!(".{}.{:016x}.part", file_name, OsRng.next_u64());

        tokio::fs::create_dir_all(&self.dir).await?;
        let temp = self.dir.join(temp_name);
        tokio::fs::write(&temp, bytes).await?;

        Ok(StagedUpload {
            temp,
            dest: self.dir.join(&file_name),
            path: format!("{}/{}", self.public_prefix, file_name),
        })
    }
}

/// Upload written to a temporary file, waiting for its database row
#[derive(Debug)]
#[must_use = "a staged upload must be committed or discarded"]
pub struct StagedUpload {
    temp: PathBuf,
    dest: PathBuf,
    path: String,
}

impl StagedUpload {
    /// Path to persist (e.g. `images/3-avatar.png`)
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Move the file into place and return its path
    pub async fn commit(self) -> Result<String, UploadError> {
        tokio::fs::rename(&self.temp, &self.dest).await?;
        tracing::debug!(path = %self.path, "Upload stored");
        Ok(self.path)
    }

    /// Drop the temporary file
    pub async fn discard(self) {
        if let Err(e) = tokio::fs::remove_file(&self.temp).await {
            tracing::warn!(error = %e, path = %self.temp.display(), "Failed to remove staged upload");
        }
    }
}

/// Keep only the last path component and replace unsafe characters
pub fn sanitize_file_name(original: &str) -> Result<String, UploadError> {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if base.is_empty() || base.chars().all(|c| c == '.') {
        return Err(UploadError::InvalidFileName);
    }

    Ok(base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_file_name() {
        assert_eq!(sanitize_file_name("avatar.png").unwrap(), "avatar.png");
        assert_eq!(sanitize_file_name("../../etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_file_name("C:\\tmp\\my pic.jpg").unwrap(), "my_pic.jpg");
        assert!(sanitize_file_name("..").is_err());
        assert!(sanitize_file_name("dir/").is_err());
    }

    #[test]
    fn test_form_flag_and_missing_file() {
        let mut form = MultipartForm::default();
        form.fields.insert("is_primary".into(), "on".into());
        form.fields.insert("featured".into(), "false".into());

        assert!(form.flag("is_primary"));
        assert!(!form.flag("featured"));
        assert!(!form.flag("absent"));
        assert!(matches!(form.take_file("file"), Err(UploadError::MissingField("file"))));
    }

    fn entries(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[tokio::test]
    async fn test_commit_names_file_after_owner() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path(), "images");

        let staged = store.stage(3, "avatar.png", b"png-bytes").await.unwrap();
        assert_eq!(staged.path(), "images/3-avatar.png");
        assert!(!tmp.path().join("3-avatar.png").exists());

        let path = staged.commit().await.unwrap();
        assert_eq!(path, "images/3-avatar.png");
        let written = std::fs::read(tmp.path().join("3-avatar.png")).unwrap();
        assert_eq!(written, b"png-bytes");
        assert_eq!(entries(tmp.path()), ["3-avatar.png"]);
    }

    #[tokio::test]
    async fn test_discard_leaves_existing_file_alone() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path(), "images");
        store
            .stage(3, "avatar.png", b"first")
            .await
            .unwrap()
            .commit()
            .await
            .unwrap();

        store
            .stage(3, "avatar.png", b"second")
            .await
            .unwrap()
            .discard()
            .await;

        assert_eq!(std::fs::read(tmp.path().join("3-avatar.png")).unwrap(), b"first");
        assert_eq!(entries(tmp.path()), ["3-avatar.png"]);
    }

    #[tokio::test]
    async fn test_stage_rejects_empty_and_oversized() {
        let tmp = tempfile::tempdir().unwrap();
        let store = UploadStore::new(tmp.path(), "images");

        assert!(matches!(store.stage(1, "a.png", b"").await, Err(UploadError::Empty)));

        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            store.stage(1, "a.png", &big).await,
            Err(UploadError::TooLarge { .. })
        ));
    }
}
