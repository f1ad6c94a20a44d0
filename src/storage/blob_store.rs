//! File-backed photo storage.
//!
//! Photos are copied under `<root>/<user_id>/<unix_millis>.<ext>` and addressed
//! by that relative path. Public URLs are either `base_url/<path>` or a
//! `file://` URL into the root.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::StoreError;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "heic"];

#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
    base_url: Option<String>,
}

impl PhotoStore {
    pub fn new(root: PathBuf, base_url: &str) -> Self {
        let base_url = base_url.trim().trim_end_matches('/');
        Self {
            root,
            base_url: (!base_url.is_empty()).then(|| base_url.to_string()),
        }
    }

    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.root)
            .with_context(|| format!("Creating photo store at {:?}", self.root))?;
        Ok(())
    }

    /// Copy an image into the store and return its storage path.
    pub fn upload(&self, user_id: i64, source: &Path) -> Result<String> {
        let ext = source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .filter(|e| IMAGE_EXTENSIONS.contains(&e.as_str()))
            .ok_or_else(|| StoreError::UnsupportedFile(source.display().to_string()))?;

        let data = fs::read(source).with_context(|| format!("Reading {:?}", source))?;

        let mut millis = chrono::Utc::now().timestamp_millis();
        let mut path = format!("{}/{}.{}", user_id, millis, ext);
        while self.exists(&path) {
            millis += 1;
            path = format!("{}/{}.{}", user_id, millis, ext);
        }

        let dest = self.full_path(&path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        let temp = dest.with_extension("tmp");
        fs::write(&temp, &data).with_context(|| format!("Writing {:?}", temp))?;
        fs::rename(&temp, &dest)?;

        debug!("stored photo {} ({} bytes)", path, data.len());
        Ok(path)
    }

    pub fn public_url(&self, path: &str) -> String {
        match &self.base_url {
            Some(base) => format!("{}/{}", base, path),
            None => format!("file://{}", self.full_path(path).display()),
        }
    }

    pub fn exists(&self, path: &str) -> bool {
        self.full_path(path).exists()
    }

    /// Removing a missing blob is not an error.
    pub fn remove(&self, path: &str) -> Result<()> {
        let full = self.full_path(path);
        if !full.exists() {
            warn!("photo blob {} already gone", path);
            return Ok(());
        }
        fs::remove_file(&full)?;
        debug!("removed photo {}", path);
        Ok(())
    }

    fn full_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}
