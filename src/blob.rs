use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use serde::Serialize;

use crate::errors::AppError;

/// Result of storing an uploaded image.
#[derive(Debug, Clone, Serialize)]
pub struct StoredImage {
    pub url: String,
    #[serde(rename = "publicId")]
    pub public_id: String,
}

/// Disk-backed blob store for uploaded images. Files land under the data
/// directory and are served back through the `/uploads` static mount, so a
/// returned URL stays valid for the lifetime of the deployment.
#[derive(Debug, Clone)]
pub struct BlobStore {
    root: PathBuf,
}

impl BlobStore {
    pub fn new(root: impl Into<PathBuf>) -> std::io::Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(BlobStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Store raw image bytes under a fresh public id and return the URL the
    /// editor puts into the owning image section.
    pub fn upload(&self, bytes: &[u8]) -> Result<StoredImage, AppError> {
        let token: [u8; 8] = rand::rng().random();
        let name = hex::encode(token);
        let file_name = format!("{name}.img");
        fs::write(self.root.join(&file_name), bytes)?;
        Ok(StoredImage {
            url: format!("/uploads/{file_name}"),
            public_id: format!("email-builder/{name}"),
        })
    }
}
