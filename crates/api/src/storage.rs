//! Image Store: uploaded product images on local disk.
//!
//! Files are written once under a generated `prod_<unix-ms><ext>` name and
//! never modified. Deleting a listing leaves its image in place.

use std::io;
use std::path::{Path, PathBuf};

use showroom_core::naming::{upload_filename, upload_url, UploadClock};
use tokio::io::AsyncWriteExt;

/// How many fresh names to try before giving up on a write.
const MAX_NAME_ATTEMPTS: usize = 8;

/// A file persisted by [`ImageStore::save`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Bare filename inside the image directory.
    pub filename: String,
    /// Public URL path (`/uploads/<filename>`), stored as `image_url`.
    pub url: String,
}

/// Directory-backed store for uploaded images.
#[derive(Debug)]
pub struct ImageStore {
    dir: PathBuf,
    clock: UploadClock,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            clock: UploadClock::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Create the image directory (and parents) if it does not exist.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.dir).await
    }

    /// Write `bytes` under a new unique name derived from `original_name`.
    ///
    /// Names are opened with `create_new`, so an existing file (for example
    /// one written by another process sharing the directory) is never
    /// overwritten; a fresh timestamp is drawn instead.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> io::Result<StoredImage> {
        for _ in 0..MAX_NAME_ATTEMPTS {
            let filename = upload_filename(self.clock.next(), original_name);
            let path = self.dir.join(&filename);

            let mut file = match tokio::fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&path)
                .await
            {
                Ok(file) => file,
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
                    tracing::debug!(%filename, "Upload name taken, drawing another");
                    continue;
                }
                Err(e) => return Err(e),
            };
            file.write_all(bytes).await?;
            file.flush().await?;

            tracing::info!(%filename, size = bytes.len(), "Stored product image");
            return Ok(StoredImage {
                url: upload_url(&filename),
                filename,
            });
        }

        Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            "could not find a free upload name",
        ))
    }
}
