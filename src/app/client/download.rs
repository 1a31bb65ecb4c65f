//! Artifact transfer operations with atomic writes and streaming
//!
//! Transfers a release file into the destination directory under its
//! declared filename, streaming the body into a temporary file that is
//! renamed into place only once complete, so an interrupted transfer never
//! leaves a half-written artifact behind.

use std::path::{Path, PathBuf};

use futures::StreamExt;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use url::Url;

use crate::app::client::http::HttpHandler;
use crate::app::models::ReleaseFile;
use crate::constants::acquire;
use crate::errors::{TransferError, TransferResult};

/// File transfer operations handler
pub struct TransferHandler<'a> {
    http_handler: &'a HttpHandler,
}

impl<'a> TransferHandler<'a> {
    /// Creates a new TransferHandler with the given HTTP handler
    pub fn new(http_handler: &'a HttpHandler) -> Self {
        Self { http_handler }
    }

    /// Transfers a release file into `dest_dir` under its declared filename
    ///
    /// # Errors
    ///
    /// Returns `TransferError` if:
    /// - The file already exists and `force` is false
    /// - The artifact URL is invalid
    /// - The HTTP request fails or returns a non-success status
    /// - File I/O fails
    pub async fn transfer(
        &self,
        file: &ReleaseFile,
        dest_dir: &Path,
        force: bool,
    ) -> TransferResult<PathBuf> {
        let url = Url::parse(&file.url).map_err(|_| TransferError::InvalidUrl {
            url: file.url.clone(),
        })?;

        // Only the final path component of the declared name is trusted
        let filename = Path::new(&file.filename)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file.filename.clone());
        let destination = dest_dir.join(filename);

        if destination.exists() && !force {
            return Err(TransferError::FileExists {
                path: destination.display().to_string(),
            });
        }

        tokio::fs::create_dir_all(dest_dir).await?;

        let temp_path = destination.with_extension(format!(
            "{}{}",
            destination
                .extension()
                .and_then(|s| s.to_str())
                .unwrap_or(""),
            acquire::TEMP_FILE_SUFFIX
        ));

        match self.transfer_attempt(&url, &temp_path).await {
            Ok(()) => {
                // Atomic move from temp file to final destination
                tokio::fs::rename(&temp_path, &destination).await.map_err(|_e| {
                    TransferError::AtomicOperationFailed {
                        temp_path: temp_path.clone(),
                        final_path: destination.clone(),
                    }
                })?;
                tracing::info!("Successfully transferred: {}", destination.display());
                Ok(destination)
            }
            Err(e) => {
                if temp_path.exists() {
                    let _ = tokio::fs::remove_file(&temp_path).await;
                }
                Err(e)
            }
        }
    }

    /// Streams the artifact body into a temporary path
    async fn transfer_attempt(&self, url: &Url, temp_path: &Path) -> TransferResult<()> {
        let response = self
            .http_handler
            .get_response(url)
            .await
            .map_err(TransferError::from)?;

        if !response.status().is_success() {
            return Err(TransferError::ServerError {
                status: response.status().as_u16(),
            });
        }

        let mut file = File::create(temp_path).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
