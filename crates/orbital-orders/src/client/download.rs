//! Result downloads.
//!
//! Bodies are streamed into a temporary file next to the destination and
//! renamed into place once complete, so an interrupted transfer never
//! leaves a truncated file under the final name.

use std::io;
use std::path::{Path, PathBuf};

use futures_util::stream::{self, StreamExt, TryStreamExt};
use orbital_core::{DownloadedFile, OrderId};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info};
use url::Url;

use super::OrdersClient;
use crate::error::ClientResult;
use crate::http::{HttpBackend, StreamingResponse};
use crate::parsing::derive_filename;

const TEMP_PREFIX: &str = ".orbital-";
const TEMP_SUFFIX: &str = ".part";

/// Describe a file that is already on disk, if it exists.
async fn existing_file(path: &Path, filename: &str) -> ClientResult<Option<DownloadedFile>> {
    match fs::metadata(path).await {
        Ok(meta) => Ok(Some(DownloadedFile {
            path: path.to_path_buf(),
            filename: filename.to_string(),
            size: meta.len(),
            written: false,
        })),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Stream the body into a temp file in `directory`, then move it to `path`.
///
/// Returns the number of bytes written, or `None` when `overwrite` is false
/// and `path` appeared while the transfer was running.
async fn write_atomically(
    directory: &Path,
    path: &Path,
    response: StreamingResponse,
    overwrite: bool,
) -> ClientResult<Option<u64>> {
    let dir = directory.to_path_buf();
    let temp = blocking(move || {
        tempfile::Builder::new()
            .prefix(TEMP_PREFIX)
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
    })
    .await?;
    let (std_file, temp_path) = temp.into_parts();
    let mut file = fs::File::from_std(std_file);

    let mut body = response.body;
    let mut written: u64 = 0;
    while let Some(chunk) = body.try_next().await? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    file.sync_all().await?;
    drop(file);

    // The temp path is removed on drop if either persist fails.
    let path = path.to_path_buf();
    let persisted = blocking(move || {
        if overwrite {
            return temp_path.persist(&path).map(|()| true).map_err(io::Error::from);
        }
        match temp_path.persist_noclobber(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.error.kind() == io::ErrorKind::AlreadyExists => Ok(false),
            Err(e) => Err(io::Error::from(e)),
        }
    })
    .await?;

    Ok(persisted.then_some(written))
}

/// Run a blocking filesystem call off the async workers.
async fn blocking<T, F>(f: F) -> io::Result<T>
where
    F: FnOnce() -> io::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| io::Error::other(format!("spawn_blocking join error: {e}")))?
}

impl<B: HttpBackend> OrdersClient<B> {
    /// Download a single result location into `directory`.
    pub(crate) async fn download_asset(
        &self,
        location: &Url,
        directory: &Path,
        overwrite: bool,
    ) -> ClientResult<DownloadedFile> {
        let response = self.backend.open_stream(location).await?;
        let filename = derive_filename(response.content_disposition.as_deref(), location);
        let path: PathBuf = directory.join(&filename);

        if !overwrite {
            if let Some(existing) = existing_file(&path, &filename).await? {
                debug!(path = %path.display(), "File exists, skipping download");
                return Ok(existing);
            }
        }

        fs::create_dir_all(directory).await?;
        debug!(
            path = %path.display(),
            content_length = ?response.content_length,
            "Downloading result"
        );

        match write_atomically(directory, &path, response, overwrite).await? {
            Some(size) => {
                info!(path = %path.display(), size, "Download complete");
                Ok(DownloadedFile {
                    path,
                    filename,
                    size,
                    written: true,
                })
            }
            None => existing_file(&path, &filename).await?.ok_or_else(|| {
                io::Error::new(io::ErrorKind::NotFound, "destination vanished").into()
            }),
        }
    }

    /// Download every result of an order.
    ///
    /// Up to `max_concurrent_downloads` transfers run at once. Files are
    /// returned in result order; the first failure aborts the rest.
    pub(crate) async fn download_order(
        &self,
        order_id: &OrderId,
        directory: &Path,
        overwrite: bool,
    ) -> ClientResult<Vec<DownloadedFile>> {
        let order = self.get_order(order_id).await?;
        let locations = order
            .result_locations()
            .into_iter()
            .map(Url::parse)
            .collect::<Result<Vec<_>, _>>()?;

        info!(
            order_id = %order_id,
            files = locations.len(),
            "Downloading order results"
        );

        let downloads: Vec<_> = locations
            .iter()
            .map(|location| self.download_asset(location, directory, overwrite))
            .collect();

        stream::iter(downloads)
            .buffered(self.config.max_concurrent_downloads)
            .try_collect()
            .await
    }
}
