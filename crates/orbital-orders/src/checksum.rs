//! Verification of downloaded results against the order manifest.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use orbital_core::{ChecksumAlgorithm, OrdersPortResult};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{ClientError, ClientResult};
use crate::models::Manifest;
use crate::port::map_error;

/// Manifest written by the service next to the order results.
pub const MANIFEST_FILE: &str = "manifest.json";

const READ_CHUNK: usize = 64 * 1024;

/// Check every file listed in `directory/manifest.json` against its digest.
///
/// `algorithm` is `MD5` or `SHA256` (any case). Fails on the first file
/// whose digest differs, naming that file.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// orbital_orders::validate_checksum(Path::new("results/5ece1dc0"), "md5")?;
/// # Ok::<(), orbital_core::OrdersPortError>(())
/// ```
pub fn validate_checksum(directory: &Path, algorithm: &str) -> OrdersPortResult<()> {
    let algorithm: ChecksumAlgorithm = algorithm.parse()?;
    verify_manifest(directory, algorithm).map_err(map_error)
}

fn verify_manifest(directory: &Path, algorithm: ChecksumAlgorithm) -> ClientResult<()> {
    let manifest_path = directory.join(MANIFEST_FILE);
    let raw = std::fs::read(&manifest_path)?;
    let manifest: Manifest =
        serde_json::from_slice(&raw).map_err(|e| ClientError::InvalidManifest {
            path: manifest_path.clone(),
            message: e.to_string(),
        })?;

    let key = algorithm.manifest_key();
    for entry in &manifest.files {
        let expected = entry
            .digests
            .get(key)
            .ok_or_else(|| ClientError::InvalidManifest {
                path: manifest_path.clone(),
                message: format!("no {key} digest for {}", entry.path),
            })?;

        let path = directory.join(&entry.path);
        let actual = file_digest(&path, algorithm)?;
        if !actual.eq_ignore_ascii_case(expected) {
            return Err(ClientError::ChecksumMismatch {
                path,
                expected: expected.clone(),
                actual,
            });
        }
        debug!(path = %path.display(), algorithm = key, "Checksum verified");
    }
    Ok(())
}

/// Hex digest of a file, read in fixed-size chunks.
fn file_digest(path: &Path, algorithm: ChecksumAlgorithm) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut buf = vec![0u8; READ_CHUNK];

    match algorithm {
        ChecksumAlgorithm::Md5 => {
            let mut context = md5::Context::new();
            loop {
                let n = file.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                context.consume(&buf[..n]);
            }
            Ok(format!("{:x}", context.compute()))
        }
        ChecksumAlgorithm::Sha256 => {
            let mut hasher = Sha256::new();
            loop {
                let n = file.read(&mut buf)?;
                if n == 0 {
                    break;
                }
                hasher.update(&buf[..n]);
            }
            Ok(format!("{:x}", hasher.finalize()))
        }
    }
}
