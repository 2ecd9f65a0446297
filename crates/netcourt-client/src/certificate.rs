// crates/netcourt-client/src/certificate.rs
// ============================================================================
// Module: Certificate Retrieval
// Description: Download of issued notary certificates to local files.
// Purpose: Persist the certificate referenced by a successful response.
// Dependencies: netcourt-core, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! A successful certificate-URL response points at the issued certificate.
//! Retrieval streams it to `<dir>/<name>.<ext>`, where the extension comes
//! from the URL path and defaults to `pdf`.
//! Invariants:
//! - Rejected responses and responses without a URL download nothing.
//! - File names never contain path separators.
//! - A failed copy leaves no partial file behind.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::fs::File;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use netcourt_core::NotaryError;
use serde_json::Value;
use url::Url;

use crate::envelope::NotaryResponse;
use crate::transport::DEFAULT_TIMEOUT;
use crate::transport::HttpTransport;
use crate::transport::Transport;
use crate::transport::TransportError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Extension used when the certificate URL path has none.
pub const DEFAULT_CERT_EXTENSION: &str = "pdf";

// ============================================================================
// SECTION: Download
// ============================================================================

impl NotaryResponse {
    /// Downloads the certificate with a default transport.
    ///
    /// Returns `None` when the response was rejected or carries no URL.
    ///
    /// # Errors
    ///
    /// Returns [`NotaryError`] when the name is unusable, the download fails,
    /// or the file cannot be written.
    pub fn download_cert(&self, dir: &Path, name: Option<&str>) -> Result<Option<PathBuf>, NotaryError> {
        if !self.success || self.cert_url.is_none() {
            return Ok(None);
        }
        let transport = HttpTransport::new(DEFAULT_TIMEOUT).map_err(map_transport_error)?;
        download_cert_with(self, &transport, dir, name)
    }
}

/// Downloads the certificate referenced by `response` through `transport`.
///
/// `name` is the file stem; when absent the response data is used.
///
/// # Errors
///
/// Returns [`NotaryError::InvalidArgument`] for an unusable name,
/// [`NotaryError::BadResponse`] for an invalid URL or failed download, and
/// [`NotaryError::Io`] when the file cannot be written.
pub fn download_cert_with(
    response: &NotaryResponse,
    transport: &dyn Transport,
    dir: &Path,
    name: Option<&str>,
) -> Result<Option<PathBuf>, NotaryError> {
    let Some(cert_url) = response.cert_url.as_deref().filter(|_| response.success) else {
        return Ok(None);
    };
    let url = Url::parse(cert_url).map_err(|err| NotaryError::BadResponse {
        message: format!("invalid certificate url: {err}"),
        status: response.status,
        code: None,
    })?;
    let stem = file_stem(response, name)?;
    let path = dir.join(format!("{stem}.{}", extension_of(&url)));

    let mut reader = transport.get(&url).map_err(map_transport_error)?;
    let mut file = File::create(&path).map_err(|err| NotaryError::Io(err.to_string()))?;
    if let Err(err) = io::copy(&mut reader, &mut file) {
        drop(file);
        fs::remove_file(&path).ok();
        return Err(NotaryError::Io(err.to_string()));
    }
    file.sync_all().map_err(|err| NotaryError::Io(err.to_string()))?;
    tracing::info!(path = %path.display(), "notary certificate downloaded");
    Ok(Some(path))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the file stem from the caller's name or the response data.
pub(crate) fn file_stem(response: &NotaryResponse, name: Option<&str>) -> Result<String, NotaryError> {
    let stem = match name.filter(|name| !name.is_empty()) {
        Some(name) => name.to_string(),
        None => match response.data.as_ref() {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => String::new(),
        },
    };
    if stem.is_empty() {
        return Err(NotaryError::InvalidArgument("Certificate name can not be empty".to_string()));
    }
    if stem == "." || stem == ".." || stem.contains(['/', '\\']) {
        return Err(NotaryError::InvalidArgument(format!(
            "Certificate name must not contain path separators: {stem}"
        )));
    }
    Ok(stem)
}

/// Returns the extension of the last URL path segment, or the default.
pub(crate) fn extension_of(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .and_then(|segment| Path::new(segment).extension())
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .unwrap_or(DEFAULT_CERT_EXTENSION)
        .to_string()
}

/// Maps download transport failures onto the notary error surface.
fn map_transport_error(err: TransportError) -> NotaryError {
    match err {
        TransportError::Status(status) => NotaryError::BadResponse {
            message: "certificate download failed".to_string(),
            status,
            code: None,
        },
        other => {
            tracing::warn!(error = %other, "certificate download failed");
            NotaryError::network_failure()
        }
    }
}
