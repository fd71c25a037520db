//! File upload endpoint

use std::path::Path;

use reqwest::multipart::{Form, Part};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::services::client::ApiClient;
use crate::utils::errors::{PayTaskError, Result};
use crate::utils::helpers::format_bytes;

/// Largest file the backend accepts
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    pub url: String,
    pub filename: String,
    pub size: u64,
    #[serde(default)]
    pub mime_type: Option<String>,
}

/// Service for `/uploads`
#[derive(Clone, Debug)]
pub struct UploadService {
    client: ApiClient,
}

impl UploadService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Upload a local file as multipart form field `file`
    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFile> {
        let metadata = tokio::fs::metadata(path).await?;
        if metadata.len() > MAX_UPLOAD_BYTES {
            return Err(PayTaskError::InvalidInput(format!(
                "{} is {}, the limit is {}",
                path.display(),
                format_bytes(metadata.len()),
                format_bytes(MAX_UPLOAD_BYTES)
            )));
        }

        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| PayTaskError::InvalidInput(format!("{} is not a file", path.display())))?;

        let bytes = tokio::fs::read(path).await?;
        let part = Part::bytes(bytes)
            .file_name(filename.clone())
            .mime_str(guess_mime(&filename))
            .map_err(PayTaskError::Http)?;
        let form = Form::new().part("file", part);

        let uploaded: UploadedFile = self.client.upload("uploads", form).await?;
        info!(filename = %uploaded.filename, size = %format_bytes(uploaded.size), "File uploaded");
        Ok(uploaded)
    }
}

fn guess_mime(filename: &str) -> &'static str {
    let extension = filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("zip") => "application/zip",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_mime() {
        assert_eq!(guess_mime("shot.PNG"), "image/png");
        assert_eq!(guess_mime("answers.csv"), "text/csv");
        assert_eq!(guess_mime("README"), "application/octet-stream");
    }
}
