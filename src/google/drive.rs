use crate::errors::ServiceError;
use serde::Deserialize;
use serde_json::json;
use std::path::Path;

const FILES_URL: &str = "https://www.googleapis.com/drive/v3/files";
const UPLOAD_URL: &str = "https://www.googleapis.com/upload/drive/v3/files?uploadType=multipart";
const FOLDER_MIME: &str = "application/vnd.google-apps.folder";

#[derive(Debug, Deserialize)]
struct FileResource {
    id: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<FileResource>,
}

/// Thin Drive v3 client for the backup job: folder discovery/creation and
/// multipart uploads, authenticated with a short-lived access token.
pub struct DriveClient {
    http: reqwest::Client,
    access_token: String,
}

impl DriveClient {
    pub fn new(access_token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            access_token,
        }
    }

    /// Find a non-trashed folder by name, anywhere in the drive.
    pub async fn find_folder(&self, name: &str) -> Result<Option<String>, ServiceError> {
        let query = format!(
            "name='{}' and mimeType='{}' and trashed=false",
            name.replace('\'', "\\'"),
            FOLDER_MIME
        );
        let response = self
            .http
            .get(FILES_URL)
            .bearer_auth(&self.access_token)
            .query(&[("q", query.as_str()), ("spaces", "drive"), ("fields", "files(id, name)")])
            .send()
            .await
            .map_err(drive_err)?
            .error_for_status()
            .map_err(drive_err)?;

        let list: FileList = response.json().await.map_err(drive_err)?;
        Ok(list.files.into_iter().next().map(|f| f.id))
    }

    /// Create a folder, optionally inside a parent.
    pub async fn create_folder(
        &self,
        name: &str,
        parent: Option<&str>,
    ) -> Result<String, ServiceError> {
        let mut metadata = json!({
            "name": name,
            "mimeType": FOLDER_MIME,
        });
        if let Some(parent) = parent {
            metadata["parents"] = json!([parent]);
        }

        let response = self
            .http
            .post(FILES_URL)
            .bearer_auth(&self.access_token)
            .query(&[("fields", "id")])
            .json(&metadata)
            .send()
            .await
            .map_err(drive_err)?
            .error_for_status()
            .map_err(drive_err)?;

        let created: FileResource = response.json().await.map_err(drive_err)?;
        Ok(created.id)
    }

    /// Find-or-create by name.
    pub async fn ensure_folder(&self, name: &str) -> Result<String, ServiceError> {
        match self.find_folder(name).await? {
            Some(id) => Ok(id),
            None => self.create_folder(name, None).await,
        }
    }

    /// Multipart upload of one local file into a parent folder.
    pub async fn upload_file(&self, path: &Path, parent: &str) -> Result<String, ServiceError> {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ServiceError::ValidationError(format!("Unusable backup file name: {:?}", path))
            })?
            .to_string();

        let contents = tokio::fs::read(path).await.map_err(|e| {
            ServiceError::InternalError(format!("Failed to read backup file {:?}: {}", path, e))
        })?;

        let metadata = json!({
            "name": file_name,
            "parents": [parent],
        });

        let form = reqwest::multipart::Form::new()
            .part(
                "metadata",
                reqwest::multipart::Part::text(metadata.to_string())
                    .mime_str("application/json")
                    .map_err(drive_err)?,
            )
            .part(
                "file",
                reqwest::multipart::Part::bytes(contents)
                    .file_name(file_name)
                    .mime_str("application/gzip")
                    .map_err(drive_err)?,
            );

        let response = self
            .http
            .post(UPLOAD_URL)
            .bearer_auth(&self.access_token)
            .multipart(form)
            .send()
            .await
            .map_err(drive_err)?
            .error_for_status()
            .map_err(drive_err)?;

        let uploaded: FileResource = response.json().await.map_err(drive_err)?;
        Ok(uploaded.id)
    }
}

fn drive_err(e: reqwest::Error) -> ServiceError {
    ServiceError::ExternalServiceError(format!("Google Drive: {}", e))
}
