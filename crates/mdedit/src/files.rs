use crate::error::Error;
use mdedit_core::editor::NEW_FILE_CONTENT;
use std::io::ErrorKind;

/// Read `path` as UTF-8 text. A missing file reads as a placeholder document.
pub async fn load(path: &str) -> std::result::Result<String, Error> {
    match tokio::fs::read(path).await {
        Ok(bytes) => String::from_utf8(bytes).map_err(|_| Error::NotUtf8(path.to_string())),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            log::info!("{path} does not exist, starting a new file");
            Ok(NEW_FILE_CONTENT.to_string())
        }
        Err(e) => Err(Error::Read(path.to_string(), e.to_string())),
    }
}

/// Write `content` to `path`, replacing whatever was there.
pub async fn save(path: &str, content: &str) -> std::result::Result<(), Error> {
    tokio::fs::write(path, content.as_bytes())
        .await
        .map_err(|e| Error::Write(path.to_string(), e.to_string()))
}
