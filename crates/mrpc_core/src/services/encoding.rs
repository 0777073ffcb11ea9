//! Data URI encoding of local image files.

use crate::error::MrpcError;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;

/// MIME type used when the extension is not recognized.
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Guess the MIME type of an image from its file extension.
pub fn mime_for_path(path: &Path) -> &'static str {
    let Some(extension) = path.extension().and_then(|e| e.to_str()) else {
        return FALLBACK_MIME;
    };

    match extension.to_ascii_lowercase().as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jfif" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "avif" => "image/avif",
        "tif" | "tiff" => "image/tiff",
        _ => FALLBACK_MIME,
    }
}

/// Encode bytes as a base64 data URI.
pub fn encode_data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Read a whole file and encode it as a data URI.
pub async fn read_data_uri(path: &Path) -> Result<String, MrpcError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        tracing::warn!(path = %path.display(), error = %e, "Failed to read icon file");
        MrpcError::from(e)
    })?;

    let mime = mime_for_path(path);
    tracing::debug!(path = %path.display(), mime, bytes = bytes.len(), "Icon file read");

    Ok(encode_data_uri(mime, &bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_mime_for_path() {
        assert_eq!(mime_for_path(Path::new("Logo.PNG")), "image/png");
        assert_eq!(mime_for_path(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for_path(Path::new("vector.svg")), "image/svg+xml");
        assert_eq!(mime_for_path(Path::new("notes.txt")), FALLBACK_MIME);
        assert_eq!(mime_for_path(Path::new("noext")), FALLBACK_MIME);
    }

    #[test]
    fn test_encode_data_uri() {
        assert_eq!(encode_data_uri("image/png", b"hello"), "data:image/png;base64,aGVsbG8=");
        assert_eq!(encode_data_uri("image/png", b""), "data:image/png;base64,");
    }

    #[tokio::test]
    async fn test_read_data_uri() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Logo.PNG");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0x89, b'P', b'N', b'G']).unwrap();

        let uri = read_data_uri(&path).await.unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let err = read_data_uri(&dir.path().join("missing.png")).await.unwrap_err();
        assert_eq!(err.category(), "File");
        assert_eq!(err.hint(), Some("Check that the file exists"));
    }
}
