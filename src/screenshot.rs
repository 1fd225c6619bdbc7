//! Screenshot proof
//!
//! The proof image travels to the endpoint as a `data:` URL with a base64 payload,
//! the same string the browser hands back from `FileReader::readAsDataURL`.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{ChallengeError, ChallengeResult};

/// A screenshot encoded as a base64 data URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Screenshot {
    data_url: String,
}

impl Screenshot {
    /// Encode raw image bytes
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self {
            data_url: format!("data:{};base64,{}", mime, STANDARD.encode(bytes)),
        }
    }

    /// Wrap a data URL produced elsewhere (e.g. by the browser)
    pub fn from_data_url(data_url: String) -> ChallengeResult<Self> {
        if !data_url.starts_with("data:") {
            return Err(ChallengeError::Decode(
                "screenshot is not a data URL".to_string(),
            ));
        }
        Ok(Self { data_url })
    }

    /// Read and encode an image file
    #[cfg(feature = "native")]
    pub fn from_path(path: &std::path::Path) -> ChallengeResult<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(mime_for_path(path), &bytes))
    }

    pub fn data_url(&self) -> &str {
        &self.data_url
    }

    /// MIME type declared in the data URL header
    pub fn mime(&self) -> &str {
        self.data_url
            .strip_prefix("data:")
            .and_then(|rest| rest.split([';', ',']).next())
            .unwrap_or("")
    }

    pub fn into_data_url(self) -> String {
        self.data_url
    }
}

/// Guess a MIME type from the file extension
pub fn mime_for_path(path: &std::path::Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
