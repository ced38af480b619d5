//! HTTP client for the remote speech-translation service.
//!
//! One request/response exchange: the recorded WAV goes up as a multipart
//! form with a single file field, translated audio bytes come back. No
//! retries, no timeouts, no streaming.

use crate::defaults::{TRANSLATE_ENDPOINT, UPLOAD_FIELD_NAME, UPLOAD_FILE_NAME, UPLOAD_MIME_TYPE};
use crate::error::{Result, VaaniError};
use crate::session::WaveformFile;
use reqwest::multipart::{Form, Part};

/// Opaque translated audio returned by the service.
///
/// The body is never inspected beyond sniffing whether it is WAV; the
/// content type only helps pick a file extension when saving it.
#[derive(Debug, Clone)]
pub struct TranslationResult {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

impl TranslationResult {
    /// File extension guessed from the response content type.
    pub fn file_extension(&self) -> &'static str {
        let content_type = self.content_type.as_deref().unwrap_or("");
        let essence = content_type.split(';').next().unwrap_or("").trim();
        match essence {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/mpeg" | "audio/mp3" => "mp3",
            "audio/ogg" | "application/ogg" => "ogg",
            "audio/webm" => "webm",
            "audio/flac" | "audio/x-flac" => "flac",
            _ => "bin",
        }
    }

    /// Whether the body looks like a RIFF/WAVE file we can play locally.
    pub fn is_wav(&self) -> bool {
        self.bytes.len() >= 12 && &self.bytes[0..4] == b"RIFF" && &self.bytes[8..12] == b"WAVE"
    }
}

/// Client for the fixed translation endpoint.
pub struct TranslationClient {
    client: reqwest::Client,
    endpoint: String,
}

impl TranslationClient {
    /// Client against the built-in endpoint.
    pub fn new() -> Self {
        Self::with_endpoint(TRANSLATE_ENDPOINT)
    }

    /// Client against a specific endpoint (tests).
    pub fn with_endpoint(endpoint: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload a recording and receive the translated audio.
    ///
    /// # Errors
    /// `VaaniError::TransferRejected` for any non-success HTTP status (with a
    /// snippet of the response body), `VaaniError::TransferNetwork` for
    /// connection and protocol faults. Both are terminal; the caller decides
    /// whether to retry manually.
    pub async fn translate(&self, recording: &WaveformFile) -> Result<TranslationResult> {
        let file_part = Part::bytes(recording.data.clone())
            .file_name(UPLOAD_FILE_NAME)
            .mime_str(UPLOAD_MIME_TYPE)
            .map_err(|e| VaaniError::TransferNetwork {
                message: format!("Failed to build upload form: {}", e),
            })?;

        let form = Form::new().part(UPLOAD_FIELD_NAME, file_part);

        let response = self
            .client
            .post(&self.endpoint)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VaaniError::TransferNetwork {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(VaaniError::TransferRejected {
                status: status.as_u16(),
                message: snippet,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VaaniError::TransferNetwork {
                message: format!("Failed to read response body: {}", e),
            })?
            .to_vec();

        Ok(TranslationResult {
            bytes,
            content_type,
        })
    }
}

impl Default for TranslationClient {
    fn default() -> Self {
        Self::new()
    }
}
