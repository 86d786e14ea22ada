//! Recorded artifact value object

use super::modality::MediaMimeType;

/// Value object holding one finished recording, ready for analysis.
/// Created atomically when a capture session stops and immutable after.
#[derive(Debug, Clone)]
pub struct RecordedArtifact {
    payload: Vec<u8>,
    mime_type: MediaMimeType,
}

impl RecordedArtifact {
    /// Create an artifact from the ordered concatenation of buffered chunks
    pub fn new(payload: Vec<u8>, mime_type: MediaMimeType) -> Self {
        Self { payload, mime_type }
    }

    /// Get the raw encoded bytes
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Get the negotiated MIME type
    pub fn mime_type(&self) -> MediaMimeType {
        self.mime_type
    }

    /// Get the size in bytes
    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }

    /// Get human-readable size
    pub fn human_readable_size(&self) -> String {
        let bytes = self.size_bytes();
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        }
    }

    /// Encode the payload as base64 text for transmission
    pub fn transport_encoding(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(&self.payload)
    }
}

/// Strip a `data:` URI prefix from an externally supplied base64 string.
/// Encodings produced by [`RecordedArtifact::transport_encoding`] never
/// carry one, but strings handed in from other sources may.
pub fn strip_data_uri_prefix(encoded: &str) -> &str {
    match encoded.split_once(',') {
        Some((head, tail)) if head.starts_with("data:") => tail,
        _ => encoded,
    }
}
