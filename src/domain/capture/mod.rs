//! Capture domain module

mod artifact;
mod modality;
mod transcript;

pub use artifact::{strip_data_uri_prefix, RecordedArtifact};
pub use modality::{negotiate_mime_type, MediaMimeType, Modality};
pub use transcript::{
    LiveTranscript, RecognitionEvent, SpeechSegment, MIN_SIGNIFICANT_CHARS,
};
