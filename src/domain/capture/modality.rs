//! Capture modality and encoding negotiation

use std::fmt;
use std::str::FromStr;

use crate::domain::error::InvalidModalityError;

/// Which devices a capture session acquires
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Modality {
    /// Microphone only
    #[default]
    Audio,
    /// Camera and microphone
    AudioVideo,
}

impl Modality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Audio => "audio",
            Self::AudioVideo => "video",
        }
    }

    pub const fn has_video(&self) -> bool {
        matches!(self, Self::AudioVideo)
    }
}

impl FromStr for Modality {
    type Err = InvalidModalityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "audio" => Ok(Self::Audio),
            "video" | "audio+video" => Ok(Self::AudioVideo),
            _ => Err(InvalidModalityError {
                input: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Modality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Supported media MIME types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaMimeType {
    VideoWebmVp8Opus,
    VideoWebm,
    VideoMp4,
    AudioWebmOpus,
    AudioWebm,
    AudioMp3,
    AudioMp4,
    AudioFlac,
    AudioWav,
}

impl MediaMimeType {
    /// Full MIME string including codec parameters, as used for
    /// capability probing
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::VideoWebmVp8Opus => "video/webm;codecs=vp8,opus",
            Self::VideoWebm => "video/webm",
            Self::VideoMp4 => "video/mp4",
            Self::AudioWebmOpus => "audio/webm;codecs=opus",
            Self::AudioWebm => "audio/webm",
            Self::AudioMp3 => "audio/mp3",
            Self::AudioMp4 => "audio/mp4",
            Self::AudioFlac => "audio/flac",
            Self::AudioWav => "audio/wav",
        }
    }

    /// Bare content type for transmission (codec parameters stripped)
    pub const fn content_type(&self) -> &'static str {
        match self {
            Self::VideoWebmVp8Opus | Self::VideoWebm => "video/webm",
            Self::VideoMp4 => "video/mp4",
            Self::AudioWebmOpus | Self::AudioWebm => "audio/webm",
            Self::AudioMp3 => "audio/mp3",
            Self::AudioMp4 => "audio/mp4",
            Self::AudioFlac => "audio/flac",
            Self::AudioWav => "audio/wav",
        }
    }

    /// Ordered encoding preferences for a modality. Negotiation walks this
    /// list and takes the first entry the capture backend reports as
    /// supported.
    pub const fn preferences(modality: Modality) -> &'static [MediaMimeType] {
        match modality {
            Modality::AudioVideo => &[
                Self::VideoWebmVp8Opus,
                Self::VideoWebm,
                Self::VideoMp4,
            ],
            Modality::Audio => &[
                Self::AudioWebmOpus,
                Self::AudioWebm,
                Self::AudioMp3,
                Self::AudioMp4,
            ],
        }
    }
}

impl fmt::Display for MediaMimeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Select the first preferred encoding the backend supports, or `None`
/// when the backend should fall back to its own platform default.
pub fn negotiate_mime_type(
    modality: Modality,
    supports: impl Fn(&str) -> bool,
) -> Option<MediaMimeType> {
    MediaMimeType::preferences(modality)
        .iter()
        .copied()
        .find(|mime| supports(mime.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modality_parse() {
        assert_eq!("audio".parse::<Modality>().unwrap(), Modality::Audio);
        assert_eq!("video".parse::<Modality>().unwrap(), Modality::AudioVideo);
        assert_eq!(
            "audio+video".parse::<Modality>().unwrap(),
            Modality::AudioVideo
        );
        assert!("screen".parse::<Modality>().is_err());
    }

    #[test]
    fn content_type_strips_codec_parameters() {
        assert_eq!(MediaMimeType::VideoWebmVp8Opus.content_type(), "video/webm");
        assert_eq!(MediaMimeType::AudioWebmOpus.content_type(), "audio/webm");
        assert_eq!(MediaMimeType::AudioFlac.content_type(), "audio/flac");
    }

    #[test]
    fn negotiation_picks_first_supported() {
        let picked = negotiate_mime_type(Modality::AudioVideo, |m| m == "video/webm");
        assert_eq!(picked, Some(MediaMimeType::VideoWebm));
    }

    #[test]
    fn negotiation_prefers_codec_specific_entry() {
        let picked = negotiate_mime_type(Modality::Audio, |_| true);
        assert_eq!(picked, Some(MediaMimeType::AudioWebmOpus));
    }

    #[test]
    fn negotiation_falls_back_to_none() {
        let picked = negotiate_mime_type(Modality::Audio, |_| false);
        assert_eq!(picked, None);
    }

    #[test]
    fn audio_preferences_exclude_video() {
        for mime in MediaMimeType::preferences(Modality::Audio) {
            assert!(mime.content_type().starts_with("audio/"));
        }
    }
}
