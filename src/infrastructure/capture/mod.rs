//! Capture infrastructure module
//!
//! Microphone capture via cpal, encoded to FLAC for the analysis upload.

mod cpal_capture;
mod flac_encoder;

pub use cpal_capture::CpalCapture;
pub use flac_encoder::{encode_to_flac, TARGET_SAMPLE_RATE};
