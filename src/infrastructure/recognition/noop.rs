//! Inert recognizer adapter
//!
//! Stands in where the platform exposes no continuous speech-to-text.
//! The live transcript stays permanently empty; transcript-mode analysis
//! then fails its input validation instead of sending an empty request.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use crate::application::ports::{RecognizerError, SpeechRecognizer};
use crate::domain::capture::RecognitionEvent;

#[derive(Default)]
pub struct InertRecognizer {
    started: AtomicBool,
}

impl InertRecognizer {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SpeechRecognizer for InertRecognizer {
    fn is_available(&self) -> bool {
        false
    }

    async fn start(&self, _language: &str) -> Result<(), RecognizerError> {
        if self.started.swap(true, Ordering::SeqCst) {
            eprintln!("Warning: recognizer already started, ignoring");
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), RecognizerError> {
        if !self.started.swap(false, Ordering::SeqCst) {
            eprintln!("Warning: recognizer already stopped, ignoring");
        }
        Ok(())
    }

    fn drain_events(&self) -> Vec<RecognitionEvent> {
        Vec::new()
    }
}
