//! Live transcript accumulator

/// Minimum non-whitespace characters a transcript needs before analysis
pub const MIN_SIGNIFICANT_CHARS: usize = 5;

/// One recognized segment as delivered by the recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechSegment {
    pub text: String,
    /// Interim segments may still change; only finalized text is kept
    pub is_final: bool,
}

impl SpeechSegment {
    pub fn interim(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: false,
        }
    }

    pub fn finalized(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_final: true,
        }
    }
}

/// One recognizer callback: the cumulative result list for the session
/// plus the index of the first result that changed since the last event.
#[derive(Debug, Clone)]
pub struct RecognitionEvent {
    pub result_index: usize,
    pub results: Vec<SpeechSegment>,
}

/// Append-only transcript for one capture session.
///
/// Recognizers re-deliver the cumulative result list on every event, so a
/// finalized segment can appear in several events. The processed-index
/// watermark guarantees each finalized segment is appended exactly once,
/// in arrival order; interim segments never land in the text.
#[derive(Debug, Clone, Default)]
pub struct LiveTranscript {
    text: String,
    processed: usize,
}

impl LiveTranscript {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one recognizer event into the transcript
    pub fn apply(&mut self, event: &RecognitionEvent) {
        let start = event.result_index.max(self.processed);
        for (index, segment) in event.results.iter().enumerate().skip(start) {
            if segment.is_final && index >= self.processed {
                self.text.push_str(&segment.text);
                self.processed = index + 1;
            }
        }
    }

    /// The accumulated finalized text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Count of non-whitespace characters
    pub fn significant_chars(&self) -> usize {
        self.text.chars().filter(|c| !c.is_whitespace()).count()
    }

    /// Whether the transcript carries enough content for analysis
    pub fn is_sufficient(&self) -> bool {
        self.significant_chars() >= MIN_SIGNIFICANT_CHARS
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Discard all accumulated text, ready for a new session
    pub fn clear(&mut self) {
        self.text.clear();
        self.processed = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(result_index: usize, results: Vec<SpeechSegment>) -> RecognitionEvent {
        RecognitionEvent {
            result_index,
            results,
        }
    }

    #[test]
    fn appends_only_finalized_segments() {
        let mut transcript = LiveTranscript::new();

        transcript.apply(&event(0, vec![SpeechSegment::interim("こんに")]));
        assert!(transcript.is_empty());

        transcript.apply(&event(0, vec![SpeechSegment::finalized("こんにちは")]));
        assert_eq!(transcript.text(), "こんにちは");
    }

    #[test]
    fn finalized_segment_appended_exactly_once() {
        let mut transcript = LiveTranscript::new();

        transcript.apply(&event(0, vec![SpeechSegment::finalized("はい")]));
        // Recognizer re-delivers the full cumulative list with a new
        // interim result appended.
        transcript.apply(&event(
            1,
            vec![
                SpeechSegment::finalized("はい"),
                SpeechSegment::interim("そう"),
            ],
        ));
        transcript.apply(&event(
            1,
            vec![
                SpeechSegment::finalized("はい"),
                SpeechSegment::finalized("そうです"),
            ],
        ));

        assert_eq!(transcript.text(), "はいそうです");
    }

    #[test]
    fn preserves_arrival_order_with_interleaved_interims() {
        let mut transcript = LiveTranscript::new();

        transcript.apply(&event(
            0,
            vec![
                SpeechSegment::finalized("一"),
                SpeechSegment::interim("に"),
            ],
        ));
        transcript.apply(&event(
            1,
            vec![
                SpeechSegment::finalized("一"),
                SpeechSegment::finalized("二"),
                SpeechSegment::interim("さん"),
            ],
        ));
        transcript.apply(&event(
            2,
            vec![
                SpeechSegment::finalized("一"),
                SpeechSegment::finalized("二"),
                SpeechSegment::finalized("三"),
            ],
        ));

        assert_eq!(transcript.text(), "一二三");
    }

    #[test]
    fn significant_chars_ignores_whitespace() {
        let mut transcript = LiveTranscript::new();
        transcript.apply(&event(0, vec![SpeechSegment::finalized("  a b\t c \n")]));
        assert_eq!(transcript.significant_chars(), 3);
        assert!(!transcript.is_sufficient());
    }

    #[test]
    fn sufficiency_threshold_is_five() {
        let mut short = LiveTranscript::new();
        short.apply(&event(0, vec![SpeechSegment::finalized("abcd")]));
        assert!(!short.is_sufficient());

        let mut enough = LiveTranscript::new();
        enough.apply(&event(0, vec![SpeechSegment::finalized("abcde")]));
        assert!(enough.is_sufficient());
    }

    #[test]
    fn clear_resets_watermark() {
        let mut transcript = LiveTranscript::new();
        transcript.apply(&event(0, vec![SpeechSegment::finalized("古い")]));
        transcript.clear();
        assert!(transcript.is_empty());

        // A fresh session starts its result indices over from zero.
        transcript.apply(&event(0, vec![SpeechSegment::finalized("新しい")]));
        assert_eq!(transcript.text(), "新しい");
    }
}
