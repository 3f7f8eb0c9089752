use thiserror::Error;

use super::word_timing::WordTiming;

/// Fatal problems with a caption document as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptionFormatError {
    #[error("caption document does not start with the {expected} header")]
    MissingHeader { expected: &'static str },
}

/// Problems confined to a single cue. The cue is skipped, the document is not.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CueError {
    #[error("segment has no timing line")]
    MissingTiming,
    #[error("empty timestamp")]
    EmptyTimestamp,
    #[error("invalid timestamp '{0}'")]
    InvalidTimestamp(String),
    #[error("cue ends at {end}s before it starts at {start}s")]
    NegativeDuration { start: f64, end: f64 },
}

/// Domain interface for turning raw caption text into word timings.
///
/// Implementations return words in parse order, which is chronological order
/// for well-formed captions.
pub trait CaptionParser: Send {
    fn parse(&self, caption_text: &str) -> Result<Vec<WordTiming>, CaptionFormatError>;
}
