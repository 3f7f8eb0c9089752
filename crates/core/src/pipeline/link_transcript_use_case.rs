use std::collections::BTreeMap;

use crate::alignment::domain::fuzzy_aligner::FuzzyAligner;
use crate::alignment::domain::region_resolver::{resolve_regions, RegionKind, RegionSpan};
use crate::alignment::domain::transcript::{TranscriptWord, WordLabel};
use crate::captions::domain::caption_parser::{CaptionFormatError, CaptionParser};
use crate::captions::domain::word_timing::WordTiming;
use crate::playback::domain::event_compressor::EventCompressor;
use crate::playback::domain::timed_event::TimedEvent;

/// Counts describing one link attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkSummary {
    pub caption_words: usize,
    pub transcript_words: usize,
    pub matched_words: usize,
    pub events: usize,
}

impl LinkSummary {
    /// Transcript words left unlabeled because no caption word matched in the window.
    pub fn gaps(&self) -> usize {
        self.transcript_words - self.matched_words
    }

    /// Nothing aligned: playback over this link never highlights anything.
    pub fn is_empty(&self) -> bool {
        self.events == 0
    }
}

/// Everything produced by parsing, aligning and compressing one transcript.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentOutcome {
    pub word_timings: Vec<WordTiming>,
    pub events: Vec<TimedEvent>,
    /// Indexed by transcript position; `None` for unmatched words.
    pub labels: Vec<Option<WordLabel>>,
    pub block_spans: BTreeMap<usize, RegionSpan>,
    pub phrase_spans: BTreeMap<usize, RegionSpan>,
    pub summary: LinkSummary,
}

/// Parses a caption document, aligns it against a transcript and compresses the
/// result into timed events.
pub struct LinkTranscriptUseCase {
    parser: Box<dyn CaptionParser>,
    aligner: FuzzyAligner,
}

impl LinkTranscriptUseCase {
    pub fn new(parser: Box<dyn CaptionParser>, aligner: FuzzyAligner) -> Self {
        Self { parser, aligner }
    }

    pub fn set_aligner(&mut self, aligner: FuzzyAligner) {
        self.aligner = aligner;
    }

    pub fn execute(
        &self,
        transcript: &[TranscriptWord],
        caption_text: &str,
    ) -> Result<AlignmentOutcome, CaptionFormatError> {
        // 1. Parse captions (only a bad header is fatal)
        let word_timings = self.parser.parse(caption_text)?;

        // 2. Align transcript words against caption words
        let entries = self.aligner.align(transcript, &word_timings);
        let mut labels = vec![None; transcript.len()];
        for entry in &entries {
            labels[entry.transcript_position] = Some(entry.label());
        }

        // 3. Compress into timed events; the entries are not kept
        let events = EventCompressor::compress(&entries);

        let summary = LinkSummary {
            caption_words: word_timings.len(),
            transcript_words: transcript.len(),
            matched_words: entries.len(),
            events: events.len(),
        };
        if summary.is_empty() {
            log::warn!(
                "No transcript words aligned ({} transcript words, {} caption words)",
                summary.transcript_words,
                summary.caption_words
            );
        } else if summary.gaps() > 0 {
            log::debug!("{} transcript words left untimed", summary.gaps());
        }

        Ok(AlignmentOutcome {
            block_spans: resolve_regions(&labels, RegionKind::Block),
            phrase_spans: resolve_regions(&labels, RegionKind::Phrase),
            word_timings,
            events,
            labels,
            summary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::captions::infrastructure::webvtt_parser::WebVttParser;
    use approx::assert_relative_eq;

    // --- Stubs ---

    struct StubParser {
        words: Vec<WordTiming>,
    }

    impl CaptionParser for StubParser {
        fn parse(&self, _: &str) -> Result<Vec<WordTiming>, CaptionFormatError> {
            Ok(self.words.clone())
        }
    }

    fn timing(text: &str, index: usize, start: f64) -> WordTiming {
        WordTiming {
            text: text.to_string(),
            start_seconds: start,
            end_seconds: start + 1.0,
            word_index: index,
            phrase_index: 0,
            block_index: 0,
        }
    }

    fn webvtt_use_case() -> LinkTranscriptUseCase {
        LinkTranscriptUseCase::new(Box::new(WebVttParser::new()), FuzzyAligner::new(0))
    }

    fn transcript(texts: &[&str]) -> Vec<TranscriptWord> {
        texts.iter().map(|t| TranscriptWord::new(*t)).collect()
    }

    #[test]
    fn test_hello_world_end_to_end() {
        let use_case = webvtt_use_case();
        let outcome = use_case
            .execute(
                &transcript(&["Hello", "world"]),
                "WEBVTT\n\n00:00:01.000 --> 00:00:02.000\nHello world",
            )
            .unwrap();

        assert_eq!(outcome.summary.matched_words, 2);
        assert_eq!(outcome.events.len(), 1);
        assert_relative_eq!(outcome.events[0].seconds, 1.0);
        assert_eq!(outcome.events[0].current_word_indexes, vec![0, 1]);
        assert_eq!(outcome.labels[1].unwrap().word_index, 1);
    }

    #[test]
    fn test_missing_header_fails() {
        let use_case = webvtt_use_case();
        let result =
            use_case.execute(&transcript(&["Hello"]), "00:01.000 --> 00:02.000\nHello");
        assert!(matches!(result, Err(CaptionFormatError::MissingHeader { .. })));
    }

    #[test]
    fn test_gaps_are_left_unlabeled() {
        let parser = StubParser {
            words: vec![timing("one", 0, 1.0), timing("two", 1, 2.0)],
        };
        let use_case = LinkTranscriptUseCase::new(Box::new(parser), FuzzyAligner::new(0));
        let outcome = use_case.execute(&transcript(&["one", "um", "two"]), "").unwrap();

        assert_eq!(outcome.labels.len(), 3);
        assert!(outcome.labels[0].is_some());
        assert!(outcome.labels[1].is_none());
        assert!(outcome.labels[2].is_some());
        assert_eq!(outcome.summary.gaps(), 1);
        assert_eq!(outcome.events.len(), 2);
    }

    #[test]
    fn test_empty_alignment_still_succeeds() {
        let parser = StubParser {
            words: vec![timing("alpha", 0, 1.0)],
        };
        let use_case = LinkTranscriptUseCase::new(Box::new(parser), FuzzyAligner::new(3));
        let outcome = use_case.execute(&transcript(&["beta", "gamma"]), "").unwrap();
        assert!(outcome.summary.is_empty());
        assert!(outcome.events.is_empty());
        assert!(outcome.block_spans.is_empty());
        assert_eq!(outcome.summary.gaps(), 2);
    }

    #[test]
    fn test_region_spans_follow_caption_cues() {
        let use_case = webvtt_use_case();
        let captions = "WEBVTT\n\n\
            00:01.000 --> 00:02.000\nfirst line\nsecond\n\n\
            00:02.000 --> 00:03.000\nthird";
        let outcome = use_case
            .execute(&transcript(&["first", "line", "second", "third"]), captions)
            .unwrap();

        assert_eq!(outcome.block_spans[&0], RegionSpan { first: 0, last: 2 });
        assert_eq!(outcome.block_spans[&1], RegionSpan { first: 3, last: 3 });
        assert_eq!(outcome.phrase_spans.len(), 3);
        assert_eq!(outcome.phrase_spans[&1], RegionSpan { first: 2, last: 2 });
    }
}
