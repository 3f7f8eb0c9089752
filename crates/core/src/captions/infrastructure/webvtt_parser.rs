use crate::captions::domain::caption_parser::{CaptionFormatError, CaptionParser, CueError};
use crate::captions::domain::word_timing::WordTiming;

use super::webvtt_segmenter::{
    split_segments, Segment, SegmentKind, TIMING_SEPARATOR, WEBVTT_HEADER,
};
use super::webvtt_timestamp::{parse_timestamp, split_inline_timestamp};

/// WebVTT caption parser producing one [`WordTiming`] per payload word.
///
/// Words inherit the cue start time until an inline timestamp (`<00:01.500>word`)
/// moves it forward. Every word ends at its cue's end time. Malformed cues are
/// logged and skipped; only a missing header aborts the parse.
#[derive(Debug, Default, Clone, Copy)]
pub struct WebVttParser;

#[derive(Default)]
struct Counters {
    word: usize,
    phrase: usize,
    block: usize,
}

struct CueTiming {
    start: f64,
    end: f64,
}

impl WebVttParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_cue(
        segment: &Segment<'_>,
        counters: &mut Counters,
        out: &mut Vec<WordTiming>,
    ) -> Result<(), CueError> {
        let timing_at = segment.timing_line().ok_or(CueError::MissingTiming)?;
        let timing = parse_timing_line(segment.lines[timing_at])?;

        let mut word_start = timing.start;
        for line in &segment.lines[timing_at + 1..] {
            for candidate in line.split_whitespace() {
                let (inline_start, text) = split_inline_timestamp(candidate);
                if let Some(start) = inline_start {
                    word_start = start;
                }
                if text.is_empty() {
                    continue;
                }
                out.push(WordTiming {
                    text: text.to_string(),
                    start_seconds: word_start,
                    end_seconds: timing.end.max(word_start),
                    word_index: counters.word,
                    phrase_index: counters.phrase,
                    block_index: counters.block,
                });
                counters.word += 1;
            }
            counters.phrase += 1;
        }
        counters.block += 1;
        Ok(())
    }
}

fn parse_timing_line(line: &str) -> Result<CueTiming, CueError> {
    let (start, rest) = line
        .split_once(TIMING_SEPARATOR)
        .ok_or(CueError::MissingTiming)?;
    // Cue settings may follow the end timestamp.
    let end = rest.split_whitespace().next().unwrap_or_default();

    let start = parse_timestamp(start)?;
    let end = parse_timestamp(end)?;
    if end < start {
        return Err(CueError::NegativeDuration { start, end });
    }
    Ok(CueTiming { start, end })
}

impl CaptionParser for WebVttParser {
    fn parse(&self, caption_text: &str) -> Result<Vec<WordTiming>, CaptionFormatError> {
        let segments = split_segments(caption_text);
        match segments.first() {
            Some(first) if first.kind() == SegmentKind::Header => {}
            _ => {
                return Err(CaptionFormatError::MissingHeader {
                    expected: WEBVTT_HEADER,
                })
            }
        }

        let mut counters = Counters::default();
        let mut words = Vec::new();
        for segment in &segments {
            if segment.kind() != SegmentKind::Cue {
                continue;
            }
            if let Err(e) = Self::parse_cue(segment, &mut counters, &mut words) {
                log::warn!("Skipping caption cue at line {}: {e}", segment.line_number);
            }
        }

        log::debug!(
            "Parsed {} caption words in {} cues",
            words.len(),
            counters.block
        );
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn parse(text: &str) -> Vec<WordTiming> {
        WebVttParser::new().parse(text).unwrap()
    }

    fn texts(words: &[WordTiming]) -> Vec<&str> {
        words.iter().map(|w| w.text.as_str()).collect()
    }

    const SAMPLE: &str = "WEBVTT\n\
        \n\
        NOTE generated by hand\n\
        \n\
        STYLE\n\
        ::cue { color: yellow }\n\
        \n\
        intro\n\
        00:00:01.000 --> 00:00:03.000 align:start\n\
        Hello there\n\
        general Kenobi\n\
        \n\
        00:03.000 --> 00:05.500\n\
        You are <00:00:04.000>a bold one\n";

    #[test]
    fn test_missing_header_is_fatal() {
        let result = WebVttParser::new().parse("00:01.000 --> 00:02.000\nhello");
        assert_eq!(
            result,
            Err(CaptionFormatError::MissingHeader { expected: "WEBVTT" })
        );
    }

    #[test]
    fn test_empty_document_is_fatal() {
        assert!(WebVttParser::new().parse("").is_err());
    }

    #[test]
    fn test_header_only_yields_no_words() {
        assert!(parse("WEBVTT\n").is_empty());
    }

    #[test]
    fn test_parses_words_with_indexes() {
        let words = parse(SAMPLE);
        assert_eq!(
            texts(&words),
            vec!["Hello", "there", "general", "Kenobi", "You", "are", "a", "bold", "one"]
        );

        let word_indexes: Vec<usize> = words.iter().map(|w| w.word_index).collect();
        assert_eq!(word_indexes, (0..9).collect::<Vec<_>>());

        let phrases: Vec<usize> = words.iter().map(|w| w.phrase_index).collect();
        assert_eq!(phrases, vec![0, 0, 1, 1, 2, 2, 2, 2, 2]);

        let blocks: Vec<usize> = words.iter().map(|w| w.block_index).collect();
        assert_eq!(blocks, vec![0, 0, 0, 0, 1, 1, 1, 1, 1]);
    }

    #[test]
    fn test_cue_times_and_inline_override() {
        let words = parse(SAMPLE);
        assert_relative_eq!(words[0].start_seconds, 1.0);
        assert_relative_eq!(words[0].end_seconds, 3.0);
        assert_relative_eq!(words[4].start_seconds, 3.0);
        assert_relative_eq!(words[5].start_seconds, 3.0);
        // Inline timestamp carries forward to later words in the cue.
        assert_relative_eq!(words[6].start_seconds, 4.0);
        assert_relative_eq!(words[8].start_seconds, 4.0);
        assert_relative_eq!(words[8].end_seconds, 5.5);
    }

    #[test]
    fn test_parse_is_idempotent() {
        assert_eq!(parse(SAMPLE), parse(SAMPLE));
    }

    #[test]
    fn test_indexes_are_monotonic() {
        let words = parse(SAMPLE);
        for pair in words.windows(2) {
            assert!(pair[1].word_index > pair[0].word_index);
            assert!(pair[1].phrase_index >= pair[0].phrase_index);
            assert!(pair[1].block_index >= pair[0].block_index);
        }
    }

    #[test]
    fn test_malformed_cue_is_skipped() {
        let text = "WEBVTT\n\n\
            00:01.000 --> 00:02.000\nfirst\n\n\
            xx:01.000 --> 00:03.000\nbroken\n\n\
            no timing here\n\n\
            00:04.000 --> 00:05.000\nlast\n";
        let words = parse(text);
        assert_eq!(texts(&words), vec!["first", "last"]);
        assert_eq!(words[1].word_index, 1);
        assert_eq!(words[1].block_index, 1);
        assert_eq!(words[1].phrase_index, 1);
    }

    #[test]
    fn test_cue_ending_before_start_is_skipped() {
        let words = parse("WEBVTT\n\n00:05.000 --> 00:04.000\nbackwards\n");
        assert!(words.is_empty());
    }

    #[test]
    fn test_bare_inline_timestamp_is_dropped_but_moves_start() {
        let words = parse("WEBVTT\n\n00:01.000 --> 00:09.000\nfirst <00:05.000> second\n");
        assert_eq!(texts(&words), vec!["first", "second"]);
        assert_eq!(words[1].word_index, 1);
        assert_relative_eq!(words[1].start_seconds, 5.0);
    }

    #[test]
    fn test_extra_whitespace_does_not_consume_indexes() {
        let words = parse("WEBVTT\n\n00:01.000 --> 00:02.000\n  Hello \t  world  \n");
        assert_eq!(texts(&words), vec!["Hello", "world"]);
        assert_eq!(words[1].word_index, 1);
    }

    #[test]
    fn test_crlf_document() {
        let words = parse("WEBVTT\r\n\r\n00:00:01.000 --> 00:00:02.000\r\nHello world\r\n");
        assert_eq!(texts(&words), vec!["Hello", "world"]);
        assert_relative_eq!(words[0].start_seconds, 1.0);
    }
}
