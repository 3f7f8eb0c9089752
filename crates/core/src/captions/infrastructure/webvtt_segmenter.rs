//! Splits a WebVTT document into blank-line delimited segments and classifies them.

pub const WEBVTT_HEADER: &str = "WEBVTT";
pub const TIMING_SEPARATOR: &str = "-->";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Header,
    Style,
    Note,
    Region,
    Cue,
}

/// A run of non-blank lines. `line_number` is 1-based and points at the first line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub line_number: usize,
    pub lines: Vec<&'a str>,
}

impl<'a> Segment<'a> {
    pub fn kind(&self) -> SegmentKind {
        let first = self.lines.first().copied().unwrap_or_default();
        if first.starts_with(WEBVTT_HEADER) {
            SegmentKind::Header
        } else if is_block_keyword(first, "STYLE") {
            SegmentKind::Style
        } else if is_block_keyword(first, "NOTE") {
            SegmentKind::Note
        } else if is_block_keyword(first, "REGION") {
            SegmentKind::Region
        } else {
            SegmentKind::Cue
        }
    }

    /// Position of the first line containing the timing separator.
    pub fn timing_line(&self) -> Option<usize> {
        self.lines.iter().position(|l| l.contains(TIMING_SEPARATOR))
    }
}

fn is_block_keyword(line: &str, keyword: &str) -> bool {
    match line.strip_prefix(keyword) {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Split `text` on blank lines. Handles `\n` and `\r\n` line endings and a leading BOM.
pub fn split_segments(text: &str) -> Vec<Segment<'_>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut segments = Vec::new();
    let mut current: Option<Segment<'_>> = None;

    for (i, line) in text.lines().enumerate() {
        if line.is_empty() {
            if let Some(segment) = current.take() {
                segments.push(segment);
            }
            continue;
        }
        current
            .get_or_insert_with(|| Segment {
                line_number: i + 1,
                lines: Vec::new(),
            })
            .lines
            .push(line);
    }
    if let Some(segment) = current {
        segments.push(segment);
    }
    segments
}
