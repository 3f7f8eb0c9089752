use std::collections::{BTreeMap, HashMap};

use crate::alignment::domain::region_resolver::RegionSpan;
use crate::alignment::domain::transcript::WordLabel;
use crate::captions::domain::word_timing::WordTiming;
use crate::playback::domain::timed_event::TimedEvent;

use super::link_transcript_use_case::{AlignmentOutcome, LinkSummary};

/// Identity of a media source, typically its URL.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MediaId(pub String);

impl From<&str> for MediaId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl std::fmt::Display for MediaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a transcript within the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranscriptId(pub usize);

/// The alignment owned by one (transcript, media source) pair.
///
/// Every link gets a fresh `generation`, so holders of derived state (such as a
/// synchronizer cursor) can tell when the link they were built on was replaced.
#[derive(Debug, Clone)]
pub struct LinkedAlignment {
    transcript: TranscriptId,
    media: MediaId,
    generation: u64,
    word_timings: Vec<WordTiming>,
    events: Vec<TimedEvent>,
    labels: Vec<Option<WordLabel>>,
    positions_by_word: HashMap<usize, usize>,
    block_spans: BTreeMap<usize, RegionSpan>,
    phrase_spans: BTreeMap<usize, RegionSpan>,
    summary: LinkSummary,
}

impl LinkedAlignment {
    fn new(
        transcript: TranscriptId,
        media: MediaId,
        generation: u64,
        outcome: AlignmentOutcome,
    ) -> Self {
        let positions_by_word = outcome
            .labels
            .iter()
            .enumerate()
            .filter_map(|(position, label)| label.map(|l| (l.word_index, position)))
            .collect();
        Self {
            transcript,
            media,
            generation,
            word_timings: outcome.word_timings,
            events: outcome.events,
            labels: outcome.labels,
            positions_by_word,
            block_spans: outcome.block_spans,
            phrase_spans: outcome.phrase_spans,
            summary: outcome.summary,
        }
    }

    pub fn transcript(&self) -> TranscriptId {
        self.transcript
    }

    pub fn media(&self) -> &MediaId {
        &self.media
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn word_timings(&self) -> &[WordTiming] {
        &self.word_timings
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn summary(&self) -> LinkSummary {
        self.summary
    }

    /// Label of the transcript word at `position`, if it was matched.
    pub fn label(&self, position: usize) -> Option<WordLabel> {
        self.labels.get(position).copied().flatten()
    }

    pub fn labels(&self) -> &[Option<WordLabel>] {
        &self.labels
    }

    /// Transcript position tagged with caption word `word_index`.
    pub fn position_of_word(&self, word_index: usize) -> Option<usize> {
        self.positions_by_word.get(&word_index).copied()
    }

    pub fn word_timing(&self, word_index: usize) -> Option<&WordTiming> {
        self.word_timings
            .binary_search_by_key(&word_index, |w| w.word_index)
            .ok()
            .map(|i| &self.word_timings[i])
    }

    pub fn block_span(&self, block_index: usize) -> Option<RegionSpan> {
        self.block_spans.get(&block_index).copied()
    }

    pub fn phrase_span(&self, phrase_index: usize) -> Option<RegionSpan> {
        self.phrase_spans.get(&phrase_index).copied()
    }
}

/// Owns every active link. At most one link exists per media source and per transcript.
#[derive(Debug, Default)]
pub struct AlignmentRegistry {
    links: HashMap<MediaId, LinkedAlignment>,
    next_generation: u64,
}

impl AlignmentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a new link, superseding whatever was linked to the same media source or
    /// the same transcript.
    pub fn link(
        &mut self,
        transcript: TranscriptId,
        media: MediaId,
        outcome: AlignmentOutcome,
    ) -> &LinkedAlignment {
        self.unlink_transcript(transcript);
        if let Some(old) = self.links.remove(&media) {
            log::info!("Replacing link of transcript {} to {media}", old.transcript.0);
        }

        let generation = self.next_generation;
        self.next_generation += 1;
        let linked = LinkedAlignment::new(transcript, media.clone(), generation, outcome);
        self.links.entry(media).or_insert(linked)
    }

    pub fn unlink_media(&mut self, media: &MediaId) -> Option<LinkedAlignment> {
        self.links.remove(media)
    }

    pub fn unlink_transcript(&mut self, transcript: TranscriptId) -> Option<LinkedAlignment> {
        let media = self.media_for_transcript(transcript)?.clone();
        self.links.remove(&media)
    }

    pub fn get(&self, media: &MediaId) -> Option<&LinkedAlignment> {
        self.links.get(media)
    }

    pub fn media_for_transcript(&self, transcript: TranscriptId) -> Option<&MediaId> {
        self.links
            .values()
            .find(|l| l.transcript == transcript)
            .map(|l| &l.media)
    }

    pub fn by_transcript(&self, transcript: TranscriptId) -> Option<&LinkedAlignment> {
        self.links.values().find(|l| l.transcript == transcript)
    }

    pub fn clear(&mut self) {
        self.links.clear();
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}
