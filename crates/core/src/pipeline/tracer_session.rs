use serde::Serialize;

use crate::alignment::domain::fuzzy_aligner::FuzzyAligner;
use crate::alignment::domain::transcript::TranscriptWord;
use crate::captions::domain::caption_parser::{CaptionFormatError, CaptionParser};
use crate::captions::infrastructure::webvtt_parser::WebVttParser;
use crate::playback::domain::playback_synchronizer::PlaybackSynchronizer;
use crate::playback::domain::transition::Transition;
use crate::playback::domain::transition_listener::{SubscriptionId, TransitionListener};
use crate::shared::options::TracerOptions;

use super::alignment_registry::{AlignmentRegistry, LinkedAlignment, MediaId, TranscriptId};
use super::link_transcript_use_case::{LinkSummary, LinkTranscriptUseCase};

/// A transition resolved against the transcript it applies to.
///
/// `current_positions` are the transcript positions of the current words.
/// Every transcript position below `spoken_before` is previously spoken.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightDirective {
    pub transcript: usize,
    pub transition: Transition,
    pub current_positions: Vec<usize>,
    pub spoken_before: Option<usize>,
}

/// Controller tying caption linking, the alignment registry and playback together.
///
/// Only the active media source drives the synchronizer. Activating another source,
/// relinking the active one or unlinking it resets the cursor, so pointers into an
/// old event sequence never carry over.
pub struct TracerSession {
    options: TracerOptions,
    linker: LinkTranscriptUseCase,
    registry: AlignmentRegistry,
    synchronizer: PlaybackSynchronizer,
    active: Option<MediaId>,
    synced_generation: Option<u64>,
}

impl TracerSession {
    pub fn new(options: TracerOptions) -> Self {
        Self::with_parser(options, Box::new(WebVttParser::new()))
    }

    pub fn with_parser(options: TracerOptions, parser: Box<dyn CaptionParser>) -> Self {
        let linker = LinkTranscriptUseCase::new(parser, aligner_for(&options));
        let synchronizer = PlaybackSynchronizer::new(options.time_offset, options.auto_scroll);
        Self {
            options,
            linker,
            registry: AlignmentRegistry::new(),
            synchronizer,
            active: None,
            synced_generation: None,
        }
    }

    pub fn options(&self) -> &TracerOptions {
        &self.options
    }

    /// Apply new options. Alignment settings take effect on the next link.
    pub fn set_options(&mut self, options: TracerOptions) {
        self.linker.set_aligner(aligner_for(&options));
        self.synchronizer.set_time_offset(options.time_offset);
        self.synchronizer.set_auto_scroll(options.auto_scroll);
        self.options = options;
    }

    /// Parse `caption_text`, align it against `words` and link the transcript to `media`.
    ///
    /// Any earlier link of this transcript is removed first, so a header error
    /// leaves the transcript unlinked.
    pub fn link(
        &mut self,
        transcript: TranscriptId,
        media: MediaId,
        words: &[TranscriptWord],
        caption_text: &str,
    ) -> Result<LinkSummary, CaptionFormatError> {
        self.unlink_transcript(transcript);

        let outcome = self.linker.execute(words, caption_text).map_err(|e| {
            log::warn!("Could not link transcript {} to {media}: {e}", transcript.0);
            e
        })?;
        let summary = outcome.summary;
        if self.active.as_ref() == Some(&media) {
            self.synchronizer.reset();
        }
        self.registry.link(transcript, media.clone(), outcome);
        log::info!(
            "Linked transcript {} to {media}: {}/{} words aligned, {} events",
            transcript.0,
            summary.matched_words,
            summary.transcript_words,
            summary.events
        );
        Ok(summary)
    }

    /// Returns `false` if the transcript was not linked.
    pub fn unlink_transcript(&mut self, transcript: TranscriptId) -> bool {
        let Some(old) = self.registry.unlink_transcript(transcript) else {
            return false;
        };
        if self.active.as_ref() == Some(old.media()) {
            self.synchronizer.reset();
            self.synced_generation = None;
        }
        log::info!("Unlinked transcript {} from {}", transcript.0, old.media());
        true
    }

    /// Make `media` the source whose ticks drive highlighting.
    ///
    /// Switching sources detaches the previous one and resets the cursor. Returns
    /// whether `media` has a linked transcript.
    pub fn activate(&mut self, media: MediaId) -> bool {
        if self.active.as_ref() != Some(&media) {
            if let Some(previous) = self.active.take() {
                log::info!("Detaching {previous}");
            }
            self.synchronizer.reset();
            self.synced_generation = None;
            log::info!("Activating {media}");
            self.active = Some(media);
        }
        self.active
            .as_ref()
            .is_some_and(|m| self.registry.get(m).is_some())
    }

    pub fn deactivate(&mut self) {
        self.active = None;
        self.synchronizer.reset();
        self.synced_generation = None;
    }

    pub fn active(&self) -> Option<&MediaId> {
        self.active.as_ref()
    }

    pub fn linked(&self, media: &MediaId) -> Option<&LinkedAlignment> {
        self.registry.get(media)
    }

    pub fn linked_transcript(&self, transcript: TranscriptId) -> Option<&LinkedAlignment> {
        self.registry.by_transcript(transcript)
    }

    pub fn synchronizer(&self) -> &PlaybackSynchronizer {
        &self.synchronizer
    }

    /// Feed a playback clock sample from `media`. Samples from inactive or unlinked
    /// sources are ignored.
    pub fn tick(&mut self, media: &MediaId, current_time: f64) -> Option<HighlightDirective> {
        if self.active.as_ref() != Some(media) {
            return None;
        }
        let linked = self.registry.get(media)?;

        if self.synced_generation != Some(linked.generation()) {
            self.synchronizer.reset();
            self.synced_generation = Some(linked.generation());
        }

        let transition = self.synchronizer.tick(linked.events(), current_time)?;
        let current_positions = transition
            .current_word_indexes
            .iter()
            .filter_map(|&w| linked.position_of_word(w))
            .collect();
        let spoken_before = transition
            .first_current_word()
            .and_then(|w| linked.position_of_word(w));

        Some(HighlightDirective {
            transcript: linked.transcript().0,
            transition,
            current_positions,
            spoken_before,
        })
    }

    /// Playback time to seek to when the transcript word at `position` is clicked.
    ///
    /// `None` unless clicking is enabled, the transcript is linked and the word was
    /// aligned.
    pub fn seek_time_for_word(&self, transcript: TranscriptId, position: usize) -> Option<f64> {
        if !self.options.clickable {
            return None;
        }
        let linked = self.registry.by_transcript(transcript)?;
        let label = linked.label(position)?;
        linked.word_timing(label.word_index).map(|w| w.start_seconds)
    }

    pub fn subscribe(&mut self, listener: Box<dyn TransitionListener>) -> SubscriptionId {
        self.synchronizer.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.synchronizer.unsubscribe(id)
    }

    /// Drop every link and detach the active source.
    pub fn reset(&mut self) {
        self.registry.clear();
        self.deactivate();
    }
}

fn aligner_for(options: &TracerOptions) -> FuzzyAligner {
    FuzzyAligner::new(options.alignment_fuzziness)
        .with_grouping(options.block_grouping(), options.phrase_grouping())
}
