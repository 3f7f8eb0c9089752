use crate::captions::domain::word_timing::WordTiming;

use super::transcript::{TranscriptWord, WordLabel};
use super::word_normalizer::normalize;

/// Where block or phrase indexes for matched words come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingSource {
    /// Cue and payload-line boundaries of the caption track.
    #[default]
    Captions,
    /// Containers identified in the transcript itself.
    Transcript,
}

/// Binds one transcript position to one caption word.
#[derive(Clone, Debug, PartialEq)]
pub struct AlignmentEntry {
    pub transcript_position: usize,
    pub caption_position: usize,
    pub word_index: usize,
    pub start_seconds: f64,
    pub block_index: Option<usize>,
    pub phrase_index: Option<usize>,
}

impl AlignmentEntry {
    pub fn label(&self) -> WordLabel {
        WordLabel {
            block_index: self.block_index,
            phrase_index: self.phrase_index,
            word_index: self.word_index,
        }
    }
}

/// Greedy, monotonic, one-pass alignment of transcript words to caption words.
///
/// A single cursor walks the caption words. Each transcript word may match the
/// caption word under the cursor or up to `fuzziness` positions past it. A match
/// moves the cursor just past the matched caption word; a miss leaves it alone and
/// the transcript word stays unlabeled.
#[derive(Debug, Clone, Copy)]
pub struct FuzzyAligner {
    fuzziness: usize,
    blocks: GroupingSource,
    phrases: GroupingSource,
}

impl FuzzyAligner {
    pub fn new(fuzziness: usize) -> Self {
        Self {
            fuzziness,
            blocks: GroupingSource::Captions,
            phrases: GroupingSource::Captions,
        }
    }

    pub fn with_grouping(mut self, blocks: GroupingSource, phrases: GroupingSource) -> Self {
        self.blocks = blocks;
        self.phrases = phrases;
        self
    }

    pub fn fuzziness(&self) -> usize {
        self.fuzziness
    }

    pub fn align(
        &self,
        transcript: &[TranscriptWord],
        captions: &[WordTiming],
    ) -> Vec<AlignmentEntry> {
        let normalized_captions: Vec<String> =
            captions.iter().map(|w| normalize(&w.text)).collect();
        let mut entries = Vec::new();
        let mut cursor = 0;

        for (position, word) in transcript.iter().enumerate() {
            if cursor >= captions.len() {
                log::debug!("Caption words exhausted at transcript position {position}");
                break;
            }
            let target = normalize(&word.text);
            let window_end = cursor.saturating_add(self.fuzziness).min(captions.len() - 1);

            let found = (cursor..=window_end).find(|&i| normalized_captions[i] == target);
            let Some(found) = found else {
                log::debug!(
                    "No caption match for '{}' at transcript position {position}",
                    word.text
                );
                continue;
            };

            let timing = &captions[found];
            entries.push(AlignmentEntry {
                transcript_position: position,
                caption_position: found,
                word_index: timing.word_index,
                start_seconds: timing.start_seconds,
                block_index: match self.blocks {
                    GroupingSource::Captions => Some(timing.block_index),
                    GroupingSource::Transcript => word.block,
                },
                phrase_index: match self.phrases {
                    GroupingSource::Captions => Some(timing.phrase_index),
                    GroupingSource::Transcript => word.phrase,
                },
            });
            cursor = found + 1;
        }

        entries
    }
}

impl Default for FuzzyAligner {
    fn default() -> Self {
        Self::new(0)
    }
}
