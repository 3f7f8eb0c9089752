use crate::alignment::domain::fuzzy_aligner::AlignmentEntry;

use super::timed_event::TimedEvent;

pub struct EventCompressor;

impl EventCompressor {
    /// Collapse aligned words into timed events, one per distinct start time.
    ///
    /// Entries sharing a start time with the event just emitted join that event.
    /// The result is then stably sorted by time and equal-time neighbours merged,
    /// so out-of-order inline timestamps still produce a strictly increasing sequence.
    pub fn compress(entries: &[AlignmentEntry]) -> Vec<TimedEvent> {
        let mut events: Vec<TimedEvent> = Vec::new();
        for entry in entries {
            match events.last_mut() {
                Some(last) if last.seconds == entry.start_seconds => {
                    last.current_word_indexes.push(entry.word_index);
                }
                _ => events.push(TimedEvent {
                    seconds: entry.start_seconds,
                    current_word_indexes: vec![entry.word_index],
                    phrase_index: entry.phrase_index,
                    block_index: entry.block_index,
                }),
            }
        }

        events.sort_by(|a, b| a.seconds.total_cmp(&b.seconds));
        Self::merge_equal_times(events)
    }

    fn merge_equal_times(events: Vec<TimedEvent>) -> Vec<TimedEvent> {
        let mut merged: Vec<TimedEvent> = Vec::with_capacity(events.len());
        for event in events {
            match merged.last_mut() {
                Some(last) if last.seconds == event.seconds => {
                    last.current_word_indexes.extend(event.current_word_indexes);
                }
                _ => merged.push(event),
            }
        }
        merged
    }
}
