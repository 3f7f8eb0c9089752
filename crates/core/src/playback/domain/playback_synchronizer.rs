use super::timed_event::TimedEvent;
use super::transition::{AutoScroll, ScrollTarget, Transition};
use super::transition_listener::{SubscriptionId, TransitionListener};

/// Previous, current and next event pointers, as indexes into the event sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SynchronizerCursor {
    pub previous: Option<usize>,
    pub current: Option<usize>,
    pub next: Option<usize>,
}

impl SynchronizerCursor {
    fn at(index: usize, len: usize) -> Self {
        Self {
            previous: index.checked_sub(1),
            current: Some(index),
            next: (index + 1 < len).then_some(index + 1),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Nothing current: no tick yet, or playback is before the first event.
    BeforeRange,
    /// An event with a successor is current.
    InEvent,
    /// The last event is current. It has no upper bound, so later times stay here.
    AfterRange,
}

/// Playback-driven highlight state machine.
///
/// Each `tick` subtracts the configured time offset from the playback clock and
/// finds the event whose interval contains it. The cursor is cached so that the
/// common case, a tick inside the current event's interval, costs two comparisons
/// and emits nothing. Seeks are ordinary ticks.
pub struct PlaybackSynchronizer {
    time_offset: f64,
    auto_scroll: AutoScroll,
    cursor: SynchronizerCursor,
    listeners: Vec<(SubscriptionId, Box<dyn TransitionListener>)>,
    next_subscription: u64,
}

impl PlaybackSynchronizer {
    pub fn new(time_offset: f64, auto_scroll: AutoScroll) -> Self {
        Self {
            time_offset,
            auto_scroll,
            cursor: SynchronizerCursor::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn cursor(&self) -> SynchronizerCursor {
        self.cursor
    }

    pub fn state(&self) -> PlaybackState {
        match (self.cursor.current, self.cursor.next) {
            (None, _) => PlaybackState::BeforeRange,
            (Some(_), Some(_)) => PlaybackState::InEvent,
            (Some(_), None) => PlaybackState::AfterRange,
        }
    }

    pub fn current_event<'a>(&self, events: &'a [TimedEvent]) -> Option<&'a TimedEvent> {
        self.cursor.current.and_then(|i| events.get(i))
    }

    pub fn set_time_offset(&mut self, time_offset: f64) {
        self.time_offset = time_offset;
    }

    pub fn set_auto_scroll(&mut self, auto_scroll: AutoScroll) {
        self.auto_scroll = auto_scroll;
    }

    /// Forget all event pointers. Listeners stay subscribed.
    pub fn reset(&mut self) {
        self.cursor = SynchronizerCursor::default();
    }

    pub fn subscribe(&mut self, listener: Box<dyn TransitionListener>) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Advance to `current_time` (seconds of playback) over `events`.
    ///
    /// `events` must be strictly increasing in time. Returns the transition, if the
    /// current event changed, after notifying subscribers.
    pub fn tick(&mut self, events: &[TimedEvent], current_time: f64) -> Option<Transition> {
        if !current_time.is_finite() || events.is_empty() {
            return None;
        }
        let len = events.len();
        if self
            .cursor
            .current
            .is_some_and(|i| i >= len || self.cursor != SynchronizerCursor::at(i, len))
        {
            log::debug!("Cursor does not fit the event sequence, resetting");
            self.reset();
        }

        let adjusted = current_time - self.time_offset;
        let last = events.len() - 1;

        if adjusted < events[0].seconds {
            return self.leave_range(events);
        }
        if let (Some(current), Some(next)) = (self.cursor.current, self.cursor.next) {
            if events[current].seconds <= adjusted && adjusted < events[next].seconds {
                return None;
            }
        }
        if self.cursor.current == Some(last) && adjusted >= events[last].seconds {
            return None;
        }

        // Events are strictly increasing, so exactly one interval holds `adjusted`.
        let index = events.partition_point(|e| e.seconds <= adjusted) - 1;
        self.cursor = SynchronizerCursor::at(index, events.len());

        let transition = self.build_transition(events, index);
        log::debug!(
            "Transition at {adjusted:.3}s to event {index} (words {:?})",
            transition.current_word_indexes
        );
        self.notify(&transition);
        Some(transition)
    }

    fn leave_range(&mut self, events: &[TimedEvent]) -> Option<Transition> {
        let current = self.cursor.current.map(|i| &events[i])?;
        let transition = Transition {
            seconds: None,
            block_index: None,
            phrase_index: None,
            block_changed: current.block_index.is_some(),
            phrase_changed: current.phrase_index.is_some(),
            current_word_indexes: Vec::new(),
            scroll: None,
        };
        self.reset();
        log::debug!("Playback moved before the first event, clearing highlights");
        self.notify(&transition);
        Some(transition)
    }

    fn build_transition(&self, events: &[TimedEvent], index: usize) -> Transition {
        let current = &events[index];
        let previous = self.cursor.previous.map(|i| &events[i]);
        let block_changed = previous.and_then(|p| p.block_index) != current.block_index;
        let phrase_changed = previous.and_then(|p| p.phrase_index) != current.phrase_index;

        let scroll = match self.auto_scroll {
            AutoScroll::Off => None,
            AutoScroll::Block if block_changed => current.block_index.map(ScrollTarget::Block),
            AutoScroll::Phrase if phrase_changed => current.phrase_index.map(ScrollTarget::Phrase),
            AutoScroll::Word => current.first_word_index().map(ScrollTarget::Word),
            AutoScroll::Block | AutoScroll::Phrase => None,
        };

        Transition {
            seconds: Some(current.seconds),
            block_index: current.block_index,
            phrase_index: current.phrase_index,
            block_changed,
            phrase_changed,
            current_word_indexes: current.current_word_indexes.clone(),
            scroll,
        }
    }

    fn notify(&mut self, transition: &Transition) {
        for (_, listener) in self.listeners.iter_mut() {
            listener.on_transition(transition);
        }
    }
}

impl Default for PlaybackSynchronizer {
    fn default() -> Self {
        Self::new(0.0, AutoScroll::Off)
    }
}
