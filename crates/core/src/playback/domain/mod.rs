pub mod event_compressor;
pub mod playback_synchronizer;
pub mod timed_event;
pub mod transition;
pub mod transition_listener;
