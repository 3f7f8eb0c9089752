mod webvtt_segmenter;
pub mod webvtt_parser;
pub mod webvtt_timestamp;
