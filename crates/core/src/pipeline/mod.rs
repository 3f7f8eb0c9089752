pub mod alignment_registry;
pub mod link_transcript_use_case;
pub mod tracer_session;
