pub mod alignment;
pub mod captions;
pub mod pipeline;
pub mod playback;
pub mod shared;
