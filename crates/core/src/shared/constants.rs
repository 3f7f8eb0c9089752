pub const DEFAULT_ALIGNMENT_FUZZINESS: usize = 0;
pub const DEFAULT_TIME_OFFSET: f64 = 0.0;

/// Media elements report playback progress roughly four times per second.
pub const DEFAULT_TICK_INTERVAL: f64 = 0.25;

pub const OPTIONS_DIR_NAME: &str = "Transcript Tracer";
pub const OPTIONS_FILE_NAME: &str = "options.json";
