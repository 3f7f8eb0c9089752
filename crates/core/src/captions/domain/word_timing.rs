/// One timed word from a caption track.
///
/// `word_index` is unique and strictly increasing in parse order.
/// `phrase_index` advances once per payload line and `block_index` once per cue.
#[derive(Clone, Debug, PartialEq)]
pub struct WordTiming {
    pub text: String,
    pub start_seconds: f64,
    pub end_seconds: f64,
    pub word_index: usize,
    pub phrase_index: usize,
    pub block_index: usize,
}

impl WordTiming {
    pub fn duration(&self) -> f64 {
        self.end_seconds - self.start_seconds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_word_timing_fields() {
        let w = WordTiming {
            text: "hello".to_string(),
            start_seconds: 1.0,
            end_seconds: 1.5,
            word_index: 3,
            phrase_index: 1,
            block_index: 0,
        };
        assert_eq!(w.text, "hello");
        assert_eq!(w.word_index, 3);
        assert_eq!(w.phrase_index, 1);
        assert_eq!(w.block_index, 0);
    }

    #[test]
    fn test_word_timing_duration() {
        let w = WordTiming {
            text: "test".to_string(),
            start_seconds: 2.0,
            end_seconds: 2.8,
            word_index: 0,
            phrase_index: 0,
            block_index: 0,
        };
        assert_relative_eq!(w.duration(), 0.8, epsilon = 0.001);
    }
}
