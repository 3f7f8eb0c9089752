use serde::Serialize;

/// An instant at which the set of current words changes.
///
/// `current_word_indexes` holds more than one index when several caption words
/// share a start time. `phrase_index` and `block_index` are those of the first
/// word becoming current.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimedEvent {
    pub seconds: f64,
    pub current_word_indexes: Vec<usize>,
    pub phrase_index: Option<usize>,
    pub block_index: Option<usize>,
}

impl TimedEvent {
    pub fn first_word_index(&self) -> Option<usize> {
        self.current_word_indexes.first().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_word_index() {
        let event = TimedEvent {
            seconds: 1.0,
            current_word_indexes: vec![4, 5],
            phrase_index: Some(1),
            block_index: None,
        };
        assert_eq!(event.first_word_index(), Some(4));
    }

    #[test]
    fn test_serializes_camel_case() {
        let event = TimedEvent {
            seconds: 1.5,
            current_word_indexes: vec![0],
            phrase_index: Some(0),
            block_index: Some(2),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(
            json,
            r#"{"seconds":1.5,"currentWordIndexes":[0],"phraseIndex":0,"blockIndex":2}"#
        );
    }
}
