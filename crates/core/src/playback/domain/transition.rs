use serde::{Deserialize, Serialize};

/// Which transcript region playback keeps scrolled into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AutoScroll {
    #[default]
    Off,
    Block,
    Phrase,
    Word,
}

impl AutoScroll {
    pub const ALL: &[AutoScroll] = &[
        AutoScroll::Off,
        AutoScroll::Block,
        AutoScroll::Phrase,
        AutoScroll::Word,
    ];
}

impl std::fmt::Display for AutoScroll {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AutoScroll::Off => write!(f, "off"),
            AutoScroll::Block => write!(f, "block"),
            AutoScroll::Phrase => write!(f, "phrase"),
            AutoScroll::Word => write!(f, "word"),
        }
    }
}

impl std::str::FromStr for AutoScroll {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AutoScroll::ALL
            .iter()
            .copied()
            .find(|mode| mode.to_string() == s)
            .ok_or_else(|| format!("Auto-scroll must be one of: off, block, phrase, word, got '{s}'"))
    }
}

/// Region the renderer should scroll into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum ScrollTarget {
    Block(usize),
    Phrase(usize),
    Word(usize),
}

/// Highlight change emitted by the synchronizer when the current event changes.
///
/// `current_word_indexes` is always the full set for the new event; renderers diff
/// if they need to. Transcript words before the first current word count as
/// previously spoken. An empty word set clears all highlighting.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transition {
    pub seconds: Option<f64>,
    pub block_index: Option<usize>,
    pub phrase_index: Option<usize>,
    pub block_changed: bool,
    pub phrase_changed: bool,
    pub current_word_indexes: Vec<usize>,
    pub scroll: Option<ScrollTarget>,
}

impl Transition {
    pub fn first_current_word(&self) -> Option<usize> {
        self.current_word_indexes.first().copied()
    }

    pub fn is_clear(&self) -> bool {
        self.current_word_indexes.is_empty()
    }
}
