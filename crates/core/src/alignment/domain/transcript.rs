/// One word unit of the transcript, supplied by the document collaborator.
///
/// `block` and `phrase` are the indexes of the externally identified containers
/// holding this word, when the transcript carries such containers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TranscriptWord {
    pub text: String,
    pub block: Option<usize>,
    pub phrase: Option<usize>,
}

impl TranscriptWord {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            block: None,
            phrase: None,
        }
    }

    pub fn with_containers(
        text: impl Into<String>,
        block: Option<usize>,
        phrase: Option<usize>,
    ) -> Self {
        Self {
            text: text.into(),
            block,
            phrase,
        }
    }
}

/// Metadata tagged onto a matched transcript word for later lookup by the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WordLabel {
    pub block_index: Option<usize>,
    pub phrase_index: Option<usize>,
    pub word_index: usize,
}

/// Split plain text into transcript words, grouping paragraphs into blocks and
/// lines into phrases.
///
/// Paragraphs are separated by blank lines. Used when the transcript has no markup
/// of its own.
pub fn words_from_text(text: &str, with_containers: bool) -> Vec<TranscriptWord> {
    let mut words = Vec::new();
    let mut block = 0;
    let mut phrase = 0;
    let mut in_paragraph = false;

    for line in text.lines() {
        if line.trim().is_empty() {
            if in_paragraph {
                block += 1;
                in_paragraph = false;
            }
            continue;
        }
        in_paragraph = true;
        for token in line.split_whitespace() {
            words.push(if with_containers {
                TranscriptWord::with_containers(token, Some(block), Some(phrase))
            } else {
                TranscriptWord::new(token)
            });
        }
        phrase += 1;
    }
    words
}
