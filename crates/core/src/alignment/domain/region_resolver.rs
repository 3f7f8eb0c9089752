use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use super::transcript::WordLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionKind {
    Block,
    Phrase,
}

/// Span of transcript positions covered by one block or phrase.
///
/// `first` is the first labeled word carrying the index and establishes the start
/// of the region; `last` is the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionSpan {
    pub first: usize,
    pub last: usize,
}

impl RegionSpan {
    pub fn positions(&self) -> RangeInclusive<usize> {
        self.first..=self.last
    }

    pub fn contains(&self, position: usize) -> bool {
        self.positions().contains(&position)
    }
}

/// Smallest containing span of transcript positions for every block or phrase index.
///
/// `labels` is indexed by transcript position; unlabeled words do not open or
/// extend a region, though they may fall inside one.
pub fn resolve_regions(
    labels: &[Option<WordLabel>],
    kind: RegionKind,
) -> BTreeMap<usize, RegionSpan> {
    let mut spans: BTreeMap<usize, RegionSpan> = BTreeMap::new();
    for (position, label) in labels.iter().enumerate() {
        let Some(label) = label else { continue };
        let index = match kind {
            RegionKind::Block => label.block_index,
            RegionKind::Phrase => label.phrase_index,
        };
        let Some(index) = index else { continue };
        spans
            .entry(index)
            .and_modify(|span| span.last = position)
            .or_insert(RegionSpan {
                first: position,
                last: position,
            });
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(word: usize, phrase: Option<usize>, block: Option<usize>) -> Option<WordLabel> {
        Some(WordLabel {
            block_index: block,
            phrase_index: phrase,
            word_index: word,
        })
    }

    #[test]
    fn test_resolve_block_spans() {
        let labels = vec![
            label(0, Some(0), Some(0)),
            None,
            label(1, Some(0), Some(0)),
            label(2, Some(1), Some(1)),
            label(3, Some(2), Some(1)),
        ];
        let blocks = resolve_regions(&labels, RegionKind::Block);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[&0], RegionSpan { first: 0, last: 2 });
        assert_eq!(blocks[&1], RegionSpan { first: 3, last: 4 });
        assert!(blocks[&0].contains(1));

        let phrases = resolve_regions(&labels, RegionKind::Phrase);
        assert_eq!(phrases.len(), 3);
        assert_eq!(phrases[&2], RegionSpan { first: 4, last: 4 });
    }

    #[test]
    fn test_resolve_ignores_missing_indexes() {
        let labels = vec![None, label(0, None, None)];
        assert!(resolve_regions(&labels, RegionKind::Block).is_empty());
        assert!(resolve_regions(&labels, RegionKind::Phrase).is_empty());
    }

    #[test]
    fn test_span_positions() {
        let span = RegionSpan { first: 2, last: 4 };
        assert_eq!(span.positions().collect::<Vec<_>>(), vec![2, 3, 4]);
        assert!(!span.contains(5));
    }
}
