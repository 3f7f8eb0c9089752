pub mod fuzzy_aligner;
pub mod region_resolver;
pub mod transcript;
pub mod word_normalizer;
