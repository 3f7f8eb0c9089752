pub mod caption_parser;
pub mod word_timing;
