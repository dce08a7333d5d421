mod detector;
mod suffix_trie;

pub use detector::{SuffixTldDetector, DEFAULT_SUFFIXES};
pub use suffix_trie::{SuffixMatch, SuffixTrie};
