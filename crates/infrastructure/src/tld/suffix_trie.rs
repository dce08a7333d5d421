use compact_str::CompactString;
use dnsdig_domain::Tld;
use rustc_hash::FxBuildHasher;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Default)]
struct TrieNode {
    children: HashMap<CompactString, TrieNode, FxBuildHasher>,
    /// Set when the path from the root to this node spells a known suffix.
    tld: Option<Arc<Tld>>,
}

/// Longest suffix found for a name, with the labels left of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuffixMatch<'a> {
    pub tld: Arc<Tld>,
    /// Labels preceding the suffix, leftmost first.
    pub remainder: SmallVec<[&'a str; 8]>,
}

impl SuffixMatch<'_> {
    /// The registrable label: the one immediately left of the suffix.
    pub fn registrable(&self) -> Option<&str> {
        self.remainder.last().copied()
    }
}

/// Suffix trie over public suffixes.
///
/// Suffixes are stored as reversed label paths:
/// `co.uk` → traverse ["uk", "co"], mark the "co" node.
///
/// Lookup for `ns1.google.co.uk`:
///   Reversed labels: ["uk", "co", "google", "ns1"]
///   Walk: root → "uk" (marked) → "co" (marked) → "google" (absent, stop)
///   Deepest mark wins: `co.uk`, remainder ["ns1", "google"].
#[derive(Default)]
pub struct SuffixTrie {
    root: TrieNode,
    len: usize,
}

impl SuffixTrie {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Adds a suffix. Re-inserting a name replaces its TLD.
    pub fn insert(&mut self, tld: Arc<Tld>) {
        let mut node = &mut self.root;
        for label in tld.name.split('.').rev() {
            node = node
                .children
                .entry(CompactString::new(label.to_ascii_lowercase()))
                .or_default();
        }
        if node.tld.replace(tld).is_none() {
            self.len += 1;
        }
    }

    /// Finds the longest known suffix of `name`.
    ///
    /// A suffix only matches when at least one label precedes it. A name
    /// that is itself a known suffix (`co.uk`) has no match at all.
    /// `name` must already be lowercase.
    pub fn longest_match<'a>(&self, name: &'a str) -> Option<SuffixMatch<'a>> {
        let labels: SmallVec<[&str; 8]> = name.split('.').collect();
        let mut node = &self.root;
        let mut best: Option<(usize, &Arc<Tld>)> = None;

        for (depth, label) in labels.iter().rev().enumerate() {
            match node.children.get(*label) {
                Some(child) => {
                    if let Some(tld) = &child.tld {
                        if depth + 1 == labels.len() {
                            return None;
                        }
                        best = Some((depth + 1, tld));
                    }
                    node = child;
                }
                None => break,
            }
        }

        best.map(|(suffix_labels, tld)| SuffixMatch {
            tld: tld.clone(),
            remainder: labels[..labels.len() - suffix_labels].iter().copied().collect(),
        })
    }
}
