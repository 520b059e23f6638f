/// Prefix trie over code points used for dictionary lookup during DAG
/// construction.
use ahash::AHashMap;

/// A prefix tree node. Terminal nodes carry a handle into the dictionary's
/// entry arena rather than owning the word text; a node may be both
/// internal and terminal (a proper prefix of a word can itself be a word).
#[derive(Debug, Default)]
pub struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
    entry: Option<u32>,
}

impl TrieNode {
    /// Create a new empty trie root.
    pub fn new() -> Self {
        Self {
            children: AHashMap::new(),
            entry: None,
        }
    }

    /// Insert a word, attaching `handle` to its terminal node. Re-inserting
    /// an existing word replaces the handle.
    pub fn insert(&mut self, word: &str, handle: u32) {
        let mut node = self;
        for ch in word.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::new()));
        }
        node.entry = Some(handle);
    }

    /// Check whether the trie contains exactly the given word, not just a
    /// prefix of one.
    pub fn contains(&self, word: &str) -> bool {
        let mut node = self;
        for ch in word.chars() {
            match node.children.get(&ch) {
                Some(child) => node = child,
                None => return false,
            }
        }
        node.entry.is_some()
    }

    /// Walk the trie from `start` in `input` and return every
    /// `(end_exclusive, handle)` pair such that `input[start..end_exclusive]`
    /// is a stored word.
    ///
    /// This is the lookup the DAG builder drives: one root-to-leaf walk per
    /// start position, O(L) in the remaining sentence length. Results come
    /// out in increasing match length.
    pub fn walk_matches(&self, input: &[char], start: usize) -> Vec<(usize, u32)> {
        let mut res = Vec::new();
        let mut node = self;
        let mut idx = start;
        while idx < input.len() {
            match node.children.get(&input[idx]) {
                Some(child) => {
                    node = child;
                    idx += 1;
                    if let Some(handle) = node.entry {
                        res.push((idx, handle));
                    }
                }
                None => break,
            }
        }
        res
    }
}
