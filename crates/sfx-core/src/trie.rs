//! Label-reversed suffix trie
//!
//! Each path from the root spells a domain suffix read from the top-level
//! label inward: `com` → `example` → `mail` is the node for
//! `mail.example.com`. Every node carries the number of inserted sequences
//! that passed through it, so along any path counts never increase.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

// =============================================================================
// Node
// =============================================================================

/// One suffix level.
#[derive(Debug, Default)]
pub struct TrieNode {
    count: u64,
    children: HashMap<Box<[u8]>, TrieNode>,
}

impl TrieNode {
    /// Number of inserted sequences that begin with this node's path.
    #[inline]
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Child for `label`, if any.
    #[inline]
    pub fn child(&self, label: &[u8]) -> Option<&TrieNode> {
        self.children.get(label)
    }

    /// Children with their labels, in no particular order.
    pub fn children(&self) -> impl Iterator<Item = (&[u8], &TrieNode)> {
        self.children.iter().map(|(label, node)| (&**label, node))
    }

    /// True if this node has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

// =============================================================================
// Trie
// =============================================================================

/// Suffix trie with per-node occurrence counts.
///
/// The root stands for the empty suffix. It is never counted and never
/// reported.
#[derive(Debug, Default)]
pub struct SuffixTrie {
    root: TrieNode,
    node_count: usize,
}

impl SuffixTrie {
    /// Create an empty trie.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one label sequence given top-level label first.
    ///
    /// Missing nodes are created and every node on the path is incremented
    /// by one. An empty sequence leaves the trie untouched. Returns the
    /// number of labels walked.
    pub fn insert<'a, I>(&mut self, labels: I) -> usize
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut node = &mut self.root;
        let mut depth = 0usize;

        for label in labels {
            node = match node.children.entry(Box::from(label)) {
                Entry::Occupied(e) => e.into_mut(),
                Entry::Vacant(e) => {
                    self.node_count += 1;
                    e.insert(TrieNode::default())
                }
            };
            node.count += 1;
            depth += 1;
        }

        depth
    }

    /// Node reached by following `path` (top-level label first).
    ///
    /// An empty path yields the root.
    pub fn get<'a, I>(&self, path: I) -> Option<&TrieNode>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut node = &self.root;
        for label in path {
            node = node.child(label)?;
        }
        Some(node)
    }

    /// Count stored for `path` (top-level label first), or 0 if absent.
    ///
    /// The empty path returns 0: the root is not counted.
    pub fn count_of<'a, I>(&self, path: I) -> u64
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let mut iter = path.into_iter().peekable();
        if iter.peek().is_none() {
            return 0;
        }
        self.get(iter).map_or(0, TrieNode::count)
    }

    /// The root node.
    #[inline]
    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Number of nodes, excluding the root.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// True if nothing has been inserted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_leaf()
    }
}
