// (c) Copyright 2025 Mikołaj Kuranowski
// SPDX-License-Identifier: MIT

use std::collections::BTreeMap;

/// NameTrie implements a [prefix tree](https://en.wikipedia.org/wiki/Trie) over
/// [cleaned names](crate::clean_name), remembering the original spelling of every
/// inserted name. Lookups are therefore case- and punctuation-insensitive, while
/// [NameTrie::find_matches] still returns names exactly as they were inserted.
///
/// Every position in the tree stores a name. Positions which only exist because
/// they are a prefix of some longer name store the cleaned prefix itself and are
/// not considered complete; these are never returned from lookups.
#[derive(Debug, Clone, Default)]
pub struct NameTrie {
    root: TrieNode,
    len: usize,
}

#[derive(Debug, Clone, Default)]
struct TrieNode {
    children: BTreeMap<char, TrieNode>,
    name: String,
    complete: bool,
}

impl TrieNode {
    fn with_name(name: String) -> Self {
        Self {
            children: BTreeMap::default(),
            name,
            complete: false,
        }
    }
}

impl NameTrie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of complete names stored in the trie.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts `full_name` under the `clean` key.
    ///
    /// If `clean` is a prefix of a previously inserted key, the existing position
    /// is promoted to a complete name, leaving longer names intact.
    /// Re-inserting the same key replaces the stored full name.
    /// Empty keys are ignored.
    pub fn insert(&mut self, clean: &str, full_name: &str) {
        let mut node = &mut self.root;
        let mut chars = clean.char_indices().peekable();

        while let Some((idx, c)) = chars.next() {
            if chars.peek().is_none() {
                let terminal = node.children.entry(c).or_default();
                terminal.name = full_name.to_string();
                if !terminal.complete {
                    terminal.complete = true;
                    self.len += 1;
                }
                return;
            }

            let prefix_end = idx + c.len_utf8();
            node = node
                .children
                .entry(c)
                .or_insert_with(|| TrieNode::with_name(clean[..prefix_end].to_string()));
        }
    }

    /// Returns all complete names whose key starts with the `clean` prefix,
    /// including a name whose key is exactly `clean`.
    ///
    /// Names are returned in depth-first order of the tree, which is not
    /// the same as alphabetical order of the full names. An empty prefix matches
    /// every stored name; a prefix absent from the trie matches nothing.
    pub fn find_matches(&self, clean: &str) -> Vec<String> {
        let mut matches = Vec::default();
        if let Some(start) = self.find_node(clean) {
            collect_complete(start, &mut matches);
        }
        matches
    }

    fn find_node(&self, clean: &str) -> Option<&TrieNode> {
        let mut node = &self.root;
        for c in clean.chars() {
            node = node.children.get(&c)?;
        }
        Some(node)
    }
}

fn collect_complete(node: &TrieNode, into: &mut Vec<String>) {
    if node.complete {
        into.push(node.name.clone());
    }

    for child in node.children.values() {
        collect_complete(child, into);
    }
}
