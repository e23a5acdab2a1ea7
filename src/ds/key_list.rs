use alloc::vec::Vec;
use core::hash::Hash;
use core::iter::FusedIterator;

import_hash_collections!(HashMap);

#[derive(Clone, Debug)]
struct Node<K> {
    key: K,
    prev: Option<usize>,
    next: Option<usize>,
}

/// An ordered list of distinct keys with O(1) lookup, unlink and
/// move-to-front.
///
/// Nodes live in a slot vector and link to each other by index. Freed slots
/// are recycled by later pushes. `head` is the most recently pushed or moved
/// key, `tail` the oldest one.
#[derive(Clone)]
pub(crate) struct KeyList<K> {
    index: HashMap<K, usize>,
    nodes: Vec<Option<Node<K>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<K: Hash + Eq + Clone> KeyList<K> {
    pub(crate) fn new() -> Self {
        Self {
            index: HashMap::new(),
            nodes: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    pub(crate) fn with_capacity(cap: usize) -> Self {
        Self {
            index: HashMap::with_capacity(cap),
            nodes: Vec::with_capacity(cap),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.index.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    #[inline]
    pub(crate) fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Links `key` at the front. Returns `false` and leaves the list alone
    /// if the key is already present.
    pub(crate) fn push_front(&mut self, key: K) -> bool {
        if self.index.contains_key(&key) {
            return false;
        }

        let node = Node {
            key: key.clone(),
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.nodes[idx] = Some(node);
                idx
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        };
        self.index.insert(key, idx);
        self.attach_front(idx);
        true
    }

    /// Unlinks `key`. Returns `false` if it was not present.
    pub(crate) fn remove(&mut self, key: &K) -> bool {
        let idx = match self.index.remove(key) {
            Some(idx) => idx,
            None => return false,
        };
        self.detach(idx);
        if let Some(slot) = self.nodes.get_mut(idx) {
            *slot = None;
        }
        self.free.push(idx);
        true
    }

    /// Moves `key` to the front. Returns `false` if it was not present.
    pub(crate) fn move_to_front(&mut self, key: &K) -> bool {
        let idx = match self.index.get(key) {
            Some(idx) => *idx,
            None => return false,
        };
        if self.head != Some(idx) {
            self.detach(idx);
            self.attach_front(idx);
        }
        true
    }

    #[inline]
    pub(crate) fn front(&self) -> Option<&K> {
        self.head.and_then(|idx| self.node(idx)).map(|n| &n.key)
    }

    #[inline]
    pub(crate) fn back(&self) -> Option<&K> {
        self.tail.and_then(|idx| self.node(idx)).map(|n| &n.key)
    }

    pub(crate) fn clear(&mut self) {
        self.index.clear();
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
    }

    /// Iterates from front to back.
    pub(crate) fn iter(&self) -> Keys<'_, K> {
        Keys {
            nodes: &self.nodes,
            cursor: self.head,
            remaining: self.len(),
        }
    }

    #[inline]
    fn node(&self, idx: usize) -> Option<&Node<K>> {
        self.nodes.get(idx).and_then(Option::as_ref)
    }

    #[inline]
    fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K>> {
        self.nodes.get_mut(idx).and_then(Option::as_mut)
    }

    fn detach(&mut self, idx: usize) {
        let (prev, next) = match self.node(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.node_mut(p) {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.node_mut(n) {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(h) => {
                if let Some(node) = self.node_mut(h) {
                    node.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

/// An iterator over the keys tracked by a list-ordered policy, from the
/// front of the list to the back.
pub struct Keys<'a, K> {
    nodes: &'a [Option<Node<K>>],
    cursor: Option<usize>,
    remaining: usize,
}

impl<'a, K> Iterator for Keys<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.nodes.get(self.cursor?)?.as_ref()?;
        self.cursor = node.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&node.key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> ExactSizeIterator for Keys<'a, K> {}

impl<'a, K> FusedIterator for Keys<'a, K> {}
