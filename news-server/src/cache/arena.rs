//! Slot arena with intrusive doubly-linked lists
//!
//! Nodes live in a `Vec` and refer to each other by index, so moving an
//! entry between positions (or between frequency buckets) is O(1) and never
//! reallocates. Freed slots are recycled through a free list.

/// Node stored in the arena
pub(crate) struct Node<K, V> {
    pub key: K,
    pub value: V,
    /// Access count (only meaningful for LFU)
    pub frequency: u64,
    prev: Option<usize>,
    next: Option<usize>,
}

pub(crate) struct Arena<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free_list: Vec<usize>,
}

impl<K, V> Arena<K, V> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_list: Vec::new(),
        }
    }

    /// Store a detached node and return its slot index
    pub fn insert(&mut self, key: K, value: V, frequency: u64) -> usize {
        let node = Node {
            key,
            value,
            frequency,
            prev: None,
            next: None,
        };

        if let Some(idx) = self.free_list.pop() {
            self.slots[idx] = Some(node);
            idx
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    /// Free a slot. The node must already be unlinked from its list.
    pub fn take(&mut self, idx: usize) -> Option<Node<K, V>> {
        let node = self.slots.get_mut(idx)?.take()?;
        self.free_list.push(idx);
        Some(node)
    }

    pub fn get(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx)?.as_ref()
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(idx)?.as_mut()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_list.clear();
    }
}

/// Ordering list threaded through arena nodes.
///
/// Head is the most recently used end, tail the least recently used.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct List {
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl List {
    pub fn tail(&self) -> Option<usize> {
        self.tail
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn push_front<K, V>(&mut self, arena: &mut Arena<K, V>, idx: usize) {
        let old_head = self.head;
        match arena.get_mut(idx) {
            Some(node) => {
                node.prev = None;
                node.next = old_head;
            }
            None => return,
        }

        if let Some(old_head_node) = old_head.and_then(|h| arena.get_mut(h)) {
            old_head_node.prev = Some(idx);
        }

        self.head = Some(idx);
        if self.tail.is_none() {
            self.tail = Some(idx);
        }
        self.len += 1;
    }

    pub fn unlink<K, V>(&mut self, arena: &mut Arena<K, V>, idx: usize) {
        let (prev_idx, next_idx) = match arena.get(idx) {
            Some(node) => (node.prev, node.next),
            None => return,
        };

        match prev_idx.and_then(|p| arena.get_mut(p)) {
            Some(prev_node) => prev_node.next = next_idx,
            None => self.head = next_idx,
        }

        match next_idx.and_then(|n| arena.get_mut(n)) {
            Some(next_node) => next_node.prev = prev_idx,
            None => self.tail = prev_idx,
        }

        if let Some(node) = arena.get_mut(idx) {
            node.prev = None;
            node.next = None;
        }
        self.len = self.len.saturating_sub(1);
    }

    /// Move an already linked node to the head
    pub fn move_to_front<K, V>(&mut self, arena: &mut Arena<K, V>, idx: usize) {
        if self.head == Some(idx) {
            return;
        }
        self.unlink(arena, idx);
        self.push_front(arena, idx);
    }

    /// Slot indices from tail (next victim) to head
    pub fn iter_from_tail<'a, K, V>(
        &self,
        arena: &'a Arena<K, V>,
    ) -> impl Iterator<Item = usize> + 'a {
        let mut cursor = self.tail;
        std::iter::from_fn(move || {
            let idx = cursor?;
            cursor = arena.get(idx).and_then(|node| node.prev);
            Some(idx)
        })
    }
}
