pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Doubly linked list over an arena of slots, ordered from most recently used
/// (head) to least recently used (tail). Links are slot indices, and freed
/// slots are reused by later pushes.
pub(crate) struct RecencyList<K, V> {
    slots: Vec<Option<Node<K, V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    len: usize,
}

impl<K, V> RecencyList<K, V> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    pub(crate) fn front(&self) -> Option<&Node<K, V>> {
        self.node(self.head?)
    }

    pub(crate) fn back(&self) -> Option<&Node<K, V>> {
        self.node(self.tail?)
    }

    pub(crate) fn node(&self, idx: usize) -> Option<&Node<K, V>> {
        self.slots.get(idx)?.as_ref()
    }

    pub(crate) fn node_mut(&mut self, idx: usize) -> Option<&mut Node<K, V>> {
        self.slots.get_mut(idx)?.as_mut()
    }

    /// Stores a new entry and links it in as the head. Returns its slot.
    pub(crate) fn push_front(&mut self, key: K, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };
        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        };
        self.len += 1;
        self.link_front(idx);
        idx
    }

    pub(crate) fn promote_to_head(&mut self, idx: usize) {
        if self.head == Some(idx) || self.node(idx).is_none() {
            return;
        }
        self.detach(idx);
        self.link_front(idx);
    }

    /// Unlinks the least recently used entry and hands it back so the caller
    /// can drop its map entry.
    pub(crate) fn evict_tail(&mut self) -> Option<(K, V)> {
        let idx = self.tail?;
        if self.head == Some(idx) {
            self.head = None;
            self.tail = None;
        } else {
            let prev = self.node_mut(idx).and_then(|node| node.prev.take());
            if let Some(prev_idx) = prev {
                if let Some(prev_node) = self.node_mut(prev_idx) {
                    prev_node.next = None;
                }
            }
            self.tail = prev;
        }
        self.release(idx)
    }

    pub(crate) fn remove(&mut self, idx: usize) -> Option<(K, V)> {
        self.node(idx)?;
        self.detach(idx);
        self.release(idx)
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    pub(crate) fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            list: self,
            next: self.head,
            remaining: self.len,
        }
    }

    fn release(&mut self, idx: usize) -> Option<(K, V)> {
        let node = self.slots.get_mut(idx)?.take()?;
        self.free.push(idx);
        self.len -= 1;
        Some((node.key, node.value))
    }

    fn detach(&mut self, idx: usize) {
        let Some(node) = self.node_mut(idx) else {
            return;
        };
        let prev = node.prev.take();
        let next = node.next.take();

        match prev {
            Some(prev_idx) => {
                if let Some(prev_node) = self.node_mut(prev_idx) {
                    prev_node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(next_idx) => {
                if let Some(next_node) = self.node_mut(next_idx) {
                    next_node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        if let Some(node) = self.node_mut(idx) {
            node.prev = None;
            node.next = old_head;
        }
        match old_head {
            Some(head_idx) => {
                if let Some(head) = self.node_mut(head_idx) {
                    head.prev = Some(idx);
                }
            }
            None => self.tail = Some(idx),
        }
        self.head = Some(idx);
    }
}

/// Entries from most to least recently used.
pub struct Iter<'a, K, V> {
    list: &'a RecencyList<K, V>,
    next: Option<usize>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.list.node(self.next?)?;
        self.next = node.next;
        self.remaining -= 1;
        Some((&node.key, &node.value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}
