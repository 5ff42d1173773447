use std::collections::VecDeque;

/// Fixed-capacity window over the most recent items of a sequence.
///
/// Pushing into a full window evicts the oldest item.
#[derive(Clone, Debug)]
pub struct ContextWindow<T, const N: usize> {
    items: VecDeque<T>,
}

impl<T, const N: usize> ContextWindow<T, N> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(N),
        }
    }

    /// Push a new item, returning the evicted one if the window was full.
    pub fn push(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == N {
            self.items.pop_front()
        } else {
            None
        };

        self.items.push_back(item);

        evicted
    }

    /// The `n`-th item counting backwards from the latest one.
    pub fn nth_back(&self, n: usize) -> Option<&T> {
        self.items.len().checked_sub(n + 1).map(|i| &self.items[i])
    }

    pub fn latest(&self) -> Option<&T> {
        self.nth_back(0)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T, const N: usize> Default for ContextWindow<T, N> {
    fn default() -> Self {
        Self::new()
    }
}
