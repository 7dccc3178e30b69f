//! Binary Min-Heap
//!
//! An array-backed binary heap ordered by a caller-supplied `less` relation.
//! The leveled sorter keeps one heap per level bucket and drains it to get
//! the courses of that level in name order.
//!
//! The relation must be a strict weak ordering (irreflexive and transitive).
//! An inconsistent relation does not panic, it silently breaks heap order.

use crate::error::HeapError;

/// A binary min-heap over `T`.
///
/// `F` decides whether the first argument sorts strictly before the second.
/// [`MinHeap::new`] uses the natural ordering of `T`.
pub struct MinHeap<T, F = fn(&T, &T) -> bool> {
    data: Vec<T>,
    less: F,
}

impl<T: Ord> MinHeap<T> {
    /// Create an empty heap ordered by `T`'s `Ord` implementation.
    pub fn new() -> Self {
        Self::with_comparator(T::lt)
    }
}

impl<T: Ord> Default for MinHeap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, F> MinHeap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    /// Create an empty heap ordered by `less`.
    pub fn with_comparator(less: F) -> Self {
        Self {
            data: Vec::new(),
            less,
        }
    }

    /// Number of elements in the heap.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Push `item` and restore heap order by bubbling it up.
    pub fn insert(&mut self, item: T) {
        self.data.push(item);
        self.sift_up(self.data.len() - 1);
    }

    /// Remove and return the smallest element.
    ///
    /// Fails with [`HeapError::Empty`] without touching the heap when there
    /// is nothing to pop.
    pub fn extract_min(&mut self) -> Result<T, HeapError> {
        if self.data.is_empty() {
            return Err(HeapError::Empty);
        }

        // Moves the last element into the root slot.
        let item = self.data.swap_remove(0);
        self.sift_down(0);
        Ok(item)
    }

    fn sift_up(&mut self, mut idx: usize) {
        while idx > 0 {
            let parent = (idx - 1) / 2;
            if !(self.less)(&self.data[idx], &self.data[parent]) {
                break;
            }
            self.data.swap(idx, parent);
            idx = parent;
        }
    }

    fn sift_down(&mut self, mut idx: usize) {
        let len = self.data.len();
        loop {
            let left = 2 * idx + 1;
            if left >= len {
                break;
            }

            let right = left + 1;
            let mut smallest = left;
            if right < len && (self.less)(&self.data[right], &self.data[left]) {
                smallest = right;
            }

            if !(self.less)(&self.data[smallest], &self.data[idx]) {
                break;
            }
            self.data.swap(idx, smallest);
            idx = smallest;
        }
    }
}

impl<T, F> Extend<T> for MinHeap<T, F>
where
    F: Fn(&T, &T) -> bool,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}
