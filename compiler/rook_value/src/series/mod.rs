//! Cursor-carrying series storage.
//!
//! Strings, binaries, blocks and parens are all a shared `Vec<T>` plus a
//! cursor. Navigation (`next`, `back`, `skip`, `head`, `tail`) returns a new
//! view of the same storage; mutation (`append`, `insert`, `remove`, `poke`)
//! edits the storage in place, so every view observes it. `copy` is the only
//! operation that detaches: it takes the elements from the cursor to the end
//! into fresh storage whose cursor is at its head.
//!
//! The cursor is kept within `[0, length]` when a view is created. Another
//! view can later shrink the storage underneath it; every accessor clamps.

use std::fmt;

use crate::shared::Shared;

/// A view into shared series storage.
pub struct Series<T> {
    data: Shared<Vec<T>>,
    index: usize,
}

impl<T> Clone for Series<T> {
    fn clone(&self) -> Self {
        Series {
            data: self.data.clone(),
            index: self.index,
        }
    }
}

impl<T> Series<T> {
    /// Number of views sharing this storage.
    pub fn holders(&self) -> usize {
        self.data.holders()
    }

    /// Address of the shared storage.
    pub fn storage_ptr(&self) -> *const () {
        self.data.as_ptr()
    }

    /// Run `f` over the whole storage, ignoring the cursor.
    pub fn with_storage<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        f(&self.data.borrow())
    }
}

impl<T: Clone> Series<T> {
    /// New storage with the cursor at its head.
    pub fn new(items: Vec<T>) -> Self {
        Series {
            data: Shared::new(items),
            index: 0,
        }
    }

    /// New view of the same storage at `index`, clamped to the tail.
    #[must_use]
    pub fn at(&self, index: usize) -> Self {
        let index = index.min(self.data.borrow().len());
        Series {
            data: self.data.clone(),
            index,
        }
    }

    /// Cursor position (0-based), clamped to the current length.
    pub fn index(&self) -> usize {
        self.index.min(self.data.borrow().len())
    }

    /// Elements from the cursor to the tail.
    pub fn len(&self) -> usize {
        self.data.borrow().len() - self.index()
    }

    /// Whether the cursor is at the tail.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Length of the whole storage, ignoring the cursor.
    pub fn total_len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether two views share storage.
    pub fn same_storage(&self, other: &Series<T>) -> bool {
        self.data.ptr_eq(&other.data)
    }

    /// Element at the cursor.
    pub fn first(&self) -> Option<T> {
        self.data.borrow().get(self.index()).cloned()
    }

    /// Element at 1-based `position` relative to the cursor.
    pub fn pick(&self, position: usize) -> Option<T> {
        let offset = position.checked_sub(1)?;
        self.data.borrow().get(self.index() + offset).cloned()
    }

    /// Replace the element at 1-based `position` relative to the cursor.
    /// Returns `false` when the position is outside the series.
    pub fn poke(&self, position: usize, value: T) -> bool {
        let Some(offset) = position.checked_sub(1) else {
            return false;
        };
        let at = self.index() + offset;
        let mut data = self.data.borrow_mut();
        match data.get_mut(at) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// View advanced by one, stopping at the tail.
    #[must_use]
    pub fn next(&self) -> Self {
        self.at(self.index() + 1)
    }

    /// View moved back by one, stopping at the head.
    #[must_use]
    pub fn back(&self) -> Self {
        self.at(self.index().saturating_sub(1))
    }

    /// View moved by `offset`, clamped to `[0, length]`.
    #[must_use]
    pub fn skip(&self, offset: i64) -> Self {
        let current = i64::try_from(self.index()).unwrap_or(i64::MAX);
        let target = current.saturating_add(offset).max(0);
        self.at(usize::try_from(target).unwrap_or(usize::MAX))
    }

    /// View at the head.
    #[must_use]
    pub fn head(&self) -> Self {
        self.at(0)
    }

    /// View at the tail.
    #[must_use]
    pub fn tail(&self) -> Self {
        self.at(usize::MAX)
    }

    /// Fresh storage holding the elements from the cursor to the end (or at
    /// most `part` of them), cursor at head.
    #[must_use]
    pub fn copy(&self, part: Option<usize>) -> Self {
        let data = self.data.borrow();
        let start = self.index.min(data.len());
        let end = part.map_or(data.len(), |n| start.saturating_add(n).min(data.len()));
        Series::new(data[start..end].to_vec())
    }

    /// Add `items` at the tail. Returns this view unchanged.
    #[must_use]
    pub fn append(&self, items: impl IntoIterator<Item = T>) -> Self {
        self.data.borrow_mut().extend(items);
        self.clone()
    }

    /// Insert `items` at the cursor. Returns a view just past the inserted
    /// elements.
    #[must_use]
    pub fn insert(&self, items: impl IntoIterator<Item = T>) -> Self {
        let at = self.index();
        let inserted = {
            let mut data = self.data.borrow_mut();
            let tail = data.split_off(at);
            let before = data.len();
            data.extend(items);
            let inserted = data.len() - before;
            data.extend(tail);
            inserted
        };
        self.at(at + inserted)
    }

    /// Remove up to `count` elements at the cursor. Returns this view.
    #[must_use]
    pub fn remove(&self, count: usize) -> Self {
        let at = self.index();
        {
            let mut data = self.data.borrow_mut();
            let end = at.saturating_add(count).min(data.len());
            data.drain(at..end);
        }
        self.at(at)
    }

    /// Clone of the elements from the cursor to the tail.
    pub fn to_vec(&self) -> Vec<T> {
        let data = self.data.borrow();
        data[self.index.min(data.len())..].to_vec()
    }

    /// Run `f` over the elements from the cursor to the tail without cloning.
    pub fn with_items<R>(&self, f: impl FnOnce(&[T]) -> R) -> R {
        let data = self.data.borrow();
        f(&data[self.index.min(data.len())..])
    }
}

impl<T: Clone + PartialEq> PartialEq for Series<T> {
    /// Views are equal when their remaining elements are.
    fn eq(&self, other: &Self) -> bool {
        if self.same_storage(other) && self.index() == other.index() {
            return true;
        }
        self.with_items(|a| other.with_items(|b| a == b))
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Series<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.with_items(|items| {
            f.debug_struct("Series")
                .field("index", &self.index())
                .field("items", &items)
                .finish()
        })
    }
}

#[cfg(test)]
mod tests;
