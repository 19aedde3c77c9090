//! Ordered per-step state buffer.
//!
//! [`Series`] only ever holds computed entries: it grows by one push per
//! step, and [`valid_through`](Series::valid_through) names the last step
//! that has been filled. There are no placeholder slots for a consumer to
//! observe mid-run.

use std::ops::Index;

use crate::id::StepIndex;

/// Growable, append-only sequence of per-step values.
#[derive(Clone, Debug, PartialEq)]
pub struct Series<T> {
    items: Vec<T>,
}

impl<T> Series<T> {
    /// Create an empty series.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Create an empty series with room for `capacity` steps.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
        }
    }

    /// Append the value for the next step and return that step's index.
    pub fn push(&mut self, value: T) -> StepIndex {
        self.items.push(value);
        StepIndex::from(self.items.len() - 1)
    }

    /// Number of filled steps.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no step has been filled yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The last filled step, or `None` when empty.
    pub fn valid_through(&self) -> Option<StepIndex> {
        self.items.len().checked_sub(1).map(StepIndex::from)
    }

    /// Value at `step`, if it has been filled.
    pub fn get(&self, step: StepIndex) -> Option<&T> {
        self.items.get(step.as_usize())
    }

    /// The most recently filled value.
    pub fn last(&self) -> Option<&T> {
        self.items.last()
    }

    /// Iterate filled values in step order.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Filled values as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Consume the series, returning the filled values.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Default for Series<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<StepIndex> for Series<T> {
    type Output = T;

    fn index(&self, step: StepIndex) -> &T {
        &self.items[step.as_usize()]
    }
}

impl<'a, T> IntoIterator for &'a Series<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T> FromIterator<T> for Series<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
