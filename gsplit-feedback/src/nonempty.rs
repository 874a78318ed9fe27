//! A vector that always holds at least one element.

/// Ordered, non-empty collection.
#[derive(Debug, Clone, PartialEq)]
pub struct NonEmpty<T> {
    first: T,
    rest: Vec<T>,
}

impl<T> NonEmpty<T> {
    /// Build from a vector, returning `None` when it is empty.
    #[must_use]
    pub fn from_vec(items: Vec<T>) -> Option<Self> {
        let mut iter = items.into_iter();
        let first = iter.next()?;
        Some(Self {
            first,
            rest: iter.collect(),
        })
    }

    /// Number of elements; never zero.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rest.len().saturating_add(1)
    }

    /// First element.
    #[must_use]
    pub const fn first(&self) -> &T {
        &self.first
    }

    /// Last element.
    #[must_use]
    pub fn last(&self) -> &T {
        self.rest.last().unwrap_or(&self.first)
    }

    /// Element at `index`, or the last element when `index` is out of range.
    #[must_use]
    pub fn get_or_last(&self, index: usize) -> &T {
        index.checked_sub(1).map_or(&self.first, |offset| {
            self.rest.get(offset).unwrap_or_else(|| self.last())
        })
    }

    /// Iterate in order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &T> {
        std::iter::once(&self.first).chain(self.rest.iter())
    }
}
