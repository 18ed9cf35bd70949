//! Chainable filters over a controller's objects.

use std::sync::Arc;

/// A lazy, chainable filter pipeline over a snapshot of a controller's
/// objects.
///
/// Querysets are cheap to clone and purely local: construction and
/// iteration never touch the network. They operate on the population at the
/// time the queryset was created.
#[derive(Clone)]
pub struct QuerySet<T> {
    items: Arc<Vec<T>>,
    filters: Vec<Arc<dyn Fn(&T) -> bool + Send + Sync>>,
}

impl<T: Clone> QuerySet<T> {
    pub(crate) fn new(items: Vec<T>) -> Self {
        Self {
            items: Arc::new(items),
            filters: Vec::new(),
        }
    }

    /// Return a new queryset with the predicate appended.
    pub fn filter(&self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        let mut filters = self.filters.clone();
        filters.push(Arc::new(predicate));
        Self {
            items: self.items.clone(),
            filters,
        }
    }

    /// Iterate over the objects that pass every filter.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items
            .iter()
            .filter(move |item| self.filters.iter().all(|filter| filter(*item)))
    }

    /// The first matching object, if any.
    pub fn first(&self) -> Option<T> {
        self.iter().next().cloned()
    }

    /// The first object matching an additional predicate.
    pub fn get(&self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Option<T> {
        self.filter(predicate).first()
    }

    /// Number of matching objects.
    pub fn count(&self) -> usize {
        self.iter().count()
    }

    /// Whether no objects match.
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    /// Collect the matching objects.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().cloned().collect()
    }
}

impl<T: Clone> std::fmt::Debug for QuerySet<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuerySet")
            .field("items", &self.items.len())
            .field("filters", &self.filters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_chaining() {
        let queryset = QuerySet::new(vec![1, 2, 3, 4, 5, 6]);
        let even = queryset.filter(|n| n % 2 == 0);
        assert_eq!(even.to_vec(), vec![2, 4, 6]);

        let big_even = even.filter(|n| *n > 3);
        assert_eq!(big_even.to_vec(), vec![4, 6]);

        // The original queryset is unchanged
        assert_eq!(queryset.count(), 6);
    }

    #[test]
    fn test_first_and_get() {
        let queryset = QuerySet::new(vec![10, 20, 30]);
        assert_eq!(queryset.first(), Some(10));
        assert_eq!(queryset.get(|n| *n > 15), Some(20));
        assert_eq!(queryset.get(|n| *n > 99), None);
    }

    #[test]
    fn test_empty() {
        let queryset: QuerySet<i32> = QuerySet::new(Vec::new());
        assert!(queryset.is_empty());
        assert_eq!(queryset.first(), None);
    }
}
