use std::collections::VecDeque;

use crate::{Error, Result};

/// Fixed-capacity history of the most recent samples of one side
///
/// `None` entries are placeholders for ticks without data: they occupy a slot
/// (and push older samples out) but never contribute to estimates.
#[derive(Debug, Clone)]
pub struct HandHistory<T> {
    capacity: usize,
    entries: VecDeque<Option<T>>,
}

impl<T> HandHistory<T> {
    /// Create an empty history
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::FilterError("Window size must be greater than 0".to_string()));
        }
        Ok(Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        })
    }

    /// Append a sample, evicting the oldest entry once full
    pub fn push(&mut self, sample: Option<T>) {
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(sample);
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.entries.iter().map(Option::as_ref)
    }

    /// Present samples with their window position (0 = oldest)
    pub fn present(&self) -> impl Iterator<Item = (usize, &T)> {
        self.entries
            .iter()
            .enumerate()
            .filter_map(|(i, entry)| entry.as_ref().map(|sample| (i, sample)))
    }

    /// Oldest entry, if present
    pub fn oldest(&self) -> Option<&T> {
        self.entries.front().and_then(Option::as_ref)
    }

    /// Newest entry, if present
    pub fn newest(&self) -> Option<&T> {
        self.entries.back().and_then(Option::as_ref)
    }

    /// Entry at a window position (0 = oldest)
    pub fn get(&self, position: usize) -> Option<&T> {
        self.entries.get(position).and_then(Option::as_ref)
    }

    /// True when the window holds `capacity` entries, all of them present
    pub fn is_saturated(&self) -> bool {
        self.is_full() && self.entries.iter().all(Option::is_some)
    }

    pub fn is_full(&self) -> bool {
        self.entries.len() == self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity; shrinking drops the oldest entries
    ///
    /// # Errors
    ///
    /// Returns an error if `capacity` is 0
    pub fn set_capacity(&mut self, capacity: usize) -> Result<()> {
        if capacity == 0 {
            return Err(Error::FilterError("Window size must be greater than 0".to_string()));
        }
        while self.entries.len() > capacity {
            self.entries.pop_front();
        }
        self.capacity = capacity;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_zero_capacity() {
        assert!(HandHistory::<f64>::new(0).is_err());
    }

    #[test]
    fn test_ring_buffer_eviction() {
        let mut history = HandHistory::new(3).unwrap();
        history.push(Some(1.0));
        history.push(Some(2.0));
        history.push(Some(3.0));
        assert!(history.is_full());
        assert_eq!(history.oldest(), Some(&1.0));

        history.push(Some(4.0));
        assert_eq!(history.len(), 3);
        assert_eq!(history.oldest(), Some(&2.0));
        assert_eq!(history.newest(), Some(&4.0));
    }

    #[test]
    fn test_placeholders_occupy_slots() {
        let mut history = HandHistory::new(3).unwrap();
        history.push(Some(1.0));
        history.push(None);
        history.push(Some(3.0));

        assert!(history.is_full());
        assert!(!history.is_saturated());
        let present: Vec<_> = history.present().collect();
        assert_eq!(present, vec![(0, &1.0), (2, &3.0)]);

        history.push(None);
        history.push(None);
        history.push(None);
        assert_eq!(history.present().count(), 0);
        assert!(history.newest().is_none());
    }

    #[test]
    fn test_shrink_capacity() {
        let mut history = HandHistory::new(4).unwrap();
        for i in 0..4 {
            history.push(Some(i));
        }
        history.set_capacity(2).unwrap();
        assert_eq!(history.oldest(), Some(&2));
        assert!(history.set_capacity(0).is_err());
    }

    proptest! {
        #[test]
        fn prop_len_never_exceeds_capacity(capacity in 1usize..16, pushes in 0usize..64) {
            let mut history = HandHistory::new(capacity).unwrap();
            for i in 0..pushes {
                history.push(Some(i));
                prop_assert!(history.len() <= capacity);
            }
            prop_assert_eq!(history.len(), pushes.min(capacity));
            if pushes > 0 {
                prop_assert_eq!(history.newest(), Some(&(pushes - 1)));
            }
        }
    }
}
