pub const DEFAULT_BATCH_SIZE: usize = 3;

/// Batch arithmetic over an already filtered collection.
///
/// `step` counts revealed batches and is assumed to be at least 1. Slice
/// bounds are clamped to the collection, so short or empty inputs produce
/// short or empty slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    batch_size: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_BATCH_SIZE)
    }
}

impl Paginator {
    pub fn new(batch_size: usize) -> Self {
        Self { batch_size }
    }

    pub fn batch_size(self) -> usize {
        self.batch_size
    }

    pub fn visible_count(self, step: usize) -> usize {
        self.batch_size.saturating_mul(step)
    }

    pub fn slice_for_reset<T>(self, filtered: &[T], step: usize) -> &[T] {
        let end = self.visible_count(step).min(filtered.len());
        &filtered[..end]
    }

    /// Only the batch revealed by `step`, for appending below what is shown.
    pub fn slice_for_append<T>(self, filtered: &[T], step: usize) -> &[T] {
        let end = self.visible_count(step).min(filtered.len());
        let start = self
            .visible_count(step.saturating_sub(1))
            .min(end);
        &filtered[start..end]
    }

    pub fn has_more(self, filtered_len: usize, step: usize) -> bool {
        filtered_len > self.visible_count(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn reset_slice_never_exceeds_visible_count() {
        let items: Vec<u32> = (0..10).collect();
        for batch in 1..5 {
            let paginator = Paginator::new(batch);
            for step in 1..6 {
                let slice = paginator.slice_for_reset(&items, step);
                assert!(slice.len() <= batch * step);
                assert_eq!(slice.len(), (batch * step).min(items.len()));
                assert_eq!(
                    paginator.has_more(items.len(), step),
                    items.len() > batch * step
                );
            }
        }
    }

    #[test]
    fn append_slice_is_the_newest_batch() {
        let items = ["a", "b", "c", "d", "e", "f", "g"];
        let paginator = Paginator::default();
        assert_eq!(paginator.slice_for_append(&items, 1), &["a", "b", "c"]);
        assert_eq!(paginator.slice_for_append(&items, 2), &["d", "e", "f"]);
        assert_eq!(paginator.slice_for_append(&items, 3), &["g"]);
        assert!(paginator.slice_for_append(&items, 4).is_empty());
    }

    #[test]
    fn appended_batches_concatenate_to_reset_slice() {
        let items: Vec<u32> = (0..8).collect();
        let paginator = Paginator::new(3);
        let mut shown = Vec::new();
        for step in 1..=3 {
            shown.extend_from_slice(paginator.slice_for_append(&items, step));
            assert_eq!(shown.as_slice(), paginator.slice_for_reset(&items, step));
        }
    }

    #[test]
    fn empty_collection_has_nothing_to_show() {
        let items: [u8; 0] = [];
        let paginator = Paginator::default();
        assert!(paginator.slice_for_reset(&items, 1).is_empty());
        assert!(paginator.slice_for_append(&items, 2).is_empty());
        assert!(!paginator.has_more(0, 1));
    }

    #[test]
    fn exact_multiple_reports_no_more() {
        let paginator = Paginator::new(3);
        assert!(paginator.has_more(4, 1));
        assert!(!paginator.has_more(3, 1));
        assert!(!paginator.has_more(6, 2));
        assert_eq!(paginator.visible_count(4), 12);
    }
}
