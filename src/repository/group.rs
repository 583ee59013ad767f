//! Grouping of sorted package lists.

/// Split `items` into runs of consecutive elements sharing the same key.
///
/// Only adjacent elements are merged, so the input must already be sorted in
/// a way that keeps each key together. Group order follows input order.
pub fn group_by_key<T, K, F>(items: &[T], mut key: F) -> Vec<&[T]>
where
    K: PartialEq,
    F: FnMut(&T) -> K,
{
    items.chunk_by(|a, b| key(a) == key(b)).collect()
}
