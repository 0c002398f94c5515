//! Derived statistics over whole collections.
//!
//! Every function recomputes from scratch. Callers pass the full collection,
//! never a filtered view, so page totals do not move with the active filter.

pub fn count_where<T, P>(records: &[T], predicate: P) -> usize
where
    P: Fn(&T) -> bool,
{
    records.iter().filter(|r| predicate(r)).count()
}

pub fn sum_by<T, F>(records: &[T], field: F) -> u64
where
    F: Fn(&T) -> u64,
{
    records.iter().map(field).sum()
}

/// Sums `field` over every child of every parent.
pub fn sum_nested<T, C, K, F>(records: &[T], children: K, field: F) -> u64
where
    K: Fn(&T) -> &[C],
    F: Fn(&C) -> u64,
{
    records.iter().flat_map(|r| children(r).iter()).map(field).sum()
}

/// `part` as a percentage of `whole`; zero when `whole` is zero.
pub fn percentage(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 * 100.0 / whole as f64
    }
}

/// Mean rounded half away from zero; zero for an empty collection.
pub fn rounded_average(total: u64, count: usize) -> u64 {
    if count == 0 {
        0
    } else {
        (total as f64 / count as f64).round() as u64
    }
}
