//! Keyframe search over sorted time sequences.
//!
//! Both searches treat `values` as `values.len() / step` entries whose first
//! slot holds the keyframe time, and return the flat index of the first entry
//! whose time is strictly greater than `target` (or `entries * step` if none).

/// Binary search for the first keyframe strictly after `target`.
///
/// Panics when `step` is zero or the sequence holds no complete entry.
#[inline]
pub fn binary_search(values: &[f32], target: f32, step: usize) -> usize {
    let entries = entry_count(values, step);
    debug_assert!(!target.is_nan(), "keyframe search target is NaN");
    let mut lo = 0usize;
    let mut hi = entries;
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if values[mid * step] <= target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    lo * step
}

/// Linear scan with the same contract as [`binary_search`].
pub fn linear_search(values: &[f32], target: f32, step: usize) -> usize {
    let entries = entry_count(values, step);
    (0..entries)
        .find(|&i| values[i * step] > target)
        .unwrap_or(entries)
        * step
}

#[inline]
fn entry_count(values: &[f32], step: usize) -> usize {
    assert!(step > 0, "keyframe stride must be positive");
    let entries = values.len() / step;
    assert!(entries > 0, "keyframe search over an empty sequence");
    entries
}
