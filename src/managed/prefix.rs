// ABOUTME: Shortest unique prefix length over a set of instance ids.
// ABOUTME: Used by `ls` to print a SHORT column that still resolves unambiguously.

use std::collections::HashSet;

/// Smallest `n` in `[min, max]` such that every id is at least `n` chars long
/// and all first-`n` prefixes are distinct.
///
/// Returns 0 when no such `n` exists, including when two ids are identical,
/// and when `min < 1` or `max < min`.
pub fn unique_prefix_len<S: AsRef<str>>(ids: &[S], min: usize, max: usize) -> usize {
    if min < 1 || max < min {
        return 0;
    }

    (min..=max)
        .find(|&n| prefixes_unique(ids, n))
        .unwrap_or(0)
}

fn prefixes_unique<S: AsRef<str>>(ids: &[S], n: usize) -> bool {
    let mut seen = HashSet::with_capacity(ids.len());
    for id in ids {
        let id = id.as_ref();
        let Some((end, _)) = id.char_indices().nth(n - 1) else {
            return false;
        };
        let cut = end + id[end..].chars().next().map_or(0, char::len_utf8);
        if !seen.insert(&id[..cut]) {
            return false;
        }
    }
    true
}
