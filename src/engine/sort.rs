use std::cmp::Ordering;

use log::debug;

use super::Progress;

/// Sort algorithms parameterised by a key function
pub struct Sort;

impl Sort {
    /// Library stable sort.
    pub fn reference<T, K, F>(items: &mut [T], key: F)
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        items.sort_by(|a, b| key(a).cmp(&key(b)));
    }

    /// Quicksort with a three-way partition around the middle element.
    ///
    /// The pivot position is fixed, so adversarial inputs degrade to O(n²).
    /// Recursion only follows the smaller side, keeping the depth logarithmic.
    /// `progress` ticks once per item placed.
    pub fn partition<T, K, F>(items: Vec<T>, key: F, progress: &mut impl Progress) -> Vec<T>
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let keyed: Vec<(K, T)> = items.into_iter().map(|item| (key(&item), item)).collect();
        let mut slots: Vec<Option<(K, T)>> = keyed.iter().map(|_| None).collect();
        Self::partition_into(keyed, 0, &mut slots, progress);
        slots.into_iter().flatten().map(|(_, item)| item).collect()
    }

    fn partition_into<T, K: Ord, P: Progress>(
        mut keyed: Vec<(K, T)>,
        mut offset: usize,
        slots: &mut [Option<(K, T)>],
        progress: &mut P,
    ) {
        loop {
            if keyed.len() <= 1 {
                progress.advance(keyed.len());
                for (i, entry) in keyed.into_iter().enumerate() {
                    slots[offset + i] = Some(entry);
                }
                return;
            }

            let pivot = &keyed[keyed.len() / 2].0;
            let placement: Vec<Ordering> = keyed.iter().map(|(k, _)| k.cmp(pivot)).collect();

            let mut left = Vec::new();
            let mut middle = Vec::new();
            let mut right = Vec::new();
            for (entry, place) in keyed.into_iter().zip(placement) {
                match place {
                    Ordering::Less => left.push(entry),
                    Ordering::Equal => middle.push(entry),
                    Ordering::Greater => right.push(entry),
                }
            }

            progress.advance(middle.len());
            let middle_at = offset + left.len();
            let right_at = middle_at + middle.len();
            for (i, entry) in middle.into_iter().enumerate() {
                slots[middle_at + i] = Some(entry);
            }

            let (smaller, smaller_at, larger, larger_at) = if left.len() <= right.len() {
                (left, offset, right, right_at)
            } else {
                (right, right_at, left, offset)
            };
            Self::partition_into(smaller, smaller_at, slots, progress);
            keyed = larger;
            offset = larger_at;
        }
    }

    /// Pairwise exchange over every `i < j`, swapping out-of-order pairs.
    ///
    /// Always performs `n(n-1)/2` comparisons and returns that count.
    pub fn pairwise<T, K, F>(items: &mut [T], key: F, progress: &mut impl Progress) -> usize
    where
        K: Ord,
        F: Fn(&T) -> K,
    {
        let n = items.len();
        let mut keys: Vec<K> = items.iter().map(&key).collect();
        let mut comparisons = 0usize;

        for i in 0..n {
            for j in (i + 1)..n {
                if keys[i] > keys[j] {
                    keys.swap(i, j);
                    items.swap(i, j);
                }
                comparisons += 1;
                progress.advance(1);
            }
        }

        debug!("pairwise sort: n={n} comparisons={comparisons}");
        comparisons
    }

    /// Comparison count of [`Sort::pairwise`] for `n` items.
    pub fn pairwise_comparisons(n: usize) -> usize {
        n * n.saturating_sub(1) / 2
    }
}
