use std::collections::{HashMap, HashSet};

use log::debug;
use rand::Rng;

use super::{AttributeKey, Attributed, Progress};

/// Multiplier of the probe generator
pub const LCG_A: u32 = 1_664_525;
/// Increment of the probe generator
pub const LCG_C: u32 = 1_013_904_223;

/// Linear congruential generator over `m = 2^32`.
///
/// `a ≡ 1 (mod 4)` and `c` odd give the full period of `2^32`, so every
/// residue class modulo any catalog size shows up eventually.
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn advance(&mut self) -> u32 {
        self.state = LCG_A.wrapping_mul(self.state).wrapping_add(LCG_C);
        self.state
    }
}

/// How far the probe search goes before stopping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeCoverage {
    /// Exactly `n` attempts. Collisions use up attempts, so some indices
    /// can be left unvisited.
    #[default]
    Capped,
    /// Probe until every index has been visited once.
    Exhaustive,
}

/// Seed and coverage used by the probe search
#[derive(Debug, Clone, Copy, Default)]
pub struct ProbeSettings {
    pub seed: Option<u32>,
    pub coverage: ProbeCoverage,
}

impl ProbeSettings {
    /// The configured seed, or a uniform draw from `[0, n-1]`.
    pub fn seed_for(&self, n: usize) -> u32 {
        match self.seed {
            Some(seed) => seed,
            None if n == 0 => 0,
            None => rand::thread_rng().gen_range(0..n) as u32,
        }
    }
}

/// Search algorithms over attribute-carrying items
pub struct Search;

impl Search {
    /// Exhaustive scan in catalog order.
    pub fn linear<'a, T: Attributed>(
        items: &'a [T],
        term: &str,
        key: AttributeKey,
        progress: &mut impl Progress,
    ) -> Vec<&'a T> {
        let term = term.to_lowercase();
        let mut results = Vec::new();

        for item in items {
            if Self::item_matches(item, &term, key) {
                results.push(item);
            }
            progress.advance(1);
        }

        results
    }

    /// Pseudorandom probe search, results in probe order.
    pub fn probe<'a, T: Attributed>(
        items: &'a [T],
        term: &str,
        key: AttributeKey,
        seed: u32,
        coverage: ProbeCoverage,
        progress: &mut impl Progress,
    ) -> Vec<&'a T> {
        let term = term.to_lowercase();

        Self::probe_order(items.len(), seed, coverage, progress)
            .into_iter()
            .map(|index| &items[index])
            .filter(|item| Self::item_matches(*item, &term, key))
            .collect()
    }

    /// Distinct indices visited by the probe walk, in visit order.
    ///
    /// Each attempt ticks `progress` once, whether or not it hit a new index.
    pub fn probe_order(
        n: usize,
        seed: u32,
        coverage: ProbeCoverage,
        progress: &mut impl Progress,
    ) -> Vec<usize> {
        if n == 0 {
            return Vec::new();
        }

        let mut lcg = Lcg::new(seed);
        let mut visited = HashSet::with_capacity(n);
        let mut order = Vec::with_capacity(n);
        let mut attempts = 0usize;

        loop {
            let done = match coverage {
                ProbeCoverage::Capped => attempts >= n,
                ProbeCoverage::Exhaustive => visited.len() == n,
            };
            if done {
                break;
            }

            let index = lcg.state() as usize % n;
            if visited.insert(index) {
                order.push(index);
            }
            lcg.advance();
            attempts += 1;
            progress.advance(1);
        }

        debug!(
            "probe walk: seed={seed} n={n} attempts={attempts} visited={}",
            order.len()
        );
        order
    }

    fn item_matches<T: Attributed>(item: &T, term: &str, key: AttributeKey) -> bool {
        item.attribute(key).is_some_and(|value| value.matches(term))
    }
}

/// Precomputed exact-match index: normalized value -> item positions
#[derive(Debug, Default)]
pub struct HashIndex {
    maps: HashMap<AttributeKey, HashMap<String, Vec<usize>>>,
}

impl HashIndex {
    /// Index every item under each of `keys`, keeping catalog order per bucket.
    pub fn build<T: Attributed>(items: &[T], keys: &[AttributeKey]) -> Self {
        let mut maps: HashMap<AttributeKey, HashMap<String, Vec<usize>>> = keys
            .iter()
            .map(|key| (*key, HashMap::new()))
            .collect();

        for (position, item) in items.iter().enumerate() {
            for key in keys {
                let Some(value) = item.attribute(*key) else {
                    continue;
                };
                if let Some(map) = maps.get_mut(key) {
                    map.entry(value.normalized()).or_default().push(position);
                }
            }
        }

        Self { maps }
    }

    /// Positions whose normalized value equals the lowercased term exactly.
    pub fn lookup(&self, key: AttributeKey, term: &str) -> &[usize] {
        self.maps
            .get(&key)
            .and_then(|map| map.get(&term.to_lowercase()))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Number of distinct values indexed for `key`.
    pub fn distinct_values(&self, key: AttributeKey) -> usize {
        self.maps.get(&key).map_or(0, HashMap::len)
    }
}
