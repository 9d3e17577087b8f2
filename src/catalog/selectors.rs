use std::fmt;
use std::str::FromStr;

use super::CatalogError;

/// Which search strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchAlgorithm {
    /// Exhaustive scan, substring match on text
    Linear,
    /// Cached exact-match index
    HashIndex,
    /// LCG-driven probe over every position
    Probe,
}

impl SearchAlgorithm {
    pub const ALL: [SearchAlgorithm; 3] = [
        SearchAlgorithm::Linear,
        SearchAlgorithm::HashIndex,
        SearchAlgorithm::Probe,
    ];
}

impl fmt::Display for SearchAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SearchAlgorithm::Linear => "Linear Search",
            SearchAlgorithm::HashIndex => "Hash Search",
            SearchAlgorithm::Probe => "LCG Search",
        };
        f.write_str(label)
    }
}

impl FromStr for SearchAlgorithm {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "linear" => Ok(SearchAlgorithm::Linear),
            "2" | "hash" => Ok(SearchAlgorithm::HashIndex),
            "3" | "lcg" | "probe" => Ok(SearchAlgorithm::Probe),
            other => Err(CatalogError::InvalidAlgorithm(other.to_string())),
        }
    }
}

/// Which sort strategy to run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortAlgorithm {
    /// Library stable sort
    Reference,
    /// Three-way partition quicksort
    Partition,
    /// Pairwise exchange over every index pair ("slowsort")
    Pairwise,
}

impl SortAlgorithm {
    pub const ALL: [SortAlgorithm; 3] = [
        SortAlgorithm::Reference,
        SortAlgorithm::Partition,
        SortAlgorithm::Pairwise,
    ];
}

impl fmt::Display for SortAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            SortAlgorithm::Reference => "Built-in Sort",
            SortAlgorithm::Partition => "Quicksort",
            SortAlgorithm::Pairwise => "Slowsort",
        };
        f.write_str(label)
    }
}

impl FromStr for SortAlgorithm {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "builtin" | "built-in" | "reference" => Ok(SortAlgorithm::Reference),
            "2" | "quicksort" | "partition" => Ok(SortAlgorithm::Partition),
            "3" | "slowsort" | "pairwise" => Ok(SortAlgorithm::Pairwise),
            other => Err(CatalogError::InvalidAlgorithm(other.to_string())),
        }
    }
}
