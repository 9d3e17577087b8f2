use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::catalog::CatalogError;

/// Selects which field of a song takes part in a search or sort call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AttributeKey {
    Name,
    Artist,
    Album,
    Genre, // descriptive field, text datasets
    Views, // descriptive field, popularity datasets
    Duration,
}

impl AttributeKey {
    pub const ALL: [AttributeKey; 6] = [
        AttributeKey::Name,
        AttributeKey::Artist,
        AttributeKey::Album,
        AttributeKey::Genre,
        AttributeKey::Views,
        AttributeKey::Duration,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributeKey::Name => "name",
            AttributeKey::Artist => "artist",
            AttributeKey::Album => "album",
            AttributeKey::Genre => "genre",
            AttributeKey::Views => "views",
            AttributeKey::Duration => "duration",
        }
    }
}

impl fmt::Display for AttributeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == wanted)
            .ok_or_else(|| CatalogError::InvalidAttribute(s.trim().to_string()))
    }
}

/// A field value borrowed from an item, typed as text or number
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AttributeValue<'a> {
    Text(&'a str),
    Integer(u64),
    Float(f64),
}

impl AttributeValue<'_> {
    /// Normalized form used for equality: lowercase text, canonical numbers.
    pub fn normalized(&self) -> String {
        match self {
            AttributeValue::Text(text) => text.to_lowercase(),
            AttributeValue::Integer(n) => n.to_string(),
            AttributeValue::Float(x) => canonical_float(*x),
        }
    }

    /// Match predicate shared by linear and probe search.
    ///
    /// `term` must already be lowercased. Text matches on substring, numbers
    /// only when the term equals their canonical text form.
    pub fn matches(&self, term: &str) -> bool {
        match self {
            AttributeValue::Text(text) => text.to_lowercase().contains(term),
            _ => self.normalized() == term,
        }
    }

    pub fn sort_key(&self) -> SortKey {
        match self {
            AttributeValue::Text(text) => SortKey::Text(text.to_lowercase()),
            AttributeValue::Integer(n) => SortKey::Number(*n as f64),
            AttributeValue::Float(x) => SortKey::Number(*x),
        }
    }
}

/// Shortest round-trip rendering that always keeps a fractional part
/// ("3.0", "2.05").
fn canonical_float(x: f64) -> String {
    format!("{x:?}")
}

/// Anything the engines can search and sort by attribute
pub trait Attributed {
    /// `None` when the item's dataset variant does not carry `key`.
    fn attribute(&self, key: AttributeKey) -> Option<AttributeValue<'_>>;

    fn sort_key(&self, key: AttributeKey) -> SortKey {
        self.attribute(key)
            .map(|value| value.sort_key())
            .unwrap_or(SortKey::Missing)
    }
}

/// Totally ordered comparison key: `Missing < Number < Text`
#[derive(Debug, Clone)]
pub enum SortKey {
    Missing,
    Number(f64),
    Text(String),
}

impl SortKey {
    fn rank(&self) -> u8 {
        match self {
            SortKey::Missing => 0,
            SortKey::Number(_) => 1,
            SortKey::Text(_) => 2,
        }
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}
