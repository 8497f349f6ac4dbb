//! Sort criteria and result limits shared by both ranking pipelines.

use crate::error::ConfigError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::num::NonZeroUsize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// Orient an ascending comparison result
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl FromStr for SortDirection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Ascending),
            "desc" | "descending" => Ok(SortDirection::Descending),
            other => Err(ConfigError::UnknownDirection(other.to_string())),
        }
    }
}

/// A sortable field with a natural default direction
pub trait SortKey: Copy {
    fn default_direction(self) -> SortDirection;
}

/// Bird list sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BirdSortKey {
    Likelihood,
    Name,
    Date,
}

impl SortKey for BirdSortKey {
    fn default_direction(self) -> SortDirection {
        match self {
            BirdSortKey::Likelihood | BirdSortKey::Date => SortDirection::Descending,
            BirdSortKey::Name => SortDirection::Ascending,
        }
    }
}

impl FromStr for BirdSortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "likelihood" => Ok(BirdSortKey::Likelihood),
            "name" => Ok(BirdSortKey::Name),
            "date" => Ok(BirdSortKey::Date),
            other => Err(ConfigError::UnknownBirdSort(other.to_string())),
        }
    }
}

/// Hotspot list sort fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HotspotSortKey {
    Quality,
    Distance,
    Name,
}

impl SortKey for HotspotSortKey {
    fn default_direction(self) -> SortDirection {
        match self {
            HotspotSortKey::Quality => SortDirection::Descending,
            HotspotSortKey::Distance | HotspotSortKey::Name => SortDirection::Ascending,
        }
    }
}

impl FromStr for HotspotSortKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "quality" => Ok(HotspotSortKey::Quality),
            "distance" => Ok(HotspotSortKey::Distance),
            "name" => Ok(HotspotSortKey::Name),
            other => Err(ConfigError::UnknownHotspotSort(other.to_string())),
        }
    }
}

/// One active sort field paired with a direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortCriterion<K> {
    pub key: K,
    pub direction: SortDirection,
}

impl<K: SortKey> SortCriterion<K> {
    pub fn new(key: K, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    pub fn default_for(key: K) -> Self {
        Self {
            key,
            direction: key.default_direction(),
        }
    }

    /// Same key, opposite direction
    pub fn flipped(self) -> Self {
        Self::new(self.key, self.direction.reversed())
    }
}

impl<K: SortKey + FromStr<Err = ConfigError>> FromStr for SortCriterion<K> {
    type Err = ConfigError;

    /// Parse "key" or "key:direction", e.g. "likelihood" or "name:desc"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once(':') {
            Some((key, direction)) => Ok(Self::new(key.parse()?, direction.parse()?)),
            None => Ok(Self::default_for(s.parse()?)),
        }
    }
}

/// Truncation applied after sorting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultLimit {
    #[default]
    Unlimited,
    Top(NonZeroUsize),
}

impl ResultLimit {
    /// Limit to `n` results; zero means no limit
    pub fn top(n: usize) -> Self {
        NonZeroUsize::new(n).map_or(ResultLimit::Unlimited, ResultLimit::Top)
    }

    /// Truncate a sorted list in place, preserving order
    pub fn apply<T>(self, items: &mut Vec<T>) {
        if let ResultLimit::Top(n) = self {
            items.truncate(n.get());
        }
    }
}

impl fmt::Display for ResultLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultLimit::Unlimited => write!(f, "all"),
            ResultLimit::Top(n) => write!(f, "{}", n),
        }
    }
}

impl FromStr for ResultLimit {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") || trimmed.eq_ignore_ascii_case("none") {
            return Ok(ResultLimit::Unlimited);
        }
        trimmed
            .parse::<NonZeroUsize>()
            .map(ResultLimit::Top)
            .map_err(|_| ConfigError::InvalidLimit(s.to_string()))
    }
}

impl Serialize for ResultLimit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ResultLimit::Unlimited => serializer.serialize_str("all"),
            ResultLimit::Top(n) => serializer.serialize_u64(n.get() as u64),
        }
    }
}

impl<'de> Deserialize<'de> for ResultLimit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawLimit {
            Count(u64),
            Text(String),
        }

        match Option::<RawLimit>::deserialize(deserializer)? {
            None => Ok(ResultLimit::Unlimited),
            Some(RawLimit::Count(n)) => Ok(ResultLimit::top(n as usize)),
            Some(RawLimit::Text(s)) => s.parse().map_err(serde::de::Error::custom),
        }
    }
}
