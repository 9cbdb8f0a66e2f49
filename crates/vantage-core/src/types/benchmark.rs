//! Benchmark identifiers and benchmark-keyed records.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Market benchmark a portfolio is measured against.
///
/// Three benchmarks are tracked from index levels; `Average` is derived per
/// period as the arithmetic mean of the three tracked benchmark returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkId {
    /// Shanghai Stock Exchange Composite.
    Sha,
    /// Shenzhen Component Index.
    She,
    /// CSI 300.
    Csi300,
    /// Equal-weighted average of the three tracked benchmarks.
    Average,
}

impl BenchmarkId {
    /// Every benchmark, tracked and derived, in reporting order.
    pub const ALL: [BenchmarkId; 4] = [Self::Sha, Self::She, Self::Csi300, Self::Average];

    /// Benchmarks observed directly from index levels.
    pub const TRACKED: [BenchmarkId; 3] = [Self::Sha, Self::She, Self::Csi300];

    /// Short code used in serialized output and logs.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Sha => "sha",
            Self::She => "she",
            Self::Csi300 => "csi300",
            Self::Average => "average",
        }
    }

    /// Human-readable benchmark name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sha => "SSE Composite",
            Self::She => "SZSE Component",
            Self::Csi300 => "CSI 300",
            Self::Average => "Average Benchmark",
        }
    }

    /// Returns true for the derived average benchmark.
    #[must_use]
    pub fn is_derived(self) -> bool {
        matches!(self, Self::Average)
    }
}

impl fmt::Display for BenchmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for BenchmarkId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sha" => Ok(Self::Sha),
            "she" => Ok(Self::She),
            "csi300" | "csi_300" => Ok(Self::Csi300),
            "average" | "avg" => Ok(Self::Average),
            _ => Err(CoreError::unknown_benchmark(s)),
        }
    }
}

/// A value for every benchmark, including the derived average.
///
/// A record with one field per benchmark rather than a hash map, so a missing
/// benchmark is a compile error instead of a silent omission.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkMap<T> {
    /// SSE Composite value.
    pub sha: T,
    /// SZSE Component value.
    pub she: T,
    /// CSI 300 value.
    pub csi300: T,
    /// Average benchmark value.
    pub average: T,
}

impl<T> BenchmarkMap<T> {
    /// Creates a map from one value per benchmark.
    pub fn new(sha: T, she: T, csi300: T, average: T) -> Self {
        Self {
            sha,
            she,
            csi300,
            average,
        }
    }

    /// Builds a map by evaluating `f` once per benchmark, in `BenchmarkId::ALL` order.
    pub fn from_fn<F>(mut f: F) -> Self
    where
        F: FnMut(BenchmarkId) -> T,
    {
        Self {
            sha: f(BenchmarkId::Sha),
            she: f(BenchmarkId::She),
            csi300: f(BenchmarkId::Csi300),
            average: f(BenchmarkId::Average),
        }
    }

    /// Returns the value for a benchmark.
    pub fn get(&self, id: BenchmarkId) -> &T {
        match id {
            BenchmarkId::Sha => &self.sha,
            BenchmarkId::She => &self.she,
            BenchmarkId::Csi300 => &self.csi300,
            BenchmarkId::Average => &self.average,
        }
    }

    /// Returns a mutable reference to the value for a benchmark.
    pub fn get_mut(&mut self, id: BenchmarkId) -> &mut T {
        match id {
            BenchmarkId::Sha => &mut self.sha,
            BenchmarkId::She => &mut self.she,
            BenchmarkId::Csi300 => &mut self.csi300,
            BenchmarkId::Average => &mut self.average,
        }
    }

    /// Maps every value, keeping the benchmark association.
    pub fn map<U, F>(&self, mut f: F) -> BenchmarkMap<U>
    where
        F: FnMut(BenchmarkId, &T) -> U,
    {
        BenchmarkMap::from_fn(|id| f(id, self.get(id)))
    }

    /// Iterates `(benchmark, value)` pairs in `BenchmarkId::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (BenchmarkId, &T)> {
        BenchmarkId::ALL.into_iter().map(move |id| (id, self.get(id)))
    }
}

/// Index levels of the tracked benchmarks at one valuation date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchmarkLevels {
    /// SSE Composite level.
    pub sha: Decimal,
    /// SZSE Component level.
    pub she: Decimal,
    /// CSI 300 level.
    pub csi300: Decimal,
}

impl BenchmarkLevels {
    /// Creates a set of benchmark levels.
    #[must_use]
    pub fn new(sha: Decimal, she: Decimal, csi300: Decimal) -> Self {
        Self { sha, she, csi300 }
    }

    /// Returns the level of a tracked benchmark, or `None` for a derived one.
    #[must_use]
    pub fn get(&self, id: BenchmarkId) -> Option<Decimal> {
        match id {
            BenchmarkId::Sha => Some(self.sha),
            BenchmarkId::She => Some(self.she),
            BenchmarkId::Csi300 => Some(self.csi300),
            BenchmarkId::Average => None,
        }
    }

    /// Iterates `(benchmark, level)` pairs of the tracked benchmarks.
    pub fn iter(&self) -> impl Iterator<Item = (BenchmarkId, Decimal)> + '_ {
        BenchmarkId::TRACKED
            .into_iter()
            .filter_map(move |id| self.get(id).map(|level| (id, level)))
    }
}
