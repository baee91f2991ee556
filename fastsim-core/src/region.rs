//! Barrel/endcap regions and region-indexed calibration tables.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Pseudorapidity-defined detector zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Region {
    /// Central cylinder.
    Barrel,
    /// Forward disks.
    Endcap,
}

impl Region {
    /// Region label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Barrel => "barrel",
            Self::Endcap => "endcap",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One value per region.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionTable<T> {
    /// Barrel entry.
    pub barrel: T,
    /// Endcap entry.
    pub endcap: T,
}

impl<T> RegionTable<T> {
    /// Creates a table.
    pub const fn new(barrel: T, endcap: T) -> Self {
        Self { barrel, endcap }
    }

    /// Returns the entry for `region`.
    #[inline]
    pub fn get(&self, region: Region) -> &T {
        match region {
            Region::Barrel => &self.barrel,
            Region::Endcap => &self.endcap,
        }
    }

    /// Iterates over `(region, entry)` pairs, barrel first.
    pub fn iter(&self) -> impl Iterator<Item = (Region, &T)> {
        [(Region::Barrel, &self.barrel), (Region::Endcap, &self.endcap)].into_iter()
    }
}

impl<T: Clone> RegionTable<T> {
    /// Table holding the same value in both regions.
    pub fn uniform(value: T) -> Self {
        Self {
            barrel: value.clone(),
            endcap: value,
        }
    }
}

/// Rule assigning a pseudorapidity to a region.
///
/// `|eta| > crack` is endcap, unless an `endcap_limit` is set and
/// `|eta| >= endcap_limit`, in which case the barrel entry applies again.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegionSelector {
    /// Barrel/endcap boundary in |eta|.
    pub crack: f64,
    /// Upper |eta| bound of the endcap window.
    #[cfg_attr(feature = "serde", serde(default))]
    pub endcap_limit: Option<f64>,
}

impl RegionSelector {
    /// Selector with an open-ended endcap.
    pub const fn crack(crack: f64) -> Self {
        Self {
            crack,
            endcap_limit: None,
        }
    }

    /// Selector whose endcap stops at `endcap_limit`.
    pub const fn window(crack: f64, endcap_limit: f64) -> Self {
        Self {
            crack,
            endcap_limit: Some(endcap_limit),
        }
    }

    /// Region for a pseudorapidity.
    #[inline]
    pub fn classify(&self, eta: f64) -> Region {
        let eta = eta.abs();
        let below_limit = self.endcap_limit.map_or(true, |limit| eta < limit);
        if eta > self.crack && below_limit {
            Region::Endcap
        } else {
            Region::Barrel
        }
    }
}
