// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named reveal tiers.
//!
//! Thresholds are plain numbers as far as filtering is concerned; a
//! [`ZoomTiers`] ladder only gives those numbers names so hosts can label the
//! current level of detail and count how many entities each tier holds.

use alloc::vec::Vec;

use crate::disclose::{Disclosed, is_disclosed};

/// One step of a reveal ladder.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomTier {
    /// Display name of the tier.
    pub name: &'static str,
    /// Zoom level at which entities of this tier appear.
    pub threshold: f64,
}

impl ZoomTier {
    /// Creates a tier.
    #[must_use]
    pub const fn new(name: &'static str, threshold: f64) -> Self {
        Self { name, threshold }
    }
}

/// Ordered set of reveal tiers, lowest threshold first.
///
/// The default ladder has three tiers:
/// - `seminal` at `-1`: the handful of entities shown from the lowest zoom,
/// - `notable` at `0`,
/// - `full` at `1`: everything else.
///
/// Any number of tiers with any thresholds can be used instead.
#[derive(Clone, Debug, PartialEq)]
pub struct ZoomTiers {
    tiers: Vec<ZoomTier>,
}

impl Default for ZoomTiers {
    fn default() -> Self {
        Self::new([
            ZoomTier::new("seminal", -1.0),
            ZoomTier::new("notable", 0.0),
            ZoomTier::new("full", 1.0),
        ])
    }
}

impl ZoomTiers {
    /// Creates a ladder from `tiers`.
    ///
    /// Tiers are sorted by threshold; tiers with a `NaN` threshold are dropped.
    #[must_use]
    pub fn new(tiers: impl IntoIterator<Item = ZoomTier>) -> Self {
        let mut tiers: Vec<ZoomTier> = tiers
            .into_iter()
            .filter(|t| !t.threshold.is_nan())
            .collect();
        tiers.sort_by(|a, b| a.threshold.total_cmp(&b.threshold));
        Self { tiers }
    }

    /// Tiers in ascending threshold order.
    #[must_use]
    pub fn tiers(&self) -> &[ZoomTier] {
        &self.tiers
    }

    /// Number of tiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    /// Returns `true` if the ladder has no tiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    /// Looks up a tier by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ZoomTier> {
        self.tiers.iter().find(|t| t.name == name)
    }

    /// Returns the most detailed tier already revealed at `zoom`.
    ///
    /// Returns `None` when `zoom` is below every threshold.
    #[must_use]
    pub fn active_tier(&self, zoom: f64) -> Option<&ZoomTier> {
        self.tiers
            .iter()
            .rev()
            .find(|t| is_disclosed(Some(t.threshold), Some(zoom)))
    }

    /// Index of the tier an entity with `threshold` belongs to.
    ///
    /// An entity belongs to the lowest tier whose threshold is at or above its
    /// own. Entities without a threshold belong to tier `0`; entities above
    /// the highest tier return `None`.
    #[must_use]
    pub fn tier_index(&self, threshold: Option<f64>) -> Option<usize> {
        match threshold {
            Some(t) if !t.is_nan() => self.tiers.iter().position(|tier| t <= tier.threshold),
            _ if self.tiers.is_empty() => None,
            _ => Some(0),
        }
    }

    /// Number of entities in each tier, in tier order.
    #[must_use]
    pub fn tier_counts<E: Disclosed>(&self, entities: &[E]) -> Vec<usize> {
        let mut counts = alloc::vec![0; self.tiers.len()];
        for e in entities {
            if let Some(i) = self.tier_index(e.reveal_threshold()) {
                counts[i] += 1;
            }
        }
        counts
    }

    /// Number of entities visible once each tier is revealed.
    ///
    /// This is the running sum of [`ZoomTiers::tier_counts`].
    #[must_use]
    pub fn cumulative_counts<E: Disclosed>(&self, entities: &[E]) -> Vec<usize> {
        let mut counts = self.tier_counts(entities);
        let mut total = 0;
        for c in &mut counts {
            total += *c;
            *c = total;
        }
        counts
    }
}
