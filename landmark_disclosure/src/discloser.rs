// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use crate::disclose::{Disclosed, visit_disclosed};
use crate::tiers::{ZoomTier, ZoomTiers};

#[derive(Clone, Copy, Debug, PartialEq)]
struct Key {
    revision: u64,
    len: usize,
    zoom_bits: Option<u64>,
}

/// Memoizing wrapper around [`crate::compute_disclosed`].
///
/// Hosts re-run disclosure on every zoom change. `Discloser` caches the most
/// recent result keyed by the entity collection's revision and length and by
/// the zoom level, so repeated queries with unchanged inputs reuse the cached
/// index list. Bump the revision whenever the collection is replaced.
#[derive(Clone, Debug, Default)]
pub struct Discloser {
    tiers: ZoomTiers,
    key: Option<Key>,
    indices: Vec<usize>,
    recomputes: u64,
}

impl Discloser {
    /// Creates a discloser using `tiers` for labeling.
    #[must_use]
    pub fn new(tiers: ZoomTiers) -> Self {
        Self {
            tiers,
            ..Self::default()
        }
    }

    /// Tier ladder used by [`Discloser::active_tier`].
    #[must_use]
    pub fn tiers(&self) -> &ZoomTiers {
        &self.tiers
    }

    /// Returns the indices of the entities shown at `zoom`.
    ///
    /// `revision` identifies the collection; the cache is reused only when
    /// revision, length and zoom all match the previous call.
    pub fn disclosed_indices<E: Disclosed>(
        &mut self,
        entities: &[E],
        revision: u64,
        zoom: Option<f64>,
    ) -> &[usize] {
        // NaN zoom is treated like a missing zoom, so give it the same key.
        let zoom = zoom.filter(|z| !z.is_nan());
        let key = Key {
            revision,
            len: entities.len(),
            zoom_bits: zoom.map(f64::to_bits),
        };
        if self.key != Some(key) {
            self.indices.clear();
            let indices = &mut self.indices;
            visit_disclosed(entities, zoom, |i, _| indices.push(i));
            self.key = Some(key);
            self.recomputes += 1;
        }
        &self.indices
    }

    /// Returns the entities shown at `zoom`, borrowing from `entities`.
    pub fn disclosed<'a, E: Disclosed>(
        &mut self,
        entities: &'a [E],
        revision: u64,
        zoom: Option<f64>,
    ) -> Vec<&'a E> {
        self.disclosed_indices(entities, revision, zoom)
            .iter()
            .map(|&i| &entities[i])
            .collect()
    }

    /// Most detailed tier revealed at `zoom`.
    #[must_use]
    pub fn active_tier(&self, zoom: f64) -> Option<&ZoomTier> {
        self.tiers.active_tier(zoom)
    }

    /// Drops the cached result.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.indices.clear();
    }

    /// Number of times the filter actually ran.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }
}
