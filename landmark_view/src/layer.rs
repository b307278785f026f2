// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use landmark_cull::{DEFAULT_BUFFER_RATIO, Placed, ViewportBounds, visit_visible};
use landmark_disclosure::{Disclosed, Discloser, ZoomTier, ZoomTiers};

use crate::adapter::CullingAdapter;

/// The render set of a marker layer: disclosure first, then culling.
///
/// Disclosure is memoized through a [`Discloser`] and re-runs synchronously
/// whenever the zoom passed in changes. Culling either happens inline
/// ([`LandmarkLayer::compose`]) or is taken from a debounced
/// [`CullingAdapter`] ([`LandmarkLayer::render_set`]).
#[derive(Clone, Debug)]
pub struct LandmarkLayer {
    discloser: Discloser,
    buffer_ratio: f64,
}

impl Default for LandmarkLayer {
    fn default() -> Self {
        Self::new(ZoomTiers::default())
    }
}

impl LandmarkLayer {
    /// Creates a layer that labels zoom levels with `tiers`.
    #[must_use]
    pub fn new(tiers: ZoomTiers) -> Self {
        Self {
            discloser: Discloser::new(tiers),
            buffer_ratio: DEFAULT_BUFFER_RATIO,
        }
    }

    /// Sets the buffer ratio used by [`LandmarkLayer::compose`].
    #[must_use]
    pub fn with_buffer_ratio(mut self, buffer_ratio: f64) -> Self {
        self.buffer_ratio = buffer_ratio;
        self
    }

    /// The memoizing discloser backing this layer.
    #[must_use]
    pub fn discloser(&self) -> &Discloser {
        &self.discloser
    }

    /// Most detailed tier revealed at `zoom`.
    #[must_use]
    pub fn active_tier(&self, zoom: f64) -> Option<&ZoomTier> {
        self.discloser.active_tier(zoom)
    }

    /// Entities disclosed at `zoom` and inside the buffered `bounds`.
    ///
    /// `revision` identifies the collection for disclosure caching. Missing
    /// or degenerate bounds keep every disclosed entity.
    pub fn compose<'a, E>(
        &mut self,
        entities: &'a [E],
        revision: u64,
        zoom: Option<f64>,
        bounds: Option<ViewportBounds>,
    ) -> Vec<&'a E>
    where
        E: Placed + Disclosed,
    {
        let disclosed: Vec<&'a E> = self
            .discloser
            .disclosed_indices(entities, revision, zoom)
            .iter()
            .map(|&i| &entities[i])
            .collect();
        let mut out = Vec::with_capacity(disclosed.len());
        visit_visible(&disclosed, bounds, self.buffer_ratio, |_, e| out.push(*e));
        out
    }

    /// Entities disclosed at `zoom` among those `adapter` currently shows.
    ///
    /// Both index lists are in collection order, so this is a single merge.
    pub fn render_set<'a, E>(
        &mut self,
        adapter: &'a CullingAdapter<E>,
        zoom: Option<f64>,
    ) -> Vec<&'a E>
    where
        E: Placed + Disclosed,
    {
        let entities: &'a [E] = adapter.entities();
        let disclosed = self
            .discloser
            .disclosed_indices(entities, adapter.revision(), zoom);
        let culled = adapter.visible_indices();

        let mut out = Vec::with_capacity(disclosed.len().min(culled.len()));
        let (mut a, mut b) = (0, 0);
        while a < disclosed.len() && b < culled.len() {
            match disclosed[a].cmp(&culled[b]) {
                core::cmp::Ordering::Less => a += 1,
                core::cmp::Ordering::Greater => b += 1,
                core::cmp::Ordering::Equal => {
                    out.push(&entities[disclosed[a]]);
                    a += 1;
                    b += 1;
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use landmark_cull::{Placed, ViewportBounds};
    use landmark_disclosure::Disclosed;

    use super::LandmarkLayer;
    use crate::adapter::CullingAdapter;

    #[derive(Debug)]
    struct Pin {
        at: Point,
        tier: f64,
    }

    impl Placed for Pin {
        fn coordinate(&self) -> Option<Point> {
            Some(self.at)
        }
    }

    impl Disclosed for Pin {
        fn reveal_threshold(&self) -> Option<f64> {
            Some(self.tier)
        }
    }

    fn pins() -> Vec<Pin> {
        vec![
            Pin { at: Point::new(10.0, 10.0), tier: -1.0 },
            Pin { at: Point::new(500.0, 500.0), tier: -1.0 },
            Pin { at: Point::new(20.0, 20.0), tier: 1.0 },
        ]
    }

    #[test]
    fn disclosure_then_culling() {
        let data = pins();
        let mut layer = LandmarkLayer::default();
        let bounds = Some(ViewportBounds::new(100.0, 0.0, 100.0, 0.0));

        let out = layer.compose(&data, 0, Some(0.0), bounds);
        assert_eq!(out.len(), 1);
        assert!(core::ptr::eq(out[0], &data[0]));

        let out = layer.compose(&data, 0, Some(1.0), bounds);
        assert_eq!(out.len(), 2);
        assert!(core::ptr::eq(out[1], &data[2]));

        let out = layer.compose(&data, 0, Some(1.0), None);
        assert_eq!(out.len(), 3);
    }

    #[test]
    fn degenerate_bounds_keep_every_disclosed_pin() {
        let data = pins();
        let mut layer = LandmarkLayer::default();
        let nan = Some(ViewportBounds::new(f64::NAN, 0.0, 100.0, 0.0));
        assert_eq!(layer.compose(&data, 0, Some(0.0), nan).len(), 2);

        let inverted = Some(ViewportBounds::new(0.0, 100.0, 100.0, 0.0));
        assert_eq!(layer.compose(&data, 0, Some(1.0), inverted).len(), 3);
    }

    #[test]
    fn render_set_intersects_adapter_output() {
        let adapter = CullingAdapter::new(pins());
        let mut layer = LandmarkLayer::default();
        // Unmounted adapter shows everything, so disclosure alone decides.
        assert_eq!(layer.render_set(&adapter, Some(-1.0)).len(), 2);
        assert_eq!(layer.render_set(&adapter, Some(1.0)).len(), 3);
        assert_eq!(layer.active_tier(1.0).map(|t| t.name), Some("full"));
    }
}
