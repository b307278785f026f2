// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::sync::Arc;
use std::time::Duration;

use landmark_cull::{DEFAULT_BUFFER_RATIO, Placed, read_bounds, visible_indices};
use landmark_timing::{DEFAULT_DEBOUNCE, Debouncer};
use smallvec::SmallVec;

use crate::widget::{MapEvent, MapWidget, Subscription};

/// Keeps a culled view of an entity collection in sync with a map widget.
///
/// The adapter owns the listener lifecycle and the debounce timer; the
/// culling itself is [`landmark_cull::visible_indices`].
///
/// Lifecycle:
/// - [`CullingAdapter::mount`] subscribes to `MoveEnd` and `ZoomEnd` and
///   computes once right away.
/// - The host forwards each notification with [`CullingAdapter::notify`].
///   Notifications only arm the debounce window.
/// - The host calls [`CullingAdapter::tick`] from its timer or frame
///   callback. Once the window after the last notification has passed, the
///   visible set is recomputed from the widget's bounds at that moment.
/// - [`CullingAdapter::unmount`] unsubscribes and cancels anything pending.
///
/// Before mounting, and whenever the widget cannot report bounds, every
/// entity is visible.
#[derive(Debug)]
pub struct CullingAdapter<E> {
    entities: Arc<[E]>,
    revision: u64,
    buffer_ratio: f64,
    debounce: Debouncer,
    subscriptions: SmallVec<[Subscription; 2]>,
    visible: Vec<usize>,
    recomputes: u64,
}

impl<E: Placed> CullingAdapter<E> {
    /// Creates an unmounted adapter over `entities` with the default buffer
    /// ratio and debounce window.
    pub fn new(entities: impl Into<Arc<[E]>>) -> Self {
        let entities = entities.into();
        let visible = (0..entities.len()).collect();
        Self {
            entities,
            revision: 0,
            buffer_ratio: DEFAULT_BUFFER_RATIO,
            debounce: Debouncer::new(DEFAULT_DEBOUNCE),
            subscriptions: SmallVec::new(),
            visible,
            recomputes: 0,
        }
    }

    /// Sets the buffer ratio used for culling.
    #[must_use]
    pub fn with_buffer_ratio(mut self, buffer_ratio: f64) -> Self {
        self.buffer_ratio = buffer_ratio;
        self
    }

    /// Sets the debounce window.
    #[must_use]
    pub fn with_debounce(mut self, window: Duration) -> Self {
        self.debounce = Debouncer::new(window);
        self
    }

    /// Buffer ratio used for culling.
    #[must_use]
    pub fn buffer_ratio(&self) -> f64 {
        self.buffer_ratio
    }

    /// The shared entity collection.
    #[must_use]
    pub fn entities(&self) -> &Arc<[E]> {
        &self.entities
    }

    /// Counter bumped every time the collection is replaced.
    ///
    /// Suitable as the revision key of a [`landmark_disclosure::Discloser`].
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Returns `true` between [`CullingAdapter::mount`] and
    /// [`CullingAdapter::unmount`].
    #[must_use]
    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }

    /// Returns `true` while a debounced recomputation is waiting to run.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Subscribes to `widget` and computes the visible set immediately.
    ///
    /// Mounting an already mounted adapter first unmounts it from `widget`.
    pub fn mount<W: MapWidget + ?Sized>(&mut self, widget: &mut W) {
        if self.is_mounted() {
            self.unmount(widget);
        }
        self.subscriptions.push(widget.subscribe(MapEvent::MoveEnd));
        self.subscriptions.push(widget.subscribe(MapEvent::ZoomEnd));
        self.recompute(Some(&*widget));
    }

    /// Records a viewport change reported to `subscription` at `now_ms`.
    ///
    /// Returns `true` if the notification armed the debounce. Handles that
    /// this adapter does not own, and any notification while unmounted, are
    /// ignored.
    pub fn notify(&mut self, subscription: Subscription, now_ms: u64) -> bool {
        if !self.subscriptions.contains(&subscription) {
            return false;
        }
        self.debounce.notify(now_ms);
        true
    }

    /// Runs the debounced recomputation if it is due at `now_ms`.
    ///
    /// Returns `true` if the visible set changed.
    pub fn tick<W: MapWidget + ?Sized>(&mut self, widget: &W, now_ms: u64) -> bool {
        if self.debounce.poll(now_ms).is_none() {
            return false;
        }
        self.recompute(Some(widget))
    }

    /// Unsubscribes from `widget` and cancels any pending recomputation.
    ///
    /// The visible set keeps its last computed value.
    pub fn unmount<W: MapWidget + ?Sized>(&mut self, widget: &mut W) {
        for sub in self.subscriptions.drain(..) {
            widget.unsubscribe(sub);
        }
        if self.debounce.cancel() {
            log::debug!("canceled pending cull recomputation on unmount");
        }
    }

    /// Replaces the entity collection and recomputes against `widget`.
    ///
    /// Pass `None` when no widget exists yet; every entity is then visible.
    pub fn set_entities<W: MapWidget + ?Sized>(
        &mut self,
        entities: impl Into<Arc<[E]>>,
        widget: Option<&W>,
    ) {
        self.entities = entities.into();
        self.revision += 1;
        self.recompute(widget);
    }

    /// Entities currently considered visible, in collection order.
    pub fn visible(&self) -> impl Iterator<Item = &E> + '_ {
        self.visible.iter().map(|&i| &self.entities[i])
    }

    /// Indices into [`CullingAdapter::entities`] of the visible entities.
    #[must_use]
    pub fn visible_indices(&self) -> &[usize] {
        &self.visible
    }

    /// Number of recomputations performed so far, eager ones included.
    #[must_use]
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    fn recompute<W: MapWidget + ?Sized>(&mut self, widget: Option<&W>) -> bool {
        let bounds = read_bounds(widget);
        let next = visible_indices(&self.entities, bounds, self.buffer_ratio);
        self.recomputes += 1;
        log::debug!(
            "culled {} of {} entities (bounds: {:?})",
            next.len(),
            self.entities.len(),
            bounds
        );
        if next == self.visible {
            return false;
        }
        self.visible = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size};

    use super::CullingAdapter;
    use crate::camera::MapCamera;
    use crate::widget::{MapEvent, MapWidget, Subscription};

    fn points() -> Vec<Point> {
        vec![
            Point::new(1300.0, 1300.0),
            Point::new(0.0, 0.0),
            Point::new(2600.0, 2600.0),
        ]
    }

    #[test]
    fn unmounted_adapter_shows_everything() {
        let adapter = CullingAdapter::new(points());
        assert_eq!(adapter.visible_indices(), [0, 1, 2]);
        assert_eq!(adapter.recompute_count(), 0);
    }

    #[test]
    fn foreign_handles_are_ignored() {
        let mut cam = MapCamera::default();
        cam.set_view_size(Size::new(200.0, 200.0));
        let mut adapter = CullingAdapter::new(points());
        adapter.mount(&mut cam);

        let stranger = Subscription::new(MapEvent::MoveEnd, 9_999);
        assert!(!adapter.notify(stranger, 0));
        assert!(!adapter.is_pending());
    }

    #[test]
    fn mount_twice_does_not_leak_listeners() {
        let mut cam = MapCamera::default();
        let mut adapter = CullingAdapter::new(points());
        adapter.mount(&mut cam);
        adapter.mount(&mut cam);
        assert_eq!(cam.listener_count(), 2);
        adapter.unmount(&mut cam);
        assert_eq!(cam.listener_count(), 0);
        assert_eq!(cam.zoom(), None);
    }
}
