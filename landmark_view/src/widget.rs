// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The contract a map widget offers to the culling adapter.

use landmark_cull::BoundsSource;

/// Viewport change notifications a map widget emits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MapEvent {
    /// A pan (or any other center change) has finished.
    MoveEnd,
    /// A zoom change has finished.
    ZoomEnd,
}

/// Handle for one listener registered with a [`MapWidget`].
///
/// The widget hands out a fresh handle per [`MapWidget::subscribe`] call and
/// later reports events against it; passing it back to
/// [`MapWidget::unsubscribe`] stops delivery.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Subscription {
    event: MapEvent,
    id: u64,
}

impl Subscription {
    /// Creates a handle. Widgets are responsible for keeping `id` unique.
    #[must_use]
    pub const fn new(event: MapEvent, id: u64) -> Self {
        Self { event, id }
    }

    /// Event this handle listens to.
    #[must_use]
    pub fn event(&self) -> MapEvent {
        self.event
    }

    /// Widget-assigned identifier.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// A stateful map widget: reports bounds and zoom, and emits change events.
///
/// Reading bounds may fail before the widget is ready (see
/// [`BoundsSource`]). The zoom is `None` in the same situation.
pub trait MapWidget: BoundsSource {
    /// Current zoom level. Higher is more detailed; fractional values occur
    /// mid-animation.
    fn zoom(&self) -> Option<f64>;

    /// Registers a listener for `event`.
    fn subscribe(&mut self, event: MapEvent) -> Subscription;

    /// Removes a listener. Unknown handles are ignored.
    fn unsubscribe(&mut self, subscription: Subscription);
}
