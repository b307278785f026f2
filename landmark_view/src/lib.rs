// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=landmark_view --heading-base-level=0

//! Landmark View: reactive wiring between a map widget and the landmark
//! filters.
//!
//! [`landmark_cull`] and [`landmark_disclosure`] are pure functions. This
//! crate connects them to a stateful widget:
//! - [`MapWidget`]: what the adapter needs from a widget. It reports bounds
//!   and zoom and hands out `MoveEnd`/`ZoomEnd` subscriptions.
//! - [`CullingAdapter`]: subscribes on mount, computes eagerly, debounces
//!   later notifications and unsubscribes and cancels on unmount.
//! - [`LandmarkLayer`]: disclosure followed by culling, which is the set a
//!   marker layer draws.
//! - [`MapCamera`]: a headless pan/zoom camera over the planar map that
//!   implements [`MapWidget`], for hosts without a widget of their own and
//!   for tests.
//!
//! Nothing here reads a clock. Hosts pass millisecond timestamps to
//! [`CullingAdapter::notify`] and [`CullingAdapter::tick`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size, Vec2};
//! use landmark_view::{CullingAdapter, MapCamera};
//!
//! let mut camera = MapCamera::default();
//! camera.set_view_size(Size::new(400.0, 300.0));
//! let _ = camera.drain_events();
//!
//! let points = vec![camera.center(), Point::new(0.0, 0.0)];
//! let mut adapter = CullingAdapter::new(points);
//! adapter.mount(&mut camera);
//! assert_eq!(adapter.visible_indices(), [0]);
//!
//! // Drag the map; the camera queues a MoveEnd for the adapter's listener.
//! camera.pan_by(Vec2::new(50.0, 0.0));
//! for sub in camera.drain_events() {
//!     adapter.notify(sub, 1_000);
//! }
//! assert!(!adapter.tick(&camera, 1_050)); // still inside the window
//! adapter.tick(&camera, 1_100);
//! assert_eq!(adapter.recompute_count(), 2);
//!
//! adapter.unmount(&mut camera);
//! assert_eq!(camera.listener_count(), 0);
//! ```

mod adapter;
mod camera;
mod layer;
mod widget;

pub use adapter::CullingAdapter;
pub use camera::{ClampMode, MAP_EXTENT, MapCamera};
pub use layer::LandmarkLayer;
pub use widget::{MapEvent, MapWidget, Subscription};
