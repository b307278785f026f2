// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=landmark_cull --heading-base-level=0

//! Landmark Cull: viewport culling for point entities on a planar map.
//!
//! Given a list of entities with optional positions and the rectangle a map
//! widget currently shows, this crate picks the entities worth mounting in
//! the render tree. It focuses on:
//! - [`ViewportBounds`]: the visible rectangle, with inclusive containment and
//!   buffer expansion.
//! - [`compute_visible`]: a single linear, allocation-light filter that keeps
//!   entities inside the buffered viewport.
//! - [`BoundsSource`]: the widget-side accessor, which may fail while the map
//!   is initializing. [`compute_visible_from`] treats any failure as "bounds
//!   unknown" and shows everything rather than nothing.
//!
//! It does **not** subscribe to widget events or debounce anything. Hosts
//! call these functions whenever the viewport settles (see `landmark_view`
//! for an adapter that does that).
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use landmark_cull::{DEFAULT_BUFFER_RATIO, Placed, ViewportBounds, compute_visible};
//!
//! struct Marker {
//!     id: &'static str,
//!     at: Option<Point>,
//! }
//!
//! impl Placed for Marker {
//!     fn coordinate(&self) -> Option<Point> {
//!         self.at
//!     }
//! }
//!
//! let markers = [
//!     Marker { id: "transformer", at: Some(Point::new(50.0, 50.0)) },
//!     Marker { id: "far-away", at: Some(Point::new(900.0, 900.0)) },
//!     Marker { id: "unplaced", at: None },
//! ];
//!
//! let view = ViewportBounds::new(100.0, 0.0, 100.0, 0.0);
//! let visible = compute_visible(&markers, Some(view), DEFAULT_BUFFER_RATIO);
//! assert_eq!(visible.len(), 1);
//! assert_eq!(visible[0].id, "transformer");
//!
//! // Without bounds nothing is hidden.
//! assert_eq!(compute_visible(&markers, None, DEFAULT_BUFFER_RATIO).len(), 3);
//! ```
//!
//! Coordinates are planar: `x` runs west to east and `y` runs south to north.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod bounds;
mod cull;

pub use bounds::{BoundsSource, BoundsUnavailable, DEFAULT_BUFFER_RATIO, ViewportBounds};
pub use cull::{
    Placed, compute_visible, compute_visible_from, read_bounds, visible_indices, visit_visible,
};
