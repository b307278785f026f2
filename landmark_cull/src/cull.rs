// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

use kurbo::Point;

use crate::bounds::{BoundsSource, ViewportBounds};

/// An entity with an optional position on the map.
///
/// `x` runs west to east and `y` runs south to north. Entities that return
/// `None` cannot be placed and are never reported as visible.
pub trait Placed {
    /// Position of the entity, if it has one.
    fn coordinate(&self) -> Option<Point>;
}

impl Placed for Point {
    fn coordinate(&self) -> Option<Point> {
        Some(*self)
    }
}

impl Placed for Option<Point> {
    fn coordinate(&self) -> Option<Point> {
        *self
    }
}

impl<P: Placed + ?Sized> Placed for &P {
    fn coordinate(&self) -> Option<Point> {
        (**self).coordinate()
    }
}

/// Visits every entity that should be rendered for the given viewport.
///
/// `f` receives the index into `entities` and the entity itself, in input
/// order. With `bounds == None` every entity is visited, including those
/// without a coordinate. Bounds that are inverted or not finite are treated
/// the same way. Otherwise the bounds are grown by `buffer_ratio` (see
/// [`ViewportBounds::buffered`]) and only entities whose coordinate lies
/// inside or on the edge of the grown rectangle are visited.
///
/// This is a single pass over `entities` and does not allocate.
///
/// ```rust
/// use kurbo::Point;
/// use landmark_cull::{ViewportBounds, visit_visible};
///
/// let entities = [Point::new(10.0, 10.0), Point::new(500.0, 500.0)];
/// let mut hits: Vec<&Point> = Vec::new();
/// visit_visible(&entities, Some(ViewportBounds::new(100.0, 0.0, 100.0, 0.0)), 0.2, |_, e| {
///     hits.push(e);
/// });
/// assert_eq!(hits, [&entities[0]]);
/// ```
pub fn visit_visible<'a, E, F>(
    entities: &'a [E],
    bounds: Option<ViewportBounds>,
    buffer_ratio: f64,
    mut f: F,
) where
    E: Placed,
    F: FnMut(usize, &'a E),
{
    let bounds = match bounds {
        Some(b) if b.is_well_formed() => Some(b),
        Some(b) => {
            log::warn!("ignoring degenerate viewport bounds {b:?}; showing all entities");
            None
        }
        None => None,
    };
    let Some(bounds) = bounds else {
        for (i, e) in entities.iter().enumerate() {
            f(i, e);
        }
        return;
    };

    let expanded = bounds.buffered(buffer_ratio);
    for (i, e) in entities.iter().enumerate() {
        if let Some(pt) = e.coordinate()
            && expanded.contains(pt)
        {
            f(i, e);
        }
    }
}

/// Returns the entities that should be rendered for the given viewport.
///
/// The returned references point into `entities`; nothing is cloned and the
/// relative order of the input is preserved.
///
/// - `bounds == None`: the viewport is unknown, so every entity is returned.
/// - Otherwise: entities inside the bounds grown by `buffer_ratio` on every
///   side are returned. Edges are inclusive, and entities without a
///   coordinate are skipped.
///
/// ```rust
/// use kurbo::Point;
/// use landmark_cull::{ViewportBounds, compute_visible};
///
/// let entities = [
///     Point::new(0.0, -20.0),  // exactly on the buffer edge
///     Point::new(0.0, -20.01), // just past it
///     Point::new(50.0, 50.0),
/// ];
/// let bounds = ViewportBounds::new(100.0, 0.0, 100.0, 0.0);
/// let visible = compute_visible(&entities, Some(bounds), 0.2);
/// assert_eq!(visible, [&entities[0], &entities[2]]);
/// ```
#[must_use]
pub fn compute_visible<E: Placed>(
    entities: &[E],
    bounds: Option<ViewportBounds>,
    buffer_ratio: f64,
) -> Vec<&E> {
    let mut out = Vec::new();
    visit_visible(entities, bounds, buffer_ratio, |_, e| out.push(e));
    out
}

/// Same selection as [`compute_visible`], expressed as indices into `entities`.
#[must_use]
pub fn visible_indices<E: Placed>(
    entities: &[E],
    bounds: Option<ViewportBounds>,
    buffer_ratio: f64,
) -> Vec<usize> {
    let mut out = Vec::new();
    visit_visible(entities, bounds, buffer_ratio, |i, _| out.push(i));
    out
}

/// Reads the viewport from `source`, falling back to "unavailable" on error.
///
/// A missing source and a failing source both yield `None`; failures are
/// logged as warnings.
#[must_use]
pub fn read_bounds<S: BoundsSource + ?Sized>(source: Option<&S>) -> Option<ViewportBounds> {
    let source = source?;
    match source.viewport_bounds() {
        Ok(bounds) if bounds.is_well_formed() => Some(bounds),
        Ok(bounds) => {
            log::warn!("ignoring degenerate viewport bounds {bounds:?}; showing all entities");
            None
        }
        Err(err) => {
            log::warn!("could not read viewport bounds: {err}; showing all entities");
            None
        }
    }
}

/// Culls `entities` against whatever viewport `source` reports.
///
/// This never fails: if there is no source, or the source cannot report its
/// bounds, every entity is returned.
#[must_use]
pub fn compute_visible_from<'a, E, S>(
    entities: &'a [E],
    source: Option<&S>,
    buffer_ratio: f64,
) -> Vec<&'a E>
where
    E: Placed,
    S: BoundsSource + ?Sized,
{
    compute_visible(entities, read_bounds(source), buffer_ratio)
}
