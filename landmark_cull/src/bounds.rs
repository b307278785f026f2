// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use kurbo::{Point, Rect};

/// Fraction of the viewport width/height kept around the visible rectangle.
///
/// Entities inside the expanded rectangle stay mounted so they do not pop in
/// while the map is being panned.
pub const DEFAULT_BUFFER_RATIO: f64 = 0.2;

/// Axis-aligned viewport rectangle in map coordinates.
///
/// The map uses a planar grid rather than real geography: `north`/`south`
/// bound the `y` axis and `east`/`west` bound the `x` axis. A well-formed
/// rectangle has `north >= south` and `east >= west`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportBounds {
    /// Largest `y` value in view.
    pub north: f64,
    /// Smallest `y` value in view.
    pub south: f64,
    /// Largest `x` value in view.
    pub east: f64,
    /// Smallest `x` value in view.
    pub west: f64,
}

impl ViewportBounds {
    /// Creates bounds from the four edges.
    #[must_use]
    pub const fn new(north: f64, south: f64, east: f64, west: f64) -> Self {
        Self {
            north,
            south,
            east,
            west,
        }
    }

    /// Creates bounds from the south-west and north-east corners.
    ///
    /// This matches how map widgets usually report their extent.
    #[must_use]
    pub fn from_corners(south_west: Point, north_east: Point) -> Self {
        Self::new(north_east.y, south_west.y, north_east.x, south_west.x)
    }

    /// Extent along the `x` axis (`east - west`).
    #[must_use]
    pub fn width(&self) -> f64 {
        self.east - self.west
    }

    /// Extent along the `y` axis (`north - south`).
    #[must_use]
    pub fn height(&self) -> f64 {
        self.north - self.south
    }

    /// Returns `true` if all edges are finite and the rectangle is not inverted.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.north.is_finite()
            && self.south.is_finite()
            && self.east.is_finite()
            && self.west.is_finite()
            && self.north >= self.south
            && self.east >= self.west
    }

    /// Returns these bounds grown by `ratio` of their own height and width on
    /// every side.
    ///
    /// A ratio of `0.2` on a `100 x 100` rectangle yields a `140 x 140`
    /// rectangle sharing the same center. Negative or non-finite ratios are
    /// treated as `0.0`.
    #[must_use]
    pub fn buffered(&self, ratio: f64) -> Self {
        let ratio = sanitize_ratio(ratio);
        let lat_buffer = self.height() * ratio;
        let lng_buffer = self.width() * ratio;
        Self {
            north: self.north + lat_buffer,
            south: self.south - lat_buffer,
            east: self.east + lng_buffer,
            west: self.west - lng_buffer,
        }
    }

    /// Returns `true` if `pt` lies inside the rectangle or on any of its edges.
    ///
    /// Unlike [`Rect::contains`], which excludes the maximum edges, this test
    /// is inclusive on all four sides.
    #[inline]
    #[must_use]
    pub fn contains(&self, pt: Point) -> bool {
        pt.y >= self.south && pt.y <= self.north && pt.x >= self.west && pt.x <= self.east
    }

    /// Returns the same rectangle as a [`Rect`] (`x0 = west`, `y0 = south`).
    #[must_use]
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.west, self.south, self.east, self.north)
    }

    /// Creates bounds from a [`Rect`], normalizing inverted rectangles.
    #[must_use]
    pub fn from_rect(rect: Rect) -> Self {
        let rect = rect.abs();
        Self::new(rect.y1, rect.y0, rect.x1, rect.x0)
    }
}

impl From<Rect> for ViewportBounds {
    fn from(rect: Rect) -> Self {
        Self::from_rect(rect)
    }
}

impl From<ViewportBounds> for Rect {
    fn from(bounds: ViewportBounds) -> Self {
        bounds.to_rect()
    }
}

pub(crate) fn sanitize_ratio(ratio: f64) -> f64 {
    if ratio.is_finite() && ratio > 0.0 {
        ratio
    } else {
        0.0
    }
}

/// Reason a [`BoundsSource`] could not report its viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoundsUnavailable {
    /// The widget has not been laid out or initialized yet.
    NotReady,
    /// The widget reported an inverted or non-finite rectangle.
    Degenerate,
    /// The widget failed while computing its bounds.
    Widget(&'static str),
}

impl fmt::Display for BoundsUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotReady => f.write_str("map viewport is not ready"),
            Self::Degenerate => f.write_str("map viewport bounds are degenerate"),
            Self::Widget(reason) => write!(f, "map widget failed to report bounds: {reason}"),
        }
    }
}

impl core::error::Error for BoundsUnavailable {}

/// Anything that can report the current viewport rectangle.
///
/// Map widgets implement this. Reading bounds may fail while the widget is
/// still initializing; callers in this crate treat every failure as "bounds
/// unavailable" and fall back to showing everything.
pub trait BoundsSource {
    /// Returns the rectangle currently visible in the widget.
    fn viewport_bounds(&self) -> Result<ViewportBounds, BoundsUnavailable>;
}

impl<S: BoundsSource + ?Sized> BoundsSource for &S {
    fn viewport_bounds(&self) -> Result<ViewportBounds, BoundsUnavailable> {
        (**self).viewport_bounds()
    }
}

impl BoundsSource for ViewportBounds {
    fn viewport_bounds(&self) -> Result<ViewportBounds, BoundsUnavailable> {
        if self.is_well_formed() {
            Ok(*self)
        } else {
            Err(BoundsUnavailable::Degenerate)
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{BoundsSource, BoundsUnavailable, ViewportBounds};

    #[test]
    fn buffered_grows_every_side_by_ratio() {
        let b = ViewportBounds::new(100.0, 0.0, 100.0, 0.0).buffered(0.2);
        assert_eq!(b, ViewportBounds::new(120.0, -20.0, 120.0, -20.0));
    }

    #[test]
    fn buffered_uses_each_axis_extent() {
        let b = ViewportBounds::new(50.0, 0.0, 200.0, 0.0).buffered(0.1);
        assert!((b.north - 55.0).abs() < 1e-9);
        assert!((b.south + 5.0).abs() < 1e-9);
        assert!((b.east - 220.0).abs() < 1e-9);
        assert!((b.west + 20.0).abs() < 1e-9);
    }

    #[test]
    fn negative_or_nan_ratio_is_ignored() {
        let b = ViewportBounds::new(10.0, 0.0, 10.0, 0.0);
        assert_eq!(b.buffered(-1.0), b);
        assert_eq!(b.buffered(f64::NAN), b);
    }

    #[test]
    fn contains_is_inclusive_on_all_edges() {
        let b = ViewportBounds::new(10.0, 0.0, 10.0, 0.0);
        for pt in [
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(10.0, 0.0),
            Point::new(5.0, 5.0),
        ] {
            assert!(b.contains(pt), "{pt:?} should be inside");
        }
        assert!(!b.contains(Point::new(10.000_001, 5.0)));
        assert!(!b.contains(Point::new(5.0, -0.000_001)));
        // Rect::contains excludes the max edges; make sure we do not.
        assert!(!b.to_rect().contains(Point::new(10.0, 10.0)));
    }

    #[test]
    fn rect_roundtrip_keeps_axes() {
        let b = ViewportBounds::from_corners(Point::new(-5.0, 1.0), Point::new(7.0, 9.0));
        assert_eq!(b, ViewportBounds::new(9.0, 1.0, 7.0, -5.0));
        let r: Rect = b.into();
        assert_eq!(r, Rect::new(-5.0, 1.0, 7.0, 9.0));
        assert_eq!(ViewportBounds::from(Rect::new(7.0, 9.0, -5.0, 1.0)), b);
    }

    #[test]
    fn inverted_bounds_are_reported_as_degenerate() {
        let b = ViewportBounds::new(0.0, 10.0, 10.0, 0.0);
        assert!(!b.is_well_formed());
        assert_eq!(b.viewport_bounds(), Err(BoundsUnavailable::Degenerate));
    }
}
