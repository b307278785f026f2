// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Size, Vec2};
use landmark_cull::{BoundsSource, BoundsUnavailable, ViewportBounds};
use smallvec::SmallVec;

use crate::widget::{MapEvent, MapWidget, Subscription};

/// Side length of the map canvas in map units.
pub const MAP_EXTENT: f64 = 2600.0;

/// Clamp behavior for panning relative to the map's world bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ClampMode {
    /// Do not apply any clamping; the camera may move freely.
    None,
    /// Never move the view completely off the world bounds.
    #[default]
    KeepSomeVisible,
}

/// Headless pan/zoom camera over the planar landmark map.
///
/// The camera follows the "simple" map projection: at zoom `0` one map unit
/// covers one pixel and every zoom step doubles the scale. Map `y` grows to
/// the north while view `y` grows downward, so the transform flips that
/// axis.
///
/// `MapCamera` implements [`MapWidget`]: every change queues `MoveEnd`
/// and/or `ZoomEnd`, which hosts deliver to listeners via
/// [`MapCamera::drain_events`]. Until [`MapCamera::set_view_size`] has
/// been called the camera has no extent and reports
/// [`BoundsUnavailable::NotReady`].
#[derive(Clone, Debug)]
pub struct MapCamera {
    view_size: Option<Size>,
    world_bounds: Option<Rect>,
    center: Point,
    zoom: f64,
    min_zoom: f64,
    max_zoom: f64,
    clamp_mode: ClampMode,
    world_to_view: Affine,
    view_to_world: Affine,
    listeners: SmallVec<[Subscription; 4]>,
    next_listener: u64,
    queued: SmallVec<[MapEvent; 4]>,
}

impl Default for MapCamera {
    fn default() -> Self {
        Self::new(Rect::new(0.0, 0.0, MAP_EXTENT, MAP_EXTENT))
    }
}

impl MapCamera {
    /// Creates a camera over `world_bounds`, centered on them at zoom `0`.
    ///
    /// Zoom is limited to `[-2, 3]` by default.
    #[must_use]
    pub fn new(world_bounds: Rect) -> Self {
        let mut camera = Self {
            view_size: None,
            world_bounds: Some(world_bounds),
            center: world_bounds.center(),
            zoom: 0.0,
            min_zoom: -2.0,
            max_zoom: 3.0,
            clamp_mode: ClampMode::default(),
            world_to_view: Affine::IDENTITY,
            view_to_world: Affine::IDENTITY,
            listeners: SmallVec::new(),
            next_listener: 0,
            queued: SmallVec::new(),
        };
        camera.rebuild_transforms();
        camera
    }

    /// Size of the widget in pixels, if it has been laid out.
    #[must_use]
    pub fn view_size(&self) -> Option<Size> {
        self.view_size
    }

    /// Sets the widget size in pixels.
    ///
    /// A non-positive size puts the camera back into the not-ready state.
    pub fn set_view_size(&mut self, size: Size) {
        let size = (size.width > 0.0 && size.height > 0.0).then_some(size);
        if self.view_size == size {
            return;
        }
        self.view_size = size;
        self.rebuild_transforms();
        self.clamp_to_bounds();
        self.queue(MapEvent::MoveEnd);
    }

    /// Sets optional world bounds used for clamping and fitting.
    pub fn set_world_bounds(&mut self, bounds: Option<Rect>) {
        if self.world_bounds == bounds {
            return;
        }
        self.world_bounds = bounds;
        if self.clamp_to_bounds() {
            self.queue(MapEvent::MoveEnd);
        }
    }

    /// Returns the current world bounds, if any.
    #[must_use]
    pub fn world_bounds(&self) -> Option<Rect> {
        self.world_bounds
    }

    /// Map point at the center of the view.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Current zoom level.
    #[must_use]
    pub fn zoom_level(&self) -> f64 {
        self.zoom
    }

    /// Pixels per map unit at the current zoom (`2^zoom`).
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.zoom.exp2()
    }

    /// Sets the minimum and maximum zoom levels.
    ///
    /// The range is normalized so that `min <= max`, and the current zoom is
    /// clamped into it.
    pub fn set_zoom_limits(&mut self, min_zoom: f64, max_zoom: f64) {
        let (min_zoom, max_zoom) = if min_zoom <= max_zoom {
            (min_zoom, max_zoom)
        } else {
            (max_zoom, min_zoom)
        };
        self.min_zoom = min_zoom;
        self.max_zoom = max_zoom;
        self.set_zoom(self.zoom);
    }

    /// Current zoom limits as `(min, max)`.
    #[must_use]
    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    /// Sets the clamp mode for panning relative to world bounds.
    pub fn set_clamp_mode(&mut self, mode: ClampMode) {
        if self.clamp_mode != mode {
            self.clamp_mode = mode;
            if self.clamp_to_bounds() {
                self.queue(MapEvent::MoveEnd);
            }
        }
    }

    /// Returns the current clamp mode.
    #[must_use]
    pub fn clamp_mode(&self) -> ClampMode {
        self.clamp_mode
    }

    /// Sets the zoom level around the view center, clamped to the limits.
    pub fn set_zoom(&mut self, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let clamped = zoom.clamp(self.min_zoom, self.max_zoom);
        if (self.zoom - clamped).abs() < f64::EPSILON {
            return;
        }
        self.zoom = clamped;
        self.rebuild_transforms();
        self.clamp_to_bounds();
        self.queue(MapEvent::ZoomEnd);
        self.queue(MapEvent::MoveEnd);
    }

    /// Pans by a delta in view pixels (view `y` grows downward).
    pub fn pan_by(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }
        let scale = self.scale();
        // Dragging content right moves the center west; dragging down moves it north.
        self.center += Vec2::new(-delta.x / scale, delta.y / scale);
        self.rebuild_transforms();
        self.clamp_to_bounds();
        self.queue(MapEvent::MoveEnd);
    }

    /// Changes zoom by `delta` levels while keeping the map point under
    /// `anchor_view` fixed on screen.
    pub fn zoom_about_view_point(&mut self, anchor_view: Point, delta: f64) {
        if !delta.is_finite() || self.view_size.is_none() {
            return;
        }
        let new_zoom = (self.zoom + delta).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let anchor_world = self.view_to_world_point(anchor_view);
        self.zoom = new_zoom;
        self.rebuild_transforms();
        let drift = self.world_to_view_point(anchor_world) - anchor_view;
        let scale = self.scale();
        self.center += Vec2::new(drift.x / scale, -drift.y / scale);
        self.rebuild_transforms();
        self.clamp_to_bounds();
        self.queue(MapEvent::ZoomEnd);
        self.queue(MapEvent::MoveEnd);
    }

    /// Centers the view on `center` at `zoom` in one step.
    pub fn fly_to(&mut self, center: Point, zoom: f64) {
        if !center.x.is_finite() || !center.y.is_finite() || !zoom.is_finite() {
            return;
        }
        let zoom = zoom.clamp(self.min_zoom, self.max_zoom);
        let zoom_changed = (self.zoom - zoom).abs() >= f64::EPSILON;
        let moved = zoom_changed || self.center != center;
        self.zoom = zoom;
        self.center = center;
        self.rebuild_transforms();
        self.clamp_to_bounds();
        if zoom_changed {
            self.queue(MapEvent::ZoomEnd);
        }
        if moved {
            self.queue(MapEvent::MoveEnd);
        }
    }

    /// Centers the view on `center` without changing zoom.
    pub fn center_on(&mut self, center: Point) {
        self.fly_to(center, self.zoom);
    }

    /// Fits the world bounds into the view, preserving aspect ratio.
    ///
    /// No-op without world bounds or before the view has a size.
    pub fn fit_world(&mut self) {
        if let Some(bounds) = self.world_bounds {
            self.fit_rect(bounds);
        }
    }

    /// Fits a map rectangle into the view, preserving aspect ratio.
    pub fn fit_rect(&mut self, rect: Rect) {
        let Some(view) = self.view_size else {
            return;
        };
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return;
        }
        let sx = view.width / rect.width();
        let sy = view.height / rect.height();
        self.fly_to(rect.center(), sx.min(sy).log2());
    }

    /// Rectangle currently visible, in map coordinates.
    ///
    /// Fails with [`BoundsUnavailable::NotReady`] before the view has a size.
    pub fn visible_bounds(&self) -> Result<ViewportBounds, BoundsUnavailable> {
        let size = self.view_size.ok_or(BoundsUnavailable::NotReady)?;
        let rect = self.view_to_world_rect(size.to_rect());
        let bounds = ViewportBounds::from_rect(rect);
        if bounds.is_well_formed() {
            Ok(bounds)
        } else {
            Err(BoundsUnavailable::Degenerate)
        }
    }

    /// Converts a map point into view pixels.
    #[must_use]
    pub fn world_to_view_point(&self, pt: Point) -> Point {
        self.world_to_view * pt
    }

    /// Converts view pixels into a map point.
    #[must_use]
    pub fn view_to_world_point(&self, pt: Point) -> Point {
        self.view_to_world * pt
    }

    /// Converts a view rectangle into map coordinates.
    #[must_use]
    pub fn view_to_world_rect(&self, rect: Rect) -> Rect {
        // Bounding box of the transformed corners; the y flip swaps min/max.
        let q0 = self.view_to_world * Point::new(rect.x0, rect.y0);
        let q1 = self.view_to_world * Point::new(rect.x1, rect.y1);
        Rect::new(q0.x, q0.y, q1.x, q1.y).abs()
    }

    /// Removes and returns the queued notifications for every listener.
    ///
    /// Each queued event is reported once per listener subscribed to it, in
    /// the order the events happened.
    pub fn drain_events(&mut self) -> Vec<Subscription> {
        let mut out = Vec::new();
        for event in self.queued.drain(..) {
            out.extend(self.listeners.iter().copied().filter(|s| s.event() == event));
        }
        out
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn queue(&mut self, event: MapEvent) {
        if !self.queued.contains(&event) {
            self.queued.push(event);
        }
    }

    fn rebuild_transforms(&mut self) {
        let scale = self.scale();
        let half = self
            .view_size
            .map(|s| Vec2::new(s.width * 0.5, s.height * 0.5))
            .unwrap_or(Vec2::ZERO);
        // Map → view: move center to origin, scale with y flipped, then move
        // the origin to the middle of the view.
        self.world_to_view = Affine::translate(half)
            * Affine::scale_non_uniform(scale, -scale)
            * Affine::translate(-self.center.to_vec2());
        self.view_to_world = self.world_to_view.inverse();
    }

    /// Returns `true` if the center moved.
    fn clamp_to_bounds(&mut self) -> bool {
        if self.clamp_mode == ClampMode::None {
            return false;
        }
        let bounds = match self.world_bounds {
            Some(b) if b.width() > 0.0 && b.height() > 0.0 => b,
            _ => return false,
        };
        let Ok(visible) = self.visible_bounds() else {
            return false;
        };
        let visible = visible.to_rect();

        let mut dx = 0.0;
        let mut dy = 0.0;

        if visible.max_x() < bounds.min_x() {
            dx = bounds.min_x() - visible.max_x();
        } else if visible.min_x() > bounds.max_x() {
            dx = bounds.max_x() - visible.min_x();
        }

        if visible.max_y() < bounds.min_y() {
            dy = bounds.min_y() - visible.max_y();
        } else if visible.min_y() > bounds.max_y() {
            dy = bounds.max_y() - visible.min_y();
        }

        if dx != 0.0 || dy != 0.0 {
            self.center += Vec2::new(dx, dy);
            self.rebuild_transforms();
            true
        } else {
            false
        }
    }
}

impl BoundsSource for MapCamera {
    fn viewport_bounds(&self) -> Result<ViewportBounds, BoundsUnavailable> {
        self.visible_bounds()
    }
}

impl MapWidget for MapCamera {
    fn zoom(&self) -> Option<f64> {
        self.view_size.map(|_| self.zoom)
    }

    fn subscribe(&mut self, event: MapEvent) -> Subscription {
        self.next_listener += 1;
        let sub = Subscription::new(event, self.next_listener);
        self.listeners.push(sub);
        sub
    }

    fn unsubscribe(&mut self, subscription: Subscription) {
        self.listeners.retain(|s| *s != subscription);
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Size, Vec2};
    use landmark_cull::BoundsUnavailable;

    use super::{ClampMode, MAP_EXTENT, MapCamera};
    use crate::widget::{MapEvent, MapWidget};

    fn ready_camera() -> MapCamera {
        let mut cam = MapCamera::default();
        cam.set_view_size(Size::new(800.0, 600.0));
        let _ = cam.drain_events();
        cam
    }

    #[test]
    fn not_ready_until_sized() {
        let cam = MapCamera::default();
        assert_eq!(cam.visible_bounds(), Err(BoundsUnavailable::NotReady));
        assert_eq!(cam.zoom(), None);
    }

    #[test]
    fn bounds_match_view_size_at_zoom_zero() {
        let cam = ready_camera();
        let b = cam.visible_bounds().unwrap();
        let c = MAP_EXTENT / 2.0;
        assert!((b.west - (c - 400.0)).abs() < 1e-9);
        assert!((b.east - (c + 400.0)).abs() < 1e-9);
        assert!((b.south - (c - 300.0)).abs() < 1e-9);
        assert!((b.north - (c + 300.0)).abs() < 1e-9);
    }

    #[test]
    fn each_zoom_step_halves_the_extent() {
        let mut cam = ready_camera();
        let before = cam.visible_bounds().unwrap();
        cam.set_zoom(1.0);
        let after = cam.visible_bounds().unwrap();
        assert!((after.width() * 2.0 - before.width()).abs() < 1e-9);
        assert!((after.height() * 2.0 - before.height()).abs() < 1e-9);
    }

    #[test]
    fn view_top_is_map_north() {
        let cam = ready_camera();
        let top = cam.view_to_world_point(Point::new(400.0, 0.0));
        let bottom = cam.view_to_world_point(Point::new(400.0, 600.0));
        assert!(top.y > bottom.y);
        let back = cam.world_to_view_point(top);
        assert!((back.x - 400.0).abs() < 1e-9 && back.y.abs() < 1e-9);
    }

    #[test]
    fn zoom_about_anchor_keeps_anchor_fixed() {
        let mut cam = ready_camera();
        let anchor = Point::new(200.0, 150.0);
        let before = cam.view_to_world_point(anchor);
        cam.zoom_about_view_point(anchor, 1.0);
        let after = cam.view_to_world_point(anchor);
        assert!((after.x - before.x).abs() < 1e-9);
        assert!((after.y - before.y).abs() < 1e-9);
    }

    #[test]
    fn pan_drags_content_with_pointer() {
        let mut cam = ready_camera();
        let c = cam.center();
        cam.pan_by(Vec2::new(100.0, 50.0));
        assert!((cam.center().x - (c.x - 100.0)).abs() < 1e-9);
        assert!((cam.center().y - (c.y + 50.0)).abs() < 1e-9);
    }

    #[test]
    fn clamping_keeps_world_in_view() {
        let mut cam = ready_camera();
        cam.set_clamp_mode(ClampMode::KeepSomeVisible);
        cam.pan_by(Vec2::new(1.0e6, 1.0e6));
        let visible = cam.visible_bounds().unwrap().to_rect();
        let world = Rect::new(0.0, 0.0, MAP_EXTENT, MAP_EXTENT);
        assert!(visible.max_x() >= world.min_x() - 1e-6);
        assert!(visible.min_y() <= world.max_y() + 1e-6);
    }

    #[test]
    fn fit_world_shows_whole_canvas() {
        let mut cam = ready_camera();
        cam.set_view_size(Size::new(1300.0, 1300.0));
        cam.fit_world();
        assert!((cam.zoom_level() + 1.0).abs() < 1e-9);
        let b = cam.visible_bounds().unwrap();
        assert!(b.west <= 1e-9 && b.east >= MAP_EXTENT - 1e-9);
        assert!(b.south <= 1e-9 && b.north >= MAP_EXTENT - 1e-9);
    }

    #[test]
    fn zoom_is_clamped_to_limits() {
        let mut cam = ready_camera();
        cam.set_zoom(42.0);
        assert_eq!(cam.zoom_level(), 3.0);
        cam.set_zoom_limits(1.0, -1.0);
        assert_eq!(cam.zoom_limits(), (-1.0, 1.0));
        assert_eq!(cam.zoom_level(), 1.0);
    }

    #[test]
    fn changes_notify_matching_listeners() {
        let mut cam = ready_camera();
        let moves = cam.subscribe(MapEvent::MoveEnd);
        let zooms = cam.subscribe(MapEvent::ZoomEnd);

        cam.set_zoom(1.0);
        assert_eq!(cam.drain_events(), [zooms, moves]);

        cam.pan_by(Vec2::new(5.0, 0.0));
        assert_eq!(cam.drain_events(), [moves]);

        cam.unsubscribe(moves);
        cam.pan_by(Vec2::new(5.0, 0.0));
        assert!(cam.drain_events().is_empty());
        assert_eq!(cam.listener_count(), 1);
    }
}
