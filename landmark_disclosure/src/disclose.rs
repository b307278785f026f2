// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;

/// An entity that only appears once the map is zoomed in far enough.
pub trait Disclosed {
    /// Lowest zoom level at which the entity is shown.
    ///
    /// `None` (and `NaN`) mean the entity is shown at every zoom level.
    fn reveal_threshold(&self) -> Option<f64>;
}

impl Disclosed for f64 {
    fn reveal_threshold(&self) -> Option<f64> {
        Some(*self)
    }
}

impl Disclosed for Option<f64> {
    fn reveal_threshold(&self) -> Option<f64> {
        *self
    }
}

impl<D: Disclosed + ?Sized> Disclosed for &D {
    fn reveal_threshold(&self) -> Option<f64> {
        (**self).reveal_threshold()
    }
}

/// Returns `true` if something with `threshold` is shown at `zoom`.
///
/// The comparison is inclusive: at a zoom exactly equal to the threshold the
/// entity is shown. A missing or `NaN` threshold is always shown, and so is
/// everything when the zoom itself is missing or `NaN`.
#[inline]
#[must_use]
pub fn is_disclosed(threshold: Option<f64>, zoom: Option<f64>) -> bool {
    match (threshold, zoom) {
        (Some(t), Some(z)) if !t.is_nan() && !z.is_nan() => t <= z,
        _ => true,
    }
}

/// Visits the entities shown at `current_zoom`, in input order.
pub fn visit_disclosed<'a, E, F>(entities: &'a [E], current_zoom: Option<f64>, mut f: F)
where
    E: Disclosed,
    F: FnMut(usize, &'a E),
{
    for (i, e) in entities.iter().enumerate() {
        if is_disclosed(e.reveal_threshold(), current_zoom) {
            f(i, e);
        }
    }
}

/// Returns the entities shown at `current_zoom`.
///
/// The result borrows from `entities` and keeps their relative order. The
/// function is pure: the same inputs always give the same output.
///
/// ```rust
/// use landmark_disclosure::compute_disclosed;
///
/// let thresholds = [-1.0, 0.0, 1.0, -1.0];
/// assert_eq!(compute_disclosed(&thresholds, Some(-1.0)).len(), 2);
/// assert_eq!(compute_disclosed(&thresholds, Some(0.0)).len(), 3);
/// assert_eq!(compute_disclosed(&thresholds, Some(0.99)).len(), 3);
/// assert_eq!(compute_disclosed(&thresholds, Some(1.0)).len(), 4);
/// ```
#[must_use]
pub fn compute_disclosed<E: Disclosed>(entities: &[E], current_zoom: Option<f64>) -> Vec<&E> {
    let mut out = Vec::new();
    visit_disclosed(entities, current_zoom, |_, e| out.push(e));
    out
}

/// Same selection as [`compute_disclosed`], expressed as indices into `entities`.
#[must_use]
pub fn disclosed_indices<E: Disclosed>(entities: &[E], current_zoom: Option<f64>) -> Vec<usize> {
    let mut out = Vec::new();
    visit_disclosed(entities, current_zoom, |i, _| out.push(i));
    out
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::{compute_disclosed, disclosed_indices, is_disclosed, visit_disclosed};

    #[test]
    fn comparison_is_inclusive() {
        assert!(is_disclosed(Some(0.0), Some(0.0)));
        assert!(is_disclosed(Some(-1.0), Some(-1.0)));
        assert!(!is_disclosed(Some(1.0), Some(0.999)));
    }

    #[test]
    fn missing_values_are_permissive() {
        assert!(is_disclosed(None, Some(-100.0)));
        assert!(is_disclosed(Some(f64::NAN), Some(-100.0)));
        assert!(is_disclosed(Some(10.0), None));
        assert!(is_disclosed(Some(10.0), Some(f64::NAN)));
    }

    #[test]
    fn infinities_compare_normally() {
        assert!(is_disclosed(Some(f64::NEG_INFINITY), Some(-1e300)));
        assert!(!is_disclosed(Some(f64::INFINITY), Some(1e300)));
    }

    #[test]
    fn unthresholded_entities_are_always_shown() {
        let entities = [None, Some(5.0), None];
        assert_eq!(disclosed_indices(&entities, Some(0.0)), [0, 2]);
        assert_eq!(compute_disclosed(&entities, Some(5.0)).len(), 3);
    }

    #[test]
    fn fractional_zoom_uses_plain_comparison() {
        let entities = [1.0, 2.0, 1.99];
        assert_eq!(disclosed_indices(&entities, Some(1.99)), [0, 2]);
    }

    #[test]
    fn visit_can_collect_references() {
        let entities = [0.0, 3.0, -1.0];
        let mut kept: Vec<&f64> = Vec::new();
        visit_disclosed(&entities, Some(0.0), |_, e| kept.push(e));
        assert_eq!(kept.len(), 2);
        assert!(core::ptr::eq(kept[0], &entities[0]));
        assert!(core::ptr::eq(kept[1], &entities[2]));
    }
}
