// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::load::Dataset;
use crate::model::LatLng;
use crate::organization::organization_landmarks;
use crate::url_state::{EntityKind, SelectedEntity};

/// Mean of `points`, or `None` for an empty slice.
#[must_use]
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() {
        return None;
    }
    let (lat, lng) = points
        .iter()
        .fold((0.0, 0.0), |(lat, lng), p| (lat + p.lat, lng + p.lng));
    let n = points.len() as f64;
    Some(LatLng::new(lat / n, lng / n))
}

/// Zoom used when navigating to an entity of `kind`.
///
/// Regions are framed whole, landmarks with some surrounding context, and
/// organizations at the overview level since their landmarks are scattered.
#[must_use]
pub fn focus_zoom(kind: EntityKind) -> f64 {
    match kind {
        EntityKind::Capability => 1.0,
        EntityKind::Landmark => 2.0,
        EntityKind::Organization => 0.0,
    }
}

/// Where to move the camera to show an entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FocusTarget {
    /// New map center.
    pub center: LatLng,
    /// New zoom level.
    pub zoom: f64,
}

/// Camera target for `selected`.
///
/// Landmarks focus on their coordinates, capabilities on their polygon's
/// centroid and organizations on the centroid of their placed landmarks.
/// Returns `None`, with a warning, when the entity is unknown or has no
/// position.
#[must_use]
pub fn focus_target(dataset: &Dataset, selected: &SelectedEntity) -> Option<FocusTarget> {
    let center = match selected.kind {
        EntityKind::Landmark => dataset
            .landmark(&selected.id)
            .and_then(|lm| lm.coordinates),
        EntityKind::Capability => dataset
            .capability(&selected.id)
            .and_then(|cap| centroid(&cap.polygon_coordinates)),
        EntityKind::Organization => dataset.organization(&selected.id).and_then(|org| {
            let placed: Vec<LatLng> = organization_landmarks(org, dataset.landmarks())
                .into_iter()
                .filter_map(|lm| lm.coordinates)
                .collect();
            centroid(&placed)
        }),
    };
    let Some(center) = center else {
        log::warn!(
            "cannot focus {} `{}`: not found or not placed",
            selected.kind,
            selected.id
        );
        return None;
    };
    Some(FocusTarget {
        center,
        zoom: focus_zoom(selected.kind),
    })
}
