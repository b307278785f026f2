// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use hashbrown::HashSet;

use crate::focus::FocusTarget;
use crate::model::Tour;

/// Camera target for stage `stage` of `tour`, or `None` past the last stage.
#[must_use]
pub fn stage_target(tour: &Tour, stage: usize) -> Option<FocusTarget> {
    let stage = tour.stages.get(stage)?;
    Some(FocusTarget {
        center: stage.map_center,
        zoom: stage.map_zoom,
    })
}

/// Landmark ids to emphasize while a tour stage is active.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StageHighlights<'a> {
    /// Landmarks of the active stage.
    pub current: &'a [String],
    /// Landmarks of the stage just before, empty on the first stage.
    pub previous: &'a [String],
    /// Landmarks of every later stage, each once, in first-seen order.
    pub upcoming: Vec<&'a str>,
}

/// Highlight sets for stage `stage` of `tour`, or `None` past the last stage.
#[must_use]
pub fn stage_highlights(tour: &Tour, stage: usize) -> Option<StageHighlights<'_>> {
    let current = &tour.stages.get(stage)?.landmark_ids;
    let previous = stage
        .checked_sub(1)
        .and_then(|i| tour.stages.get(i))
        .map_or(&[][..], |s| &s.landmark_ids[..]);

    let mut seen = HashSet::new();
    let upcoming = tour.stages[stage + 1..]
        .iter()
        .flat_map(|s| &s.landmark_ids)
        .map(String::as_str)
        .filter(|id| seen.insert(*id))
        .collect();

    Some(StageHighlights {
        current,
        previous,
        upcoming,
    })
}
