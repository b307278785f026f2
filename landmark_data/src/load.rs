// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parsing and validation of the JSON collections.

use std::sync::Arc;

use hashbrown::HashMap;
use serde::de::DeserializeOwned;

use crate::error::DataError;
use crate::model::{Capability, ExternalLink, Landmark, LandmarkType, Organization, Tour};

const CAPABILITIES: &str = "capabilities";
const LANDMARKS: &str = "landmarks";
const ORGANIZATIONS: &str = "organizations";
const TOURS: &str = "tours";

/// Parses and validates a landmark collection.
///
/// Landmarks without coordinates are kept (they never cull into view) and
/// logged as warnings.
pub fn load_landmarks(json: &str) -> Result<Vec<Landmark>, DataError> {
    let landmarks: Vec<Landmark> = parse(LANDMARKS, json)?;
    check_unique(LANDMARKS, landmarks.iter().map(|l| l.id.as_str()))?;
    for lm in &landmarks {
        validate_landmark(lm)?;
    }
    Ok(landmarks)
}

/// Parses and validates a capability collection.
pub fn load_capabilities(json: &str) -> Result<Vec<Capability>, DataError> {
    let capabilities: Vec<Capability> = parse(CAPABILITIES, json)?;
    check_unique(CAPABILITIES, capabilities.iter().map(|c| c.id.as_str()))?;
    for cap in &capabilities {
        validate_capability(cap)?;
    }
    Ok(capabilities)
}

/// Parses and validates an organization collection.
pub fn load_organizations(json: &str) -> Result<Vec<Organization>, DataError> {
    let organizations: Vec<Organization> = parse(ORGANIZATIONS, json)?;
    check_unique(ORGANIZATIONS, organizations.iter().map(|o| o.id.as_str()))?;
    for org in &organizations {
        validate_organization(org)?;
    }
    Ok(organizations)
}

/// Parses and validates a tour collection.
pub fn load_tours(json: &str) -> Result<Vec<Tour>, DataError> {
    let tours: Vec<Tour> = parse(TOURS, json)?;
    check_unique(TOURS, tours.iter().map(|t| t.id.as_str()))?;
    for tour in &tours {
        validate_tour(tour)?;
    }
    Ok(tours)
}

fn parse<T: DeserializeOwned>(collection: &'static str, json: &str) -> Result<Vec<T>, DataError> {
    serde_json::from_str(json).map_err(|source| DataError::Json { collection, source })
}

fn check_unique<'a>(
    collection: &'static str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), DataError> {
    let mut seen = hashbrown::HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(DataError::DuplicateId {
                collection,
                id: id.to_owned(),
            });
        }
    }
    Ok(())
}

fn validate_landmark(lm: &Landmark) -> Result<(), DataError> {
    if !lm.zoom_threshold.is_finite() {
        return Err(DataError::NonFinite {
            collection: LANDMARKS,
            id: lm.id.clone(),
            field: "zoomThreshold",
        });
    }
    match lm.coordinates {
        None => log::warn!("landmark `{}` has no coordinates; it will never be culled into view", lm.id),
        Some(c) if !c.is_finite() => {
            return Err(DataError::NonFinite {
                collection: LANDMARKS,
                id: lm.id.clone(),
                field: "coordinates",
            });
        }
        Some(_) => {}
    }
    validate_links(&lm.id, &lm.external_links)?;
    if lm.kind == LandmarkType::Model {
        lm.model_metadata()
            .map_err(|source| DataError::InvalidModelMetadata {
                id: lm.id.clone(),
                source,
            })?;
    }
    Ok(())
}

fn validate_links(id: &str, links: &[ExternalLink]) -> Result<(), DataError> {
    match links.iter().find(|link| !is_http_url(&link.url)) {
        Some(link) => Err(DataError::InvalidUrl {
            collection: LANDMARKS,
            id: id.to_owned(),
            url: link.url.clone(),
        }),
        None => Ok(()),
    }
}

fn validate_capability(cap: &Capability) -> Result<(), DataError> {
    let style = &cap.visual_style_hints;
    check_color(CAPABILITIES, &cap.id, "fillColor", &style.fill_color)?;
    check_color(CAPABILITIES, &cap.id, "strokeColor", &style.stroke_color)?;
    if !(0.0..=1.0).contains(&style.fill_opacity) {
        return Err(DataError::InvalidOpacity {
            collection: CAPABILITIES,
            id: cap.id.clone(),
            value: style.fill_opacity,
        });
    }
    if cap.polygon_coordinates.iter().any(|p| !p.is_finite()) {
        return Err(DataError::NonFinite {
            collection: CAPABILITIES,
            id: cap.id.clone(),
            field: "polygonCoordinates",
        });
    }
    Ok(())
}

fn validate_organization(org: &Organization) -> Result<(), DataError> {
    check_color(ORGANIZATIONS, &org.id, "color", &org.color)?;
    for url in [&org.website, &org.logo].into_iter().flatten() {
        if !is_http_url(url) {
            return Err(DataError::InvalidUrl {
                collection: ORGANIZATIONS,
                id: org.id.clone(),
                url: url.clone(),
            });
        }
    }
    Ok(())
}

fn validate_tour(tour: &Tour) -> Result<(), DataError> {
    let non_finite = |field| DataError::NonFinite {
        collection: TOURS,
        id: tour.id.clone(),
        field,
    };
    if !tour.estimated_duration.is_finite() {
        return Err(non_finite("estimatedDuration"));
    }
    for stage in &tour.stages {
        if !stage.map_center.is_finite() {
            return Err(non_finite("mapCenter"));
        }
        if !stage.map_zoom.is_finite() {
            return Err(non_finite("mapZoom"));
        }
    }
    if tour.stages.is_empty() {
        log::warn!("tour `{}` has no stages", tour.id);
    }
    Ok(())
}

fn check_color(
    collection: &'static str,
    id: &str,
    field: &'static str,
    value: &str,
) -> Result<(), DataError> {
    if is_hex_color(value) {
        Ok(())
    } else {
        Err(DataError::InvalidColor {
            collection,
            id: id.to_owned(),
            field,
            value: value.to_owned(),
        })
    }
}

/// Returns `true` for `#RRGGBB` (either case).
pub(crate) fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|b| b.is_ascii_hexdigit()))
}

/// Returns `true` for an absolute `http://` or `https://` URL with a host.
pub(crate) fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|rest| {
        let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
        !host.is_empty() && !host.contains(char::is_whitespace)
    })
}

/// The validated collections, with id lookups.
///
/// Collections are shared via `Arc` so views can hold them without copying;
/// reloading replaces a `Dataset` wholesale. Tours are optional and attached
/// with [`Dataset::with_tours`].
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    capabilities: Arc<[Capability]>,
    landmarks: Arc<[Landmark]>,
    organizations: Arc<[Organization]>,
    tours: Arc<[Tour]>,
    capability_index: HashMap<String, usize>,
    landmark_index: HashMap<String, usize>,
    organization_index: HashMap<String, usize>,
    tour_index: HashMap<String, usize>,
}

impl Dataset {
    /// Builds a dataset from already validated collections.
    #[must_use]
    pub fn new(
        capabilities: Vec<Capability>,
        landmarks: Vec<Landmark>,
        organizations: Vec<Organization>,
    ) -> Self {
        let capability_index = index_by_id(capabilities.iter().map(|c| &c.id));
        let landmark_index = index_by_id(landmarks.iter().map(|l| &l.id));
        let organization_index = index_by_id(organizations.iter().map(|o| &o.id));
        Self {
            capabilities: capabilities.into(),
            landmarks: landmarks.into(),
            organizations: organizations.into(),
            tours: Arc::from([]),
            capability_index,
            landmark_index,
            organization_index,
            tour_index: HashMap::new(),
        }
    }

    /// Attaches `tours`, replacing any already present.
    ///
    /// Stage landmark ids that name no landmark are logged; the stage keeps
    /// them and they simply highlight nothing.
    #[must_use]
    pub fn with_tours(mut self, tours: Vec<Tour>) -> Self {
        for tour in &tours {
            for stage in &tour.stages {
                for id in &stage.landmark_ids {
                    if !self.landmark_index.contains_key(id.as_str()) {
                        log::warn!(
                            "tour `{}` stage {} refers to unknown landmark `{id}`",
                            tour.id,
                            stage.index
                        );
                    }
                }
            }
        }
        self.tour_index = index_by_id(tours.iter().map(|t| &t.id));
        self.tours = tours.into();
        self
    }

    /// Parses and validates all three collections.
    pub fn from_json_strs(
        capabilities: &str,
        landmarks: &str,
        organizations: &str,
    ) -> Result<Self, DataError> {
        let dataset = Self::new(
            load_capabilities(capabilities)?,
            load_landmarks(landmarks)?,
            load_organizations(organizations)?,
        );
        log::debug!(
            "loaded {} capabilities, {} landmarks, {} organizations",
            dataset.capabilities.len(),
            dataset.landmarks.len(),
            dataset.organizations.len()
        );
        Ok(dataset)
    }

    /// All capabilities in file order.
    #[must_use]
    pub fn capabilities(&self) -> &Arc<[Capability]> {
        &self.capabilities
    }

    /// All landmarks in file order.
    #[must_use]
    pub fn landmarks(&self) -> &Arc<[Landmark]> {
        &self.landmarks
    }

    /// All organizations in file order.
    #[must_use]
    pub fn organizations(&self) -> &Arc<[Organization]> {
        &self.organizations
    }

    /// All tours in file order.
    #[must_use]
    pub fn tours(&self) -> &Arc<[Tour]> {
        &self.tours
    }

    /// Looks up a tour by id.
    #[must_use]
    pub fn tour(&self, id: &str) -> Option<&Tour> {
        self.tour_index.get(id).map(|&i| &self.tours[i])
    }

    /// Looks up a capability by id.
    #[must_use]
    pub fn capability(&self, id: &str) -> Option<&Capability> {
        self.capability_index.get(id).map(|&i| &self.capabilities[i])
    }

    /// Looks up a landmark by id.
    #[must_use]
    pub fn landmark(&self, id: &str) -> Option<&Landmark> {
        self.landmark_index.get(id).map(|&i| &self.landmarks[i])
    }

    /// Looks up an organization by id.
    #[must_use]
    pub fn organization(&self, id: &str) -> Option<&Organization> {
        self.organization_index.get(id).map(|&i| &self.organizations[i])
    }
}

fn index_by_id<'a>(ids: impl Iterator<Item = &'a String>) -> HashMap<String, usize> {
    let mut index = HashMap::new();
    for (i, id) in ids.enumerate() {
        // First record wins, matching linear search.
        index.entry(id.clone()).or_insert(i);
    }
    index
}

#[cfg(test)]
mod tests {
    use super::{is_hex_color, is_http_url};

    #[test]
    fn hex_colors() {
        assert!(is_hex_color("#a1B2c3"));
        assert!(!is_hex_color("a1b2c3"));
        assert!(!is_hex_color("#abc"));
        assert!(!is_hex_color("#gggggg"));
        assert!(!is_hex_color("#a1b2c3d4"));
    }

    #[test]
    fn http_urls() {
        assert!(is_http_url("https://arxiv.org/abs/1706.03762"));
        assert!(is_http_url("http://example.com"));
        assert!(!is_http_url("https://"));
        assert!(!is_http_url("ftp://example.com"));
        assert!(!is_http_url("example.com"));
        assert!(!is_http_url("https://exa mple.com"));
    }
}
