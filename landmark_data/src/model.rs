// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Serde model of the three JSON collections.

use kurbo::Point;
use landmark_cull::Placed;
use landmark_disclosure::Disclosed;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::focus::centroid;

/// Zoom threshold a landmark gets when its record does not carry one.
pub const DEFAULT_ZOOM_THRESHOLD: f64 = 1.0;

/// A position on the map canvas.
///
/// Despite the names this is a planar grid, not geography. JSON may spell it
/// as `{"lat": .., "lng": ..}` or as a `[lat, lng]` pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "LatLngRepr")]
pub struct LatLng {
    /// North-south axis.
    pub lat: f64,
    /// East-west axis.
    pub lng: f64,
}

impl LatLng {
    /// Creates a position.
    #[must_use]
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Canvas point with `x = lng` and `y = lat`.
    #[must_use]
    pub fn to_point(self) -> Point {
        Point::new(self.lng, self.lat)
    }

    /// Inverse of [`LatLng::to_point`].
    #[must_use]
    pub fn from_point(pt: Point) -> Self {
        Self::new(pt.y, pt.x)
    }

    /// Returns `true` if both components are finite.
    #[must_use]
    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LatLngRepr {
    Object { lat: f64, lng: f64 },
    Pair(f64, f64),
}

impl From<LatLngRepr> for LatLng {
    fn from(repr: LatLngRepr) -> Self {
        match repr {
            LatLngRepr::Object { lat, lng } | LatLngRepr::Pair(lat, lng) => Self::new(lat, lng),
        }
    }
}

/// Kind of research artifact a landmark stands for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkType {
    /// A publication.
    Paper,
    /// A trained model.
    Model,
    /// Software tooling.
    Tool,
    /// An evaluation suite.
    Benchmark,
}

/// What an [`ExternalLink`] points at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkKind {
    /// arXiv abstract page.
    Arxiv,
    /// Source repository.
    Github,
    /// Publisher page or PDF.
    Paper,
    /// Model card.
    ModelCard,
    /// Project or company site.
    Website,
    /// Anything else.
    Other,
}

/// A labeled outbound link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalLink {
    /// Link category.
    #[serde(rename = "type")]
    pub kind: LinkKind,
    /// Absolute `http(s)` URL.
    pub url: String,
    /// Display text.
    pub label: String,
}

/// A paper, model, tool or benchmark plotted as a marker.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Landmark {
    /// Stable unique id.
    pub id: String,
    /// Display title.
    pub name: String,
    /// Artifact kind.
    #[serde(rename = "type")]
    pub kind: LandmarkType,
    /// Publication or release year.
    pub year: i32,
    /// Free-form name of the originating organization.
    pub organization: String,
    /// Author names, for papers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub authors: Option<Vec<String>>,
    /// One or two sentence summary.
    pub description: String,
    /// Full abstract.
    #[serde(rename = "abstract", default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    /// Outbound links.
    #[serde(default)]
    pub external_links: Vec<ExternalLink>,
    /// Marker position. Malformed records may lack it; such landmarks are
    /// never culled into view.
    #[serde(default)]
    pub coordinates: Option<LatLng>,
    /// Capability region the landmark sits in.
    pub capability_id: String,
    /// Ids of related landmarks.
    #[serde(default)]
    pub related_landmarks: Vec<String>,
    /// Search keywords.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Custom icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Type-specific metadata, see [`Landmark::model_metadata`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
    /// Lowest zoom at which the landmark is disclosed.
    #[serde(default = "default_zoom_threshold")]
    pub zoom_threshold: f64,
}

fn default_zoom_threshold() -> f64 {
    DEFAULT_ZOOM_THRESHOLD
}

impl Landmark {
    /// Decodes [`Landmark::metadata`] as [`ModelMetadata`].
    ///
    /// Missing metadata decodes as JSON `null`, which fails.
    pub fn model_metadata(&self) -> Result<ModelMetadata, serde_json::Error> {
        let value = self
            .metadata
            .as_ref()
            .map_or(Value::Null, |m| Value::Object(m.clone()));
        serde_json::from_value(value)
    }
}

impl Placed for Landmark {
    fn coordinate(&self) -> Option<Point> {
        self.coordinates.map(LatLng::to_point)
    }
}

impl Disclosed for Landmark {
    fn reveal_threshold(&self) -> Option<f64> {
        Some(self.zoom_threshold)
    }
}

/// Metadata every `model` landmark must carry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    /// Parameter count, e.g. `"175B"`.
    pub parameters: String,
    /// Architecture family.
    pub architecture: String,
    /// Training recipe.
    pub training_method: String,
    /// Advertised capabilities.
    pub capabilities: Vec<String>,
    /// ISO release date.
    pub release_date: String,
    /// License name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    /// Id of the base model for fine-tunes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_model: Option<String>,
}

/// Nesting level of a capability region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapabilityLevel {
    /// Broadest areas, always shown.
    Continent,
    /// Sub-areas.
    Archipelago,
    /// Focused topics.
    Island,
    /// Bridges between regions.
    Strait,
}

impl CapabilityLevel {
    /// Zoom at which regions of this level appear; `None` means always.
    #[must_use]
    pub fn reveal_zoom(self) -> Option<f64> {
        match self {
            Self::Continent => None,
            Self::Archipelago => Some(1.0),
            Self::Island | Self::Strait => Some(2.0),
        }
    }
}

/// Fill pattern of a capability region.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FillPattern {
    /// Flat fill.
    Solid,
    /// Dotted fill.
    Dots,
    /// Striped fill.
    Stripes,
}

/// Rendering hints for a capability polygon.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualStyle {
    /// `#RRGGBB`.
    pub fill_color: String,
    /// In `[0, 1]`.
    pub fill_opacity: f64,
    /// `#RRGGBB`.
    pub stroke_color: String,
    /// Stroke width in pixels.
    pub stroke_weight: f64,
    /// Optional fill pattern.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<FillPattern>,
}

/// A research area drawn as a polygon region.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    /// Stable unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Long description.
    pub description: String,
    /// Tooltip text.
    pub short_description: String,
    /// Nesting level; drives disclosure.
    pub level: CapabilityLevel,
    /// Region outline.
    pub polygon_coordinates: Vec<LatLng>,
    /// Styling.
    pub visual_style_hints: VisualStyle,
    /// Ids of landmarks inside the region.
    #[serde(default)]
    pub related_landmarks: Vec<String>,
    /// Enclosing region, if nested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_capability_id: Option<String>,
    /// Authored minimum zoom, kept for round-tripping.
    pub zoom_threshold: f64,
}

impl Placed for Capability {
    fn coordinate(&self) -> Option<Point> {
        centroid(&self.polygon_coordinates).map(LatLng::to_point)
    }
}

impl Disclosed for Capability {
    fn reveal_threshold(&self) -> Option<f64> {
        self.level.reveal_zoom()
    }
}

/// A lab or company.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    /// Stable unique id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Overview.
    pub description: String,
    /// Homepage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    /// Landmarks explicitly attributed to the organization.
    #[serde(default)]
    pub landmark_ids: Vec<String>,
    /// Highlight color, `#RRGGBB`.
    pub color: String,
    /// Logo URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

/// How much background a tour assumes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TourDifficulty {
    /// No prior knowledge.
    Beginner,
    /// Familiar with the basics.
    Intermediate,
    /// Reads papers.
    Advanced,
}

/// One step of a guided tour: a camera position plus the landmarks it
/// talks about.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TourStage {
    /// Position within the tour, starting at 0.
    pub index: usize,
    /// Stage title.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Landmarks highlighted while the stage is active.
    #[serde(default)]
    pub landmark_ids: Vec<String>,
    /// Where the camera flies to.
    pub map_center: LatLng,
    /// Zoom the camera flies to.
    pub map_zoom: f64,
    /// Text shown alongside the stage.
    pub narration: String,
}

/// A guided walk through related landmarks, e.g. "GPT Evolution".
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tour {
    /// Stable unique id.
    pub id: String,
    /// Display title.
    pub title: String,
    /// What the tour covers.
    pub description: String,
    /// Stages in presentation order.
    pub stages: Vec<TourStage>,
    /// Expected length in minutes.
    pub estimated_duration: f64,
    /// Intended audience.
    pub difficulty: TourDifficulty,
    /// Keywords.
    #[serde(default)]
    pub tags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::{Capability, CapabilityLevel, Landmark, LatLng};
    use landmark_cull::Placed;
    use landmark_disclosure::Disclosed;

    #[test]
    fn lat_lng_accepts_object_and_pair() {
        let a: LatLng = serde_json::from_str(r#"{"lat": 1.5, "lng": -2}"#).unwrap();
        let b: LatLng = serde_json::from_str("[1.5, -2]").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_point().x, -2.0);
        assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"lat":1.5,"lng":-2.0}"#);
    }

    #[test]
    fn landmark_defaults() {
        let lm: Landmark = serde_json::from_str(
            r#"{
                "id": "lm-1", "name": "Paper", "type": "paper", "year": 2017,
                "organization": "Google", "description": "d", "capabilityId": "cap"
            }"#,
        )
        .unwrap();
        assert_eq!(lm.zoom_threshold, 1.0);
        assert_eq!(lm.reveal_threshold(), Some(1.0));
        assert_eq!(lm.coordinate(), None);
        assert!(lm.external_links.is_empty());
        assert!(lm.model_metadata().is_err());
    }

    #[test]
    fn capability_levels_reveal_in_steps() {
        assert_eq!(CapabilityLevel::Continent.reveal_zoom(), None);
        assert_eq!(CapabilityLevel::Archipelago.reveal_zoom(), Some(1.0));
        assert_eq!(CapabilityLevel::Island.reveal_zoom(), Some(2.0));
        assert_eq!(CapabilityLevel::Strait.reveal_zoom(), Some(2.0));
    }

    #[test]
    fn capability_is_placed_at_its_centroid() {
        let cap: Capability = serde_json::from_str(
            r##"{
                "id": "c", "name": "C", "description": "", "shortDescription": "",
                "level": "island",
                "polygonCoordinates": [[0, 0], [0, 10], [10, 10], [10, 0]],
                "visualStyleHints": {
                    "fillColor": "#112233", "fillOpacity": 0.5,
                    "strokeColor": "#445566", "strokeWeight": 2
                },
                "zoomThreshold": 2
            }"##,
        )
        .unwrap();
        assert_eq!(cap.coordinate(), Some(kurbo::Point::new(5.0, 5.0)));
        assert_eq!(cap.reveal_threshold(), Some(2.0));
    }
}
