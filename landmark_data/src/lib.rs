// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=landmark_data --heading-base-level=0

//! Landmark Data: the dataset behind the landmark map.
//!
//! - [`model`]: serde types for capabilities, landmarks and organizations,
//!   matching the camelCase JSON files. [`Landmark`] and [`Capability`]
//!   implement [`landmark_cull::Placed`] and
//!   [`landmark_disclosure::Disclosed`], so they feed the filters directly.
//! - [`Dataset`]: the three collections, validated and indexed by id.
//!   Loading fails with a [`DataError`] on malformed records. A landmark
//!   without coordinates is kept and logged.
//! - [`organization_landmarks`] and [`find_organization_for_landmark`]:
//!   attribution by explicit id lists or by organization name.
//! - [`Searcher`]: weighted fuzzy search over names, tags and descriptions.
//! - Tours: [`Dataset::with_tours`] attaches guided tours;
//!   [`stage_target`] and [`stage_highlights`] drive the camera and the
//!   highlighted landmarks stage by stage.
//! - [`UrlState`]: the center, zoom, selection and highlight carried in share
//!   links.
//! - [`focus_target`]: where the camera goes when an entity is selected.
//!
//! Fetching files is left to the host.
//!
//! ## Minimal example
//!
//! ```rust
//! use landmark_cull::{ViewportBounds, compute_visible};
//! use landmark_data::load_landmarks;
//! use landmark_disclosure::compute_disclosed;
//!
//! let landmarks = load_landmarks(
//!     r#"[
//!       { "id": "transformer", "name": "Attention Is All You Need", "type": "paper",
//!         "year": 2017, "organization": "Google Brain", "description": "",
//!         "coordinates": { "lat": 1200, "lng": 800 }, "capabilityId": "attention",
//!         "zoomThreshold": -1 },
//!       { "id": "gpt-2", "name": "GPT-2", "type": "paper", "year": 2019,
//!         "organization": "OpenAI", "description": "",
//!         "coordinates": [1400, 2000], "capabilityId": "generation" }
//!     ]"#,
//! )
//! .unwrap();
//!
//! let disclosed = compute_disclosed(&landmarks, Some(0.0));
//! assert_eq!(disclosed.len(), 1);
//!
//! let view = ViewportBounds::new(1300.0, 1100.0, 900.0, 700.0);
//! let visible = compute_visible(&landmarks, Some(view), 0.2);
//! assert_eq!(visible[0].id, "transformer");
//! ```

pub mod model;

mod error;
mod focus;
mod load;
mod organization;
mod search;
mod tour;
mod url_state;

pub use error::DataError;
pub use focus::{FocusTarget, centroid, focus_target, focus_zoom};
pub use load::{Dataset, load_capabilities, load_landmarks, load_organizations, load_tours};
pub use model::{
    Capability, CapabilityLevel, LatLng, Landmark, LandmarkType, Organization, Tour, TourStage,
};
pub use organization::{
    find_organization_for_landmark, organization_landmarks, organization_matches_landmark,
};
pub use search::{DEFAULT_SEARCH_LIMIT, SearchHit, SearchItem, SearchOptions, Searcher};
pub use tour::{StageHighlights, stage_highlights, stage_target};
pub use url_state::{EntityKind, SelectedEntity, UnknownEntityKind, UrlState};
