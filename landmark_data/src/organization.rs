// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attributing landmarks to organizations.
//!
//! The landmark's `organization` field is free text ("Google Brain",
//! "OpenAI Research", ...), so besides explicit id lists an organization also
//! claims landmarks whose organization text shares a significant word with
//! its name.

use crate::model::{Landmark, Organization};

/// Words too generic to tie a landmark to an organization.
const STOP_WORDS: &[&str] = &[
    "ai",
    "research",
    "lab",
    "labs",
    "team",
    "university",
    "institute",
    "various",
    "center",
    "centre",
    "company",
    "technologies",
    "technology",
];

/// Older datasets listed landmark ids with this prefix.
const LEGACY_PREFIX: &str = "lm-";
const CURRENT_PREFIX: &str = "landmark-";

fn tokens(value: &str) -> Vec<String> {
    value
        .to_lowercase()
        .split(|c: char| !(c.is_ascii_lowercase() || c.is_ascii_digit()))
        .filter(|t| t.len() > 2 && !STOP_WORDS.contains(t))
        .map(str::to_owned)
        .collect()
}

fn matches_by_id(organization: &Organization, landmark: &Landmark) -> bool {
    if organization.landmark_ids.iter().any(|id| *id == landmark.id) {
        return true;
    }
    landmark.id.strip_prefix(CURRENT_PREFIX).is_some_and(|rest| {
        organization
            .landmark_ids
            .iter()
            .any(|id| id.strip_prefix(LEGACY_PREFIX) == Some(rest))
    })
}

fn matches_by_name(organization: &Organization, landmark: &Landmark) -> bool {
    let landmark_org = landmark.organization.trim().to_lowercase();
    if landmark_org.is_empty() {
        return false;
    }
    if organization.name.trim().to_lowercase() == landmark_org {
        return true;
    }
    let org_tokens = tokens(&organization.name);
    let landmark_tokens = tokens(&landmark.organization);
    org_tokens.iter().any(|t| landmark_tokens.contains(t))
}

/// Returns `true` if `organization` claims `landmark`, by id or by name.
#[must_use]
pub fn organization_matches_landmark(organization: &Organization, landmark: &Landmark) -> bool {
    matches_by_id(organization, landmark) || matches_by_name(organization, landmark)
}

/// Landmarks attributed to `organization`, in input order.
#[must_use]
pub fn organization_landmarks<'a>(
    organization: &Organization,
    landmarks: &'a [Landmark],
) -> Vec<&'a Landmark> {
    landmarks
        .iter()
        .filter(|lm| organization_matches_landmark(organization, lm))
        .collect()
}

/// First organization that claims `landmark`.
#[must_use]
pub fn find_organization_for_landmark<'a>(
    organizations: &'a [Organization],
    landmark: &Landmark,
) -> Option<&'a Organization> {
    organizations
        .iter()
        .find(|org| organization_matches_landmark(org, landmark))
}
