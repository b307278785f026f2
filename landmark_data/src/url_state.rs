// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Map state carried in a share link's query string.
//!
//! Parameters: `lat`, `lng` (two decimals), `zoom` (integer), `entity` plus
//! `entityType`, and `org`. Parsing is lenient: unknown keys and malformed
//! values are skipped rather than reported.

use core::fmt;
use core::str::FromStr;
use std::borrow::Cow;

use crate::model::LatLng;

/// The kind of entity a link can select.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A capability region.
    Capability,
    /// A single landmark.
    Landmark,
    /// An organization.
    Organization,
}

impl EntityKind {
    /// Query-string spelling.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Capability => "capability",
            Self::Landmark => "landmark",
            Self::Organization => "organization",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown [`EntityKind`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownEntityKind;

impl fmt::Display for UnknownEntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("expected one of capability, landmark, organization")
    }
}

impl core::error::Error for UnknownEntityKind {}

impl FromStr for EntityKind {
    type Err = UnknownEntityKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "capability" => Ok(Self::Capability),
            "landmark" => Ok(Self::Landmark),
            "organization" => Ok(Self::Organization),
            _ => Err(UnknownEntityKind),
        }
    }
}

/// A selected entity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SelectedEntity {
    /// Entity id.
    pub id: String,
    /// Which collection `id` refers to.
    pub kind: EntityKind,
}

impl SelectedEntity {
    /// Creates a selection.
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            kind,
        }
    }
}

/// Shareable subset of the map state.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UrlState {
    /// Map center.
    pub center: Option<LatLng>,
    /// Zoom level; written rounded to an integer.
    pub zoom: Option<f64>,
    /// Selected entity.
    pub selected: Option<SelectedEntity>,
    /// Organization whose landmarks are highlighted.
    pub highlighted_org: Option<String>,
}

impl UrlState {
    /// Encodes the state as a query string without the leading `?`.
    ///
    /// Empty when nothing is set.
    #[must_use]
    pub fn to_query(&self) -> String {
        let mut pairs: Vec<(&str, Cow<'_, str>)> = Vec::new();
        if let Some(center) = self.center.filter(|c| c.is_finite()) {
            pairs.push(("lat", format!("{:.2}", center.lat).into()));
            pairs.push(("lng", format!("{:.2}", center.lng).into()));
        }
        if let Some(zoom) = self.zoom.filter(|z| z.is_finite()) {
            pairs.push(("zoom", format_zoom(zoom).into()));
        }
        if let Some(selected) = &self.selected {
            pairs.push(("entity", selected.id.as_str().into()));
            pairs.push(("entityType", selected.kind.as_str().into()));
        }
        if let Some(org) = self.highlighted_org.as_deref().filter(|o| !o.is_empty()) {
            pairs.push(("org", org.into()));
        }

        let mut out = String::new();
        for (key, value) in pairs {
            if !out.is_empty() {
                out.push('&');
            }
            out.push_str(key);
            out.push('=');
            out.push_str(&encode_component(&value));
        }
        out
    }

    /// Decodes a query string, with or without a leading `?`.
    ///
    /// The center needs both `lat` and `lng`; the selection needs both
    /// `entity` and a known `entityType`. The first occurrence of a key wins.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let search = search.strip_prefix('?').unwrap_or(search);
        let mut lat = None;
        let mut lng = None;
        let mut zoom = None;
        let mut entity = None;
        let mut entity_type = None;
        let mut org = None;

        for pair in search.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            let slot = match decode_component(key).as_ref() {
                "lat" => &mut lat,
                "lng" => &mut lng,
                "zoom" => &mut zoom,
                "entity" => &mut entity,
                "entityType" => &mut entity_type,
                "org" => &mut org,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(decode_component(value).into_owned());
            }
        }

        let number = |s: Option<String>| {
            s.as_deref()
                .and_then(parse_float_prefix)
                .filter(|v| v.is_finite())
        };
        let center = match (number(lat), number(lng)) {
            (Some(lat), Some(lng)) => Some(LatLng::new(lat, lng)),
            _ => None,
        };
        let zoom = zoom.as_deref().and_then(parse_int_prefix);
        let selected = match (entity, entity_type) {
            (Some(id), Some(kind)) if !id.is_empty() => kind
                .parse::<EntityKind>()
                .ok()
                .map(|kind| SelectedEntity { id, kind }),
            _ => None,
        };
        let highlighted_org = org.filter(|o| !o.is_empty());

        Self {
            center,
            zoom,
            selected,
            highlighted_org,
        }
    }

    /// `base` with the encoded state appended, or `base` alone when the
    /// state is empty.
    #[must_use]
    pub fn share_url(&self, base: &str) -> String {
        let query = self.to_query();
        if query.is_empty() {
            base.to_owned()
        } else {
            format!("{base}?{query}")
        }
    }
}

/// Rounds half up, the way the map's zoom control does, and never prints
/// `-0`.
fn format_zoom(zoom: f64) -> String {
    let rounded = (zoom + 0.5).floor();
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

/// Leading optionally-signed integer of `s`, ignoring trailing garbage.
fn parse_int_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let (sign, digits) = match s.as_bytes().first() {
        Some(b'-') => (-1.0, &s[1..]),
        Some(b'+') => (1.0, &s[1..]),
        _ => (1.0, s),
    };
    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    let value: f64 = digits[..end].parse().ok()?;
    Some(sign * value)
}

/// Leading decimal number of `s`, ignoring trailing garbage.
///
/// Accepts an optional sign, digits with at most one `.`, and an exponent
/// only when it has digits of its own.
fn parse_float_prefix(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while bytes.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        i
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'-' | b'+')));
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'-' | b'+')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }
    s[..end].parse().ok()
}

/// Form-style encoding: spaces become `+`.
fn encode_component(value: &str) -> String {
    urlencoding::encode(value).replace("%20", "+")
}

fn decode_component(value: &str) -> Cow<'_, str> {
    let spaced: Cow<'_, str> = if value.contains('+') {
        value.replace('+', " ").into()
    } else {
        value.into()
    };
    let decoded = urlencoding::decode(&spaced).map(Cow::into_owned);
    match decoded {
        Ok(decoded) => Cow::Owned(decoded),
        Err(_) => spaced,
    }
}

#[cfg(test)]
mod tests {
    use super::{format_zoom, parse_float_prefix, parse_int_prefix};

    #[test]
    fn zoom_rounds_half_up() {
        assert_eq!(format_zoom(1.5), "2");
        assert_eq!(format_zoom(-1.5), "-1");
        assert_eq!(format_zoom(-0.4), "0");
        assert_eq!(format_zoom(2.49), "2");
    }

    #[test]
    fn int_prefix() {
        assert_eq!(parse_int_prefix("3"), Some(3.0));
        assert_eq!(parse_int_prefix("-1"), Some(-1.0));
        assert_eq!(parse_int_prefix("2.7"), Some(2.0));
        assert_eq!(parse_int_prefix("4abc"), Some(4.0));
        assert_eq!(parse_int_prefix("abc"), None);
        assert_eq!(parse_int_prefix("-"), None);
        assert_eq!(parse_int_prefix(""), None);
    }

    #[test]
    fn float_prefix() {
        assert_eq!(parse_float_prefix("12.5abc"), Some(12.5));
        assert_eq!(parse_float_prefix(" -3.25"), Some(-3.25));
        assert_eq!(parse_float_prefix(".5"), Some(0.5));
        assert_eq!(parse_float_prefix("7."), Some(7.0));
        assert_eq!(parse_float_prefix("1e3x"), Some(1000.0));
        assert_eq!(parse_float_prefix("2e"), Some(2.0));
        assert_eq!(parse_float_prefix("4.5e-1"), Some(0.45));
        assert_eq!(parse_float_prefix("."), None);
        assert_eq!(parse_float_prefix("-"), None);
        assert_eq!(parse_float_prefix("abc"), None);
        assert_eq!(parse_float_prefix(""), None);
    }
}
