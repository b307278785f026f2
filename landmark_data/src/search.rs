// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fuzzy search over capabilities, landmarks and organizations.
//!
//! Each record is scored field by field. A field's quality is its fuzzy
//! match score relative to the query matched against itself, clamped to
//! `[0, 1]`. Fields below `1 - threshold` do not count. The record's
//! relevance is the weighted sum of its counting fields divided by the sum
//! of all weights, so a perfect name match outranks a perfect description
//! match.

use core::fmt;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use crate::load::Dataset;
use crate::model::{Capability, Landmark, Organization};
use crate::url_state::EntityKind;

/// Default number of hits returned by [`Searcher::search`].
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// Field weights and match tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchOptions {
    /// Weight of the name.
    pub name_weight: f64,
    /// Weight of the best matching tag.
    pub tags_weight: f64,
    /// Weight of the description.
    pub description_weight: f64,
    /// How far below a perfect match a field may score and still count,
    /// from `0` (exact only) to `1` (anything in order).
    pub threshold: f64,
    /// Queries shorter than this, after trimming, return nothing.
    pub min_query_chars: usize,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            name_weight: 2.0,
            tags_weight: 1.5,
            description_weight: 1.0,
            threshold: 0.4,
            min_query_chars: 2,
        }
    }
}

/// A record matched by a search.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SearchItem<'a> {
    /// A capability region.
    Capability(&'a Capability),
    /// A paper, model, tool or benchmark.
    Landmark(&'a Landmark),
    /// A lab or company.
    Organization(&'a Organization),
}

impl SearchItem<'_> {
    /// Kind of the matched record.
    #[must_use]
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Capability(_) => EntityKind::Capability,
            Self::Landmark(_) => EntityKind::Landmark,
            Self::Organization(_) => EntityKind::Organization,
        }
    }

    /// Id of the matched record.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Capability(c) => &c.id,
            Self::Landmark(l) => &l.id,
            Self::Organization(o) => &o.id,
        }
    }

    /// Display name of the matched record.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Capability(c) => &c.name,
            Self::Landmark(l) => &l.name,
            Self::Organization(o) => &o.name,
        }
    }
}

/// One search result.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchHit<'a> {
    /// The matched record.
    pub item: SearchItem<'a>,
    /// In `(0, 1]`; higher is better.
    pub relevance: f64,
}

/// Runs weighted fuzzy queries against a [`Dataset`].
pub struct Searcher {
    matcher: SkimMatcherV2,
    options: SearchOptions,
}

impl fmt::Debug for Searcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Searcher")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for Searcher {
    fn default() -> Self {
        Self::new(SearchOptions::default())
    }
}

impl Searcher {
    /// Creates a searcher with `options`.
    #[must_use]
    pub fn new(options: SearchOptions) -> Self {
        Self {
            matcher: SkimMatcherV2::default(),
            options,
        }
    }

    /// Weights and tolerance in use.
    #[must_use]
    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Up to `limit` hits for `query`, best first.
    ///
    /// Ties keep dataset order: capabilities, then landmarks, then
    /// organizations, each in file order. Matching ignores case.
    #[must_use]
    pub fn search<'a>(&self, dataset: &'a Dataset, query: &str, limit: usize) -> Vec<SearchHit<'a>> {
        let query = query.trim().to_lowercase();
        if limit == 0 || query.chars().count() < self.options.min_query_chars {
            return Vec::new();
        }
        let Some(perfect) = self
            .matcher
            .fuzzy_match(&query, &query)
            .filter(|&score| score > 0)
        else {
            return Vec::new();
        };
        let scorer = Scorer {
            matcher: &self.matcher,
            options: &self.options,
            query: &query,
            perfect: perfect as f64,
        };

        let capabilities = dataset.capabilities().iter().map(|c| {
            let relevance = scorer.relevance(&c.name, &[], &c.description);
            (SearchItem::Capability(c), relevance)
        });
        let landmarks = dataset.landmarks().iter().map(|l| {
            let relevance = scorer.relevance(&l.name, &l.tags, &l.description);
            (SearchItem::Landmark(l), relevance)
        });
        let organizations = dataset.organizations().iter().map(|o| {
            let relevance = scorer.relevance(&o.name, &[], &o.description);
            (SearchItem::Organization(o), relevance)
        });

        let mut hits: Vec<SearchHit<'a>> = capabilities
            .chain(landmarks)
            .chain(organizations)
            .filter(|(_, relevance)| *relevance > 0.0)
            .map(|(item, relevance)| SearchHit { item, relevance })
            .collect();
        hits.sort_by(|a, b| b.relevance.total_cmp(&a.relevance));
        hits.truncate(limit);
        log::debug!("search `{query}`: {} hits", hits.len());
        hits
    }
}

struct Scorer<'s> {
    matcher: &'s SkimMatcherV2,
    options: &'s SearchOptions,
    query: &'s str,
    perfect: f64,
}

impl Scorer<'_> {
    /// Match quality of `text` in `[0, 1]`, or `0` when below threshold.
    fn quality(&self, text: &str) -> f64 {
        let Some(score) = self.matcher.fuzzy_match(text, self.query) else {
            return 0.0;
        };
        let quality = (score as f64 / self.perfect).clamp(0.0, 1.0);
        if quality >= 1.0 - self.options.threshold {
            quality
        } else {
            0.0
        }
    }

    fn relevance(&self, name: &str, tags: &[String], description: &str) -> f64 {
        let o = self.options;
        let total = o.name_weight + o.tags_weight + o.description_weight;
        if total <= 0.0 {
            return 0.0;
        }
        let tag = tags
            .iter()
            .map(|t| self.quality(t))
            .fold(0.0, f64::max);
        (o.name_weight * self.quality(name)
            + o.tags_weight * tag
            + o.description_weight * self.quality(description))
            / total
    }
}
