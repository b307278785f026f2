// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=landmark_disclosure --heading-base-level=0

//! Landmark Disclosure: zoom-tiered progressive disclosure.
//!
//! At a coarse zoom only a hand-picked handful of entities is worth showing;
//! as the user zooms in, more tiers appear, and zooming back out hides them
//! again. Every entity carries an optional reveal threshold and is shown when
//! `threshold <= zoom`.
//!
//! The core concepts are:
//!
//! - [`Disclosed`]: a trait exposing an entity's reveal threshold.
//! - [`compute_disclosed`]: a pure, order-preserving filter.
//! - [`ZoomTiers`]: an optional naming layer over thresholds, used to label
//!   the current level of detail and count entities per tier.
//! - [`Discloser`]: a small cache that skips recomputation when neither the
//!   collection nor the zoom has changed.
//!
//! Nothing here special-cases particular threshold values; any number of
//! tiers works.
//!
//! ## Minimal example
//!
//! ```rust
//! use landmark_disclosure::{Disclosed, ZoomTiers, compute_disclosed};
//!
//! struct Paper {
//!     title: &'static str,
//!     reveal_at: Option<f64>,
//! }
//!
//! impl Disclosed for Paper {
//!     fn reveal_threshold(&self) -> Option<f64> {
//!         self.reveal_at
//!     }
//! }
//!
//! let papers = [
//!     Paper { title: "Attention Is All You Need", reveal_at: Some(-1.0) },
//!     Paper { title: "GPT-2", reveal_at: Some(0.0) },
//!     Paper { title: "Some Workshop Paper", reveal_at: Some(1.0) },
//!     Paper { title: "Untiered", reveal_at: None },
//! ];
//!
//! let shown = compute_disclosed(&papers, Some(0.0));
//! let titles: Vec<_> = shown.iter().map(|p| p.title).collect();
//! assert_eq!(titles, ["Attention Is All You Need", "GPT-2", "Untiered"]);
//!
//! let tiers = ZoomTiers::default();
//! assert_eq!(tiers.active_tier(0.0).map(|t| t.name), Some("notable"));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod disclose;
mod discloser;
mod tiers;

pub use disclose::{
    Disclosed, compute_disclosed, disclosed_indices, is_disclosed, visit_disclosed,
};
pub use discloser::Discloser;
pub use tiers::{ZoomTier, ZoomTiers};
