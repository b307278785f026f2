// Copyright 2025 the Landmark Map Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=landmark_timing --heading-base-level=0

//! Landmark Timing: host-agnostic timer primitives for UI runtimes.
//!
//! The timers in this crate never read a clock and never spawn anything.
//! Hosts pass timestamps in, typically from their event loop or animation
//! frame callback, and ask whether something is due. That keeps them usable
//! from any runtime and trivially testable.
//!
//! - [`Debouncer`]: trailing-edge debounce with cancelation and stale-token
//!   detection.
//!
//! This crate is `no_std`.

#![no_std]

mod debounce;

pub use debounce::{DEFAULT_DEBOUNCE, DebounceToken, Debouncer};
