// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred image bookkeeping.
//!
//! The host's pending marker is the primary gate: swapped images no longer
//! report as pending. [`LazyImages`] adds the second gate, so an image that
//! is already loading is not requested again by an overlapping pass.

use alloc::collections::BTreeSet;
use alloc::string::String;

/// Image references with a load in flight.
#[derive(Clone, Debug, Default)]
pub struct LazyImages {
    loading: BTreeSet<String>,
}

impl LazyImages {
    /// Marks `src` as loading. Returns `false` if it already was.
    pub fn begin(&mut self, src: &str) -> bool {
        if self.loading.contains(src) {
            return false;
        }
        self.loading.insert(String::from(src))
    }

    /// Clears the loading mark for `src`. Returns `false` for references that
    /// were never requested.
    pub fn finish(&mut self, src: &str) -> bool {
        self.loading.remove(src)
    }

    /// Number of loads in flight.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.loading.len()
    }

    /// Forgets every in-flight load.
    pub fn clear(&mut self) {
        self.loading.clear();
    }
}
