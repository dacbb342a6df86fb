// Copyright 2026 the Slipway Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The live slide sequence.
//!
//! A [`SlideSequence`] is the ordered strip the viewport scrolls over. Without
//! looping it holds the original items. With looping it holds three full
//! copies laid end to end:
//!
//! ```text
//!   [ before clones | originals | after clones ]
//!     0 .. N          N .. 2N     2N .. 3N
//! ```
//!
//! Positions are indices into that strip. Every clone carries the 1-based
//! [`Slide::index`] of its origin, so index-based lookups resolve to the
//! canonical (non-clone) slide by filtering on [`CloneKind::Original`].
//!
//! Left offsets are the running sum of outer widths. The host lays out the
//! strip contiguously, so these match the rendered positions.

use alloc::vec::Vec;

use crate::event::Direction;

/// Whether a slide is an original item or one of the loop clones.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CloneKind {
    /// An item from the host markup.
    Original,
    /// A copy in the region prepended before the originals.
    Before,
    /// A copy in the region appended after the originals.
    After,
}

/// One item in the live sequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Slide {
    /// 1-based position among the original items. Shared by clones.
    pub index: u32,
    /// Clone status.
    pub kind: CloneKind,
    /// Outer width in CSS pixels, margins included.
    pub width: f64,
}

impl Slide {
    /// Returns `true` for original (non-clone) slides.
    #[inline]
    #[must_use]
    pub const fn is_canonical(&self) -> bool {
        matches!(self.kind, CloneKind::Original)
    }
}

/// Ordered slides plus their precomputed left offsets.
#[derive(Clone, Debug, Default)]
pub struct SlideSequence {
    slides: Vec<Slide>,
    offsets: Vec<f64>,
    original_len: usize,
    looping: bool,
    total_width: f64,
}

impl SlideSequence {
    /// Builds the sequence from the measured outer widths of the original
    /// items.
    ///
    /// With `looping` set and at least one item, the originals are flanked by
    /// one full before-clone region and one full after-clone region.
    #[must_use]
    pub fn new(widths: &[f64], looping: bool) -> Self {
        let n = widths.len();
        let looping = looping && n > 0;

        let originals = widths.iter().enumerate().map(|(i, &width)| Slide {
            index: slide_index(i),
            kind: CloneKind::Original,
            width,
        });

        let mut slides = Vec::with_capacity(if looping { n * 3 } else { n });
        if looping {
            slides.extend(originals.clone().map(|s| Slide {
                kind: CloneKind::Before,
                ..s
            }));
            slides.extend(originals.clone());
            slides.extend(originals.map(|s| Slide {
                kind: CloneKind::After,
                ..s
            }));
        } else {
            slides.extend(originals);
        }

        let mut offsets = Vec::with_capacity(slides.len());
        let mut left = 0.0;
        for slide in &slides {
            offsets.push(left);
            left += slide.width;
        }

        Self {
            slides,
            offsets,
            original_len: n,
            looping,
            total_width: left,
        }
    }

    /// Number of slides in the live sequence, clones included.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns `true` if there are no slides at all.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Number of original items.
    #[inline]
    #[must_use]
    pub fn original_len(&self) -> usize {
        self.original_len
    }

    /// Returns `true` if clone regions are present.
    #[inline]
    #[must_use]
    pub fn is_looping(&self) -> bool {
        self.looping
    }

    /// Sum of all slide widths in the live sequence.
    #[inline]
    #[must_use]
    pub fn total_width(&self) -> f64 {
        self.total_width
    }

    /// Position of the first original slide.
    #[inline]
    #[must_use]
    pub fn originals_start(&self) -> usize {
        if self.looping { self.original_len } else { 0 }
    }

    /// Returns the slide at `position`.
    #[inline]
    #[must_use]
    pub fn get(&self, position: usize) -> Option<&Slide> {
        self.slides.get(position)
    }

    /// Returns the left offset of the slide at `position`.
    #[inline]
    #[must_use]
    pub fn offset(&self, position: usize) -> Option<f64> {
        self.offsets.get(position).copied()
    }

    /// Iterates over the slides in order.
    pub fn iter(&self) -> impl Iterator<Item = &Slide> {
        self.slides.iter()
    }

    /// Position of the canonical slide with the given 1-based index.
    #[must_use]
    pub fn canonical_position(&self, index: u32) -> Option<usize> {
        let i = usize::try_from(index).ok()?.checked_sub(1)?;
        (i < self.original_len).then(|| self.originals_start() + i)
    }

    /// Position adjacent to `position` in `direction`, if one exists.
    #[must_use]
    pub fn neighbor(&self, position: usize, direction: Direction) -> Option<usize> {
        let next = match direction {
            Direction::Prev => position.checked_sub(1)?,
            Direction::Next => position + 1,
        };
        (next < self.len()).then_some(next)
    }

    /// For a clone, the position of the original at the same relative spot.
    ///
    /// A before-clone at `p` maps to `N + p`; an after-clone at `p` maps to
    /// `N + (p - 2N)`. Both land on the original sharing the clone's index.
    /// Returns `None` for originals and out-of-range positions.
    #[must_use]
    pub fn canonical_counterpart(&self, position: usize) -> Option<usize> {
        let n = self.original_len;
        match self.get(position)?.kind {
            CloneKind::Original => None,
            CloneKind::Before => Some(n + position),
            CloneKind::After => Some(n + (position - 2 * n)),
        }
    }
}

fn slide_index(i: usize) -> u32 {
    u32::try_from(i + 1).unwrap_or(u32::MAX)
}
