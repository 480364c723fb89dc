//! Pixel filters — the closed set of per-pixel edits the editor offers.
//!
//! | Filter | Effect |
//! |---|---|
//! | **Grayscale** | all color channels set to the channel average |
//! | **Invert** | each color channel replaced by its complement |
//! | **Sepia** | fixed warm-tone weight matrix |
//! | **Channel offset** | additive per-channel brightness delta |
//!
//! Every filter is a pure mapping over one pixel's four bytes, independent of
//! its neighbors, applied uniformly across the buffer. Alpha always passes
//! through unchanged, and no filter can fail: all arithmetic is clamped to
//! the 8-bit sample range.
//!
//! The module is split into:
//! - **[`FilterKind`]**: the registry — a closed enum, one variant per
//!   filter, parameters carried on the variant. Adding a filter means adding
//!   a variant and its loop in [`ops`]; there is no runtime registration.
//! - **[`ops`]**: the per-pixel byte loops (pure, unit testable).

pub mod ops;

use crate::buffer::PixelBuffer;
use serde::{Deserialize, Serialize};

/// Additive per-channel brightness delta.
///
/// Each component is conceptually in [-255, 255]; inputs outside that range
/// are accepted because every output sample is clamped anyway. An offset
/// describes a *cumulative* adjustment from the unedited image — it is
/// re-applied from the original buffer each time, never compounded onto an
/// already-adjusted one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelOffset {
    pub r: i16,
    pub g: i16,
    pub b: i16,
}

impl ChannelOffset {
    pub const ZERO: Self = Self { r: 0, g: 0, b: 0 };

    pub fn new(r: i16, g: i16, b: i16) -> Self {
        Self { r, g, b }
    }

    pub fn is_zero(self) -> bool {
        self == Self::ZERO
    }
}

/// The closed enumeration of available filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterKind {
    Grayscale,
    Invert,
    Sepia,
    ChannelOffset(ChannelOffset),
}

impl FilterKind {
    /// The parameterless filters, in menu order.
    pub const NAMED: [FilterKind; 3] = [
        FilterKind::Grayscale,
        FilterKind::Invert,
        FilterKind::Sepia,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Invert => "invert",
            FilterKind::Sepia => "sepia",
            FilterKind::ChannelOffset(_) => "channel-offset",
        }
    }
}

/// Apply `kind` to `source`, returning the result as a new buffer.
///
/// The source is never mutated; callers that need the unedited image keep
/// their reference and it stays valid.
pub fn apply(kind: FilterKind, source: &PixelBuffer) -> PixelBuffer {
    match kind {
        FilterKind::Grayscale => source.map_bytes(ops::grayscale),
        FilterKind::Invert => source.map_bytes(ops::invert),
        FilterKind::Sepia => source.map_bytes(ops::sepia),
        FilterKind::ChannelOffset(offset) => {
            source.map_bytes(|pixels| ops::channel_offset(pixels, offset))
        }
    }
}
