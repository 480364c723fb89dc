//! # Retouch
//!
//! A pixel-level raster photo retoucher: load an image, apply a per-pixel
//! filter (grayscale, invert, sepia) or additive channel offsets, inspect
//! the result zoomed with hard pixel edges, and export lossless PNG.
//!
//! # Architecture: Edit Pipeline Over Immutable Buffers
//!
//! Everything revolves around one contract: the decoded image (*Original*)
//! is immutable, and every edit derives a fresh buffer (*Current*) from it.
//!
//! ```text
//! file bytes ──codec::decode──▶ Original ──filters::apply──▶ Current
//!                                                               │
//!                              render::scale ◀── view ──────────┤
//!                              codec::encode_png ◀── export ────┘
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Non-destructive edits**: a filter always reads Original, so channel
//!   adjustments describe an absolute delta and never compound, and reset
//!   is a copy rather than an inverse computation.
//! - **Torn-free display**: Current is only ever *replaced* with a fully
//!   computed buffer, never mutated while a reader holds it.
//! - **Responsiveness**: filters run on a background thread behind a
//!   single-flight guard, so an interactive host stays responsive and can
//!   render a busy state from one observable flag.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`buffer`] | [`buffer::PixelBuffer`] — width, height, flat RGBA bytes; the value type everything trades in |
//! | [`filters`] | The closed filter registry and its pure per-pixel loops |
//! | [`editor`] | The edit pipeline: Original/Current ownership, Empty → Ready → Processing state machine |
//! | [`render`] | Nearest-neighbor zoom scaling for display |
//! | [`codec`] | PNG/JPEG/WebP decoding, lossless PNG encoding |
//! | [`session`] | Boundary facade a host UI drives: load, filter, adjust, zoom, reset, export |
//! | [`batch`] | The same pipeline over a whole directory tree, in parallel |
//!
//! # Design Decisions
//!
//! ## PNG-Only Export
//!
//! Edits are exact pixel operations. Exporting through a lossy encoder
//! would quietly change the samples the user just inspected at 300% zoom,
//! so every export is lossless PNG regardless of the input format.
//!
//! ## A Closed Filter Set
//!
//! Filters are a plain enum dispatched in one `match`, not a plugin
//! registry. The set is small and fixed; adding one is a variant plus a
//! loop plus tests, all checked by the compiler. Parameterized filters
//! carry their parameters on the variant.
//!
//! ## Reject-While-Busy
//!
//! At most one filter runs at a time. Requests that arrive while one is in
//! flight are rejected with a busy error rather than queued: the host
//! disables its controls during processing anyway, and rejection keeps the
//! state machine small enough to test exhaustively.

pub mod batch;
pub mod buffer;
pub mod codec;
pub mod editor;
pub mod filters;
pub mod render;
pub mod session;
