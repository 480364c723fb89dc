//! The edit pipeline: original and current buffers, single-flight filters.
//!
//! [`Editor`] owns two buffers. **Original** is the image as decoded from
//! the last loaded file; it is replaced wholesale on load and never mutated.
//! **Current** is the displayed/exportable image, derived from Original by
//! applying zero or one filter. Every filter reads Original — never
//! Current — so repeated channel adjustments describe an absolute delta
//! from the unedited image instead of compounding.
//!
//! # States
//!
//! ```text
//! Empty ──load──▶ Ready ──apply──▶ Processing ──try_finish/finish──▶ Ready
//!                   ▲                                                  │
//!                   └──────────────── reset ◀──────────────────────────┘
//! ```
//!
//! A full-resolution filter pass is O(width × height) and can take long
//! enough to stall an interactive caller, so [`Editor::apply`] runs the
//! filter on a background thread and returns immediately. The `Processing`
//! state is externally observable via [`Editor::is_processing`] so a host
//! can disable its controls and show a busy indicator; completion is
//! published when the host pumps [`Editor::try_finish`] (or blocks on
//! [`Editor::finish`]).
//!
//! # Single flight
//!
//! At most one filter is ever in flight. `apply`, `load`, and `reset` are
//! all **rejected with [`EditorError::Busy`] while Processing** — nothing is
//! queued or coalesced. Current is only ever replaced with a fully computed
//! buffer, so a reader never observes a torn image.

use crate::buffer::PixelBuffer;
use crate::filters::{self, FilterKind};
use std::thread::{self, JoinHandle};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    /// Precondition not met: the operation needs a loaded image. Benign —
    /// hosts normally prevent this by disabling controls while empty.
    #[error("no image loaded")]
    NoImage,
    /// A filter is already in flight; the request was rejected, not queued.
    #[error("a filter is already running")]
    Busy,
    /// The background filter thread panicked. Original and Current are
    /// untouched and the editor is back in `Ready`.
    #[error("filter worker failed")]
    Worker,
}

/// Externally observable pipeline state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorState {
    Empty,
    Ready,
    Processing,
}

/// The edit pipeline. See the [module docs](self) for the state machine.
#[derive(Debug, Default)]
pub struct Editor {
    original: Option<PixelBuffer>,
    current: Option<PixelBuffer>,
    in_flight: Option<JoinHandle<PixelBuffer>>,
}

impl Editor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditorState {
        if self.in_flight.is_some() {
            EditorState::Processing
        } else if self.original.is_some() {
            EditorState::Ready
        } else {
            EditorState::Empty
        }
    }

    pub fn is_processing(&self) -> bool {
        self.state() == EditorState::Processing
    }

    /// Replace the document. Original takes `buffer`, Current becomes a copy
    /// of it, and any previous document is dropped.
    ///
    /// Rejected while a filter is in flight, preserving the single-flight
    /// invariant: completed work is always published against the document it
    /// was computed from.
    pub fn load(&mut self, buffer: PixelBuffer) -> Result<(), EditorError> {
        if self.in_flight.is_some() {
            return Err(EditorError::Busy);
        }
        self.current = Some(buffer.clone());
        self.original = Some(buffer);
        Ok(())
    }

    /// Start `kind` against a copy of Original on a background thread.
    ///
    /// Returns immediately; the result is published by [`Self::try_finish`]
    /// or [`Self::finish`]. With no image loaded this is the benign
    /// [`EditorError::NoImage`] no-op; while Processing it is rejected with
    /// [`EditorError::Busy`].
    pub fn apply(&mut self, kind: FilterKind) -> Result<(), EditorError> {
        if self.in_flight.is_some() {
            return Err(EditorError::Busy);
        }
        let Some(original) = &self.original else {
            return Err(EditorError::NoImage);
        };
        let source = original.clone();
        self.in_flight = Some(thread::spawn(move || filters::apply(kind, &source)));
        Ok(())
    }

    /// Publish a finished filter result, if any, without blocking.
    ///
    /// Returns `true` when a result was published (Current replaced, state
    /// back to `Ready`), `false` when nothing is in flight or the filter is
    /// still running.
    pub fn try_finish(&mut self) -> Result<bool, EditorError> {
        if !self.in_flight.as_ref().is_some_and(JoinHandle::is_finished) {
            return Ok(false);
        }
        self.finish()?;
        Ok(true)
    }

    /// Block until the in-flight filter (if any) completes and publish it.
    pub fn finish(&mut self) -> Result<(), EditorError> {
        let Some(handle) = self.in_flight.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(buffer) => {
                self.current = Some(buffer);
                Ok(())
            }
            Err(_) => Err(EditorError::Worker),
        }
    }

    /// Set Current back to a copy of Original. Synchronous — no filter
    /// computation happens, so there is no `Processing` transition.
    pub fn reset(&mut self) -> Result<(), EditorError> {
        if self.in_flight.is_some() {
            return Err(EditorError::Busy);
        }
        let Some(original) = &self.original else {
            return Err(EditorError::NoImage);
        };
        self.current = Some(original.clone());
        Ok(())
    }

    /// The displayed buffer, if a document is loaded. Available during
    /// Processing too — it still holds the previous result, which is what a
    /// host keeps on screen under its busy indicator.
    pub fn current(&self) -> Option<&PixelBuffer> {
        self.current.as_ref()
    }

    /// The unedited baseline, if a document is loaded.
    pub fn original(&self) -> Option<&PixelBuffer> {
        self.original.as_ref()
    }

    /// Snapshot Current for export. Valid only from `Ready`: exporting while
    /// a filter runs would race the publication of its result.
    pub fn export_current(&self) -> Result<&PixelBuffer, EditorError> {
        if self.in_flight.is_some() {
            return Err(EditorError::Busy);
        }
        self.current.as_ref().ok_or(EditorError::NoImage)
    }
}
