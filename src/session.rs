//! Boundary facade for UI collaborators.
//!
//! [`Session`] wires the codec, the edit pipeline, and the render adapter
//! into the handful of operations a host UI actually calls, and keeps the
//! two pieces of presentation state that belong on the host side of the
//! boundary: the display zoom and the last-set channel offset (so sliders
//! can keep showing their position). The pipeline itself never remembers an
//! offset — it is zeroed whenever a new image is loaded or the edit is
//! reset.
//!
//! The editor's reject-while-busy policy surfaces here unchanged: while a
//! filter is running, [`Session::is_processing`] is true and every
//! edit-triggering operation returns the busy error. Hosts are expected to
//! disable their controls during that window and pump [`Session::pump`]
//! from their event loop (or block on [`Session::finish`]).

use crate::buffer::PixelBuffer;
use crate::codec::{self, CodecError};
use crate::editor::{Editor, EditorError, EditorState};
use crate::filters::{ChannelOffset, FilterKind};
use crate::render::{self, Zoom};
use thiserror::Error;

/// Fixed default filename for exports.
pub const DEFAULT_EXPORT_FILENAME: &str = "edited-image.png";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("codec error: {0}")]
    Codec(#[from] CodecError),
    #[error("editor error: {0}")]
    Editor(#[from] EditorError),
}

/// One open document plus its presentation state.
#[derive(Debug, Default)]
pub struct Session {
    editor: Editor,
    zoom: Zoom,
    offset: ChannelOffset,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode `bytes` and load the result as the new document. Zoom and the
    /// retained channel offset go back to their defaults.
    pub fn image_selected(&mut self, bytes: &[u8]) -> Result<(), SessionError> {
        let buffer = codec::decode(bytes)?;
        self.editor.load(buffer)?;
        self.zoom = Zoom::default();
        self.offset = ChannelOffset::ZERO;
        Ok(())
    }

    /// Start a named filter.
    pub fn filter_invoked(&mut self, kind: FilterKind) -> Result<(), SessionError> {
        self.editor.apply(kind)?;
        Ok(())
    }

    /// Start a channel adjustment and retain `offset` for the host's
    /// sliders. The adjustment is computed from the original image, so
    /// dragging a slider through many values never compounds.
    pub fn channel_adjusted(&mut self, offset: ChannelOffset) -> Result<(), SessionError> {
        self.editor.apply(FilterKind::ChannelOffset(offset))?;
        self.offset = offset;
        Ok(())
    }

    /// Update the display zoom. Purely presentational; the pipeline is not
    /// involved and the value is clamped like any other [`Zoom`].
    pub fn zoom_changed(&mut self, factor: f32) {
        self.zoom = Zoom::new(factor);
    }

    /// Discard the edit: current goes back to a copy of the original, and
    /// zoom and the retained offset return to their defaults.
    pub fn reset_invoked(&mut self) -> Result<(), SessionError> {
        self.editor.reset()?;
        self.zoom = Zoom::default();
        self.offset = ChannelOffset::ZERO;
        Ok(())
    }

    /// Encode the current buffer as PNG, returning the default filename and
    /// the file bytes.
    pub fn export_invoked(&self) -> Result<(String, Vec<u8>), SessionError> {
        let current = self.editor.export_current()?;
        let bytes = codec::encode_png(current)?;
        Ok((DEFAULT_EXPORT_FILENAME.to_string(), bytes))
    }

    /// The display bitmap: current buffer scaled to the session zoom.
    /// `None` until an image is loaded. Available during processing (shows
    /// the previous result, which hosts keep under a busy overlay).
    pub fn view(&self) -> Option<PixelBuffer> {
        self.editor.current().map(|b| render::scale(b, self.zoom))
    }

    /// Publish a finished filter, if any, without blocking. Returns `true`
    /// when the view changed.
    pub fn pump(&mut self) -> Result<bool, SessionError> {
        Ok(self.editor.try_finish()?)
    }

    /// Block until the in-flight filter (if any) is published.
    pub fn finish(&mut self) -> Result<(), SessionError> {
        Ok(self.editor.finish()?)
    }

    pub fn is_processing(&self) -> bool {
        self.editor.is_processing()
    }

    pub fn state(&self) -> EditorState {
        self.editor.state()
    }

    pub fn zoom(&self) -> Zoom {
        self.zoom
    }

    /// The last offset passed to [`Self::channel_adjusted`] since load/reset.
    pub fn channel_offset(&self) -> ChannelOffset {
        self.offset
    }
}
