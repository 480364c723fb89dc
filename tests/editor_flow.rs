//! End-to-end flows through the public API: file bytes in, file bytes out.

use retouch::buffer::PixelBuffer;
use retouch::codec;
use retouch::editor::EditorState;
use retouch::filters::{ChannelOffset, FilterKind};
use retouch::session::{DEFAULT_EXPORT_FILENAME, Session};

/// The 2x2 probe image: red, green / blue, white.
fn probe_buffer() -> PixelBuffer {
    PixelBuffer::from_raw(
        2,
        2,
        vec![
            255, 0, 0, 255, //
            0, 255, 0, 255, //
            0, 0, 255, 255, //
            255, 255, 255, 255,
        ],
    )
    .unwrap()
}

fn probe_png() -> Vec<u8> {
    codec::encode_png(&probe_buffer()).unwrap()
}

#[test]
fn grayscale_round_trip_through_export() {
    let mut session = Session::new();
    session.image_selected(&probe_png()).unwrap();
    session.filter_invoked(FilterKind::Grayscale).unwrap();
    session.finish().unwrap();

    let (filename, png) = session.export_invoked().unwrap();
    assert_eq!(filename, DEFAULT_EXPORT_FILENAME);

    let decoded = codec::decode(&png).unwrap();
    assert_eq!(
        decoded.pixels(),
        &[
            85, 85, 85, 255, //
            85, 85, 85, 255, //
            85, 85, 85, 255, //
            255, 255, 255, 255,
        ]
    );
}

#[test]
fn channel_adjustments_never_compound_across_invocations() {
    let mut session = Session::new();
    session.image_selected(&probe_png()).unwrap();

    // Simulate a slider settling on the same value twice
    for _ in 0..2 {
        session
            .channel_adjusted(ChannelOffset::new(0, 0, -100))
            .unwrap();
        session.finish().unwrap();
    }

    let (_, png) = session.export_invoked().unwrap();
    let decoded = codec::decode(&png).unwrap();
    // White corner: blue dropped by exactly 100, not 200
    assert_eq!(&decoded.pixels()[12..16], &[255, 255, 155, 255]);
}

#[test]
fn reset_after_edits_restores_the_loaded_bytes_exactly() {
    let mut session = Session::new();
    session.image_selected(&probe_png()).unwrap();

    session.filter_invoked(FilterKind::Sepia).unwrap();
    session.finish().unwrap();
    session
        .channel_adjusted(ChannelOffset::new(-40, 12, 99))
        .unwrap();
    session.finish().unwrap();

    session.reset_invoked().unwrap();
    let (_, png) = session.export_invoked().unwrap();
    assert_eq!(codec::decode(&png).unwrap(), probe_buffer());
}

#[test]
fn busy_window_rejects_then_recovers() {
    let mut session = Session::new();
    session.image_selected(&probe_png()).unwrap();

    session.filter_invoked(FilterKind::Invert).unwrap();
    assert!(session.is_processing());
    assert_eq!(session.state(), EditorState::Processing);

    // Everything edit-shaped is rejected during the flight
    assert!(session.filter_invoked(FilterKind::Sepia).is_err());
    assert!(session.reset_invoked().is_err());
    assert!(session.export_invoked().is_err());
    assert!(session.image_selected(&probe_png()).is_err());

    session.finish().unwrap();
    assert_eq!(session.state(), EditorState::Ready);

    // And the published result is the single invert, untorn
    let (_, png) = session.export_invoked().unwrap();
    let decoded = codec::decode(&png).unwrap();
    assert_eq!(
        decoded.pixels(),
        &[
            0, 255, 255, 255, //
            255, 0, 255, 255, //
            255, 255, 0, 255, //
            0, 0, 0, 255,
        ]
    );
}

#[test]
fn zoomed_view_has_floored_dimensions_and_hard_edges() {
    let mut session = Session::new();
    session.image_selected(&probe_png()).unwrap();
    session.zoom_changed(2.5);

    let view = session.view().unwrap();
    assert_eq!(view.dimensions(), (5, 5));

    // Top-left block of a 2.5x zoom is solid red: rows 0-2, columns 0-2
    for y in 0..3 {
        for x in 0..3 {
            let i = (y * 5 + x) * 4;
            assert_eq!(&view.pixels()[i..i + 4], &[255, 0, 0, 255]);
        }
    }
}

#[test]
fn exported_files_survive_a_disk_round_trip() {
    let tmp = tempfile::TempDir::new().unwrap();
    let path = tmp.path().join(DEFAULT_EXPORT_FILENAME);

    let mut session = Session::new();
    session.image_selected(&probe_png()).unwrap();
    session.filter_invoked(FilterKind::Sepia).unwrap();
    session.finish().unwrap();

    let (_, png) = session.export_invoked().unwrap();
    std::fs::write(&path, &png).unwrap();

    let reloaded = codec::decode_file(&path).unwrap();
    assert_eq!(reloaded, codec::decode(&png).unwrap());

    // Loading the export back in starts a fresh, consistent document
    let mut next = Session::new();
    next.image_selected(&png).unwrap();
    assert_eq!(next.state(), EditorState::Ready);
    assert_eq!(next.view().unwrap(), reloaded);
}
