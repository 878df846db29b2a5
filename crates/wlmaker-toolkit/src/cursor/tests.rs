use super::*;

fn cursor_at(x: f64, y: f64) -> Cursor {
    let mut c = Cursor::new();
    c.warp(x, y);
    c
}

#[test]
fn starts_in_passthrough() {
    let mut c = Cursor::new();
    assert_eq!(c.mode(), CursorMode::Passthrough);
    assert_eq!(c.motion_to(5.0, 5.0), CursorMotion::Passthrough);
}

#[test]
fn move_requires_activated_view() {
    let mut c = cursor_at(10.0, 10.0);
    assert!(!c.begin_move(ViewId(1), (0, 0), false));
    assert_eq!(c.mode(), CursorMode::Passthrough);
    assert_eq!(c.grabbed(), None);
}

#[test]
fn move_keeps_grab_offset() {
    let mut c = cursor_at(150.0, 120.0);
    assert!(c.begin_move(ViewId(1), (100, 100), true));
    assert_eq!(c.mode(), CursorMode::Move);

    assert_eq!(
        c.motion_to(200.0, 300.0),
        CursorMotion::Move {
            view: ViewId(1),
            x: 150,
            y: 280
        }
    );
    // Recomputed from the grab each time, not accumulated.
    assert_eq!(
        c.motion_to(150.0, 120.0),
        CursorMotion::Move {
            view: ViewId(1),
            x: 100,
            y: 100
        }
    );
}

#[test]
fn resize_bottom_right() {
    let geometry = Rect::new(100, 100, 200, 100);
    let mut c = cursor_at(300.0, 200.0);
    assert!(c.begin_resize(ViewId(2), geometry, Edges::BOTTOM | Edges::RIGHT, true));

    assert_eq!(
        c.motion_to(350.0, 260.0),
        CursorMotion::Resize {
            view: ViewId(2),
            geometry: Rect::new(100, 100, 250, 160)
        }
    );
}

#[test]
fn resize_top_left_moves_origin() {
    let geometry = Rect::new(100, 100, 200, 100);
    let mut c = cursor_at(102.0, 98.0);
    assert!(c.begin_resize(ViewId(2), geometry, Edges::TOP | Edges::LEFT, true));

    assert_eq!(
        c.motion_to(52.0, 78.0),
        CursorMotion::Resize {
            view: ViewId(2),
            geometry: Rect::new(50, 80, 250, 120)
        }
    );
}

#[test]
fn resize_only_moves_grabbed_edges() {
    let geometry = Rect::new(0, 0, 100, 100);
    let mut c = cursor_at(50.0, 100.0);
    assert!(c.begin_resize(ViewId(3), geometry, Edges::BOTTOM, true));

    assert_eq!(
        c.motion_to(500.0, 150.0),
        CursorMotion::Resize {
            view: ViewId(3),
            geometry: Rect::new(0, 0, 100, 150)
        }
    );
}

#[test]
fn resize_clamps_to_one_pixel() {
    let geometry = Rect::new(100, 100, 50, 50);
    let mut c = cursor_at(150.0, 150.0);
    assert!(c.begin_resize(ViewId(4), geometry, Edges::BOTTOM | Edges::RIGHT, true));
    match c.motion_to(0.0, 0.0) {
        CursorMotion::Resize { geometry, .. } => {
            assert_eq!(geometry, Rect::new(100, 100, 1, 1));
        }
        other => panic!("unexpected motion {other:?}"),
    }

    let mut c = cursor_at(100.0, 100.0);
    assert!(c.begin_resize(ViewId(4), geometry, Edges::TOP | Edges::LEFT, true));
    match c.motion_to(400.0, 400.0) {
        CursorMotion::Resize { geometry, .. } => {
            assert_eq!(geometry, Rect::new(149, 149, 1, 1));
        }
        other => panic!("unexpected motion {other:?}"),
    }
}

#[test]
fn resize_denials() {
    let mut c = cursor_at(0.0, 0.0);
    assert!(!c.begin_resize(ViewId(1), Rect::new(0, 0, 10, 10), Edges::TOP, false));
    assert!(!c.begin_resize(ViewId(1), Rect::new(0, 0, 10, 10), Edges::empty(), true));
    assert_eq!(c.mode(), CursorMode::Passthrough);
}

#[test]
fn release_returns_to_passthrough() {
    let mut c = cursor_at(0.0, 0.0);
    c.begin_move(ViewId(1), (0, 0), true);
    assert_eq!(c.release(), Some(ViewId(1)));
    assert_eq!(c.mode(), CursorMode::Passthrough);
    assert_eq!(c.grabbed(), None);
    assert_eq!(c.release(), None);
}

#[test]
fn unmap_clears_grab_and_hover() {
    let mut c = cursor_at(0.0, 0.0);
    c.begin_move(ViewId(7), (0, 0), true);
    c.set_under_pointer(Some(ViewId(7)));

    c.view_unmapped(ViewId(8));
    assert_eq!(c.grabbed(), Some(ViewId(7)));

    c.view_unmapped(ViewId(7));
    assert_eq!(c.grabbed(), None);
    assert_eq!(c.under_pointer(), None);
    assert_eq!(c.mode(), CursorMode::Passthrough);
}
