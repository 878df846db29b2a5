use wlmaker_common::{Action, Edges, Rect, SurfaceId, ViewId, WorkspaceId};
use wlmaker_config::schema::DecorationConfig;

use super::*;
use crate::input::{ButtonEvent, BTN_LEFT};
use crate::interactive::{Button, ButtonTextures, InteractiveKind};
use crate::scene::{MemoryScene, SceneGraph};
use crate::seat::{HeadlessSeat, Seat};
use crate::testing::StaticView;
use crate::texture::Texture;
use crate::workspace::Layer;

fn areas() -> ViewAreas {
    ViewAreas {
        maximize: Rect::new(0, 30, 1920, 1050),
        fullscreen: Rect::new(0, 0, 1920, 1080),
    }
}

fn plain_view(scene: &mut MemoryScene) -> View {
    let root = scene.root();
    View::new(
        scene,
        root,
        ViewId(1),
        Box::new(StaticView::new(640, 480).with_surface(SurfaceId(10))),
        None,
        None,
    )
    .unwrap()
}

fn decorated_view(scene: &mut MemoryScene) -> View {
    let root = scene.root();
    View::new(
        scene,
        root,
        ViewId(2),
        Box::new(StaticView::new(400, 300).with_surface(SurfaceId(20))),
        Some(&DecorationConfig::default()),
        None,
    )
    .unwrap()
}

fn mapped(scene: &mut MemoryScene, mut view: View) -> View {
    let root = scene.root();
    view.map(scene, WorkspaceId(1), Layer::Shell, root);
    view
}

fn mapped_plain(scene: &mut MemoryScene) -> View {
    let view = plain_view(scene);
    mapped(scene, view)
}

fn mapped_decorated(scene: &mut MemoryScene) -> View {
    let view = decorated_view(scene);
    mapped(scene, view)
}

#[test]
fn new_view_is_unmapped_and_hidden() {
    let mut scene = MemoryScene::new();
    let view = plain_view(&mut scene);
    assert!(!view.is_mapped());
    assert!(!scene.is_enabled(view.root()));
    assert_eq!(view.geometry(), Rect::new(0, 0, 640, 480));
}

#[test]
fn map_sets_workspace_and_unmap_clears_it() {
    let mut scene = MemoryScene::new();
    let detached = scene.create_tree(scene.root()).unwrap();
    let mut view = mapped_plain(&mut scene);
    assert_eq!(view.workspace(), Some(WorkspaceId(1)));
    assert!(scene.is_enabled(view.root()));

    view.unmap(&mut scene, detached);
    assert_eq!(view.workspace(), None);
    assert_eq!(scene.parent(view.root()), Some(detached));
}

#[test]
#[should_panic(expected = "already mapped")]
fn mapping_twice_panics() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    let root = scene.root();
    view.map(&mut scene, WorkspaceId(2), Layer::Shell, root);
}

#[test]
fn creation_failure_unwinds() {
    let mut scene = MemoryScene::with_node_limit(4);
    let root = scene.root();
    let result = View::new(
        &mut scene,
        root,
        ViewId(3),
        Box::new(StaticView::new(10, 10).with_surface(SurfaceId(1))),
        Some(&DecorationConfig::default()),
        None,
    );
    assert!(result.is_err());
    assert_eq!(scene.node_count(), 1);
}

#[test]
fn surface_node_tracks_size() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    view.set_position(&mut scene, 100, 100);
    let hit = scene.node_at(739.0, 579.0).unwrap();
    assert_eq!(Some(hit.node), view.surface_node());

    view.set_size(&mut scene, 200, 100);
    assert!(scene.node_at(400.0, 150.0).is_none());
}

#[test]
fn title_and_app_id_are_copied() {
    let mut scene = MemoryScene::new();
    let mut view = plain_view(&mut scene);
    let mut title = String::from("foot");
    view.set_title(&title);
    title.push_str(" changed");
    view.set_app_id("org.codeberg.dnkl.foot");
    assert_eq!(view.title(), Some("foot"));
    assert_eq!(view.app_id(), Some("org.codeberg.dnkl.foot"));
}

#[test]
fn activation_hands_keyboard_over() {
    let mut scene = MemoryScene::new();
    let seat = HeadlessSeat::new();
    seat.press_key(42);
    let mut handle = seat.clone();
    let mut view = mapped_plain(&mut scene);

    view.set_active(&mut scene, &mut handle, true);
    assert_eq!(handle.keyboard_focus(), Some(SurfaceId(10)));
    assert_eq!(handle.keyboard_state().keycodes, vec![42]);

    view.set_active(&mut scene, &mut handle, false);
    assert_eq!(handle.keyboard_focus(), None);
}

#[test]
fn deactivation_keeps_foreign_keyboard_focus() {
    let mut scene = MemoryScene::new();
    let mut seat = HeadlessSeat::new();
    let mut view = mapped_plain(&mut scene);

    view.set_active(&mut scene, &mut seat, true);
    let state = seat.keyboard_state();
    seat.keyboard_enter(SurfaceId(99), &state);
    view.set_active(&mut scene, &mut seat, false);
    assert_eq!(seat.keyboard_focus(), Some(SurfaceId(99)));
}

#[test]
fn activation_cascades_to_interactives() {
    let mut scene = MemoryScene::new();
    let mut seat = HeadlessSeat::new();
    let mut view = mapped_decorated(&mut scene);
    assert!(view.interactives().all(|i| !i.is_focused()));

    view.set_active(&mut scene, &mut seat, true);
    assert_eq!(view.interactive_count(), 2);
    assert!(view.interactives().all(|i| i.is_focused()));

    view.set_active(&mut scene, &mut seat, false);
    assert!(view.interactives().all(|i| !i.is_focused()));
}

#[test]
fn maximize_round_trip_restores_organic_geometry() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    view.set_position(&mut scene, 120, 80);
    let organic = view.geometry();

    view.set_maximized(&mut scene, true, &areas());
    assert_eq!(view.geometry(), areas().maximize);

    view.set_maximized(&mut scene, false, &areas());
    assert_eq!(view.geometry(), organic);
}

#[test]
fn maximize_twice_equals_once() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    view.set_position(&mut scene, 10, 10);
    let organic = view.geometry();

    view.set_maximized(&mut scene, true, &areas());
    let once = view.geometry();
    view.set_maximized(&mut scene, true, &areas());
    assert_eq!(view.geometry(), once);
    assert_eq!(view.organic(), organic);

    let log = view.imp_as::<StaticView>().unwrap().log.clone();
    assert_eq!(log.borrow().maximized, vec![true]);
}

#[test]
fn fullscreen_from_maximized_returns_to_maximized() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    view.set_position(&mut scene, 50, 60);
    let organic = view.geometry();

    view.set_maximized(&mut scene, true, &areas());
    view.set_fullscreen(&mut scene, true, &areas());
    assert_eq!(view.geometry(), areas().fullscreen);

    view.set_fullscreen(&mut scene, false, &areas());
    assert_eq!(view.geometry(), areas().maximize);

    view.set_maximized(&mut scene, false, &areas());
    assert_eq!(view.geometry(), organic);
}

#[test]
fn decorated_maximize_leaves_room_for_titlebar() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_decorated(&mut scene);
    view.set_maximized(&mut scene, true, &areas());

    let (top, bottom) = view.decoration().unwrap().extents();
    let g = view.geometry();
    assert_eq!(g.y, 30 + top as i32);
    assert_eq!(g.height, 1050 - (top + bottom) as i32);
}

#[test]
fn fullscreen_hides_decoration() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_decorated(&mut scene);
    let bar = view.decoration().unwrap().bar();
    view.set_fullscreen(&mut scene, true, &areas());
    assert!(!scene.is_visible(bar));
    view.set_fullscreen(&mut scene, false, &areas());
    assert!(scene.is_visible(bar));
}

#[test]
fn shading_hides_content_but_keeps_titlebar() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_decorated(&mut scene);
    let bar = view.decoration().unwrap().bar();

    assert!(view.set_shaded(&mut scene, true));
    assert!(view.set_shaded(&mut scene, true));
    assert!(view.is_shaded());
    assert!(!scene.is_visible(view.content()));
    assert!(scene.is_visible(bar));

    view.set_shaded(&mut scene, false);
    assert!(scene.is_visible(view.content()));
}

#[test]
fn shading_without_decoration_is_refused() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    assert!(!view.set_shaded(&mut scene, true));
    assert!(!view.is_shaded());
}

#[test]
fn decoration_hits() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_decorated(&mut scene);
    view.set_position(&mut scene, 100, 100);

    let deco = view.decoration().unwrap();
    let (top, _) = deco.extents();

    // Middle of the title bar, away from the buttons.
    let hit = scene.node_at(300.0, 100.0 - f64::from(top) + 2.0).unwrap();
    assert_eq!(deco.hit(hit.node), Some(DecorationHit::Move));

    // Bottom-right corner of the resize bar.
    let hit = scene.node_at(498.0, 100.0 + 300.0 + 1.0 + 2.0).unwrap();
    assert_eq!(
        deco.hit(hit.node),
        Some(DecorationHit::Resize(Edges::BOTTOM | Edges::RIGHT))
    );

    // Close button at the right end of the title bar.
    let hit = scene.node_at(495.0, 100.0 - f64::from(top) + 2.0).unwrap();
    assert_eq!(hit.node, deco.close_button());
}

#[test]
fn double_click_on_bar() {
    let mut scene = MemoryScene::new();
    let mut view = decorated_view(&mut scene);
    let deco = view.decoration_mut().unwrap();
    assert!(!deco.bar_pressed(1000));
    assert!(deco.bar_pressed(1200));
    assert!(!deco.bar_pressed(1300));
    assert!(!deco.bar_pressed(2000));
}

#[test]
fn pointer_focus_sends_leave_before_enter() {
    let mut scene = MemoryScene::new();
    let mut seat = HeadlessSeat::new();
    let mut view = mapped_decorated(&mut scene);
    view.set_active(&mut scene, &mut seat, true);
    let close = view.decoration().unwrap().close_button();
    let iconify = view.decoration().unwrap().iconify_button();

    // Press close, slide onto iconify: close loses its pressed look.
    view.update_pointer_focus(&mut scene, Some(close));
    let (cx, cy) = scene.absolute_position(close).unwrap();
    view.interactive_button(
        &mut scene,
        close,
        f64::from(cx) + 1.0,
        f64::from(cy) + 1.0,
        &ButtonEvent::pressed(BTN_LEFT),
    );
    assert!(view.interactive(close).unwrap().as_button().unwrap().is_pressed());

    view.update_pointer_focus(&mut scene, Some(iconify));
    assert_eq!(view.pointer_focus(), Some(iconify));
    assert!(!view.interactive(close).unwrap().as_button().unwrap().is_pressed());

    view.update_pointer_focus(&mut scene, Some(close));
    assert!(view.interactive(close).unwrap().as_button().unwrap().is_pressed());

    let outcome = view.interactive_button(
        &mut scene,
        close,
        f64::from(cx) + 1.0,
        f64::from(cy) + 1.0,
        &ButtonEvent::released(BTN_LEFT),
    );
    assert_eq!(outcome.action, Some(Action::WindowClose));
}

#[test]
fn non_interactive_hit_clears_pointer_focus() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_decorated(&mut scene);
    let close = view.decoration().unwrap().close_button();
    view.update_pointer_focus(&mut scene, Some(close));
    view.update_pointer_focus(&mut scene, view.surface_node());
    assert_eq!(view.pointer_focus(), None);
}

#[test]
fn chrome_interactives_are_always_focused() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let mut view = View::new(
        &mut scene,
        root,
        ViewId(9),
        Box::new(StaticView::new(64, 64).with_kind(ViewKind::Dock)),
        None,
        None,
    )
    .unwrap();
    let node = view
        .add_interactive(
            &mut scene,
            InteractiveKind::Button(Button::new(ButtonTextures::new(8, 8), Action::None)),
        )
        .unwrap();
    assert!(view.interactive(node).unwrap().is_focused());
}

#[test]
fn remove_interactive_releases_textures() {
    let mut scene = MemoryScene::new();
    let mut view = mapped_plain(&mut scene);
    let textures = ButtonTextures::new(8, 8);
    let node = view
        .add_interactive(
            &mut scene,
            InteractiveKind::Button(Button::new(textures.clone(), Action::None)),
        )
        .unwrap();
    view.update_pointer_focus(&mut scene, Some(node));

    assert!(view.remove_interactive(&mut scene, node));
    assert_eq!(view.pointer_focus(), None);
    assert!(!scene.exists(node));
    assert_eq!(textures.blurred.ref_count(), 1);
    assert!(!view.remove_interactive(&mut scene, node));
}

#[test]
fn destroy_removes_subtree() {
    let mut scene = MemoryScene::new();
    let tex = Texture::new(4, 4);
    let mut view = decorated_view(&mut scene);
    view.add_interactive(
        &mut scene,
        InteractiveKind::Tile(crate::interactive::Tile::new(tex.clone(), Action::None)),
    )
    .unwrap();
    view.destroy(&mut scene);
    assert_eq!(scene.node_count(), 1);
    assert_eq!(tex.ref_count(), 1);
}
