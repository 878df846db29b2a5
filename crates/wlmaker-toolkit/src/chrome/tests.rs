use wlmaker_common::{Action, Rect, ViewId};
use wlmaker_config::schema::{DockConfig, DockEdge, LauncherConfig, MenuConfig, MenuItemConfig};

use super::*;
use crate::input::{ButtonEvent, BTN_LEFT};
use crate::scene::{MemoryScene, SceneGraph};

fn dock_config(edge: DockEdge) -> DockConfig {
    DockConfig {
        enabled: true,
        edge,
        tile_size: 48,
        launchers: vec![
            LauncherConfig {
                name: "Terminal".into(),
                command: "foot".into(),
            },
            LauncherConfig {
                name: "Browser".into(),
                command: "firefox".into(),
            },
        ],
    }
}

#[test]
fn dock_has_one_tile_per_launcher() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let (view, dock) = Dock::create(&mut scene, root, ViewId(1), &dock_config(DockEdge::Right)).unwrap();

    assert_eq!(dock.tiles().len(), 2);
    assert_eq!(view.size(), (48, 96));
    let actions: Vec<Action> = dock
        .tiles()
        .iter()
        .map(|n| view.interactive(*n).unwrap().as_tile().unwrap().action().clone())
        .collect();
    assert_eq!(
        actions,
        vec![Action::Launch("foot".into()), Action::Launch("firefox".into())]
    );
    assert_eq!(scene.position(dock.tiles()[1]), Some((0, 48)));
}

#[test]
fn dock_tiles_are_focused_without_activation() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let (view, dock) = Dock::create(&mut scene, root, ViewId(1), &dock_config(DockEdge::Left)).unwrap();
    assert!(!view.is_active());
    assert!(view.interactive(dock.tiles()[0]).unwrap().is_focused());
}

#[test]
fn dock_creation_failure_unwinds() {
    let mut scene = MemoryScene::with_node_limit(4);
    let root = scene.root();
    let err = Dock::create(&mut scene, root, ViewId(1), &dock_config(DockEdge::Left));
    assert!(err.is_err());
    assert_eq!(scene.node_count(), 1);
}

#[test]
fn dock_origin_follows_edge() {
    let output = Rect::new(100, 50, 1000, 800);
    assert_eq!(dock_origin(output, DockEdge::Left, 64, 0), (100, 50));
    assert_eq!(dock_origin(output, DockEdge::Right, 64, 64), (1036, 114));
}

#[test]
fn dock_tile_click_launches() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let (mut view, dock) = Dock::create(&mut scene, root, ViewId(1), &dock_config(DockEdge::Left)).unwrap();
    let tile = dock.tiles()[0];

    view.interactive_button(&mut scene, tile, 10.0, 10.0, &ButtonEvent::pressed(BTN_LEFT));
    let outcome =
        view.interactive_button(&mut scene, tile, 10.0, 10.0, &ButtonEvent::released(BTN_LEFT));
    assert_eq!(outcome.action, Some(Action::Launch("foot".into())));
}

#[test]
fn clip_buttons_switch_workspaces() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let (view, clip) =
        Clip::create(&mut scene, root, ViewId(2), &dock_config(DockEdge::Right), "Main").unwrap();

    let action = |node| {
        view.interactive(node)
            .unwrap()
            .as_button()
            .unwrap()
            .action()
            .clone()
    };
    assert_eq!(action(clip.previous_button()), Action::WorkspacePrevious);
    assert_eq!(action(clip.next_button()), Action::WorkspaceNext);
    assert_eq!(scene.position(clip.next_button()), Some((24, 24)));
}

#[test]
fn clip_redraw_shows_new_name() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let (_view, mut clip) =
        Clip::create(&mut scene, root, ViewId(2), &dock_config(DockEdge::Right), "Main").unwrap();
    assert_eq!(clip.workspace_name(), "Main");
    assert_eq!(clip.redraws(), 1);

    let before = scene.texture(clip.label()).cloned().unwrap();
    clip.redraw(&mut scene, "Work");
    assert_eq!(clip.workspace_name(), "Work");
    assert_eq!(clip.redraws(), 2);
    assert_ne!(scene.texture(clip.label()), Some(&before));
    // The scene released the old label.
    assert_eq!(before.ref_count(), 1);
}

#[test]
fn root_menu_lists_configured_items() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let config = MenuConfig {
        item_height: 20,
        width: 150,
        items: vec![
            MenuItemConfig {
                label: "Next".into(),
                action: Action::WorkspaceNext,
            },
            MenuItemConfig {
                label: "Quit".into(),
                action: Action::Quit,
            },
        ],
    };
    let (view, menu) = RootMenu::create(&mut scene, root, ViewId(3), &config).unwrap();
    assert_eq!(view.size(), (150, 40));
    let items = view.interactive(menu.node()).unwrap().as_menu().unwrap().items();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].action, Action::Quit);
}

#[test]
fn root_menu_stays_on_output() {
    let mut scene = MemoryScene::new();
    let root = scene.root();
    let (mut view, menu) =
        RootMenu::create(&mut scene, root, ViewId(3), &MenuConfig::default()).unwrap();
    let (w, h) = view.size();
    let output = Rect::new(0, 0, 800, 600);

    menu.place(&mut scene, &mut view, 10, 20, Some(output));
    assert_eq!(view.position(), (10, 20));

    menu.place(&mut scene, &mut view, 790, 590, Some(output));
    assert_eq!(view.position(), (800 - w as i32, 600 - h as i32));
}
