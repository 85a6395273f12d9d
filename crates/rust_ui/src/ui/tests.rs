//! End-to-end tests across scene, panels and host

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use crate::core::config::UiConfig;
use crate::events::{ElementEvent, ElementEventKind, EventHandler, EventKind};
use crate::foundation::math::{Point, Rect, Vec2};
use crate::input::{KeyboardState, MouseState};
use crate::ui::{
    Element, LayerGrid, Panel, RecordingSurface, Scene, Screen, Texture, TileMap, UiHost,
};

const FRAME: Duration = Duration::from_millis(16);

struct Recorder {
    seen: Rc<RefCell<Vec<String>>>,
}

impl EventHandler for Recorder {
    fn on_event(&mut self, event: &ElementEvent) -> bool {
        self.seen.borrow_mut().push(event.id.clone());
        true
    }
}

fn tile_map() -> TileMap {
    let sheet = Texture::solid_color(64, 32, [90, 160, 90, 255]);
    let mut map = TileMap::new(
        Rect::empty(),
        1,
        &sheet,
        Point::new(8, 8),
        Rect::new(0, 0, 128, 128),
        2,
        32,
    )
    .unwrap();

    let ground = vec![Some(0); 64];
    let mut props = vec![None; 64];
    props[9] = Some(1);
    map.load_layers(&LayerGrid::new(8, 8, vec![ground, props]).unwrap()).unwrap();
    map
}

fn world() -> Scene {
    let mut hud = Screen::new("hud", 2, Rect::empty());
    hud.component_mut().add_element(Element::image(
        "menu_button",
        Vec2::new(700.0, 10.0),
        Texture::solid_color(80, 30, [255; 4]),
        0,
    ));

    let mut scene = Scene::new("world", Rect::empty());
    scene.add_panel(Box::new(tile_map()));
    scene.add_panel(Box::new(hud));
    scene
}

#[test]
fn test_frame_draws_culled_map_then_hud() {
    let mut host = UiHost::new(&UiConfig::default()).unwrap();
    host.set_current_scene(world());
    let mut surface = RecordingSurface::new();

    host.step(FRAME, MouseState::default(), &KeyboardState::default(), &mut surface)
        .unwrap();

    // Viewport settles at (16, 16), overlapping 5x5 ground tiles
    assert_eq!(surface.batches(), 2);
    assert_eq!(surface.calls().len(), 25 + 1 + 1);
}

#[test]
fn test_hover_uses_viewport_coordinates() {
    let mut host = UiHost::new(&UiConfig::default()).unwrap();
    host.set_current_scene(world());
    let mut surface = RecordingSurface::new();
    let keys = KeyboardState::default();

    host.step(FRAME, MouseState::at(Point::new(500, 500)), &keys, &mut surface)
        .unwrap();
    let report = host
        .step(FRAME, MouseState::at(Point::new(40, 40)), &keys, &mut surface)
        .unwrap();

    let mut over: Vec<&str> = report
        .element_events
        .iter()
        .filter(|e| e.kind == ElementEventKind::MouseOver)
        .map(|e| e.id.as_str())
        .collect();
    over.sort_unstable();
    assert_eq!(over, vec!["image@[1, 1, 0]", "image@[1, 1, 1]"]);
}

#[test]
fn test_handlers_consume_before_host_reports() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut scene = world();
    let map = scene.panel_as_mut::<TileMap>().unwrap();
    map.component_mut()
        .events_mut()
        .register_handler(EventKind::MouseOver, Box::new(Recorder { seen: Rc::clone(&seen) }));

    let mut host = UiHost::new(&UiConfig::default()).unwrap();
    host.set_current_scene(scene);
    let mut surface = RecordingSurface::new();
    let report = host
        .step(FRAME, MouseState::at(Point::new(5, 5)), &KeyboardState::default(), &mut surface)
        .unwrap();

    assert_eq!(*seen.borrow(), vec!["image@[0, 0, 0]".to_string()]);
    assert!(report
        .element_events
        .iter()
        .all(|e| e.kind != ElementEventKind::MouseOver));
}
