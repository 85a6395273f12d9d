//! Headless UI demo
//!
//! Builds a title screen and a scrolling two-layer tile map, then drives the
//! host through a scripted mouse path against a recording surface and logs
//! what was drawn and which actions fired.
//!
//! Usage: `ui_demo [config.toml | config.ron]`

use std::time::Duration;

use image::{Rgba, RgbaImage};
use rand::prelude::*;
use rust_ui::config::ConfigError;
use rust_ui::foundation::logging;
use rust_ui::prelude::*;
use thiserror::Error;

const START_BUTTON: &str = "start";
const COIN: &str = "coin";
const FRAME: Duration = Duration::from_millis(16);

#[derive(Debug, Error)]
enum DemoError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("UI error: {0}")]
    Ui(#[from] UiError),
}

fn load_config() -> Result<UiConfig, DemoError> {
    match std::env::args().nth(1) {
        Some(path) => Ok(UiConfig::load_from_file(path)?),
        None => Ok(UiConfig::default()),
    }
}

/// Tilesheet of `count` flat-colored tiles in one row
fn tile_sheet(rng: &mut impl Rng, tile_size: u32, count: u32) -> Texture {
    let mut sheet = RgbaImage::new(tile_size * count, tile_size);
    for tile in 0..count {
        let color = Rgba([rng.gen(), rng.gen(), rng.gen(), 255]);
        for y in 0..tile_size {
            for x in 0..tile_size {
                sheet.put_pixel(tile * tile_size + x, y, color);
            }
        }
    }
    Texture::from_image(sheet)
}

fn title_screen(rng: &mut impl Rng, rectangle: Rect) -> Result<Screen, DemoError> {
    let mut screen = Screen::new("title", 0, rectangle);
    screen.set_background(Texture::solid_color(1, 1, [20, 20, 40, 255]))?;

    let component = screen.component_mut();
    component.add_element(
        Element::image(
            START_BUTTON,
            Vec2::new(350.0, 280.0),
            Texture::solid_color(100, 40, [200, 200, 200, 255]),
            1,
        )
        .with_colors(colors::white(), colors::gold()),
    );

    let coin_sheet = tile_sheet(rng, 32, 4);
    component.add_element(Element::sprite(COIN, Vec2::new(20.0, 20.0), coin_sheet, 32, 1)?);
    Ok(screen)
}

fn world_map(rng: &mut impl Rng, config: &UiConfig) -> Result<TileMap, DemoError> {
    let map_config = config.tile_map.clone().with_layers(config.tile_map.layers.max(2));
    let sheet = tile_sheet(rng, map_config.tile_size, 6);
    let mut map = TileMap::from_config(&map_config, config.screen.rectangle(), 1, &sheet)?;

    let width = map_config.map_width as usize;
    let height = map_config.map_height as usize;
    let ground: Vec<Option<usize>> = (0..width * height)
        .map(|_| Some(rng.gen_range(0..4)))
        .collect();
    let props: Vec<Option<usize>> = (0..width * height)
        .map(|_| rng.gen_bool(0.1).then(|| rng.gen_range(4..6)))
        .collect();

    let placed = map.load_layers(&LayerGrid::new(width, height, vec![ground, props])?)?;
    log::info!("Placed {} tiles", placed);
    Ok(map)
}

/// Cursor sweeps across the screen, clicks the start button, then Escape
fn script(frame: usize) -> (MouseState, KeyboardState) {
    let keys = KeyboardState::default();
    match frame {
        0..=29 => {
            let x = 10 * frame as i32;
            (MouseState::at(Point::new(x, 290)), keys)
        }
        30 => (MouseState::at(Point::new(400, 300)).with_buttons(MouseButtons::LEFT), keys),
        31..=59 => {
            let offset = (frame as i32 - 30) * 8;
            (MouseState::at(Point::new(400, 300)).with_scroll(offset), keys)
        }
        _ => (MouseState::at(Point::new(400, 300)), KeyboardState::new([KeyCode::Escape])),
    }
}

fn run(config: &UiConfig) -> Result<(), DemoError> {
    let mut rng = thread_rng();
    let mut host = UiHost::new(config)?;

    let screen = title_screen(&mut rng, host.screen_rectangle())?;
    let start = screen
        .component()
        .element(START_BUTTON)
        .map(Element::handle)
        .ok_or_else(|| UiError::ElementNotFound(START_BUTTON.to_string()))?;

    let mut title = Scene::new("title", host.screen_rectangle());
    title.add_panel(Box::new(screen));
    host.set_current_scene(title);

    host.responder_mut().register(UserAction::new(
        "start_game",
        EventType::LeftClick,
        InputSource::from_element(start),
    ));
    host.responder_mut().register(UserAction::new(
        "quit",
        EventType::Keyboard,
        InputSource::from_keys([KeyCode::Escape, KeyCode::Q]),
    ));

    let mut surface = RecordingSurface::new();
    let mut frame = 0;
    while !host.exit_requested() {
        let (mouse, keyboard) = script(frame);
        surface.clear();
        let report = host.step(FRAME, mouse, &keyboard, &mut surface)?;

        for event in &report.element_events {
            handle_element_event(&mut host, event)?;
        }
        animate(&mut host, frame)?;

        for action in &report.actions {
            log::info!("Frame {}: action '{}'", frame, action);
            if action == "start_game" {
                let mut world = Scene::new("world", host.screen_rectangle());
                world.add_panel(Box::new(world_map(&mut rng, config)?));
                host.set_current_scene(world);
            }
        }

        if host.debug_mode() {
            log::info!(
                "Frame {}: {} draw calls in {} batches",
                frame,
                surface.calls().len(),
                surface.batches()
            );
        }
        frame += 1;
    }

    log::info!("Demo finished after {} frames", frame);
    Ok(())
}

fn handle_element_event(host: &mut UiHost, event: &ElementEvent) -> Result<(), DemoError> {
    let Some(screen) = host.scene_mut().and_then(Scene::panel_as_mut::<Screen>) else {
        return Ok(());
    };

    match event.kind {
        ElementEventKind::MouseOver if event.id == START_BUTTON => {
            screen.component_mut().highlight(START_BUTTON)?;
        }
        ElementEventKind::MouseGone if event.id == START_BUTTON => {
            screen.component_mut().unhighlight(START_BUTTON)?;
        }
        _ => {}
    }
    Ok(())
}

/// Steps the coin sprite on the title screen and pans the world map
fn animate(host: &mut UiHost, frame: usize) -> Result<(), DemoError> {
    let Some(scene) = host.scene_mut() else {
        return Ok(());
    };

    if let Some(screen) = scene.panel_as_mut::<Screen>() {
        let coin = screen.component_mut().element_mut(COIN).and_then(Element::as_sprite_mut);
        if let Some(coin) = coin {
            let next = (frame / 8) % coin.frame_count();
            coin.set_current_frame(next)?;
        }
    }
    if let Some(map) = scene.panel_as_mut::<TileMap>() {
        let pan = frame as f32 * 4.0;
        map.set_viewport_center(Vec2::new(pan, pan / 2.0));
    }
    Ok(())
}

fn main() {
    let config = load_config();
    let level = config.as_ref().map_or("info", |c| c.engine.log_level.as_str());
    logging::init_with_level(level);

    log::info!("Starting UI demo");
    let result = config.and_then(|config| run(&config));
    if let Err(e) = result {
        log::error!("UI demo failed: {}", e);
        std::process::exit(1);
    }
}
