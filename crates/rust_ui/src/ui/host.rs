//! UI Host
//!
//! Drives one frame at a time: tick the clock, listen to the devices,
//! broadcast input into the current scene, update it, draw it, then turn the
//! scene's element events and the frame's key presses into user input for the
//! responder. Escape requests exit.

use std::time::Duration;

use crate::core::config::UiConfig;
use crate::events::ElementEvent;
use crate::foundation::math::Rect;
use crate::foundation::time::{FrameTime, Timer};
use crate::input::{
    InputListener, InputResponder, KeyCode, KeyboardState, MouseState, UserInput,
};
use crate::ui::error::UiResult;
use crate::ui::scene::Scene;
use crate::ui::surface::DrawSurface;

/// What happened during one frame
#[derive(Debug, Clone, Default)]
pub struct FrameReport {
    /// Frame timing used for update and draw
    pub time: FrameTime,
    /// Broadcast input events published to the scene
    pub input_events: usize,
    /// Element events no handler consumed
    pub element_events: Vec<ElementEvent>,
    /// Names of the user actions triggered
    pub actions: Vec<String>,
    /// Whether exit has been requested
    pub exit_requested: bool,
}

/// Frame driver owning the current scene
pub struct UiHost {
    listener: InputListener,
    responder: InputResponder,
    timer: Timer,
    scene: Option<Scene>,
    screen: Rect,
    debug_mode: bool,
    frames: u64,
    exit_requested: bool,
}

impl UiHost {
    /// Create a host from configuration
    pub fn new(config: &UiConfig) -> UiResult<Self> {
        config.validate()?;
        log::info!(
            "UI host {}x{}, double click window {} ms",
            config.screen.width,
            config.screen.height,
            config.input.double_click_ms
        );

        Ok(Self {
            listener: InputListener::new(&config.input),
            responder: InputResponder::new(),
            timer: Timer::new(),
            scene: None,
            screen: config.screen.rectangle(),
            debug_mode: config.engine.debug_mode,
            frames: 0,
            exit_requested: false,
        })
    }

    /// Screen rectangle new scenes are sized to
    pub const fn screen_rectangle(&self) -> Rect {
        self.screen
    }

    /// Current scene
    pub const fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    /// Current scene, mutable
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.scene.as_mut()
    }

    /// Switch scenes, hiding the old one and showing the new one
    pub fn set_current_scene(&mut self, mut scene: Scene) -> Option<Scene> {
        let mut previous = self.scene.take();
        if let Some(old) = previous.as_mut() {
            old.hide();
        }

        scene.set_rectangle(self.screen);
        scene.show();
        self.scene = Some(scene);
        previous
    }

    /// Whether per-frame stats are logged
    pub const fn debug_mode(&self) -> bool {
        self.debug_mode
    }

    /// Frames run so far
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// Action registry
    pub const fn responder(&self) -> &InputResponder {
        &self.responder
    }

    /// Action registry, mutable
    pub fn responder_mut(&mut self) -> &mut InputResponder {
        &mut self.responder
    }

    /// Whether exit has been requested
    pub const fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    /// Ask the loop to stop after this frame
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Run one frame timed by the wall clock
    pub fn frame(
        &mut self,
        mouse: MouseState,
        keyboard: &KeyboardState,
        surface: &mut dyn DrawSurface,
    ) -> UiResult<FrameReport> {
        let time = self.timer.tick();
        self.run(time, mouse, keyboard, surface)
    }

    /// Run one frame of a fixed length
    pub fn step(
        &mut self,
        step: Duration,
        mouse: MouseState,
        keyboard: &KeyboardState,
        surface: &mut dyn DrawSurface,
    ) -> UiResult<FrameReport> {
        let time = self.timer.advance(step);
        self.run(time, mouse, keyboard, surface)
    }

    fn run(
        &mut self,
        time: FrameTime,
        mouse: MouseState,
        keyboard: &KeyboardState,
        surface: &mut dyn DrawSurface,
    ) -> UiResult<FrameReport> {
        let input = self.listener.update(&time, mouse, keyboard);

        let mut element_events = Vec::new();
        if let Some(scene) = self.scene.as_mut() {
            for event in &input.events {
                scene.publish(event);
            }
            scene.update(&time);
            scene.draw(&time, surface)?;
            element_events = scene.dispatch_events();
        }

        if input.keys_pressed.contains(&KeyCode::Escape) {
            log::info!("Escape pressed, exit requested");
            self.exit_requested = true;
        }

        let actions = element_events
            .iter()
            .filter_map(UserInput::from_element_event)
            .chain(input.keys_pressed.iter().copied().map(UserInput::from_key))
            .flat_map(|user_input| {
                self.responder
                    .respond(&user_input)
                    .into_iter()
                    .map(str::to_string)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<String>>();

        self.frames += 1;
        if self.debug_mode {
            log::debug!(
                "Frame {}: {} input events, {} element events, actions {:?}",
                self.frames,
                input.events.len(),
                element_events.len(),
                actions
            );
        }

        Ok(FrameReport {
            time,
            input_events: input.events.len(),
            element_events,
            actions,
            exit_requested: self.exit_requested,
        })
    }
}
