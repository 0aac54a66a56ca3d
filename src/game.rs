//! Step/observation facade
//!
//! `update` advances the logical state; `draw` renders it and refreshes the
//! observation buffer. The observation is only current after `draw` has run
//! for the latest frame, so automated controllers should call [`Game::step`]
//! (or `update` followed by `draw`) every frame.

use crate::renderer::{DisplaySurface, FrameBuffer, Observation, Renderer, SoftwareRenderer};
use crate::settings::{Settings, SettingsError};
use crate::sim::{Action, FrameFlags, FrameReport, GameState, Player, tick};

/// A running game plus its renderer and observation buffer
pub struct Game<R: Renderer = SoftwareRenderer> {
    state: GameState,
    renderer: R,
    frame: FrameBuffer,
    observation: Observation,
    last_report: FrameReport,
}

impl Game<SoftwareRenderer> {
    /// New game with the default software renderer
    pub fn new(settings: Settings) -> Result<Self, SettingsError> {
        Self::with_renderer(settings, SoftwareRenderer::default())
    }
}

impl<R: Renderer> Game<R> {
    pub fn with_renderer(settings: Settings, renderer: R) -> Result<Self, SettingsError> {
        settings.validate()?;
        let state = GameState::new(&settings);
        Ok(Self {
            last_report: FrameReport {
                terminal: !state.running,
                ..FrameReport::default()
            },
            frame: FrameBuffer::new(settings.width, settings.height),
            observation: Observation::blank(settings.width, settings.height),
            state,
            renderer,
        })
    }

    /// Advance one frame. No-op once the game is over.
    pub fn update(&mut self, action: Action) -> FrameReport {
        self.last_report = tick(&mut self.state, action);
        self.last_report
    }

    /// Render the current state into the off-screen buffer and refresh the
    /// observation. When a target is given the frame is also presented to it.
    pub fn draw(&mut self, target: Option<&mut dyn DisplaySurface>) {
        self.renderer.render(&self.state, &mut self.frame);
        self.observation.capture(&self.frame, self.state.frame);

        if let Some(surface) = target {
            if let Err(err) = surface.present(&self.frame) {
                log::warn!("Failed to present frame {}: {err}", self.state.frame);
            }
        }
    }

    /// `update` then `draw`
    pub fn step(&mut self, action: Action, target: Option<&mut dyn DisplaySurface>) -> FrameReport {
        let report = self.update(action);
        self.draw(target);
        report
    }

    pub fn observation(&self) -> &Observation {
        &self.observation
    }

    /// True when the observation reflects the latest simulated frame
    pub fn is_observation_current(&self) -> bool {
        self.observation.captured_at() == Some(self.state.frame)
    }

    pub fn frame_buffer(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn player(&self) -> &Player {
        &self.state.player
    }

    pub fn is_running(&self) -> bool {
        self.state.running
    }

    pub fn score(&self) -> u64 {
        self.state.score
    }

    /// Telemetry flags from the last update
    pub fn flags(&self) -> FrameFlags {
        self.state.flags
    }

    pub fn last_report(&self) -> &FrameReport {
        &self.last_report
    }
}
