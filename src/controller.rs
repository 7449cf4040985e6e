//! Breathing session controller
//!
//! Ties the session state machine to the tick scheduler, the audio sink and
//! the UI flags. The view reports `UiEvent`s here and reads back a
//! `Presentation`; the frame loop calls `advance` with the current time.

use crate::audio::{AudioCommand, AudioSink, SilentAudio};
use crate::config::BreatheConfig;
use crate::session::{Presentation, Session, SessionEffect};
use crate::timer::TickScheduler;
use crate::ui::{UiEvent, UiState};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Owns everything the breathing screen needs
pub struct BreathingController {
    session: Session,
    ui: UiState,
    scheduler: TickScheduler,
    audio: Box<dyn AudioSink>,
}

impl BreathingController {
    /// Create a controller around an existing session
    pub fn new(session: Session, audio: Box<dyn AudioSink>) -> Self {
        Self::with_scheduler(session, TickScheduler::default(), audio)
    }

    /// Create a controller with a custom tick scheduler
    pub fn with_scheduler(
        session: Session,
        scheduler: TickScheduler,
        audio: Box<dyn AudioSink>,
    ) -> Self {
        Self {
            session,
            ui: UiState::default(),
            scheduler,
            audio,
        }
    }

    /// Create a stopped session seeded from the configuration
    pub fn from_config(config: &BreatheConfig, audio: Box<dyn AudioSink>) -> Self {
        let session = Session::with_settings(config.phase_duration_seconds, config.sounds());
        Self::new(session, audio)
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ui_state(&self) -> UiState {
        self.ui
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Presentation model for the current frame
    pub fn presentation(&self) -> Presentation {
        Presentation::from_session(&self.session, self.ui.settings_open)
    }

    /// Apply one user input event
    pub fn handle(&mut self, event: UiEvent, now: Instant) {
        debug!("[SESSION] Event {:?}", event);
        match event {
            UiEvent::ToggleRunning => {
                let effect = self.session.toggle();
                if self.session.is_running() {
                    self.scheduler.arm(now);
                } else {
                    self.scheduler.disarm();
                }
                self.emit(effect);
            }
            UiEvent::OpenSettings => {
                if !self.session.is_running() {
                    self.ui.settings_open = true;
                }
            }
            UiEvent::CloseSettings => {
                self.ui.settings_open = false;
            }
            UiEvent::SetDuration(seconds) => {
                if self.session.set_phase_duration(seconds) {
                    self.scheduler.rearm(now);
                }
            }
            UiEvent::SetCycleSound(enabled) => {
                self.session.set_cycle_sound(enabled);
            }
            UiEvent::SetBackgroundSound(enabled) => {
                self.session.set_background_sound(enabled);
            }
        }
    }

    /// Stop the session; safe to call when already stopped
    pub fn stop(&mut self) {
        self.scheduler.disarm();
        let effect = self.session.stop();
        self.emit(Some(effect));
    }

    /// Stop the session and release the audio backend
    ///
    /// Later audio effects go to a silent sink. Dropping the previous sink
    /// joins its worker thread, if it has one.
    pub fn shutdown(&mut self) {
        self.stop();
        let audio = std::mem::replace(&mut self.audio, Box::new(SilentAudio));
        drop(audio);
        info!("[AUDIO] Backend released");
    }

    /// Apply every tick due at `now`, returning how many fired
    pub fn advance(&mut self, now: Instant) -> u32 {
        let due = self.scheduler.poll(now);
        for _ in 0..due {
            let effect = self.session.tick();
            self.emit(effect);
        }
        due
    }

    /// Time until the next tick, if the session is running
    pub fn time_until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.scheduler.time_until_next(now)
    }

    fn emit(&mut self, effect: Option<SessionEffect>) {
        if let Some(effect) = effect {
            self.audio.dispatch(AudioCommand::from(effect));
        }
    }
}
