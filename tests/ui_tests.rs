//! UI automation tests using egui_kittest and AccessKit
//!
//! These tests drive the breathing screen through its accessibility tree and
//! check the session state and the audio commands that come out.

use breathe::audio::{AudioCommand, AudioSink};
use breathe::controller::BreathingController;
use breathe::session::{Phase, Session};
use breathe::ui::components::{
    APPLY_LABEL, BACKGROUND_SOUND_LABEL, CIRCLE_LABEL, CLOSE_LABEL, CYCLE_SOUND_LABEL,
    PAUSE_LABEL, PLAY_LABEL, SETTINGS_LABEL,
};
use breathe::ui::{BreathingScreen, Theme};
use egui_kittest::kittest::Queryable;
use egui_kittest::Harness;
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Instant;

/// Audio sink that remembers what it was asked to play
#[derive(Clone, Default)]
struct RecordingSink(Rc<RefCell<Vec<AudioCommand>>>);

impl AudioSink for RecordingSink {
    fn dispatch(&mut self, command: AudioCommand) {
        self.0.borrow_mut().push(command);
    }
}

/// Application state wrapper for testing
struct TestApp {
    controller: BreathingController,
    theme: Theme,
    audio_log: Rc<RefCell<Vec<AudioCommand>>>,
}

impl TestApp {
    fn new() -> Self {
        let sink = RecordingSink::default();
        let audio_log = Rc::clone(&sink.0);
        Self {
            controller: BreathingController::new(Session::new(), Box::new(sink)),
            theme: Theme::night(),
            audio_log,
        }
    }

    fn commands(&self) -> Vec<AudioCommand> {
        self.audio_log.borrow().clone()
    }
}

/// Render the breathing screen and feed its events back to the controller
fn render(ctx: &egui::Context, app: &mut TestApp) {
    let presentation = app.controller.presentation();
    let events = BreathingScreen::new(&presentation, &app.theme).show(ctx);
    for event in events {
        app.controller.handle(event, Instant::now());
    }
}

fn harness() -> Harness<'static, TestApp> {
    Harness::builder()
        .with_size(egui::Vec2::new(520.0, 760.0))
        .build_state(render, TestApp::new())
}

/// Test that the main controls are exposed with their labels
#[test]
fn test_controls_are_accessible() {
    let mut harness = harness();
    harness.run();

    let _circle = harness.get_by_label(CIRCLE_LABEL);
    let _play = harness.get_by_label(PLAY_LABEL);
    let _settings = harness.get_by_label(SETTINGS_LABEL);
    let _phase = harness.get_by_label("Fase actual: Inhalar");
    let _footer =
        harness.get_by_label("Sigue el círculo para una respiración relajante • 4s por fase");
}

/// Test that clicking the circle starts the session and the ambience
#[test]
fn test_click_circle_starts_session() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(CIRCLE_LABEL).click();
    harness.run();

    let app = harness.state();
    assert!(app.controller.session().is_running());
    assert_eq!(app.controller.session().phase(), Phase::Inhale);
    assert_eq!(app.controller.session().remaining_seconds(), 4);
    assert_eq!(app.commands(), vec![AudioCommand::StartAmbience]);
}

/// Test that the play button turns into a pause button and stops again
#[test]
fn test_play_then_pause() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(PLAY_LABEL).click();
    harness.run();
    assert!(harness.state().controller.session().is_running());

    harness.get_by_label(PAUSE_LABEL).click();
    harness.run();

    let app = harness.state();
    assert!(!app.controller.session().is_running());
    assert_eq!(
        app.commands(),
        vec![AudioCommand::StartAmbience, AudioCommand::StopAmbience]
    );
}

/// Test that the settings button opens the panel while stopped
#[test]
fn test_settings_open_and_close() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(SETTINGS_LABEL).click();
    harness.run();
    assert!(harness.state().controller.ui_state().settings_open);

    let _cycle = harness.get_by_label(CYCLE_SOUND_LABEL);
    let _background = harness.get_by_label(BACKGROUND_SOUND_LABEL);

    harness.get_by_label(CLOSE_LABEL).click();
    harness.run();
    assert!(!harness.state().controller.ui_state().settings_open);
}

/// Test that "Aplicar cambios" closes the panel
#[test]
fn test_apply_closes_settings() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(SETTINGS_LABEL).click();
    harness.run();

    harness.get_by_label(APPLY_LABEL).click();
    harness.run();
    assert!(!harness.state().controller.ui_state().settings_open);
}

/// Test that settings cannot be opened while the session runs
#[test]
fn test_settings_locked_while_running() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(PLAY_LABEL).click();
    harness.run();

    harness.get_by_label(SETTINGS_LABEL).click();
    harness.run();

    assert!(!harness.state().controller.ui_state().settings_open);
    assert!(harness.query_by_label(CYCLE_SOUND_LABEL).is_none());
}

/// Test that the sound checkboxes change the flags while stopped
#[test]
fn test_sound_checkboxes_toggle_flags() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(SETTINGS_LABEL).click();
    harness.run();

    harness.get_by_label(CYCLE_SOUND_LABEL).click();
    harness.run();
    harness.get_by_label(BACKGROUND_SOUND_LABEL).click();
    harness.run();

    let sounds = harness.state().controller.session().sounds();
    assert!(!sounds.cycle_sound_enabled);
    assert!(!sounds.background_sound_enabled);

    // Starting with the background sound off must not start the ambience
    harness.get_by_label(APPLY_LABEL).click();
    harness.run();
    harness.get_by_label(PLAY_LABEL).click();
    harness.run();

    let app = harness.state();
    assert!(app.controller.session().is_running());
    assert!(app.commands().is_empty());
}

/// Test that checkboxes left visible during a run are inert
#[test]
fn test_sound_checkboxes_ignored_while_running() {
    let mut harness = harness();
    harness.run();

    harness.get_by_label(SETTINGS_LABEL).click();
    harness.run();

    // The panel stays up when the session starts under it
    harness.get_by_label(CIRCLE_LABEL).click();
    harness.run();
    assert!(harness.state().controller.session().is_running());

    harness.get_by_label(CYCLE_SOUND_LABEL).click();
    harness.run();

    assert!(
        harness
            .state()
            .controller
            .session()
            .sounds()
            .cycle_sound_enabled
    );
}
