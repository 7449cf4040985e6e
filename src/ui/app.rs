//! Main Breathe application struct and eframe integration
//!
//! This module contains the main BreatheApp that implements eframe::App.

use crate::audio::open_sink;
use crate::config::BreatheConfig;
use crate::controller::BreathingController;
use crate::scenario::{AssertionContext, Scenario, ScenarioCommand, ScenarioRunner};
use crate::ui::screen::BreathingScreen;
use crate::ui::theme::Theme;
use std::time::Instant;
use tracing::info;

/// Main Breathe application
pub struct BreatheApp {
    /// Whether the app has been initialized
    initialized: bool,
    /// Session, scheduler and audio
    controller: BreathingController,
    /// UI theme
    theme: Theme,
    /// Scenario runner (if running a scripted scenario)
    scenario: Option<ScenarioRunner>,
    /// Exit code requested by the scenario (if any)
    pending_exit: Option<i32>,
}

impl BreatheApp {
    /// Create a new Breathe application
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: BreatheConfig,
        scenario: Option<Scenario>,
    ) -> Self {
        let theme = Theme::night();
        theme.apply(&cc.egui_ctx);

        let audio = open_sink(&config.assets());
        let controller = BreathingController::from_config(&config, audio);

        Self {
            initialized: false,
            controller,
            theme,
            scenario: scenario.map(ScenarioRunner::new),
            pending_exit: None,
        }
    }

    /// Initialize the application (called on first frame)
    fn initialize(&mut self, now: Instant) {
        if self.initialized {
            return;
        }
        self.initialized = true;

        if let Some(ref mut runner) = self.scenario {
            runner.start(now);
        }

        info!(
            "[SESSION] Ready: {}s per phase, cycle sound {}, background sound {}",
            self.controller.session().phase_duration_seconds(),
            self.controller.session().sounds().cycle_sound_enabled,
            self.controller.session().sounds().background_sound_enabled,
        );
    }

    /// Run every scenario step that is due
    fn process_scenario(&mut self, ctx: &egui::Context, now: Instant) {
        let mut steps = Vec::new();
        if let Some(ref mut runner) = self.scenario {
            while let Some(step) = runner.poll(now) {
                steps.push(step);
            }
        }

        for (command, assertion) in steps {
            match command {
                Some(ScenarioCommand::Apply(event)) => {
                    info!("[SCENARIO] Executing: {:?}", event);
                    self.controller.handle(event, now);
                }
                Some(ScenarioCommand::Exit { code }) => {
                    info!("[SCENARIO] Executing: Exit with code {}", code);
                    self.pending_exit = Some(code);
                }
                None => {}
            }

            if let Some(ref assertion) = assertion {
                let context = AssertionContext::from_controller(&self.controller);
                if let Some(ref mut runner) = self.scenario {
                    runner.check_assertion(assertion, &context);
                }
            }
        }

        if let Some(ref runner) = self.scenario {
            if runner.is_completed() {
                if let Some(code) = self.pending_exit.take() {
                    info!("{}", runner.summary(now));
                    let final_code = runner.exit_code(code);
                    info!("[SCENARIO] Exiting with code {}", final_code);
                    // process::exit skips destructors; join the audio worker first
                    self.controller.shutdown();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    std::process::exit(final_code);
                }
            }
        }
    }
}

impl eframe::App for BreatheApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        // Initialize on first frame
        self.initialize(now);

        // Catch up on ticks that came due since the last frame
        self.controller.advance(now);

        // Process scenario steps (if scripted)
        self.process_scenario(ctx, now);

        let presentation = self.controller.presentation();
        let events = BreathingScreen::new(&presentation, &self.theme).show(ctx);
        for event in events {
            self.controller.handle(event, now);
        }

        // Scenarios poll every frame for timing accuracy; otherwise wake up
        // for the next tick only
        if self.scenario.is_some() {
            ctx.request_repaint();
        } else if let Some(wait) = self.controller.time_until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("[SESSION] Shutting down");
        self.controller.shutdown();
    }
}
