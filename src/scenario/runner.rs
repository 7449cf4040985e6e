//! Scenario runner
//!
//! Hands out scenario actions once their time has come and checks
//! assertions against a snapshot of the session.

use super::{ActionType, Assertion, Scenario};
use crate::controller::BreathingController;
use crate::session::Phase;
use crate::ui::UiEvent;
use std::time::{Duration, Instant};
use tracing::{debug, error, info};

/// What the app should do for one scenario step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioCommand {
    /// Feed this event through the normal input path
    Apply(UiEvent),
    /// Leave the app with this code (overridden to 1 if anything failed)
    Exit { code: i32 },
}

/// Result of an assertion check
#[derive(Debug, Clone, PartialEq)]
pub enum AssertionResult {
    Passed,
    Failed(String),
}

/// Snapshot of the state assertions are checked against
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssertionContext {
    pub running: bool,
    pub phase: Phase,
    pub remaining_seconds: u32,
    pub phase_duration_seconds: u32,
    pub settings_open: bool,
}

impl AssertionContext {
    pub fn from_controller(controller: &BreathingController) -> Self {
        let session = controller.session();
        Self {
            running: session.is_running(),
            phase: session.phase(),
            remaining_seconds: session.remaining_seconds(),
            phase_duration_seconds: session.phase_duration_seconds(),
            settings_open: controller.ui_state().settings_open,
        }
    }
}

/// Plays a scenario against the wall clock
pub struct ScenarioRunner {
    scenario: Scenario,
    start_time: Option<Instant>,
    current_action_index: usize,
    completed: bool,
    passed: bool,
}

impl ScenarioRunner {
    pub fn new(scenario: Scenario) -> Self {
        info!("[SCENARIO] Loaded scenario: {}", scenario.scenario.name);
        if !scenario.scenario.description.is_empty() {
            info!("[SCENARIO] Description: {}", scenario.scenario.description);
        }
        info!("[SCENARIO] Total actions: {}", scenario.actions.len());

        Self {
            scenario,
            start_time: None,
            current_action_index: 0,
            completed: false,
            passed: true,
        }
    }

    /// Start the clock; later calls are ignored
    pub fn start(&mut self, now: Instant) {
        if self.start_time.is_none() {
            self.start_time = Some(now);
            info!("[SCENARIO] Started: {}", self.scenario.scenario.name);
        }
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        self.start_time
            .map(|t| now.saturating_duration_since(t))
            .unwrap_or(Duration::ZERO)
    }

    /// Next due step, if any
    ///
    /// Log actions are written here and come back with no command, so their
    /// assertion still gets checked.
    pub fn poll(&mut self, now: Instant) -> Option<(Option<ScenarioCommand>, Option<Assertion>)> {
        if self.completed {
            return None;
        }
        let start_time = self.start_time?;

        let Some(action) = self.scenario.actions.get(self.current_action_index) else {
            self.completed = true;
            return None;
        };

        if now.saturating_duration_since(start_time) < action.delay() {
            return None;
        }

        debug!(
            "[SCENARIO] Action at {}ms: {:?}",
            action.time_ms, action.action
        );

        let command = match &action.action {
            ActionType::Log { message } => {
                info!("[SCENARIO] Log: {}", message);
                None
            }
            ActionType::Exit { code } => Some(ScenarioCommand::Exit { code: *code }),
            other => other.ui_event().map(ScenarioCommand::Apply),
        };
        let assertion = action.assert.clone();

        self.current_action_index += 1;
        if self.current_action_index >= self.scenario.actions.len() {
            self.completed = true;
        }

        Some((command, assertion))
    }

    /// Check an assertion, recording a failure
    pub fn check_assertion(
        &mut self,
        assertion: &Assertion,
        context: &AssertionContext,
    ) -> AssertionResult {
        let expect = |ok: bool, reason: String| {
            if ok {
                AssertionResult::Passed
            } else {
                AssertionResult::Failed(reason)
            }
        };

        let result = match assertion {
            Assertion::IsRunning => {
                expect(context.running, "expected session to be running".into())
            }
            Assertion::IsStopped => {
                expect(!context.running, "expected session to be stopped".into())
            }
            Assertion::Phase { phase } => expect(
                context.phase == *phase,
                format!("expected phase {:?}, got {:?}", phase, context.phase),
            ),
            Assertion::Remaining { seconds } => expect(
                context.remaining_seconds == *seconds,
                format!(
                    "expected {} seconds remaining, got {}",
                    seconds, context.remaining_seconds
                ),
            ),
            Assertion::Duration { seconds } => expect(
                context.phase_duration_seconds == *seconds,
                format!(
                    "expected phase duration {}s, got {}s",
                    seconds, context.phase_duration_seconds
                ),
            ),
            Assertion::SettingsOpen { open } => expect(
                context.settings_open == *open,
                format!(
                    "expected settings_open = {}, got {}",
                    open, context.settings_open
                ),
            ),
        };

        match &result {
            AssertionResult::Passed => info!("[SCENARIO] PASS: {:?}", assertion),
            AssertionResult::Failed(reason) => {
                error!("[SCENARIO] FAIL: {:?} - {}", assertion, reason);
                self.passed = false;
            }
        }

        result
    }

    /// Exit code for a requested code, forced to 1 on any failure
    pub fn exit_code(&self, requested: i32) -> i32 {
        if self.passed {
            requested
        } else {
            1
        }
    }

    pub fn summary(&self, now: Instant) -> String {
        let status = if self.passed { "PASSED" } else { "FAILED" };
        format!(
            "[SCENARIO] '{}' {}: executed {} actions in {:?}",
            self.scenario.scenario.name,
            status,
            self.current_action_index,
            self.elapsed(now)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> Scenario {
        Scenario::parse(
            r#"
            [scenario]
            name = "Runner"

            [[actions]]
            time_ms = 0
            action = { type = "toggle" }
            assert = { type = "is_running" }

            [[actions]]
            time_ms = 100
            action = { type = "log", message = "midway" }
            assert = { type = "remaining", seconds = 4 }

            [[actions]]
            time_ms = 200
            action = { type = "exit", code = 0 }
            "#,
        )
        .unwrap()
    }

    fn context() -> AssertionContext {
        AssertionContext {
            running: true,
            phase: Phase::Inhale,
            remaining_seconds: 4,
            phase_duration_seconds: 4,
            settings_open: false,
        }
    }

    #[test]
    fn test_nothing_before_start() {
        let mut runner = ScenarioRunner::new(scenario());
        assert!(runner.poll(Instant::now()).is_none());
        assert!(!runner.is_completed());
    }

    #[test]
    fn test_actions_fire_on_schedule() {
        let mut runner = ScenarioRunner::new(scenario());
        let t0 = Instant::now();
        runner.start(t0);

        let (command, assertion) = runner.poll(t0).unwrap();
        assert_eq!(command, Some(ScenarioCommand::Apply(UiEvent::ToggleRunning)));
        assert_eq!(assertion, Some(Assertion::IsRunning));

        // Not yet due
        assert!(runner.poll(t0 + Duration::from_millis(50)).is_none());

        let (command, assertion) = runner.poll(t0 + Duration::from_millis(100)).unwrap();
        assert_eq!(command, None);
        assert_eq!(assertion, Some(Assertion::Remaining { seconds: 4 }));

        let (command, _) = runner.poll(t0 + Duration::from_millis(250)).unwrap();
        assert_eq!(command, Some(ScenarioCommand::Exit { code: 0 }));
        assert!(runner.is_completed());
        assert!(runner.poll(t0 + Duration::from_secs(1)).is_none());
    }

    #[test]
    fn test_failed_assertion_forces_exit_code() {
        let mut runner = ScenarioRunner::new(scenario());
        let ctx = context();

        assert_eq!(
            runner.check_assertion(&Assertion::IsRunning, &ctx),
            AssertionResult::Passed
        );
        assert_eq!(runner.exit_code(0), 0);

        let result = runner.check_assertion(
            &Assertion::Phase {
                phase: Phase::Exhale,
            },
            &ctx,
        );
        assert!(matches!(result, AssertionResult::Failed(_)));
        assert_eq!(runner.exit_code(0), 1);
    }

    #[test]
    fn test_settings_assertion() {
        let mut runner = ScenarioRunner::new(scenario());
        let ctx = context();
        assert_eq!(
            runner.check_assertion(&Assertion::SettingsOpen { open: false }, &ctx),
            AssertionResult::Passed
        );
        assert!(matches!(
            runner.check_assertion(&Assertion::IsStopped, &ctx),
            AssertionResult::Failed(_)
        ));
    }
}
