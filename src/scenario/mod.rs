//! Scripted UI scenarios
//!
//! A scenario is a TOML file of timed actions, each with an optional
//! assertion, that drives the running app without user input. Pointing
//! `BREATHE_SCENARIO` at a file makes the app play it and exit with 0 or 1.

mod runner;

pub use runner::{AssertionContext, AssertionResult, ScenarioCommand, ScenarioRunner};

use crate::session::Phase;
use crate::ui::UiEvent;
use crate::{BreatheError, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

/// Environment variable holding the scenario path
pub const SCENARIO_ENV_VAR: &str = "BREATHE_SCENARIO";

/// A scenario loaded from a TOML file
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub scenario: ScenarioMetadata,
    /// Timed actions, in time order
    pub actions: Vec<ScenarioAction>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioMetadata {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// A single action with its timing
#[derive(Debug, Clone, Deserialize)]
pub struct ScenarioAction {
    /// Milliseconds after the scenario starts
    pub time_ms: u64,
    pub action: ActionType,
    /// Checked right after the action is applied
    #[serde(default)]
    pub assert: Option<Assertion>,
}

/// Things a scenario can do
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionType {
    /// Same as clicking the circle
    Toggle,
    OpenSettings,
    CloseSettings,
    SetDuration {
        seconds: u32,
    },
    SetCycleSound {
        enabled: bool,
    },
    SetBackgroundSound {
        enabled: bool,
    },
    /// Write a message to the log
    Log {
        message: String,
    },
    /// Finish the scenario
    Exit {
        #[serde(default)]
        code: i32,
    },
}

impl ActionType {
    /// The UI event this action stands for, if any
    pub fn ui_event(&self) -> Option<UiEvent> {
        match self {
            ActionType::Toggle => Some(UiEvent::ToggleRunning),
            ActionType::OpenSettings => Some(UiEvent::OpenSettings),
            ActionType::CloseSettings => Some(UiEvent::CloseSettings),
            ActionType::SetDuration { seconds } => Some(UiEvent::SetDuration(*seconds)),
            ActionType::SetCycleSound { enabled } => Some(UiEvent::SetCycleSound(*enabled)),
            ActionType::SetBackgroundSound { enabled } => {
                Some(UiEvent::SetBackgroundSound(*enabled))
            }
            ActionType::Log { .. } | ActionType::Exit { .. } => None,
        }
    }
}

/// Conditions checked against the live session
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Assertion {
    IsRunning,
    IsStopped,
    Phase { phase: Phase },
    Remaining { seconds: u32 },
    Duration { seconds: u32 },
    SettingsOpen { open: bool },
}

impl Scenario {
    /// Load the scenario named by `BREATHE_SCENARIO`, if set
    pub fn from_env() -> Result<Option<Self>> {
        match std::env::var_os(SCENARIO_ENV_VAR) {
            Some(path) => Self::load(path).map(Some),
            None => Ok(None),
        }
    }

    /// Load and validate a scenario file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BreatheError::ScenarioError(format!("failed to read '{}': {}", path.display(), e))
        })?;
        let scenario = Self::parse(&content).map_err(|e| match e {
            BreatheError::ScenarioError(msg) => {
                BreatheError::ScenarioError(format!("'{}': {}", path.display(), msg))
            }
            other => other,
        })?;
        info!(
            "[SCENARIO] Loaded '{}' from {}",
            scenario.scenario.name,
            path.display()
        );
        Ok(scenario)
    }

    /// Parse and validate scenario TOML
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)
            .map_err(|e| BreatheError::ScenarioError(format!("parse error: {}", e)))?;
        scenario.validate()?;
        Ok(scenario)
    }

    fn validate(&self) -> Result<()> {
        if self.actions.is_empty() {
            return Err(BreatheError::ScenarioError(
                "scenario must have at least one action".to_string(),
            ));
        }

        let mut last_time = 0;
        for action in &self.actions {
            if action.time_ms < last_time {
                return Err(BreatheError::ScenarioError(format!(
                    "actions must be ordered by time, found {}ms after {}ms",
                    action.time_ms, last_time
                )));
            }
            last_time = action.time_ms;
        }

        let has_exit = self
            .actions
            .iter()
            .any(|a| matches!(a.action, ActionType::Exit { .. }));
        if !has_exit {
            return Err(BreatheError::ScenarioError(
                "scenario must have an exit action".to_string(),
            ));
        }

        Ok(())
    }
}

impl ScenarioAction {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.time_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_actions() {
        let toml_str = r#"
            [scenario]
            name = "One breath"

            [[actions]]
            time_ms = 200
            action = { type = "set_duration", seconds = 2 }

            [[actions]]
            time_ms = 500
            action = { type = "toggle" }
            assert = { type = "is_running" }

            [[actions]]
            time_ms = 3000
            action = { type = "exit", code = 0 }
        "#;

        let scenario = Scenario::parse(toml_str).unwrap();
        assert_eq!(scenario.scenario.name, "One breath");
        assert_eq!(scenario.actions.len(), 3);
        assert_eq!(
            scenario.actions[0].action,
            ActionType::SetDuration { seconds: 2 }
        );
        assert_eq!(scenario.actions[1].assert, Some(Assertion::IsRunning));
        assert_eq!(scenario.actions[2].action, ActionType::Exit { code: 0 });
        assert_eq!(scenario.actions[2].delay(), Duration::from_secs(3));
    }

    #[test]
    fn test_parse_phase_assertion() {
        let toml_str = r#"
            [scenario]
            name = "Phase check"

            [[actions]]
            time_ms = 1500
            action = { type = "log", message = "after first tick" }
            assert = { type = "phase", phase = "hold_after_inhale" }

            [[actions]]
            time_ms = 2000
            action = { type = "exit" }
        "#;

        let scenario = Scenario::parse(toml_str).unwrap();
        assert_eq!(
            scenario.actions[0].assert,
            Some(Assertion::Phase {
                phase: Phase::HoldAfterInhale
            })
        );
        assert_eq!(scenario.actions[1].action, ActionType::Exit { code: 0 });
    }

    #[test]
    fn test_rejects_unordered_actions() {
        let toml_str = r#"
            [scenario]
            name = "Backwards"

            [[actions]]
            time_ms = 1000
            action = { type = "toggle" }

            [[actions]]
            time_ms = 500
            action = { type = "exit" }
        "#;

        let err = Scenario::parse(toml_str).unwrap_err();
        assert!(matches!(err, BreatheError::ScenarioError(_)));
    }

    #[test]
    fn test_rejects_missing_exit() {
        let toml_str = r#"
            [scenario]
            name = "Never ends"

            [[actions]]
            time_ms = 100
            action = { type = "toggle" }
        "#;

        assert!(Scenario::parse(toml_str).is_err());
    }

    #[test]
    fn test_rejects_unknown_action() {
        let toml_str = r#"
            [scenario]
            name = "Typo"

            [[actions]]
            time_ms = 100
            action = { type = "jump" }

            [[actions]]
            time_ms = 200
            action = { type = "exit" }
        "#;

        assert!(Scenario::parse(toml_str).is_err());
    }

    #[test]
    fn test_actions_map_to_ui_events() {
        assert_eq!(ActionType::Toggle.ui_event(), Some(UiEvent::ToggleRunning));
        assert_eq!(
            ActionType::SetBackgroundSound { enabled: false }.ui_event(),
            Some(UiEvent::SetBackgroundSound(false))
        );
        assert_eq!(
            ActionType::Log {
                message: "hi".to_string()
            }
            .ui_event(),
            None
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = Scenario::load("/nonexistent/breathe-scenario.toml").unwrap_err();
        assert!(matches!(err, BreatheError::ScenarioError(_)));
    }
}
