//! Error types for the Breathe application
//!
//! The breathing state machine itself cannot fail; these errors only come
//! from the ambient layers (audio device, configuration, scenario scripts).

use thiserror::Error;
use tracing::{error, warn};

/// Breathe application errors
#[derive(Error, Debug, Clone)]
pub enum BreatheError {
    /// Audio device initialization or operation error
    #[error("Audio device error: {0}")]
    AudioDeviceError(String),

    /// A sound asset could not be opened or decoded
    #[error("Audio decode error: {0}")]
    AudioDecodeError(String),

    /// Configuration file could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Scenario script could not be read, parsed or validated
    #[error("Scenario error: {0}")]
    ScenarioError(String),

    /// Channel communication error
    #[error("Channel error: {0}")]
    ChannelError(String),

    /// File system I/O error
    #[error("IO error: {0}")]
    IOError(String),
}

impl From<std::io::Error> for BreatheError {
    fn from(e: std::io::Error) -> Self {
        BreatheError::IOError(e.to_string())
    }
}

impl BreatheError {
    /// Check if this error is recoverable
    ///
    /// Recoverable errors let the app keep running with a degraded feature
    /// (silent audio, default settings).
    pub fn is_recoverable(&self) -> bool {
        match self {
            // No output device: run silently
            BreatheError::AudioDeviceError(_) => true,
            // Fall back to the synthesized sound
            BreatheError::AudioDecodeError(_) => true,
            // Fall back to defaults
            BreatheError::ConfigError(_) => true,
            // A broken script cannot be run
            BreatheError::ScenarioError(_) => false,
            // The audio thread is gone
            BreatheError::ChannelError(_) => false,
            BreatheError::IOError(_) => false,
        }
    }

    /// Get a user-friendly description of the error
    pub fn user_message(&self) -> String {
        match self {
            BreatheError::AudioDeviceError(_) => {
                "No se pudo abrir el dispositivo de audio. La sesión continuará sin sonido."
                    .to_string()
            }
            BreatheError::AudioDecodeError(_) => {
                "No se pudo cargar un sonido. Se usará el sonido integrado.".to_string()
            }
            BreatheError::ConfigError(_) => {
                "Configuración inválida. Se usarán los valores por defecto.".to_string()
            }
            BreatheError::ScenarioError(_) => "Guion de prueba inválido.".to_string(),
            BreatheError::ChannelError(_) => {
                "Error interno de comunicación. Reinicia la aplicación.".to_string()
            }
            BreatheError::IOError(_) => "Error del sistema de archivos.".to_string(),
        }
    }

    /// Log prefix of the subsystem this error comes from
    pub fn subsystem(&self) -> &'static str {
        match self {
            BreatheError::AudioDeviceError(_)
            | BreatheError::AudioDecodeError(_)
            | BreatheError::ChannelError(_) => "[AUDIO]",
            BreatheError::ConfigError(_) => "[CONFIG]",
            BreatheError::ScenarioError(_) => "[SCENARIO]",
            BreatheError::IOError(_) => "[IO]",
        }
    }

    /// User-facing message followed by the technical detail
    pub fn report(&self) -> String {
        format!("{} {} ({})", self.subsystem(), self.user_message(), self)
    }

    /// Log the error at `warn` when the app can carry on degraded, `error`
    /// otherwise
    pub fn log(&self) {
        if self.is_recoverable() {
            warn!("{}", self.report());
        } else {
            error!("{}", self.report());
        }
    }
}

/// Result type alias for Breathe operations
pub type Result<T> = std::result::Result<T, BreatheError>;
