pub mod audio;
pub mod config;
pub mod controller;
mod error;
pub mod scenario;
pub mod session;
pub mod timer;
pub mod ui;

pub use error::{BreatheError, Result};
