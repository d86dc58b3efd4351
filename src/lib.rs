//! Dino Sura - terminal endless runner.
//!
//! The simulation (`runner`), loop driver (`session`) and storage are plain
//! library code; the terminal front end lives in `ui` and `input`.

pub mod assets;
pub mod build_info;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod paths;
pub mod runner;
pub mod scheduler;
pub mod session;
pub mod simulator;
pub mod store;
pub mod ui;

pub use error::{Error, Result};
