//! Logger setup. The terminal belongs to the game while it runs, so the
//! interactive binary logs to a file; headless tools log to stderr.
//! `RUST_LOG` controls the filter either way.

use crate::error::Result;
use env_logger::{Builder, Env, Target};
use std::fs::OpenOptions;
use std::path::Path;

/// Append log records to `path`. Defaults to `info`.
pub fn init_file(path: &Path) -> Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let _ = Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    Ok(())
}

/// Log to stderr. Defaults to `warn` so reports stay readable.
pub fn init_stderr() {
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Stderr)
        .try_init();
}
