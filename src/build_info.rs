//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// `dino-sura <version> (<date> <commit>)`, as printed by `--version`.
pub fn version_line() -> String {
    format!(
        "dino-sura {} ({} {})",
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
