//! Compile-time build information.

include!(concat!(env!("OUT_DIR"), "/build_info.rs"));

/// Version line printed by `--version`, e.g. `math-arena 0.1.0 2026-10-16 (a1b2c3d)`.
pub fn version_line() -> String {
    format!(
        "{} {} {} ({})",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        BUILD_DATE,
        BUILD_COMMIT
    )
}
