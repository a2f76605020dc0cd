//! Compile-time build metadata exposed to CLI surfaces.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("PLAYTINT_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("PLAYTINT_BUILD_TIMESTAMP");

/// Help trailer block that surfaces build metadata in `playtint --help`.
pub const HELP_BUILD_METADATA: &str = concat!(
    "Build metadata:\n  commit: ",
    env!("PLAYTINT_BUILD_GIT_HASH"),
    "\n  built: ",
    env!("PLAYTINT_BUILD_TIMESTAMP")
);

/// Render concise metadata shown by `playtint status`.
pub fn metadata_line() -> String {
    format!("v{VERSION} ({GIT_COMMIT}, built {BUILD_TIMESTAMP})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metadata_line_contains_all_fields() {
        let text = metadata_line();
        assert!(text.starts_with('v'));
        assert!(text.contains(GIT_COMMIT));
        assert!(text.contains(BUILD_TIMESTAMP));
    }
}
