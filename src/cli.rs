//! CLI argument parsing via clap.

use clap::{Parser, Subcommand};

use playtint::build_info;

/// Manage a creative-tool host's playmode tint override.
#[derive(Debug, Parser)]
#[command(name = "playtint", version, after_help = build_info::HELP_BUILD_METADATA)]
pub struct Args {
    /// Path to config file (default: ./playtint.toml or
    /// ~/.config/playtint/playtint.toml).
    #[arg(short = 'c', long = "config")]
    pub config: Option<String>,

    /// Path to the host preference store to operate on.
    #[arg(long = "prefs")]
    pub prefs: Option<String>,

    /// Override the default tint for this invocation
    /// (#rrggbb, #rrggbbaa, or 3-4 floats in 0..1).
    #[arg(long = "tint")]
    pub tint: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show bridge state, the enabled flag, and the current tint.
    Status,
    /// Apply the default tint override now.
    Apply,
    /// Toggle whether the override is enabled.
    Toggle,
    /// Print the current tint color.
    Get,
    /// Set the tint to the given color.
    Set {
        /// #rrggbb, #rrggbbaa, or 3-4 comma-separated floats in 0..1.
        color: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn defaults_to_no_subcommand() {
        let args = Args::parse_from(["playtint"]);
        assert!(args.command.is_none());
        assert!(args.config.is_none());
    }

    #[test]
    fn parses_set_with_a_color_operand() {
        let args = Args::parse_from(["playtint", "set", "#aabbcc"]);
        match args.command {
            Some(Command::Set { ref color }) => assert_eq!(color, "#aabbcc"),
            ref other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_store_and_tint_overrides() {
        let args = Args::parse_from([
            "playtint",
            "--prefs",
            "/tmp/hostprefs",
            "--tint",
            "0.9,0.8,1,1",
            "apply",
        ]);
        assert_eq!(args.prefs.as_deref(), Some("/tmp/hostprefs"));
        assert_eq!(args.tint.as_deref(), Some("0.9,0.8,1,1"));
        assert!(matches!(args.command, Some(Command::Apply)));
    }
}
