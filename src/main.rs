//! CLI entry point for playtint.
//!
//! Each invocation models one host session: open the host store, initialize
//! the bridge (which reapplies the default override when the feature is
//! enabled, exactly as the in-host hook does on load), then run one command.

mod cli;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use playtint::bridge::{BridgeStatus, TintBridge};
use playtint::color::Rgba;
use playtint::config::{default_prefs_path, ensure_default_global_config, load_config};
use playtint::host::file::FileHost;

fn main() {
    let args = cli::Args::parse();

    if let Err(e) = ensure_default_global_config() {
        eprintln!("warning: failed to initialize ~/.config/playtint/playtint.toml: {e}");
    }

    // Load config.
    let mut config = match load_config(args.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };

    // Apply CLI overrides.
    if let Some(tint) = &args.tint {
        match Rgba::parse(tint) {
            Ok(color) => config.default_tint = color,
            Err(e) => {
                eprintln!("error: --tint: {e}");
                std::process::exit(1);
            }
        }
    }
    if let Some(prefs) = &args.prefs {
        config.prefs_path = Some(PathBuf::from(prefs));
    }

    init_tracing(&config.log_filter);

    let Some(prefs_path) = config.prefs_path.clone().or_else(default_prefs_path) else {
        eprintln!(
            "error: unable to resolve a host store path; pass --prefs or set host.prefs in playtint.toml"
        );
        std::process::exit(1);
    };

    let host = match FileHost::open(&prefs_path) {
        Ok(host) => host,
        Err(e) => {
            eprintln!(
                "error: failed to open host store `{}`: {e}",
                prefs_path.display()
            );
            std::process::exit(1);
        }
    };

    let mut bridge = TintBridge::new(Arc::new(host), config.default_tint);
    if let Err(e) = bridge.initialize() {
        eprintln!("error: {e}");
        std::process::exit(1);
    }

    match args.command.unwrap_or(cli::Command::Status) {
        cli::Command::Status => {
            field("state", status_label(bridge.status()));
            field("enabled", checkmark(bridge.is_enabled()));
            field(
                "tint",
                &bridge
                    .tint()
                    .map(|c| c.to_string())
                    .unwrap_or_else(|| "none".to_string()),
            );
            field("default", &bridge.default_tint().to_string());
            field("store", &prefs_path.display().to_string());
            field("version", &playtint::build_info::metadata_line());
        }
        cli::Command::Apply => {
            if bridge.apply_default() {
                println!("applied default tint {}", bridge.default_tint());
            } else {
                eprintln!("tint entry absent in the host table; nothing applied");
                std::process::exit(1);
            }
        }
        cli::Command::Toggle => {
            let enabled = bridge.toggle_enabled();
            println!("override enabled: {}", checkmark(enabled));
        }
        cli::Command::Get => match bridge.tint() {
            Some(color) => println!("{color}"),
            None => {
                eprintln!("tint unavailable ({})", status_label(bridge.status()));
                std::process::exit(1);
            }
        },
        cli::Command::Set { color } => {
            let color = match Rgba::parse(&color) {
                Ok(color) => color,
                Err(e) => {
                    eprintln!("error: {e}");
                    std::process::exit(1);
                }
            };
            if bridge.set_tint(color) {
                println!("tint set to {color}");
            } else {
                eprintln!("tint entry absent in the host table; nothing set");
                std::process::exit(1);
            }
        }
    }
}

fn init_tracing(filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_new(filter)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn field(key: &str, value: &str) {
    println!("{key:>8}: {value}");
}

fn status_label(status: BridgeStatus) -> &'static str {
    match status {
        BridgeStatus::NotReady => "not ready",
        BridgeStatus::EntryMissing => "ready (tint entry missing)",
        BridgeStatus::Ready => "ready",
    }
}

fn checkmark(on: bool) -> &'static str {
    if on {
        "[x]"
    } else {
        "[ ]"
    }
}
