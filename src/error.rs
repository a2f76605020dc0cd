//! Unified error types for the tint bridge.

use std::fmt;

// ---------------------------------------------------------------------------
// BridgeError
// ---------------------------------------------------------------------------

/// Errors from the host-introspection bridge.
///
/// There is deliberately only one variant: anything other than a shape
/// mismatch degrades to a no-op instead of erroring (see the accessor docs on
/// [`crate::bridge::TintBridge`]).
#[derive(Debug)]
pub enum BridgeError {
    /// An expected internal symbol could not be located in the host. The
    /// host's internal preference layout has changed incompatibly; this is
    /// fatal to the bridge and is not retried.
    HostShapeMismatch(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HostShapeMismatch(symbol) => write!(
                f,
                "host shape mismatch: internal symbol `{symbol}` not found; \
                 the host's preference internals are no longer supported"
            ),
        }
    }
}

impl std::error::Error for BridgeError {}

// ---------------------------------------------------------------------------
// HostError
// ---------------------------------------------------------------------------

/// Errors when opening or persisting a host preference store.
#[derive(Debug)]
pub enum HostError {
    Io(std::io::Error),
    /// The store file exists but a line is not `key=value`.
    Malformed(String),
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Malformed(msg) => write!(f, "malformed host store: {msg}"),
        }
    }
}

impl std::error::Error for HostError {}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing tool configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// PlaytintError — top-level
// ---------------------------------------------------------------------------

/// Top-level error type for the tool.
#[derive(Debug)]
pub enum PlaytintError {
    Config(ConfigError),
    Host(HostError),
    Bridge(BridgeError),
}

impl fmt::Display for PlaytintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Host(e) => write!(f, "host: {e}"),
            Self::Bridge(e) => write!(f, "bridge: {e}"),
        }
    }
}

impl std::error::Error for PlaytintError {}

impl From<ConfigError> for PlaytintError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<HostError> for PlaytintError {
    fn from(e: HostError) -> Self {
        Self::Host(e)
    }
}

impl From<BridgeError> for PlaytintError {
    fn from(e: BridgeError) -> Self {
        Self::Bridge(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bridge_error_names_the_missing_symbol() {
        let e = BridgeError::HostShapeMismatch("PrefSettings.m_Prefs".into());
        let s = e.to_string();
        assert!(s.contains("PrefSettings.m_Prefs"), "got: {s}");
        assert!(s.starts_with("host shape mismatch"), "got: {s}");
    }

    #[test]
    fn host_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "store missing");
        let e = HostError::from(io_err);
        let s = e.to_string();
        assert!(s.starts_with("io:"), "got: {s}");
        assert!(s.contains("store missing"));
    }

    #[test]
    fn config_error_from_toml() {
        let toml_err: toml::de::Error = toml::from_str::<toml::Value>("x = [unclosed").unwrap_err();
        let e = ConfigError::from(toml_err);
        assert!(e.to_string().starts_with("toml:"));
    }

    #[test]
    fn top_level_error_wraps_layers() {
        let e = PlaytintError::from(BridgeError::HostShapeMismatch("PrefColor.m_Color".into()));
        assert!(e.to_string().starts_with("bridge:"), "got: {e}");

        let e = PlaytintError::from(ConfigError::Invalid("bad tint".into()));
        assert_eq!(e.to_string(), "config: invalid config: bad tint");
    }
}
