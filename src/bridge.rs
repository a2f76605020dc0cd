//! Bridge between the stable accessor surface and the host's unstable
//! internal preference layout.
//!
//! Initialization is all-or-nothing: the bridge resolves the preference
//! table, the record color field, and the record serializer by name, and
//! either caches all three handles or reports a shape mismatch and stays
//! unusable. After a failed (or absent) initialization every accessor
//! degrades to a quiet no-op so routine use never disturbs the host.
//!
//! The bridge is single-threaded by design: the host invokes it from its one
//! UI/main thread, so mutations take `&mut self` and no locking is provided.

use std::sync::Arc;

use crate::color::Rgba;
use crate::error::BridgeError;
use crate::host::{Host, RecordId, SymbolId, ENABLED_KEY, PLAYMODE_TINT};
use crate::host::{SYM_COLOR_FIELD, SYM_PREF_TABLE, SYM_SERIALIZE};

/// Handles to the three internal symbols, present only as a full set.
#[derive(Debug, Clone, Copy)]
struct Symbols {
    table: SymbolId,
    color_field: SymbolId,
    serialize: SymbolId,
}

#[derive(Debug, Clone, Copy)]
enum BridgeState {
    NotReady,
    Ready(Symbols),
}

/// Observable bridge condition, distinguishing a bridge that never resolved
/// the host's shape from a host that simply has no tint entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BridgeStatus {
    /// Initialization has not run, failed, or was reset.
    NotReady,
    /// Symbols resolved, but the preference table has no tint entry.
    EntryMissing,
    /// Fully operational.
    Ready,
}

/// Session-scoped bridge into the host's tint preference.
pub struct TintBridge {
    host: Arc<dyn Host>,
    state: BridgeState,
    enabled: bool,
    default_tint: Rgba,
}

impl TintBridge {
    /// Build an uninitialized bridge over a host. The enabled flag is read
    /// from the host's settings store up front (defaulting to true, matching
    /// the host-side behavior when the flag was never persisted).
    pub fn new(host: Arc<dyn Host>, default_tint: Rgba) -> Self {
        let enabled = host.settings_bool(ENABLED_KEY, true);
        Self {
            host,
            state: BridgeState::NotReady,
            enabled,
            default_tint,
        }
    }

    /// Resolve and cache the host's internal symbols. Idempotent per session.
    ///
    /// Must run only after the host has finished startup, so its preference
    /// table is populated. Any missing symbol is fatal to the bridge and
    /// reported once; it is not retried, since it signals an incompatible
    /// host version rather than a transient condition. On success, the
    /// default override is applied immediately when the feature is enabled.
    pub fn initialize(&mut self) -> Result<(), BridgeError> {
        if matches!(self.state, BridgeState::Ready(_)) {
            return Ok(());
        }

        let locate = |symbol: &str| {
            self.host
                .locate(symbol)
                .ok_or_else(|| BridgeError::HostShapeMismatch(symbol.to_string()))
        };
        let symbols = Symbols {
            table: locate(SYM_PREF_TABLE)?,
            color_field: locate(SYM_COLOR_FIELD)?,
            serialize: locate(SYM_SERIALIZE)?,
        };

        self.enabled = self.host.settings_bool(ENABLED_KEY, true);
        self.state = BridgeState::Ready(symbols);
        tracing::info!(enabled = self.enabled, "tint bridge initialized");

        if self.enabled {
            self.apply_default();
        }
        Ok(())
    }

    /// Session-start invalidation: drop the cached handles and re-read the
    /// persisted enabled flag. The next `initialize` resolves fresh handles.
    pub fn reset(&mut self) {
        self.state = BridgeState::NotReady;
        self.enabled = self.host.settings_bool(ENABLED_KEY, true);
        tracing::debug!("tint bridge reset");
    }

    /// Current tint, read through the cached handles. `None` when the bridge
    /// is not ready or the host has no tint entry.
    pub fn tint(&self) -> Option<Rgba> {
        let (symbols, record) = self.entry()?;
        self.host.read_color(symbols.color_field, record)
    }

    /// Compatibility accessor preserving the original black-sentinel contract.
    pub fn tint_or_black(&self) -> Rgba {
        self.tint().unwrap_or(Rgba::BLACK)
    }

    /// Overwrite the tint. Writes the record's color field, invokes the
    /// host's own serialization on the record, and persists the resulting
    /// string under the preference name, so the host's live cache and its
    /// durable store stay consistent. Quiet no-op (returns false) when the
    /// bridge is not ready or the entry is absent.
    pub fn set_tint(&mut self, color: Rgba) -> bool {
        let Some((symbols, record)) = self.entry() else {
            return false;
        };
        if !self.host.write_color(symbols.color_field, record, color) {
            return false;
        }
        let Some(data) = self.host.invoke_serialize(symbols.serialize, record) else {
            return false;
        };
        self.host.set_settings_string(PLAYMODE_TINT, &data);
        tracing::debug!(tint = %color, "tint override persisted");
        true
    }

    /// Apply the configured default override now.
    pub fn apply_default(&mut self) -> bool {
        let applied = self.set_tint(self.default_tint);
        if applied {
            tracing::info!(tint = %self.default_tint, "applied default tint override");
        }
        applied
    }

    /// Flip and persist the enabled flag; returns the new state. The flag can
    /// be toggled even while not ready, but the immediate reapply of the
    /// default override only happens on a ready bridge.
    pub fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.host.set_settings_bool(ENABLED_KEY, self.enabled);
        if self.enabled {
            self.apply_default();
        }
        self.enabled
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, BridgeState::Ready(_))
    }

    pub fn status(&self) -> BridgeStatus {
        match self.state {
            BridgeState::NotReady => BridgeStatus::NotReady,
            BridgeState::Ready(symbols) => {
                if self.host.table_get(symbols.table, PLAYMODE_TINT).is_some() {
                    BridgeStatus::Ready
                } else {
                    BridgeStatus::EntryMissing
                }
            }
        }
    }

    /// The default override color this bridge applies.
    pub fn default_tint(&self) -> Rgba {
        self.default_tint
    }

    fn entry(&self) -> Option<(Symbols, RecordId)> {
        let BridgeState::Ready(symbols) = self.state else {
            return None;
        };
        let record = self.host.table_get(symbols.table, PLAYMODE_TINT)?;
        Some((symbols, record))
    }
}
