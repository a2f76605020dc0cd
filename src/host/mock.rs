//! Deterministic in-memory host.
//!
//! Kept as a regular module (not `#[cfg(test)]`) so integration tests and
//! embedding experiments can drive the bridge without a real host. Builders
//! shape the host before use; the `without_symbol` knob simulates a host
//! build whose internal layout no longer matches expectations.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

use crate::color::Rgba;
use crate::host::{
    encode_record, Host, RecordId, SymbolId, SYM_COLOR_FIELD, SYM_PREF_TABLE, SYM_SERIALIZE,
};

const TABLE_ID: u64 = 1;
const COLOR_FIELD_ID: u64 = 2;
const SERIALIZE_ID: u64 = 3;

#[derive(Debug, Default)]
struct MockState {
    /// Preference table: name -> live color value.
    records: BTreeMap<String, Rgba>,
    /// Record handles issued by `table_get`.
    issued: BTreeMap<u64, String>,
    next_record: u64,
    settings_bools: BTreeMap<String, bool>,
    settings_strings: BTreeMap<String, String>,
}

/// In-memory [`Host`] with inspection accessors for assertions.
#[derive(Debug, Default)]
pub struct MockHost {
    missing: BTreeSet<String>,
    state: Mutex<MockState>,
}

impl MockHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a preference record in the table.
    pub fn with_record(self, name: &str, color: Rgba) -> Self {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .records
            .insert(name.to_string(), color);
        self
    }

    /// Pretend the named internal symbol does not exist in this host build.
    pub fn without_symbol(mut self, symbol: &str) -> Self {
        self.missing.insert(symbol.to_string());
        self
    }

    /// Seed a boolean in the settings store.
    pub fn with_settings_bool(self, key: &str, value: bool) -> Self {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .settings_bools
            .insert(key.to_string(), value);
        self
    }

    /// Live color of a table record, for assertions.
    pub fn record_color(&self, name: &str) -> Option<Rgba> {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .records
            .get(name)
            .copied()
    }

    /// Raw settings-store boolean, for assertions. `None` means never persisted.
    pub fn persisted_bool(&self, key: &str) -> Option<bool> {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .settings_bools
            .get(key)
            .copied()
    }

    /// Raw settings-store string, for assertions. `None` means never persisted.
    pub fn persisted_string(&self, key: &str) -> Option<String> {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .settings_strings
            .get(key)
            .cloned()
    }

    fn symbol_id(&self, symbol: &str) -> Option<u64> {
        if self.missing.contains(symbol) {
            return None;
        }
        match symbol {
            SYM_PREF_TABLE => Some(TABLE_ID),
            SYM_COLOR_FIELD => Some(COLOR_FIELD_ID),
            SYM_SERIALIZE => Some(SERIALIZE_ID),
            _ => None,
        }
    }
}

impl Host for MockHost {
    fn locate(&self, symbol: &str) -> Option<SymbolId> {
        self.symbol_id(symbol).map(SymbolId)
    }

    fn table_get(&self, table: SymbolId, name: &str) -> Option<RecordId> {
        if table.0 != TABLE_ID {
            return None;
        }
        let mut state = self.state.lock().expect("mock host state lock poisoned");
        if !state.records.contains_key(name) {
            return None;
        }
        state.next_record += 1;
        let id = state.next_record;
        state.issued.insert(id, name.to_string());
        Some(RecordId(id))
    }

    fn read_color(&self, field: SymbolId, record: RecordId) -> Option<Rgba> {
        if field.0 != COLOR_FIELD_ID {
            return None;
        }
        let state = self.state.lock().expect("mock host state lock poisoned");
        let name = state.issued.get(&record.0)?;
        state.records.get(name).copied()
    }

    fn write_color(&self, field: SymbolId, record: RecordId, color: Rgba) -> bool {
        if field.0 != COLOR_FIELD_ID {
            return false;
        }
        let mut state = self.state.lock().expect("mock host state lock poisoned");
        let Some(name) = state.issued.get(&record.0).cloned() else {
            return false;
        };
        state.records.insert(name, color);
        true
    }

    fn invoke_serialize(&self, method: SymbolId, record: RecordId) -> Option<String> {
        if method.0 != SERIALIZE_ID {
            return None;
        }
        let state = self.state.lock().expect("mock host state lock poisoned");
        let name = state.issued.get(&record.0)?;
        let color = state.records.get(name)?;
        Some(encode_record(name, *color))
    }

    fn settings_bool(&self, key: &str, default: bool) -> bool {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .settings_bools
            .get(key)
            .copied()
            .unwrap_or(default)
    }

    fn set_settings_bool(&self, key: &str, value: bool) {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .settings_bools
            .insert(key.to_string(), value);
    }

    fn set_settings_string(&self, key: &str, value: &str) {
        self.state
            .lock()
            .expect("mock host state lock poisoned")
            .settings_strings
            .insert(key.to_string(), value.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locate_honors_missing_symbols() {
        let host = MockHost::new().without_symbol(SYM_COLOR_FIELD);
        assert!(host.locate(SYM_PREF_TABLE).is_some());
        assert!(host.locate(SYM_COLOR_FIELD).is_none());
        assert!(host.locate("PrefSettings.m_Unknown").is_none());
    }

    #[test]
    fn table_lookup_requires_the_table_handle() {
        let host = MockHost::new().with_record("Playmode tint", Rgba::BLACK);
        let table = host.locate(SYM_PREF_TABLE).unwrap();
        assert!(host.table_get(table, "Playmode tint").is_some());
        assert!(host.table_get(table, "Other pref").is_none());
        assert!(host.table_get(SymbolId(99), "Playmode tint").is_none());
    }

    #[test]
    fn serialize_reflects_the_live_record() {
        let host = MockHost::new().with_record("Playmode tint", Rgba::new(0.25, 0.5, 0.75, 1.0));
        let table = host.locate(SYM_PREF_TABLE).unwrap();
        let field = host.locate(SYM_COLOR_FIELD).unwrap();
        let method = host.locate(SYM_SERIALIZE).unwrap();
        let record = host.table_get(table, "Playmode tint").unwrap();

        assert!(host.write_color(field, record, Rgba::new(1.0, 0.0, 0.0, 1.0)));
        let data = host.invoke_serialize(method, record).unwrap();
        assert_eq!(data, "Playmode tint;1;0;0;1");
    }
}
