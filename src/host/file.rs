//! File-backed host adapter.
//!
//! Persists a host preference store as a flat `key=value` file so the CLI can
//! operate on a host's durable store outside the host process. The in-memory
//! preference table is materialized from the file at open: any entry whose
//! value decodes as a serialized color record under its own key becomes a
//! table record. The table always carries the host's built-in tint entry,
//! seeded with the host default when the store has never persisted one.
//!
//! Settings mutations write through to disk immediately. A write failure is
//! logged and the in-memory state stays authoritative for the session; the
//! accessor contract (never error at runtime) is kept.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::color::Rgba;
use crate::error::HostError;
use crate::host::{
    decode_record, encode_record, Host, RecordId, SymbolId, PLAYMODE_TINT, SYM_COLOR_FIELD,
    SYM_PREF_TABLE, SYM_SERIALIZE,
};

const TABLE_ID: u64 = 1;
const COLOR_FIELD_ID: u64 = 2;
const SERIALIZE_ID: u64 = 3;

/// Built-in value of the host's tint entry before anything was persisted.
const HOST_BUILTIN_TINT: Rgba = Rgba::new(0.8, 0.8, 0.8, 1.0);

#[derive(Debug)]
struct FileState {
    /// Durable settings store, exactly as written to disk.
    entries: BTreeMap<String, String>,
    /// Live preference table: name -> (issued handle, color).
    records: BTreeMap<String, (u64, Rgba)>,
    /// Reverse handle lookup.
    issued: BTreeMap<u64, String>,
}

/// Flat-file [`Host`] implementation.
#[derive(Debug)]
pub struct FileHost {
    path: PathBuf,
    state: Mutex<FileState>,
}

impl FileHost {
    /// Open a store file, or start from an empty store when the file does
    /// not exist yet.
    pub fn open(path: &Path) -> Result<Self, HostError> {
        let entries = match fs::read_to_string(path) {
            Ok(text) => parse_store(&text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(HostError::Io(e)),
        };

        let mut records = BTreeMap::new();
        let mut issued = BTreeMap::new();
        let mut next_id = 0u64;
        for (key, value) in &entries {
            let Some((name, color)) = decode_record(value) else {
                continue;
            };
            if name != *key {
                continue;
            }
            next_id += 1;
            records.insert(name.clone(), (next_id, color));
            issued.insert(next_id, name);
        }
        if !records.contains_key(PLAYMODE_TINT) {
            next_id += 1;
            records.insert(PLAYMODE_TINT.to_string(), (next_id, HOST_BUILTIN_TINT));
            issued.insert(next_id, PLAYMODE_TINT.to_string());
        }

        tracing::debug!(
            path = %path.display(),
            entries = entries.len(),
            records = records.len(),
            "opened host preference store"
        );

        Ok(Self {
            path: path.to_path_buf(),
            state: Mutex::new(FileState {
                entries,
                records,
                issued,
            }),
        })
    }

    /// Location of the backing store file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, state: &FileState) {
        if let Err(e) = write_store(&self.path, &state.entries) {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "failed to persist host preference store"
            );
        }
    }
}

fn parse_store(text: &str) -> Result<BTreeMap<String, String>, HostError> {
    let mut entries = BTreeMap::new();
    for (idx, line) in text.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            return Err(HostError::Malformed(format!(
                "line {}: expected `key=value`, got `{trimmed}`",
                idx + 1
            )));
        };
        entries.insert(key.to_string(), value.to_string());
    }
    Ok(entries)
}

fn write_store(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), HostError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut text = String::new();
    for (key, value) in entries {
        text.push_str(key);
        text.push('=');
        text.push_str(value);
        text.push('\n');
    }
    fs::write(path, text)?;
    Ok(())
}

impl Host for FileHost {
    fn locate(&self, symbol: &str) -> Option<SymbolId> {
        match symbol {
            SYM_PREF_TABLE => Some(SymbolId(TABLE_ID)),
            SYM_COLOR_FIELD => Some(SymbolId(COLOR_FIELD_ID)),
            SYM_SERIALIZE => Some(SymbolId(SERIALIZE_ID)),
            _ => None,
        }
    }

    fn table_get(&self, table: SymbolId, name: &str) -> Option<RecordId> {
        if table.0 != TABLE_ID {
            return None;
        }
        let state = self.state.lock().expect("host state lock poisoned");
        state.records.get(name).map(|(id, _)| RecordId(*id))
    }

    fn read_color(&self, field: SymbolId, record: RecordId) -> Option<Rgba> {
        if field.0 != COLOR_FIELD_ID {
            return None;
        }
        let state = self.state.lock().expect("host state lock poisoned");
        let name = state.issued.get(&record.0)?;
        state.records.get(name).map(|(_, color)| *color)
    }

    fn write_color(&self, field: SymbolId, record: RecordId, color: Rgba) -> bool {
        if field.0 != COLOR_FIELD_ID {
            return false;
        }
        let mut state = self.state.lock().expect("host state lock poisoned");
        let Some(name) = state.issued.get(&record.0).cloned() else {
            return false;
        };
        if let Some(entry) = state.records.get_mut(&name) {
            entry.1 = color;
            true
        } else {
            false
        }
    }

    fn invoke_serialize(&self, method: SymbolId, record: RecordId) -> Option<String> {
        if method.0 != SERIALIZE_ID {
            return None;
        }
        let state = self.state.lock().expect("host state lock poisoned");
        let name = state.issued.get(&record.0)?;
        let (_, color) = state.records.get(name)?;
        Some(encode_record(name, *color))
    }

    fn settings_bool(&self, key: &str, default: bool) -> bool {
        let state = self.state.lock().expect("host state lock poisoned");
        match state.entries.get(key) {
            Some(value) if value.eq_ignore_ascii_case("true") => true,
            Some(value) if value.eq_ignore_ascii_case("false") => false,
            _ => default,
        }
    }

    fn set_settings_bool(&self, key: &str, value: bool) {
        let mut state = self.state.lock().expect("host state lock poisoned");
        state.entries.insert(key.to_string(), value.to_string());
        self.persist(&state);
    }

    fn set_settings_string(&self, key: &str, value: &str) {
        let mut state = self.state.lock().expect("host state lock poisoned");
        state.entries.insert(key.to_string(), value.to_string());
        self.persist(&state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::ENABLED_KEY;
    use crate::testsupport::TestTempDir;

    #[test]
    fn missing_file_starts_with_the_builtin_entry() {
        let dir = TestTempDir::new("file-host-fresh");
        let host = FileHost::open(&dir.child("hostprefs")).expect("open");

        let table = host.locate(SYM_PREF_TABLE).unwrap();
        let field = host.locate(SYM_COLOR_FIELD).unwrap();
        let record = host.table_get(table, PLAYMODE_TINT).expect("builtin entry");
        assert_eq!(host.read_color(field, record), Some(HOST_BUILTIN_TINT));
    }

    #[test]
    fn loads_records_and_settings_from_disk() {
        let dir = TestTempDir::new("file-host-load");
        let path = dir.write_text(
            "hostprefs",
            "Playmode tint=Playmode tint;0.25;0.5;0.75;1\nPlaytint=false\n",
        );
        let host = FileHost::open(&path).expect("open");

        let table = host.locate(SYM_PREF_TABLE).unwrap();
        let field = host.locate(SYM_COLOR_FIELD).unwrap();
        let record = host.table_get(table, PLAYMODE_TINT).unwrap();
        assert_eq!(
            host.read_color(field, record),
            Some(Rgba::new(0.25, 0.5, 0.75, 1.0))
        );
        assert!(!host.settings_bool(ENABLED_KEY, true));
    }

    #[test]
    fn rejects_lines_without_a_separator() {
        let dir = TestTempDir::new("file-host-malformed");
        let path = dir.write_text("hostprefs", "# comment\nnot a pair\n");
        let err = FileHost::open(&path).expect_err("must reject");
        assert!(err.to_string().contains("line 2"), "got: {err}");
    }

    #[test]
    fn settings_mutations_write_through() {
        let dir = TestTempDir::new("file-host-persist");
        let path = dir.child("hostprefs");
        let host = FileHost::open(&path).expect("open");

        host.set_settings_bool("Playtint", false);
        host.set_settings_string(PLAYMODE_TINT, "Playmode tint;1;0;0;1");

        let written = std::fs::read_to_string(&path).expect("store written");
        assert!(written.contains("Playtint=false"));
        assert!(written.contains("Playmode tint=Playmode tint;1;0;0;1"));

        // A reopened host sees the persisted record in its table.
        let reopened = FileHost::open(&path).expect("reopen");
        let table = reopened.locate(SYM_PREF_TABLE).unwrap();
        let field = reopened.locate(SYM_COLOR_FIELD).unwrap();
        let record = reopened.table_get(table, PLAYMODE_TINT).unwrap();
        assert_eq!(
            reopened.read_color(field, record),
            Some(Rgba::new(1.0, 0.0, 0.0, 1.0))
        );
    }

    #[test]
    fn unknown_symbols_are_absent() {
        let dir = TestTempDir::new("file-host-symbols");
        let host = FileHost::open(&dir.child("hostprefs")).expect("open");
        assert!(host.locate("PrefSettings.m_Renamed").is_none());
    }
}
