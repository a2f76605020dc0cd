//! Host collaborator contract.
//!
//! The bridge never reaches into host internals directly. Everything it needs
//! is expressed as this narrow capability interface: symbols are resolved by
//! the names the live host exposes, and every later access goes through the
//! handles that resolution returned. Production adapters implement the trait
//! against a real host store ([`file::FileHost`]); tests drive the bridge with
//! the deterministic [`mock::MockHost`].

pub mod file;
pub mod mock;

use crate::color::Rgba;

/// Internal symbol name of the host's static preference table.
pub const SYM_PREF_TABLE: &str = "PrefSettings.m_Prefs";
/// Internal symbol name of the color field on the preference record type.
pub const SYM_COLOR_FIELD: &str = "PrefColor.m_Color";
/// Internal symbol name of the record's serialize-to-unique-string method.
pub const SYM_SERIALIZE: &str = "PrefColor.ToUniqueString";

/// Preference-table entry (and settings-store key) for the managed tint.
pub const PLAYMODE_TINT: &str = "Playmode tint";
/// Settings-store key for the override-enabled flag.
pub const ENABLED_KEY: &str = "Playtint";

/// Opaque handle to a located internal symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SymbolId(pub(crate) u64);

/// Opaque handle to a live preference record owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub(crate) u64);

/// Capabilities the bridge requires from a host.
///
/// The first group mirrors the host's introspectable preference machinery;
/// the second is the host's durable, user-scoped settings store. None of the
/// methods error: a host that cannot satisfy a call answers `None`/`false`
/// and the bridge degrades to a no-op (shape problems are only surfaced at
/// initialization, via [`Host::locate`] returning `None`).
pub trait Host: Send + Sync {
    /// Resolve an internal symbol by name. `None` means the symbol does not
    /// exist in this host build.
    fn locate(&self, symbol: &str) -> Option<SymbolId>;

    /// Look up a record by preference name in the table behind `table`.
    fn table_get(&self, table: SymbolId, name: &str) -> Option<RecordId>;

    /// Read the color field `field` off `record`.
    fn read_color(&self, field: SymbolId, record: RecordId) -> Option<Rgba>;

    /// Write the color field `field` on `record`. Returns false when the
    /// handles no longer identify a live field/record pair.
    fn write_color(&self, field: SymbolId, record: RecordId, color: Rgba) -> bool;

    /// Invoke the serialization method `method` on `record`, producing the
    /// host's unique string encoding of the whole record.
    fn invoke_serialize(&self, method: SymbolId, record: RecordId) -> Option<String>;

    /// Read a boolean from the settings store, with a default for absent keys.
    fn settings_bool(&self, key: &str, default: bool) -> bool;

    /// Persist a boolean in the settings store.
    fn set_settings_bool(&self, key: &str, value: bool);

    /// Persist a string in the settings store.
    fn set_settings_string(&self, key: &str, value: &str);
}

/// Encode a preference record the way the host's own serialization does:
/// `<name>;<r>;<g>;<b>;<a>`.
pub fn encode_record(name: &str, color: Rgba) -> String {
    format!(
        "{name};{};{};{};{}",
        color.r, color.g, color.b, color.a
    )
}

/// Decode a serialized preference record. The name may itself contain `;`,
/// so the channels are taken from the tail.
pub fn decode_record(data: &str) -> Option<(String, Rgba)> {
    let fields: Vec<&str> = data.split(';').collect();
    if fields.len() < 5 {
        return None;
    }
    let (name_fields, channels) = fields.split_at(fields.len() - 4);
    let name = name_fields.join(";");
    if name.is_empty() {
        return None;
    }
    let mut parsed = [0.0f32; 4];
    for (slot, raw) in parsed.iter_mut().zip(channels) {
        let value: f32 = raw.trim().parse().ok()?;
        if !value.is_finite() {
            return None;
        }
        *slot = value;
    }
    Some((name, Rgba::new(parsed[0], parsed[1], parsed[2], parsed[3])))
}
