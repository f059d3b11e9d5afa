//! Typed record access over the ledger facade.
//!
//! Wraps the raw get/put/scan surface with kind-prefixed keys, the record
//! codec, and the existence checks every operation needs. Decode failures
//! become [`ContractError::MalformedRecord`] carrying the offending key.

use palmtrace_ledger::Ledger;
use palmtrace_types::{
    Commodity, Farm, Farmer, ProcessedCommodity, Processor, Traceability, Transporter, codec,
    validate_id,
};
use serde::{Serialize, de::DeserializeOwned};
use snafu::ResultExt;

use crate::error::{ContractError, LedgerSnafu, Result};
use crate::keys::{RecordKind, scan_bounds, storage_key};

/// A record persisted under a kind-prefixed key.
pub trait Record: Serialize + DeserializeOwned {
    /// The key-space partition this record type is stored in.
    const KIND: RecordKind;

    /// The identifier the storage key is derived from.
    fn id(&self) -> &str;
}

macro_rules! impl_record {
    ($($type:ty => $kind:expr),+ $(,)?) => {
        $(
            impl Record for $type {
                const KIND: RecordKind = $kind;

                fn id(&self) -> &str {
                    &self.id
                }
            }
        )+
    };
}

impl_record! {
    Farmer => RecordKind::Farmer,
    Farm => RecordKind::Farm,
    Processor => RecordKind::Processor,
    Transporter => RecordKind::Transporter,
    Commodity => RecordKind::Commodity,
    Traceability => RecordKind::Traceability,
    ProcessedCommodity => RecordKind::Processed,
}

/// Reads and decodes a record, or `None` if the key is absent.
pub(crate) fn read<T: Record, L: Ledger>(ledger: &L, id: &str) -> Result<Option<T>> {
    let key = storage_key(T::KIND, id);
    match ledger.get(&key).context(LedgerSnafu)? {
        Some(bytes) => codec::decode(&bytes)
            .map(Some)
            .map_err(|e| ContractError::malformed(key, e)),
        None => Ok(None),
    }
}

/// Reads a record that must exist.
pub(crate) fn read_required<T: Record, L: Ledger>(ledger: &L, id: &str) -> Result<T> {
    read(ledger, id)?.ok_or_else(|| ContractError::NotFound {
        kind: T::KIND,
        id: id.to_string(),
    })
}

/// True when some value occupies the `(kind, id)` key.
pub(crate) fn occupied<L: Ledger>(ledger: &L, kind: RecordKind, id: &str) -> Result<bool> {
    let key = storage_key(kind, id);
    Ok(ledger.get(&key).context(LedgerSnafu)?.is_some())
}

/// Encodes and stores a record, replacing any existing value.
pub(crate) fn write<T: Record, L: Ledger>(ledger: &mut L, record: &T) -> Result<()> {
    let key = storage_key(T::KIND, record.id());
    let bytes = codec::encode(record).map_err(|e| ContractError::malformed(key.clone(), e))?;
    ledger.put(&key, bytes).context(LedgerSnafu)
}

/// Stores a record that must not already exist.
///
/// Validates the identifier before any ledger access, then fails with
/// `AlreadyExists` if the key is occupied.
pub(crate) fn create<T: Record, L: Ledger>(ledger: &mut L, record: &T) -> Result<()> {
    validate_id("id", record.id())?;
    if occupied(ledger, T::KIND, record.id())? {
        return Err(ContractError::AlreadyExists {
            kind: T::KIND,
            id: record.id().to_string(),
        });
    }
    write(ledger, record)
}

/// Replaces a record that must already exist.
pub(crate) fn replace<T: Record, L: Ledger>(ledger: &mut L, record: &T) -> Result<()> {
    if !occupied(ledger, T::KIND, record.id())? {
        return Err(ContractError::NotFound {
            kind: T::KIND,
            id: record.id().to_string(),
        });
    }
    write(ledger, record)
}

/// Scans one kind's partition, decoding every record.
///
/// Results come back in ascending key order. A record that fails to decode
/// aborts the scan with `MalformedRecord`; a corrupt entry must not be
/// silently dropped from a full listing.
pub(crate) fn scan_kind<T: Record, L: Ledger>(ledger: &L) -> Result<Vec<T>> {
    let (start, end) = scan_bounds(T::KIND);
    let pairs = ledger.range_scan(&start, &end).context(LedgerSnafu)?;

    let mut records = Vec::with_capacity(pairs.len());
    for (key, bytes) in pairs {
        let record = codec::decode(&bytes).map_err(|e| ContractError::malformed(key, e))?;
        records.push(record);
    }
    Ok(records)
}

/// Parses a JSON string-array input such as a farm or material list.
///
/// The wire shape for nested lists is a JSON array of strings; anything
/// else is `InvalidInput`.
pub(crate) fn parse_id_list(field: &'static str, input: &str) -> Result<Vec<String>> {
    serde_json::from_str(input).map_err(|e| ContractError::InvalidInput {
        field: field.to_string(),
        reason: format!("not a JSON string array: {e}"),
    })
}

/// Rejects quantities that are negative, NaN, or infinite.
pub(crate) fn validate_quantity(field: &'static str, value: f64) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ContractError::InvalidInput {
            field: field.to_string(),
            reason: format!("must be a non-negative finite number, got {value}"),
        })
    }
}
