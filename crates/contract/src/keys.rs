//! Key-space partitioning.
//!
//! Every record type owns a disjoint slice of the key space through a
//! mandatory four-byte prefix, so a range scan over one partition can never
//! surface another type's records. Storage keys are `{prefix}{id}` with the
//! identifier charset-validated at write time (see
//! `palmtrace_types::validation`), which makes the mapping injective for a
//! fixed `(kind, id)` pair.

use std::fmt;

/// Persisted record types, one per key-space partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Farmer,
    Farm,
    Processor,
    Transporter,
    Commodity,
    Traceability,
    /// Processed commodities (processing output).
    Processed,
}

impl RecordKind {
    /// The partition prefix. Always four bytes ending in `_`.
    pub const fn prefix(self) -> &'static str {
        match self {
            RecordKind::Farmer => "FMR_",
            RecordKind::Farm => "FRM_",
            RecordKind::Processor => "PRO_",
            RecordKind::Transporter => "TRA_",
            RecordKind::Commodity => "COM_",
            RecordKind::Traceability => "TRC_",
            RecordKind::Processed => "PCO_",
        }
    }

    /// Human-readable name, used in error messages.
    pub const fn name(self) -> &'static str {
        match self {
            RecordKind::Farmer => "farmer",
            RecordKind::Farm => "farm",
            RecordKind::Processor => "processor",
            RecordKind::Transporter => "transporter",
            RecordKind::Commodity => "commodity",
            RecordKind::Traceability => "traceability",
            RecordKind::Processed => "processed commodity",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derives the storage key for a record.
///
/// Deterministic and injective for a fixed `(kind, id)`: prefixes are
/// equal-length and pairwise distinct, so keys of different kinds can never
/// collide, and keys of one kind differ exactly when their ids differ.
pub fn storage_key(kind: RecordKind, id: &str) -> String {
    format!("{}{}", kind.prefix(), id)
}

/// Half-open `[start, end)` bounds selecting exactly one kind's partition.
///
/// The upper bound replaces the prefix's trailing `_` (0x5F) with its
/// successor byte `` ` `` (0x60): every key of the kind starts with the full
/// prefix and therefore sorts below the bound, while the first key of any
/// lexicographically later partition sorts at or above it.
pub fn scan_bounds(kind: RecordKind) -> (String, String) {
    let prefix = kind.prefix();
    debug_assert!(prefix.ends_with('_'));
    let mut end = String::from(prefix);
    end.pop();
    end.push('`');
    (String::from(prefix), end)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const ALL_KINDS: [RecordKind; 7] = [
        RecordKind::Farmer,
        RecordKind::Farm,
        RecordKind::Processor,
        RecordKind::Transporter,
        RecordKind::Commodity,
        RecordKind::Traceability,
        RecordKind::Processed,
    ];

    #[test]
    fn prefixes_are_distinct_and_uniform() {
        for (i, a) in ALL_KINDS.iter().enumerate() {
            assert_eq!(a.prefix().len(), 4);
            assert!(a.prefix().ends_with('_'));
            for b in &ALL_KINDS[i + 1..] {
                assert_ne!(a.prefix(), b.prefix());
            }
        }
    }

    #[test]
    fn storage_key_concatenates_prefix_and_id() {
        assert_eq!(storage_key(RecordKind::Processor, "P1"), "PRO_P1");
        assert_eq!(storage_key(RecordKind::Commodity, "C1"), "COM_C1");
    }

    #[test]
    fn scan_bounds_cover_own_partition_only() {
        let (start, end) = scan_bounds(RecordKind::Processor);
        assert_eq!(start, "PRO_");
        assert_eq!(end, "PRO`");

        let inside = storage_key(RecordKind::Processor, "zzzz");
        assert!(start.as_str() <= inside.as_str() && inside.as_str() < end.as_str());

        for other in ALL_KINDS {
            if other == RecordKind::Processor {
                continue;
            }
            let foreign = storage_key(other, "anything");
            let in_bounds =
                start.as_str() <= foreign.as_str() && foreign.as_str() < end.as_str();
            assert!(!in_bounds, "{foreign} must not fall in the PRO_ partition");
        }
    }

    proptest! {
        #[test]
        fn keys_never_collide_across_kinds(id in "[a-zA-Z0-9:._-]{1,64}") {
            let keys: Vec<String> =
                ALL_KINDS.iter().map(|k| storage_key(*k, &id)).collect();
            for (i, a) in keys.iter().enumerate() {
                for b in &keys[i + 1..] {
                    prop_assert_ne!(a, b);
                }
            }
        }

        #[test]
        fn every_valid_key_falls_in_its_own_bounds(id in "[a-zA-Z0-9:._-]{1,64}") {
            for kind in ALL_KINDS {
                let key = storage_key(kind, &id);
                let (start, end) = scan_bounds(kind);
                prop_assert!(start.as_str() <= key.as_str());
                prop_assert!(key.as_str() < end.as_str());
            }
        }
    }
}
