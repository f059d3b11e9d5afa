//! Join queries reconstructing composite views from independent records.
//!
//! Commodities and their trails live under independent keys, so this module
//! is the only place the full object graph is put back together: a primary
//! lookup or partition scan chained with one secondary lookup per item.

use palmtrace_ledger::Ledger;
use palmtrace_types::{Commodity, ProcessedCommodity, Traceability};
use serde::Serialize;
use tracing::warn;

use crate::error::{ContractError, Result};
use crate::keys::{RecordKind, storage_key};
use crate::store;

/// A commodity joined with its provenance trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommodityWithTrail {
    pub commodity: Commodity,
    pub traceability: Traceability,
}

/// Returns a commodity joined with its trail.
///
/// # Errors
///
/// - `NotFound` if the commodity is absent.
/// - `DanglingReference` if the commodity exists but its stored
///   traceability ID resolves to nothing — corruption, reported rather than
///   silently dropped.
/// - `MalformedRecord` if either record fails to decode.
pub fn commodity_with_trail<L: Ledger>(ledger: &L, commodity_id: &str) -> Result<CommodityWithTrail> {
    let commodity: Commodity = store::read_required(ledger, commodity_id)?;
    let traceability: Traceability = store::read(ledger, &commodity.traceability_id)?
        .ok_or_else(|| ContractError::DanglingReference {
            kind: RecordKind::Traceability,
            id: commodity.traceability_id.clone(),
            referenced_from: storage_key(RecordKind::Commodity, &commodity.id),
        })?;

    Ok(CommodityWithTrail {
        commodity,
        traceability,
    })
}

/// Lists every commodity joined with its trail, in ascending key order.
///
/// A commodity whose traceability record is missing is skipped, not fatal:
/// one corrupted commodity must not block listing all the others. A
/// malformed commodity record, by contrast, aborts the scan with
/// `MalformedRecord`.
///
/// Key order is lexicographic; callers must not read harvest-time order
/// into it.
pub fn all_commodities<L: Ledger>(ledger: &L) -> Result<Vec<CommodityWithTrail>> {
    let commodities: Vec<Commodity> = store::scan_kind(ledger)?;

    let mut joined = Vec::with_capacity(commodities.len());
    for commodity in commodities {
        match store::read::<Traceability, _>(ledger, &commodity.traceability_id)? {
            Some(traceability) => joined.push(CommodityWithTrail {
                commodity,
                traceability,
            }),
            None => {
                warn!(
                    commodity = %commodity.id,
                    traceability = %commodity.traceability_id,
                    "skipping commodity with dangling traceability reference"
                );
            }
        }
    }
    Ok(joined)
}

/// Looks up a processed commodity by ID.
///
/// # Errors
///
/// `NotFound` if absent, `MalformedRecord` if the stored bytes are corrupt.
pub fn processed_by_id<L: Ledger>(ledger: &L, id: &str) -> Result<ProcessedCommodity> {
    store::read_required(ledger, id)
}

/// Lists every processed commodity in ascending key order. No join.
pub fn all_processed<L: Ledger>(ledger: &L) -> Result<Vec<ProcessedCommodity>> {
    store::scan_kind(ledger)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use palmtrace_ledger::MemoryLedger;
    use palmtrace_types::Status;

    use super::*;
    use crate::registry::add_processor;
    use crate::trail::{collect, harvest, process};

    fn harvested(ledger: &mut MemoryLedger, commodity_id: &str, traceability_id: &str) {
        harvest(
            ledger,
            commodity_id,
            "Bunch",
            100.0,
            "2024-01-01",
            traceability_id,
            "alice",
            "FarmSite",
        )
        .unwrap();
    }

    #[test]
    fn joins_commodity_with_its_trail() {
        let mut ledger = MemoryLedger::new();
        harvested(&mut ledger, "C1", "T1");
        collect(&mut ledger, "C1", "bob", "Depot1").unwrap();

        let view = commodity_with_trail(&ledger, "C1").unwrap();
        assert_eq!(view.commodity.id, "C1");
        assert_eq!(view.traceability.id, "T1");
        assert_eq!(
            view.traceability.status,
            vec![Status::Harvested, Status::Collected]
        );
    }

    #[test]
    fn missing_commodity_is_not_found() {
        let ledger = MemoryLedger::new();
        let err = commodity_with_trail(&ledger, "C404").unwrap_err();
        assert!(matches!(
            err,
            ContractError::NotFound { kind: RecordKind::Commodity, .. }
        ));
    }

    #[test]
    fn dangling_traceability_is_reported_not_a_crash() {
        let mut ledger = MemoryLedger::new();
        harvested(&mut ledger, "C1", "T_missing");
        ledger.delete(&storage_key(RecordKind::Traceability, "T_missing"));

        let err = commodity_with_trail(&ledger, "C1").unwrap_err();
        match err {
            ContractError::DanglingReference { id, referenced_from, .. } => {
                assert_eq!(id, "T_missing");
                assert_eq!(referenced_from, "COM_C1");
            }
            other => panic!("expected DanglingReference, got {other}"),
        }
    }

    #[test]
    fn listing_skips_dangling_commodities_but_keeps_the_rest() {
        let mut ledger = MemoryLedger::new();
        harvested(&mut ledger, "C1", "T1");
        harvested(&mut ledger, "C2", "T2");
        harvested(&mut ledger, "C3", "T3");
        ledger.delete(&storage_key(RecordKind::Traceability, "T2"));

        let views = all_commodities(&ledger).unwrap();
        let ids: Vec<&str> = views.iter().map(|v| v.commodity.id.as_str()).collect();
        assert_eq!(ids, vec!["C1", "C3"]);
    }

    #[test]
    fn listing_aborts_on_malformed_commodity() {
        let mut ledger = MemoryLedger::new();
        harvested(&mut ledger, "C1", "T1");
        ledger
            .put(&storage_key(RecordKind::Commodity, "C2"), b"{broken".to_vec())
            .unwrap();

        let err = all_commodities(&ledger).unwrap_err();
        assert!(matches!(err, ContractError::MalformedRecord { .. }));
    }

    #[test]
    fn repeated_scans_are_identical() {
        let mut ledger = MemoryLedger::new();
        for i in 0..5 {
            harvested(&mut ledger, &format!("C{i}"), &format!("T{i}"));
        }

        let first = all_commodities(&ledger).unwrap();
        let second = all_commodities(&ledger).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 5);
    }

    #[test]
    fn results_come_back_in_key_order_not_insertion_order() {
        let mut ledger = MemoryLedger::new();
        harvested(&mut ledger, "C2", "T2");
        harvested(&mut ledger, "C10", "T10");
        harvested(&mut ledger, "C1", "T1");

        let views = all_commodities(&ledger).unwrap();
        let ids: Vec<&str> = views.iter().map(|v| v.commodity.id.as_str()).collect();
        // Lexicographic, so "C10" sorts before "C2".
        assert_eq!(ids, vec!["C1", "C10", "C2"]);
    }

    #[test]
    fn processed_listing_is_a_straight_partition_scan() {
        let mut ledger = MemoryLedger::new();
        add_processor(
            &mut ledger, "P1", "Mill", "nib", "nik", "555", "m@example.com", "Rd", 500.0,
        )
        .unwrap();
        harvested(&mut ledger, "C1", "T1");
        process(
            &mut ledger, "PC1", "P1", 80.0, r#"["C1"]"#, "B-001", "grade-a", "dave", "Mill",
        )
        .unwrap();

        let all = all_processed(&ledger).unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, "PC1");
        assert_eq!(processed_by_id(&ledger, "PC1").unwrap(), all[0]);

        let err = processed_by_id(&ledger, "PC404").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }
}
