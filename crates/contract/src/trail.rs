//! Provenance trail engine: lifecycle operations over traceability records.
//!
//! Each transition is an append, never a replacement: one aligned
//! `(status, location, pic)` triple is pushed onto the commodity's trail and
//! the whole record is rewritten under its key, all inside the caller's
//! ambient transaction. All reads and validation happen before the first
//! write, so a reported error leaves no partial state.
//!
//! The engine does not enforce that transitions arrive in the canonical
//! `harvested -> collected -> in-transport -> delivered -> processed`
//! order; out-of-order appends are accepted (see DESIGN.md).

use palmtrace_ledger::Ledger;
use palmtrace_types::{
    Commodity, ProcessedCommodity, Processor, Status, Traceability, validate_id,
};
use tracing::{debug, info};

use crate::error::{ContractError, Result};
use crate::keys::{RecordKind, storage_key};
use crate::store;

/// Records the harvest of a new commodity batch.
///
/// Creates a [`Commodity`] and its [`Traceability`] record with a single
/// `harvested` step, under independent keys.
///
/// # Errors
///
/// - `InvalidInput` if either identifier is malformed or the quantity is
///   negative or non-finite.
/// - `AlreadyExists` if the commodity key or the traceability key is
///   occupied; the pair is created together or not at all.
#[allow(clippy::too_many_arguments)]
pub fn harvest<L: Ledger>(
    ledger: &mut L,
    commodity_id: &str,
    name: &str,
    quantity: f64,
    date_harvested: &str,
    traceability_id: &str,
    pic: &str,
    location: &str,
) -> Result<()> {
    validate_id("commodity_id", commodity_id)?;
    validate_id("traceability_id", traceability_id)?;
    store::validate_quantity("quantity", quantity)?;

    if store::occupied(ledger, RecordKind::Commodity, commodity_id)? {
        return Err(ContractError::AlreadyExists {
            kind: RecordKind::Commodity,
            id: commodity_id.to_string(),
        });
    }
    if store::occupied(ledger, RecordKind::Traceability, traceability_id)? {
        return Err(ContractError::AlreadyExists {
            kind: RecordKind::Traceability,
            id: traceability_id.to_string(),
        });
    }

    let trail = Traceability::begin(traceability_id, pic, location);
    let commodity = Commodity {
        id: commodity_id.to_string(),
        name: name.to_string(),
        quantity,
        date_harvested: date_harvested.to_string(),
        traceability_id: traceability_id.to_string(),
    };

    store::write(ledger, &trail)?;
    store::write(ledger, &commodity)?;

    info!(
        commodity = %commodity_id,
        traceability = %traceability_id,
        quantity,
        "commodity harvested"
    );
    Ok(())
}

/// Records collection of a harvested commodity at a collection point.
///
/// # Errors
///
/// See [`append_step`] for the shared failure modes.
pub fn collect<L: Ledger>(
    ledger: &mut L,
    commodity_id: &str,
    pic: &str,
    location: &str,
) -> Result<()> {
    append_step(ledger, commodity_id, Status::Collected, pic, location)
}

/// Records the start of transport for a commodity.
///
/// # Errors
///
/// See [`append_step`] for the shared failure modes.
pub fn transport<L: Ledger>(
    ledger: &mut L,
    commodity_id: &str,
    pic: &str,
    location: &str,
) -> Result<()> {
    append_step(ledger, commodity_id, Status::InTransport, pic, location)
}

/// Records delivery of a transported commodity.
///
/// # Errors
///
/// See [`append_step`] for the shared failure modes.
pub fn transported<L: Ledger>(
    ledger: &mut L,
    commodity_id: &str,
    pic: &str,
    location: &str,
) -> Result<()> {
    append_step(ledger, commodity_id, Status::Delivered, pic, location)
}

/// Appends one aligned lifecycle step to a commodity's trail.
///
/// # Errors
///
/// - `NotFound` if the commodity does not exist.
/// - `DanglingReference` if the commodity's traceability reference resolves
///   to nothing.
/// - `MalformedRecord` if either stored record fails to decode, or the
///   stored trail's three sequences disagree in length.
fn append_step<L: Ledger>(
    ledger: &mut L,
    commodity_id: &str,
    status: Status,
    pic: &str,
    location: &str,
) -> Result<()> {
    let commodity: Commodity = store::read_required(ledger, commodity_id)?;
    let mut trail = load_trail(ledger, &commodity)?;

    trail.push_step(status, location, pic);
    store::write(ledger, &trail)?;

    info!(
        commodity = %commodity_id,
        status = %status,
        step = trail.steps(),
        "lifecycle step appended"
    );
    Ok(())
}

/// Resolves a commodity's trail, refusing dangling or misaligned records.
fn load_trail<L: Ledger>(ledger: &L, commodity: &Commodity) -> Result<Traceability> {
    let trail: Traceability = store::read(ledger, &commodity.traceability_id)?.ok_or_else(|| {
        ContractError::DanglingReference {
            kind: RecordKind::Traceability,
            id: commodity.traceability_id.clone(),
            referenced_from: storage_key(RecordKind::Commodity, &commodity.id),
        }
    })?;

    if !trail.is_aligned() {
        return Err(ContractError::MalformedRecord {
            key: storage_key(RecordKind::Traceability, &trail.id),
            reason: format!(
                "trail sequences misaligned: {} status, {} location, {} pic",
                trail.status.len(),
                trail.location.len(),
                trail.pic.len()
            ),
        });
    }
    Ok(trail)
}

/// Records a processing run: consumes material commodities and creates one
/// immutable [`ProcessedCommodity`].
///
/// A `processed` step is appended to the trail of **every** commodity named
/// in `materials` (a JSON string array). All materials are resolved and
/// decoded before the first write; duplicate material IDs collapse to one
/// append.
///
/// # Errors
///
/// - `InvalidInput` if `processed_id` is malformed, the quantity is
///   negative or non-finite, or `materials` does not parse as a JSON
///   string array.
/// - `NotFound` if `processor_id` does not reference an existing
///   [`Processor`], or any material commodity is absent.
/// - `AlreadyExists` if `processed_id`'s key is occupied.
/// - `DanglingReference` / `MalformedRecord` as for any trail access.
#[allow(clippy::too_many_arguments)]
pub fn process<L: Ledger>(
    ledger: &mut L,
    processed_id: &str,
    processor_id: &str,
    quantity: f64,
    materials: &str,
    batch_number: &str,
    quality: &str,
    pic: &str,
    location: &str,
) -> Result<()> {
    validate_id("processed_id", processed_id)?;
    store::validate_quantity("quantity", quantity)?;
    let material = store::parse_id_list("materials", materials)?;

    // Existence checks before any write.
    let processor: Processor = store::read_required(ledger, processor_id)?;
    if store::occupied(ledger, RecordKind::Processed, processed_id)? {
        return Err(ContractError::AlreadyExists {
            kind: RecordKind::Processed,
            id: processed_id.to_string(),
        });
    }

    let mut seen = Vec::with_capacity(material.len());
    let mut trails = Vec::with_capacity(material.len());
    for material_id in &material {
        if seen.contains(material_id) {
            continue;
        }
        seen.push(material_id.clone());

        let commodity: Commodity = store::read_required(ledger, material_id)?;
        let mut trail = load_trail(ledger, &commodity)?;
        trail.push_step(Status::Processed, location, pic);
        trails.push(trail);
    }

    for trail in &trails {
        store::write(ledger, trail)?;
        debug!(traceability = %trail.id, "material marked processed");
    }

    let processed = ProcessedCommodity {
        id: processed_id.to_string(),
        processor_id: processor.id.clone(),
        quantity,
        material,
        batch_number: batch_number.to_string(),
        quality: quality.to_string(),
    };
    store::write(ledger, &processed)?;

    info!(
        processed = %processed_id,
        processor = %processor.id,
        materials = trails.len(),
        quantity,
        "processing run recorded"
    );
    Ok(())
}
