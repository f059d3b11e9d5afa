//! Reference-entity registry: farmers, farms, processors, transporters.
//!
//! Flat records created by an add operation (fails if the ID is taken),
//! replaced whole by an update operation (fails if the ID is absent), and
//! never deleted. These are join targets for the provenance queries; the
//! interesting invariants all live in the trail engine.

use palmtrace_ledger::Ledger;
use palmtrace_types::{Farm, Farmer, Processor, Transporter};
use tracing::debug;

use crate::error::Result;
use crate::store;

/// Adds a new farmer.
///
/// `farms` is the farmer's farm-ID list as a JSON string array.
///
/// # Errors
///
/// `InvalidInput` if the ID or farm list is malformed, `AlreadyExists` if
/// the ID is taken.
#[allow(clippy::too_many_arguments)]
pub fn add_farmer<L: Ledger>(
    ledger: &mut L,
    id: &str,
    name: &str,
    nik: &str,
    address: &str,
    email: &str,
    phone: &str,
    farms: &str,
) -> Result<()> {
    let farmer = farmer_record(id, name, nik, address, email, phone, farms)?;
    store::create(ledger, &farmer)?;
    debug!(id, "farmer added");
    Ok(())
}

/// Replaces an existing farmer's fields.
///
/// # Errors
///
/// `InvalidInput` if the farm list is malformed, `NotFound` if the ID is
/// absent.
#[allow(clippy::too_many_arguments)]
pub fn update_farmer<L: Ledger>(
    ledger: &mut L,
    id: &str,
    name: &str,
    nik: &str,
    address: &str,
    email: &str,
    phone: &str,
    farms: &str,
) -> Result<()> {
    let farmer = farmer_record(id, name, nik, address, email, phone, farms)?;
    store::replace(ledger, &farmer)?;
    debug!(id, "farmer updated");
    Ok(())
}

fn farmer_record(
    id: &str,
    name: &str,
    nik: &str,
    address: &str,
    email: &str,
    phone: &str,
    farms: &str,
) -> Result<Farmer> {
    let farms = store::parse_id_list("farms", farms)?;
    Ok(Farmer {
        id: id.to_string(),
        name: name.to_string(),
        nik: nik.to_string(),
        address: address.to_string(),
        email: email.to_string(),
        phone: phone.to_string(),
        farms,
    })
}

/// Looks up a farmer by ID.
///
/// # Errors
///
/// `NotFound` if absent, `MalformedRecord` if the stored bytes are corrupt.
pub fn farmer_by_id<L: Ledger>(ledger: &L, id: &str) -> Result<Farmer> {
    store::read_required(ledger, id)
}

/// Lists all farmers in ascending key order.
pub fn all_farmers<L: Ledger>(ledger: &L) -> Result<Vec<Farmer>> {
    store::scan_kind(ledger)
}

/// Adds a new farm.
#[allow(clippy::too_many_arguments)]
pub fn add_farm<L: Ledger>(
    ledger: &mut L,
    id: &str,
    owner: &str,
    planted_year: u16,
    seed_varieties: &str,
    area: f64,
    address: &str,
    coordinate: &str,
    capacity: f64,
    legality: &str,
    certificate: &str,
) -> Result<()> {
    store::validate_quantity("area", area)?;
    store::validate_quantity("capacity", capacity)?;
    let farm = farm_record(
        id, owner, planted_year, seed_varieties, area, address, coordinate, capacity, legality,
        certificate,
    );
    store::create(ledger, &farm)?;
    debug!(id, "farm added");
    Ok(())
}

/// Replaces an existing farm's fields.
#[allow(clippy::too_many_arguments)]
pub fn update_farm<L: Ledger>(
    ledger: &mut L,
    id: &str,
    owner: &str,
    planted_year: u16,
    seed_varieties: &str,
    area: f64,
    address: &str,
    coordinate: &str,
    capacity: f64,
    legality: &str,
    certificate: &str,
) -> Result<()> {
    store::validate_quantity("area", area)?;
    store::validate_quantity("capacity", capacity)?;
    let farm = farm_record(
        id, owner, planted_year, seed_varieties, area, address, coordinate, capacity, legality,
        certificate,
    );
    store::replace(ledger, &farm)?;
    debug!(id, "farm updated");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn farm_record(
    id: &str,
    owner: &str,
    planted_year: u16,
    seed_varieties: &str,
    area: f64,
    address: &str,
    coordinate: &str,
    capacity: f64,
    legality: &str,
    certificate: &str,
) -> Farm {
    Farm {
        id: id.to_string(),
        owner: owner.to_string(),
        planted_year,
        seed_varieties: seed_varieties.to_string(),
        area,
        address: address.to_string(),
        coordinate: coordinate.to_string(),
        capacity,
        legality: legality.to_string(),
        certificate: certificate.to_string(),
    }
}

/// Looks up a farm by ID.
pub fn farm_by_id<L: Ledger>(ledger: &L, id: &str) -> Result<Farm> {
    store::read_required(ledger, id)
}

/// Lists all farms in ascending key order.
pub fn all_farms<L: Ledger>(ledger: &L) -> Result<Vec<Farm>> {
    store::scan_kind(ledger)
}

/// Adds a new processor.
#[allow(clippy::too_many_arguments)]
pub fn add_processor<L: Ledger>(
    ledger: &mut L,
    id: &str,
    name: &str,
    nib: &str,
    nik: &str,
    phone: &str,
    email: &str,
    address: &str,
    capacity: f64,
) -> Result<()> {
    store::validate_quantity("capacity", capacity)?;
    let processor = processor_record(id, name, nib, nik, phone, email, address, capacity);
    store::create(ledger, &processor)?;
    debug!(id, "processor added");
    Ok(())
}

/// Replaces an existing processor's fields.
#[allow(clippy::too_many_arguments)]
pub fn update_processor<L: Ledger>(
    ledger: &mut L,
    id: &str,
    name: &str,
    nib: &str,
    nik: &str,
    phone: &str,
    email: &str,
    address: &str,
    capacity: f64,
) -> Result<()> {
    store::validate_quantity("capacity", capacity)?;
    let processor = processor_record(id, name, nib, nik, phone, email, address, capacity);
    store::replace(ledger, &processor)?;
    debug!(id, "processor updated");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn processor_record(
    id: &str,
    name: &str,
    nib: &str,
    nik: &str,
    phone: &str,
    email: &str,
    address: &str,
    capacity: f64,
) -> Processor {
    Processor {
        id: id.to_string(),
        name: name.to_string(),
        nib: nib.to_string(),
        nik: nik.to_string(),
        phone: phone.to_string(),
        email: email.to_string(),
        address: address.to_string(),
        capacity,
    }
}

/// Looks up a processor by ID.
pub fn processor_by_id<L: Ledger>(ledger: &L, id: &str) -> Result<Processor> {
    store::read_required(ledger, id)
}

/// Lists all processors in ascending key order.
pub fn all_processors<L: Ledger>(ledger: &L) -> Result<Vec<Processor>> {
    store::scan_kind(ledger)
}

/// Adds a new transporter.
pub fn add_transporter<L: Ledger>(
    ledger: &mut L,
    id: &str,
    name: &str,
    nik: &str,
    phone: &str,
    num_ships: u32,
) -> Result<()> {
    let transporter = transporter_record(id, name, nik, phone, num_ships);
    store::create(ledger, &transporter)?;
    debug!(id, "transporter added");
    Ok(())
}

/// Replaces an existing transporter's fields.
pub fn update_transporter<L: Ledger>(
    ledger: &mut L,
    id: &str,
    name: &str,
    nik: &str,
    phone: &str,
    num_ships: u32,
) -> Result<()> {
    let transporter = transporter_record(id, name, nik, phone, num_ships);
    store::replace(ledger, &transporter)?;
    debug!(id, "transporter updated");
    Ok(())
}

fn transporter_record(
    id: &str,
    name: &str,
    nik: &str,
    phone: &str,
    num_ships: u32,
) -> Transporter {
    Transporter {
        id: id.to_string(),
        name: name.to_string(),
        nik: nik.to_string(),
        phone: phone.to_string(),
        num_ships,
    }
}

/// Looks up a transporter by ID.
pub fn transporter_by_id<L: Ledger>(ledger: &L, id: &str) -> Result<Transporter> {
    store::read_required(ledger, id)
}

/// Lists all transporters in ascending key order.
pub fn all_transporters<L: Ledger>(ledger: &L) -> Result<Vec<Transporter>> {
    store::scan_kind(ledger)
}
