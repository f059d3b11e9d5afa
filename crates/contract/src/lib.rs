//! Provenance contract for palm-oil supply chains.
//!
//! This crate sits between callers (transaction dispatch, APIs) and the
//! transactional key-value ledger consumed through
//! [`palmtrace_ledger::Ledger`], providing:
//!
//! - Key-space partitioning with a mandatory prefix per record type
//! - Typed record access with checked decode errors
//! - The append-only provenance trail engine and lifecycle operations
//!   (harvest, collect, transport, delivery, processing)
//! - Reference-entity registry (farmers, farms, processors, transporters)
//! - Join queries reconstructing a commodity's full history
//!
//! Every public operation takes its ledger capability as an explicit
//! parameter and runs against one ambient transaction: no state is cached
//! across invocations, and an operation performs all reads and validation
//! before its first write so a reported error never leaves partial writes.

#![deny(unsafe_code)]

mod error;
mod keys;
mod query;
mod registry;
mod store;
mod trail;

pub use error::{ContractError, Result};
pub use keys::{RecordKind, scan_bounds, storage_key};
pub use query::{
    CommodityWithTrail, all_commodities, all_processed, commodity_with_trail, processed_by_id,
};
pub use registry::{
    add_farm, add_farmer, add_processor, add_transporter, all_farmers, all_farms, all_processors,
    all_transporters, farm_by_id, farmer_by_id, processor_by_id, transporter_by_id, update_farm,
    update_farmer, update_processor, update_transporter,
};
pub use store::Record;
pub use trail::{collect, harvest, process, transport, transported};
