//! Core types for the palmtrace supply-chain ledger.
//!
//! This crate provides the foundational pieces shared by the contract layer:
//! - Record structs for every persisted entity (commodities, trails,
//!   processed commodities, and the reference entities)
//! - The record codec (JSON encode/decode with checked errors)
//! - Identifier validation

pub mod codec;
pub mod types;
pub mod validation;

// Re-export commonly used types at crate root
pub use codec::{CodecError, decode, encode};
pub use types::*;
pub use validation::{MAX_ID_BYTES, ValidationError, validate_id};
