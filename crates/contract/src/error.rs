//! Contract error taxonomy.
//!
//! Every operation surfaces the first error it encounters as a structured
//! failure carrying the offending key or identifier, never a bare boolean.
//! No operation applies writes after reporting an error.

use palmtrace_ledger::LedgerError;
use palmtrace_types::{CodecError, ValidationError};
use snafu::Snafu;

use crate::keys::RecordKind;

/// Result type for contract operations.
pub type Result<T> = std::result::Result<T, ContractError>;

/// Errors returned by contract operations.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ContractError {
    /// Creation attempted with an identifier whose key is already occupied.
    #[snafu(display("a {kind} with ID {id} already exists"))]
    AlreadyExists {
        /// Record type of the colliding key.
        kind: RecordKind,
        /// The colliding identifier.
        id: String,
    },

    /// Lookup or mutation addressed an absent primary key.
    #[snafu(display("the {kind} with ID {id} does not exist"))]
    NotFound {
        /// Record type that was looked up.
        kind: RecordKind,
        /// The absent identifier.
        id: String,
    },

    /// A stored reference resolved to nothing. Corruption, reported rather
    /// than silently dropped.
    #[snafu(display(
        "the {kind} with ID {id}, referenced from {referenced_from}, does not exist"
    ))]
    DanglingReference {
        /// Record type the reference names.
        kind: RecordKind,
        /// The referenced identifier.
        id: String,
        /// Storage key of the record holding the reference.
        referenced_from: String,
    },

    /// Stored bytes do not match the expected record shape.
    #[snafu(display("malformed record under key {key}: {reason}"))]
    MalformedRecord {
        /// Storage key of the offending record.
        key: String,
        /// What was wrong with the bytes.
        reason: String,
    },

    /// Caller-supplied input was rejected before any ledger access.
    #[snafu(display("invalid input for {field}: {reason}"))]
    InvalidInput {
        /// The rejected input field.
        field: String,
        /// The violated constraint.
        reason: String,
    },

    /// The ledger facade reported a failure.
    #[snafu(display("ledger access failed: {source}"))]
    Ledger {
        /// The underlying facade error.
        source: LedgerError,
    },
}

impl ContractError {
    /// A malformed-record error from a codec failure under `key`.
    pub(crate) fn malformed(key: impl Into<String>, source: CodecError) -> Self {
        ContractError::MalformedRecord {
            key: key.into(),
            reason: source.to_string(),
        }
    }
}

impl From<ValidationError> for ContractError {
    fn from(err: ValidationError) -> Self {
        ContractError::InvalidInput {
            field: err.field,
            reason: err.constraint,
        }
    }
}
