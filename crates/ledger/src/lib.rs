//! Ledger access facade for the palmtrace contract.
//!
//! The facade abstracts the underlying transactional key-value engine,
//! allowing both a real ledger binding (production) and an in-memory
//! implementation (testing and embedding).
//!
//! Every call is scoped to one ambient all-or-nothing transaction owned by
//! the engine behind the facade: the contract never manages locking,
//! retries, or commit/rollback, and must issue reads before the writes that
//! depend on them so the engine can detect conflicting transactions at
//! commit time.

#![deny(unsafe_code)]

mod memory;

pub use memory::MemoryLedger;

use snafu::Snafu;

/// Result type alias for facade operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Errors surfaced by the engine behind the facade.
#[derive(Debug, Snafu)]
pub enum LedgerError {
    /// A single-key read failed.
    #[snafu(display("ledger read failed for key {key}: {reason}"))]
    Read {
        /// The key being read.
        key: String,
        /// Engine-reported failure description.
        reason: String,
    },

    /// A single-key write failed.
    #[snafu(display("ledger write failed for key {key}: {reason}"))]
    Write {
        /// The key being written.
        key: String,
        /// Engine-reported failure description.
        reason: String,
    },

    /// A range scan failed.
    #[snafu(display("ledger scan failed for range [{start}, {end}): {reason}"))]
    Scan {
        /// Inclusive start key.
        start: String,
        /// Exclusive end key.
        end: String,
        /// Engine-reported failure description.
        reason: String,
    },
}

/// Transaction-scoped key-value access.
///
/// Implementations provide snapshot reads and buffered writes within one
/// transaction; atomicity and durability of the transaction are the
/// engine's responsibility, not the trait's.
pub trait Ledger {
    /// Reads the value stored under `key`, or `None` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Read` if the engine rejects the read.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key`, replacing any existing value.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Write` if the engine rejects the write.
    fn put(&mut self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Returns all `(key, value)` pairs with `start <= key < end`, in
    /// ascending lexicographic key order.
    ///
    /// # Errors
    ///
    /// Returns `LedgerError::Scan` if the engine rejects the scan.
    fn range_scan(&self, start: &str, end: &str) -> Result<Vec<(String, Vec<u8>)>>;
}
