//! Record definitions for every entity persisted to the ledger.
//!
//! Each record is stored as one key-value entry under a type-prefixed key
//! (see the contract crate's key module). A commodity's relationship to its
//! traceability trail is a named reference, not embedding: the two records
//! live under independent keys and are only joined at query time.

use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Lifecycle status
// ============================================================================

/// Lifecycle status tag for one step of a traceability trail.
///
/// The canonical progression is
/// `harvested -> collected -> in-transport -> delivered -> processed`,
/// with `processed` terminal. The trail engine appends tags but does not
/// reject out-of-order progressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    /// Fruit bunches cut at the farm.
    Harvested,
    /// Picked up from the farm and pooled at a collection point.
    Collected,
    /// On a vehicle or vessel between collection and delivery.
    InTransport,
    /// Arrived at the processing site.
    Delivered,
    /// Consumed as input material by a processing run. Terminal.
    Processed,
}

impl Status {
    /// Returns the wire tag for this status, as stored in the trail.
    pub const fn as_str(self) -> &'static str {
        match self {
            Status::Harvested => "harvested",
            Status::Collected => "collected",
            Status::InTransport => "in-transport",
            Status::Delivered => "delivered",
            Status::Processed => "processed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Commodity records
// ============================================================================

/// A harvested batch of palm-oil fruit bunches.
///
/// Created once at harvest and never deleted. The embedded
/// [`traceability_id`](Self::traceability_id) names the trail record that
/// mutates as the batch moves through the chain; the commodity itself is
/// otherwise immutable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commodity {
    /// Unique commodity identifier.
    pub id: String,
    /// Human-readable batch name.
    pub name: String,
    /// Harvested quantity. Non-negative; units are a caller convention.
    pub quantity: f64,
    /// Harvest date as entered at the farm, free-form.
    pub date_harvested: String,
    /// Named reference to this batch's [`Traceability`] record.
    pub traceability_id: String,
}

/// The append-only provenance trail for one commodity.
///
/// Three parallel sequences of equal length: index `i` across `status`,
/// `location`, and `pic` describes one lifecycle event. Elements are never
/// removed or reordered; every transition appends exactly one aligned triple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Traceability {
    /// Unique trail identifier.
    pub id: String,
    /// Status tag per lifecycle step.
    pub status: Vec<Status>,
    /// Free-text location per lifecycle step.
    pub location: Vec<String>,
    /// Person in charge of each lifecycle step.
    pub pic: Vec<String>,
}

impl Traceability {
    /// Creates a trail with a single `harvested` step.
    pub fn begin(
        id: impl Into<String>,
        pic: impl Into<String>,
        location: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            status: vec![Status::Harvested],
            location: vec![location.into()],
            pic: vec![pic.into()],
        }
    }

    /// Appends one aligned `(status, location, pic)` triple.
    pub fn push_step(
        &mut self,
        status: Status,
        location: impl Into<String>,
        pic: impl Into<String>,
    ) {
        self.status.push(status);
        self.location.push(location.into());
        self.pic.push(pic.into());
    }

    /// Number of recorded lifecycle steps.
    pub fn steps(&self) -> usize {
        self.status.len()
    }

    /// True when the three sequences agree in length.
    ///
    /// A stored trail violating this is corrupt; the contract layer refuses
    /// to append to it.
    pub fn is_aligned(&self) -> bool {
        self.status.len() == self.location.len() && self.status.len() == self.pic.len()
    }

    /// The most recently appended status tag, if any.
    pub fn last_status(&self) -> Option<Status> {
        self.status.last().copied()
    }
}

/// Output of a processing run. Immutable after creation: no update
/// operation exists for processed commodities by design.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessedCommodity {
    /// Unique processed-batch identifier.
    pub id: String,
    /// Named reference to the [`Processor`] that ran the transformation.
    pub processor_id: String,
    /// Output quantity. Non-negative.
    pub quantity: f64,
    /// Commodity IDs consumed as input material.
    pub material: Vec<String>,
    /// Production batch number.
    pub batch_number: String,
    /// Quality grade assigned at the mill.
    pub quality: String,
}

// ============================================================================
// Reference entities
// ============================================================================

/// A smallholder or estate farmer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farmer {
    pub id: String,
    pub name: String,
    /// National identity number.
    pub nik: String,
    pub address: String,
    pub email: String,
    pub phone: String,
    /// IDs of the farms this farmer works.
    pub farms: Vec<String>,
}

/// A plantation plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Farm {
    pub id: String,
    /// Farmer ID of the owner.
    pub owner: String,
    pub planted_year: u16,
    pub seed_varieties: String,
    /// Planted area in hectares.
    pub area: f64,
    pub address: String,
    pub coordinate: String,
    /// Expected yield capacity.
    pub capacity: f64,
    /// Land legality documentation.
    pub legality: String,
    /// Sustainability certificate, if any.
    pub certificate: String,
}

/// A mill or refinery that turns commodities into processed batches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Processor {
    pub id: String,
    pub name: String,
    /// Business registration number.
    pub nib: String,
    /// National identity number of the contact person.
    pub nik: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    /// Processing capacity.
    pub capacity: f64,
}

/// A transport operator moving commodities between sites.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transporter {
    pub id: String,
    pub name: String,
    /// National identity number.
    pub nik: String,
    pub phone: String,
    /// Fleet size.
    pub num_ships: u32,
}
