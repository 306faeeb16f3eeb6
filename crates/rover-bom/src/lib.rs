//! Bill of materials aggregation for the rover chassis model.
//!
//! The chassis is modelled as a tree of named assemblies.  Each node may be
//! annotated with the parts it directly contributes – either internal
//! [`PartIdentifier`] records or fastener descriptors sourced from the
//! hardware catalogue.  [`Bom`] walks that tree, normalises fasteners into
//! part identifiers, and accumulates quantities keyed by each part's
//! canonical part number.
//!
//! The aggregate serialises to CSV (for release artifacts) and JSON (for
//! downstream tooling); the optional `table` feature adds a terminal table
//! rendering used by the documentation build.

pub mod assembly;
pub mod bom;
pub mod fastener;
pub mod parts;
#[cfg(feature = "table")]
mod table;

pub use assembly::Assembly;
pub use bom::{Bom, BomEntry, EncodeError, EncodeFormat};
pub use fastener::{Fastener, FastenerError, MetricBoltSpec};
pub use parts::{Commodity, PartIdentifier, PartType};
