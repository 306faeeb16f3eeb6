//! Part identity for the significant part numbering system.
//!
//! Every BOM line is keyed by a canonical part number of the form
//! `{type abbreviation}-{root}` (plus an optional `-{suffix}`).  Two parts
//! with the same part number are the same BOM line regardless of their
//! description or commodity class.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Serialize, Serializer};

/// Part classification shared by many parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartType {
    pub abbreviation: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// The fixed catalogue of part classifications.
pub mod types {
    use super::PartType;

    pub const ADDITIVE: PartType = PartType {
        abbreviation: "A",
        name: "Additive manufactured",
        description: "Parts manufactured with an additive technique such as 3D printing.",
    };

    pub const DIN: PartType = PartType {
        abbreviation: "D",
        name: "DIN rail components",
        description: "DIN rails and related components.",
    };

    pub const ELECTRONIC: PartType = PartType {
        abbreviation: "E",
        name: "Electronic module",
        description: "Electronic modules and boards.",
    };

    pub const FASTENER: PartType = PartType {
        abbreviation: "F",
        name: "Fastener",
        description: "Fasteners including bolts, nuts, and washers.",
    };

    pub const LINEAR_MOTION: PartType = PartType {
        abbreviation: "L",
        name: "Linear motion component",
        description: "Linear motion components are often available from 3D printer component suppliers.",
    };

    pub const TSLOT: PartType = PartType {
        abbreviation: "T",
        name: "T-slot or V-slot component",
        description: "T-slot components including extrusions, brackets, and slot nuts.",
    };
}

/// Acquisition or production class of a part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Commodity {
    Assembly,
    Consumable,
    Fabricated,
    #[default]
    Purchased,
    Tool,
}

impl Commodity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commodity::Assembly => "assembly or sub-assembly",
            Commodity::Consumable => "consumable",
            Commodity::Fabricated => "fabricated",
            Commodity::Purchased => "purchased",
            Commodity::Tool => "tool, jig, or fixture",
        }
    }
}

impl fmt::Display for Commodity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Commodity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Internal part identifier.
///
/// The root designator (and suffix, when present) are uppercased at
/// construction.  This is part of the identity contract, not presentation:
/// the uppercased form feeds the dedup key.
#[derive(Debug, Clone)]
pub struct PartIdentifier {
    part_type: PartType,
    root: String,
    suffix: Option<String>,
    commodity: Commodity,
    description: String,
}

impl PartIdentifier {
    /// Create a purchased part with no suffix.
    pub fn new(part_type: PartType, root: &str, description: &str) -> Self {
        PartIdentifier {
            part_type,
            root: root.to_uppercase(),
            suffix: None,
            commodity: Commodity::default(),
            description: description.to_string(),
        }
    }

    pub fn with_commodity(mut self, commodity: Commodity) -> Self {
        self.commodity = commodity;
        self
    }

    pub fn with_suffix(mut self, suffix: &str) -> Self {
        self.suffix = Some(suffix.to_uppercase());
        self
    }

    /// Canonical part number: `{abbreviation}-{root}` plus `-{suffix}` when
    /// a suffix is present.
    pub fn identifier(&self) -> String {
        match &self.suffix {
            Some(suffix) => format!("{}-{}-{}", self.part_type.abbreviation, self.root, suffix),
            None => format!("{}-{}", self.part_type.abbreviation, self.root),
        }
    }

    pub fn part_type(&self) -> &PartType {
        &self.part_type
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn commodity(&self) -> Commodity {
        self.commodity
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

// Identity tracks the canonical part number only.  Description and commodity
// never affect BOM grouping.
impl PartialEq for PartIdentifier {
    fn eq(&self, other: &Self) -> bool {
        self.identifier() == other.identifier()
    }
}

impl Eq for PartIdentifier {}

impl Hash for PartIdentifier {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identifier().hash(state);
    }
}

impl fmt::Display for PartIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.identifier())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_without_suffix() {
        let part = PartIdentifier::new(types::TSLOT, "BEAM-DECK", "Deck beam.");
        assert_eq!("T-BEAM-DECK", part.identifier());
    }

    #[test]
    fn identifier_with_suffix() {
        let part = PartIdentifier::new(types::TSLOT, "BEAM-DECK", "Deck beam.").with_suffix("port");
        assert_eq!("T-BEAM-DECK-PORT", part.identifier());
    }

    #[test]
    fn root_and_suffix_are_uppercased() {
        let lower = PartIdentifier::new(types::ADDITIVE, "housing", "Axle housing.").with_suffix("aft");
        let upper = PartIdentifier::new(types::ADDITIVE, "HOUSING", "Axle housing.").with_suffix("AFT");
        assert_eq!(lower.identifier(), upper.identifier());
        assert_eq!(lower, upper);
    }

    #[test]
    fn equality_ignores_description_and_commodity() {
        let a = PartIdentifier::new(types::DIN, "RAIL-35", "Top hat rail.");
        let b = PartIdentifier::new(types::DIN, "RAIL-35", "A different description.")
            .with_commodity(Commodity::Fabricated);
        assert_eq!(a, b);
    }

    #[test]
    fn distinct_roots_are_distinct_parts() {
        let a = PartIdentifier::new(types::DIN, "RAIL-35", "Rail.");
        let b = PartIdentifier::new(types::DIN, "RAIL-15", "Rail.");
        assert_ne!(a, b);
    }

    #[test]
    fn default_commodity_is_purchased() {
        let part = PartIdentifier::new(types::ELECTRONIC, "VMC", "Vehicle management computer.");
        assert_eq!(Commodity::Purchased, part.commodity());
    }
}
