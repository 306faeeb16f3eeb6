//! Fastener descriptors and their conversion to internal part identifiers.
//!
//! Fasteners come from the hardware catalogue rather than the chassis model,
//! so they carry a nominal thread specification (e.g. `M5-0.8`) and a
//! standard designation (e.g. `iso4762`) instead of a part number.  The
//! conversion here derives a part number from those fields.

use std::fmt;

use thiserror::Error;

use crate::parts::{PartIdentifier, types};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FastenerError {
    /// The descriptor shape has no part number derivation.  A BOM silently
    /// missing a fastener is worse than a failed build, so this aborts the
    /// whole aggregation pass.
    #[error("unsupported fastener type: {0}")]
    UnsupportedFastenerType(&'static str),

    /// The standard designation is missing from the fixed lookup table.
    #[error("unknown fastener designation: {0:?}")]
    UnknownDesignation(String),
}

/// Externally sourced fastener descriptor.
///
/// `size` is the nominal thread specification (`"M5-0.8"`); `standard` is the
/// designation the dimensions conform to (`"iso4762"`).  Dimensions are in
/// millimetres.
#[derive(Debug, Clone, PartialEq)]
pub enum Fastener {
    Screw {
        size: String,
        standard: String,
        length: f64,
    },
    Nut {
        size: String,
        standard: String,
    },
    Washer {
        size: String,
        standard: String,
        d1: f64,
        d2: f64,
        h: f64,
    },
}

struct Designation {
    abbreviation: &'static str,
    description: &'static str,
}

// Designations in use by the chassis model.  An entry with an empty
// abbreviation contributes nothing to the derived root (iso7093 flat washers
// are the plain variant, so their root is just `W{size}`).
const DESIGNATIONS: &[(&str, Designation)] = &[
    (
        "iso4762",
        Designation {
            abbreviation: "SHC",
            description: "hexagon socket head cap screw",
        },
    ),
    (
        "iso7093",
        Designation {
            abbreviation: "",
            description: "flat washer",
        },
    ),
];

fn designation(standard: &str) -> Result<&'static Designation, FastenerError> {
    DESIGNATIONS
        .iter()
        .find(|(name, _)| *name == standard)
        .map(|(_, designation)| designation)
        .ok_or_else(|| FastenerError::UnknownDesignation(standard.to_string()))
}

impl Fastener {
    /// Derive the internal part identifier for this fastener.
    ///
    /// Screws take the root `S{ABBREV}{shaft}X{length}` and washers
    /// `W{ABBREV}{size}`.  Nut conversion is not implemented.
    pub fn to_part(&self) -> Result<PartIdentifier, FastenerError> {
        match self {
            Fastener::Screw {
                size,
                standard,
                length,
            } => screw_part(size, standard, *length),
            Fastener::Washer {
                size,
                standard,
                d1,
                d2,
                h,
            } => washer_part(size, standard, *d1, *d2, *h),
            Fastener::Nut { .. } => Err(FastenerError::UnsupportedFastenerType("nut")),
        }
    }
}

fn screw_part(size: &str, standard: &str, length: f64) -> Result<PartIdentifier, FastenerError> {
    let designation = designation(standard)?;
    let (shaft, _pitch) = MetricBoltSpec::split_shaft_pitch(size);

    let root = format!("S{}{}X{}", designation.abbreviation, shaft, format_mm(length));
    let description = format!(
        "{size}×{} {} {}.",
        format_mm(length),
        standard.to_uppercase(),
        designation.description,
    );

    Ok(PartIdentifier::new(types::FASTENER, &root, &description))
}

fn washer_part(
    size: &str,
    standard: &str,
    d1: f64,
    d2: f64,
    h: f64,
) -> Result<PartIdentifier, FastenerError> {
    let designation = designation(standard)?;

    let root = format!("W{}{}", designation.abbreviation, size);
    let description = format!(
        "{size} {}×{}×{} {} {}.",
        format_mm(d1),
        format_mm(d2),
        format_mm(h),
        standard.to_uppercase(),
        designation.description,
    );

    Ok(PartIdentifier::new(types::FASTENER, &root, &description))
}

/// Metric bolt specification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricBoltSpec {
    pub shaft: f64,
    pub pitch: f64,
    pub length: f64,
}

impl MetricBoltSpec {
    pub fn new(shaft: f64, pitch: f64, length: f64) -> Self {
        MetricBoltSpec {
            shaft,
            pitch,
            length,
        }
    }

    /// Shaft size prefixed with `M`.
    pub fn shaft_m(&self) -> String {
        format!("M{}", format_mm(self.shaft))
    }

    /// Thread specification, e.g. `M5-0.8`.
    pub fn specification(&self) -> String {
        format!("{}-{}", self.shaft_m(), self.pitch)
    }

    /// Split a thread specification into shaft and pitch components.
    pub fn split_shaft_pitch(specification: &str) -> (&str, Option<&str>) {
        match specification.split_once('-') {
            Some((shaft, pitch)) => (shaft, Some(pitch)),
            None => (specification, None),
        }
    }
}

impl fmt::Display for MetricBoltSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} x {}", self.specification(), format_mm(self.length))
    }
}

/// Format a millimetre dimension without a trailing `.0`.
fn format_mm(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screw_part_number() {
        let screw = Fastener::Screw {
            size: "M5-0.8".to_string(),
            standard: "iso4762".to_string(),
            length: 12.0,
        };

        let part = screw.to_part().unwrap();
        assert_eq!("F-SSHCM5X12", part.identifier());
        assert_eq!("M5-0.8×12 ISO4762 hexagon socket head cap screw.", part.description());
    }

    #[test]
    fn washer_part_number() {
        let washer = Fastener::Washer {
            size: "M5".to_string(),
            standard: "iso7093".to_string(),
            d1: 10.0,
            d2: 20.0,
            h: 1.5,
        };

        let part = washer.to_part().unwrap();
        assert_eq!("F-WM5", part.identifier());
        assert_eq!("M5 10×20×1.5 ISO7093 flat washer.", part.description());
    }

    #[test]
    fn nut_is_unsupported() {
        let nut = Fastener::Nut {
            size: "M5-0.8".to_string(),
            standard: "iso4032".to_string(),
        };

        assert_eq!(
            Err(FastenerError::UnsupportedFastenerType("nut")),
            nut.to_part()
        );
    }

    #[test]
    fn unknown_designation_is_an_error() {
        let screw = Fastener::Screw {
            size: "M5-0.8".to_string(),
            standard: "iso9999".to_string(),
            length: 8.0,
        };

        assert_eq!(
            Err(FastenerError::UnknownDesignation("iso9999".to_string())),
            screw.to_part()
        );
    }

    #[test]
    fn split_shaft_pitch() {
        assert_eq!(("M5", Some("0.8")), MetricBoltSpec::split_shaft_pitch("M5-0.8"));
        assert_eq!(("M5", None), MetricBoltSpec::split_shaft_pitch("M5"));
    }

    #[test]
    fn bolt_specification() {
        let spec = MetricBoltSpec::new(5.0, 0.8, 12.0);
        assert_eq!("M5", spec.shaft_m());
        assert_eq!("M5-0.8", spec.specification());
        assert_eq!("M5-0.8 x 12", spec.to_string());
    }
}
