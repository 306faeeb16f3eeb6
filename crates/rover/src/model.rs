//! Chassis model catalogue.
//!
//! The geometry layer is out of scope for the console; what the BOM needs
//! from each assembly is its part annotations, reproduced here per
//! sub-assembly.  Selectors keep the dotted `module.Class` shape used in the
//! documentation build.

use anyhow::{Result, bail};
use log::debug;
use rover_bom::parts::types;
use rover_bom::{Assembly, Commodity, Fastener, PartIdentifier};

pub const DEFAULT_SELECTOR: &str = "final.FinalAssembly";

const SELECTORS: &[(&str, fn() -> Assembly)] = &[
    ("electronics.Electronics", electronics),
    ("final.FinalAssembly", final_assembly),
    ("frame.Frame", frame),
    ("rocker_axle.RockerAxle", rocker_axle),
];

/// Resolve a dotted assembly selector against the catalogue.
pub fn resolve(selector: &str) -> Result<Assembly> {
    for (name, build) in SELECTORS {
        if *name == selector {
            debug!("resolved assembly selector {selector:?}");
            return Ok(build());
        }
    }

    let known: Vec<&str> = SELECTORS.iter().map(|(name, _)| *name).collect();
    bail!(
        "unknown assembly selector {selector:?}: expected one of {}",
        known.join(", ")
    )
}

fn cap_screw(length: f64) -> Fastener {
    Fastener::Screw {
        size: "M5-0.8".to_string(),
        standard: "iso4762".to_string(),
        length,
    }
}

fn flat_washer() -> Fastener {
    Fastener::Washer {
        size: "M5".to_string(),
        standard: "iso7093".to_string(),
        d1: 5.3,
        d2: 15.0,
        h: 1.2,
    }
}

fn frame_side(side: &str) -> Assembly {
    let mut assembly = Assembly::new(format!("frame_side_{side}"))
        .with_part(
            format!("frame_side_{side}__pillar_transom"),
            PartIdentifier::new(
                types::TSLOT,
                "PILLAR-TRANS",
                "Frame transom pillar: T-slot 20×20mm, length=143mm.",
            )
            .with_commodity(Commodity::Fabricated),
        )
        .with_part(
            format!("frame_side_{side}__pillar_rocker"),
            PartIdentifier::new(
                types::TSLOT,
                "PILLAR-ROCK",
                "Frame rocker axle pillar: T-slot 20×40mm, length=190mm.",
            )
            .with_commodity(Commodity::Fabricated),
        )
        .with_part(
            format!("frame_side_{side}__beam_belly"),
            PartIdentifier::new(
                types::TSLOT,
                "BEAM-BELLY",
                format!("Frame belly beam {side}: T-slot 20×20mm, length=439mm.").as_str(),
            )
            .with_commodity(Commodity::Fabricated)
            .with_suffix(side),
        )
        .with_part(
            format!("frame_side_{side}__beam_deck"),
            PartIdentifier::new(
                types::TSLOT,
                "BEAM-DECK",
                format!("Frame deck beam {side}: T-slot 20×20mm, length=439mm.").as_str(),
            )
            .with_commodity(Commodity::Fabricated)
            .with_suffix(side),
        );

    for joint in ["transom", "rocker", "fore"] {
        assembly = assembly
            .with_fastener(format!("screw_{joint}"), cap_screw(8.0))
            .with_fastener(format!("washer_{joint}"), flat_washer());
    }

    assembly
}

fn frame() -> Assembly {
    let lateral = |position: &str, length: u32| {
        PartIdentifier::new(
            types::TSLOT,
            "BEAM-LAT",
            format!("Frame lateral beam {position}: T-slot 20×20mm, length={length}mm.").as_str(),
        )
        .with_commodity(Commodity::Fabricated)
    };

    Assembly::new("frame")
        .with_child(frame_side("port"))
        .with_child(frame_side("starboard"))
        .with_child(
            Assembly::new("frame_fore")
                .with_part("frame_fore__beam_lateral", lateral("fore", 285))
                .with_fastener("screw_port", cap_screw(12.0))
                .with_fastener("screw_starboard", cap_screw(12.0)),
        )
        .with_child(
            Assembly::new("frame_aft")
                .with_part("frame_aft__beam_lateral", lateral("aft", 285))
                .with_fastener("screw_port", cap_screw(12.0))
                .with_fastener("screw_starboard", cap_screw(12.0)),
        )
}

fn rocker_axle() -> Assembly {
    let pillar = PartIdentifier::new(
        types::LINEAR_MOTION,
        "SHF8-PILLAR",
        "Shaft support: SHF8, for ⌀8mm shaft.",
    );
    let axle = PartIdentifier::new(
        types::LINEAR_MOTION,
        "SHF-AXLE",
        "Chromed linear shaft: ⌀8mm, length=270mm.",
    )
    .with_commodity(Commodity::Fabricated);

    Assembly::new("rocker_axle")
        .with_part("rocker_axle__pillar_port", pillar.clone())
        .with_part("rocker_axle__pillar_starboard", pillar)
        .with_part("rocker_axle__axle", axle)
        .with_fastener("screw_pillar_port", cap_screw(16.0))
        .with_fastener("screw_pillar_starboard", cap_screw(16.0))
        .with_fastener("washer_pillar_port", flat_washer())
        .with_fastener("washer_pillar_starboard", flat_washer())
}

fn electronics() -> Assembly {
    Assembly::new("electronics_control")
        .with_part(
            "electronics_control__din_rail",
            PartIdentifier::new(types::DIN, "RAIL-75", "DIN rail: 35×7.5mm, length=75mm."),
        )
        .with_part(
            "electronics_control__pitray_clip",
            PartIdentifier::new(types::DIN, "CLIP-RPI", "DIN rail clip: to suit Raspberry Pi 3B."),
        )
        .with_part(
            "electronics_control__rpi",
            PartIdentifier::new(types::ELECTRONIC, "RPI3B", "Raspberry Pi 3B single board computer."),
        )
}

fn final_assembly() -> Assembly {
    Assembly::new("final")
        .with_child(frame())
        .with_child(rocker_axle())
        .with_child(electronics())
}
