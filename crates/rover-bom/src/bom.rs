//! BOM aggregation and serialization.

use std::io;
use std::str::FromStr;

use indexmap::IndexMap;
use log::debug;
use serde::ser::{Serialize, SerializeMap, SerializeStruct, Serializer};
use thiserror::Error;

use crate::assembly::Assembly;
use crate::fastener::FastenerError;
use crate::parts::PartIdentifier;

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("unknown encoding format {0:?}: must be one of \"csv\", \"json\"")]
    UnknownFormat(String),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to encode CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Output encoding for [`Bom::encode`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncodeFormat {
    #[default]
    Json,
    Csv,
}

impl FromStr for EncodeFormat {
    type Err = EncodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(EncodeFormat::Json),
            "csv" => Ok(EncodeFormat::Csv),
            _ => Err(EncodeError::UnknownFormat(s.to_string())),
        }
    }
}

/// Accumulator for a single part number.
///
/// Quantities are tracked per contributing assembly so the release notes can
/// attribute hardware to the sub-assembly that needs it.
#[derive(Debug, Clone, PartialEq)]
pub struct BomEntry {
    part: PartIdentifier,
    assemblies: IndexMap<String, u32>,
}

impl BomEntry {
    fn new(part: PartIdentifier) -> Self {
        BomEntry {
            part,
            assemblies: IndexMap::new(),
        }
    }

    fn increment(&mut self, assembly_name: &str) -> u32 {
        let count = self
            .assemblies
            .entry(assembly_name.to_string())
            .or_insert(0);
        *count += 1;
        *count
    }

    pub fn part(&self) -> &PartIdentifier {
        &self.part
    }

    /// Counts keyed by contributing assembly name.
    pub fn assemblies(&self) -> &IndexMap<String, u32> {
        &self.assemblies
    }

    /// Total count across all contributing assemblies.
    pub fn quantity(&self) -> u32 {
        self.assemblies.values().sum()
    }
}

/// Bill of materials: one entry per canonical part number, in first-seen
/// order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Bom {
    entries: IndexMap<String, BomEntry>,
}

impl Bom {
    pub fn new() -> Self {
        Bom::default()
    }

    /// Aggregate an assembly and all of its descendants.
    pub fn from_assembly(root: &Assembly) -> Result<Self, FastenerError> {
        let mut bom = Bom::new();
        bom.insert_assembly(root, true)?;
        Ok(bom)
    }

    /// Aggregate a single assembly node, ignoring descendants.
    pub fn from_assembly_shallow(root: &Assembly) -> Result<Self, FastenerError> {
        let mut bom = Bom::new();
        bom.insert_assembly(root, false)?;
        Ok(bom)
    }

    /// Insert one part occurrence attributed to `assembly_name`.
    ///
    /// The first occurrence of a part number fixes the entry's descriptive
    /// fields; later occurrences only increment counts.
    pub fn insert_part(&mut self, part: PartIdentifier, assembly_name: &str) {
        let identifier = part.identifier();
        self.entries
            .entry(identifier)
            .or_insert_with(|| BomEntry::new(part))
            .increment(assembly_name);
    }

    /// Scan an assembly tree and accumulate every annotated part.
    ///
    /// Nodes are visited in pre-order.  Each occurrence is attributed to the
    /// name of the node being scanned, not the producer-side key of the
    /// annotation.  A fastener that cannot be converted aborts the pass with
    /// no further insertions.
    pub fn insert_assembly(&mut self, root: &Assembly, deep: bool) -> Result<(), FastenerError> {
        let nodes: Vec<&Assembly> = if deep {
            root.walk().collect()
        } else {
            vec![root]
        };

        for node in nodes {
            debug!(
                "scanning assembly {:?}: {} part annotations, {} fastener annotations",
                node.name(),
                node.part_annotations().len(),
                node.fastener_annotations().len(),
            );

            for part in node.part_annotations().values() {
                self.insert_part(part.clone(), node.name());
            }

            for fastener in node.fastener_annotations().values() {
                self.insert_part(fastener.to_part()?, node.name());
            }
        }

        Ok(())
    }

    /// Count of unique part numbers (not unit quantity).
    pub fn part_count(&self) -> usize {
        self.entries.len()
    }

    /// Total unit quantity across all entries.
    pub fn total_quantity(&self) -> u32 {
        self.entries.values().map(BomEntry::quantity).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, identifier: &str) -> Option<&BomEntry> {
        self.entries.get(identifier)
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, BomEntry> {
        self.entries.iter()
    }

    /// Encode to the named format (`"json"` or `"csv"`).
    pub fn encode(&self, format: &str) -> Result<String, EncodeError> {
        match format.parse::<EncodeFormat>()? {
            EncodeFormat::Json => self.to_json(),
            EncodeFormat::Csv => self.to_csv(),
        }
    }

    /// JSON object keyed by part number:
    /// `{"T-BEAM-DECK": {"part": {"commodity_type": ..., "description": ...}, "quantity": 2}}`.
    pub fn to_json(&self) -> Result<String, EncodeError> {
        Ok(serde_json::to_string(self)?)
    }

    /// CSV with the fixed header `part_number,quantity,commodity_type,description`.
    pub fn to_csv(&self) -> Result<String, EncodeError> {
        let mut buffer = Vec::new();
        {
            let mut writer = csv::Writer::from_writer(&mut buffer);
            writer.write_record(["part_number", "quantity", "commodity_type", "description"])?;

            for (part_number, entry) in &self.entries {
                let quantity = entry.quantity().to_string();
                writer.write_record([
                    part_number.as_str(),
                    quantity.as_str(),
                    entry.part().commodity().as_str(),
                    entry.part().description(),
                ])?;
            }

            writer.flush()?;
        }

        String::from_utf8(buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
    }
}

impl<'a> IntoIterator for &'a Bom {
    type Item = (&'a String, &'a BomEntry);
    type IntoIter = indexmap::map::Iter<'a, String, BomEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for Bom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (identifier, entry) in &self.entries {
            map.serialize_entry(identifier, entry)?;
        }
        map.end()
    }
}

impl Serialize for BomEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("BomEntry", 2)?;
        state.serialize_field("part", &EncodedPart(&self.part))?;
        state.serialize_field("quantity", &self.quantity())?;
        state.end()
    }
}

// The part number is already the key of the surrounding object, so the
// nested part record carries only the descriptive fields.
struct EncodedPart<'a>(&'a PartIdentifier);

impl Serialize for EncodedPart<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("PartIdentifier", 2)?;
        state.serialize_field("commodity_type", &self.0.commodity())?;
        state.serialize_field("description", self.0.description())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parts::{Commodity, types};

    fn part(root: &str) -> PartIdentifier {
        PartIdentifier::new(types::TSLOT, root, "Test part.")
    }

    #[test]
    fn insert_part_accumulates() {
        let mut bom = Bom::new();
        bom.insert_part(part("BEAM"), "frame");
        bom.insert_part(part("BEAM"), "frame");
        bom.insert_part(part("BEAM"), "deck");

        assert_eq!(1, bom.part_count());
        let entry = bom.get("T-BEAM").unwrap();
        assert_eq!(3, entry.quantity());
        assert_eq!(Some(&2), entry.assemblies().get("frame"));
        assert_eq!(Some(&1), entry.assemblies().get("deck"));
    }

    #[test]
    fn first_description_wins() {
        let mut bom = Bom::new();
        bom.insert_part(
            PartIdentifier::new(types::TSLOT, "BEAM", "First description."),
            "frame",
        );
        bom.insert_part(
            PartIdentifier::new(types::TSLOT, "BEAM", "Second description."),
            "frame",
        );

        let entry = bom.get("T-BEAM").unwrap();
        assert_eq!("First description.", entry.part().description());
        assert_eq!(2, entry.quantity());
    }

    #[test]
    fn distinct_suffixes_stay_distinct() {
        let mut bom = Bom::new();
        bom.insert_part(part("BEAM").with_suffix("PORT"), "frame");
        bom.insert_part(part("BEAM").with_suffix("STAR"), "frame");

        assert_eq!(2, bom.part_count());
    }

    #[test]
    fn total_quantity_sums_entries() {
        let mut bom = Bom::new();
        bom.insert_part(part("BEAM"), "frame");
        bom.insert_part(part("BEAM"), "frame");
        bom.insert_part(part("PILLAR"), "frame");

        assert_eq!(3, bom.total_quantity());
    }

    #[test]
    fn json_encoding_shape() {
        let mut bom = Bom::new();
        bom.insert_part(
            PartIdentifier::new(types::TSLOT, "BEAM", "Deck beam.")
                .with_commodity(Commodity::Fabricated),
            "frame",
        );
        bom.insert_part(
            PartIdentifier::new(types::TSLOT, "BEAM", "Deck beam.")
                .with_commodity(Commodity::Fabricated),
            "frame",
        );

        let encoded = bom.encode("json").unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();

        assert_eq!(2, value["T-BEAM"]["quantity"]);
        assert_eq!("fabricated", value["T-BEAM"]["part"]["commodity_type"]);
        assert_eq!("Deck beam.", value["T-BEAM"]["part"]["description"]);
    }

    #[test]
    fn csv_encoding_rows() {
        let mut bom = Bom::new();
        bom.insert_part(part("A"), "frame");
        bom.insert_part(part("A"), "frame");
        bom.insert_part(part("A"), "deck");
        bom.insert_part(part("B"), "frame");

        let encoded = bom.encode("csv").unwrap();
        let mut lines = encoded.lines();

        assert_eq!(
            Some("part_number,quantity,commodity_type,description"),
            lines.next()
        );
        assert_eq!(Some("T-A,3,purchased,Test part."), lines.next());
        assert_eq!(Some("T-B,1,purchased,Test part."), lines.next());
        assert_eq!(None, lines.next());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let bom = Bom::new();
        match bom.encode("xml") {
            Err(EncodeError::UnknownFormat(format)) => assert_eq!("xml", format),
            other => panic!("expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn encode_format_names_valid_choices() {
        let err = "xml".parse::<EncodeFormat>().unwrap_err();
        let message = err.to_string();
        assert!(message.contains("csv"));
        assert!(message.contains("json"));
    }

    #[test]
    fn repeated_runs_are_byte_identical() {
        let tree = Assembly::new("root")
            .with_part("beam", part("BEAM"))
            .with_child(Assembly::new("sub").with_part("pillar", part("PILLAR")));

        let first = Bom::from_assembly(&tree).unwrap();
        let second = Bom::from_assembly(&tree).unwrap();

        assert_eq!(first.encode("json").unwrap(), second.encode("json").unwrap());
        assert_eq!(first.encode("csv").unwrap(), second.encode("csv").unwrap());
    }
}
