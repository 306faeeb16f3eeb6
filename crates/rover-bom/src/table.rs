use std::io::{self, Write};

use comfy_table::Table;
use comfy_table::presets::UTF8_FULL_CONDENSED;

use crate::bom::Bom;

impl Bom {
    /// Write the BOM as a formatted table with a unique-part summary,
    /// as rendered in the assembly documentation.
    pub fn write_table<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "Number of unique parts: {}", self.part_count())?;

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);
        table.set_header(vec!["Part №", "Qty.", "Commodity", "Description"]);

        for (part_number, entry) in self {
            let quantity = entry.quantity().to_string();
            table.add_row(vec![
                part_number.as_str(),
                quantity.as_str(),
                entry.part().commodity().as_str(),
                entry.part().description(),
            ]);
        }

        writeln!(writer, "{table}")
    }
}
