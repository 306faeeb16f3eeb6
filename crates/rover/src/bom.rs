use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use rover_bom::Bom;

use crate::model;

#[derive(ValueEnum, Debug, Clone, Default)]
pub enum EncodeArg {
    #[default]
    Json,
    Csv,
}

impl std::fmt::Display for EncodeArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeArg::Json => write!(f, "json"),
            EncodeArg::Csv => write!(f, "csv"),
        }
    }
}

#[derive(Args, Debug, Clone)]
#[command(about = "Generate a bill of materials from the chassis model")]
pub struct BomArgs {
    /// Assembly selector, e.g. "frame.Frame"
    #[arg(value_name = "ASSEMBLY", default_value = model::DEFAULT_SELECTOR)]
    pub assembly: String,

    /// Output encoding
    #[arg(long = "encode", default_value_t = EncodeArg::Json)]
    pub encode: EncodeArg,
}

pub fn execute(args: BomArgs) -> Result<()> {
    let assembly = model::resolve(&args.assembly)?;
    let bom = Bom::from_assembly(&assembly)?;

    let mut writer = io::stdout().lock();
    match args.encode {
        EncodeArg::Json => writeln!(writer, "{}", bom.to_json()?)?,
        EncodeArg::Csv => write!(writer, "{}", bom.to_csv()?)?,
    }

    Ok(())
}
