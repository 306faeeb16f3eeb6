use std::io;

use anyhow::Result;
use clap::Args;
use rover_bom::Bom;

use crate::model;

#[derive(Args, Debug, Clone)]
#[command(about = "Summarise an assembly's bill of materials")]
pub struct InfoArgs {
    /// Assembly selector, e.g. "rocker_axle.RockerAxle"
    #[arg(value_name = "ASSEMBLY", default_value = model::DEFAULT_SELECTOR)]
    pub assembly: String,
}

pub fn execute(args: InfoArgs) -> Result<()> {
    let assembly = model::resolve(&args.assembly)?;
    let bom = Bom::from_assembly(&assembly)?;

    bom.write_table(io::stdout().lock())?;
    Ok(())
}
