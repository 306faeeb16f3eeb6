use clap::{Parser, Subcommand};
use colored::Colorize;
use env_logger::Env;

mod bom;
mod info;
mod model;

#[derive(Parser)]
#[command(name = "rover")]
#[command(about = "Rover chassis engineering console", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short = 'd', long = "debug", global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a bill of materials from the chassis model
    Bom(bom::BomArgs),

    /// Summarise an assembly's bill of materials
    Info(info::InfoArgs),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{} {e}", "Error:".red());
        for cause in e.chain().skip(1) {
            eprintln!("  {cause}");
        }
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Default log level depends on --debug; RUST_LOG overrides both.
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("error")
    };
    env_logger::Builder::from_env(env).init();

    match cli.command {
        Commands::Bom(args) => bom::execute(args),
        Commands::Info(args) => info::execute(args),
    }
}
