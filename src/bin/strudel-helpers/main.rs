//! strudel-helpers - print the Strudel code for an instrument bundle
//!
//! Run with: cargo run -- demos/piano.json --scale C:minor --sound piano

mod app;

use std::path::PathBuf;

use clap::Parser;

use app::Render;

#[derive(Debug, Parser)]
#[command(name = "strudel-helpers", version, about)]
struct Args {
    /// Bundle file (JSON)
    bundle: PathBuf,

    /// Broadcast `.scale(NAME)` over every part after loading
    #[arg(long)]
    scale: Option<String>,

    /// Broadcast `.sound(NAME)` over every part after loading (and after --scale)
    #[arg(long)]
    sound: Option<String>,

    /// Print the pattern graphs as JSON instead of Strudel code
    #[arg(long)]
    json: bool,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::init();

    let args = Args::parse();

    Render::new(args.bundle)
        .scale(args.scale)
        .sound(args.sound)
        .json(args.json)
        .run()
}
