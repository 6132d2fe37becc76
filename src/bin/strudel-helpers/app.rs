//! Render - load a bundle, apply the requested chain calls, print the parts

use std::path::PathBuf;

use color_eyre::eyre::{Result as EyreResult, WrapErr};
use log::info;

use strudel_helpers::{instrument::BundleConfig, load_instrument, Chain, Pattern};

/// Command builder
pub struct Render {
    bundle: PathBuf,
    scale: Option<String>,
    sound: Option<String>,
    json: bool,
}

impl Render {
    pub fn new(bundle: PathBuf) -> Self {
        Self {
            bundle,
            scale: None,
            sound: None,
            json: false,
        }
    }

    pub fn scale(mut self, scale: Option<String>) -> Self {
        self.scale = scale;
        self
    }

    pub fn sound(mut self, sound: Option<String>) -> Self {
        self.sound = sound;
        self
    }

    pub fn json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    pub fn run(self) -> EyreResult<()> {
        let text = std::fs::read_to_string(&self.bundle)
            .wrap_err_with(|| format!("failed to read {}", self.bundle.display()))?;
        let bundle = BundleConfig::from_json(&text)
            .wrap_err_with(|| format!("invalid bundle {}", self.bundle.display()))?;

        let mut chain = load_instrument(bundle)?;
        if let Some(scale) = &self.scale {
            chain = chain.scale(scale);
        }
        if let Some(sound) = &self.sound {
            chain = chain.sound(sound);
        }

        if chain.has_pending_effects() {
            info!("effects are still pending; pass --sound to apply them");
        }

        if self.json {
            print_json(&chain)
        } else {
            print_code(&chain);
            Ok(())
        }
    }
}

fn print_code(chain: &Chain<Pattern>) {
    let width = chain.names().map(str::len).max().unwrap_or(0);
    for (name, part) in chain.iter() {
        println!("{name:>width$}: {part}");
    }
}

fn print_json(chain: &Chain<Pattern>) -> EyreResult<()> {
    let json = serde_json::to_string_pretty(chain.parts()).wrap_err("failed to encode parts")?;
    println!("{json}");
    Ok(())
}
