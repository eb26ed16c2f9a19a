// src/bin/cli.rs
use color_eyre::eyre::eyre;
use kra_watch::cli::{self, Mode};
use kra_watch::gui;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    match cli::detect_mode().map_err(|e| eyre!("{e}"))? {
        Mode::Cli(options) => cli::run(options).map_err(|e| eyre!("{e}")),
        Mode::Gui(_) => gui::run(eframe::NativeOptions::default()).map_err(|e| eyre!("{e}")),
    }
}
