use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use crawl_core::save_file::SAVE_FILE_NAME;
use crawl_core::{EngineConfig, SaveSlot, replay_input};
use directories::ProjectDirs;
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Engine config TOML; defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Mode,
}

#[derive(Subcommand)]
enum Mode {
    /// Drive a session with a keystroke string and print where it ended up
    Play {
        /// Keystrokes, e.g. "n123swwdd:q"
        #[arg(short, long)]
        input: String,

        /// Save slot path; defaults to the per-user data directory
        #[arg(short, long)]
        save: Option<PathBuf>,
    },
}

fn default_save_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "Crawl").map(|proj_dirs| {
        let mut path = proj_dirs.data_dir().to_path_buf();
        path.push(SAVE_FILE_NAME);
        path
    })
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let mut config = match path {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to load config file: {}", path.display()))?,
        None => EngineConfig::default(),
    };
    config
        .apply_env_overrides(|name| env::var(name).ok())
        .context("Failed to apply environment overrides")?;
    config.validate().context("Engine config is invalid")?;
    Ok(config)
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = load_config(args.config.as_deref())?;

    match args.command {
        Mode::Play { input, save } => {
            let Some(save_path) = save.or_else(default_save_path) else {
                bail!("No save path given and no per-user data directory is available");
            };
            info!("using save slot {}", save_path.display());
            let slot = SaveSlot::new(save_path);

            let result = replay_input(&config, &slot, &input)
                .with_context(|| format!("Session failed on input {input:?}"))?;

            if let Some(grid) = &result.grid {
                print!("{}", grid.render_text());
            }
            match result.player {
                Some(location) => println!("Player: ({}, {})", location.x, location.y),
                None => println!("Player: none"),
            }
            println!("Input state: {:?}", result.final_state);
            println!("Terminated: {}", result.terminated);
            println!("Snapshot Hash: {:#018x}", result.final_snapshot_hash);
        }
    }

    Ok(())
}
