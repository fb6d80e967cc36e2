//! # Emerald Main Entry Point
//!
//! Parses the command line, sets up logging and the macroquad window, then
//! drives the screen manager at a fixed tick rate.

use clap::Parser;
use emerald::{
    config, map_image_path, AssetProvider, EmeraldResult, FixedTimestep, GameConfig,
    InputHandler, MacroquadDisplay, ScreenManager,
};
use log::{info, warn};
use macroquad::prelude::{get_frame_time, next_frame, request_new_screen_size};
use std::path::PathBuf;

/// Command line arguments for Emerald.
#[derive(Parser, Debug)]
#[command(name = "emerald")]
#[command(about = "A small creature-collecting RPG with an overworld town and wild battles")]
#[command(version)]
struct Args {
    /// Random seed for encounters and battles
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON config file to start from
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Map to load in the overworld
    #[arg(long)]
    map: Option<String>,

    /// One wild encounter per this many steps in grass, on average
    #[arg(long)]
    encounter_rate: Option<u32>,

    /// Draw tile outlines over the map
    #[arg(long)]
    debug_grid: bool,

    /// Folder holding the image assets
    #[arg(long, default_value = "assets")]
    assets: String,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[macroquad::main("Pokemon Emerald")]
async fn main() -> EmeraldResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);

    info!("Starting Emerald v{}", emerald::VERSION);

    let game_config = build_config(&args)?;
    run_game(&args, game_config).await
}

/// Initializes the logging system based on the specified log level.
fn initialize_logging(log_level: &str) {
    #[cfg(feature = "dev-tools")]
    {
        use tracing::Level;

        let level = match log_level.to_lowercase().as_str() {
            "error" => Level::ERROR,
            "warn" => Level::WARN,
            "info" => Level::INFO,
            "debug" => Level::DEBUG,
            "trace" => Level::TRACE,
            _ => Level::INFO,
        };

        tracing_subscriber::fmt()
            .with_max_level(level)
            .with_target(false)
            .init();
    }

    #[cfg(not(feature = "dev-tools"))]
    {
        env_logger::Builder::new()
            .parse_filters(log_level)
            .format_target(false)
            .init();
    }
}

/// Loads the config file, if any, and applies command line overrides.
fn build_config(args: &Args) -> EmeraldResult<GameConfig> {
    let mut game_config = match &args.config {
        Some(path) => GameConfig::load_from_file(path)?,
        None => GameConfig::default(),
    };

    if args.seed.is_some() {
        game_config.seed = args.seed;
    }
    if let Some(map) = &args.map {
        game_config.map_name = map.clone();
    }
    if let Some(rate) = args.encounter_rate {
        game_config.encounter_rate = rate;
    }
    if args.debug_grid {
        game_config.debug_grid = true;
    }

    game_config.validate()?;
    Ok(game_config)
}

/// Opens the window and runs the main loop until a screen asks to quit.
async fn run_game(args: &Args, mut game_config: GameConfig) -> EmeraldResult<()> {
    info!("Initializing macroquad display");

    request_new_screen_size(config::SCREEN_WIDTH as f32, config::SCREEN_HEIGHT as f32);

    // Image paths are resolved against the asset folder by the display itself
    let mut display = MacroquadDisplay::new(&args.assets).await?;

    // The map extent follows its image unless the config pins it
    if game_config.map_size.is_none() {
        let image = map_image_path(&game_config.map_name);
        match display.image_size(&image) {
            Some((width, height)) => game_config.map_size = Some((width as i32, height as i32)),
            None => warn!("No size for {}, using the default map extent", image),
        }
    }

    let mut manager = ScreenManager::from_config(&game_config)?;
    let input_handler = InputHandler::new();
    let mut timestep = FixedTimestep::new(game_config.target_fps);

    loop {
        for _ in 0..timestep.advance(get_frame_time() as f64) {
            manager.update(input_handler.sample());
            if manager.should_quit() {
                break;
            }
        }

        if manager.should_quit() {
            break;
        }

        display.refresh_size();
        manager.render(&mut display);

        next_frame().await;
    }

    info!(
        "Game loop ended after {} ticks ({} dropped)",
        manager.ticks(),
        timestep.dropped_ticks()
    );
    Ok(())
}
