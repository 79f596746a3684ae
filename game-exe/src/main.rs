//! Gridcast: a software-rendered grid raycaster. The binary crate
//! takes care of initialising logging, config, SDL2 and the scene,
//! then hands everything to the game loop.

mod cli;
mod config;
mod d_main;
mod timestep;

use std::error::Error;

use cli::*;
use log::{LevelFilter, info};
use mimalloc::MiMalloc;
use scene::Scene;
use simplelog::TermLogger;

use crate::config::UserConfig;
use d_main::game_loop;
use input::Input;

const BASE_DIR: &str = "gridcast/";

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

/// The main `game-exe` crate should take care of initialising a few
/// things
fn main() -> Result<(), Box<dyn Error>> {
    let mut options: CLIOptions = argh::from_env();

    TermLogger::init(
        options.verbose.unwrap_or(LevelFilter::Info),
        simplelog::ConfigBuilder::default()
            .set_time_level(LevelFilter::Trace)
            .build(),
        simplelog::TerminalMode::Mixed,
        simplelog::ColorChoice::Auto,
    )?;

    let mut user_config = UserConfig::load();
    user_config.sync_cli(&mut options);
    user_config.write();

    if options.scene.is_empty() {
        return Err("no scene file provided, use --scene <path>".into());
    }
    if options.width == 0 || options.height == 0 {
        return Err("screen dimensions must be non-zero".into());
    }

    let scene = Scene::from_file(&options.scene)?;

    let sdl_ctx = sdl2::init()?;
    info!("Init SDL2 main");
    let video_ctx = sdl_ctx.video()?;
    info!("Init SDL2 video");

    let mut window_builder = video_ctx.window("GRIDCAST", options.width, options.height);
    window_builder.position_centered();
    if options.fullscreen == Some(true) {
        window_builder.fullscreen_desktop();
    }
    let window = window_builder.build()?;

    let canvas = window.into_canvas().accelerated().present_vsync().build()?;
    info!("Window and canvas ready");

    let input = Input::new(sdl_ctx.event_pump()?, (&user_config.input).into());

    game_loop(scene, input, canvas, &options)?;
    Ok(())
}
